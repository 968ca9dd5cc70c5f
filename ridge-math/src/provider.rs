//! # ⚙️ MathProvider — Estratégia de precisão
//!
//! Capacidade injetada nos filtros: as mesmas sete operações em uma
//! implementação exata e outra aproximada.

use std::fmt::Debug;

use rand::RngCore;

use crate::approximations::{
    approximate_abs, approximate_atan2, approximate_cos, approximate_ln, approximate_normal,
    approximate_sin, approximate_sqrt, polar_normal,
};

/// **MathProvider** — primitivas numéricas consumidas pelos filtros
///
/// Object-safe: os consumidores guardam um `Arc<dyn MathProvider>`
/// escolhido na construção.
pub trait MathProvider: Send + Sync + Debug {
    /// Seno, resultado em [-1, 1]
    fn sin(&self, theta: f32) -> f32;

    /// Cosseno, resultado em [-1, 1]
    fn cos(&self, theta: f32) -> f32;

    /// Arco-tangente de quatro quadrantes, resultado em (-π, π]
    fn atan2(&self, y: f32, x: f32) -> f32;

    /// Raiz quadrada (contrato: `x >= 0`)
    fn sqrt(&self, x: f32) -> f32;

    /// Valor absoluto
    fn abs(&self, x: f32) -> f32;

    /// Logaritmo natural (contrato: `x > 0`)
    fn ln(&self, x: f32) -> f32;

    /// Amostra de média zero e variância unitária
    fn gaussian_noise(&self, rng: &mut dyn RngCore) -> f32;

    /// Nome da implementação
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

// =============================================================================
// Implementações Concretas
// =============================================================================

/// Precisão da biblioteca padrão
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactMath;

impl MathProvider for ExactMath {
    #[inline]
    fn sin(&self, theta: f32) -> f32 {
        theta.sin()
    }

    #[inline]
    fn cos(&self, theta: f32) -> f32 {
        theta.cos()
    }

    #[inline]
    fn atan2(&self, y: f32, x: f32) -> f32 {
        y.atan2(x)
    }

    #[inline]
    fn sqrt(&self, x: f32) -> f32 {
        x.sqrt()
    }

    #[inline]
    fn abs(&self, x: f32) -> f32 {
        x.abs()
    }

    #[inline]
    fn ln(&self, x: f32) -> f32 {
        x.ln()
    }

    fn gaussian_noise(&self, rng: &mut dyn RngCore) -> f32 {
        polar_normal(rng, f32::sqrt, f32::ln)
    }

    fn name(&self) -> &'static str {
        "ExactMath"
    }
}

/// Aproximações rápidas (séries, truque de bits, Newton)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApproximateMath;

impl MathProvider for ApproximateMath {
    #[inline]
    fn sin(&self, theta: f32) -> f32 {
        approximate_sin(theta)
    }

    #[inline]
    fn cos(&self, theta: f32) -> f32 {
        approximate_cos(theta)
    }

    #[inline]
    fn atan2(&self, y: f32, x: f32) -> f32 {
        approximate_atan2(y, x)
    }

    #[inline]
    fn sqrt(&self, x: f32) -> f32 {
        approximate_sqrt(x)
    }

    #[inline]
    fn abs(&self, x: f32) -> f32 {
        approximate_abs(x)
    }

    #[inline]
    fn ln(&self, x: f32) -> f32 {
        approximate_ln(x)
    }

    fn gaussian_noise(&self, rng: &mut dyn RngCore) -> f32 {
        approximate_normal(rng)
    }

    fn name(&self) -> &'static str {
        "ApproximateMath"
    }
}
