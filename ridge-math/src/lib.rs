//! # 📐 ridge-math — Primitivas Numéricas com Precisão Plugável
//!
//! Seno, cosseno, arco-tangente, raiz quadrada, logaritmo e ruído gaussiano
//! em duas implementações intercambiáveis:
//!
//! - **Exata**: delega para a biblioteca padrão (`f32::sin`, `f32::sqrt`, ...)
//! - **Aproximada**: séries de potência, truque de bits IEEE-754 e Newton
//!
//! A escolha é feita uma única vez, na construção do consumidor, através de
//! [`MathPrecision`] (build: feature `approximate-math`; runtime: variável
//! `RIDGE_MATH_PRECISION`). Os filtros nunca escolhem a implementação.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    MathPrecision                         │
//! │        Exact | Approximate   (feature / .env / FromStr)  │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │ provider()
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │              Arc<dyn MathProvider>                       │
//! │   sin | cos | atan2 | sqrt | abs | ln | gaussian_noise   │
//! │  ┌──────────────┐            ┌────────────────────────┐  │
//! │  │  ExactMath   │            │    ApproximateMath     │  │
//! │  │  (std f32)   │            │  (approximations.rs)   │  │
//! │  └──────────────┘            └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use ridge_math::{MathPrecision, MathProvider};
//!
//! let math = MathPrecision::Approximate.provider();
//! let s = math.sin(0.5);
//! assert!((s - 0.5f32.sin()).abs() < 1e-3);
//! ```

pub mod approximations;
pub mod error;
pub mod precision;
pub mod provider;

pub use approximations::{
    approximate_abs, approximate_atan2, approximate_cos, approximate_ln, approximate_log2,
    approximate_normal, approximate_sin, approximate_sqrt,
};
pub use error::{MathError, MathResult};
pub use precision::{MathPrecision, PRECISION_ENV_VAR};
pub use provider::{ApproximateMath, ExactMath, MathProvider};

/// Constantes numéricas em precisão simples
pub mod constants {
    /// π em `f32`
    pub const PI: f32 = std::f32::consts::PI;

    /// 2π em `f32`
    pub const TWO_PI: f32 = std::f32::consts::TAU;

    /// π/2 em `f32`
    pub const HALF_PI: f32 = std::f32::consts::FRAC_PI_2;

    /// Erro relativo aceito pela raiz quadrada de Newton
    pub const SQRT_THRESHOLD: f32 = 1e-4;

    /// Limite de iterações de Newton (cobre toda a faixa de `f32`)
    pub const SQRT_MAX_ITERATIONS: u32 = 128;

    /// Limite de rejeições do amostrador gaussiano polar
    pub const GAUSSIAN_MAX_ATTEMPTS: u32 = 64;
}

#[cfg(test)]
mod tests;
