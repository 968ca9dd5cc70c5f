//! Tipos básicos: vetores/matrizes 2×2 e a identidade de fase do modo

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vetor de estado (cosseno, seno)
pub type Vector2 = [f32; 2];

/// Matriz 2×2 em ordem de linhas
pub type Matrix2 = [[f32; 2]; 2];

/// Identidade 2×2
pub const IDENTITY: Matrix2 = [[1.0, 0.0], [0.0, 1.0]];

/// `s · I`
pub fn scaled_identity(scale: f32) -> Matrix2 {
    [[scale, 0.0], [0.0, scale]]
}

/// Soma do traço
pub fn trace(m: &Matrix2) -> f32 {
    m[0][0] + m[1][1]
}

/// Determinante
pub fn determinant(m: &Matrix2) -> f32 {
    m[0][0] * m[1][1] - m[0][1] * m[1][0]
}

/// |m₀₁ - m₁₀|
pub fn asymmetry(m: &Matrix2) -> f32 {
    (m[0][1] - m[1][0]).abs()
}

/// Como o modo deriva sua fase instantânea a partir da entrada
///
/// As duas formas são parametrizações equivalentes de "qual é a fase
/// deste modo agora".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseSource {
    /// Frequência própria (mesma unidade da entrada); a entrada é a taxa de
    /// amostragem e a fase avança `2π · frequency / input` por amostra
    Resonant { frequency: f32 },
    /// Harmônico de uma fase fundamental externa; a entrada é a fase da
    /// rede e a fase do modo é `mode_number · input`
    Harmonic { mode_number: u32 },
}

impl PhaseSource {
    /// Frequência (resonant) ou índice harmônico, como `f32`
    pub fn identity_value(&self) -> f32 {
        match *self {
            PhaseSource::Resonant { frequency } => frequency,
            PhaseSource::Harmonic { mode_number } => mode_number as f32,
        }
    }
}

impl Default for PhaseSource {
    fn default() -> Self {
        PhaseSource::Harmonic { mode_number: 1 }
    }
}

impl fmt::Display for PhaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseSource::Resonant { frequency } => write!(f, "resonant({frequency})"),
            PhaseSource::Harmonic { mode_number } => write!(f, "harmonic({mode_number})"),
        }
    }
}
