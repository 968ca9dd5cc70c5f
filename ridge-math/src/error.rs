//! Erros do módulo de matemática

use thiserror::Error;

/// Resultado de operações de configuração numérica
pub type MathResult<T> = Result<T, MathError>;

/// Erros de seleção de precisão
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Valor de precisão desconhecido
    #[error("Invalid math precision: {0} (expected \"exact\" or \"approximate\")")]
    InvalidPrecision(String),
}
