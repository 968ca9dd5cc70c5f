//! Erros de configuração da rede de filtros
//!
//! A recursão numérica em si nunca falha: estes erros só aparecem na
//! construção e na (de)serialização.

use ridge_math::MathError;
use thiserror::Error;

pub type FilterResult<T> = Result<T, FilterError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("Network must contain at least one mode")]
    EmptyNetwork,

    #[error("Invalid quadrature states: {0} (must be > 0)")]
    InvalidQuadratureStates(usize),

    #[error("Invalid convergence periods: {0} (must be >= 2)")]
    InvalidConvergencePeriods(usize),

    #[error("Invalid resonant frequency: {0} (must be finite and >= 0)")]
    InvalidFrequency(f32),

    #[error("Invalid mode number: {0} (must be >= 1)")]
    InvalidModeNumber(u32),

    #[error("Invalid learning rate: {0} (must be finite and > 0)")]
    InvalidLearningRate(f32),

    #[error("Invalid covariance: {0}")]
    InvalidCovariance(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self {
        FilterError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert!(FilterError::InvalidFrequency(-1.0).to_string().contains("-1"));
        assert!(FilterError::EmptyNetwork.to_string().contains("at least one mode"));
    }

    #[test]
    fn test_from_math_error() {
        let err: FilterError = MathError::InvalidPrecision("x".into()).into();
        assert!(matches!(err, FilterError::Math(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: FilterError = json_err.into();
        assert!(matches!(err, FilterError::Serialization(_)));
    }
}
