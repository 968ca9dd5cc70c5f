//! Seleção de precisão (exata vs aproximada)
//!
//! Um único interruptor escolhe a implementação de [`MathProvider`]:
//! a feature `approximate-math` define o padrão em build e a variável
//! `RIDGE_MATH_PRECISION` (ou `.env`) sobrescreve em runtime.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::provider::{ApproximateMath, ExactMath, MathProvider};

/// Variável de ambiente lida por [`MathPrecision::from_env`]
pub const PRECISION_ENV_VAR: &str = "RIDGE_MATH_PRECISION";

// Carrega .env uma única vez
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

static EXACT: Lazy<Arc<dyn MathProvider>> = Lazy::new(|| Arc::new(ExactMath));
static APPROXIMATE: Lazy<Arc<dyn MathProvider>> = Lazy::new(|| Arc::new(ApproximateMath));

/// Precisão das primitivas numéricas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathPrecision {
    /// Biblioteca padrão
    Exact,
    /// Aproximações rápidas
    Approximate,
}

impl MathPrecision {
    /// Provedor compartilhado para esta precisão
    pub fn provider(self) -> Arc<dyn MathProvider> {
        match self {
            MathPrecision::Exact => Arc::clone(&EXACT),
            MathPrecision::Approximate => Arc::clone(&APPROXIMATE),
        }
    }

    /// Lê a precisão de `RIDGE_MATH_PRECISION`
    ///
    /// Ausente → [`MathPrecision::default`]; valor inválido → erro.
    pub fn from_env() -> MathResult<Self> {
        let _ = &*DOTENV_INIT;
        Self::from_setting(env::var(PRECISION_ENV_VAR).ok().as_deref())
    }

    /// Interpreta um valor opcional de configuração
    pub fn from_setting(value: Option<&str>) -> MathResult<Self> {
        match value {
            Some(raw) if !raw.trim().is_empty() => raw.parse(),
            _ => Ok(Self::default()),
        }
    }

    /// Rótulo canônico
    pub fn as_str(self) -> &'static str {
        match self {
            MathPrecision::Exact => "exact",
            MathPrecision::Approximate => "approximate",
        }
    }
}

impl Default for MathPrecision {
    fn default() -> Self {
        if cfg!(feature = "approximate-math") {
            MathPrecision::Approximate
        } else {
            MathPrecision::Exact
        }
    }
}

impl FromStr for MathPrecision {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "std" => Ok(MathPrecision::Exact),
            "approximate" | "approx" | "fast" => Ok(MathPrecision::Approximate),
            other => Err(MathError::InvalidPrecision(other.to_string())),
        }
    }
}

impl fmt::Display for MathPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
