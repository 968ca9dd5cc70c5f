//! # 🎯 ridge-filter — Rede de Filtros de Kalman por Modo
//!
//! Banco de estimadores bayesianos recursivos que acompanham, em conjunto,
//! amplitude e fase de um pequeno conjunto de componentes senoidais
//! ("modos") imersos num fluxo escalar ruidoso.
//!
//! Cada modo tem estado de dimensão 2 (coeficientes de cosseno e seno),
//! covariância 2×2 e um detector de convergência por autocorrelação da
//! própria predição. Frequência/fase vêm de fora: isto não é um estimador
//! de frequência.
//!
//! ## Arquitetura
//!
//! ```text
//!        input (fs ou fase fundamental)            observation
//!                    │                                  │
//!                    ▼                                  ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      KalmanFilterNetwork                         │
//! │   prior_update(input) → Σ predições     posterior_update(y) → e  │
//! │  ┌────────────┐  ┌────────────┐            ┌────────────┐        │
//! │  │ ModeFilter │  │ ModeFilter │    ...     │ ModeFilter │        │
//! │  │ x, P, Q, R │  │ x, P, Q, R │            │ x, P, Q, R │        │
//! │  │ memória    │  │ memória    │            │ memória    │        │
//! │  └────────────┘  └────────────┘            └────────────┘        │
//! │                 Arc<dyn MathProvider> (exato | aproximado)       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contrato de uso
//!
//! Exatamente um `prior_update` antes de cada `posterior_update`, usando o
//! erro calculado a partir daquela mesma predição. Chamadas fora de ordem não
//! quebram nada em memória, mas deixam a covariância estatisticamente
//! inconsistente. A ordem não é verificada em runtime.
//!
//! ## Exemplo
//!
//! ```
//! use ridge_filter::{KalmanFilterNetwork, NetworkConfig};
//!
//! let config = NetworkConfig::resonant(&[150.0]);
//! let mut network = KalmanFilterNetwork::new(&config)?;
//!
//! let fs = 16_000.0;
//! for k in 1..=2000 {
//!     let theta = std::f32::consts::TAU * 150.0 * k as f32 / fs;
//!     network.prior_update(fs);
//!     network.posterior_update(theta.cos() + 0.5 * theta.sin());
//! }
//!
//! let mode = network.mode(0).unwrap();
//! assert!((mode.cos_coefficient() - 1.0).abs() < 0.01);
//! # Ok::<(), ridge_filter::FilterError>(())
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod mode;
pub mod network;
pub mod types;

pub use config::{ConvergenceConfig, ModeConfig, NetworkConfig};
pub use error::{FilterError, FilterResult};
pub use memory::PredictionMemory;
pub use mode::ModeFilter;
pub use network::{KalmanFilterNetwork, ModeSnapshot, NetworkSnapshot};
pub use types::{Matrix2, PhaseSource, Vector2};

// Re-export da camada numérica
pub use ridge_math::{MathPrecision, MathProvider};

/// Valores padrão da rede
pub mod defaults {
    /// Número de modos da base
    pub const MODE_COUNT: usize = 6;

    /// Setores de fase usados para detectar voltas
    pub const QUADRATURE_STATES: usize = 12;

    /// Períodos guardados na memória de predições
    pub const CONVERGENCE_PERIODS: usize = 3;

    /// Ruído de processo (diagonal de Q)
    pub const SIGNAL_NOISE: f32 = 1e-5;

    /// Ruído de observação (R)
    pub const OBSERVATION_NOISE: f32 = 1.0;

    /// Maior memória de predições aceita por modo
    pub const MAX_MEMORY_LEN: usize = 1 << 16;

    /// Tolerância de simetria aceita nas matrizes de configuração
    pub const SYMMETRY_TOLERANCE: f32 = 1e-6;
}
