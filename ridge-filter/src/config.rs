//! Configuração da rede e dos modos
//!
//! Todas as constantes (identidade de fase, covariâncias, tamanho de
//! memória, setores de quadratura, número de modos) ficam fixas durante a
//! vida de uma rede. Os valores são validados uma vez, na construção.

use serde::{Deserialize, Serialize};

use ridge_math::MathPrecision;

use crate::defaults;
use crate::error::{FilterError, FilterResult};
use crate::types::{IDENTITY, Matrix2, PhaseSource, Vector2, asymmetry, determinant, scaled_identity};

// ═══════════════════════════════════════════════════════════════════════════════
// MODO
// ═══════════════════════════════════════════════════════════════════════════════

/// Configuração de um modo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Frequência própria ou índice harmônico
    pub phase_source: PhaseSource,
    /// Amortecimento da atualização de coeficientes (1.0 = Kalman puro)
    pub learning_rate: f32,
    /// Coeficientes iniciais (cosseno, seno)
    pub coefficients: Vector2,
    /// Covariância inicial do erro P
    pub error_covariance: Matrix2,
    /// Ruído de processo Q, somado a P a cada prior
    pub signal_noise_covariance: Matrix2,
    /// Ruído de observação R
    pub observation_noise_covariance: f32,
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self {
            phase_source: PhaseSource::default(),
            learning_rate: 1.0,
            coefficients: [0.0, 0.0],
            error_covariance: IDENTITY,
            signal_noise_covariance: scaled_identity(defaults::SIGNAL_NOISE),
            observation_noise_covariance: defaults::OBSERVATION_NOISE,
        }
    }
}

impl ModeConfig {
    /// Modo com frequência própria
    pub fn resonant(frequency: f32) -> Self {
        Self {
            phase_source: PhaseSource::Resonant { frequency },
            ..Self::default()
        }
    }

    /// Modo harmônico da fase fundamental
    pub fn harmonic(mode_number: u32) -> Self {
        Self {
            phase_source: PhaseSource::Harmonic { mode_number },
            ..Self::default()
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_coefficients(mut self, coefficients: Vector2) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_error_covariance(mut self, error_covariance: Matrix2) -> Self {
        self.error_covariance = error_covariance;
        self
    }

    pub fn with_signal_noise(mut self, signal_noise_covariance: Matrix2) -> Self {
        self.signal_noise_covariance = signal_noise_covariance;
        self
    }

    pub fn with_observation_noise(mut self, observation_noise_covariance: f32) -> Self {
        self.observation_noise_covariance = observation_noise_covariance;
        self
    }

    /// Valida a configuração do modo
    pub fn validate(&self) -> FilterResult<()> {
        match self.phase_source {
            PhaseSource::Resonant { frequency } => {
                if !frequency.is_finite() || frequency < 0.0 {
                    return Err(FilterError::InvalidFrequency(frequency));
                }
            }
            PhaseSource::Harmonic { mode_number } => {
                if mode_number == 0 {
                    return Err(FilterError::InvalidModeNumber(mode_number));
                }
            }
        }

        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(FilterError::InvalidLearningRate(self.learning_rate));
        }

        if !self.coefficients.iter().all(|c| c.is_finite()) {
            return Err(FilterError::InvalidConfig(format!(
                "Coefficients must be finite, got {:?}",
                self.coefficients
            )));
        }

        validate_covariance("error_covariance", &self.error_covariance)?;
        validate_covariance("signal_noise_covariance", &self.signal_noise_covariance)?;

        let r = self.observation_noise_covariance;
        if !r.is_finite() || r < 0.0 {
            return Err(FilterError::InvalidCovariance(format!(
                "observation_noise_covariance must be finite and >= 0, got {r}"
            )));
        }

        Ok(())
    }
}

/// Matriz de covariância: finita, simétrica e semidefinida positiva
fn validate_covariance(name: &str, m: &Matrix2) -> FilterResult<()> {
    if !m.iter().flatten().all(|v| v.is_finite()) {
        return Err(FilterError::InvalidCovariance(format!("{name} must be finite")));
    }

    if asymmetry(m) > defaults::SYMMETRY_TOLERANCE {
        return Err(FilterError::InvalidCovariance(format!(
            "{name} must be symmetric, got {m:?}"
        )));
    }

    if m[0][0] < 0.0 || m[1][1] < 0.0 || determinant(m) < -defaults::SYMMETRY_TOLERANCE {
        return Err(FilterError::InvalidCovariance(format!(
            "{name} must be positive semi-definite, got {m:?}"
        )));
    }

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONVERGÊNCIA
// ═══════════════════════════════════════════════════════════════════════════════

/// Parâmetros do detector de convergência/quadratura
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvergenceConfig {
    /// Setores de fase por volta (também o atraso da autocorrelação)
    pub quadrature_states: usize,
    /// Voltas completas guardadas na memória
    pub convergence_periods: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            quadrature_states: defaults::QUADRATURE_STATES,
            convergence_periods: defaults::CONVERGENCE_PERIODS,
        }
    }
}

impl ConvergenceConfig {
    /// Tamanho da memória de predições
    pub fn memory_len(&self) -> usize {
        self.quadrature_states.saturating_mul(self.convergence_periods)
    }

    pub fn validate(&self) -> FilterResult<()> {
        if self.quadrature_states == 0 {
            return Err(FilterError::InvalidQuadratureStates(self.quadrature_states));
        }
        // Com um único período o atraso dá a volta em zero e a razão vale 1
        if self.convergence_periods < 2 {
            return Err(FilterError::InvalidConvergencePeriods(self.convergence_periods));
        }
        match self.quadrature_states.checked_mul(self.convergence_periods) {
            Some(len) if len <= defaults::MAX_MEMORY_LEN => Ok(()),
            _ => Err(FilterError::InvalidConfig(format!(
                "Prediction memory of {} x {} slots exceeds {}",
                self.quadrature_states,
                self.convergence_periods,
                defaults::MAX_MEMORY_LEN
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// REDE
// ═══════════════════════════════════════════════════════════════════════════════

/// Configuração completa de uma rede
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub modes: Vec<ModeConfig>,
    pub convergence: ConvergenceConfig,
    pub precision: MathPrecision,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::harmonic(defaults::MODE_COUNT)
    }
}

impl NetworkConfig {
    /// Harmônicos 1..=mode_count da fase fundamental
    pub fn harmonic(mode_count: usize) -> Self {
        Self {
            modes: (1..=mode_count as u32).map(ModeConfig::harmonic).collect(),
            convergence: ConvergenceConfig::default(),
            precision: MathPrecision::default(),
        }
    }

    /// Um modo por frequência própria
    pub fn resonant(frequencies: &[f32]) -> Self {
        Self {
            modes: frequencies.iter().copied().map(ModeConfig::resonant).collect(),
            convergence: ConvergenceConfig::default(),
            precision: MathPrecision::default(),
        }
    }

    /// Rede a partir de modos já configurados
    pub fn from_modes(modes: Vec<ModeConfig>) -> Self {
        Self {
            modes,
            convergence: ConvergenceConfig::default(),
            precision: MathPrecision::default(),
        }
    }

    pub fn with_precision(mut self, precision: MathPrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Precisão lida de `RIDGE_MATH_PRECISION` (ou `.env`)
    pub fn with_env_precision(mut self) -> FilterResult<Self> {
        self.precision = MathPrecision::from_env()?;
        Ok(self)
    }

    pub fn with_convergence(mut self, convergence: ConvergenceConfig) -> Self {
        self.convergence = convergence;
        self
    }

    /// Aplica a mesma transformação a todos os modos
    pub fn map_modes(mut self, f: impl Fn(ModeConfig) -> ModeConfig) -> Self {
        self.modes = self.modes.into_iter().map(f).collect();
        self
    }

    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    pub fn validate(&self) -> FilterResult<()> {
        if self.modes.is_empty() {
            return Err(FilterError::EmptyNetwork);
        }
        self.convergence.validate()?;
        for mode in &self.modes {
            mode.validate()?;
        }
        Ok(())
    }

    /// Lê configuração em JSON (campos ausentes assumem o padrão)
    pub fn from_json(json: &str) -> FilterResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> FilterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NetworkConfig::default();
        assert_eq!(config.mode_count(), 6);
        assert_eq!(config.convergence.memory_len(), 36);
        assert!(config.validate().is_ok());
        assert_eq!(
            config.modes[5].phase_source,
            PhaseSource::Harmonic { mode_number: 6 }
        );
    }

    #[test]
    fn test_empty_network_rejected() {
        let config = NetworkConfig::from_modes(Vec::new());
        assert_eq!(config.validate(), Err(FilterError::EmptyNetwork));
    }

    #[test]
    fn test_invalid_mode_values() {
        assert!(matches!(
            ModeConfig::resonant(-1.0).validate(),
            Err(FilterError::InvalidFrequency(_))
        ));
        assert!(matches!(
            ModeConfig::resonant(f32::NAN).validate(),
            Err(FilterError::InvalidFrequency(_))
        ));
        assert_eq!(
            ModeConfig::harmonic(0).validate(),
            Err(FilterError::InvalidModeNumber(0))
        );
        assert!(matches!(
            ModeConfig::harmonic(1).with_learning_rate(0.0).validate(),
            Err(FilterError::InvalidLearningRate(_))
        ));
        assert!(matches!(
            ModeConfig::harmonic(1).with_observation_noise(-0.5).validate(),
            Err(FilterError::InvalidCovariance(_))
        ));
    }

    #[test]
    fn test_invalid_covariances() {
        let asymmetric = [[1.0, 0.5], [0.0, 1.0]];
        assert!(ModeConfig::harmonic(1).with_error_covariance(asymmetric).validate().is_err());

        let negative = [[-1.0, 0.0], [0.0, 1.0]];
        assert!(ModeConfig::harmonic(1).with_signal_noise(negative).validate().is_err());

        let indefinite = [[1.0, 2.0], [2.0, 1.0]];
        assert!(ModeConfig::harmonic(1).with_error_covariance(indefinite).validate().is_err());
    }

    #[test]
    fn test_invalid_convergence() {
        let zero_sectors = ConvergenceConfig { quadrature_states: 0, convergence_periods: 3 };
        assert!(zero_sectors.validate().is_err());

        let single_period = ConvergenceConfig { quadrature_states: 12, convergence_periods: 1 };
        assert_eq!(
            single_period.validate(),
            Err(FilterError::InvalidConvergencePeriods(1))
        );
    }

    #[test]
    fn test_oversized_memory_rejected() {
        let overflowing = ConvergenceConfig {
            quadrature_states: usize::MAX / 2,
            convergence_periods: 3,
        };
        assert!(matches!(overflowing.validate(), Err(FilterError::InvalidConfig(_))));
        assert_eq!(overflowing.memory_len(), usize::MAX);

        let huge = ConvergenceConfig {
            quadrature_states: 1_000_000_000_000,
            convergence_periods: 2,
        };
        assert!(matches!(huge.validate(), Err(FilterError::InvalidConfig(_))));

        let at_cap = ConvergenceConfig {
            quadrature_states: defaults::MAX_MEMORY_LEN / 4,
            convergence_periods: 4,
        };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn test_json_oversized_memory_is_an_error() {
        let json = format!(
            r#"{{ "convergence": {{ "quadrature_states": {}, "convergence_periods": 3 }} }}"#,
            usize::MAX / 2
        );
        assert!(matches!(
            NetworkConfig::from_json(&json),
            Err(FilterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_json_partial_config_uses_defaults() {
        let json = r#"{
            "modes": [
                { "phase_source": { "kind": "resonant", "frequency": 150.0 } },
                { "phase_source": { "kind": "resonant", "frequency": 300.0 }, "learning_rate": 0.5 }
            ],
            "precision": "approximate"
        }"#;

        let config = NetworkConfig::from_json(json).unwrap();
        assert_eq!(config.mode_count(), 2);
        assert_eq!(config.precision, MathPrecision::Approximate);
        assert_eq!(config.modes[0].learning_rate, 1.0);
        assert_eq!(config.modes[1].learning_rate, 0.5);
        assert_eq!(config.convergence, ConvergenceConfig::default());
    }

    #[test]
    fn test_json_invalid_config_rejected() {
        let json = r#"{ "modes": [ { "phase_source": { "kind": "harmonic", "mode_number": 0 } } ] }"#;
        assert_eq!(
            NetworkConfig::from_json(json),
            Err(FilterError::InvalidModeNumber(0))
        );
        assert!(matches!(
            NetworkConfig::from_json("{ not json"),
            Err(FilterError::Serialization(_))
        ));
    }

    #[test]
    fn test_env_precision_matches_math_layer() {
        let result = NetworkConfig::default().with_env_precision();
        match MathPrecision::from_env() {
            Ok(precision) => assert_eq!(result.unwrap().precision, precision),
            Err(e) => assert_eq!(result, Err(FilterError::Math(e))),
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let config = NetworkConfig::resonant(&[100.0, 200.0])
            .map_modes(|m| m.with_coefficients([0.5, -0.5]));
        let json = config.to_json().unwrap();
        assert_eq!(NetworkConfig::from_json(&json).unwrap(), config);
    }
}
