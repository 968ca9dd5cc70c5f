//! # Rede de filtros de Kalman
//!
//! Coleção de tamanho fixo de [`ModeFilter`]s que compartilham um único
//! canal de observação. A predição da rede é a soma das predições dos modos
//! e o mesmo erro escalar é distribuído a todos na correção.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ridge_math::MathProvider;

use crate::config::NetworkConfig;
use crate::error::FilterResult;
use crate::mode::ModeFilter;
use crate::types::PhaseSource;

/// Rede de modos
///
/// Construída uma vez com todas as constantes; nunca é redimensionada.
/// Cada par `prior_update` → `posterior_update` processa uma amostra.
#[derive(Debug, Clone)]
pub struct KalmanFilterNetwork {
    modes: Box<[ModeFilter]>,
    prediction: f32,
    error: f32,
    math: Arc<dyn MathProvider>,
}

impl KalmanFilterNetwork {
    /// Cria rede com o provedor numérico de `config.precision`
    pub fn new(config: &NetworkConfig) -> FilterResult<Self> {
        Self::with_provider(config, config.precision.provider())
    }

    /// Cria rede com um provedor numérico injetado
    pub fn with_provider(
        config: &NetworkConfig,
        math: Arc<dyn MathProvider>,
    ) -> FilterResult<Self> {
        config.validate()?;

        let modes = config
            .modes
            .iter()
            .map(|mode| ModeFilter::new(mode, &config.convergence, Arc::clone(&math)))
            .collect::<FilterResult<Vec<_>>>()?
            .into_boxed_slice();

        tracing::debug!(
            modes = modes.len(),
            quadrature_states = config.convergence.quadrature_states,
            memory_len = config.convergence.memory_len(),
            math = math.name(),
            "KalmanFilterNetwork created"
        );

        Ok(Self {
            modes,
            prediction: 0.0,
            error: 0.0,
            math,
        })
    }

    /// Atualização a priori de todos os modos
    ///
    /// A mesma entrada vai para todos os modos; cada um deriva a própria fase.
    /// Retorna a predição da rede (soma das predições dos modos).
    pub fn prior_update(&mut self, input: f32) -> f32 {
        let mut network_prediction = 0.0;

        for mode in self.modes.iter_mut() {
            mode.prior_update(input);
            network_prediction += mode.prediction();
        }

        self.prediction = network_prediction;
        tracing::trace!(prediction = self.prediction, "network prior update");
        self.prediction
    }

    /// Atualização a posteriori de todos os modos
    ///
    /// Calcula `erro = observação − predição` com a predição do último
    /// `prior_update` e distribui o mesmo erro a todos os modos.
    pub fn posterior_update(&mut self, observation: f32) -> f32 {
        let error = observation - self.prediction;

        for mode in self.modes.iter_mut() {
            mode.posterior_update(error);
        }

        self.error = error;
        tracing::trace!(error = self.error, "network posterior update");
        self.error
    }

    /// Um ciclo completo para uma amostra; retorna o erro
    pub fn step(&mut self, input: f32, observation: f32) -> f32 {
        self.prior_update(input);
        self.posterior_update(observation)
    }

    /// Volta todos os modos ao estado inicial
    pub fn reset(&mut self) {
        for mode in self.modes.iter_mut() {
            mode.reset();
        }
        self.prediction = 0.0;
        self.error = 0.0;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LEITURA
    // ═══════════════════════════════════════════════════════════════════════════

    /// Predição da rede no último prior
    pub fn prediction(&self) -> f32 {
        self.prediction
    }

    /// Erro da última correção
    pub fn error(&self) -> f32 {
        self.error
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn modes(&self) -> &[ModeFilter] {
        &self.modes
    }

    pub fn mode(&self, index: usize) -> Option<&ModeFilter> {
        self.modes.get(index)
    }

    pub fn provider_name(&self) -> &'static str {
        self.math.name()
    }

    pub fn cos_coefficients(&self) -> impl Iterator<Item = f32> + '_ {
        self.modes.iter().map(ModeFilter::cos_coefficient)
    }

    pub fn sin_coefficients(&self) -> impl Iterator<Item = f32> + '_ {
        self.modes.iter().map(ModeFilter::sin_coefficient)
    }

    pub fn magnitudes(&self) -> impl Iterator<Item = f32> + '_ {
        self.modes.iter().map(ModeFilter::magnitude)
    }

    /// Convergência de cada modo, para lógica externa de travamento
    pub fn convergences(&self) -> impl Iterator<Item = f32> + '_ {
        self.modes.iter().map(ModeFilter::convergence)
    }

    /// Índices dos modos com `|1 − convergence| <= tolerance`
    pub fn converged_modes(&self, tolerance: f32) -> impl Iterator<Item = usize> + '_ {
        self.modes
            .iter()
            .enumerate()
            .filter(move |(_, mode)| mode.has_converged(tolerance))
            .map(|(index, _)| index)
    }

    /// Fotografia dos parâmetros atuais para monitoramento
    pub fn current_parameters(&self) -> NetworkSnapshot {
        NetworkSnapshot {
            prediction: self.prediction,
            error: self.error,
            modes: self.modes.iter().map(ModeSnapshot::from).collect(),
        }
    }
}

/// Parâmetros de um modo num instante
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSnapshot {
    pub phase_source: PhaseSource,
    /// Frequência própria ou índice harmônico
    pub frequency_or_mode_index: f32,
    pub cos_coefficient: f32,
    pub sin_coefficient: f32,
    pub magnitude: f32,
    pub convergence: f32,
}

impl From<&ModeFilter> for ModeSnapshot {
    fn from(mode: &ModeFilter) -> Self {
        Self {
            phase_source: mode.phase_source(),
            frequency_or_mode_index: mode.phase_source().identity_value(),
            cos_coefficient: mode.cos_coefficient(),
            sin_coefficient: mode.sin_coefficient(),
            magnitude: mode.magnitude(),
            convergence: mode.convergence(),
        }
    }
}

/// Parâmetros da rede num instante
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    pub prediction: f32,
    pub error: f32,
    pub modes: Vec<ModeSnapshot>,
}

impl NetworkSnapshot {
    pub fn to_json(&self) -> FilterResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
