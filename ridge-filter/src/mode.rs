//! # Filtro de Kalman de um modo
//!
//! Estado de dimensão 2: coeficientes (cosseno, seno) de uma componente
//! senoidal. O modelo de estado é um passeio aleatório (transição = I), e a
//! matriz de observação é `H = [cos(fase), sin(fase)]`.
//!
//! ```text
//! prior:      P ← P + Q
//!             fase → (cos, sin) → predição = x₀·cos + x₁·sin
//!             detector de quadratura/convergência
//!
//! posterior:  S = R + H·P·Hᵀ
//!             K = P·Hᵀ / S
//!             x ← x + η·K·e
//!             A = I − K·H
//!             P ← A·P·Aᵀ + R·K·Kᵀ
//! ```

use std::sync::Arc;

use ridge_math::MathProvider;
use ridge_math::constants::{PI, TWO_PI};

use crate::config::{ConvergenceConfig, ModeConfig};
use crate::error::FilterResult;
use crate::memory::PredictionMemory;
use crate::types::{Matrix2, PhaseSource, Vector2};

/// Filtro de Kalman de um único modo
///
/// Todo o estado é de tamanho fixo e alocado na construção; `prior_update`
/// e `posterior_update` não alocam.
#[derive(Debug, Clone)]
pub struct ModeFilter {
    phase_source: PhaseSource,
    learning_rate: f32,
    coefficients: Vector2,
    error_covariance: Matrix2,
    signal_noise_covariance: Matrix2,
    observation_noise_covariance: f32,
    phase: f32,
    cos_phase: f32,
    sin_phase: f32,
    gain: Vector2,
    prediction: f32,
    quadrature_states: usize,
    quadrature: usize,
    memory: PredictionMemory,
    convergence: f32,
    initial_coefficients: Vector2,
    initial_error_covariance: Matrix2,
    math: Arc<dyn MathProvider>,
}

impl ModeFilter {
    /// Cria modo validando a configuração
    pub fn new(
        config: &ModeConfig,
        convergence: &ConvergenceConfig,
        math: Arc<dyn MathProvider>,
    ) -> FilterResult<Self> {
        config.validate()?;
        convergence.validate()?;

        Ok(Self {
            phase_source: config.phase_source,
            learning_rate: config.learning_rate,
            coefficients: config.coefficients,
            error_covariance: config.error_covariance,
            signal_noise_covariance: config.signal_noise_covariance,
            observation_noise_covariance: config.observation_noise_covariance,
            phase: 0.0,
            cos_phase: 0.0,
            sin_phase: 0.0,
            gain: [0.0, 0.0],
            prediction: 0.0,
            quadrature_states: convergence.quadrature_states,
            quadrature: 0,
            memory: PredictionMemory::new(convergence.memory_len())?,
            convergence: 0.0,
            initial_coefficients: config.coefficients,
            initial_error_covariance: config.error_covariance,
            math,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // RECURSÃO
    // ═══════════════════════════════════════════════════════════════════════════

    /// Atualização a priori (predição)
    ///
    /// `input` é a taxa de amostragem para [`PhaseSource::Resonant`] ou a fase
    /// fundamental da rede para [`PhaseSource::Harmonic`]. Contrato: finito, e
    /// positivo no caso resonant.
    pub fn prior_update(&mut self, input: f32) {
        // Injeção de ruído de processo
        for i in 0..2 {
            for j in 0..2 {
                self.error_covariance[i][j] += self.signal_noise_covariance[i][j];
            }
        }

        self.phase = match self.phase_source {
            PhaseSource::Resonant { frequency } => {
                (self.phase + TWO_PI * frequency / input).rem_euclid(TWO_PI)
            }
            PhaseSource::Harmonic { mode_number } => {
                (mode_number as f32 * input).rem_euclid(TWO_PI)
            }
        };
        self.cos_phase = self.math.cos(self.phase);
        self.sin_phase = self.math.sin(self.phase);

        self.prediction =
            self.coefficients[0] * self.cos_phase + self.coefficients[1] * self.sin_phase;

        self.update_convergence();
    }

    /// Atualização a posteriori (correção)
    ///
    /// `error` é `observação − predição da rede`. Se `R = 0` e `H·P·Hᵀ = 0`
    /// o ganho resultante é ±∞/NaN: configuração degenerada, não corrigida
    /// silenciosamente.
    pub fn posterior_update(&mut self, error: f32) {
        let h = [self.cos_phase, self.sin_phase];
        let p = self.error_covariance;
        let r = self.observation_noise_covariance;

        // S = R + H·P·Hᵀ
        let mut innovation = r;
        innovation += h[0] * (h[0] * p[0][0] + h[1] * p[1][0]);
        innovation += h[1] * (h[0] * p[0][1] + h[1] * p[1][1]);

        // K = P·Hᵀ / S
        self.gain = [
            (p[0][0] * h[0] + p[0][1] * h[1]) / innovation,
            (p[1][0] * h[0] + p[1][1] * h[1]) / innovation,
        ];
        let k = self.gain;

        self.coefficients[0] += self.learning_rate * k[0] * error;
        self.coefficients[1] += self.learning_rate * k[1] * error;

        // A = I − K·H
        let a = [
            [1.0 - k[0] * h[0], -k[0] * h[1]],
            [-k[1] * h[0], 1.0 - k[1] * h[1]],
        ];

        // B = A·P
        let b = [
            [
                a[0][0] * p[0][0] + a[0][1] * p[1][0],
                a[0][0] * p[0][1] + a[0][1] * p[1][1],
            ],
            [
                a[1][0] * p[0][0] + a[1][1] * p[1][0],
                a[1][0] * p[0][1] + a[1][1] * p[1][1],
            ],
        ];

        // P = B·Aᵀ + R·K·Kᵀ
        for i in 0..2 {
            for j in 0..2 {
                self.error_covariance[i][j] =
                    b[i][0] * a[j][0] + b[i][1] * a[j][1] + r * k[i] * k[j];
            }
        }
    }

    /// Detector de quadratura e convergência
    ///
    /// Só age quando o setor de fase muda: guarda a predição na memória e
    /// recalcula a convergência como autocorrelação com atraso de uma volta
    /// (`quadrature_states` setores) normalizada pela de atraso zero.
    fn update_convergence(&mut self) {
        let angle = (self.math.atan2(self.cos_phase, self.sin_phase) + PI).rem_euclid(TWO_PI);
        let sector_width = TWO_PI / self.quadrature_states as f32;
        let quadrature = ((angle / sector_width) as usize).min(self.quadrature_states - 1);

        if quadrature != self.quadrature {
            self.memory.push(self.prediction);

            if let Some(convergence) = self.memory.lag_autocorrelation(self.quadrature_states) {
                self.convergence = convergence;
            }

            tracing::trace!(
                from = self.quadrature,
                to = quadrature,
                convergence = self.convergence,
                "quadrature sector change"
            );
        }

        self.quadrature = quadrature;
    }

    /// Volta ao estado inicial configurado
    pub fn reset(&mut self) {
        self.coefficients = self.initial_coefficients;
        self.error_covariance = self.initial_error_covariance;
        self.phase = 0.0;
        self.cos_phase = 0.0;
        self.sin_phase = 0.0;
        self.gain = [0.0, 0.0];
        self.prediction = 0.0;
        self.quadrature = 0;
        self.memory.clear();
        self.convergence = 0.0;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LEITURA
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn phase_source(&self) -> PhaseSource {
        self.phase_source
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Estado x = (cosseno, seno)
    pub fn coefficients(&self) -> Vector2 {
        self.coefficients
    }

    pub fn cos_coefficient(&self) -> f32 {
        self.coefficients[0]
    }

    pub fn sin_coefficient(&self) -> f32 {
        self.coefficients[1]
    }

    /// Amplitude √(a² + b²)
    pub fn magnitude(&self) -> f32 {
        let [a, b] = self.coefficients;
        self.math.sqrt(a * a + b * b)
    }

    /// Fase instantânea em [0, 2π)
    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn cos_phase(&self) -> f32 {
        self.cos_phase
    }

    pub fn sin_phase(&self) -> f32 {
        self.sin_phase
    }

    /// Ganho K da última correção
    pub fn gain(&self) -> Vector2 {
        self.gain
    }

    /// Contribuição deste modo para a predição da rede
    pub fn prediction(&self) -> f32 {
        self.prediction
    }

    pub fn error_covariance(&self) -> &Matrix2 {
        &self.error_covariance
    }

    pub fn signal_noise_covariance(&self) -> &Matrix2 {
        &self.signal_noise_covariance
    }

    pub fn observation_noise_covariance(&self) -> f32 {
        self.observation_noise_covariance
    }

    /// Setor de fase atual, em `0..quadrature_states`
    pub fn quadrature(&self) -> usize {
        self.quadrature
    }

    pub fn quadrature_states(&self) -> usize {
        self.quadrature_states
    }

    pub fn next_memory_index(&self) -> usize {
        self.memory.next_index()
    }

    pub fn prediction_memory(&self) -> &PredictionMemory {
        &self.memory
    }

    /// Autocorrelação normalizada da memória de predições (→ 1 quando travado)
    pub fn convergence(&self) -> f32 {
        self.convergence
    }

    /// `|1 − convergence| <= tolerance`
    pub fn has_converged(&self, tolerance: f32) -> bool {
        (1.0 - self.convergence).abs() <= tolerance
    }
}
