//! Memória circular de predições
//!
//! Buffer de capacidade fixa, alocado uma vez na construção, com escrita
//! que dá a volta (wrap-on-write). Nunca cresce.

use crate::error::{FilterError, FilterResult};

/// Buffer circular de predições de um modo
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionMemory {
    slots: Box<[f32]>,
    next_index: usize,
}

impl PredictionMemory {
    /// Cria memória zerada com `capacity` posições
    pub fn new(capacity: usize) -> FilterResult<Self> {
        if capacity == 0 {
            return Err(FilterError::InvalidConfig(
                "Prediction memory capacity must be > 0".into(),
            ));
        }

        Ok(Self {
            slots: vec![0.0; capacity].into_boxed_slice(),
            next_index: 0,
        })
    }

    /// Escreve no cursor e avança módulo a capacidade
    #[inline]
    pub fn push(&mut self, value: f32) {
        self.slots[self.next_index] = value;
        self.next_index = (self.next_index + 1) % self.slots.len();
    }

    /// Próxima posição a ser escrita
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Conteúdo bruto, em ordem de posição (não de chegada)
    pub fn as_slice(&self) -> &[f32] {
        &self.slots
    }

    /// Razão entre autocorrelação com atraso `lag` e autocorrelação em zero
    ///
    /// `Σ m[i]·m[(i+lag) mod N] / Σ m[i]²` sobre todas as N posições.
    /// `None` quando a soma em atraso zero é exatamente zero.
    pub fn lag_autocorrelation(&self, lag: usize) -> Option<f32> {
        let len = self.slots.len();
        let mut cross_product_self = 0.0f32;
        let mut cross_product_lag = 0.0f32;

        for (i, &value) in self.slots.iter().enumerate() {
            let lagged = self.slots[(i + lag) % len];
            cross_product_self += value * value;
            cross_product_lag += value * lagged;
        }

        if cross_product_self != 0.0 {
            Some(cross_product_lag / cross_product_self)
        } else {
            None
        }
    }

    /// Zera as posições e o cursor
    pub fn clear(&mut self) {
        self.slots.fill(0.0);
        self.next_index = 0;
    }
}
