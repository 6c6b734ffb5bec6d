//! # Offline frequency training
//!
//! Counts byte occurrences over captured traffic and emits a `CodecConfig`
//! artifact. Never part of a running codec: the model stays static for the
//! life of a process and only changes by shipping a new table to every peer.

use huffnet_dsa::LEAF_COUNT;

use crate::config::CodecConfig;
use crate::error::ConfigError;
use crate::frequency::FrequencyModel;

/// Bytes of traffic sampled before a table is considered representative.
pub const DEFAULT_TRAINING_LENGTH: u64 = 200_000;

#[derive(Debug, Clone)]
pub struct FrequencyTrainer {
    counts: [u32; LEAF_COUNT],
    observed: u64,
    target: u64,
}

impl Default for FrequencyTrainer {
    fn default() -> Self {
        Self::new(DEFAULT_TRAINING_LENGTH)
    }
}

impl FrequencyTrainer {
    pub fn new(target: u64) -> Self {
        Self {
            counts: [0; LEAF_COUNT],
            observed: 0,
            target,
        }
    }

    /// Adds one packet to the sample. Counts saturate at `u32::MAX`.
    pub fn observe(&mut self, packet: &[u8]) {
        for &byte in packet {
            let count = &mut self.counts[byte as usize];
            *count = count.saturating_add(1);
        }
        let was_complete = self.is_complete();
        self.observed += packet.len() as u64;

        if !was_complete && self.is_complete() {
            tracing::debug!("Training: sampled {} bytes, table complete.", self.observed);
        }
    }

    pub fn observed_len(&self) -> u64 {
        self.observed
    }

    pub fn is_complete(&self) -> bool {
        self.observed >= self.target
    }

    pub fn model(&self) -> FrequencyModel {
        FrequencyModel::new(self.counts)
    }

    pub fn into_config(self) -> CodecConfig {
        CodecConfig::default().with_frequencies(self.model())
    }

    /// Renders the trained table as a config document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        CodecConfig::default().with_frequencies(self.model()).to_toml_string()
    }
}
