use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::frequency::FrequencyModel;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Static symbol weights the tree is built from.
    pub frequencies: FrequencyModel,
    /// Largest packet `compress` accepts and `decompress` will produce.
    /// Unlimited when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_packet_size: Option<usize>,
    /// Emit Huffman framing even when it does not shrink the packet.
    /// Debug builds use this to exercise the decoder on every packet.
    pub force_compression: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            frequencies: FrequencyModel::default(),
            max_packet_size: None,
            force_compression: false,
        }
    }
}

impl CodecConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&input)?;

        if config.frequencies != FrequencyModel::default() && config.frequencies.get(0) == 0 {
            tracing::warn!(
                "Codec config {} never observed byte 0x00; zero-heavy packets will not compress.",
                path.display()
            );
        }
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_packet_size == Some(0) {
            return Err(ConfigError::Invalid("max_packet_size must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn with_frequencies(mut self, frequencies: FrequencyModel) -> Self {
        self.frequencies = frequencies;
        self
    }

    pub fn with_max_packet_size(mut self, max_packet_size: usize) -> Self {
        self.max_packet_size = Some(max_packet_size);
        self
    }

    pub fn with_force_compression(mut self, enabled: bool) -> Self {
        self.force_compression = enabled;
        self
    }
}
