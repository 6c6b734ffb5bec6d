pub mod config;
pub mod error;
pub mod frequency;
pub mod training;

pub use config::CodecConfig;
pub use error::{CompressError, ConfigError, DecodeError, HuffnetError};
pub use frequency::{FrequencyModel, DEFAULT_FREQUENCIES};
pub use training::FrequencyTrainer;
