//! # huffnet
//!
//! Per-packet Huffman compression over a static byte-frequency model.
//!
//! ```
//! use huffnet::HuffmanCodec;
//!
//! let codec = HuffmanCodec::shared();
//! let packet = [0x00, 0x00, 0x00, 0x00, 0x01, 0x00];
//! let wire = codec.compress(&packet);
//! assert!(wire.len() < packet.len());
//! assert_eq!(&*codec.decompress(&wire).unwrap(), &packet);
//! ```

pub use huffnet_codec::{
    is_compressed, BitReader, BitWriter, HuffmanCodec, COMPRESSED_FLAG, MAX_REMAINDER, REMAINDER_MASK,
};
pub use huffnet_core::{
    CodecConfig, CompressError, ConfigError, DecodeError, FrequencyModel, FrequencyTrainer, HuffnetError,
    DEFAULT_FREQUENCIES,
};
pub use huffnet_dsa::{Code, CodeTable, HuffmanTree, Node, NodeRef, LEAF_COUNT, NODE_COUNT};

/// Loads a codec from a TOML config file.
pub fn load_codec(path: impl AsRef<std::path::Path>) -> Result<HuffmanCodec, HuffnetError> {
    let config = CodecConfig::from_file(path)?;
    Ok(HuffmanCodec::new(config)?)
}
