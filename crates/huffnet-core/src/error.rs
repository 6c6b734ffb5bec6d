//! Error types for the packet codec.
//!
//! Compression only fails when the caller breaks the packet contract, so
//! `CompressError` is a programming error. Decompression consumes network input
//! and `DecodeError` is an ordinary, expected outcome: the packet is dropped.

/// The caller handed `compress` a packet it must never send.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompressError {
    /// Packets carry at least a type byte.
    #[error("cannot compress an empty packet")]
    EmptyPacket,

    /// Bit 7 of the first byte is the compressed flag and belongs to the codec.
    #[error("first byte {first_byte:#04x} has the reserved compression flag set")]
    ReservedBitSet { first_byte: u8 },

    #[error("packet too large for compressor: {len} bytes exceeds {max} byte limit")]
    PacketTooLarge { len: usize, max: usize },
}

/// A compressed packet that cannot be trusted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("empty packet")]
    EmptyPacket,

    /// Header claims more unused trailing bits than fit in one byte or in the payload.
    #[error("invalid remainder {remainder} for {payload_bits} payload bits")]
    InvalidRemainder { remainder: u8, payload_bits: usize },

    /// A literal byte would extend past the end of the payload.
    #[error("literal at bit {cursor} runs past bit length {bit_length}")]
    LiteralOutOfBounds { cursor: usize, bit_length: usize },

    /// A tree walk needed a bit past the end of the payload.
    #[error("tree walk at bit {cursor} runs past bit length {bit_length}")]
    WalkOutOfBounds { cursor: usize, bit_length: usize },

    /// A walk stopped on a merge node instead of a leaf.
    #[error("tree walk stopped on non-leaf node {node}")]
    NonLeafSymbol { node: usize },

    #[error("decoder finished at bit {cursor}, expected {bit_length}")]
    CursorMismatch { cursor: usize, bit_length: usize },

    #[error("decompressed packet exceeds {max} byte limit")]
    OutputTooLarge { max: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum HuffnetError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compress(#[from] CompressError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}
