//! # huffnet-codec: Static-Model Packet Compression
//!
//! Shrinks individual datagrams with a Huffman tree built once from a fixed
//! byte-frequency table. No per-packet tree, no adaptive state: every call is a
//! pure transform over one buffer.
//!
//! ## Wire Format
//! - Byte 0, bit 7: `1` = Huffman payload follows, `0` = the whole buffer is
//!   the original packet.
//! - Byte 0, bits 3-0: unused trailing bits in the last payload byte.
//! - Bytes 1..: per input byte, a control bit (`1` tree walk, `0` literal)
//!   followed by the walk path or the raw byte, all LSB-first.

pub mod bits;
mod compress;
mod decompress;

use std::borrow::Cow;
use std::sync::OnceLock;

use bytes::Bytes;
use huffnet_core::{CodecConfig, CompressError, ConfigError, DecodeError, FrequencyModel};
use huffnet_dsa::{CodeTable, HuffmanTree};

pub use bits::{BitReader, BitWriter};

/// Header bit marking a Huffman-coded packet.
pub const COMPRESSED_FLAG: u8 = 0x80;
/// Header bits holding the trailing-bit count.
pub const REMAINDER_MASK: u8 = 0x0F;
/// Largest trailing-bit count an encoder ever writes.
pub const MAX_REMAINDER: u8 = 7;

/// `true` when the buffer carries a Huffman payload.
#[inline(always)]
pub fn is_compressed(packet: &[u8]) -> bool {
    packet.first().is_some_and(|&b| b & COMPRESSED_FLAG != 0)
}

/// A built codec: tree, code table and limits.
///
/// Building happens once, in the constructor. Afterwards the codec is
/// read-only and can be shared across threads (`&HuffmanCodec` or `Arc`)
/// without locking.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    codes: CodeTable,
    config: CodecConfig,
}

impl Default for HuffmanCodec {
    fn default() -> Self {
        Self::build(CodecConfig::default())
    }
}

impl HuffmanCodec {
    pub fn new(config: CodecConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// A codec over `model` with default limits.
    pub fn with_model(model: FrequencyModel) -> Self {
        Self::build(CodecConfig::default().with_frequencies(model))
    }

    /// The process-wide codec over the built-in table.
    ///
    /// Built on first use, exactly once, even under concurrent first calls.
    pub fn shared() -> &'static HuffmanCodec {
        static SHARED: OnceLock<HuffmanCodec> = OnceLock::new();
        SHARED.get_or_init(HuffmanCodec::default)
    }

    fn build(config: CodecConfig) -> Self {
        let tree = HuffmanTree::build(config.frequencies.as_array());
        let codes = CodeTable::derive(&tree);
        tracing::debug!(
            "HuffmanCodec: built tree (root weight {}), {} literal symbols, shortest code {} bits.",
            tree.frequency(tree.root()),
            codes.literal_count(),
            codes.iter().map(|(_, c)| c.len()).min().unwrap_or(0),
        );
        Self { tree, codes, config }
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.codes
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Payload bits `src` would encode to, control bits included.
    pub fn compressed_bits(&self, src: &[u8]) -> u64 {
        compress::payload_bits(&self.codes, src)
    }

    /// Size of the Huffman framing for `src`, header byte included, whether
    /// or not `compress` would choose it.
    pub fn compressed_len(&self, src: &[u8]) -> usize {
        compress::framed_len(self.compressed_bits(src))
    }

    /// Compresses a packet, borrowing it back unchanged when encoding would not
    /// make it smaller.
    ///
    /// ## Errors
    /// Only for packets that break the caller contract: empty, with bit 7 of
    /// the first byte set, or over a configured `max_packet_size`.
    pub fn try_compress<'a>(&self, src: &'a [u8]) -> Result<Cow<'a, [u8]>, CompressError> {
        compress::compress(&self.codes, &self.config, src)
    }

    /// Like `try_compress`.
    ///
    /// # Panics
    /// On a contract violation. Such a packet is a bug in the sender, not bad
    /// data.
    pub fn compress<'a>(&self, src: &'a [u8]) -> Cow<'a, [u8]> {
        match self.try_compress(src) {
            Ok(out) => out,
            Err(e) => panic!("HuffmanCodec::compress: {e}"),
        }
    }

    /// Restores a packet produced by `compress`.
    ///
    /// ## Security
    /// Safe on arbitrary input: malformed buffers produce a `DecodeError` and
    /// never a read outside `src`.
    pub fn decompress<'a>(&self, src: &'a [u8]) -> Result<Cow<'a, [u8]>, DecodeError> {
        decompress::decompress(&self.tree, self.config.max_packet_size, src).inspect_err(|e| {
            tracing::debug!("HuffmanCodec: dropping {}-byte packet: {}", src.len(), e);
        })
    }

    /// `compress` over a shared buffer; passthrough hands back the same buffer
    /// without copying.
    pub fn compress_bytes(&self, packet: Bytes) -> Bytes {
        if let Cow::Owned(out) = self.compress(&packet) {
            return Bytes::from(out);
        }
        packet
    }

    /// `decompress` over a shared buffer; passthrough hands back the same
    /// buffer without copying.
    pub fn decompress_bytes(&self, packet: Bytes) -> Result<Bytes, DecodeError> {
        if let Cow::Owned(out) = self.decompress(&packet)? {
            return Ok(Bytes::from(out));
        }
        Ok(packet)
    }
}


#[cfg(kani)]
mod proofs {
    use super::*;

    #[kani::proof]
    fn prove_decompress_never_reads_out_of_bounds() {
        let codec = HuffmanCodec::default();
        let packet: [u8; 4] = kani::any();
        let len: usize = kani::any();
        kani::assume(len <= packet.len());

        // Any header, any payload: the decoder returns, it does not fault.
        let _ = codec.decompress(&packet[..len]);
    }
}
