use std::borrow::Cow;

use huffnet_core::{CodecConfig, CompressError};
use huffnet_dsa::CodeTable;

use crate::bits::BitWriter;
use crate::COMPRESSED_FLAG;

/// Total payload bits for `src`, control bits included.
#[inline(always)]
pub(crate) fn payload_bits(codes: &CodeTable, src: &[u8]) -> u64 {
    src.iter().map(|&b| u64::from(codes.code(b).len())).sum()
}

/// Header byte plus the payload rounded up to whole bytes.
#[inline(always)]
pub(crate) fn framed_len(bit_count: u64) -> usize {
    bit_count.div_ceil(8) as usize + 1
}

/// Encodes one packet, or hands it back untouched when encoding would not
/// shrink it.
///
/// ## Wire Format
/// Byte 0 holds the count of unused trailing bits in the last payload byte
/// (0-7) and, once the payload is written, the compressed flag in bit 7.
pub(crate) fn compress<'a>(
    codes: &CodeTable,
    config: &CodecConfig,
    src: &'a [u8],
) -> Result<Cow<'a, [u8]>, CompressError> {
    let Some(&first_byte) = src.first() else {
        return Err(CompressError::EmptyPacket);
    };
    if first_byte & COMPRESSED_FLAG != 0 {
        return Err(CompressError::ReservedBitSet { first_byte });
    }
    if let Some(max) = config.max_packet_size.filter(|&max| src.len() > max) {
        return Err(CompressError::PacketTooLarge { len: src.len(), max });
    }

    let bit_count = payload_bits(codes, src);
    let out_len = framed_len(bit_count);
    if out_len >= src.len() && !config.force_compression {
        tracing::trace!("Compressor: passthrough ({} -> {} bytes would not shrink).", src.len(), out_len);
        return Ok(Cow::Borrowed(src));
    }

    let remainder = (bit_count % 8) as u8;
    let mut out = vec![0u8; out_len];
    out[0] = if remainder == 0 { 0 } else { 8 - remainder };

    let mut writer = BitWriter::new(&mut out[1..]);
    for &byte in src {
        writer.write_code(codes.code(byte));
    }
    debug_assert_eq!(writer.position() as u64, bit_count);

    out[0] |= COMPRESSED_FLAG;
    Ok(Cow::Owned(out))
}
