use std::borrow::Cow;

use huffnet_core::DecodeError;
use huffnet_dsa::HuffmanTree;

use crate::bits::BitReader;
use crate::{COMPRESSED_FLAG, MAX_REMAINDER, REMAINDER_MASK};

/// Decodes one packet received from the network.
///
/// # Security
/// `src` is attacker controlled. Every bit and byte read goes through
/// `BitReader`, which refuses positions past `bit_length` or the slice end, and
/// every tree step stays inside the 511-node arena. Malformed input always ends
/// in a `DecodeError`, never a panic.
pub(crate) fn decompress<'a>(
    tree: &HuffmanTree,
    max_packet_size: Option<usize>,
    src: &'a [u8],
) -> Result<Cow<'a, [u8]>, DecodeError> {
    let Some((&header, payload)) = src.split_first() else {
        return Err(DecodeError::EmptyPacket);
    };
    if header & COMPRESSED_FLAG == 0 {
        return Ok(Cow::Borrowed(src));
    }

    // Bits 6-4 are reserved and ignored.
    let remainder = header & REMAINDER_MASK;
    let payload_bits = payload.len() * 8;
    if remainder > MAX_REMAINDER || usize::from(remainder) > payload_bits {
        return Err(DecodeError::InvalidRemainder { remainder, payload_bits });
    }
    let bit_length = payload_bits - usize::from(remainder);

    let mut reader = BitReader::new(payload, bit_length);
    // Every symbol costs at least two bits.
    let max_len = max_packet_size.unwrap_or(usize::MAX);
    let mut out = Vec::with_capacity((bit_length / 2).min(max_len));

    while !reader.is_exhausted() {
        if out.len() >= max_len {
            return Err(DecodeError::OutputTooLarge { max: max_len });
        }
        let cursor = reader.position();
        let symbol = match reader.read_bit() {
            Some(true) => walk(tree, &mut reader)?,
            Some(false) => reader
                .read_byte()
                .ok_or(DecodeError::LiteralOutOfBounds { cursor, bit_length })?,
            None => return Err(DecodeError::WalkOutOfBounds { cursor, bit_length }),
        };
        out.push(symbol);
    }

    if reader.position() != bit_length {
        return Err(DecodeError::CursorMismatch {
            cursor: reader.position(),
            bit_length,
        });
    }
    Ok(Cow::Owned(out))
}

/// Follows path bits from the root until a leaf.
///
/// Stops without consuming the bit when the child it names is absent, and
/// stops right after stepping onto a node with no children at all, so no bit
/// past the symbol is ever touched.
fn walk(tree: &HuffmanTree, reader: &mut BitReader<'_>) -> Result<u8, DecodeError> {
    let mut node = tree.root();
    loop {
        let bit = reader.peek_bit().ok_or(DecodeError::WalkOutOfBounds {
            cursor: reader.position(),
            bit_length: reader.bit_length(),
        })?;
        let Some(next) = tree.child(node, bit) else {
            break;
        };
        reader.skip_bit();
        node = next;
        if tree.is_leaf(node) {
            break;
        }
    }
    node.as_symbol()
        .ok_or(DecodeError::NonLeafSymbol { node: node.index() })
}
