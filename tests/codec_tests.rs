//! # Codec Layer Tests: HuffmanCodec
//!
//! Exact wire bytes for the deployed table, passthrough decisions and the
//! caller contract.

use bytes::Bytes;
use huffnet::{is_compressed, CodecConfig, CompressError, DecodeError, HuffmanCodec};
use std::borrow::Cow;
use std::time::Instant;

fn forced() -> HuffmanCodec {
    HuffmanCodec::new(CodecConfig::default().with_force_compression(true)).unwrap()
}

/// A run of the most frequent byte packs two bits per byte.
#[test]
fn test_frequent_symbol_wire_bytes() {
    let t = Instant::now();
    let codec = HuffmanCodec::default();

    // 3 x 2 bits = 6 bits -> 2 unused trailing bits.
    assert_eq!(&*codec.compress(&[0, 0, 0]), &[0x82, 0x3f]);
    // 8 x 2 bits fills two bytes exactly.
    assert_eq!(&*codec.compress(&[0; 8]), &[0x80, 0xff, 0xff]);

    println!("test_frequent_symbol_wire_bytes: Testing Overhead = {:?}", t.elapsed());
}

/// A single frequent byte, forced through the encoder: one header byte and
/// one payload byte holding control bit `1` and path bit `1`.
#[test]
fn test_single_byte_forced_framing() {
    let codec = forced();
    let code = codec.code_table().code(0);
    assert_eq!((code.bits(), code.len()), (0b11, 2));

    let wire = codec.compress(&[0]);
    assert_eq!(&*wire, &[0x86, 0x03]);
    assert_eq!(wire[0] & 0x0f, 8 - 2);
    assert_eq!(&*codec.decompress(&wire).unwrap(), &[0]);
}

/// Without forcing, a single byte can never shrink and passes through.
#[test]
fn test_single_byte_passthrough() {
    let codec = HuffmanCodec::default();
    let packet = [0u8];
    let wire = codec.compress(&packet);
    assert!(matches!(wire, Cow::Borrowed(_)));
    assert_eq!(&*wire, &packet);
    assert!(!is_compressed(&wire));
}

#[test]
fn test_mixed_walk_and_literal_wire_bytes() {
    let codec = HuffmanCodec::default();

    assert_eq!(&*codec.compress(&[0, 1, 0, 9]), &[0x83, 0xc7, 0x19]);

    let packet = [0, 0, 0, 0, 0xff, 0xff];
    let wire = codec.compress(&packet);
    assert_eq!(&*wire, &[0x86, 0xff, 0xfe, 0xfd, 0x03]);
    assert_eq!(&*codec.decompress(&wire).unwrap(), &packet);
}

/// A symbol the model never saw round-trips through the literal path.
#[test]
fn test_rare_symbol_round_trip() {
    let codec = forced();
    assert_eq!(codec.config().frequencies.get(4), 0);
    assert!(codec.code_table().is_literal(4));

    let wire = codec.compress(&[4, 4]);
    assert_eq!(&*wire, &[0x86, 0x08, 0x10, 0x00]);
    assert_eq!(&*codec.decompress(&wire).unwrap(), &[4, 4]);

    // Literals cost nine bits each; unforced, such packets pass through.
    let plain = HuffmanCodec::default();
    let packet = [4u8; 32];
    assert!(matches!(plain.compress(&packet), Cow::Borrowed(_)));
    assert_eq!(&*plain.decompress(&packet).unwrap(), &packet);
}

/// A representative game-state packet shrinks by more than half.
#[test]
fn test_typical_packet_round_trip() {
    let codec = HuffmanCodec::default();
    let packet = [
        0x01, 0, 0, 0, 0x09, 0, 0, 0, 0x05, 0, 0, 0x40, 0x3f, 0, 0, 0, 0x15, 0, 0, 0x18, 0, 0, 0, 0x02,
    ];
    let wire = codec.compress(&packet);
    assert_eq!(wire.len(), 11);
    assert_eq!(wire.len(), codec.compressed_len(&packet));
    assert!(is_compressed(&wire));
    assert_eq!(&*codec.decompress(&wire).unwrap(), &packet);
}

#[test]
fn test_compressed_bits_accounting() {
    let codec = HuffmanCodec::default();
    assert_eq!(codec.compressed_bits(&[0, 0, 0]), 6);
    assert_eq!(codec.compressed_bits(&[4]), 9);
    assert_eq!(codec.compressed_len(&[0, 0, 0]), 2);
}

#[test]
fn test_reserved_bit_is_a_contract_violation() {
    let codec = HuffmanCodec::default();
    assert_eq!(
        codec.try_compress(&[0x80, 0, 0]),
        Err(CompressError::ReservedBitSet { first_byte: 0x80 })
    );
    assert_eq!(codec.try_compress(&[]), Err(CompressError::EmptyPacket));
}

#[test]
#[should_panic(expected = "reserved compression flag")]
fn test_compress_panics_on_reserved_bit() {
    let _ = HuffmanCodec::default().compress(&[0xff, 0, 0, 0]);
}

#[test]
fn test_packet_size_limit() {
    let codec = HuffmanCodec::new(CodecConfig::default().with_max_packet_size(4)).unwrap();
    assert_eq!(
        codec.try_compress(&[0; 8]),
        Err(CompressError::PacketTooLarge { len: 8, max: 4 })
    );
    assert!(codec.try_compress(&[0; 4]).is_ok());

    // A peer with a larger limit sent eight zeros.
    assert_eq!(
        codec.decompress(&[0x80, 0xff, 0xff]),
        Err(DecodeError::OutputTooLarge { max: 4 })
    );
    assert_eq!(&*codec.decompress(&[0x80, 0xff]).unwrap(), &[0; 4]);
}

/// Without a configured limit, packets of any length are valid input.
#[test]
fn test_default_codec_has_no_size_limit() {
    let t = Instant::now();
    let codec = HuffmanCodec::default();

    let mut packet = vec![0u8; 70_000];
    packet[0] = 0x01;
    for (i, b) in packet.iter_mut().enumerate().skip(1).step_by(97) {
        *b = (i % 251) as u8;
    }

    let wire = codec.try_compress(&packet).unwrap();
    assert!(is_compressed(&wire));
    assert!(wire.len() < packet.len());
    assert_eq!(&*codec.decompress(&wire).unwrap(), packet.as_slice());

    // Incompressible and oversized: passed through untouched.
    let noisy: Vec<u8> = (0..70_000u32)
        .map(|i| ((i.wrapping_mul(2_654_435_761) >> 24) as u8 & 0x7f) | 0x20)
        .collect();
    let wire = codec.compress(&noisy);
    assert!(matches!(wire, Cow::Borrowed(_)));
    assert_eq!(&*codec.decompress(&wire).unwrap(), noisy.as_slice());

    println!("test_default_codec_has_no_size_limit: Testing Overhead = {:?}", t.elapsed());
}

/// Uncompressed packets are handed back by reference, never copied.
#[test]
fn test_passthrough_is_zero_copy() {
    let codec = HuffmanCodec::default();

    let packet = Bytes::from_static(&[0x02, 0xaa, 0xbb]);
    let wire = codec.compress_bytes(packet.clone());
    assert_eq!(wire.as_ptr(), packet.as_ptr());

    let restored = codec.decompress_bytes(wire).unwrap();
    assert_eq!(restored.as_ptr(), packet.as_ptr());

    let compressed = codec.compress_bytes(Bytes::from_static(&[0; 16]));
    assert!(is_compressed(&compressed));
    assert_eq!(&codec.decompress_bytes(compressed).unwrap()[..], &[0; 16]);
}

/// Reserved header bits 6-4 are ignored by the decoder.
#[test]
fn test_reserved_header_bits_ignored() {
    let codec = HuffmanCodec::default();
    assert_eq!(&*codec.decompress(&[0xc2, 0x3f]).unwrap(), &[0, 0, 0]);
    assert_eq!(&*codec.decompress(&[0xf2, 0x3f]).unwrap(), &[0, 0, 0]);
}

#[test]
fn test_header_only_packet_decodes_empty() {
    let codec = HuffmanCodec::default();
    assert!(codec.decompress(&[0x80]).unwrap().is_empty());
}
