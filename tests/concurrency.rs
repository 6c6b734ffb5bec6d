//! # Shared Codec Tests
//!
//! One built codec, many threads, no locks.

use huffnet::HuffmanCodec;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

/// Concurrent first use of the process-wide codec observes a single instance.
#[test]
fn test_shared_codec_first_use_race() {
    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                HuffmanCodec::shared() as *const HuffmanCodec as usize
            })
        })
        .collect();

    let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addrs.windows(2).all(|w| w[0] == w[1]));
}

/// Independent packets on independent threads through one `Arc` codec.
#[test]
fn test_parallel_round_trips() {
    let t = Instant::now();
    let codec = Arc::new(HuffmanCodec::default());

    let handles: Vec<_> = (0..4u8)
        .map(|worker| {
            let codec = codec.clone();
            thread::spawn(move || {
                for i in 0..2_000u32 {
                    let mut packet = vec![0u8; 1 + (i as usize % 64)];
                    packet[0] = worker;
                    for (j, b) in packet.iter_mut().enumerate().skip(1) {
                        if (i as usize + j) % 5 == 0 {
                            *b = (i as u8).wrapping_mul(31);
                        }
                    }
                    let wire = codec.compress(&packet);
                    let out = codec.decompress(&wire).expect("valid packet rejected");
                    assert_eq!(&*out, packet.as_slice());
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    println!("test_parallel_round_trips: Testing Overhead = {:?}", t.elapsed());
}
