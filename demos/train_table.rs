//! Builds a frequency table from captured packets.
//!
//! Each file argument holds one packet. The trained config is printed as TOML,
//! ready to ship to every peer at once.

use huffnet::{FrequencyTrainer, HuffmanCodec, HuffnetError};

fn main() -> Result<(), HuffnetError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let mut trainer = FrequencyTrainer::default();
    let mut packets = Vec::new();
    for path in std::env::args().skip(1) {
        let packet = std::fs::read(&path)?;
        trainer.observe(&packet);
        packets.push(packet);
    }

    if !trainer.is_complete() {
        tracing::warn!("Only {} bytes sampled; the table may not be representative.", trainer.observed_len());
    }

    // Captures must be outgoing packets; anything the codec would refuse to
    // send aborts training.
    let codec = HuffmanCodec::with_model(trainer.model());
    let mut raw = 0;
    let mut wire = 0;
    for packet in &packets {
        raw += packet.len();
        wire += codec.try_compress(packet)?.len();
    }
    tracing::info!("Sample compresses {} -> {} bytes with the trained table.", raw, wire);

    println!("{}", trainer.to_toml_string()?);
    Ok(())
}
