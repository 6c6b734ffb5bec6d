use bytes::{Bytes, BytesMut};
use huffnet::HuffmanCodec;
use tokio::net::UdpSocket;

/// Largest UDP payload.
const MAX_DATAGRAM: usize = 65_535;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let codec = HuffmanCodec::shared();
    let server = UdpSocket::bind("127.0.0.1:0").await?;
    let client = UdpSocket::bind("127.0.0.1:0").await?;
    client.connect(server.local_addr()?).await?;

    let packets: Vec<Bytes> = vec![
        Bytes::from_static(&[0x01, 0, 0, 0, 0x09, 0, 0, 0, 0x05, 0, 0, 0x40, 0x3f, 0, 0, 0]),
        Bytes::from_static(b"\x02hello, lobby"),
        Bytes::from_static(&[0x03]),
    ];

    let mut buf = BytesMut::zeroed(MAX_DATAGRAM);
    for packet in packets {
        let wire = codec.compress_bytes(packet.clone());
        client.send(&wire).await?;

        let (len, from) = server.recv_from(&mut buf).await?;
        let received = Bytes::copy_from_slice(&buf[..len]);
        match codec.decompress_bytes(received) {
            Ok(restored) => {
                assert_eq!(restored, packet);
                tracing::info!("{}: {} bytes on the wire for a {}-byte packet", from, len, packet.len());
            }
            // A real receiver drops the datagram and moves on.
            Err(e) => tracing::warn!("{}: dropped malformed packet: {}", from, e),
        }
    }

    Ok(())
}
