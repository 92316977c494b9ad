use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use common::err::CResult;

use crate::conn::connection_options::ConnectionOptions;
use crate::conn::packet_channel::PacketChannel;

/// Compressed-protocol header: 3-byte compressed length, 1-byte sequence,
/// 3-byte length before compression (0 when the payload was sent uncompressed).
const COMPRESSED_HEADER_SIZE: usize = 7;

/// Packets shorter than this aren't worth compressing.
const COMPRESSION_THRESHOLD: usize = 50;

/// Wraps a `PacketChannel` with the `CLIENT_COMPRESS` framing: every frame
/// written to the wire is itself a zlib-compressed blob of one or more
/// uncompressed MySQL packets, with its own independent sequence counter.
#[derive(Debug)]
pub struct CompressedChannel {
    inner: PacketChannel,
    seq_num: u8,
    /// Bytes already decompressed from the last inbound frame but not yet
    /// consumed by `read_packet`.
    unconsumed: Vec<u8>,
}

impl CompressedChannel {
    pub fn new(inner: PacketChannel) -> Self {
        Self {
            inner,
            seq_num: 0,
            unconsumed: Vec::new(),
        }
    }

    pub fn connect(options: &ConnectionOptions) -> CResult<Self> {
        Ok(Self::new(PacketChannel::new(options)?))
    }

    pub fn reset_seq(&mut self) {
        self.seq_num = 0;
    }

    pub fn is_ssl(&self) -> bool {
        self.inner.is_ssl()
    }

    pub fn read_packet(&mut self) -> CResult<(Vec<u8>, u8)> {
        if self.unconsumed.is_empty() {
            self.fill_buffer()?;
        }
        self.decode_one_packet()
    }

    pub fn write_packet(&mut self, packet: &[u8], seq_num: u8) -> CResult<()> {
        let payload = if packet.len() >= COMPRESSION_THRESHOLD {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(packet)?;
            let compressed = encoder.finish()?;
            (compressed, packet.len() as u32)
        } else {
            (packet.to_vec(), 0)
        };

        let (body, uncompressed_len) = payload;
        let mut frame = Vec::with_capacity(COMPRESSED_HEADER_SIZE + body.len());
        frame.write_u24::<LittleEndian>(body.len() as u32)?;
        frame.write_u8(seq_num)?;
        frame.write_u24::<LittleEndian>(uncompressed_len)?;
        frame.extend_from_slice(&body);

        self.inner.write_raw(&frame)?;
        self.seq_num = seq_num.wrapping_add(1);
        Ok(())
    }

    fn fill_buffer(&mut self) -> CResult<()> {
        let mut header = [0u8; COMPRESSED_HEADER_SIZE];
        self.inner.read_raw_exact(&mut header)?;

        let compressed_len = (&header[0..3]).read_u24::<LittleEndian>()? as usize;
        self.seq_num = header[3];
        let uncompressed_len = (&header[4..7]).read_u24::<LittleEndian>()? as usize;

        let mut body = vec![0u8; compressed_len];
        self.inner.read_raw_exact(&mut body)?;

        let decompressed = if uncompressed_len == 0 {
            body
        } else {
            let mut decoder = ZlibDecoder::new(&body[..]);
            let mut out = Vec::with_capacity(uncompressed_len);
            decoder.read_to_end(&mut out)?;
            out
        };
        self.unconsumed.extend_from_slice(&decompressed);
        Ok(())
    }

    /// Pulls one plain MySQL packet (header + payload) out of `unconsumed`,
    /// refilling from the wire if a packet spans more than one compressed
    /// frame.
    fn decode_one_packet(&mut self) -> CResult<(Vec<u8>, u8)> {
        while self.unconsumed.len() < crate::PACKET_HEADER_SIZE {
            self.fill_buffer()?;
        }

        let frame_len = (&self.unconsumed[0..3]).read_u24::<LittleEndian>()? as usize;
        let seq_num = self.unconsumed[3];

        while self.unconsumed.len() < crate::PACKET_HEADER_SIZE + frame_len {
            self.fill_buffer()?;
        }

        let packet = self.unconsumed
            [crate::PACKET_HEADER_SIZE..crate::PACKET_HEADER_SIZE + frame_len]
            .to_vec();
        self.unconsumed.drain(0..crate::PACKET_HEADER_SIZE + frame_len);

        Ok((packet, seq_num))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_packets_skip_compression() {
        assert!(b"ping".len() < COMPRESSION_THRESHOLD);
    }
}
