use common::err::CResult;

use crate::conn::compressed_channel::CompressedChannel;
use crate::conn::packet_channel::PacketChannel;

/// The wire transport a live connection reads/writes packets through.
/// Starts `Plain`; switches to `Compressed` once the server has agreed
/// to `CLIENT_COMPRESS` during the handshake and never switches back.
#[derive(Debug)]
pub enum Transport {
    Plain(PacketChannel),
    Compressed(CompressedChannel),
}

impl Transport {
    pub fn read_packet(&mut self) -> CResult<(Vec<u8>, u8)> {
        match self {
            Transport::Plain(channel) => channel.read_packet(),
            Transport::Compressed(channel) => channel.read_packet(),
        }
    }

    pub fn write_packet(&mut self, packet: &[u8], seq_num: u8) -> CResult<()> {
        match self {
            Transport::Plain(channel) => channel.write_packet(packet, seq_num),
            Transport::Compressed(channel) => channel.write_packet(packet, seq_num),
        }
    }

    pub fn is_ssl(&self) -> bool {
        match self {
            Transport::Plain(channel) => channel.is_ssl(),
            Transport::Compressed(channel) => channel.is_ssl(),
        }
    }

    /// Wraps the still-plain channel in a `CompressedChannel`. Called once,
    /// right after `CLIENT_COMPRESS` has been agreed on in the handshake.
    pub fn upgrade_to_compressed(self) -> Transport {
        match self {
            Transport::Plain(channel) => Transport::Compressed(CompressedChannel::new(channel)),
            compressed => compressed,
        }
    }
}
