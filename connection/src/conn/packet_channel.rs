use std::fs::File;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpStream};
use std::os::fd::AsRawFd;
use std::{fmt, io, net};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use native_tls::{Certificate, TlsConnector};

use common::err::decode_error::ReError;
use common::err::CResult;

use crate::conn::connection_options::ConnectionOptions;
use crate::{PACKET_HEADER_SIZE, TIMEOUT_LATENCY_DELTA};

/// A single frame carries at most this many payload bytes (`0xFFFFFF`); a
/// frame of exactly this size signals that another frame follows.
const MAX_FRAME_LENGTH: usize = 0xFF_FFFF;

#[derive(Debug)]
pub struct PacketChannel {
    stream: ChannelStream,
    max_allowed_packet: usize,
}

impl PacketChannel {
    pub fn new(options: &ConnectionOptions) -> CResult<Self> {
        let address: String = format!("{}:{}", options.hostname, options.port.to_string());
        let stream = TcpStream::connect(address)?;
        let read_timeout = options.heartbeat_interval + TIMEOUT_LATENCY_DELTA;
        stream.set_read_timeout(Some(read_timeout))?;
        Ok(Self {
            stream: ChannelStream::Tcp(stream),
            max_allowed_packet: options.max_allowed_packet,
        })
    }

    pub fn is_ssl(&self) -> bool {
        match self.stream {
            ChannelStream::Tls(_) => true,
            _ => false,
        }
    }

    /// Reads a full logical packet, reassembling it from as many
    /// `MAX_FRAME_LENGTH`-sized frames as needed. Returns the reassembled
    /// payload and the sequence number of its first frame.
    pub fn read_packet(&mut self) -> CResult<(Vec<u8>, u8)> {
        let mut payload = Vec::new();
        let mut first_seq_num = None;
        let mut expected_seq_num: Option<u8> = None;

        loop {
            let mut header_buffer = [0; PACKET_HEADER_SIZE];
            self.stream.read_exact(&mut header_buffer)?;
            let frame_len = (&header_buffer[0..3]).read_u24::<LittleEndian>()? as usize;
            let seq_num = header_buffer[3];

            if let Some(expected) = expected_seq_num {
                if seq_num != expected {
                    return Err(ReError::PacketsOutOfOrder);
                }
            }
            expected_seq_num = Some(seq_num.wrapping_add(1));
            first_seq_num.get_or_insert(seq_num);

            if payload.len() + frame_len > self.max_allowed_packet {
                return Err(ReError::PacketTooLarge(payload.len() + frame_len));
            }

            let mut frame = vec![0; frame_len];
            self.stream.read_exact(&mut frame)?;
            payload.extend_from_slice(&frame);

            if frame_len < MAX_FRAME_LENGTH {
                break;
            }
        }

        Ok((payload, first_seq_num.unwrap_or(0)))
    }

    /// Writes a full logical packet, splitting it into as many
    /// `MAX_FRAME_LENGTH`-sized frames as needed. A payload that is an exact
    /// multiple of `MAX_FRAME_LENGTH` (including zero) is followed by an
    /// empty terminating frame, per the MySQL client/server protocol.
    pub fn write_packet(&mut self, packet: &[u8], seq_num: u8) -> CResult<()> {
        if packet.len() > self.max_allowed_packet {
            return Err(ReError::PacketTooLarge(packet.len()));
        }

        let mut seq = seq_num;
        let mut offset = 0;
        loop {
            let remaining = packet.len() - offset;
            let frame_len = remaining.min(MAX_FRAME_LENGTH);
            let frame = &packet[offset..offset + frame_len];

            self.stream.write_u24::<LittleEndian>(frame_len as u32)?;
            self.stream.write_u8(seq)?;
            self.stream.write(frame)?;

            offset += frame_len;
            seq = seq.wrapping_add(1);

            if frame_len < MAX_FRAME_LENGTH {
                break;
            }
        }
        Ok(())
    }

    pub fn upgrade_to_ssl(self, options: &ConnectionOptions) -> CResult<Self> {
        if options.ssl_opts.is_none() {
            return Err(ReError::ConnectionError(
                "The ssl options is empty.".to_string(),
            ));
        }
        let ssl_opts = options.ssl_opts.clone().unwrap();

        let domain = options.hostname.clone();

        let mut builder = TlsConnector::builder();
        if let Some(root_cert_path) = ssl_opts.root_cert_path() {
            let mut root_cert_data = vec![];
            let mut root_cert_file = File::open(root_cert_path)?;
            root_cert_file.read_to_end(&mut root_cert_data)?;

            let root_certs = match Certificate::from_der(&root_cert_data)
                .map(|x| vec![x])
                .or_else(|_| {
                    pem::parse_many(&*root_cert_data)
                        .unwrap_or_default()
                        .iter()
                        .map(pem::encode)
                        .map(|s| Certificate::from_pem(s.as_bytes()))
                        .collect()
                }) {
                Ok(cert) => cert,
                Err(err) => {
                    return Err(ReError::ConnectionError(format!(
                        "The ssl cert can not load. err:{{{err}}}"
                    )))
                }
            };

            for root_cert in root_certs {
                builder.add_root_certificate(root_cert);
            }
        }
        if let Some(client_identity) = ssl_opts.client_identity() {
            let identity = client_identity.load()?;
            builder.identity(identity);
        }
        builder.danger_accept_invalid_hostnames(ssl_opts.skip_domain_validation());
        builder.danger_accept_invalid_certs(ssl_opts.accept_invalid_certs());
        let tls_connector = match builder.build() {
            Ok(tls) => tls,
            Err(err) => {
                return Err(ReError::ConnectionError(format!(
                    "Can not build tls. err:{{{err}}}"
                )))
            }
        };

        match self.stream {
            ChannelStream::Tcp(tcp_stream) => {
                let secure_stream = match tls_connector.connect(&domain, tcp_stream) {
                    Ok(stream) => stream,
                    Err(err) => {
                        return Err(ReError::ConnectionError(format!(
                            "Can not connect tls. err:{{{err}}}"
                        )))
                    }
                };
                Ok(Self {
                    stream: ChannelStream::Tls(secure_stream),
                    max_allowed_packet: self.max_allowed_packet,
                })
            }
            ChannelStream::Tls(_) => Ok(self),
        }
    }

    /// Resets any caller-visible sequence tracking; the MySQL protocol
    /// starts each new command at sequence id 0.
    pub fn reset_seq(&self) -> u8 {
        0
    }

    /// Writes raw bytes directly to the underlying stream, bypassing
    /// MySQL packet framing. Used by `CompressedChannel`, which frames
    /// the stream itself at the compression layer.
    pub fn write_raw(&mut self, buf: &[u8]) -> CResult<()> {
        self.stream.write_all(buf)?;
        Ok(())
    }

    /// Reads exactly `buf.len()` raw bytes from the underlying stream,
    /// bypassing MySQL packet framing.
    pub fn read_raw_exact(&mut self, buf: &mut [u8]) -> CResult<()> {
        self.stream.read_exact(buf)?;
        Ok(())
    }
}

impl Default for PacketChannel {
    fn default() -> Self {
        PacketChannel::new(&ConnectionOptions::default()).unwrap()
    }
}

enum ChannelStream {
    Tls(native_tls::TlsStream<net::TcpStream>),
    Tcp(net::TcpStream),
}

impl ChannelStream {
    pub fn shutdown(&mut self) -> io::Result<()> {
        match self {
            ChannelStream::Tcp(stream) => stream.shutdown(Shutdown::Both),
            ChannelStream::Tls(stream) => stream.shutdown(),
        }
    }
}

impl Write for ChannelStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            ChannelStream::Tcp(stream) => stream.write(buf),
            ChannelStream::Tls(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            ChannelStream::Tcp(stream) => stream.flush(),
            ChannelStream::Tls(stream) => stream.flush(),
        }
    }
}

impl Read for ChannelStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            ChannelStream::Tcp(stream) => stream.read(buf),
            ChannelStream::Tls(stream) => stream.read(buf),
        }
    }
}

impl fmt::Debug for ChannelStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ChannelStream::Tcp(ref s) => write!(f, "Tcp stream {:?}", s),
            ChannelStream::Tls(ref s) => write!(f, "Tls stream {:?}", s),
        }
    }
}

#[cfg(test)]
mod test {
    #[test]
    fn test() {
        assert_eq!(1, 1);
        println!("binlog lib test:{}", 0x21);
    }
}
