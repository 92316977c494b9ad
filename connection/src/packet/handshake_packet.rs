use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use binlog::utils::read_null_term_string_with_cursor;
use common::err::CResult;

/// Initial_Handshake_Packet, protocol version 10.
///
/// ref: https://dev.mysql.com/doc/internals/en/connection-phase-packets.html#packet-Protocol::Handshake
#[derive(Debug, Clone)]
pub struct HandshakePacket {
    pub protocol_version: u8,
    pub server_version: String,
    pub connection_id: u32,
    pub scramble: String,
    pub server_capabilities: u64,
    pub server_collation: u8,
    pub status_flags: u16,
    pub auth_plugin_name: String,
}

impl HandshakePacket {
    pub fn parse(packet: &[u8]) -> CResult<Self> {
        let mut cursor = Cursor::new(packet);

        let protocol_version = cursor.read_u8()?;
        let server_version = read_null_term_string_with_cursor(&mut cursor)?;
        let connection_id = cursor.read_u32::<LittleEndian>()?;

        let mut scramble = String::new();
        let mut auth_plugin_data_1 = [0u8; 8];
        std::io::Read::read_exact(&mut cursor, &mut auth_plugin_data_1)?;
        scramble.push_str(&String::from_utf8_lossy(&auth_plugin_data_1));
        // filler byte
        cursor.read_u8()?;

        let capabilities_lower = cursor.read_u16::<LittleEndian>()? as u64;
        let server_collation = cursor.read_u8()?;
        let status_flags = cursor.read_u16::<LittleEndian>()?;
        let capabilities_upper = cursor.read_u16::<LittleEndian>()? as u64;
        let server_capabilities = capabilities_lower | (capabilities_upper << 16);

        let auth_plugin_data_len = cursor.read_u8()?;

        // 10 reserved bytes
        let mut reserved = [0u8; 10];
        std::io::Read::read_exact(&mut cursor, &mut reserved)?;

        // CLIENT_SECURE_CONNECTION always set by servers that implement
        // protocol version 10; the remainder of the scramble follows.
        let remaining_len = (auth_plugin_data_len as i64 - 8).max(13) as usize;
        let mut auth_plugin_data_2 = vec![0u8; remaining_len];
        std::io::Read::read_exact(&mut cursor, &mut auth_plugin_data_2)?;
        // drop the trailing NUL terminator shared with auth_plugin_data_2
        if auth_plugin_data_2.last() == Some(&0) {
            auth_plugin_data_2.pop();
        }
        scramble.push_str(&String::from_utf8_lossy(&auth_plugin_data_2));

        let auth_plugin_name = read_null_term_string_with_cursor(&mut cursor)?;

        Ok(Self {
            protocol_version,
            server_version,
            connection_id,
            scramble,
            server_capabilities,
            server_collation,
            status_flags,
            auth_plugin_name,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_protocol_version_and_server_version() {
        let mut packet = vec![10u8];
        packet.extend_from_slice(b"8.0.30\0");
        packet.extend_from_slice(&42u32.to_le_bytes());
        packet.extend_from_slice(b"12345678");
        packet.push(0);
        packet.extend_from_slice(&0xffffu16.to_le_bytes());
        packet.push(45);
        packet.extend_from_slice(&2u16.to_le_bytes());
        packet.extend_from_slice(&0u16.to_le_bytes());
        packet.push(21);
        packet.extend_from_slice(&[0u8; 10]);
        packet.extend_from_slice(b"123456789012\0");
        packet.extend_from_slice(b"mysql_native_password\0");

        let handshake = HandshakePacket::parse(&packet).unwrap();
        assert_eq!(handshake.protocol_version, 10);
        assert_eq!(handshake.server_version, "8.0.30");
        assert_eq!(handshake.connection_id, 42);
        assert_eq!(handshake.auth_plugin_name, "mysql_native_password");
        assert_eq!(handshake.scramble.len(), 20);
    }
}
