use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use common::err::CResult;

/// ERR_Packet body, following the `0xff` header byte already stripped by
/// the caller.
///
/// ref: https://dev.mysql.com/doc/internals/en/packet-ERR_Packet.html
#[derive(Debug, Clone)]
pub struct ErrorPacket {
    pub error_code: u16,
    pub sql_state_marker: String,
    pub sql_state: String,
    pub error_message: String,
}

impl ErrorPacket {
    pub fn parse(packet: &[u8]) -> CResult<Self> {
        let mut cursor = Cursor::new(packet);

        let error_code = cursor.read_u16::<LittleEndian>()?;

        let mut sql_state_marker = String::new();
        let mut sql_state = String::new();
        if cursor.get_ref().len() as u64 - cursor.position() >= 6
            && cursor.get_ref()[cursor.position() as usize] == b'#'
        {
            sql_state_marker.push(cursor.read_u8()? as char);
            let mut buf = [0u8; 5];
            std::io::Read::read_exact(&mut cursor, &mut buf)?;
            sql_state = String::from_utf8_lossy(&buf).to_string();
        }

        let remaining = (cursor.get_ref().len() as u64 - cursor.position()) as usize;
        let mut message = vec![0u8; remaining];
        std::io::Read::read_exact(&mut cursor, &mut message)?;

        Ok(Self {
            error_code,
            sql_state_marker,
            sql_state,
            error_message: String::from_utf8_lossy(&message).to_string(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_error_with_sql_state() {
        let mut packet = vec![0x15, 0x04]; // 1045
        packet.extend_from_slice(b"#28000");
        packet.extend_from_slice(b"Access denied");

        let err = ErrorPacket::parse(&packet).unwrap();
        assert_eq!(err.error_code, 1045);
        assert_eq!(err.sql_state, "28000");
        assert_eq!(err.error_message, "Access denied");
    }
}
