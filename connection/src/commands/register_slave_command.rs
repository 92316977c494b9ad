use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Cursor, Write};
use crate::commands::command::CommandType;

/// `COM_REGISTER_SLAVE`: announces this client as a replica before the
/// `COM_BINLOG_DUMP`/`COM_BINLOG_DUMP_GTID` that follows it, so the master
/// lists it in `SHOW SLAVE HOSTS`.
pub struct RegisterSlaveCommand {
    pub server_id: u32,
    pub report_host: String,
    pub report_user: String,
    pub report_password: String,
    pub report_port: u16,
}

impl RegisterSlaveCommand {
    pub fn new(server_id: u32) -> Self {
        Self {
            server_id,
            report_host: String::new(),
            report_user: String::new(),
            report_password: String::new(),
            report_port: 0,
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::RegisterSlave as u8)?;
        cursor.write_u32::<LittleEndian>(self.server_id)?;

        cursor.write_u8(self.report_host.len() as u8)?;
        cursor.write(self.report_host.as_bytes())?;
        cursor.write_u8(self.report_user.len() as u8)?;
        cursor.write(self.report_user.as_bytes())?;
        cursor.write_u8(self.report_password.len() as u8)?;
        cursor.write(self.report_password.as_bytes())?;

        cursor.write_u16::<LittleEndian>(self.report_port)?;
        // Replication rank, unused by the server.
        cursor.write_u32::<LittleEndian>(0)?;
        // Master id, always 0 unless chained replication is in play.
        cursor.write_u32::<LittleEndian>(0)?;

        Ok(vec)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serializes_leading_command_byte_and_server_id() {
        let command = RegisterSlaveCommand::new(7);
        let bytes = command.serialize().unwrap();
        assert_eq!(bytes[0], CommandType::RegisterSlave as u8);
        assert_eq!(u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]), 7);
    }
}
