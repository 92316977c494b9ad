use std::io;
use std::io::Cursor;

use byteorder::WriteBytesExt;

use crate::commands::command::CommandType;

/// `COM_REFRESH`: flushes a subset of the server's tables/logs/caches,
/// selected by a bitmask of `REFRESH_*` flags (see
/// `connection::declar::refresh_flags`). Server replies with an OK or
/// ERR packet.
pub struct RefreshCommand {
    pub sub_command: u8,
}

impl RefreshCommand {
    pub fn new(sub_command: u8) -> Self {
        Self { sub_command }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::Refresh as u8)?;
        cursor.write_u8(self.sub_command)?;

        Ok(vec)
    }
}
