use std::io;
use std::io::Cursor;

use byteorder::WriteBytesExt;

use crate::commands::command::CommandType;

/// `COM_STATISTICS`: asks the server for a human-readable status line
/// (uptime, queries per second, etc). Server replies with a single
/// plain-text packet, no length prefix.
pub struct StatisticsCommand;

impl StatisticsCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::Statistics as u8)?;

        Ok(vec)
    }
}
