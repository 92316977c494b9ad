use std::io;
use std::io::Cursor;

use byteorder::WriteBytesExt;

use crate::commands::command::CommandType;

/// `COM_PROCESS_INFO`: deprecated equivalent of `SHOW PROCESSLIST`. Server
/// replies with an ordinary text result set.
pub struct ProcessInfoCommand;

impl ProcessInfoCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::ProcessInfo as u8)?;

        Ok(vec)
    }
}
