use std::io;
use std::io::Cursor;

use byteorder::WriteBytesExt;

use crate::commands::command::CommandType;

/// `COM_QUIT`: tells the server this connection is closing. No response
/// is sent back.
pub struct QuitCommand;

impl QuitCommand {
    pub fn new() -> Self {
        Self
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::Quit as u8)?;

        Ok(vec)
    }
}
