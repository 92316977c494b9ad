use std::io;
use std::io::{Cursor, Write};

use byteorder::WriteBytesExt;

use crate::commands::command::CommandType;

/// `COM_CREATE_DB`: deprecated in favor of `CREATE DATABASE`, kept for
/// completeness. Server replies with an OK or ERR packet.
pub struct CreateDbCommand {
    pub schema_name: String,
}

impl CreateDbCommand {
    pub fn new(schema_name: String) -> Self {
        Self { schema_name }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::CreateDb as u8)?;
        cursor.write(self.schema_name.as_bytes())?;

        Ok(vec)
    }
}
