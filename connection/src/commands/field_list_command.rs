use std::io;
use std::io::{Cursor, Write};

use byteorder::WriteBytesExt;

use crate::{NULL_TERMINATOR, commands::command::CommandType};

/// `COM_FIELD_LIST`: lists a table's columns, optionally filtered by a
/// wildcard. Deprecated by MySQL in favor of `SHOW COLUMNS`/`information_schema`
/// but still reachable over the wire, so kept for completeness.
pub struct FieldListCommand {
    pub table: String,
    pub field_wildcard: String,
}

impl FieldListCommand {
    pub fn new(table: String, field_wildcard: String) -> Self {
        Self { table, field_wildcard }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::FieldList as u8)?;
        cursor.write(self.table.as_bytes())?;
        cursor.write_u8(NULL_TERMINATOR)?;
        cursor.write(self.field_wildcard.as_bytes())?;

        Ok(vec)
    }
}
