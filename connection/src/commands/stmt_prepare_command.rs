use std::io;
use std::io::{Cursor, Write};

use byteorder::WriteBytesExt;

use crate::commands::command::CommandType;

/// `COM_STMT_PREPARE`: asks the server to compile `sql` and hand back a
/// statement id in the `StmtPrepareOkPacket` that follows.
pub struct StmtPrepareCommand {
    pub sql: String,
}

impl StmtPrepareCommand {
    pub fn new(sql: String) -> Self {
        Self { sql }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::StmtPrepare as u8)?;
        cursor.write(self.sql.as_bytes())?;

        Ok(vec)
    }
}
