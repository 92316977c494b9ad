use std::io;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::commands::command::CommandType;

/// `COM_STMT_RESET`: clears a statement's long-data buffers and cursor,
/// leaving the prepared statement itself usable. Server replies with an OK
/// packet.
pub struct StmtResetCommand {
    pub statement_id: u32,
}

impl StmtResetCommand {
    pub fn new(statement_id: u32) -> Self {
        Self { statement_id }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        vec.write_u8(CommandType::StmtReset as u8)?;
        vec.write_u32::<LittleEndian>(self.statement_id)?;
        Ok(vec)
    }
}
