use std::io;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::commands::command::CommandType;

/// `COM_STMT_CLOSE`: frees a prepared statement on the server. The server
/// sends no response to this command.
pub struct StmtCloseCommand {
    pub statement_id: u32,
}

impl StmtCloseCommand {
    pub fn new(statement_id: u32) -> Self {
        Self { statement_id }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        vec.write_u8(CommandType::StmtClose as u8)?;
        vec.write_u32::<LittleEndian>(self.statement_id)?;
        Ok(vec)
    }
}
