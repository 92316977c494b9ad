use std::io;
use std::io::Write;
use byteorder::WriteBytesExt;
use crate::bytes::ByteBuffer;
use crate::commands::command::CommandType;

pub struct QueryCommand {
    pub sql: String,
}

impl QueryCommand {
    pub fn new(sql: String) -> Self {
        Self { sql }
    }

    /// Writes this command's wire encoding into a caller-owned, reusable
    /// buffer instead of allocating a fresh `Vec` per query.
    pub fn serialize_into(&self, buf: &mut ByteBuffer) -> Result<(), io::Error> {
        buf.clear();
        let mut cursor = buf.cursor();

        cursor.write_u8(CommandType::Query as u8)?;
        cursor.write(self.sql.as_bytes())?;

        Ok(())
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut buf = ByteBuffer::new();
        self.serialize_into(&mut buf)?;
        Ok(buf.as_slice().to_vec())
    }
}
