use std::io;
use std::io::Cursor;

use byteorder::WriteBytesExt;

use crate::commands::command::CommandType;

/// `COM_SHUTDOWN`: asks the server to shut down. Deprecated by MySQL in
/// favor of the `SHUTDOWN` SQL statement / `mysqladmin shutdown`, but kept
/// for completeness. Server closes the connection without a reply.
pub struct ShutdownCommand {
    pub shutdown_level: u8,
}

impl ShutdownCommand {
    pub fn new(shutdown_level: u8) -> Self {
        Self { shutdown_level }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::Shutdown as u8)?;
        cursor.write_u8(self.shutdown_level)?;

        Ok(vec)
    }
}
