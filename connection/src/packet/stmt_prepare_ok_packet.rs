use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use common::err::CResult;

/// The first packet of a `COM_STMT_PREPARE` response. `num_params` and
/// `num_columns` tell the caller how many parameter-definition and
/// column-definition packets (each EOF-terminated) follow it.
#[derive(Debug)]
pub struct StmtPrepareOkPacket {
    pub statement_id: u32,
    pub num_columns: u16,
    pub num_params: u16,
    pub warning_count: u16,
}

impl StmtPrepareOkPacket {
    pub fn parse(packet: &[u8]) -> CResult<Self> {
        let mut cursor = Cursor::new(packet);

        cursor.read_u8()?; // status, always 0x00
        let statement_id = cursor.read_u32::<LittleEndian>()?;
        let num_columns = cursor.read_u16::<LittleEndian>()?;
        let num_params = cursor.read_u16::<LittleEndian>()?;
        cursor.read_u8()?; // filler
        let warning_count = cursor.read_u16::<LittleEndian>()?;

        Ok(Self {
            statement_id,
            num_columns,
            num_params,
            warning_count,
        })
    }
}
