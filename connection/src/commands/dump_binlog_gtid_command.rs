use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Cursor, Write};
use binlog::alias::mysql::gtid::gtid_set::GtidSet;
use crate::commands::command::CommandType;

pub struct DumpBinlogGtidCommand {
    pub server_id: u32,
    pub binlog_filename: String,
    pub binlog_position: u64,
    pub flags: u16,
}

impl DumpBinlogGtidCommand {
    pub fn new(server_id: u32, binlog_filename: String, binlog_position: u64) -> Self {
        Self {
            server_id,
            binlog_filename,
            binlog_position,
            flags: 0,
        }
    }

    pub fn serialize(&self, gtid_set: &GtidSet) -> Result<Vec<u8>, io::Error> {
        let encoded_set = Self::encode_gtid_set(gtid_set)?;

        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u8(CommandType::BinlogDumpGtid as u8)?;
        cursor.write_u16::<LittleEndian>(self.flags)?;
        cursor.write_u32::<LittleEndian>(self.server_id)?;
        cursor.write_u32::<LittleEndian>(self.binlog_filename.len() as u32)?;
        cursor.write(self.binlog_filename.as_bytes())?;
        cursor.write_u64::<LittleEndian>(self.binlog_position)?;
        cursor.write_u32::<LittleEndian>(encoded_set.len() as u32)?;
        cursor.write(&encoded_set)?;

        Ok(vec)
    }

    /// Encodes a GtidSet in the binary layout expected by COM_BINLOG_DUMP_GTID:
    /// n_sids, then per sid: 16-byte uuid, n_intervals, then per interval start/stop (stop exclusive).
    fn encode_gtid_set(gtid_set: &GtidSet) -> Result<Vec<u8>, io::Error> {
        let mut vec = Vec::new();
        let mut cursor = Cursor::new(&mut vec);

        cursor.write_u64::<LittleEndian>(gtid_set.uuid_sets().len() as u64)?;
        for uuid_set in gtid_set.uuid_sets().values() {
            cursor.write(&uuid_set.source_id.data)?;
            cursor.write_u64::<LittleEndian>(uuid_set.intervals.len() as u64)?;
            for interval in &uuid_set.intervals {
                cursor.write_u64::<LittleEndian>(interval.get_start())?;
                cursor.write_u64::<LittleEndian>(interval.get_end() + 1)?;
            }
        }

        Ok(vec)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn serialize_embeds_filename_and_position() {
        let cmd = DumpBinlogGtidCommand::new(1, "mysql-bin.000001".to_string(), 4);
        let gtid_set = GtidSet::new();
        let bytes = cmd.serialize(&gtid_set).unwrap();

        assert_eq!(bytes[0], CommandType::BinlogDumpGtid as u8);
        assert!(bytes.len() > 1 + 2 + 4 + 4 + cmd.binlog_filename.len() + 8 + 4);
    }
}
