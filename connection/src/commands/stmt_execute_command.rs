use std::io;
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::bytes::ByteBuffer;
use crate::commands::command::CommandType;
use crate::stmt::param_value::ParamValue;

/// `COM_STMT_EXECUTE`: runs a previously prepared statement, binding
/// `params` in order. Always sends a fresh parameter-type array; this
/// driver never reuses a statement's previous bindings.
///
/// ref: https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_com_stmt_execute.html
pub struct StmtExecuteCommand<'a> {
    pub statement_id: u32,
    pub params: &'a [ParamValue],
}

impl<'a> StmtExecuteCommand<'a> {
    pub fn new(statement_id: u32, params: &'a [ParamValue]) -> Self {
        Self { statement_id, params }
    }

    /// Writes this command's wire encoding into a caller-owned, reusable
    /// buffer instead of allocating a fresh `Vec` per execute call.
    pub fn serialize_into(&self, buf: &mut ByteBuffer) -> Result<(), io::Error> {
        buf.clear();
        let vec = buf.inner_mut();

        vec.write_u8(CommandType::StmtExecute as u8)?;
        vec.write_u32::<LittleEndian>(self.statement_id)?;
        vec.write_u8(0)?; // CURSOR_TYPE_NO_CURSOR
        vec.write_u32::<LittleEndian>(1)?; // iteration count, always 1

        if !self.params.is_empty() {
            let bitmap = null_bitmap(self.params);
            vec.write_all(&bitmap)?;
            vec.write_u8(1)?; // new_params_bound_flag

            for param in self.params {
                let (type_byte, unsigned_flag) = param.column_type();
                vec.write_u8(type_byte)?;
                vec.write_u8(unsigned_flag)?;
            }
            for param in self.params {
                if !param.is_null() {
                    param.write_binary(vec)?;
                }
            }
        }

        Ok(())
    }

    pub fn serialize(&self) -> Result<Vec<u8>, io::Error> {
        let mut buf = ByteBuffer::new();
        self.serialize_into(&mut buf)?;
        Ok(buf.as_slice().to_vec())
    }
}

fn null_bitmap(params: &[ParamValue]) -> Vec<u8> {
    let mut bitmap = vec![0u8; (params.len() + 7) / 8];
    for (i, param) in params.iter().enumerate() {
        if param.is_null() {
            bitmap[i / 8] |= 1 << (i % 8);
        }
    }
    bitmap
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn null_params_set_their_bitmap_bit_and_write_no_body() {
        let params = vec![ParamValue::Null, ParamValue::Int(5)];
        let command = StmtExecuteCommand::new(1, &params);
        let bytes = command.serialize().unwrap();

        // command byte + statement id (4) + flags (1) + iteration count (4) = 10 header bytes
        let bitmap_byte = bytes[10];
        assert_eq!(bitmap_byte & 0b01, 1);
        assert_eq!(bitmap_byte & 0b10, 0);
    }
}
