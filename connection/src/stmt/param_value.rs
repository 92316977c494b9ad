use std::io;
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::declar::column_types::ColumnType;

/// A value bound to a `?` placeholder in a prepared statement, encoded
/// in `COM_STMT_EXECUTE`'s binary parameter format.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Int(i64),
    UInt(u64),
    Double(f64),
    Bytes(Vec<u8>),
    Str(String),
}

impl ParamValue {
    /// The `(type, unsigned_flag)` pair written in `COM_STMT_EXECUTE`'s
    /// parameter type array; `Null` has no on-wire type byte of its own,
    /// it is only recorded through the NULL bitmap.
    pub fn column_type(&self) -> (u8, u8) {
        match self {
            ParamValue::Null => (ColumnType::NULL, 0),
            ParamValue::Int(_) => (ColumnType::LONGLONG, 0),
            ParamValue::UInt(_) => (ColumnType::LONGLONG, 0x80),
            ParamValue::Double(_) => (ColumnType::DOUBLE, 0),
            ParamValue::Bytes(_) | ParamValue::Str(_) => (ColumnType::VAR_STRING, 0),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }

    /// Writes this value's binary-protocol body. Callers skip this entirely
    /// for `Null` values, which are represented solely via the NULL bitmap.
    pub fn write_binary(&self, out: &mut Vec<u8>) -> io::Result<()> {
        match self {
            ParamValue::Null => Ok(()),
            ParamValue::Int(v) => out.write_i64::<LittleEndian>(*v),
            ParamValue::UInt(v) => out.write_u64::<LittleEndian>(*v),
            ParamValue::Double(v) => out.write_f64::<LittleEndian>(*v),
            ParamValue::Bytes(bytes) => write_len_enc_bytes(out, bytes),
            ParamValue::Str(s) => write_len_enc_bytes(out, s.as_bytes()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::UInt(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Double(value)
    }
}

fn write_len_enc_bytes(out: &mut Vec<u8>, bytes: &[u8]) -> io::Result<()> {
    write_len_enc_int(out, bytes.len() as u64)?;
    out.write_all(bytes)
}

fn write_len_enc_int(out: &mut Vec<u8>, value: u64) -> io::Result<()> {
    if value < 251 {
        out.write_u8(value as u8)
    } else if value < 0x1_0000 {
        out.write_u8(0xfc)?;
        out.write_u16::<LittleEndian>(value as u16)
    } else if value < 0x100_0000 {
        out.write_u8(0xfd)?;
        out.write_u24::<LittleEndian>(value as u32)
    } else {
        out.write_u8(0xfe)?;
        out.write_u64::<LittleEndian>(value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn short_strings_use_single_byte_length_prefix() {
        let mut out = Vec::new();
        ParamValue::Str("hi".to_string()).write_binary(&mut out).unwrap();
        assert_eq!(out, vec![2, b'h', b'i']);
    }

    #[test]
    fn unsigned_ints_set_the_unsigned_flag() {
        assert_eq!(ParamValue::UInt(1).column_type(), (ColumnType::LONGLONG, 0x80));
        assert_eq!(ParamValue::Int(1).column_type(), (ColumnType::LONGLONG, 0));
    }
}
