use serde::Serialize;

use crate::binlog::column::column_value::{Date, DateTime, Time};

/// Decoded column value for the result-set/row-event path that keys off
/// `ColumnType` rather than `SrcColumnType`. Same shape as
/// `crate::binlog::column::column_value::SrcColumnValue`; kept distinct
/// because the two type pairs are consumed on different decoder paths.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub enum ColumnValue {
    Null,
    TinyInt(u8),
    SmallInt(u16),
    MediumInt(u32),
    Int(u32),
    BigInt(u64),
    Float(f32),
    Double(f64),
    Decimal(String),
    String(String),
    Bit(Vec<bool>),
    Enum(u32),
    Set(u64),
    Blob(Vec<u8>),
    Year(u16),
    Date(Date),
    Time(Time),
    DateTime(DateTime),
    /// milliseconds since the unix epoch
    Timestamp(u64),
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn null_is_detected() {
        assert!(ColumnValue::Null.is_null());
        assert!(!ColumnValue::BigInt(1).is_null());
    }
}
