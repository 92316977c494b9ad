use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use binlog::utils::read_len_enc_str_with_cursor;
use common::err::decode_error::ReError;
use common::err::CResult;

use crate::declar::column_types::ColumnType;
use crate::packet::result_set_column_packet::ResultSetColumnPacket;

/// Decodes one `COM_STMT_EXECUTE` result row: a leading `0x00` byte, a NULL
/// bitmap (bit `i + 2` for column `i`), then one binary-encoded value per
/// non-null column, in column order.
///
/// ref: https://dev.mysql.com/doc/dev/mysql-server/latest/page_protocol_binary_resultset.html
pub fn decode_binary_row(
    packet: &[u8],
    columns: &[ResultSetColumnPacket],
) -> CResult<Vec<Option<String>>> {
    let mut cursor = Cursor::new(packet);
    cursor.read_u8()?; // packet header, always 0x00 for a row

    let bitmap_len = (columns.len() + 7 + 2) / 8;
    let mut bitmap = vec![0u8; bitmap_len];
    cursor.read_exact(&mut bitmap)?;

    let mut cells = Vec::with_capacity(columns.len());
    for (i, column) in columns.iter().enumerate() {
        let bit_index = i + 2;
        let is_null = (bitmap[bit_index / 8] >> (bit_index % 8)) & 1 == 1;
        if is_null {
            cells.push(None);
        } else {
            cells.push(Some(decode_value(&mut cursor, column.column_type)?));
        }
    }
    Ok(cells)
}

fn decode_value(cursor: &mut Cursor<&[u8]>, column_type: u8) -> CResult<String> {
    match column_type {
        ColumnType::TINY => Ok(cursor.read_i8()?.to_string()),
        ColumnType::SHORT | ColumnType::YEAR => Ok(cursor.read_i16::<LittleEndian>()?.to_string()),
        ColumnType::LONG | ColumnType::INT24 => Ok(cursor.read_i32::<LittleEndian>()?.to_string()),
        ColumnType::LONGLONG => Ok(cursor.read_i64::<LittleEndian>()?.to_string()),
        ColumnType::FLOAT => Ok(cursor.read_f32::<LittleEndian>()?.to_string()),
        ColumnType::DOUBLE => Ok(cursor.read_f64::<LittleEndian>()?.to_string()),
        ColumnType::VARCHAR
        | ColumnType::VAR_STRING
        | ColumnType::STRING
        | ColumnType::BLOB
        | ColumnType::TINY_BLOB
        | ColumnType::MEDIUM_BLOB
        | ColumnType::LONG_BLOB
        | ColumnType::NEWDECIMAL
        | ColumnType::DECIMAL
        | ColumnType::ENUM
        | ColumnType::SET
        | ColumnType::BIT
        | ColumnType::GEOMETRY => read_len_enc_str_with_cursor(cursor),
        ColumnType::DATE | ColumnType::DATETIME | ColumnType::TIMESTAMP => decode_datetime(cursor),
        ColumnType::TIME => decode_time(cursor),
        other => Err(ReError::String(format!(
            "unsupported binary column type {:#04x}",
            other
        ))),
    }
}

fn decode_datetime(cursor: &mut Cursor<&[u8]>) -> CResult<String> {
    let len = cursor.read_u8()?;
    if len == 0 {
        return Ok("0000-00-00 00:00:00".to_string());
    }

    let year = cursor.read_u16::<LittleEndian>()?;
    let month = cursor.read_u8()?;
    let day = cursor.read_u8()?;

    let (hour, minute, second, micro) = if len >= 7 {
        let hour = cursor.read_u8()?;
        let minute = cursor.read_u8()?;
        let second = cursor.read_u8()?;
        let micro = if len >= 11 {
            cursor.read_u32::<LittleEndian>()?
        } else {
            0
        };
        (hour, minute, second, micro)
    } else {
        (0, 0, 0, 0)
    };

    if micro > 0 {
        Ok(format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
            year, month, day, hour, minute, second, micro
        ))
    } else {
        Ok(format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            year, month, day, hour, minute, second
        ))
    }
}

fn decode_time(cursor: &mut Cursor<&[u8]>) -> CResult<String> {
    let len = cursor.read_u8()?;
    if len == 0 {
        return Ok("00:00:00".to_string());
    }

    let is_negative = cursor.read_u8()? != 0;
    let days = cursor.read_u32::<LittleEndian>()?;
    let hours = cursor.read_u8()?;
    let minutes = cursor.read_u8()?;
    let seconds = cursor.read_u8()?;
    let micro = if len >= 12 {
        cursor.read_u32::<LittleEndian>()?
    } else {
        0
    };

    let total_hours = days as u64 * 24 + hours as u64;
    let sign = if is_negative { "-" } else { "" };
    if micro > 0 {
        Ok(format!(
            "{}{:02}:{:02}:{:02}.{:06}",
            sign, total_hours, minutes, seconds, micro
        ))
    } else {
        Ok(format!("{}{:02}:{:02}:{:02}", sign, total_hours, minutes, seconds))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn column(column_type: u8) -> ResultSetColumnPacket {
        ResultSetColumnPacket {
            catalog: String::new(),
            schema: String::new(),
            table: String::new(),
            org_table: String::new(),
            name: String::new(),
            org_name: String::new(),
            next_length: 0,
            character_set: 0,
            column_length: 0,
            column_type,
            flags: 0,
            decimals: 0,
            __filler: 0,
        }
    }

    #[test]
    fn decodes_a_row_with_a_null_and_an_int() {
        let columns = vec![column(ColumnType::LONG), column(ColumnType::VAR_STRING)];
        let mut packet = vec![0x00, 0b0000_1000]; // bit 3 (column 1, index+2) set -> NULL
        packet.extend_from_slice(&42i32.to_le_bytes());

        let row = decode_binary_row(&packet, &columns).unwrap();
        assert_eq!(row, vec![Some("42".to_string()), None]);
    }
}
