#![allow(dead_code)]

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use nom::{
    bytes::complete::{take, take_till},
    combinator::map,
    number::complete::{le_u16, le_u32, le_u64, le_u8},
    IResult,
};

use common::err::CResult;

/// extract n(n <= len(input)) bytes string
/// 实现思路：
/// 由于可能存在多个终止符，首先需要找到第一个终止符位置，然后使用 String::from_utf8_lossy 将之前的字符转换为字符串。
pub fn extract_string(input: &[u8]) -> String {
    let null_end = input
        .iter()
        .position(|&c| c == b'\0')
        .unwrap_or(input.len());
    String::from_utf8_lossy(&input[0..null_end]).to_string()
}

/// parse fixed len int
///
/// ref: https://dev.mysql.com/doc/internals/en/integer.html#fixed-length-integer
pub fn int_fixed<'a>(input: &'a [u8], len: u8) -> IResult<&'a [u8], u64> {
    match len {
        1 => map(le_u8, |v| v as u64)(input),
        2 => map(le_u16, |v| v as u64)(input),
        3 | 6 => map(take(3usize), |s: &[u8]| {
            let mut filled = s.to_vec();
            if len == 3 {
                filled.extend(vec![0, 0, 0, 0, 0]);
            } else {
                filled.extend(vec![0, 0]);
            }
            pu64(&filled).unwrap().1
        })(input),
        4 => map(le_u32, |v| v as u64)(input),
        8 => le_u64(input),
        _ => unreachable!(),
    }
}

/// parse len encoded int, return (used_bytes, value).
///
/// ref: https://dev.mysql.com/doc/internals/en/integer.html#packet-Protocol::LengthEncodedInteger
pub fn int_by_length_encoded<'a>(input: &'a [u8]) -> IResult<&'a [u8], (usize, u64)> {
    match input[0] {
        // 0 -- 250
        0..=0xfa => map(le_u8, |num: u8| (1, num as u64))(input),
        // 251， 252
        0xfb | 0xfc => {
            let (i, lead) = take(1usize)(input)?;
            map(le_u16, |num: u16| (3, num as u64))(i)
        }
        // 253
        0xfd => {
            let (i, lead) = take(1usize)(input)?;
            let (i, v) = map(take(3usize), |s: &[u8]| {
                let mut raw = s.to_vec();
                raw.push(0);
                raw
            })(i)?;
            let (_, num) = pu32(&v).unwrap();
            Ok((i, (4, num as u64)))
        }
        // 254
        0xfe => {
            let (i, _) = take(1usize)(input)?;
            map(le_u64, |v: u64| (9, v))(i)
        }
        // 255
        0xff => unreachable!(),
    }
}

/// nom-combinator twin of [`read_len_enc_num`], for code that parses a
/// whole event body as a `&[u8]` slice rather than through a `Cursor`.
pub fn read_len_enc_num_nom<'a>(input: &'a [u8]) -> IResult<&'a [u8], (usize, u64)> {
    int_by_length_encoded(input)
}

/// parse length encoded string
///
/// ref: https://dev.mysql.com/doc/internals/en/string.html#packet-Protocol::LengthEncodedString
pub fn string_by_length_encoded<'a>(input: &'a [u8]) -> IResult<&'a [u8], String> {
    let (i, (_, str_len)) = int_by_length_encoded(input)?;
    map(take(str_len), |s: &[u8]| {
        String::from_utf8_lossy(s).to_string()
    })(i)
}

/// parse 'null terminated string', consume null byte
///
/// ref: https://dev.mysql.com/doc/internals/en/string.html#packet-Protocol::NulTerminatedString
pub fn string_by_nul_terminated(input: &[u8]) -> IResult<&[u8], String> {
    let (i, ret) = map(take_till(|c: u8| c == 0x00), |s| {
        String::from_utf8_lossy(s).to_string()
    })(input)?;
    let (i, _) = take(1usize)(i)?;
    Ok((i, ret))
}

/// extract len bytes string
///
/// ref: https://dev.mysql.com/doc/internals/en/string.html#packet-Protocol::VariableLengthString
pub fn string_by_variable_len(input: &[u8], len: usize) -> String {
    if input.len() <= len {
        String::from_utf8_lossy(&input).to_string()
    } else {
        String::from_utf8_lossy(&input[0..len]).to_string()
    }
}

/// 定长编码取值, parse fixed len string。
/// 第一个byte申明长度len，后续len个byte为存储的值
///
/// ref: https://dev.mysql.com/doc/internals/en/string.html#packet-Protocol::FixedLengthString
pub fn string_by_fixed_len(input: &[u8]) -> IResult<&[u8], (u8, String)> {
    let (i, len) = le_u8(input)?;
    map(take(len), move |s: &[u8]| {
        (len, String::from_utf8_lossy(s).to_string())
    })(i)
}

pub fn pu32(input: &[u8]) -> IResult<&[u8], u32> {
    le_u32(input)
}

pub fn pu64(input: &[u8]) -> IResult<&[u8], u64> {
    le_u64(input)
}

/// parse len encoded int from a cursor, return (used_bytes, value).
///
/// ref: https://dev.mysql.com/doc/internals/en/integer.html#packet-Protocol::LengthEncodedInteger
pub fn read_len_enc_num(cursor: &mut Cursor<&[u8]>) -> CResult<(usize, u64)> {
    let lead = cursor.read_u8()?;
    match lead {
        0..=0xfa => Ok((1, lead as u64)),
        0xfb => Ok((1, 0)),
        0xfc => Ok((3, cursor.read_u16::<LittleEndian>()? as u64)),
        0xfd => {
            let mut buf = [0u8; 4];
            cursor.read_exact(&mut buf[0..3])?;
            Ok((4, u32::from_le_bytes(buf) as u64))
        }
        0xfe => Ok((9, cursor.read_u64::<LittleEndian>()?)),
        0xff => Err(common::err::decode_error::ReError::String(
            "length encoded integer prefix 0xff is reserved for error packets".to_string(),
        )),
    }
}

/// Alias kept for call sites that spell out the cursor in the name.
pub fn read_len_enc_num_with_cursor(cursor: &mut Cursor<&[u8]>) -> CResult<(usize, u64)> {
    read_len_enc_num(cursor)
}

/// Read a NUL-terminated string, consuming the terminator.
pub fn read_null_term_string_with_cursor(cursor: &mut Cursor<&[u8]>) -> CResult<String> {
    let mut buf = Vec::new();
    loop {
        let b = cursor.read_u8()?;
        if b == 0 {
            break;
        }
        buf.push(b);
    }
    Ok(String::from_utf8_lossy(&buf).to_string())
}

/// Read a length-encoded string. A leading `0xfb` (NULL marker) is treated
/// as an empty string; use [`read_len_enc_str_with_cursor_allow_null`] when
/// NULL must be distinguished from an empty value.
pub fn read_len_enc_str_with_cursor(cursor: &mut Cursor<&[u8]>) -> CResult<String> {
    Ok(read_len_enc_str_with_cursor_allow_null(cursor)?.unwrap_or_default())
}

/// Read a length-encoded string that may be SQL NULL (`0xfb` prefix).
pub fn read_len_enc_str_with_cursor_allow_null(
    cursor: &mut Cursor<&[u8]>,
) -> CResult<Option<String>> {
    let pos = cursor.position();
    let lead = cursor.read_u8()?;
    if lead == 0xfb {
        return Ok(None);
    }
    cursor.set_position(pos);
    let (_, len) = read_len_enc_num(cursor)?;
    let mut buf = vec![0u8; len as usize];
    cursor.read_exact(&mut buf)?;
    Ok(Some(String::from_utf8_lossy(&buf).to_string()))
}

/// Reads `len` raw bytes from the cursor and decodes them lossily as UTF-8.
pub fn read_string(cursor: &mut Cursor<&[u8]>, len: usize) -> CResult<String> {
    let mut buf = vec![0u8; len];
    cursor.read_exact(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).to_string())
}

/// Reads a little-endian null-bitmap covering `bits_number` columns, as used
/// by row image cell presence/null bitmaps. Bit order within each byte is
/// least-significant-bit first, per the MySQL row event format.
pub fn read_bitmap_little_endian(cursor: &mut Cursor<&[u8]>, bits_number: usize) -> CResult<Vec<bool>> {
    let mask_len = (bits_number + 7) / 8;
    let mut bytes = vec![0u8; mask_len];
    cursor.read_exact(&mut bytes)?;

    let mut bits = Vec::with_capacity(bits_number);
    for index in 0..bits_number {
        let byte = bytes[index >> 3];
        bits.push((byte >> (index & 7)) & 1 == 1);
    }
    Ok(bits)
}

/// Expands a single byte into its 8 bits, least-significant-bit first.
pub fn u8_to_bool(byte: u8) -> Vec<bool> {
    (0..8).map(|i| (byte >> i) & 1 == 1).collect()
}

/// Reads the bitmap backing a MySQL `BIT` column cell: `bits_number` bits
/// packed into `ceil(bits_number/8)` bytes, read in stream order with each
/// byte's bits taken least-significant-bit first.
pub fn read_bitmap_big_endian(cursor: &mut Cursor<&[u8]>, bits_number: usize) -> CResult<Vec<bool>> {
    read_bitmap_little_endian(cursor, bits_number)
}

/// Number of set bits in a little-endian bitmap covering `bits_number` bits.
pub fn read_bitmap_little_endian_bits(cursor: &mut Cursor<&[u8]>, bits_number: usize) -> CResult<usize> {
    Ok(read_bitmap_little_endian(cursor, bits_number)?
        .into_iter()
        .filter(|b| *b)
        .count())
}

/// Parses a `BIT(M)` cell. `metadata` packs the whole-byte count in the high
/// byte and the bits used in the final byte in the low byte.
pub fn parse_bit(cursor: &mut Cursor<&[u8]>, metadata: u16) -> CResult<Vec<bool>> {
    let length = (metadata >> 8) * 8 + (metadata & 0xff);
    read_bitmap_big_endian(cursor, length as usize)
}

fn blob_length_bytes(metadata: u16) -> usize {
    match metadata {
        1..=255 => 1,
        256..=65535 => 2,
        65536..=16777215 => 3,
        _ => 4,
    }
}

/// Parses a `BLOB`/`TEXT`/`JSON`/`GEOMETRY` cell: an N-byte little-endian
/// length prefix (N determined by `metadata`) followed by that many bytes.
pub fn parse_blob(cursor: &mut Cursor<&[u8]>, metadata: u16) -> CResult<Vec<u8>> {
    let len_bytes = blob_length_bytes(metadata.max(1));
    let mut len_buf = [0u8; 4];
    cursor.read_exact(&mut len_buf[..len_bytes])?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    cursor.read_exact(&mut buf)?;
    Ok(buf)
}

/// Parses a `CHAR`/`VARCHAR` cell: a 1- or 2-byte little-endian length
/// prefix (2 bytes when the declared max length needs it) followed by the
/// UTF-8 payload.
pub fn parse_string(cursor: &mut Cursor<&[u8]>, metadata: u16) -> CResult<String> {
    let len = if metadata > 255 {
        cursor.read_u16::<LittleEndian>()? as usize
    } else {
        cursor.read_u8()? as usize
    };
    read_string(cursor, len)
}

/// Parses a legacy 1-byte `YEAR` cell (stored as an offset from 1900).
pub fn parse_year(cursor: &mut Cursor<&[u8]>, _metadata: u16) -> CResult<u16> {
    Ok(1900 + cursor.read_u8()? as u16)
}

/// Parses a legacy 3-byte packed `DATE` cell.
pub fn parse_date(cursor: &mut Cursor<&[u8]>, _metadata: u16) -> CResult<common::binlog::column::column_value::Date> {
    let mut buf = [0u8; 4];
    cursor.read_exact(&mut buf[..3])?;
    let value = u32::from_le_bytes(buf);

    Ok(common::binlog::column::column_value::Date {
        year: (value >> 9) as u16,
        month: ((value >> 5) & 0xf) as u8,
        day: (value & 0x1f) as u8,
    })
}

/// Parses a legacy 3-byte packed `TIME` cell (no fractional seconds).
pub fn parse_time(cursor: &mut Cursor<&[u8]>, _metadata: u16) -> CResult<common::binlog::column::column_value::Time> {
    let mut buf = [0u8; 4];
    cursor.read_exact(&mut buf[..3])?;
    let value = i32::from_le_bytes(buf);

    Ok(common::binlog::column::column_value::Time {
        hour: (value / 10000) as i16,
        minute: ((value / 100) % 100) as u8,
        second: (value % 100) as u8,
        millis: 0,
    })
}

/// Parses a legacy 4-byte little-endian unix-epoch-seconds `TIMESTAMP` cell,
/// returned as milliseconds since the epoch.
pub fn parse_timestamp(cursor: &mut Cursor<&[u8]>, _metadata: u16) -> CResult<u64> {
    Ok(cursor.read_u32::<LittleEndian>()? as u64 * 1000)
}

/// Parses a legacy 8-byte packed `DATETIME` cell (`YYYYMMDDHHMMSS` encoded
/// as a single little-endian integer).
pub fn parse_date_time(cursor: &mut Cursor<&[u8]>, _metadata: u16) -> CResult<common::binlog::column::column_value::DateTime> {
    let value = cursor.read_u64::<LittleEndian>()?;
    let date_part = value / 1_000_000;
    let time_part = value % 1_000_000;

    Ok(common::binlog::column::column_value::DateTime {
        year: (date_part / 10000) as u16,
        month: ((date_part / 100) % 100) as u8,
        day: (date_part % 100) as u8,
        hour: (time_part / 10000) as u8,
        minute: ((time_part / 100) % 100) as u8,
        second: (time_part % 100) as u8,
        millis: 0,
    })
}

fn fsp_byte_len(fsp: u16) -> usize {
    ((fsp + 1) / 2) as usize
}

/// Parses a MySQL 5.6+ `TIME2(fsp)` cell: a 3-byte big-endian packed value
/// (sign bit inverted) plus `ceil(fsp/2)` fractional-second bytes.
pub fn parse_time2(cursor: &mut Cursor<&[u8]>, metadata: u16) -> CResult<common::binlog::column::column_value::Time> {
    let mut buf = [0u8; 3];
    cursor.read_exact(&mut buf)?;
    let raw = ((buf[0] as u32) << 16) | ((buf[1] as u32) << 8) | buf[2] as u32;
    let signed = (raw ^ 0x80_0000) as i32 - 0x80_0000;

    let negative = signed < 0;
    let magnitude = signed.unsigned_abs();
    let hour = (magnitude >> 12) & 0x3ff;
    let minute = (magnitude >> 6) & 0x3f;
    let second = magnitude & 0x3f;

    let fsp = metadata;
    let frac_bytes = fsp_byte_len(fsp);
    let mut millis = 0u32;
    if frac_bytes > 0 {
        let mut frac_buf = [0u8; 3];
        cursor.read_exact(&mut frac_buf[..frac_bytes])?;
        let frac_raw = frac_buf
            .iter()
            .take(frac_bytes)
            .fold(0u32, |acc, b| (acc << 8) | *b as u32);
        millis = frac_raw / 10u32.pow((frac_bytes * 2).saturating_sub(3) as u32).max(1);
    }

    Ok(common::binlog::column::column_value::Time {
        hour: if negative { -(hour as i16) } else { hour as i16 },
        minute: minute as u8,
        second: second as u8,
        millis,
    })
}

/// Parses a MySQL 5.6+ `TIMESTAMP2(fsp)` cell: a 4-byte big-endian
/// unix-epoch-seconds value plus `ceil(fsp/2)` fractional-second bytes.
pub fn parse_timestamp2(cursor: &mut Cursor<&[u8]>, metadata: u16) -> CResult<u64> {
    let mut buf = [0u8; 4];
    cursor.read_exact(&mut buf)?;
    let seconds = u32::from_be_bytes(buf) as u64;

    let frac_bytes = fsp_byte_len(metadata);
    let mut millis = 0u64;
    if frac_bytes > 0 {
        let mut frac_buf = [0u8; 3];
        cursor.read_exact(&mut frac_buf[..frac_bytes])?;
        let frac_raw = frac_buf
            .iter()
            .take(frac_bytes)
            .fold(0u64, |acc, b| (acc << 8) | *b as u64);
        millis = frac_raw / 10u64.pow((frac_bytes * 2).saturating_sub(3) as u32).max(1);
    }

    Ok(seconds * 1000 + millis)
}

/// Parses a MySQL 5.6+ `DATETIME2(fsp)` cell: a 5-byte big-endian packed
/// value (sign bit inverted) plus `ceil(fsp/2)` fractional-second bytes.
pub fn parse_date_time2(cursor: &mut Cursor<&[u8]>, metadata: u16) -> CResult<common::binlog::column::column_value::DateTime> {
    let mut buf = [0u8; 5];
    cursor.read_exact(&mut buf)?;
    let raw = buf
        .iter()
        .fold(0u64, |acc, b| (acc << 8) | *b as u64);
    let signed = (raw ^ (1u64 << 39)) as i64 - (1i64 << 39);

    let year_month = (signed >> 22) & 0x1ffff;
    let year = year_month / 13;
    let month = year_month % 13;
    let day = (signed >> 17) & 0x1f;
    let hour = (signed >> 12) & 0x1f;
    let minute = (signed >> 6) & 0x3f;
    let second = signed & 0x3f;

    let frac_bytes = fsp_byte_len(metadata);
    let mut millis = 0u32;
    if frac_bytes > 0 {
        let mut frac_buf = [0u8; 3];
        cursor.read_exact(&mut frac_buf[..frac_bytes])?;
        let frac_raw = frac_buf
            .iter()
            .take(frac_bytes)
            .fold(0u32, |acc, b| (acc << 8) | *b as u32);
        millis = frac_raw / 10u32.pow((frac_bytes * 2).saturating_sub(3) as u32).max(1);
    }

    Ok(common::binlog::column::column_value::DateTime {
        year: year as u16,
        month: month as u8,
        day: day as u8,
        hour: hour as u8,
        minute: minute as u8,
        second: second as u8,
        millis,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test() {
        assert_eq!(1, 1);
    }

    #[test]
    fn len_enc_num_small_value_is_single_byte() {
        let data = [0x05u8];
        let mut cursor = Cursor::new(&data[..]);
        let (used, value) = read_len_enc_num(&mut cursor).unwrap();
        assert_eq!(used, 1);
        assert_eq!(value, 5);
    }

    #[test]
    fn len_enc_str_allow_null_detects_null_marker() {
        let data = [0xfbu8];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(read_len_enc_str_with_cursor_allow_null(&mut cursor).unwrap(), None);
    }

    #[test]
    fn len_enc_str_reads_prefixed_bytes() {
        let data = [0x03u8, b'a', b'b', b'c'];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(read_len_enc_str_with_cursor(&mut cursor).unwrap(), "abc");
    }

    #[test]
    fn null_term_string_stops_at_terminator() {
        let data = [b'h', b'i', 0x00, b'x'];
        let mut cursor = Cursor::new(&data[..]);
        assert_eq!(read_null_term_string_with_cursor(&mut cursor).unwrap(), "hi");
    }
}