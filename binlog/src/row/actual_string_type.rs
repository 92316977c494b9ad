use common::column::column_type::ColumnType;

/// `TYPE_STRING` (254) is overloaded: ENUM, SET and fixed-length CHAR columns
/// are all written to the table map with this nominal type, and the real
/// type is packed into the high byte of `metadata`. Resolve it in place so
/// callers can treat `column_type`/`metadata` uniformly afterwards.
pub fn get_actual_string_type(column_type: &mut u8, metadata: &mut u16) {
    if *column_type != ColumnType::String as u8 || *metadata < 256 {
        return;
    }

    let real_type = (*metadata >> 8) as u8;
    if real_type & 0x30 != 0x30 {
        *column_type = real_type | 0x30;
        return;
    }

    match ColumnType::try_from(real_type) {
        Ok(ColumnType::Enum) | Ok(ColumnType::Set) | Ok(ColumnType::String) => {
            *column_type = real_type;
        }
        _ => {}
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn leaves_non_string_types_untouched() {
        let mut column_type = ColumnType::Long as u8;
        let mut metadata = 0u16;
        get_actual_string_type(&mut column_type, &mut metadata);
        assert_eq!(column_type, ColumnType::Long as u8);
    }

    #[test]
    fn resolves_enum_real_type() {
        let mut column_type = ColumnType::String as u8;
        let mut metadata = (ColumnType::Enum as u16) << 8 | 1;
        get_actual_string_type(&mut column_type, &mut metadata);
        assert_eq!(column_type, ColumnType::Enum as u8);
    }
}
