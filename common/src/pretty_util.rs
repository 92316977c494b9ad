use std::fmt::Debug;
use std::time::Duration;

use byte_unit::{Byte, UnitType};
use pretty_duration::pretty_duration;
use serde::Serialize;

/// Output format for [`to_string_pretty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Format {
    Json,
    Yaml,
    None,
}

/// Formats a duration the way a human would read it ("2 minutes 3 seconds").
pub fn to_duration_pretty(duration: &Duration) -> String {
    pretty_duration(duration, None)
}

/// Formats a byte count using the appropriate decimal unit (KB, MB, ...).
pub fn to_bytes_len_pretty(len: usize) -> String {
    let byte = Byte::from_u128(len as u128).unwrap();
    let adjusted_byte = byte.get_appropriate_unit(UnitType::Decimal);

    format!("{adjusted_byte:.2}")
}

pub fn to_string_pretty<T: Sized + Serialize + Debug>(f: &Format, val: &T) -> String {
    match f {
        Format::Json => serde_json::to_string_pretty(val)
            .unwrap_or_else(|e| format!("to_string_pretty json error: {e}, value: {val:?}")),
        Format::Yaml => serde_yaml::to_string(val)
            .unwrap_or_else(|e| format!("to_string_pretty yaml error: {e}, value: {val:?}")),
        Format::None => format!("{:?}", val),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bytes_len_pretty_uses_decimal_units() {
        assert_eq!(to_bytes_len_pretty(1024), "1.02 KB");
    }

    #[test]
    fn string_pretty_none_falls_back_to_debug() {
        let v = vec![1, 2, 3];
        assert_eq!(to_string_pretty(&Format::None, &v), "[1, 2, 3]");
    }
}
