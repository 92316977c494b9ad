use std::fmt::{Display, Formatter};

use serde::Serialize;

use common::err::CResult;
use common::err::decode_error::ReError;

/// A MySQL server UUID (SID), as used to identify the source of a GTID.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Uuid {
    /// canonical hyphenated textual form, e.g. `24bc7850-2c16-11e6-a073-0242ac110001`
    pub uuid: String,

    /// 16-byte binary form as it appears on the wire in a
    /// `COM_BINLOG_DUMP_GTID` payload.
    pub data: [u8; 16],
}

impl Uuid {
    pub fn parse(uuid: String) -> CResult<Uuid> {
        let hex: String = uuid.chars().filter(|c| *c != '-').collect();
        if hex.len() != 32 {
            return Err(ReError::String(format!("invalid uuid: {}", uuid)));
        }

        let mut data = [0u8; 16];
        for i in 0..16 {
            data[i] = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|e| ReError::String(format!("invalid uuid byte in {}: {}", uuid, e)))?;
        }

        Ok(Uuid { uuid, data })
    }

    pub fn from_bytes(data: [u8; 16]) -> Uuid {
        let hex = data.iter().map(|b| format!("{:02x}", b)).collect::<String>();
        let uuid = format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        );
        Uuid { uuid, data }
    }
}

impl Display for Uuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_round_trips_through_bytes() {
        let uuid = Uuid::parse("24bc7850-2c16-11e6-a073-0242ac110001".to_string()).unwrap();
        let back = Uuid::from_bytes(uuid.data);
        assert_eq!(back.uuid, uuid.uuid);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(Uuid::parse("not-a-uuid".to_string()).is_err());
    }
}
