use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::alias::mysql::gtid::uuid::Uuid;

/// A single GTID: the source server that committed a transaction, paired
/// with the sequence number it was assigned on that server.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Gtid {
    pub source_id: Uuid,
    pub transaction_id: u64,
}

impl Gtid {
    pub fn new(source_id: Uuid, transaction_id: u64) -> Self {
        Gtid {
            source_id,
            transaction_id,
        }
    }
}

impl Display for Gtid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.source_id, self.transaction_id)
    }
}
