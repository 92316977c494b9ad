pub mod gtid;
pub mod gtid_set;
pub mod interval;
pub mod uuid;
pub mod uuid_set;
