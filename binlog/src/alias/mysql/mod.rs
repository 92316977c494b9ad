pub mod events;
pub mod gtid;
