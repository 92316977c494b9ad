pub mod gtid_log_event;
pub mod previous_gtids_event;
