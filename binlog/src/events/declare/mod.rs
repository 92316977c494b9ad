pub mod rows_log_event;
