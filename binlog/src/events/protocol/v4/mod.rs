pub mod start_v3_event;
