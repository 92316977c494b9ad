pub mod dump_table_map_event;
pub mod dump_write_rows_event;
