use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;

use common::binlog::column::column_type::SrcColumnType;
use crate::events::protocol::table_map_event::TableMapEvent;

lazy_static! {
    /// Most-recently-seen column types per table id, keyed by `table_id`
    /// from the owning `TableMapEvent`.
    pub static ref TABLE_MAP: Arc<Mutex<HashMap<u64, Vec<SrcColumnType>>>> =
        Arc::new(Mutex::new(HashMap::new()));

    /// Raw per-column metadata bytes per table id.
    pub static ref TABLE_MAP_META: Arc<Mutex<HashMap<u64, Vec<u16>>>> =
        Arc::new(Mutex::new(HashMap::new()));

    /// Most-recently-seen `TableMapEvent` per table id, consulted by row
    /// event parsers to resolve column layout.
    pub static ref TABLE_MAP_EVENT: Arc<Mutex<HashMap<u64, TableMapEvent>>> =
        Arc::new(Mutex::new(HashMap::new()));
}
