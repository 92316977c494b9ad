pub mod default_charset;
pub mod gtid_manager;
pub mod metadata_manager;
pub mod metadata_type;
pub mod sync_manager;
pub mod table_cache;
pub mod table_metadata;
