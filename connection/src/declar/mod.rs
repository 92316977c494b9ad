pub mod auth_plugin_names;
pub mod capability_flags;
pub mod column_types;
pub mod refresh_flags;
pub mod status_flags;
