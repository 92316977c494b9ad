pub mod auth_plugin_switch_command;
pub mod authenticate_command;
pub mod command;
pub mod create_db_command;
pub mod drop_db_command;
pub mod dump_binlog_command;
pub mod dump_binlog_gtid_command;
pub mod field_list_command;
pub mod init_db_command;
pub mod process_info_command;
pub mod query_command;
pub mod quit_command;
pub mod refresh_command;
pub mod register_slave_command;
pub mod shutdown_command;
pub mod ssl_request_command;
pub mod statistics_command;
pub mod stmt_close_command;
pub mod stmt_execute_command;
pub mod stmt_prepare_command;
pub mod stmt_reset_command;
