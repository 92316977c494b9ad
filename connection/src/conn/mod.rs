pub mod binlog_connection;
pub mod compressed_channel;
pub mod configure;
pub mod connection;
pub mod connection_options;
pub mod packet_channel;
pub mod query_result;
pub mod ssl_mode;
pub mod transport;
