pub mod binlog_decoder;
pub mod bytes_binlog_reader;
pub mod file_binlog_reader;

pub mod event_decoder;
pub mod event_decoder_impl;
mod event_parser_dispatcher;

pub mod binlog_reader_wrapper;
pub mod concrete_decoders;
pub mod event_decoder_registry;
pub mod event_statistics;
pub mod log_decoder;
pub mod mysql8_decoders;
pub mod table_cache_manager;
