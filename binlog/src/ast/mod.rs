pub mod query_parser;
