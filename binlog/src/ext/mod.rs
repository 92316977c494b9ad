pub mod decode_error_ext;
pub mod sqlparser_ext;
