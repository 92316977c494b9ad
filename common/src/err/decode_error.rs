use std::num::ParseIntError;
use std::str::Utf8Error;
use std::string::FromUtf8Error;

use hex::FromHexError;
use thiserror::Error;

/// The single error type shared by the packet transport, command, and
/// binlog decoding layers.
#[derive(Error, Debug)]
pub enum ReError {
    /// A state the code believes can never be reached.
    #[error("bug: {0}")]
    BUG(String),

    #[error("{0}")]
    Error(String),

    #[error("sql parser error: {0}")]
    ASTParserError(String),

    /// Byte stream ended before a value could be fully decoded.
    #[error("incomplete: {0}")]
    Incomplete(Needed),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Utf8Error(#[from] Utf8Error),

    #[error(transparent)]
    FromUtf8Error(#[from] FromUtf8Error),

    #[error(transparent)]
    FromHexError(#[from] FromHexError),

    #[error(transparent)]
    ParseIntError(#[from] ParseIntError),

    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("{0}")]
    String(String),

    /// Unrecoverable parse failure: further backtracking won't help.
    #[error("parse failure: {0}")]
    Failure(String),

    #[error("config file parse error: {0}")]
    ConfigFileParseErr(String),

    #[error("query error: {0}")]
    MysqlQueryErr(String),

    /// The server refused a `SslMode::Required` connection because it
    /// was built without TLS support.
    #[error("server does not support TLS")]
    SslNotSupported,

    /// The server does not advertise `CLIENT_COMPRESS`/`CLIENT_COMPRESSION_ZSTD`.
    #[error("server does not support compression")]
    CompressionNotSupported,

    #[error("packet of {0} bytes exceeds max_allowed_packet")]
    PacketTooLarge(usize),

    #[error("packets received out of sequence order")]
    PacketsOutOfOrder,

    #[error("cursor already closed")]
    CursorClosed,

    /// An ERR_Packet returned by the server in response to a command.
    #[error("server error {code} ({state}): {message}")]
    ServerError {
        code: u16,
        state: String,
        message: String,
    },

    /// A warning surfaced via `SHOW WARNINGS` after a command that set
    /// the warning count in its OK/EOF packet.
    #[error("warning {code} ({state}): {message}")]
    Warning {
        code: u16,
        state: String,
        message: String,
    },
}

/// Detail attached to `ReError::Incomplete`.
#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum Needed {
    #[error("unknown amount of data needed")]
    Unknown,

    #[error("not enough data")]
    NoEnoughData,

    #[error("invalid utf8")]
    InvalidUtf8,

    #[error("missing null terminator")]
    MissingNull,

    #[error("invalid data: {0}")]
    InvalidData(String),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn server_error_formats_code_state_message() {
        let e = ReError::ServerError {
            code: 1045,
            state: "28000".to_string(),
            message: "Access denied".to_string(),
        };
        assert_eq!(e.to_string(), "server error 1045 (28000): Access denied");
    }

    #[test]
    fn io_error_converts_via_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let e: ReError = io_err.into();
        assert!(matches!(e, ReError::IoError(_)));
    }
}
