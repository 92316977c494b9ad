use crate::packet::result_set_column_packet::ResultSetColumnPacket;

/// A server-side prepared statement handle returned by `COM_STMT_PREPARE`.
/// Kept around across `Connection::execute` calls until `Connection::close_stmt`
/// sends `COM_STMT_CLOSE` and the server frees it.
#[derive(Debug, Clone)]
pub struct Statement {
    pub statement_id: u32,
    pub param_count: u16,
    pub columns: Vec<ResultSetColumnPacket>,
}

impl Statement {
    pub fn new(statement_id: u32, param_count: u16, columns: Vec<ResultSetColumnPacket>) -> Self {
        Self {
            statement_id,
            param_count,
            columns,
        }
    }
}
