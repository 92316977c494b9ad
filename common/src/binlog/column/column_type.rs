pub use crate::column::column_type::ColumnType as SrcColumnType;
