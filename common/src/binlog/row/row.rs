use std::fmt;
use std::sync::Arc;

use crate::binlog::column::column::SrcColumn;
use crate::binlog::column::column_value::SrcColumnValue;

/// A decoded result-set row or binlog row-event row, paired with the
/// column metadata needed to interpret each value.
#[derive(Clone)]
pub struct Row {
    values: Vec<Option<SrcColumnValue>>,
    columns: Arc<[SrcColumn]>,
}

impl Row {
    pub fn new_row(values: Vec<Option<SrcColumnValue>>, columns: Arc<[SrcColumn]>) -> Self {
        Row { values, columns }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> Arc<[SrcColumn]> {
        self.columns.clone()
    }

    pub fn columns_ref(&self) -> &[SrcColumn] {
        &self.columns
    }

    pub fn values(&self) -> &[Option<SrcColumnValue>] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&SrcColumnValue> {
        self.values.get(index).and_then(|v| v.as_ref())
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_map();
        for (column, value) in self.columns.iter().zip(self.values.iter()) {
            debug.entry(&column.name_str(), value);
        }
        debug.finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::binlog::column::column_type::SrcColumnType;

    #[test]
    fn len_and_is_empty_track_values() {
        let columns: Arc<[SrcColumn]> =
            Arc::from(vec![SrcColumn::new(SrcColumnType::LongLong).with_name(b"id")]);
        let row = Row::new_row(vec![Some(SrcColumnValue::BigInt(7))], columns);
        assert_eq!(row.len(), 1);
        assert!(!row.is_empty());
        assert_eq!(row.get(0), Some(&SrcColumnValue::BigInt(7)));
    }
}
