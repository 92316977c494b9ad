use crate::binlog::column::column_type::SrcColumnType;

/// Column metadata as returned in a `ColumnDefinition41` packet, or
/// synthesized from a `TABLE_MAP_EVENT` for a binlog row.
#[derive(Debug, Clone, PartialEq)]
pub struct SrcColumn {
    column_type: SrcColumnType,

    catalog: Vec<u8>,
    schema: Vec<u8>,
    table: Vec<u8>,
    org_table: Vec<u8>,
    name: Vec<u8>,
    org_name: Vec<u8>,

    character_set: u16,
    column_length: u32,
    flags: u16,
    decimals: u8,

    /// default value, present only when the column came from `SHOW
    /// COLUMNS`-style metadata rather than a result-set packet
    default_value: Option<Vec<u8>>,
}

impl SrcColumn {
    pub fn new(column_type: SrcColumnType) -> Self {
        SrcColumn {
            column_type,
            catalog: Vec::new(),
            schema: Vec::new(),
            table: Vec::new(),
            org_table: Vec::new(),
            name: Vec::new(),
            org_name: Vec::new(),
            character_set: 0,
            column_length: 0,
            flags: 0,
            decimals: 0,
            default_value: None,
        }
    }

    pub fn with_catalog(mut self, catalog: &[u8]) -> Self {
        self.catalog = catalog.to_vec();
        self
    }

    pub fn with_schema(mut self, schema: &[u8]) -> Self {
        self.schema = schema.to_vec();
        self
    }

    pub fn with_table(mut self, table: &[u8]) -> Self {
        self.table = table.to_vec();
        self
    }

    pub fn with_org_table(mut self, org_table: &[u8]) -> Self {
        self.org_table = org_table.to_vec();
        self
    }

    pub fn with_name(mut self, name: &[u8]) -> Self {
        self.name = name.to_vec();
        self
    }

    pub fn with_org_name(mut self, org_name: &[u8]) -> Self {
        self.org_name = org_name.to_vec();
        self
    }

    pub fn with_character_set(mut self, character_set: u16) -> Self {
        self.character_set = character_set;
        self
    }

    pub fn with_column_length(mut self, column_length: u32) -> Self {
        self.column_length = column_length;
        self
    }

    pub fn with_flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn with_default_value(mut self, default_value: Vec<u8>) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn column_type(&self) -> SrcColumnType {
        self.column_type
    }

    pub fn name_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    pub fn table_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.table)
    }

    pub fn default_value(&self) -> Option<&[u8]> {
        self.default_value.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_round_trips_name() {
        let column = SrcColumn::new(SrcColumnType::VarString).with_name(b"id");
        assert_eq!(column.name_str(), "id");
    }
}
