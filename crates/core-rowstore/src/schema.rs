use std::collections::HashMap;

/// Column layout shared by every row of one result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
    field_map: HashMap<String, usize>,
}

impl Schema {
    /// Builds a schema from column names in ordinal order.
    /// A repeated name keeps the ordinal of its first occurrence.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut field_map = HashMap::with_capacity(columns.len());
        for (ordinal, name) in columns.iter().enumerate() {
            field_map.entry(name.clone()).or_insert(ordinal);
        }
        Self { columns, field_map }
    }

    #[must_use]
    pub const fn field_map(&self) -> &HashMap<String, usize> {
        &self.field_map
    }

    #[must_use]
    pub fn ordinal(&self, name: &str) -> Option<usize> {
        self.field_map.get(name).copied()
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
