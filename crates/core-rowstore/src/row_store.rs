use crate::schema::Schema;
use crate::value::{FromValue, Value};
use std::sync::Arc;

/// One row of a query result: positional values plus the schema shared by
/// the whole result set.
#[derive(Debug, Clone, PartialEq)]
pub struct RowStore {
    row_values: Vec<Value>,
    schema: Arc<Schema>,
}

impl RowStore {
    #[must_use]
    pub const fn new(schema: Arc<Schema>, row_values: Vec<Value>) -> Self {
        Self { row_values, schema }
    }

    /// Builds a batch of rows sharing one schema.
    pub fn batch<I>(schema: &Arc<Schema>, rows: I) -> Vec<Self>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        rows.into_iter()
            .map(|row_values| Self::new(Arc::clone(schema), row_values))
            .collect()
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.row_values
    }

    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schema
            .ordinal(name)
            .and_then(|ordinal| self.row_values.get(ordinal))
    }

    /// Typed access by column name. Missing columns, nulls and mismatched
    /// kinds all come back as `None`.
    #[must_use]
    pub fn get_as<T: FromValue>(&self, name: &str) -> Option<T> {
        self.get(name)
            .filter(|value| !value.is_null())
            .and_then(T::from_value)
    }

    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.row_values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RowStore {
        let schema = Arc::new(Schema::new(["id", "name", "note"]));
        RowStore::new(
            schema,
            vec![Value::Int64(1), Value::from("alice"), Value::Null],
        )
    }

    #[test]
    fn test_get_by_name() {
        let row = row();
        assert_eq!(row.get("name"), Some(&Value::from("alice")));
        assert_eq!(row.get("nope"), None);
        assert_eq!(row.get_as::<i64>("id"), Some(1));
        assert_eq!(row.get_as::<String>("id"), None);
    }

    #[test]
    fn test_get_as_never_returns_null_marker() {
        let row = row();
        assert_eq!(row.get("note"), Some(&Value::Null));
        assert_eq!(row.get_as::<Value>("note"), None);
        assert_eq!(row.get_as::<String>("note"), None);
    }

    #[test]
    fn test_batch_shares_schema() {
        let schema = Arc::new(Schema::new(["a"]));
        let rows = RowStore::batch(&schema, vec![vec![Value::Int32(1)], vec![Value::Int32(2)]]);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| Arc::ptr_eq(row.schema(), &schema)));
    }
}
