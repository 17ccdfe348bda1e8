use crate::error::{RowStoreResult, RowWidthMismatchSnafu};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt::Display;

const DEFAULT_COLUMN_PREFIX: &str = "Column";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataColumn {
    pub name: String,
}

/// Named in-memory table, used to pass a table-valued parameter as a single
/// query parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataTable {
    name: String,
    columns: Vec<DataColumn>,
    rows: Vec<Vec<Value>>,
}

impl DataTable {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Adds a column named `Column1`, `Column2`, ... skipping names already taken.
    pub fn add_column(&mut self) -> &DataColumn {
        let mut counter = self.columns.len() + 1;
        let mut name = format!("{DEFAULT_COLUMN_PREFIX}{counter}");
        while self.column_index(&name).is_some() {
            counter += 1;
            name = format!("{DEFAULT_COLUMN_PREFIX}{counter}");
        }
        self.push_column(name)
    }

    pub fn add_named_column(&mut self, name: impl Into<String>) -> &DataColumn {
        self.push_column(name.into())
    }

    fn push_column(&mut self, name: String) -> &DataColumn {
        self.columns.push(DataColumn { name });
        let last = self.columns.len() - 1;
        &self.columns[last]
    }

    pub fn add_row(&mut self, values: Vec<Value>) -> RowStoreResult<()> {
        ensure!(
            values.len() == self.columns.len(),
            RowWidthMismatchSnafu {
                expected: self.columns.len(),
                actual: values.len(),
            }
        );
        self.rows.push(values);
        Ok(())
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.name == name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn columns(&self) -> &[DataColumn] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns.len()
    }
}

impl Display for DataTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        write!(f, "{}({})", self.name, columns.join(", "))?;
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            write!(f, "\n  {}", cells.join(", "))?;
        }
        Ok(())
    }
}
