use crate::error::{ExtensionsResult, TableSnafu};
use core_rowstore::{DataTable, Value};
use snafu::ResultExt;

/// Wraps `list` into a single-column table-valued parameter named `tvp_name`.
/// The column gets the default name `Column1`; rows keep list order.
#[tracing::instrument(level = "trace", skip(list), fields(len = list.len()), err)]
pub fn as_tvp<T>(list: &[T], tvp_name: &str) -> ExtensionsResult<DataTable>
where
    T: Clone + Into<Value>,
{
    let mut table = DataTable::new(tvp_name);
    table.add_column();
    for item in list {
        table.add_row(vec![item.clone().into()]).context(TableSnafu)?;
    }
    Ok(table)
}

pub trait TvpExt {
    fn as_tvp(&self, tvp_name: &str) -> ExtensionsResult<DataTable>;
}

impl<T> TvpExt for [T]
where
    T: Clone + Into<Value>,
{
    fn as_tvp(&self, tvp_name: &str) -> ExtensionsResult<DataTable> {
        as_tvp(self, tvp_name)
    }
}
