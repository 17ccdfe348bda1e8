use snafu::prelude::*;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum ExtensionsError {
    #[snafu(display("Index {index} is out of range for a list of length {len}"))]
    IndexOutOfRange { index: usize, len: usize },

    #[snafu(display("Cannot build mapping thread pool: {source}"))]
    ThreadPool { source: rayon::ThreadPoolBuildError },

    #[snafu(display("Cannot build table-valued parameter: {source}"))]
    Table {
        source: core_rowstore::RowStoreError,
    },
}

pub type ExtensionsResult<T> = std::result::Result<T, ExtensionsError>;
