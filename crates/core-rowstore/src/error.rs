use snafu::Snafu;

#[derive(Snafu, Debug, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum RowStoreError {
    #[snafu(display("Row has {actual} values but the table has {expected} columns"))]
    RowWidthMismatch { expected: usize, actual: usize },
}

pub type RowStoreResult<T> = std::result::Result<T, RowStoreError>;
