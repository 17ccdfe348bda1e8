pub mod data_table;
pub mod error;
pub mod row_store;
pub mod schema;
pub mod value;

pub use data_table::*;
pub use error::*;
pub use row_store::*;
pub use schema::*;
pub use value::*;
