pub mod config;
pub mod deconstruct;
pub mod entity;
pub mod error;
pub mod mapper;
pub mod registry;
pub mod tvp;

pub use config::ParallelConfig;
pub use deconstruct::{Deconstruct, deconstruct};
pub use entity::{FromField, RowEntity, Setter};
pub use error::{ExtensionsError, ExtensionsResult};
pub use mapper::{
    MappedSliceExt, RowMapper, RowStoreSliceExt, to_mapped_object_array, to_object_array,
    to_object_array_with, try_to_mapped_object_array,
};
pub use registry::{BoundSetters, SetterRegistry, Setters, setters};
pub use tvp::{TvpExt, as_tvp};

pub use core_rowstore::{DataColumn, DataTable, RowStore, Schema, Value};

