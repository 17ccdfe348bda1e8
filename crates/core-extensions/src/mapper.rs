use crate::config::ParallelConfig;
use crate::entity::RowEntity;
use crate::error::ExtensionsResult;
use crate::registry::setters;
use core_rowstore::RowStore;
use rayon::ThreadPool;
use rayon::prelude::*;
use std::sync::Arc;

/// Maps batches of rows onto typed objects.
///
/// Each element of a batch is mapped independently and written to its own
/// output slot, so `out[i]` always corresponds to `rows[i]`. Batches at or
/// above [`ParallelConfig::min_parallel_len`] fan out over rayon.
#[derive(Default, Clone)]
pub struct RowMapper {
    config: ParallelConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl std::fmt::Debug for RowMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowMapper")
            .field("config", &self.config)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl RowMapper {
    pub fn new(config: ParallelConfig) -> ExtensionsResult<Self> {
        let pool = config.build_pool()?.map(Arc::new);
        Ok(Self { config, pool })
    }

    #[must_use]
    pub const fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Best-effort mapping into `T::default()` objects. Never fails on
    /// missing, extra or mismatched columns.
    pub fn to_object_array<T>(&self, rows: &[RowStore]) -> Vec<T>
    where
        T: RowEntity + Default + Send,
    {
        self.to_object_array_with(rows, T::default)
    }

    /// Best-effort mapping into objects produced by `factory`.
    ///
    /// The schema of the first row is used for the whole batch. Members
    /// without a column keep whatever the factory gave them.
    #[tracing::instrument(
        name = "RowMapper::to_object_array",
        level = "debug",
        skip_all,
        fields(rows = rows.len(), entity = std::any::type_name::<T>())
    )]
    pub fn to_object_array_with<T, F>(&self, rows: &[RowStore], factory: F) -> Vec<T>
    where
        T: RowEntity + Send,
        F: Fn() -> T + Sync,
    {
        let Some(first) = rows.first() else {
            return Vec::new();
        };
        let schema = first.schema();
        let bound = setters::<T>().bind(schema);
        tracing::trace!(
            matched = bound.matched(),
            columns = schema.len(),
            "bound setters to schema"
        );

        self.fan_out(rows, |row| {
            let mut target = factory();
            bound.apply(&mut target, row.values());
            target
        })
    }

    /// Applies `mapper` to every element, keeping positions.
    #[tracing::instrument(
        name = "RowMapper::to_mapped_object_array",
        level = "debug",
        skip_all,
        fields(rows = items.len())
    )]
    pub fn to_mapped_object_array<S, T, F>(&self, items: &[S], mapper: F) -> Vec<T>
    where
        S: Sync,
        T: Send,
        F: Fn(&S) -> T + Sync + Send,
    {
        self.fan_out(items, mapper)
    }

    /// Fallible variant of [`Self::to_mapped_object_array`]. The mapper's own
    /// error is handed back unchanged.
    #[tracing::instrument(
        name = "RowMapper::try_to_mapped_object_array",
        level = "debug",
        skip_all,
        fields(rows = items.len())
    )]
    pub fn try_to_mapped_object_array<S, T, E, F>(
        &self,
        items: &[S],
        mapper: F,
    ) -> Result<Vec<T>, E>
    where
        S: Sync,
        T: Send,
        E: Send,
        F: Fn(&S) -> Result<T, E> + Sync + Send,
    {
        if !self.config.runs_parallel(items.len()) {
            return items.iter().map(mapper).collect();
        }
        let run = || -> Result<Vec<T>, E> { items.par_iter().map(&mapper).collect() };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    fn fan_out<S, T, F>(&self, items: &[S], f: F) -> Vec<T>
    where
        S: Sync,
        T: Send,
        F: Fn(&S) -> T + Sync + Send,
    {
        if !self.config.runs_parallel(items.len()) {
            return items.iter().map(f).collect();
        }
        let run = || -> Vec<T> { items.par_iter().map(&f).collect() };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// [`RowMapper::to_object_array`] with the default configuration.
pub fn to_object_array<T>(rows: &[RowStore]) -> Vec<T>
where
    T: RowEntity + Default + Send,
{
    RowMapper::default().to_object_array(rows)
}

pub fn to_object_array_with<T, F>(rows: &[RowStore], factory: F) -> Vec<T>
where
    T: RowEntity + Send,
    F: Fn() -> T + Sync,
{
    RowMapper::default().to_object_array_with(rows, factory)
}

pub fn to_mapped_object_array<S, T, F>(items: &[S], mapper: F) -> Vec<T>
where
    S: Sync,
    T: Send,
    F: Fn(&S) -> T + Sync + Send,
{
    RowMapper::default().to_mapped_object_array(items, mapper)
}

pub fn try_to_mapped_object_array<S, T, E, F>(items: &[S], mapper: F) -> Result<Vec<T>, E>
where
    S: Sync,
    T: Send,
    E: Send,
    F: Fn(&S) -> Result<T, E> + Sync + Send,
{
    RowMapper::default().try_to_mapped_object_array(items, mapper)
}

/// Row-batch mapping on slices of [`RowStore`].
pub trait RowStoreSliceExt {
    fn to_object_array<T>(&self) -> Vec<T>
    where
        T: RowEntity + Default + Send;

    fn to_object_array_with<T, F>(&self, factory: F) -> Vec<T>
    where
        T: RowEntity + Send,
        F: Fn() -> T + Sync;
}

impl RowStoreSliceExt for [RowStore] {
    fn to_object_array<T>(&self) -> Vec<T>
    where
        T: RowEntity + Default + Send,
    {
        to_object_array(self)
    }

    fn to_object_array_with<T, F>(&self, factory: F) -> Vec<T>
    where
        T: RowEntity + Send,
        F: Fn() -> T + Sync,
    {
        to_object_array_with(self, factory)
    }
}

/// Caller-mapped conversion on any slice.
pub trait MappedSliceExt<S> {
    fn to_mapped_object_array<T, F>(&self, mapper: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&S) -> T + Sync + Send;

    fn try_to_mapped_object_array<T, E, F>(&self, mapper: F) -> Result<Vec<T>, E>
    where
        T: Send,
        E: Send,
        F: Fn(&S) -> Result<T, E> + Sync + Send;
}

impl<S: Sync> MappedSliceExt<S> for [S] {
    fn to_mapped_object_array<T, F>(&self, mapper: F) -> Vec<T>
    where
        T: Send,
        F: Fn(&S) -> T + Sync + Send,
    {
        to_mapped_object_array(self, mapper)
    }

    fn try_to_mapped_object_array<T, E, F>(&self, mapper: F) -> Result<Vec<T>, E>
    where
        T: Send,
        E: Send,
        F: Fn(&S) -> Result<T, E> + Sync + Send,
    {
        try_to_mapped_object_array(self, mapper)
    }
}
