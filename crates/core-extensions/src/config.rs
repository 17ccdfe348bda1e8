use crate::error::{ExtensionsResult, ThreadPoolSnafu};
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

const DEFAULT_MIN_PARALLEL_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParallelConfig {
    /// Batches shorter than this are mapped on the calling thread.
    pub min_parallel_len: usize,
    /// Size of a dedicated pool. `None` uses the rayon global pool.
    pub num_threads: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            min_parallel_len: DEFAULT_MIN_PARALLEL_LEN,
            num_threads: None,
        }
    }
}

impl ParallelConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_min_parallel_len(mut self, min_parallel_len: usize) -> Self {
        self.min_parallel_len = min_parallel_len;
        self
    }

    #[must_use]
    pub const fn with_num_threads(mut self, num_threads: usize) -> Self {
        self.num_threads = Some(num_threads);
        self
    }

    #[must_use]
    pub const fn runs_parallel(&self, len: usize) -> bool {
        len > 1 && len >= self.min_parallel_len
    }

    pub fn build_pool(&self) -> ExtensionsResult<Option<ThreadPool>> {
        let Some(num_threads) = self.num_threads else {
            return Ok(None);
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|index| format!("rowmap-{index}"))
            .build()
            .context(ThreadPoolSnafu)?;
        tracing::debug!(num_threads, "built dedicated mapping pool");
        Ok(Some(pool))
    }
}

#[cfg(test)]
mod tests {
    use super::ParallelConfig;

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ParallelConfig =
            serde_json::from_str(r#"{"numThreads": 2}"#).unwrap_or_default();
        assert_eq!(
            config,
            ParallelConfig::new().with_num_threads(2).with_min_parallel_len(64)
        );
    }

    #[test]
    fn test_runs_parallel_threshold() {
        let config = ParallelConfig::new().with_min_parallel_len(10);
        assert!(!config.runs_parallel(9));
        assert!(config.runs_parallel(10));
        assert!(!ParallelConfig::new().with_min_parallel_len(0).runs_parallel(1));
    }

    #[test]
    fn test_pool_only_when_threads_set() {
        assert!(matches!(ParallelConfig::new().build_pool(), Ok(None)));
        let pool = ParallelConfig::new().with_num_threads(2).build_pool();
        assert!(matches!(pool, Ok(Some(ref pool)) if pool.current_num_threads() == 2));
    }
}
