use clap::{Parser, ValueEnum};
use core_extensions::ParallelConfig;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Maps a synthetic result set through the row extensions",
    long_about = None
)]
pub struct CliOpts {
    #[arg(
        short,
        long,
        env = "ROWMAP_ROWS",
        default_value_t = 100_000,
        help = "Number of synthetic rows to map"
    )]
    pub rows: usize,

    #[arg(
        short,
        long,
        env = "ROWMAP_THREADS",
        help = "Size of a dedicated mapping pool (default: rayon global pool)"
    )]
    pub threads: Option<usize>,

    #[arg(
        long,
        env = "ROWMAP_MIN_PARALLEL_LEN",
        help = "Batches shorter than this are mapped on the calling thread"
    )]
    pub min_parallel_len: Option<usize>,

    #[arg(
        long,
        value_enum,
        env = "TRACING_LEVEL",
        default_value = "info",
        help = "Tracing level used when RUST_LOG is not set"
    )]
    pub tracing_level: TracingLevel,
}

impl CliOpts {
    #[must_use]
    pub fn parallel_config(&self) -> ParallelConfig {
        let mut config = ParallelConfig::new();
        if let Some(min_parallel_len) = self.min_parallel_len {
            config = config.with_min_parallel_len(min_parallel_len);
        }
        if let Some(threads) = self.threads {
            config = config.with_num_threads(threads);
        }
        config
    }
}

/// Level applied to this workspace's targets when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingLevel {
    Off,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<TracingLevel> for LevelFilter {
    fn from(level: TracingLevel) -> Self {
        match level {
            TracingLevel::Off => Self::OFF,
            TracingLevel::Warn => Self::WARN,
            TracingLevel::Info => Self::INFO,
            TracingLevel::Debug => Self::DEBUG,
            TracingLevel::Trace => Self::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_from_args() {
        let opts = CliOpts::parse_from([
            "rowmap-bench",
            "--threads",
            "2",
            "--min-parallel-len",
            "16",
        ]);
        assert_eq!(
            opts.parallel_config(),
            ParallelConfig::new().with_num_threads(2).with_min_parallel_len(16)
        );
    }

    #[test]
    fn test_defaults_keep_global_pool() {
        let opts = CliOpts::parse_from(["rowmap-bench", "--rows", "10"]);
        assert_eq!(opts.rows, 10);
        assert_eq!(opts.parallel_config(), ParallelConfig::new());
    }

    #[test]
    fn test_tracing_level_from_args() {
        let opts = CliOpts::parse_from(["rowmap-bench", "--tracing-level", "warn"]);
        assert_eq!(opts.tracing_level, TracingLevel::Warn);
        assert_eq!(LevelFilter::from(opts.tracing_level), LevelFilter::WARN);
        let defaults = CliOpts::parse_from(["rowmap-bench"]);
        assert_eq!(LevelFilter::from(defaults.tracing_level), LevelFilter::INFO);
    }
}
