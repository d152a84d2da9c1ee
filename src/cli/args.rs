use clap::Parser;
use std::path::PathBuf;

use crate::primes::DEFAULT_MAX_NUMBER;

#[derive(Parser, Debug)]
#[command(name = "stream_pipeline")]
#[command(about = "Find random primes with a fan-out/fan-in stream pipeline")]
#[command(version)]
pub struct Cli {
    /// Number of primes to collect
    #[arg(short, long, default_value = "10")]
    pub count: usize,

    /// Number of parallel filter workers (defaults to the CPU count)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Upper bound (exclusive) for generated random numbers
    #[arg(short, long, default_value_t = DEFAULT_MAX_NUMBER)]
    pub max: u64,

    /// Seed for the random generator
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Run a single filter stage without fan-out
    #[arg(long)]
    pub naive: bool,

    /// Capacity of every stage output channel
    #[arg(short, long, default_value = "1")]
    pub buffer: usize,

    /// Evaluate the predicate on the async runtime instead of the blocking pool
    #[arg(long)]
    pub inline: bool,

    /// Suppress per-stage progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Write the pipeline summary as JSON to this path
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["stream_pipeline"]);

        assert_eq!(cli.count, 10);
        assert_eq!(cli.workers, None);
        assert_eq!(cli.max, 500_000_000);
        assert_eq!(cli.buffer, 1);
        assert!(!cli.naive);
        assert!(!cli.inline);
        assert!(cli.json.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::parse_from([
            "stream_pipeline",
            "--count",
            "3",
            "--workers",
            "2",
            "--max",
            "1000",
            "--seed",
            "42",
            "--naive",
            "--buffer",
            "4",
            "--inline",
            "--quiet",
            "--json",
            "summary.json",
        ]);

        assert_eq!(cli.count, 3);
        assert_eq!(cli.workers, Some(2));
        assert_eq!(cli.max, 1000);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.naive);
        assert_eq!(cli.buffer, 4);
        assert!(cli.inline);
        assert!(cli.quiet);
        assert_eq!(cli.json, Some(PathBuf::from("summary.json")));
    }

    #[test]
    fn test_rejects_non_numeric_count() {
        assert!(Cli::try_parse_from(["stream_pipeline", "--count", "many"]).is_err());
    }
}
