use anyhow::Result;
use clap::Parser;

use stream_pipeline::cli::{describe_failure, execute_find_primes, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("🚀 素数探索パイプライン");

    if let Err(error) = execute_find_primes(&cli).await {
        eprintln!("❌ エラー: {}", describe_failure(&error));
        std::process::exit(1);
    }

    Ok(())
}
