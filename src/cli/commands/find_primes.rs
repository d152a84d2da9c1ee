use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

use crate::cli::Cli;
use crate::core::{PipelineError, PipelineResult, PipelineSummary, PredicateExecution};
use crate::engine::Pipeline;
use crate::primes::{is_prime, random_number_producer};
use crate::services::{ConsolePipelineReporter, DefaultPipelineConfig};

/// find-primesの実行結果
#[derive(Debug, Serialize)]
pub struct FindPrimesReport {
    pub cpu_count: usize,
    pub worker_count: usize,
    pub naive: bool,
    pub primes: Vec<u64>,
    pub elapsed_ms: u64,
    pub summary: PipelineSummary,
}

/// ランダムな数値から素数を指定数だけ探す
pub async fn execute_find_primes(cli: &Cli) -> Result<FindPrimesReport> {
    let cpu_count = num_cpus::get();
    let worker_count = if cli.naive {
        1
    } else {
        cli.workers.unwrap_or(cpu_count)
    };
    let execution = if cli.inline {
        PredicateExecution::Inline
    } else {
        PredicateExecution::Blocking
    };

    let config = DefaultPipelineConfig::new(cpu_count)
        .with_worker_count(worker_count)
        .with_buffer_size(cli.buffer)
        .with_predicate_execution(execution);
    let producer = random_number_producer(cli.max, cli.seed)?;

    println!("🖥️  CPU数: {cpu_count}");
    if cli.naive {
        println!("🐢 単一ワーカーで実行します");
    } else {
        println!("⚡ {worker_count}ワーカーでFan-Out/Fan-Inを実行します");
    }

    let start_time = Instant::now();
    let mut pipeline = Pipeline::start(config, reporter_for(cli)).await?;

    let numbers = pipeline.generator(producer);
    let primes_stream = if cli.naive {
        pipeline.worker(&numbers, |n: &u64| is_prime(*n))
    } else {
        let workers = pipeline.fan_out_with_config(&numbers, |n: &u64| is_prime(*n))?;
        pipeline.fan_in(workers)
    };
    drop(numbers);
    let taken = pipeline.take(primes_stream, cli.count);

    println!("🔎 見つかった素数:");
    let mut primes = Vec::with_capacity(cli.count);
    while let Some(prime) = taken.recv().await {
        println!("\t{prime}");
        primes.push(prime);
    }

    let summary = pipeline.shutdown().await?;
    let elapsed = start_time.elapsed();
    println!("⏱️  所要時間: {:.3}秒", elapsed.as_secs_f64());

    let report = FindPrimesReport {
        cpu_count,
        worker_count,
        naive: cli.naive,
        primes,
        elapsed_ms: elapsed.as_millis() as u64,
        summary,
    };

    if let Some(path) = &cli.json {
        write_report(path, &report).await?;
        println!("📄 サマリーを {} に保存しました", path.display());
    }

    Ok(report)
}

/// `--quiet` の指定に応じた進捗報告の作成
pub fn reporter_for(cli: &Cli) -> ConsolePipelineReporter {
    if cli.quiet {
        ConsolePipelineReporter::quiet()
    } else {
        ConsolePipelineReporter::new()
    }
}

/// 失敗をユーザー向けの一行にまとめる
///
/// パイプラインのエラーには重要度を付け、再実行で解決し得る場合はその旨を添える
pub fn describe_failure(error: &anyhow::Error) -> String {
    match error.downcast_ref::<PipelineError>() {
        Some(pipeline_error) if pipeline_error.is_recoverable() => format!(
            "[{}] {error} (再実行で解決する可能性があります)",
            pipeline_error.severity().as_str()
        ),
        Some(pipeline_error) => format!("[{}] {error}", pipeline_error.severity().as_str()),
        None => error.to_string(),
    }
}

async fn write_report(path: &Path, report: &FindPrimesReport) -> PipelineResult<()> {
    let display = path.display().to_string();
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| PipelineError::output(display.clone(), e.into()))?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| PipelineError::output(display, e.into()))
}
