// 高レベル公開API
// Pipelineの配線を一関数で済ませるための便利な関数

use super::Pipeline;
use crate::core::{PipelineConfig, PipelineReporter, PipelineResult, PipelineSummary};

/// Generator → Fan-Out → Fan-In → Take(n) を配線して実行
///
/// n個集まるか上流が尽きた時点で所有者としてキャンセルを発火し、
/// 全ステージの終了を待ってから結果を返す。
pub async fn run_fan_out_fan_in<C, R, T, F, P>(
    config: C,
    reporter: R,
    producer: F,
    predicate: P,
    n: usize,
) -> PipelineResult<(Vec<T>, PipelineSummary)>
where
    C: PipelineConfig,
    R: PipelineReporter + 'static,
    T: Send + 'static,
    F: FnMut() -> T + Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let mut pipeline = Pipeline::start(config, reporter).await?;

    let values = pipeline.generator(producer);
    let workers = pipeline.fan_out_with_config(&values, predicate)?;
    // ワーカーだけが上流を読むように、所有者側のハンドルは手放す
    drop(values);

    let merged = pipeline.fan_in(workers);
    let taken = pipeline.take(merged, n);
    let results = taken.collect().await;

    let summary = pipeline.shutdown().await?;
    Ok((results, summary))
}

/// Fan-Outを使わない単一ワーカー版: Generator → Worker → Take(n)
pub async fn run_single_worker<C, R, T, F, P>(
    config: C,
    reporter: R,
    producer: F,
    predicate: P,
    n: usize,
) -> PipelineResult<(Vec<T>, PipelineSummary)>
where
    C: PipelineConfig,
    R: PipelineReporter + 'static,
    T: Send + 'static,
    F: FnMut() -> T + Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let mut pipeline = Pipeline::start(config, reporter).await?;

    let values = pipeline.generator(producer);
    let accepted = pipeline.worker(&values, predicate);
    drop(values);

    let taken = pipeline.take(accepted, n);
    let results = taken.collect().await;

    let summary = pipeline.shutdown().await?;
    Ok((results, summary))
}
