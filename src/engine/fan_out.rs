// Fan-Out - 並列ワーカープール
// 全ワーカーが同じ上流を共有し、各値はちょうど一つのワーカーに届く

use super::worker::{spawn_worker_with, WorkerOptions};
use crate::core::{CancelToken, PipelineError, PipelineResult, StageHandle, Stream};
use std::sync::Arc;

/// Fan-Out: 同じ上流を読むワーカーをK個起動（完了は待たない）
pub fn fan_out<T, P>(
    cancel: CancelToken,
    upstream: &Stream<T>,
    predicate: P,
    worker_count: usize,
) -> PipelineResult<(Vec<Stream<T>>, Vec<StageHandle>)>
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    fan_out_with(
        cancel,
        upstream,
        Arc::new(predicate),
        worker_count,
        WorkerOptions::default(),
    )
}

/// ワーカーオプションを指定してFan-Out
///
/// `template.id` を先頭に連番のIDを割り当てる
pub fn fan_out_with<T, P>(
    cancel: CancelToken,
    upstream: &Stream<T>,
    predicate: Arc<P>,
    worker_count: usize,
    template: WorkerOptions,
) -> PipelineResult<(Vec<Stream<T>>, Vec<StageHandle>)>
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    if worker_count == 0 {
        return Err(PipelineError::validation(
            "worker_count",
            "ワーカー数は1以上である必要があります",
        ));
    }

    let mut streams = Vec::with_capacity(worker_count);
    let mut handles = Vec::with_capacity(worker_count);

    for offset in 0..worker_count {
        let (stream, handle) = spawn_worker_with(
            cancel.clone(),
            upstream,
            Arc::clone(&predicate),
            WorkerOptions {
                id: template.id + offset,
                ..template
            },
        );
        streams.push(stream);
        handles.push(handle);
    }

    Ok((streams, handles))
}
