// Worker - 述語による選別ステージ
// 共有された上流から競合受信し、述語が真の値だけを下流へ渡す

use crate::core::{
    CancelToken, PredicateExecution, StageExit, StageHandle, StageKind, StageSummary, Stream,
    DEFAULT_HANDOFF_CAPACITY,
};
use std::sync::Arc;

/// ワーカーの起動オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerOptions {
    pub id: usize,
    pub capacity: usize,
    pub execution: PredicateExecution,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            id: 0,
            capacity: DEFAULT_HANDOFF_CAPACITY,
            execution: PredicateExecution::default(),
        }
    }
}

/// 単一ワーカーを起動
pub fn spawn_worker<T, P>(
    cancel: CancelToken,
    upstream: &Stream<T>,
    predicate: P,
) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    spawn_worker_with(cancel, upstream, Arc::new(predicate), WorkerOptions::default())
}

/// オプションと共有済みの述語を指定してワーカーを起動
pub fn spawn_worker_with<T, P>(
    cancel: CancelToken,
    upstream: &Stream<T>,
    predicate: Arc<P>,
    options: WorkerOptions,
) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let upstream = upstream.clone();
    let (tx, stream) = Stream::channel(options.capacity);

    let handle = tokio::spawn(async move {
        let mut summary = StageSummary::new(StageKind::Worker { id: options.id });

        loop {
            // 次の値を取得。受信待ちの間もキャンセルと下流の消失を監視する
            let value = tokio::select! {
                biased;
                _ = cancel.cancelled() => return summary.finish(StageExit::Cancelled),
                _ = tx.closed() => return summary.finish(StageExit::DownstreamClosed),
                received = upstream.recv() => match received {
                    Some(value) => value,
                    None => return summary.finish(StageExit::UpstreamClosed),
                },
            };
            summary.received += 1;

            // 評価中はキャンセルを観測しない。評価が終わってから次の待機点で判断する
            let Some((value, accepted)) =
                evaluate(&predicate, value, options.execution).await
            else {
                return summary.finish(StageExit::Cancelled);
            };
            if !accepted {
                continue;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return summary.finish(StageExit::Cancelled),
                sent = tx.send(value) => match sent {
                    Ok(()) => summary.emitted += 1,
                    Err(_) => return summary.finish(StageExit::DownstreamClosed),
                },
            }
        }
    });

    (stream, handle)
}

/// 述語を評価して値と判定結果を返す
///
/// ブロッキングプールがシャットダウン中で評価できなかった場合は `None`
async fn evaluate<T, P>(
    predicate: &Arc<P>,
    value: T,
    execution: PredicateExecution,
) -> Option<(T, bool)>
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    match execution {
        PredicateExecution::Inline => {
            let accepted = predicate(&value);
            Some((value, accepted))
        }
        PredicateExecution::Blocking => {
            let predicate = Arc::clone(predicate);
            let evaluated = tokio::task::spawn_blocking(move || {
                let accepted = predicate(&value);
                (value, accepted)
            })
            .await;

            match evaluated {
                Ok(result) => Some(result),
                // 述語のパニックはワーカー自身のパニックとして所有者に伝える
                Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
                Err(_) => None,
            }
        }
    }
}
