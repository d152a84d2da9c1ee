// Fan-In - 複数の上流を一本のStreamにまとめる
// 各上流に転送タスクを一つずつ起動し、全転送タスクの終了後にだけ出力が閉じる

use crate::core::{
    CancelToken, StageExit, StageHandle, StageKind, StageSummary, Stream, DEFAULT_HANDOFF_CAPACITY,
};
use tokio::sync::mpsc;

/// Fan-In: K個の上流を一つの出力に合流
///
/// 同じ上流から来た値の順序は保たれる。異なる上流間の順序は保証しない。
/// 返されるハンドルは全転送タスクを待ち合わせ、集計したサマリーを返す。
pub fn fan_in<T>(cancel: CancelToken, upstreams: Vec<Stream<T>>) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
{
    fan_in_with_capacity(cancel, upstreams, DEFAULT_HANDOFF_CAPACITY)
}

/// バッファ容量を指定してFan-In
pub fn fan_in_with_capacity<T>(
    cancel: CancelToken,
    upstreams: Vec<Stream<T>>,
    capacity: usize,
) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
{
    let inputs = upstreams.len();
    let (tx, merged) = Stream::channel(capacity);

    let forwarders: Vec<_> = upstreams
        .into_iter()
        .map(|upstream| spawn_forwarder(cancel.clone(), upstream, tx.clone()))
        .collect();

    // 出力チャンネルの送信側は転送タスクだけが持つ。最後の転送タスクが終わった時点で閉じる
    drop(tx);

    let handle = tokio::spawn(async move {
        let mut summary = StageSummary::new(StageKind::FanIn { inputs });
        let mut exits = Vec::with_capacity(inputs);

        for forwarder in forwarders {
            match forwarder.await {
                Ok(forwarded) => {
                    summary.received += forwarded.received;
                    summary.emitted += forwarded.emitted;
                    exits.push(forwarded.exit);
                }
                Err(error) if error.is_panic() => std::panic::resume_unwind(error.into_panic()),
                Err(_) => exits.push(StageExit::Cancelled),
            }
        }

        summary.finish(merge_exits(&exits))
    });

    (merged, handle)
}

/// 単一上流の転送タスク
fn spawn_forwarder<T>(
    cancel: CancelToken,
    upstream: Stream<T>,
    tx: mpsc::Sender<T>,
) -> tokio::task::JoinHandle<StageSummary>
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        // 集計専用。種類は親のFanInで上書きされる
        let mut summary = StageSummary::new(StageKind::FanIn { inputs: 1 });

        loop {
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

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return summary.finish(StageExit::Cancelled),
                sent = tx.send(value) => match sent {
                    Ok(()) => summary.emitted += 1,
                    Err(_) => return summary.finish(StageExit::DownstreamClosed),
                },
            }
        }
    })
}

/// 転送タスク群の終了理由を一つにまとめる
fn merge_exits(exits: &[StageExit]) -> StageExit {
    if exits.contains(&StageExit::Cancelled) {
        StageExit::Cancelled
    } else if exits.contains(&StageExit::DownstreamClosed) {
        StageExit::DownstreamClosed
    } else {
        StageExit::UpstreamClosed
    }
}
