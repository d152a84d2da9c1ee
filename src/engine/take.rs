// Take - 上流から指定数だけ受け取るステージ

use crate::core::{
    CancelToken, StageExit, StageHandle, StageKind, StageSummary, Stream, DEFAULT_HANDOFF_CAPACITY,
};

/// Take: 上流からn個の値を受け渡したら停止
///
/// n個に達したら上流の状態に関係なく出力を閉じる。上流へ停止を伝えることはしない。
/// 上流は読み手がいなくなった時点か、所有者のキャンセルで停止する。
/// `n == 0` の場合は上流を一切読まず、閉じたStreamを即座に返す。
pub fn take_n<T>(cancel: CancelToken, upstream: Stream<T>, n: usize) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
{
    take_n_with_capacity(cancel, upstream, n, DEFAULT_HANDOFF_CAPACITY)
}

/// バッファ容量を指定してTake
pub fn take_n_with_capacity<T>(
    cancel: CancelToken,
    upstream: Stream<T>,
    n: usize,
    capacity: usize,
) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
{
    let kind = StageKind::Take { limit: n };

    if n == 0 {
        let handle = tokio::spawn(async move { StageSummary::new(kind).finish(StageExit::LimitReached) });
        return (Stream::closed(), handle);
    }

    let (tx, stream) = Stream::channel(capacity);

    let handle = tokio::spawn(async move {
        let mut summary = StageSummary::new(kind);

        for _ in 0..n {
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

        summary.finish(StageExit::LimitReached)
    });

    (stream, handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CancelSignal;
    use crate::engine::generator::{spawn_generator, spawn_source};
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_take_stops_after_n_values() {
        let signal = CancelSignal::new();
        let mut next = 0u32;
        let (numbers, generator) = spawn_generator(signal.observe(), move || {
            next += 1;
            next
        });

        let (first_three, handle) = take_n(signal.observe(), numbers, 3);

        let received = timeout(Duration::from_secs(1), first_three.collect()).await.unwrap();
        assert_eq!(received, vec![1, 2, 3]);

        let summary = handle.await.unwrap();
        assert_eq!(summary.kind, StageKind::Take { limit: 3 });
        assert_eq!(summary.emitted, 3);
        assert_eq!(summary.exit, StageExit::LimitReached);

        // Takeは所有者のキャンセルを発火しない
        assert!(!signal.is_cancelled());

        // 読み手がいなくなったGeneratorは自ら停止する
        let generator_summary = timeout(Duration::from_secs(1), generator).await.unwrap().unwrap();
        assert_eq!(generator_summary.exit, StageExit::DownstreamClosed);
    }

    #[tokio::test]
    async fn test_take_zero_consumes_nothing() {
        let signal = CancelSignal::new();
        let (upstream, _source) = spawn_source(signal.observe(), vec![1, 2, 3]);
        let keep = upstream.clone();

        let (empty, handle) = take_n(signal.observe(), upstream, 0);

        let received = timeout(Duration::from_millis(100), empty.recv()).await.unwrap();
        assert!(received.is_none());
        assert_eq!(handle.await.unwrap().received, 0);

        // 上流の値は一つも消費されていない
        assert_eq!(keep.collect().await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_take_more_than_available() {
        let signal = CancelSignal::new();
        let (upstream, _source) = spawn_source(signal.observe(), vec!['x', 'y']);

        let (taken, handle) = take_n(signal.observe(), upstream, 5);

        let received = timeout(Duration::from_secs(1), taken.collect()).await.unwrap();
        assert_eq!(received, vec!['x', 'y']);
        assert_eq!(handle.await.unwrap().exit, StageExit::UpstreamClosed);
    }

    #[tokio::test]
    async fn test_take_cancelled_early_yields_fewer() {
        let signal = CancelSignal::new();
        // 一つだけ値を出して止まる上流
        let (tx, upstream) = Stream::channel(1);
        tx.send(7).await.unwrap();

        let (taken, handle) = take_n(signal.observe(), upstream, 10);
        assert_eq!(taken.recv().await, Some(7));

        signal.trigger();
        let summary = timeout(Duration::from_secs(1), handle).await.unwrap().unwrap();
        assert_eq!(summary.exit, StageExit::Cancelled);
        assert_eq!(summary.emitted, 1);
        assert!(taken.recv().await.is_none());
        drop(tx);
    }
}
