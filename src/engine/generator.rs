// Generator - 値の生成と配信
// 引数なしの生成関数を、キャンセル可能な無限Streamに変える

use crate::core::{
    CancelToken, StageExit, StageHandle, StageKind, StageSummary, Stream, DEFAULT_HANDOFF_CAPACITY,
};

/// Generator: 生成関数を繰り返し呼び出して配信
///
/// 出力は無限で再開不可。キャンセル後にチャンネルが閉じたら、
/// 次の実行には新しいGeneratorを作る必要がある。
/// 生成関数がブロックするとパイプライン全体が止まる点に注意。
pub fn spawn_generator<T, F>(cancel: CancelToken, producer: F) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
    F: FnMut() -> T + Send + 'static,
{
    spawn_generator_with_capacity(cancel, producer, DEFAULT_HANDOFF_CAPACITY)
}

/// バッファ容量を指定してGeneratorを起動
pub fn spawn_generator_with_capacity<T, F>(
    cancel: CancelToken,
    mut producer: F,
    capacity: usize,
) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
    F: FnMut() -> T + Send + 'static,
{
    let (tx, stream) = Stream::channel(capacity);

    let handle = tokio::spawn(async move {
        let mut summary = StageSummary::new(StageKind::Generator);

        loop {
            if cancel.is_cancelled() {
                return summary.finish(StageExit::Cancelled);
            }
            if tx.is_closed() {
                return summary.finish(StageExit::DownstreamClosed);
            }

            let value = producer();
            summary.received += 1;

            // 受け渡しとキャンセルの競争。同時に準備できた場合はキャンセルを優先
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

/// Source: 有限の値列を順番に配信し、最後の値の後でStreamを閉じる
pub fn spawn_source<T, I>(cancel: CancelToken, items: I) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
{
    spawn_source_with_capacity(cancel, items, DEFAULT_HANDOFF_CAPACITY)
}

/// バッファ容量を指定してSourceを起動
pub fn spawn_source_with_capacity<T, I>(
    cancel: CancelToken,
    items: I,
    capacity: usize,
) -> (Stream<T>, StageHandle)
where
    T: Send + 'static,
    I: IntoIterator<Item = T>,
    I::IntoIter: Send + 'static,
{
    let (tx, stream) = Stream::channel(capacity);
    let items = items.into_iter();

    let handle = tokio::spawn(async move {
        let mut summary = StageSummary::new(StageKind::Source);

        for value in items {
            if cancel.is_cancelled() {
                return summary.finish(StageExit::Cancelled);
            }
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

        summary.finish(StageExit::UpstreamClosed)
    });

    (stream, handle)
}
