// Stream - ステージ間の受け渡し口
// 複数の読み手で共有すると、各値はちょうど一つの読み手にだけ届く（競合受信によるワークキュー）

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// ステージ間チャンネルのデフォルト容量
///
/// tokioのmpscは容量0を持てないため、無バッファの受け渡しに最も近い1を使う
pub const DEFAULT_HANDOFF_CAPACITY: usize = 1;

/// 一方向・一度きりの値の列
///
/// クローンは同じキューを共有する。全ての書き手が終了しバッファが空になると
/// `recv()` は `None` を返し、以後再開することはない。
pub struct Stream<T> {
    rx: Arc<Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

impl<T> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream")
            .field("readers", &self.reader_count())
            .finish()
    }
}

impl<T> Stream<T> {
    /// 書き手と読み手の組を作成
    pub fn channel(capacity: usize) -> (mpsc::Sender<T>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self::from_receiver(rx))
    }

    /// 既存のReceiverを包む
    pub fn from_receiver(rx: mpsc::Receiver<T>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// 最初から閉じているStream
    pub fn closed() -> Self {
        let (_tx, stream) = Self::channel(DEFAULT_HANDOFF_CAPACITY);
        stream
    }

    /// 次の値を受信
    ///
    /// 兄弟の読み手が受信中の間はロック待ちになる。
    /// 値を取り出した時点でロックは解放されるので、受信後の処理は兄弟を妨げない。
    pub async fn recv(&self) -> Option<T> {
        let mut rx = self.rx.lock().await;
        rx.recv().await
    }

    /// 閉じるまで全ての値を読み出す
    pub async fn collect(self) -> Vec<T> {
        let mut values = Vec::new();
        while let Some(value) = self.recv().await {
            values.push(value);
        }
        values
    }

    /// このキューを共有している読み手ハンドルの数
    pub fn reader_count(&self) -> usize {
        Arc::strong_count(&self.rx)
    }
}
