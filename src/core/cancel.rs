// キャンセルシグナル - 全ステージが監視する一度きりのブロードキャスト停止通知
// 発火権限(CancelSignal)はパイプラインの所有者だけが持ち、各ステージには監視権限(CancelToken)を渡す

use tokio::sync::watch;

/// キャンセルの発火側
///
/// `trigger()` は何度呼んでも安全。ドロップ時にも発火するため、
/// 所有者がどの経路(早期リターン・`?`・パニック)で抜けても全ステージが停止する。
#[derive(Debug)]
pub struct CancelSignal {
    tx: watch::Sender<bool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// キャンセルを発火し、待機中の全監視者を起こす
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// ステージに渡す監視権限を取得
    pub fn observe(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CancelSignal {
    fn drop(&mut self) {
        self.trigger();
    }
}

/// キャンセルの監視側（読み取り専用）
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// 既にキャンセル済みかどうか
    ///
    /// 発火側が既に破棄されている場合もキャンセル済みとみなす
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// キャンセルされるまで待機（ポーリングなし）
    ///
    /// `tokio::select!` の分岐として他の待機と並べて使う
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}
