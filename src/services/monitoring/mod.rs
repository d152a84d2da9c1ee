// 進捗監視機能
// パイプライン開始、ステージ終了、キャンセル、完了の通知

pub mod implementations;

// 公開API
pub use implementations::{ConsolePipelineReporter, NoOpPipelineReporter};
