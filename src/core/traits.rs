// パイプライン周辺のトレイト定義
// 設定と進捗報告の抽象化インターフェース

use super::types::{PipelineSummary, StageSummary};
use async_trait::async_trait;
use mockall::automock;

/// 述語の実行場所
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PredicateExecution {
    /// ワーカータスク上でそのまま評価する（軽い述語向け）
    ///
    /// 評価中はランタイムのスレッドを占有するため、遅い述語では兄弟ワーカーが並列に動けない
    Inline,
    /// tokioのブロッキングプールで評価する
    #[default]
    Blocking,
}

/// パイプラインの設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// ファンアウトで起動するワーカー数
    fn worker_count(&self) -> usize;

    /// ステージ間チャンネルのバッファサイズ
    fn channel_buffer_size(&self) -> usize;

    /// 述語の実行方式
    fn predicate_execution(&self) -> PredicateExecution;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

// PipelineConfig for Box<dyn PipelineConfig>
impl PipelineConfig for Box<dyn PipelineConfig> {
    fn worker_count(&self) -> usize {
        self.as_ref().worker_count()
    }

    fn channel_buffer_size(&self) -> usize {
        self.as_ref().channel_buffer_size()
    }

    fn predicate_execution(&self) -> PredicateExecution {
        self.as_ref().predicate_execution()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait PipelineReporter: Send + Sync {
    /// パイプライン開始時の報告
    async fn report_started(&self, worker_count: usize);

    /// ステージ終了時の報告
    async fn report_stage_finished(&self, stage: &StageSummary);

    /// キャンセル発火時の報告
    async fn report_cancelled(&self);

    /// 全ステージ終了時の報告
    async fn report_completed(&self, summary: &PipelineSummary);
}

// PipelineReporter for Box<dyn PipelineReporter>
#[async_trait]
impl PipelineReporter for Box<dyn PipelineReporter> {
    async fn report_started(&self, worker_count: usize) {
        self.as_ref().report_started(worker_count).await
    }

    async fn report_stage_finished(&self, stage: &StageSummary) {
        self.as_ref().report_stage_finished(stage).await
    }

    async fn report_cancelled(&self) {
        self.as_ref().report_cancelled().await
    }

    async fn report_completed(&self, summary: &PipelineSummary) {
        self.as_ref().report_completed(summary).await
    }
}
