// パイプライン周辺層のエラー型定義
// ステージ本体はエラーを返さない。ここで扱うのは設定の検証・タスク・出力の失敗のみ

use thiserror::Error;

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("バリデーションエラー: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("タスクエラー: {stage} - {source}")]
    TaskError {
        stage: String,
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("出力エラー: {path} - {source}")]
    OutputError {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// バリデーションエラーの作成
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(stage: impl Into<String>, source: tokio::task::JoinError) -> Self {
        Self::TaskError {
            stage: stage.into(),
            source,
        }
    }

    /// 出力エラーの作成
    pub fn output(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::OutputError {
            path: path.into(),
            source,
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } => ErrorSeverity::High,
            Self::TaskError { source, .. } if source.is_panic() => ErrorSeverity::Critical,
            Self::TaskError { .. } => ErrorSeverity::Medium,
            Self::OutputError { .. } => ErrorSeverity::Medium,
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// 設定の誤りとステージのパニックはやり直しても結果が変わらない
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ValidationError { .. } => false,
            Self::TaskError { source, .. } => !source.is_panic(),
            Self::OutputError { .. } => true,
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 低重要度 - ログ出力程度
    Low,
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - パイプライン停止レベル
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// パイプライン操作の結果型
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pipeline_error_creation() {
        let validation_error = PipelineError::validation("worker_count", "1以上である必要があります");
        assert!(validation_error.to_string().contains("バリデーションエラー"));
        assert!(validation_error.to_string().contains("worker_count"));

        let output_error = PipelineError::output("/tmp/summary.json", anyhow::anyhow!("書き込み失敗"));
        assert!(output_error.to_string().contains("出力エラー"));
        assert!(output_error.to_string().contains("/tmp/summary.json"));
        assert_eq!(output_error.severity(), ErrorSeverity::Medium);
        assert!(output_error.is_recoverable());
    }

    #[test]
    fn test_error_source_chain() {
        let error = PipelineError::output("out.json", anyhow::anyhow!("ルートエラー"));
        assert!(error.source().is_some());
    }

    #[tokio::test]
    async fn test_task_error_from_aborted_task() {
        let task = tokio::spawn(async {
            std::future::pending::<()>().await;
        });
        task.abort();

        let join_error = task.await.expect_err("中断されたタスクはJoinErrorを返すべきです");
        let error = PipelineError::task("worker-0", join_error);

        assert!(error.to_string().contains("タスクエラー"));
        assert!(error.to_string().contains("worker-0"));
        assert_eq!(error.severity(), ErrorSeverity::Medium);
        assert!(error.is_recoverable());
    }

    #[tokio::test]
    async fn test_task_error_from_panicked_task() {
        let task = tokio::spawn(async {
            panic!("ステージ内でパニック");
        });

        let join_error = task.await.expect_err("パニックしたタスクはJoinErrorを返すべきです");
        let error = PipelineError::task("generator", join_error);

        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_error_severity_ordering() {
        let validation_error = PipelineError::validation("channel_buffer_size", "0は使用できません");
        assert_eq!(validation_error.severity(), ErrorSeverity::High);
        assert!(!validation_error.is_recoverable());

        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
        assert!(ErrorSeverity::High > ErrorSeverity::Medium);
        assert!(ErrorSeverity::Medium > ErrorSeverity::Low);
        assert_eq!(ErrorSeverity::Critical.as_str(), "CRITICAL");
    }
}
