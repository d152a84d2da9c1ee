// サービス層 - パイプラインを取り巻く周辺機能
// 設定と進捗報告はそれぞれ独立して差し替えられる

pub mod config;
pub mod monitoring;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::{validate_config, DefaultPipelineConfig};
pub use monitoring::{ConsolePipelineReporter, NoOpPipelineReporter};
