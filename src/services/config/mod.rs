// 設定管理機能
// ワーカー数・バッファサイズ・述語の実行方式

pub mod implementations;

// 公開API
pub use implementations::{validate_config, DefaultPipelineConfig};
