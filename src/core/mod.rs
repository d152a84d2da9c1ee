// コアレイヤー - キャンセル・Stream・トレイト・型・エラー定義
// エンジン層とサービス層から参照される基本的な抽象化を提供

pub mod cancel;
pub mod error;
pub mod stream;
pub mod traits;
pub mod types;

// 公開API - 明示的にエクスポートして曖昧性を回避
pub use cancel::{CancelSignal, CancelToken};
pub use error::{ErrorSeverity, PipelineError, PipelineResult};
pub use stream::{Stream, DEFAULT_HANDOFF_CAPACITY};
pub use traits::{PipelineConfig, PipelineReporter, PredicateExecution};
pub use types::{PipelineSummary, StageExit, StageHandle, StageKind, StageSummary};
