// パイプラインの実行結果に関するデータ型定義

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 各ステージのタスクハンドル
pub type StageHandle = tokio::task::JoinHandle<StageSummary>;

/// ステージの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageKind {
    /// 無限に値を生成するステージ
    Generator,
    /// 有限の値列を流すステージ
    Source,
    /// 述語で値を選別するワーカー
    Worker { id: usize },
    /// 複数の上流を一本にまとめるステージ
    FanIn { inputs: usize },
    /// 指定数だけ受け取るステージ
    Take { limit: usize },
}

impl StageKind {
    /// ログやエラーメッセージ用の短い名前
    pub fn label(&self) -> String {
        match self {
            Self::Generator => "generator".to_string(),
            Self::Source => "source".to_string(),
            Self::Worker { id } => format!("worker-{id}"),
            Self::FanIn { inputs } => format!("fan-in({inputs})"),
            Self::Take { limit } => format!("take({limit})"),
        }
    }
}

/// ステージが終了した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageExit {
    /// キャンセルを観測した
    Cancelled,
    /// 上流が閉じた（有限の上流の自然終了）
    UpstreamClosed,
    /// 下流の読み手が全ていなくなった
    DownstreamClosed,
    /// 指定数を受け渡し終えた
    LimitReached,
}

/// 単一ステージの実行結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSummary {
    pub kind: StageKind,
    /// 上流から受け取った値の数（Generatorでは生成した数）
    pub received: usize,
    /// 下流へ受け渡した値の数
    pub emitted: usize,
    pub exit: StageExit,
}

impl StageSummary {
    pub fn new(kind: StageKind) -> Self {
        Self {
            kind,
            received: 0,
            emitted: 0,
            exit: StageExit::UpstreamClosed,
        }
    }

    pub(crate) fn finish(mut self, exit: StageExit) -> Self {
        self.exit = exit;
        self
    }
}

/// パイプライン全体のサマリー
#[derive(Debug, Clone, Serialize)]
pub struct PipelineSummary {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub stages: Vec<StageSummary>,
}

impl PipelineSummary {
    /// 条件に合うステージが受け渡した値の合計
    pub fn total_emitted(&self, filter: impl Fn(&StageKind) -> bool) -> usize {
        self.stages
            .iter()
            .filter(|stage| filter(&stage.kind))
            .map(|stage| stage.emitted)
            .sum()
    }

    /// ワーカーステージの数
    pub fn worker_count(&self) -> usize {
        self.stages
            .iter()
            .filter(|stage| matches!(stage.kind, StageKind::Worker { .. }))
            .count()
    }

    /// キャンセルで終了したステージの数
    pub fn cancelled_stages(&self) -> usize {
        self.stages
            .iter()
            .filter(|stage| stage.exit == StageExit::Cancelled)
            .count()
    }
}
