// 進捗監視の具象実装

use crate::core::{PipelineReporter, PipelineSummary, StageExit, StageSummary};
use async_trait::async_trait;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsolePipelineReporter {
    quiet: bool,
}

impl ConsolePipelineReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

#[async_trait]
impl PipelineReporter for ConsolePipelineReporter {
    async fn report_started(&self, worker_count: usize) {
        if !self.quiet {
            println!("🚀 Starting pipeline with {worker_count} workers...");
        }
    }

    async fn report_stage_finished(&self, stage: &StageSummary) {
        if self.quiet {
            return;
        }
        let reason = match stage.exit {
            StageExit::Cancelled => "cancelled",
            StageExit::UpstreamClosed => "upstream closed",
            StageExit::DownstreamClosed => "downstream closed",
            StageExit::LimitReached => "limit reached",
        };
        println!(
            "📊 {}: received {}, emitted {} ({reason})",
            stage.kind.label(),
            stage.received,
            stage.emitted
        );
    }

    async fn report_cancelled(&self) {
        if !self.quiet {
            println!("🛑 Cancellation triggered, waiting for stages to stop...");
        }
    }

    async fn report_completed(&self, summary: &PipelineSummary) {
        if !self.quiet {
            println!(
                "✅ Completed! Stages: {}, Elapsed: {}ms",
                summary.stages.len(),
                summary.elapsed_ms
            );
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpPipelineReporter;

impl NoOpPipelineReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PipelineReporter for NoOpPipelineReporter {
    async fn report_started(&self, _worker_count: usize) {
        // 何もしない
    }

    async fn report_stage_finished(&self, _stage: &StageSummary) {
        // 何もしない
    }

    async fn report_cancelled(&self) {
        // 何もしない
    }

    async fn report_completed(&self, _summary: &PipelineSummary) {
        // 何もしない
    }
}
