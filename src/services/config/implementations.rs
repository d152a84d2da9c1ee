// 設定管理の具象実装

use crate::core::{PipelineConfig, PipelineError, PipelineResult, PredicateExecution};

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultPipelineConfig {
    worker_count: usize,
    buffer_size: usize,
    execution: PredicateExecution,
    enable_progress: bool,
}

impl DefaultPipelineConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            worker_count: cpu_count.max(1),
            buffer_size: 1,
            execution: PredicateExecution::Blocking,
            enable_progress: true,
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_predicate_execution(mut self, execution: PredicateExecution) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn worker_count(&self) -> usize {
        self.worker_count
    }

    fn channel_buffer_size(&self) -> usize {
        self.buffer_size
    }

    fn predicate_execution(&self) -> PredicateExecution {
        self.execution
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// 設定値の検証
///
/// どの `PipelineConfig` 実装にも同じ規則を適用する
pub fn validate_config<C: PipelineConfig + ?Sized>(config: &C) -> PipelineResult<()> {
    if config.worker_count() == 0 {
        return Err(PipelineError::validation(
            "worker_count",
            "ワーカー数は1以上である必要があります",
        ));
    }

    if config.channel_buffer_size() == 0 {
        return Err(PipelineError::validation(
            "channel_buffer_size",
            "バッファサイズは1以上である必要があります",
        ));
    }

    Ok(())
}
