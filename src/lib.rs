// 並行ストリームパイプライン
// Generator → Fan-Out → Fan-In → Take(n) をキャンセルシグナル付きで組み立てる

pub mod cli;
pub mod core;
pub mod engine;
pub mod primes;
pub mod services;

pub use crate::core::{
    CancelSignal, CancelToken, PipelineConfig, PipelineError, PipelineReporter, PipelineResult,
    PipelineSummary, PredicateExecution, StageExit, StageHandle, StageKind, StageSummary, Stream,
};
pub use crate::engine::{
    fan_in, fan_out, run_fan_out_fan_in, run_single_worker, spawn_generator, spawn_source,
    spawn_worker, take_n, Pipeline,
};
pub use crate::services::{ConsolePipelineReporter, DefaultPipelineConfig, NoOpPipelineReporter};
