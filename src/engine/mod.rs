// エンジン層 - パイプラインの各ステージとオーケストレーション
// コア層のStreamとキャンセルシグナルを組み合わせて並列処理を提供

pub mod api;
pub mod fan_in;
pub mod fan_out;
pub mod generator;
pub mod pipeline;
pub mod take;
pub mod worker;

// 公開API - 各ステージの起動関数と所有者
pub use api::{run_fan_out_fan_in, run_single_worker};
pub use fan_in::{fan_in, fan_in_with_capacity};
pub use fan_out::{fan_out, fan_out_with};
pub use generator::{
    spawn_generator, spawn_generator_with_capacity, spawn_source, spawn_source_with_capacity,
};
pub use pipeline::Pipeline;
pub use take::{take_n, take_n_with_capacity};
pub use worker::{spawn_worker, spawn_worker_with, WorkerOptions};
