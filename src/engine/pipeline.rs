// Pipeline - ステージの所有者
// キャンセルシグナルを唯一保持し、起動した全ステージのハンドルを記録して最後に待ち合わせる

use super::{
    fan_in::fan_in_with_capacity,
    fan_out::fan_out_with,
    generator::{spawn_generator_with_capacity, spawn_source_with_capacity},
    take::take_n_with_capacity,
    worker::{spawn_worker_with, WorkerOptions},
};
use crate::{
    core::{
        CancelSignal, CancelToken, PipelineConfig, PipelineError, PipelineReporter,
        PipelineResult, PipelineSummary, StageHandle, StageKind, Stream,
    },
    services::validate_config,
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// パイプラインの所有者
///
/// `shutdown()` でキャンセルを一度だけ発火し、全ステージの終了を待つ。
/// `shutdown()` を呼ばずにドロップした場合もシグナルのドロップでキャンセルされるが、
/// その場合ステージの終了は待たない。
pub struct Pipeline<C, R> {
    signal: CancelSignal,
    stages: Vec<(StageKind, StageHandle)>,
    config: C,
    reporter: Arc<R>,
    next_worker_id: usize,
    started_at: chrono::DateTime<Utc>,
    clock: Instant,
}

impl<C, R> Pipeline<C, R>
where
    C: PipelineConfig,
    R: PipelineReporter + 'static,
{
    /// 設定を検証してパイプラインを開始
    pub async fn start(config: C, reporter: R) -> PipelineResult<Self> {
        validate_config(&config)?;

        let pipeline = Self {
            signal: CancelSignal::new(),
            stages: Vec::new(),
            config,
            reporter: Arc::new(reporter),
            next_worker_id: 0,
            started_at: Utc::now(),
            clock: Instant::now(),
        };

        if pipeline.config.enable_progress_reporting() {
            pipeline
                .reporter
                .report_started(pipeline.config.worker_count())
                .await;
        }

        Ok(pipeline)
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// ステージに渡す監視権限
    pub fn token(&self) -> CancelToken {
        self.signal.observe()
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.is_cancelled()
    }

    /// 起動済みステージの数
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// 無限Generatorを起動
    pub fn generator<T, F>(&mut self, producer: F) -> Stream<T>
    where
        T: Send + 'static,
        F: FnMut() -> T + Send + 'static,
    {
        let (stream, handle) = spawn_generator_with_capacity(
            self.token(),
            producer,
            self.config.channel_buffer_size(),
        );
        self.stages.push((StageKind::Generator, handle));
        stream
    }

    /// 有限Sourceを起動
    pub fn source<T, I>(&mut self, items: I) -> Stream<T>
    where
        T: Send + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        let (stream, handle) =
            spawn_source_with_capacity(self.token(), items, self.config.channel_buffer_size());
        self.stages.push((StageKind::Source, handle));
        stream
    }

    /// 単一ワーカーを起動
    pub fn worker<T, P>(&mut self, upstream: &Stream<T>, predicate: P) -> Stream<T>
    where
        T: Send + 'static,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let options = self.worker_options();
        self.next_worker_id += 1;

        let (stream, handle) = spawn_worker_with(self.token(), upstream, Arc::new(predicate), options);
        self.stages.push((StageKind::Worker { id: options.id }, handle));
        stream
    }

    /// ワーカー数を指定してFan-Out
    pub fn fan_out<T, P>(
        &mut self,
        upstream: &Stream<T>,
        predicate: P,
        worker_count: usize,
    ) -> PipelineResult<Vec<Stream<T>>>
    where
        T: Send + 'static,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let template = self.worker_options();
        let (streams, handles) = fan_out_with(
            self.token(),
            upstream,
            Arc::new(predicate),
            worker_count,
            template,
        )?;

        for (offset, handle) in handles.into_iter().enumerate() {
            let kind = StageKind::Worker {
                id: template.id + offset,
            };
            self.stages.push((kind, handle));
        }
        self.next_worker_id += worker_count;

        Ok(streams)
    }

    /// 設定のワーカー数でFan-Out
    pub fn fan_out_with_config<T, P>(
        &mut self,
        upstream: &Stream<T>,
        predicate: P,
    ) -> PipelineResult<Vec<Stream<T>>>
    where
        T: Send + 'static,
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let worker_count = self.config.worker_count();
        self.fan_out(upstream, predicate, worker_count)
    }

    /// 複数のStreamを合流
    pub fn fan_in<T>(&mut self, upstreams: Vec<Stream<T>>) -> Stream<T>
    where
        T: Send + 'static,
    {
        let inputs = upstreams.len();
        let (stream, handle) =
            fan_in_with_capacity(self.token(), upstreams, self.config.channel_buffer_size());
        self.stages.push((StageKind::FanIn { inputs }, handle));
        stream
    }

    /// 先頭n個だけを受け取る
    pub fn take<T>(&mut self, upstream: Stream<T>, n: usize) -> Stream<T>
    where
        T: Send + 'static,
    {
        let (stream, handle) =
            take_n_with_capacity(self.token(), upstream, n, self.config.channel_buffer_size());
        self.stages.push((StageKind::Take { limit: n }, handle));
        stream
    }

    /// キャンセルを発火し、全ステージの終了を待ってサマリーを返す
    ///
    /// パニックしたステージがあっても残りのステージは全て待ち合わせ、
    /// 最初に見つかった失敗を `PipelineError::TaskError` として返す。
    pub async fn shutdown(self) -> PipelineResult<PipelineSummary> {
        let Self {
            signal,
            stages,
            config,
            reporter,
            started_at,
            clock,
            ..
        } = self;
        let reporting = config.enable_progress_reporting();

        signal.trigger();
        if reporting {
            reporter.report_cancelled().await;
        }

        let mut summaries = Vec::with_capacity(stages.len());
        let mut first_failure: Option<PipelineError> = None;

        for (kind, handle) in stages {
            match handle.await {
                Ok(stage) => {
                    if reporting {
                        reporter.report_stage_finished(&stage).await;
                    }
                    summaries.push(stage);
                }
                Err(error) => {
                    if first_failure.is_none() {
                        first_failure = Some(PipelineError::task(kind.label(), error));
                    }
                }
            }
        }

        if let Some(failure) = first_failure {
            return Err(failure);
        }

        let summary = PipelineSummary {
            started_at,
            elapsed_ms: clock.elapsed().as_millis() as u64,
            stages: summaries,
        };

        if reporting {
            reporter.report_completed(&summary).await;
        }

        Ok(summary)
    }

    fn worker_options(&self) -> WorkerOptions {
        WorkerOptions {
            id: self.next_worker_id,
            capacity: self.config.channel_buffer_size(),
            execution: self.config.predicate_execution(),
        }
    }
}
