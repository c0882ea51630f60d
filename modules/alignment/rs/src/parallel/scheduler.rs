use std::sync::Arc;

use derive_more::Constructor;
use eyre::Result;
use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use seqalign_core_rs::parallelism;

use crate::Alignable;
use crate::pairwise::{scoring, AlignConfig};

use super::admission::Admission;
use super::cancel::CancelToken;
use super::config::SchedulerConfig;
use super::metrics::{Metrics, NoMetrics};
use super::report::Report;
use super::{batch, wavefront};

/// A single alignment request.
#[derive(Constructor)]
pub struct Job<'a, Seq1: ?Sized, Seq2: ?Sized> {
    pub seq1: &'a Seq1,
    pub seq2: &'a Seq2,
    pub config: AlignConfig,
}

/// Runs many alignments on a dedicated thread pool.
pub struct Scheduler {
    config: SchedulerConfig,
    pool: ThreadPool,
    admission: Arc<Admission>,
    metrics: Arc<dyn Metrics>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        config.validate()?;
        let threads = parallelism::available(*config.threads())?;
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        debug!(
            "Alignment scheduler: {threads} threads, {0}x{0} blocks, {1} lanes, {2} in flight",
            config.block_size(),
            config.lane_width(),
            config.max_in_flight()
        );

        Ok(Self {
            admission: Admission::new(*config.max_in_flight()),
            config,
            pool,
            metrics: Arc::new(NoMetrics),
        })
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Admission slots shared by wavefront submissions.
    pub fn admission(&self) -> &Arc<Admission> {
        &self.admission
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Align many (typically short) independent pairs.
    ///
    /// Unbanded jobs are grouped by configuration, sorted by length and packed into lane
    /// buckets; banded jobs run one per task. Reports follow the submission order.
    pub fn batch<Scheme, Seq1, Seq2>(
        &self,
        scheme: &Scheme,
        jobs: &[Job<'_, Seq1, Seq2>],
        cancel: &CancelToken,
    ) -> Vec<Report<<Scheme as scoring::Scheme>::Score>>
    where
        Scheme: scoring::Scheme + Sync + ?Sized,
        Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
        Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
    {
        batch::run(
            &self.pool,
            &self.config,
            &*self.metrics,
            scheme,
            jobs,
            cancel,
        )
    }

    /// Align (typically long) pairs with intra-alignment parallelism.
    ///
    /// Every DP matrix is cut into square blocks computed in anti-diagonal (wavefront) order
    /// as soon as their top, left and top-left neighbours are done. At most `max_in_flight`
    /// instances run at once. Reports follow the submission order.
    pub fn wavefront<Scheme, Seq1, Seq2>(
        &self,
        scheme: &Scheme,
        jobs: &[Job<'_, Seq1, Seq2>],
        cancel: &CancelToken,
    ) -> Vec<Report<<Scheme as scoring::Scheme>::Score>>
    where
        Scheme: scoring::Scheme + Sync + ?Sized,
        Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
        Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
    {
        wavefront::run(
            &self.pool,
            &self.config,
            &self.admission,
            &*self.metrics,
            scheme,
            jobs,
            cancel,
        )
    }
}
