use std::cell::RefCell;
use std::sync::OnceLock;

use ahash::HashMap;
use itertools::Itertools;
use log::{debug, warn};
use rayon::ThreadPool;
use thread_local::ThreadLocal;

use crate::Alignable;
use crate::pairwise::dp::{AffineGaps, LinearGaps, Origin};
use crate::pairwise::scoring::gaps::GapKind;
use crate::pairwise::scoring::{self, Score};
use crate::pairwise::{self, AlignConfig, Workspace};

use super::cancel::CancelToken;
use super::config::SchedulerConfig;
use super::lanes;
use super::metrics::Metrics;
use super::report::{InstanceId, Outcome, Report};
use super::scheduler::Job;

struct Outcomes<'a, S: Score> {
    slots: Vec<OnceLock<Outcome<S>>>,
    metrics: &'a dyn Metrics,
}

impl<S: Score> Outcomes<'_, S> {
    fn settle(&self, ind: usize, outcome: Outcome<S>) {
        let status = outcome.status();
        if self.slots[ind].set(outcome).is_ok() {
            self.metrics.instance_done(InstanceId::new(ind), status);
        }
    }

    fn into_reports(self) -> Vec<Report<S>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(ind, slot)| {
                Report::new(
                    InstanceId::new(ind),
                    slot.into_inner().unwrap_or(Outcome::Cancelled),
                )
            })
            .collect()
    }
}

pub(crate) fn run<Scheme, Seq1, Seq2>(
    pool: &ThreadPool,
    config: &SchedulerConfig,
    metrics: &dyn Metrics,
    scheme: &Scheme,
    jobs: &[Job<'_, Seq1, Seq2>],
    cancel: &CancelToken,
) -> Vec<Report<<Scheme as scoring::Scheme>::Score>>
where
    Scheme: scoring::Scheme + Sync + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
{
    let outcomes = Outcomes {
        slots: (0..jobs.len()).map(|_| OnceLock::new()).collect(),
        metrics,
    };

    if let Err(err) = scoring::validate(scheme) {
        warn!("Rejecting a batch of {} alignments: {err}", jobs.len());
        for ind in 0..jobs.len() {
            outcomes.settle(ind, Outcome::Failed(err.clone()));
        }
        return outcomes.into_reports();
    }
    if cancel.is_cancelled() {
        debug!("Batch of {} alignments cancelled before start", jobs.len());
        for ind in 0..jobs.len() {
            outcomes.settle(ind, Outcome::Cancelled);
        }
        return outcomes.into_reports();
    }

    // Unbanded jobs sharing a configuration are packed into lanes, banded ones run alone
    let mut groups: HashMap<&AlignConfig, Vec<usize>> = HashMap::default();
    let mut banded = Vec::new();
    for (ind, job) in jobs.iter().enumerate() {
        match job.config.validate(job.seq1.len(), job.seq2.len()) {
            Err(err) => {
                warn!("Alignment {} failed validation: {err}", InstanceId::new(ind));
                outcomes.settle(ind, Outcome::Failed(err));
            }
            Ok(Some(_)) => banded.push(ind),
            Ok(None) => groups.entry(&job.config).or_default().push(ind),
        }
    }

    let lane_width = *config.lane_width();
    let buckets = groups
        .into_values()
        .flat_map(|group| {
            let group = group
                .into_iter()
                .sorted_by_key(|&ind| (jobs[ind].seq1.len(), jobs[ind].seq2.len()))
                .collect_vec();
            group.chunks(lane_width).map(<[usize]>::to_vec).collect_vec()
        })
        .collect_vec();
    debug!(
        "Batch of {} alignments: {} lane buckets, {} banded",
        jobs.len(),
        buckets.len(),
        banded.len()
    );

    let workspaces: ThreadLocal<RefCell<Workspace<<Scheme as scoring::Scheme>::Score>>> =
        ThreadLocal::new();
    let (outcomes_ref, workspaces) = (&outcomes, &workspaces);
    pool.scope(|s| {
        for bucket in &buckets {
            s.spawn(move |_| {
                if cancel.is_cancelled() {
                    for &ind in bucket {
                        outcomes_ref.settle(ind, Outcome::Cancelled);
                    }
                    return;
                }

                let config = &jobs[bucket[0]].config;
                let pairs = bucket
                    .iter()
                    .map(|&ind| (jobs[ind].seq1, jobs[ind].seq2))
                    .collect_vec();
                let results = match scheme.kind() {
                    GapKind::Linear => lanes::align::<LinearGaps, _, _, _>(scheme, config, &pairs),
                    GapKind::Affine => lanes::align::<AffineGaps, _, _, _>(scheme, config, &pairs),
                };
                for (&ind, result) in bucket.iter().zip(results) {
                    metrics.block_done(InstanceId::new(ind));
                    outcomes_ref.settle(ind, result.into());
                }
            });
        }

        for &ind in &banded {
            s.spawn(move |_| {
                if cancel.is_cancelled() {
                    outcomes_ref.settle(ind, Outcome::Cancelled);
                    return;
                }

                let job = &jobs[ind];
                let mut workspace = workspaces.get_or_default().borrow_mut();
                let result = pairwise::solve_window(
                    scheme,
                    &job.config,
                    job.seq1,
                    job.seq2,
                    Origin::default(),
                    (job.seq1.len(), job.seq2.len()),
                    &mut workspace,
                );
                metrics.block_done(InstanceId::new(ind));
                outcomes_ref.settle(ind, result.into());
            });
        }
    });

    outcomes.into_reports()
}
