use std::sync::Arc;

use seqalign_alignment_rs::pairwise::{solve, AlignConfig, Band, EndGaps, Workspace};
use seqalign_alignment_rs::parallel::{
    Backpressure, CancelToken, Counters, InstanceId, Job, Metrics, Outcome, Scheduler,
    SchedulerConfig, Status,
};
use seqalign_alignment_rs::Error;

use super::{affine, linear, workload};

fn configs() -> Vec<AlignConfig> {
    vec![
        AlignConfig::global(),
        AlignConfig::local(),
        AlignConfig::overlap(),
        AlignConfig::semi_global(EndGaps::new(true, true, false, false)),
        AlignConfig::global().with_traceback(false),
        AlignConfig::global().with_band(Band::new(-6, 6)),
    ]
}

#[test]
fn test_batch_matches_sequential() {
    let scheme = affine(2, -3, -5, -1);
    let pairs = workload(42, 120, 40);
    let configs = configs();

    let jobs: Vec<_> = pairs
        .iter()
        .enumerate()
        .map(|(ind, (seq1, seq2))| Job::new(seq1, seq2, configs[ind % configs.len()].clone()))
        .collect();

    let counters = Arc::new(Counters::new());
    let config = SchedulerConfig::default().with_threads(4).with_lane_width(8);
    let scheduler = Scheduler::new(config).unwrap().with_metrics(counters.clone());
    let reports = scheduler.batch(&scheme, &jobs, &CancelToken::new());

    let mut workspace = Workspace::new();
    assert_eq!(reports.len(), jobs.len());
    for (ind, (report, job)) in reports.iter().zip(&jobs).enumerate() {
        assert_eq!(*report.id(), InstanceId::new(ind));
        let expected = solve(&scheme, &job.config, job.seq1, job.seq2, &mut workspace);
        assert_eq!(report.outcome(), &Outcome::from(expected));
    }
    assert_eq!(counters.done() + counters.failed(), jobs.len());
}

#[test]
fn test_wavefront_matches_sequential() {
    let scheme = linear(1, -1, -1);
    let pairs = workload(7, 12, 300);
    let configs = configs();

    let jobs: Vec<_> = pairs
        .iter()
        .enumerate()
        .map(|(ind, (seq1, seq2))| Job::new(seq1, seq2, configs[ind % configs.len()].clone()))
        .collect();

    let mut workspace = Workspace::new();
    for block_size in [5, 32] {
        let config = SchedulerConfig::default()
            .with_threads(4)
            .with_block_size(block_size)
            .with_max_in_flight(3);
        let scheduler = Scheduler::new(config).unwrap();
        let reports = scheduler.wavefront(&scheme, &jobs, &CancelToken::new());

        for (report, job) in reports.iter().zip(&jobs) {
            let expected = solve(&scheme, &job.config, job.seq1, job.seq2, &mut workspace);
            assert_eq!(report.outcome(), &Outcome::from(expected));
        }
        assert_eq!(scheduler.admission().in_flight(), 0);
    }
}

#[test]
fn test_batch_validation() {
    let scheme = affine(2, -3, -5, -1);
    let jobs = [
        Job::new(b"ACGT".as_slice(), b"".as_slice(), AlignConfig::local()),
        Job::new(b"ACGT".as_slice(), b"ACGT".as_slice(), AlignConfig::global()),
    ];
    let scheduler = Scheduler::new(SchedulerConfig::default().with_threads(2)).unwrap();

    let reports = scheduler.batch(&scheme, &jobs, &CancelToken::new());
    assert_eq!(reports[0].outcome(), &Outcome::Failed(Error::EmptySequence));
    assert_eq!(reports[1].outcome().solution().map(|x| *x.score()), Some(8));

    // Invalid schemes fail every instance
    let scheme = affine(2, -3, -1, -5);
    let reports = scheduler.batch(&scheme, &jobs, &CancelToken::new());
    for report in reports {
        assert_eq!(report.outcome(), &Outcome::Failed(Error::NonMonotonicGaps));
    }
}

#[test]
fn test_cancelled_batch() {
    let scheme = affine(2, -3, -5, -1);
    let pairs = workload(1, 10, 20);
    let jobs: Vec<_> = pairs
        .iter()
        .map(|(seq1, seq2)| Job::new(seq1, seq2, AlignConfig::global()))
        .collect();

    let cancel = CancelToken::new();
    cancel.cancel();
    let scheduler = Scheduler::new(SchedulerConfig::default().with_threads(2)).unwrap();
    for report in scheduler.batch(&scheme, &jobs, &cancel) {
        assert_eq!(report.outcome(), &Outcome::Cancelled);
    }
}

/// Cancels the whole submission once the first instance completes.
struct CancelOnFirst(CancelToken);

impl Metrics for CancelOnFirst {
    fn instance_done(&self, _id: InstanceId, _status: Status) {
        self.0.cancel();
    }
}

#[test]
fn test_cancelled_wavefront() {
    let scheme = linear(1, -1, -1);
    let pairs = workload(3, 4, 200);
    let jobs: Vec<_> = pairs
        .iter()
        .map(|(seq1, seq2)| Job::new(seq1, seq2, AlignConfig::global()))
        .collect();

    let cancel = CancelToken::new();
    let config = SchedulerConfig::default()
        .with_threads(2)
        .with_block_size(16)
        .with_max_in_flight(1);
    let scheduler = Scheduler::new(config)
        .unwrap()
        .with_metrics(Arc::new(CancelOnFirst(cancel.clone())));

    let reports = scheduler.wavefront(&scheme, &jobs, &cancel);
    assert_eq!(reports[0].outcome().status(), Status::Done);
    for report in &reports[1..] {
        assert_eq!(report.outcome(), &Outcome::Cancelled);
    }
    assert_eq!(scheduler.admission().in_flight(), 0);
}

#[test]
fn test_rejected_when_busy() {
    let scheme = linear(1, -1, -1);
    let jobs = [Job::new(b"ACGT".as_slice(), b"ACGT".as_slice(), AlignConfig::global())];

    let config = SchedulerConfig::default()
        .with_threads(2)
        .with_max_in_flight(1)
        .with_backpressure(Backpressure::Reject);
    let scheduler = Scheduler::new(config).unwrap();

    let permit = scheduler.admission().try_acquire().unwrap();
    let reports = scheduler.wavefront(&scheme, &jobs, &CancelToken::new());
    assert_eq!(reports[0].outcome(), &Outcome::Failed(Error::Busy));

    drop(permit);
    let reports = scheduler.wavefront(&scheme, &jobs, &CancelToken::new());
    assert_eq!(reports[0].outcome().status(), Status::Done);
}
