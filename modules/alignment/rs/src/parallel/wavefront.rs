use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use log::{debug, warn};
use rayon::{Scope, ThreadPool};

use crate::pairwise::dp::{AffineGaps, Cell, Kernel, LinearGaps, Origin, Recurrence, Trace};
use crate::pairwise::matrix::{Layout, Tiled};
use crate::pairwise::scoring::gaps::GapKind;
use crate::pairwise::scoring::{self, Score};
use crate::pairwise::scout::Scout;
use crate::pairwise::traceback::TraceSource;
use crate::pairwise::{self, AlignConfig};
use crate::{Alignable, Error};

use super::admission::{Admission, Permit};
use super::cancel::CancelToken;
use super::config::{Backpressure, SchedulerConfig};
use super::metrics::Metrics;
use super::report::{InstanceId, Outcome, Report, Status};
use super::scheduler::Job;

/// Lifecycle of a wavefront block.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BlockState {
    /// Waiting for the top, left or top-left neighbour
    Pending = 0,
    /// Every dependency is done, the block is queued
    Ready = 1,
    Running = 2,
    Done = 3,
}

/// Published result of a block: its boundary cells, local traces and best end node.
struct Tile<S: Score> {
    bottom: Vec<Cell<S>>,
    right: Vec<Cell<S>>,
    traces: Vec<Trace>,
    scout: Scout<S>,
}

struct Context<'a> {
    cancel: &'a CancelToken,
    metrics: &'a dyn Metrics,
}

struct Instance<'a, Scheme, Seq1, Seq2, R>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: ?Sized,
    Seq2: ?Sized,
{
    id: InstanceId,
    scheme: &'a Scheme,
    seq1: &'a Seq1,
    seq2: &'a Seq2,
    config: &'a AlignConfig,
    kernel: Kernel<'a, Scheme, Seq1, Seq2, R>,
    layout: Tiled,
    coords: Vec<(usize, usize)>,
    tiles: Vec<OnceLock<Tile<<Scheme as scoring::Scheme>::Score>>>,
    pending: Vec<AtomicUsize>,
    states: Vec<AtomicU8>,
    remaining: AtomicUsize,
    live: AtomicUsize,
    outcome: OnceLock<Outcome<<Scheme as scoring::Scheme>::Score>>,
    permit: Mutex<Option<Permit>>,
}

impl<'a, Scheme, Seq1, Seq2, R> Instance<'a, Scheme, Seq1, Seq2, R>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    R: Recurrence,
{
    fn new(
        id: InstanceId,
        scheme: &'a Scheme,
        job: &'a Job<'a, Seq1, Seq2>,
        layout: Tiled,
    ) -> Self {
        let kernel = Kernel::new(
            scheme,
            job.seq1,
            job.seq2,
            Origin::default(),
            *job.config.mode(),
            *job.config.end_gaps(),
        );
        let coords: Vec<_> = layout.tiles().collect();
        let mut instance = Self {
            id,
            scheme,
            seq1: job.seq1,
            seq2: job.seq2,
            config: &job.config,
            kernel,
            tiles: coords.iter().map(|_| OnceLock::new()).collect(),
            pending: Vec::with_capacity(coords.len()),
            states: coords
                .iter()
                .map(|_| AtomicU8::new(BlockState::Pending as u8))
                .collect(),
            remaining: AtomicUsize::new(coords.len()),
            live: AtomicUsize::new(0),
            outcome: OnceLock::new(),
            permit: Mutex::new(None),
            layout,
            coords,
        };
        instance.pending = instance
            .coords
            .iter()
            .map(|&(trow, tcol)| AtomicUsize::new(instance.predecessors(trow, tcol).count()))
            .collect();
        instance
    }

    fn predecessors(&self, trow: usize, tcol: usize) -> impl Iterator<Item = usize> + '_ {
        [
            (trow.checked_sub(1), Some(tcol)),
            (Some(trow), tcol.checked_sub(1)),
            (trow.checked_sub(1), tcol.checked_sub(1)),
        ]
        .into_iter()
        .filter_map(|(t, c)| self.layout.slot(t?, c?))
    }

    fn successors(&self, trow: usize, tcol: usize) -> impl Iterator<Item = usize> + '_ {
        [(trow + 1, tcol), (trow, tcol + 1), (trow + 1, tcol + 1)]
            .into_iter()
            .filter_map(|(t, c)| self.layout.slot(t, c))
    }

    fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, pending)| pending.load(Ordering::Acquire) == 0)
            .map(|(slot, _)| slot)
    }

    fn published(
        &self,
        trow: Option<usize>,
        tcol: Option<usize>,
    ) -> Option<&Tile<<Scheme as scoring::Scheme>::Score>> {
        let slot = self.layout.slot(trow?, tcol?)?;
        let tile = self.tiles[slot].get();
        debug_assert!(tile.is_some(), "Block {slot} read before completion");
        tile
    }

    fn transition(&self, slot: usize, from: BlockState, to: BlockState) {
        let swapped = self.states[slot].compare_exchange(
            from as u8,
            to as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        debug_assert!(swapped.is_ok(), "Block {slot}: invalid transition {from:?} -> {to:?}");
    }

    /// Fill a single block from the boundaries published by its neighbours.
    fn compute(&self, trow: usize, tcol: usize) -> Tile<<Scheme as scoring::Scheme>::Score> {
        let unreachable = Cell::unreachable();
        let (rows, cols) = self.layout.tile_bounds(trow, tcol);
        let (height, width) = (rows.len(), cols.len());

        let top = self.published(trow.checked_sub(1), Some(tcol));
        let left = self.published(Some(trow), tcol.checked_sub(1));
        let corner = self
            .published(trow.checked_sub(1), tcol.checked_sub(1))
            .and_then(|tile| tile.bottom.last().copied())
            .unwrap_or(unreachable);

        let (len1, len2) = (self.layout.rows() - 1, self.layout.cols() - 1);
        let mut scout = Scout::new(*self.config.mode(), *self.config.end_gaps(), len1, len2);
        let mut cells = vec![unreachable; height * width];
        let mut traces = if *self.config.traceback() {
            vec![Trace::START; height * width]
        } else {
            Vec::new()
        };

        for (r, row) in rows.clone().enumerate() {
            let span = self.layout.span(row);
            for col in span.start.max(cols.start)..span.end.min(cols.end) {
                let c = col - cols.start;
                let up = match r {
                    0 => top.map_or(unreachable, |tile| tile.bottom[c]),
                    _ => cells[(r - 1) * width + c],
                };
                let before = match c {
                    0 => left.map_or(unreachable, |tile| tile.right[r]),
                    _ => cells[r * width + c - 1],
                };
                let diag = match (r, c) {
                    (0, 0) => corner,
                    (0, _) => top.map_or(unreachable, |tile| tile.bottom[c - 1]),
                    (_, 0) => left.map_or(unreachable, |tile| tile.right[r - 1]),
                    _ => cells[(r - 1) * width + c - 1],
                };

                let (cell, trace) = self.kernel.cell(row, col, &diag, &up, &before);
                cells[r * width + c] = cell;
                if !traces.is_empty() {
                    traces[self.layout.local(row, col)] = trace;
                }
                scout.observe(row, col, &cell);
            }
        }

        Tile {
            bottom: cells[(height - 1) * width..].to_vec(),
            right: (0..height).map(|r| cells[r * width + width - 1]).collect(),
            traces,
            scout,
        }
    }

    /// Merge block scouts and trace back once the last block is done.
    fn complete(&self, ctx: &Context<'_>) {
        let (len1, len2) = (self.layout.rows() - 1, self.layout.cols() - 1);
        let mut scout = Scout::new(*self.config.mode(), *self.config.end_gaps(), len1, len2);
        for tile in self.tiles.iter().filter_map(OnceLock::get) {
            scout.merge(&tile.scout);
        }

        let traceback = *self.config.traceback();
        let result = scout.finalize().map(|hit| {
            pairwise::finish(
                self.scheme,
                self.seq1,
                self.seq2,
                Origin::default(),
                &hit,
                traceback.then_some(self),
                self.kernel.rules(),
            )
        });
        self.settle(ctx, result.into());
    }

    fn settle(&self, ctx: &Context<'_>, outcome: Outcome<<Scheme as scoring::Scheme>::Score>) {
        let status = outcome.status();
        if self.outcome.set(outcome).is_ok() {
            ctx.metrics.instance_done(self.id, status);
            // Free the admission slot for the next instance
            self.permit
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
        }
    }

    /// Drop a reference held by a task (or the submitter). The last one out settles
    /// instances that were abandoned because of cancellation.
    fn retire(&self, ctx: &Context<'_>) {
        if self.live.fetch_sub(1, Ordering::AcqRel) == 1 && self.outcome.get().is_none() {
            debug!("Alignment {} cancelled", self.id);
            self.settle(ctx, Outcome::Cancelled);
        }
    }
}

impl<Scheme, Seq1, Seq2, R> TraceSource for Instance<'_, Scheme, Seq1, Seq2, R>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: ?Sized,
    Seq2: ?Sized,
{
    fn trace(&self, row: usize, col: usize) -> Trace {
        if !self.layout.contains(row, col) {
            return Trace::START;
        }
        let (trow, tcol) = self.layout.tile_of(row, col);
        let tile = self
            .layout
            .slot(trow, tcol)
            .and_then(|slot| self.tiles[slot].get());
        match tile {
            Some(tile) => tile.traces[self.layout.local(row, col)],
            None => Trace::START,
        }
    }
}

fn spawn_block<'s, 'a: 's, Scheme, Seq1, Seq2, R>(
    scope: &Scope<'s>,
    ctx: &'s Context<'s>,
    instance: &'s Instance<'a, Scheme, Seq1, Seq2, R>,
    slot: usize,
) where
    Scheme: scoring::Scheme + Sync + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
    R: Recurrence,
{
    instance.live.fetch_add(1, Ordering::AcqRel);
    instance.transition(slot, BlockState::Pending, BlockState::Ready);
    scope.spawn(move |scope| run_block(scope, ctx, instance, slot));
}

fn run_block<'s, 'a: 's, Scheme, Seq1, Seq2, R>(
    scope: &Scope<'s>,
    ctx: &'s Context<'s>,
    instance: &'s Instance<'a, Scheme, Seq1, Seq2, R>,
    slot: usize,
) where
    Scheme: scoring::Scheme + Sync + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
    R: Recurrence,
{
    // Cancelled blocks never publish, so their successors are never scheduled
    if ctx.cancel.is_cancelled() {
        instance.retire(ctx);
        return;
    }

    let (trow, tcol) = instance.coords[slot];
    instance.transition(slot, BlockState::Ready, BlockState::Running);
    let tile = instance.compute(trow, tcol);
    if instance.tiles[slot].set(tile).is_err() {
        warn!("Block ({trow}, {tcol}) of {} computed twice", instance.id);
    }
    instance.transition(slot, BlockState::Running, BlockState::Done);
    ctx.metrics.block_done(instance.id);

    for next in instance.successors(trow, tcol) {
        if instance.pending[next].fetch_sub(1, Ordering::AcqRel) == 1 {
            spawn_block(scope, ctx, instance, next);
        }
    }
    if instance.remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
        instance.complete(ctx);
    }
    instance.retire(ctx);
}

pub(crate) fn run<Scheme, Seq1, Seq2>(
    pool: &ThreadPool,
    config: &SchedulerConfig,
    admission: &Arc<Admission>,
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
    match scheme.kind() {
        GapKind::Linear => {
            run_with::<LinearGaps, _, _, _>(pool, config, admission, metrics, scheme, jobs, cancel)
        }
        GapKind::Affine => {
            run_with::<AffineGaps, _, _, _>(pool, config, admission, metrics, scheme, jobs, cancel)
        }
    }
}

fn run_with<R, Scheme, Seq1, Seq2>(
    pool: &ThreadPool,
    config: &SchedulerConfig,
    admission: &Arc<Admission>,
    metrics: &dyn Metrics,
    scheme: &Scheme,
    jobs: &[Job<'_, Seq1, Seq2>],
    cancel: &CancelToken,
) -> Vec<Report<<Scheme as scoring::Scheme>::Score>>
where
    R: Recurrence,
    Scheme: scoring::Scheme + Sync + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + Sync + ?Sized,
{
    let ctx = Context { cancel, metrics };
    let fail = |ind: usize, err: Error| {
        warn!("Alignment {} failed validation: {err}", InstanceId::new(ind));
        metrics.instance_done(InstanceId::new(ind), Status::Failed);
        err
    };

    let valid = scoring::validate(scheme);
    let instances: Vec<Result<Instance<'_, Scheme, Seq1, Seq2, R>, Error>> = jobs
        .iter()
        .enumerate()
        .map(|(ind, job)| {
            if let Err(err) = &valid {
                return Err(fail(ind, err.clone()));
            }
            match job.config.validate(job.seq1.len(), job.seq2.len()) {
                Ok(band) => {
                    let layout = Tiled::new(
                        job.seq1.len(),
                        job.seq2.len(),
                        *config.block_size(),
                        band,
                    );
                    Ok(Instance::new(InstanceId::new(ind), scheme, job, layout))
                }
                Err(err) => Err(fail(ind, err)),
            }
        })
        .collect();

    pool.in_place_scope(|scope| {
        for instance in instances.iter().filter_map(|x| x.as_ref().ok()) {
            if cancel.is_cancelled() {
                instance.settle(&ctx, Outcome::Cancelled);
                continue;
            }

            let permit = match config.backpressure() {
                Backpressure::Block => match admission.acquire(cancel) {
                    Some(permit) => permit,
                    None => {
                        instance.settle(&ctx, Outcome::Cancelled);
                        continue;
                    }
                },
                Backpressure::Reject => match admission.try_acquire() {
                    Ok(permit) => permit,
                    Err(err) => {
                        debug!("Alignment {} rejected: {err}", instance.id);
                        instance.settle(&ctx, Outcome::Failed(err));
                        continue;
                    }
                },
            };
            *instance.permit.lock().unwrap_or_else(PoisonError::into_inner) = Some(permit);
            debug!(
                "Alignment {} admitted: {} blocks of {}x{}",
                instance.id,
                instance.coords.len(),
                instance.layout.tile(),
                instance.layout.tile()
            );

            // The submitter holds a reference until every root block is spawned
            instance.live.store(1, Ordering::Release);
            let roots: Vec<_> = instance.roots().collect();
            for slot in roots {
                spawn_block(scope, &ctx, instance, slot);
            }
            instance.retire(&ctx);
        }
    });

    instances
        .into_iter()
        .enumerate()
        .map(|(ind, instance)| {
            let outcome = match instance {
                Ok(instance) => instance.outcome.into_inner().unwrap_or(Outcome::Cancelled),
                Err(err) => Outcome::Failed(err),
            };
            Report::new(InstanceId::new(ind), outcome)
        })
        .collect()
}
