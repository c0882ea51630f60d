use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

use crate::pairwise::alignment::utils;
use crate::pairwise::config::AlignConfig;
use crate::pairwise::dp::{AffineGaps, Kernel, LinearGaps, Origin, Recurrence};
use crate::pairwise::fill::fill;
use crate::pairwise::matrix::{Banded, DPMatrix, Full, Layout, Workspace};
use crate::pairwise::scoring::{self, gaps::GapKind};
use crate::pairwise::scout::{Hit, Scout};
use crate::pairwise::traceback::{self, Rules, TraceSource};
use crate::pairwise::Alignment;
use crate::{Alignable, Error};

/// Result of a single pairwise alignment.
#[derive(Clone, PartialEq, Debug, Getters, Dissolve, Constructor)]
pub struct Solution<S: scoring::Score> {
    /// Optimal score
    score: S,
    /// End node of the optimal path in sequence coordinates (seq1, seq2)
    end: (usize, usize),
    /// Optimal path, present only if the traceback was requested
    alignment: Option<Alignment<S>>,
}

/// Align two sequences with the given scheme and configuration.
pub fn solve<Scheme, Seq1, Seq2>(
    scheme: &Scheme,
    config: &AlignConfig,
    seq1: &Seq1,
    seq2: &Seq2,
    workspace: &mut Workspace<<Scheme as scoring::Scheme>::Score>,
) -> Result<Solution<<Scheme as scoring::Scheme>::Score>, Error>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
{
    scoring::validate(scheme)?;
    solve_window(
        scheme,
        config,
        seq1,
        seq2,
        Origin::default(),
        (seq1.len(), seq2.len()),
        workspace,
    )
}

/// Align the windows `origin.seq1..origin.seq1 + lens.0` and `origin.seq2..origin.seq2 + lens.1`.
/// The scheme must be validated by the caller.
pub(crate) fn solve_window<Scheme, Seq1, Seq2>(
    scheme: &Scheme,
    config: &AlignConfig,
    seq1: &Seq1,
    seq2: &Seq2,
    origin: Origin,
    (len1, len2): (usize, usize),
    workspace: &mut Workspace<<Scheme as scoring::Scheme>::Score>,
) -> Result<Solution<<Scheme as scoring::Scheme>::Score>, Error>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
{
    debug_assert!(origin.seq1 + len1 <= seq1.len() && origin.seq2 + len2 <= seq2.len());
    let band = config.validate(len1, len2)?;
    match (scheme.kind(), band) {
        (GapKind::Linear, None) => run::<LinearGaps, _, _, _, _>(
            scheme,
            config,
            seq1,
            seq2,
            origin,
            Full::new(len1, len2),
            workspace,
        ),
        (GapKind::Linear, Some(band)) => run::<LinearGaps, _, _, _, _>(
            scheme,
            config,
            seq1,
            seq2,
            origin,
            Banded::new(len1, len2, band),
            workspace,
        ),
        (GapKind::Affine, None) => run::<AffineGaps, _, _, _, _>(
            scheme,
            config,
            seq1,
            seq2,
            origin,
            Full::new(len1, len2),
            workspace,
        ),
        (GapKind::Affine, Some(band)) => run::<AffineGaps, _, _, _, _>(
            scheme,
            config,
            seq1,
            seq2,
            origin,
            Banded::new(len1, len2, band),
            workspace,
        ),
    }
}

fn run<R, Scheme, Seq1, Seq2, L>(
    scheme: &Scheme,
    config: &AlignConfig,
    seq1: &Seq1,
    seq2: &Seq2,
    origin: Origin,
    layout: L,
    workspace: &mut Workspace<<Scheme as scoring::Scheme>::Score>,
) -> Result<Solution<<Scheme as scoring::Scheme>::Score>, Error>
where
    R: Recurrence,
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    L: Layout,
{
    let (len1, len2) = (layout.rows() - 1, layout.cols() - 1);
    let kernel = Kernel::<_, _, _, R>::new(
        scheme,
        seq1,
        seq2,
        origin,
        *config.mode(),
        *config.end_gaps(),
    );
    let mut scout = Scout::new(*config.mode(), *config.end_gaps(), len1, len2);
    let mut matrix = DPMatrix::recycle(layout, *config.traceback(), workspace);

    fill(&kernel, &mut matrix, &mut scout);

    let traces = matrix.release(workspace);
    let solution = scout
        .finalize()
        .map(|hit| finish(scheme, seq1, seq2, origin, &hit, traces.as_ref(), kernel.rules()));
    if let Some(traces) = traces {
        workspace.recycle_traces(traces.into_buffer());
    }
    solution
}

/// Build the solution for a scouted end node, running the traceback if traces are available.
pub(crate) fn finish<Scheme, Seq1, Seq2, T>(
    scheme: &Scheme,
    seq1: &Seq1,
    seq2: &Seq2,
    origin: Origin,
    hit: &Hit<<Scheme as scoring::Scheme>::Score>,
    traces: Option<&T>,
    rules: Rules,
) -> Solution<<Scheme as scoring::Scheme>::Score>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    T: TraceSource + ?Sized,
{
    let alignment = traces.map(|traces| {
        let path = traceback::traceback(traces, (hit.row, hit.col), rules);
        let rows = origin.seq1 + path.rows.start..origin.seq1 + path.rows.end;
        let cols = origin.seq2 + path.cols.start..origin.seq2 + path.cols.end;
        let steps = utils::disambiguate(path.steps, scheme, seq1, rows.start, seq2, cols.start);
        Alignment::new(hit.score, steps, rows, cols)
    });
    Solution::new(
        hit.score,
        (origin.seq1 + hit.row, origin.seq2 + hit.col),
        alignment,
    )
}

/// Owns a scoring scheme together with reusable DP buffers.
pub struct Aligner<Scheme: scoring::Scheme> {
    scheme: Scheme,
    workspace: Workspace<<Scheme as scoring::Scheme>::Score>,
}

impl<Scheme: scoring::Scheme> Aligner<Scheme> {
    pub fn new(scheme: Scheme) -> Result<Self, Error> {
        scoring::validate(&scheme)?;
        Ok(Self {
            scheme,
            workspace: Workspace::new(),
        })
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn align<Seq1, Seq2>(
        &mut self,
        config: &AlignConfig,
        seq1: &Seq1,
        seq2: &Seq2,
    ) -> Result<Solution<<Scheme as scoring::Scheme>::Score>, Error>
    where
        Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
        Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    {
        solve_window(
            &self.scheme,
            config,
            seq1,
            seq2,
            Origin::default(),
            (seq1.len(), seq2.len()),
            &mut self.workspace,
        )
    }

    /// Drop cached DP buffers.
    pub fn reset(&mut self) {
        self.workspace.reset();
    }
}
