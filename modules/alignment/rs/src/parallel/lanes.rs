use derive_more::{BitAnd, BitOr};

use crate::Alignable;
use crate::pairwise::dp::{Cell, Kernel, Origin, Recurrence};
use crate::pairwise::matrix::{Full, TraceMatrix};
use crate::pairwise::scout::Scout;
use crate::pairwise::{scoring, AlignConfig, Solution};
use crate::{pairwise, Error};

/// Set of active lanes, one bit per lane.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, BitAnd, BitOr)]
pub struct LaneMask(u64);

impl LaneMask {
    /// Mask with lanes `0..lanes` set.
    pub fn first(lanes: usize) -> Self {
        match lanes {
            0 => Self(0),
            64.. => Self(u64::MAX),
            _ => Self((1 << lanes) - 1),
        }
    }

    /// Mask of lanes satisfying the predicate.
    pub fn from_fn(lanes: usize, predicate: impl Fn(usize) -> bool) -> Self {
        let mut mask = 0;
        for lane in 0..lanes.min(64) {
            if predicate(lane) {
                mask |= 1 << lane;
            }
        }
        Self(mask)
    }

    pub fn contains(&self, lane: usize) -> bool {
        lane < 64 && self.0 & (1 << lane) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// Indices of active lanes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            let lane = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(lane)
        })
    }
}

/// Align up to 64 pairs sharing one configuration in lock-step.
///
/// Cells of all lanes are stored interleaved (`[col * width + lane]`), a single sweep
/// per row advances every lane, and lanes outside of their own matrix are masked out.
/// Configurations must be validated and unbanded.
pub(crate) fn align<R, Scheme, Seq1, Seq2>(
    scheme: &Scheme,
    config: &AlignConfig,
    pairs: &[(&Seq1, &Seq2)],
) -> Vec<Result<Solution<<Scheme as scoring::Scheme>::Score>, Error>>
where
    R: Recurrence,
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
{
    let width = pairs.len();
    debug_assert!((1..=64).contains(&width) && config.band().is_none());

    let (mode, end_gaps) = (*config.mode(), *config.end_gaps());
    let lens: Vec<(usize, usize)> = pairs.iter().map(|(s1, s2)| (s1.len(), s2.len())).collect();
    let rows = lens.iter().map(|x| x.0).max().unwrap_or(0) + 1;
    let cols = lens.iter().map(|x| x.1).max().unwrap_or(0) + 1;

    let kernels: Vec<_> = pairs
        .iter()
        .map(|(s1, s2)| {
            Kernel::<_, _, _, R>::new(scheme, *s1, *s2, Origin::default(), mode, end_gaps)
        })
        .collect();
    let mut scouts: Vec<_> = lens
        .iter()
        .map(|(len1, len2)| Scout::new(mode, end_gaps, *len1, *len2))
        .collect();
    let mut traces: Vec<_> = lens
        .iter()
        .map(|(len1, len2)| {
            config
                .traceback()
                .then(|| TraceMatrix::new(Full::new(*len1, *len2)))
        })
        .collect();

    let unreachable = Cell::unreachable();
    let mut prev = vec![unreachable; cols * width];
    let mut curr = vec![unreachable; cols * width];

    // Lanes whose matrix has the column
    let columns: Vec<LaneMask> = (0..cols)
        .map(|col| LaneMask::from_fn(width, |lane| col <= lens[lane].1))
        .collect();

    for row in 0..rows {
        std::mem::swap(&mut prev, &mut curr);
        let rowmask = LaneMask::from_fn(width, |lane| row <= lens[lane].0);

        for (col, colmask) in columns.iter().enumerate() {
            let active = rowmask & *colmask;
            if active.is_empty() {
                continue;
            }

            for lane in active.iter() {
                let at = col * width + lane;
                let up = if row > 0 { prev[at] } else { unreachable };
                let (diag, left) = if col > 0 {
                    let diag = if row > 0 { prev[at - width] } else { unreachable };
                    (diag, curr[at - width])
                } else {
                    (unreachable, unreachable)
                };

                let (cell, trace) = kernels[lane].cell(row, col, &diag, &up, &left);
                curr[at] = cell;
                scouts[lane].observe(row, col, &cell);
                if let Some(traces) = &mut traces[lane] {
                    traces.set(row, col, trace);
                }
            }
        }
    }

    scouts
        .iter_mut()
        .zip(traces)
        .enumerate()
        .map(|(lane, (scout, traces))| {
            let (seq1, seq2) = pairs[lane];
            scout.finalize().map(|hit| {
                pairwise::finish(
                    scheme,
                    seq1,
                    seq2,
                    Origin::default(),
                    &hit,
                    traces.as_ref(),
                    kernels[lane].rules(),
                )
            })
        })
        .collect()
}
