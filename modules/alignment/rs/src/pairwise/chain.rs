use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use log::debug;

use crate::pairwise::alignment::utils;
use crate::pairwise::config::{AlignConfig, Band};
use crate::pairwise::dp::Origin;
use crate::pairwise::engine::{solve_window, Solution};
use crate::pairwise::matrix::Workspace;
use crate::pairwise::scoring::{self, Score};
use crate::pairwise::{Alignment, Op, Step};
use crate::{Alignable, Error};

/// Ungapped diagonal run `seq1[seq1..seq1 + len]` ~ `seq2[seq2..seq2 + len]`, e.g. a shared k-mer.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Constructor, Dissolve, Getters)]
pub struct Anchor {
    seq1: usize,
    seq2: usize,
    len: usize,
}

impl Anchor {
    pub fn diagonal(&self) -> isize {
        self.seq2 as isize - self.seq1 as isize
    }
}

/// Anchors must be non-empty, lie inside of both sequences and be ordered without overlaps.
pub fn validate(anchors: &[Anchor], len1: usize, len2: usize) -> Result<(), Error> {
    let mut cursor = (0, 0);
    for (ind, anchor) in anchors.iter().enumerate() {
        let invalid = |reason| Error::InvalidSeedChain {
            anchor: ind,
            reason,
        };
        if anchor.len == 0 {
            return Err(invalid("anchor length must be positive"));
        }
        if anchor.seq1 + anchor.len > len1 || anchor.seq2 + anchor.len > len2 {
            return Err(invalid("anchor exceeds sequence bounds"));
        }
        if anchor.seq1 < cursor.0 || anchor.seq2 < cursor.1 {
            return Err(invalid("anchors overlap or are out of order"));
        }
        cursor = (anchor.seq1 + anchor.len, anchor.seq2 + anchor.len);
    }
    Ok(())
}

/// Global alignment constrained to pass through a chain of anchors.
///
/// Gaps between consecutive anchors (and before/after the chain) are aligned with banded
/// global alignments. The band of a segment spans its start and end diagonals widened by `extension`.
pub fn align<Scheme, Seq1, Seq2>(
    scheme: &Scheme,
    seq1: &Seq1,
    seq2: &Seq2,
    anchors: &[Anchor],
    extension: usize,
    workspace: &mut Workspace<<Scheme as scoring::Scheme>::Score>,
) -> Result<Solution<<Scheme as scoring::Scheme>::Score>, Error>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
{
    scoring::validate(scheme)?;
    let (len1, len2) = (seq1.len(), seq2.len());
    validate(anchors, len1, len2)?;

    let mut score: <Scheme as scoring::Scheme>::Score = ::num::Zero::zero();
    let mut steps: Vec<Step<usize>> = Vec::new();
    let mut cursor = Origin::default();

    for anchor in anchors {
        let lens = (anchor.seq1 - cursor.seq1, anchor.seq2 - cursor.seq2);
        let (segment, path) = segment(scheme, seq1, seq2, cursor, lens, extension, workspace)?;
        score = score.plus(segment);
        steps.extend(path);

        for k in 0..anchor.len {
            let (p1, p2) = (anchor.seq1 + k, anchor.seq2 + k);
            score = score.plus(scheme.score(p1, seq1.at(p1), p2, seq2.at(p2)));
        }
        steps.extend(utils::disambiguate(
            vec![Step::from_parts(Op::Equivalent, anchor.len)],
            scheme,
            seq1,
            anchor.seq1,
            seq2,
            anchor.seq2,
        ));
        cursor = Origin {
            seq1: anchor.seq1 + anchor.len,
            seq2: anchor.seq2 + anchor.len,
        };
    }

    let lens = (len1 - cursor.seq1, len2 - cursor.seq2);
    let (segment, path) = segment(scheme, seq1, seq2, cursor, lens, extension, workspace)?;
    score = score.plus(segment);
    steps.extend(path);

    let steps = Step::<usize>::repack::<usize>(&steps);
    let alignment = Alignment::new(score, steps, 0..len1, 0..len2);
    Ok(Solution::new(score, (len1, len2), Some(alignment)))
}

fn segment<Scheme, Seq1, Seq2>(
    scheme: &Scheme,
    seq1: &Seq1,
    seq2: &Seq2,
    origin: Origin,
    (len1, len2): (usize, usize),
    extension: usize,
    workspace: &mut Workspace<<Scheme as scoring::Scheme>::Score>,
) -> Result<(<Scheme as scoring::Scheme>::Score, Vec<Step<usize>>), Error>
where
    Scheme: scoring::Scheme + ?Sized,
    Seq1: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
    Seq2: Alignable<Symbol = <Scheme as scoring::Scheme>::Symbol> + ?Sized,
{
    if len1 == 0 && len2 == 0 {
        return Ok((::num::Zero::zero(), Vec::new()));
    }

    let terminal = len2 as isize - len1 as isize;
    let extension = extension as isize;
    let band = Band::new(
        terminal.min(0) - extension,
        terminal.max(0) + extension,
    );
    debug!(
        "Aligning chain segment seq1[{}..{}] ~ seq2[{}..{}] within band [{}, {}]",
        origin.seq1,
        origin.seq1 + len1,
        origin.seq2,
        origin.seq2 + len2,
        band.lower,
        band.upper
    );

    let config = AlignConfig::global().with_band(band);
    let (score, _, alignment) =
        solve_window(scheme, &config, seq1, seq2, origin, (len1, len2), workspace)?.dissolve();
    let steps = alignment.map(|x| x.dissolve().1).unwrap_or_default();
    Ok((score, steps))
}
