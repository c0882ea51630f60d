use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;
use log::debug;

use crate::Error;

/// Alignment family.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub enum Mode {
    /// End-to-end alignment of both sequences (Needleman-Wunsch)
    #[default]
    Global,
    /// Best-scoring pair of substrings (Smith-Waterman)
    Local,
    /// Global alignment where some of the end gaps are free (overlap, glocal, ...)
    SemiGlobal,
}

/// Free (unpenalized) end gaps.
///
/// `seq1_*` flags free gaps consuming the beginning/end of seq1, i.e. seq1 may overhang
/// the alignment start (column 0 of the DP matrix) or its end (last column).
/// `seq2_*` flags do the same for seq2 (row 0 and the last row).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default, Constructor)]
pub struct EndGaps {
    pub seq1_leading: bool,
    pub seq1_trailing: bool,
    pub seq2_leading: bool,
    pub seq2_trailing: bool,
}

impl EndGaps {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self::new(true, true, true, true)
    }

    pub fn any(&self) -> bool {
        self.seq1_leading || self.seq1_trailing || self.seq2_leading || self.seq2_trailing
    }
}

/// Diagonal band, diagonals are numbered as `col - row`. Both bounds are inclusive.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Constructor, Dissolve)]
pub struct Band {
    pub lower: isize,
    pub upper: isize,
}

impl Band {
    /// Band covering every diagonal of a `len1` x `len2` alignment.
    pub fn full(len1: usize, len2: usize) -> Self {
        Self::new(-(len1 as isize), len2 as isize)
    }

    pub fn contains(&self, diagonal: isize) -> bool {
        self.lower <= diagonal && diagonal <= self.upper
    }

    pub fn intersects(&self, lower: isize, upper: isize) -> bool {
        self.lower.max(lower) <= self.upper.min(upper)
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Getters, Dissolve, Constructor)]
pub struct AlignConfig {
    mode: Mode,
    end_gaps: EndGaps,
    band: Option<Band>,
    traceback: bool,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self::global()
    }
}

impl AlignConfig {
    pub fn global() -> Self {
        Self::new(Mode::Global, EndGaps::none(), None, true)
    }

    pub fn local() -> Self {
        Self::new(Mode::Local, EndGaps::none(), None, true)
    }

    pub fn semi_global(end_gaps: EndGaps) -> Self {
        Self::new(Mode::SemiGlobal, end_gaps, None, true)
    }

    /// Overlap (dovetail) alignment: every end gap is free.
    pub fn overlap() -> Self {
        Self::semi_global(EndGaps::all())
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.band = Some(band);
        self
    }

    pub fn without_band(mut self) -> Self {
        self.band = None;
        self
    }

    pub fn with_traceback(mut self, traceback: bool) -> Self {
        self.traceback = traceback;
        self
    }

    /// Validate the configuration against the sequence lengths.
    /// Returns the band clipped to the DP matrix or `None` for unbanded alignments.
    pub fn validate(&self, len1: usize, len2: usize) -> Result<Option<Band>, Error> {
        let consistent = match self.mode {
            Mode::Global | Mode::Local => !self.end_gaps.any(),
            Mode::SemiGlobal => self.end_gaps.any(),
        };
        if !consistent {
            return Err(Error::InconsistentEndGaps { mode: self.mode });
        }

        if self.mode == Mode::Local && (len1 == 0 || len2 == 0) {
            return Err(Error::EmptySequence);
        }

        let band = match self.band {
            None => return Ok(None),
            Some(band) => band,
        };
        if band.lower > band.upper {
            return Err(Error::InvalidBand {
                lower: band.lower,
                upper: band.upper,
            });
        }

        let infeasible = Error::InfeasibleBand {
            lower: band.lower,
            upper: band.upper,
            len1,
            len2,
        };

        let matrix = Band::full(len1, len2);
        let clipped = Band::new(
            band.lower.max(matrix.lower),
            band.upper.min(matrix.upper),
        );
        if clipped.lower > clipped.upper {
            return Err(infeasible);
        }
        if clipped != band {
            debug!(
                "Band [{}, {}] clipped to [{}, {}] for sequences of length {len1} and {len2}",
                band.lower, band.upper, clipped.lower, clipped.upper
            );
        }

        if self.mode != Mode::Local {
            let (starts, ends) = self.admissible(len1, len2);
            if !clipped.intersects(starts.lower, starts.upper)
                || !clipped.intersects(ends.lower, ends.upper)
            {
                return Err(infeasible);
            }
        }
        Ok(Some(clipped))
    }

    /// Diagonals where a global or semi-global path may start and end.
    fn admissible(&self, len1: usize, len2: usize) -> (Band, Band) {
        let (len1, len2) = (len1 as isize, len2 as isize);
        let ends = &self.end_gaps;

        let starts = Band::new(
            if ends.seq1_leading { -len1 } else { 0 },
            if ends.seq2_leading { len2 } else { 0 },
        );

        let terminal = len2 - len1;
        let finishes = Band::new(
            if ends.seq2_trailing { -len1 } else { terminal },
            if ends.seq1_trailing { len2 } else { terminal },
        );
        (starts, finishes)
    }
}
