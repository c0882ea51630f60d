use derive_getters::Dissolve;
use derive_more::{Constructor, From, Into};

use super::step::Step;
use seqalign_core_rs::num::RunLength;

/// Position in sequence coordinates, i.e. a node of the DP matrix
#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Hash,
    Default,
    Constructor,
    Dissolve,
    From,
    Into,
)]
pub struct Offset {
    pub seq1: usize,
    pub seq2: usize,
}

impl Offset {
    pub fn apply<Len: RunLength>(mut self, step: &Step<Len>) -> Self {
        step.op().apply(&mut self.seq1, &mut self.seq2, step.length());
        self
    }
}
