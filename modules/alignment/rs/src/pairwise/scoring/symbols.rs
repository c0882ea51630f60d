use std::marker::PhantomData;

use eyre::{ensure, Result};

use crate::pairwise::scoring::Score;

/// Substitution score of aligning symbol `s1` (at `seq1pos`) against `s2` (at `seq2pos`).
pub trait Scorer {
    type Score: Score;
    type Symbol;

    fn score(
        &self,
        seq1pos: usize,
        s1: &Self::Symbol,
        seq2pos: usize,
        s2: &Self::Symbol,
    ) -> Self::Score;
}

pub trait PosInvariantScorer {
    type SymScore: Score;
    type Symbol;

    fn score(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> Self::SymScore;
}

impl<T: PosInvariantScorer> Scorer for T {
    type Score = <Self as PosInvariantScorer>::SymScore;
    type Symbol = <Self as PosInvariantScorer>::Symbol;

    #[inline(always)]
    fn score(&self, _: usize, s1: &Self::Symbol, _: usize, s2: &Self::Symbol) -> Self::Score {
        PosInvariantScorer::score(self, s1, s2)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Equality<S: Score, Symbol> {
    pub equal: S,
    pub different: S,
    _phantom: PhantomData<Symbol>,
}

impl<S: Score, Symbol: PartialEq> PosInvariantScorer for Equality<S, Symbol> {
    type SymScore = S;
    type Symbol = Symbol;

    #[inline(always)]
    fn score(&self, a: &Self::Symbol, b: &Self::Symbol) -> Self::SymScore {
        if a == b { self.equal } else { self.different }
    }
}

impl<S: Score, Symbol: PartialEq> Equality<S, Symbol> {
    pub fn new(equal: S, different: S) -> Self {
        Self {
            equal,
            different,
            _phantom: Default::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RNAComplementarity<S: Score> {
    pub complementary: S,
    pub different: S,
}

impl<S: Score> PosInvariantScorer for RNAComplementarity<S> {
    type SymScore = S;
    type Symbol = u8;

    #[inline(always)]
    fn score(&self, a: &Self::Symbol, b: &Self::Symbol) -> Self::SymScore {
        match (*a, *b) {
            (b'A', b'U')
            | (b'U', b'A')
            | (b'G', b'C')
            | (b'C', b'G')
            | (b'G', b'U')
            | (b'U', b'G') => self.complementary,
            _ => self.different,
        }
    }
}

impl<S: Score> RNAComplementarity<S> {
    pub fn new(complementary: S, different: S) -> Self {
        Self {
            complementary,
            different,
        }
    }
}

const UNKNOWN: u8 = u8::MAX;

/// Substitution table over a byte alphabet. Symbols outside of the alphabet score `fallback`.
#[derive(Clone, Debug)]
pub struct Matrix<S: Score> {
    lookup: [u8; 256],
    size: usize,
    scores: Vec<S>,
    fallback: S,
}

impl<S: Score> Matrix<S> {
    /// Build the table from an alphabet and a row-major square matrix of scores.
    pub fn new(alphabet: &[u8], scores: &[S], fallback: S) -> Result<Self> {
        ensure!(!alphabet.is_empty(), "Alphabet must not be empty");
        ensure!(
            alphabet.len() < UNKNOWN as usize,
            "Alphabet must have less than {UNKNOWN} symbols"
        );
        ensure!(
            scores.len() == alphabet.len() * alphabet.len(),
            "Substitution table must be {0}x{0}, got {1} values",
            alphabet.len(),
            scores.len()
        );

        let mut lookup = [UNKNOWN; 256];
        for (ind, symbol) in alphabet.iter().enumerate() {
            ensure!(
                lookup[*symbol as usize] == UNKNOWN,
                "Duplicated alphabet symbol: {}",
                *symbol as char
            );
            lookup[*symbol as usize] = ind as u8;
        }

        Ok(Self {
            lookup,
            size: alphabet.len(),
            scores: scores.to_vec(),
            fallback,
        })
    }

    /// Build the table by evaluating `score` for every pair of alphabet symbols.
    pub fn from_fn(alphabet: &[u8], fallback: S, score: impl Fn(u8, u8) -> S) -> Result<Self> {
        let mut scores = Vec::with_capacity(alphabet.len() * alphabet.len());
        for a in alphabet {
            for b in alphabet {
                scores.push(score(*a, *b));
            }
        }
        Self::new(alphabet, &scores, fallback)
    }
}

impl<S: Score> PosInvariantScorer for Matrix<S> {
    type SymScore = S;
    type Symbol = u8;

    #[inline(always)]
    fn score(&self, a: &Self::Symbol, b: &Self::Symbol) -> Self::SymScore {
        let (a, b) = (self.lookup[*a as usize], self.lookup[*b as usize]);
        if a == UNKNOWN || b == UNKNOWN {
            self.fallback
        } else {
            self.scores[a as usize * self.size + b as usize]
        }
    }
}
