use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use seqalign_alignment_rs::pairwise::{scoring, Op};

mod banded;
mod global;
mod local;
mod parallel;
mod semi_global;

pub type Score = i32;
pub type Symbol = u8;

pub type Scheme<G> =
    scoring::Composite<scoring::symbols::Equality<Score, Symbol>, G, scoring::equiv::Equality>;

pub fn affine(
    matched: Score,
    mismatched: Score,
    open: Score,
    extend: Score,
) -> Scheme<scoring::gaps::Affine<Score>> {
    scoring::compose(
        scoring::symbols::Equality::new(matched, mismatched),
        scoring::gaps::Affine::new(open, extend),
        scoring::equiv::Equality {},
    )
}

pub fn linear(
    matched: Score,
    mismatched: Score,
    gap: Score,
) -> Scheme<scoring::gaps::Linear<Score>> {
    scoring::compose(
        scoring::symbols::Equality::new(matched, mismatched),
        scoring::gaps::Linear::new(gap),
        scoring::equiv::Equality {},
    )
}

/// RLE of the same alignment with seq1 and seq2 swapped.
pub fn invrle(rle: &str) -> String {
    let gapfirst = Op::GapFirst.symbol();
    let gapsecond = Op::GapSecond.symbol();
    rle.chars()
        .map(|x| {
            if x == gapfirst {
                gapsecond
            } else if x == gapsecond {
                gapfirst
            } else {
                x
            }
        })
        .collect::<String>()
}

pub fn random_seq(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| b"ACGT"[rng.gen_range(0..4)]).collect()
}

/// Mutated copy of the sequence: substitutions, insertions and deletions.
pub fn mutate(rng: &mut ChaCha8Rng, seq: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(seq.len() + seq.len() / 8);
    for &symbol in seq {
        match rng.gen_range(0..20) {
            0 => {}
            1 => {
                result.push(symbol);
                result.push(b"ACGT"[rng.gen_range(0..4)]);
            }
            2 => result.push(b"ACGT"[rng.gen_range(0..4)]),
            _ => result.push(symbol),
        }
    }
    result
}

/// Random pairs of related sequences: a random sequence and its mutated copy.
pub fn workload(seed: u64, pairs: usize, maxlen: usize) -> Vec<(Vec<u8>, Vec<u8>)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..pairs)
        .map(|_| {
            let len = rng.gen_range(1..maxlen);
            let seq1 = random_seq(&mut rng, len);
            let seq2 = mutate(&mut rng, &seq1);
            (seq1, seq2)
        })
        .collect()
}
