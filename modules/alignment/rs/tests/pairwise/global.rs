use seqalign_alignment_rs::pairwise::{scoring, solve, AlignConfig, Aligner, Op, Workspace};
use seqalign_alignment_rs::{Alignable, Error};

use super::{affine, invrle, linear, workload};

struct Workload<'a> {
    seq1: &'a [u8],
    seq2: &'a [u8],
    score: super::Score,
    rle: &'a str,
}

fn ensure<Scheme>(scheme: &Scheme, workload: &[Workload<'_>])
where
    Scheme: scoring::Scheme<Score = super::Score, Symbol = u8>,
{
    let mut workspace = Workspace::new();
    for w in workload {
        let invrle = invrle(w.rle);
        for (seq1, seq2, rle) in [(w.seq1, w.seq2, w.rle), (w.seq2, w.seq1, invrle.as_str())] {
            let solution =
                solve(scheme, &AlignConfig::global(), seq1, seq2, &mut workspace).unwrap();
            let alignment = solution.alignment().as_ref().unwrap();

            assert_eq!(*solution.score(), w.score);
            assert_eq!(*solution.end(), (seq1.len(), seq2.len()));
            assert_eq!(alignment.rle(), rle);
            assert_eq!(*alignment.seq1(), 0..seq1.len());
            assert_eq!(*alignment.seq2(), 0..seq2.len());
            assert!(alignment.is_consistent());
            assert_eq!(alignment.rescore(scheme, seq1, seq2), w.score);
        }
    }
}

#[test]
fn test_linear() {
    let scheme = linear(1, -1, -1);
    ensure(
        &scheme,
        &[
            Workload {
                seq1: b"GATTACA",
                seq2: b"GCATGCU",
                score: 0,
                rle: "1=1^1=1v1=1X1=1X",
            },
            Workload {
                seq1: b"",
                seq2: b"",
                score: 0,
                rle: "",
            },
            Workload {
                seq1: b"ACGT",
                seq2: b"ACGT",
                score: 4,
                rle: "4=",
            },
        ],
    );

    let scheme = linear(2, -3, -5);
    ensure(
        &scheme,
        &[Workload {
            seq1: b"",
            seq2: b"AAA",
            score: -15,
            rle: "3^",
        }],
    );

    let scheme = linear(2, -3, -3);
    ensure(
        &scheme,
        &[Workload {
            seq1: b"ACGTACGTACGT",
            seq2: b"ACGTTTTTACGTACGT",
            score: 12,
            rle: "3=4^9=",
        }],
    );
}

#[test]
fn test_affine() {
    let scheme = affine(2, -3, -5, -2);
    ensure(
        &scheme,
        &[
            Workload {
                seq1: b"ACGTTGCA",
                seq2: b"ACGTGCA",
                score: 9,
                rle: "3=1v4=",
            },
            Workload {
                seq1: b"AAAA",
                seq2: b"",
                score: -11,
                rle: "4v",
            },
        ],
    );

    let scheme = affine(2, -3, -5, -1);
    ensure(
        &scheme,
        &[
            Workload {
                seq1: b"ACGTACGTACGT",
                seq2: b"ACGTTTTTACGTACGT",
                score: 16,
                rle: "3=4^9=",
            },
            Workload {
                seq1: b"TTTTTTTTTTACGT",
                seq2: b"ACGT",
                score: -6,
                rle: "10v4=",
            },
        ],
    );
}

#[test]
fn test_affine_gaps_follow_diagonal() {
    let mut workspace = Workspace::new();

    // G--AG
    // GCG--
    let scheme = affine(1, -10, -3, -1);
    for (seq1, seq2) in [(b"GAG", b"GCG"), (b"GCG", b"GAG")] {
        let solution = solve(&scheme, &AlignConfig::global(), seq1, seq2, &mut workspace).unwrap();
        let alignment = solution.alignment().as_ref().unwrap();
        assert_eq!(*solution.score(), -7);
        assert_eq!(alignment.rle(), "2^1=2v");
        assert_eq!(alignment.rescore(&scheme, seq1, seq2), -7);
    }

    // Linear gaps share a single track, so gaps of both kinds may touch
    let scheme = linear(1, -10, -3);
    let solution = solve(&scheme, &AlignConfig::global(), b"GAG", b"GCG", &mut workspace).unwrap();
    assert_eq!(*solution.score(), -4);
    assert_eq!(solution.alignment().as_ref().unwrap().rle(), "1=1^1v1=");
}

fn ensure_roundtrip<Scheme>(scheme: &Scheme, affine: bool)
where
    Scheme: scoring::Scheme<Score = super::Score, Symbol = u8>,
{
    let mut workspace = Workspace::new();
    let configs = [AlignConfig::global(), AlignConfig::local(), AlignConfig::overlap()];
    for (seq1, seq2) in workload(11, 60, 50) {
        if seq2.is_empty() {
            continue;
        }
        for config in &configs {
            let solution = solve(scheme, config, &seq1, &seq2, &mut workspace).unwrap();
            let alignment = solution.alignment().as_ref().unwrap();
            assert!(alignment.is_consistent());
            assert_eq!(alignment.rescore(scheme, &seq1, &seq2), *solution.score());

            let (row1, row2) = alignment.gapped(&seq1, &seq2);
            assert_eq!(row1.len(), row2.len());
            assert_eq!(row1.len(), alignment.len());
            assert!(row1.iter().zip(&row2).all(|(a, b)| a.is_some() || b.is_some()));

            let ungapped =
                |row: Vec<Option<&u8>>| row.into_iter().flatten().copied().collect::<Vec<_>>();
            assert_eq!(ungapped(row1), &seq1[alignment.seq1().clone()]);
            assert_eq!(ungapped(row2), &seq2[alignment.seq2().clone()]);

            if affine {
                for pair in alignment.steps().windows(2) {
                    let ops = (*pair[0].op(), *pair[1].op());
                    assert_ne!(ops, (Op::GapFirst, Op::GapSecond));
                    assert_ne!(ops, (Op::GapSecond, Op::GapFirst));
                }
            }
        }
    }
}

#[test]
fn test_gapped_roundtrip() {
    ensure_roundtrip(&linear(1, -1, -1), false);
    ensure_roundtrip(&affine(2, -3, -5, -1), true);
    ensure_roundtrip(&affine(1, -4, -2, -2), true);
}

#[test]
fn test_score_only() {
    let mut aligner = Aligner::new(affine(2, -3, -5, -2)).unwrap();
    let config = AlignConfig::global().with_traceback(false);
    let solution = aligner
        .align(&config, b"ACGTTGCA".as_slice(), b"ACGTGCA".as_slice())
        .unwrap();

    assert_eq!(*solution.score(), 9);
    assert_eq!(*solution.end(), (8, 7));
    assert!(solution.alignment().is_none());
}

#[test]
fn test_reversed() {
    let mut aligner = Aligner::new(affine(1, -2, -3, -1)).unwrap();
    let (seq1, seq2): (&[u8], &[u8]) = (b"GGATCCATTAGACA", b"GATCATAGGACCA");

    let forward = aligner.align(&AlignConfig::global(), seq1, seq2).unwrap();
    let backward = aligner
        .align(&AlignConfig::global(), &seq1.reversed(), &seq2.reversed())
        .unwrap();
    assert_eq!(forward.score(), backward.score());
}

#[test]
fn test_idempotent() {
    let mut aligner = Aligner::new(affine(2, -3, -5, -2)).unwrap();
    let (seq1, seq2): (&[u8], &[u8]) = (b"ACGTTGCAGGTACA", b"ACGTGCATTGGTA");

    let first = aligner.align(&AlignConfig::global(), seq1, seq2).unwrap();
    let second = aligner.align(&AlignConfig::global(), seq1, seq2).unwrap();
    aligner.reset();
    let third = aligner.align(&AlignConfig::global(), seq1, seq2).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn test_invalid_gaps() {
    let result = Aligner::new(affine(1, -1, -1, -3));
    assert!(matches!(result, Err(Error::NonMonotonicGaps)));

    let result = Aligner::new(linear(1, -1, 2));
    assert!(matches!(result, Err(Error::NonMonotonicGaps)));
}
