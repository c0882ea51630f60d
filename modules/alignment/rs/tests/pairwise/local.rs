use seqalign_alignment_rs::pairwise::{scoring, AlignConfig, Aligner};
use seqalign_alignment_rs::Error;

use super::{affine, invrle, Scheme};

type Engine = Aligner<Scheme<scoring::gaps::Affine<super::Score>>>;

struct Workload<'a> {
    seq1: (&'a [u8], usize),
    seq2: (&'a [u8], usize),
    score: super::Score,
    rle: &'a str,
}

fn ensure(aligner: &mut Engine, w: Workload<'_>) {
    let invrle = invrle(w.rle);

    for (seq1, seq2, rle) in [(w.seq1, w.seq2, w.rle), (w.seq2, w.seq1, &invrle)] {
        let solution = aligner
            .align(&AlignConfig::local(), seq1.0, seq2.0)
            .unwrap_or_else(|err| panic!("Aligner failed: {:?} & {:?}: {err}", seq1.0, seq2.0));
        let alignment = solution.alignment().as_ref().unwrap();

        assert_eq!(alignment.seq1().start, seq1.1);
        assert_eq!(alignment.seq2().start, seq2.1);
        assert_eq!(*solution.score(), w.score);
        assert_eq!(alignment.rle(), rle);
        assert_eq!(alignment.rescore(aligner.scheme(), seq1.0, seq2.0), w.score);
        assert_eq!(*solution.end(), (alignment.seq1().end, alignment.seq2().end));
    }
}

fn test_empty(aligner: &mut Engine) {
    let workload: Vec<(&[u8], &[u8])> = vec![(b"ACGT", b""), (b"", b"ACGT"), (b"", b"")];
    for (seq1, seq2) in workload {
        let result = aligner.align(&AlignConfig::local(), seq1, seq2);
        assert_eq!(result, Err(Error::EmptySequence));
    }

    // Nothing in common: the empty alignment at the origin
    let workload: Vec<(&[u8], &[u8])> = vec![(b"ACGT", b"----"), (b"_", b"A")];
    for (seq1, seq2) in workload {
        let solution = aligner.align(&AlignConfig::local(), seq1, seq2).unwrap();
        assert_eq!(*solution.score(), 0);
        assert_eq!(*solution.end(), (0, 0));
        assert!(solution.alignment().as_ref().unwrap().is_empty());
    }
}

fn test_no_gaps(engine: &mut Engine) {
    let workload = vec![
        Workload {
            seq1: (b"AAGAA", 1),
            seq2: (b"AGA", 0),
            score: 3,
            rle: "3=",
        },
        Workload {
            seq1: (b"AGTCCCGTGTCCCAGGGG", 0),
            seq2: (b"AGTC", 0),
            score: 4,
            rle: "4=",
        },
        Workload {
            seq1: (b"CGCGCGCGTTT", 6),
            seq2: (b"CGTTT", 0),
            score: 5,
            rle: "5=",
        },
        Workload {
            seq1: (b"AAAGGGAGGGTTTA", 3),
            seq2: (b"GGGGGGG", 0),
            score: 4,
            rle: "3=1X3=",
        },
        Workload {
            seq1: (b"AAAA", 0),
            seq2: (b"AAAA", 0),
            score: 4,
            rle: "4=",
        },
        Workload {
            seq1: (b"NNNN==*===*===*==", 7),
            seq2: (b"++++=============+++", 4),
            score: 4,
            rle: "3=1X3=",
        },
        Workload {
            seq1: (b"NNNN===*===*===*===*===", 4),
            seq2: (b"===================", 0),
            score: 7,
            rle: "3=1X3=1X3=1X3=1X3=",
        },
        Workload {
            seq1: (b"AGAAAAAAAGGAAAAAAAGGGGG", 1),
            seq2: (b"G", 0),
            score: 1,
            rle: "1=",
        },
    ];

    for w in workload {
        ensure(engine, w);
    }
}

fn test_affine_gaps(engine: &mut Engine) {
    let workload = vec![
        Workload {
            seq1: (b"AAAAAAAAAAAAAAAA*********AAAAAAAAAAAAAAAA", 0),
            seq2: (b"AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", 0),
            score: 19,
            rle: "16=9v16=",
        },
        Workload {
            seq1: (b"ACGTACGTACGT****_________", 0),
            seq2: (b"****ACGTACGTACGT_________ACGT*****", 4),
            score: 13,
            rle: "12=4v9=",
        },
    ];

    for w in workload {
        ensure(engine, w);
    }
}

fn test_free_gap_open(aligner: &mut Engine) {
    let workload = vec![
        Workload {
            seq1: (b"A***AAAAAAAA***AAAAAAAA***A", 4),
            seq2: (b"AAAAAAAAAAAAAAAA", 0),
            score: 13,
            rle: "8=3v8=",
        },
        Workload {
            seq1: (b"AAAAAAA**AAAAA*****", 0),
            seq2: (b"___AAAAAAAAAAA", 3),
            score: 9,
            rle: "7=2v4=",
        },
    ];

    for w in workload {
        ensure(aligner, w);
    }
}

// A single gap costs less than a mismatch
fn test_cheap_gaps(aligner: &mut Engine) {
    ensure(
        aligner,
        Workload {
            seq1: (b"AAAGGGAGGGTTTA", 3),
            seq2: (b"GGGGGGG", 0),
            score: 5,
            rle: "3=1v3=",
        },
    );
}

#[test]
fn test_all() {
    let mut engine = Engine::new(affine(1, -2, -5, -1)).unwrap();
    test_empty(&mut engine);
    test_no_gaps(&mut engine);
    test_affine_gaps(&mut engine);

    let mut engine = Engine::new(affine(1, -2, -1, -1)).unwrap();
    test_free_gap_open(&mut engine);
    test_cheap_gaps(&mut engine);
}

#[test]
fn test_gattaca() {
    let mut engine = Aligner::new(super::linear(1, -1, -1)).unwrap();
    let solution = engine
        .align(&AlignConfig::local(), b"GATTACA".as_slice(), b"GCATGCU".as_slice())
        .unwrap();
    let alignment = solution.alignment().as_ref().unwrap();

    assert_eq!(*solution.score(), 2);
    assert_eq!(alignment.rle(), "2=");
    assert_eq!(*alignment.seq1(), 1..3);
    assert_eq!(*alignment.seq2(), 2..4);
}

#[test]
fn test_never_negative() {
    let mut engine = Engine::new(affine(1, -3, -4, -2)).unwrap();
    let workload: Vec<(&[u8], &[u8])> = vec![
        (b"AAAA", b"CCCC"),
        (b"ACGTACGT", b"TGCATGCA"),
        (b"A", b"C"),
        (b"GATTACA", b"CTAATGT"),
    ];
    for (seq1, seq2) in workload {
        let solution = engine.align(&AlignConfig::local(), seq1, seq2).unwrap();
        assert!(*solution.score() >= 0);
    }
}
