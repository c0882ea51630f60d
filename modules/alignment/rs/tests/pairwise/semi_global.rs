use seqalign_alignment_rs::pairwise::{AlignConfig, Aligner, EndGaps, Mode};
use seqalign_alignment_rs::Error;

use super::affine;

struct Workload<'a> {
    end_gaps: EndGaps,
    seq1: &'a [u8],
    seq2: &'a [u8],
    score: super::Score,
    seq1range: std::ops::Range<usize>,
    seq2range: std::ops::Range<usize>,
    rle: &'a str,
}

#[test]
fn test_end_gaps() {
    let mut aligner = Aligner::new(affine(2, -3, -5, -2)).unwrap();
    let workload = [
        Workload {
            end_gaps: EndGaps::all(),
            seq1: b"CCCCACGTACGT",
            seq2: b"ACGTACGTGGGG",
            score: 16,
            seq1range: 4..12,
            seq2range: 0..8,
            rle: "8=",
        },
        Workload {
            end_gaps: EndGaps::all(),
            seq1: b"ACGTACGTGGGG",
            seq2: b"CCCCACGTACGT",
            score: 16,
            seq1range: 0..8,
            seq2range: 4..12,
            rle: "8=",
        },
        // seq2 fully contained in seq1
        Workload {
            end_gaps: EndGaps::new(true, true, false, false),
            seq1: b"TTACGTACGTTT",
            seq2: b"ACGTACGT",
            score: 16,
            seq1range: 2..10,
            seq2range: 0..8,
            rle: "8=",
        },
        Workload {
            end_gaps: EndGaps::new(false, false, true, true),
            seq1: b"ACGTACGT",
            seq2: b"TTACGTACGTTT",
            score: 16,
            seq1range: 0..8,
            seq2range: 2..10,
            rle: "8=",
        },
        Workload {
            end_gaps: EndGaps::new(true, false, false, false),
            seq1: b"CCCCACGTACGT",
            seq2: b"ACGTACGT",
            score: 16,
            seq1range: 4..12,
            seq2range: 0..8,
            rle: "8=",
        },
        // Trailing overhang is still penalized
        Workload {
            end_gaps: EndGaps::new(true, false, false, false),
            seq1: b"ACGTACGTCCCC",
            seq2: b"ACGTACGT",
            score: 5,
            seq1range: 0..12,
            seq2range: 0..8,
            rle: "8=4v",
        },
        Workload {
            end_gaps: EndGaps::all(),
            seq1: b"AAAA",
            seq2: b"CCCC",
            score: 0,
            seq1range: 0..0,
            seq2range: 4..4,
            rle: "",
        },
        Workload {
            end_gaps: EndGaps::all(),
            seq1: b"",
            seq2: b"ACGT",
            score: 0,
            seq1range: 0..0,
            seq2range: 0..0,
            rle: "",
        },
    ];

    for w in workload {
        let config = AlignConfig::semi_global(w.end_gaps);
        let solution = aligner.align(&config, w.seq1, w.seq2).unwrap();
        let alignment = solution.alignment().as_ref().unwrap();

        assert_eq!(*solution.score(), w.score);
        assert_eq!(*alignment.seq1(), w.seq1range);
        assert_eq!(*alignment.seq2(), w.seq2range);
        assert_eq!(alignment.rle(), w.rle);
        assert_eq!(alignment.rescore(aligner.scheme(), w.seq1, w.seq2), w.score);
    }
}

#[test]
fn test_overlap_dominates_global() {
    let mut aligner = Aligner::new(affine(1, -2, -4, -1)).unwrap();
    let workload: [(&[u8], &[u8]); 3] = [
        (b"ACGTTTGACCA", b"TTGACCAGGT"),
        (b"GATTACA", b"GCATGCU"),
        (b"AAAACCCC", b"CCCCAAAA"),
    ];
    for (seq1, seq2) in workload {
        let global = aligner.align(&AlignConfig::global(), seq1, seq2).unwrap();
        let overlap = aligner.align(&AlignConfig::overlap(), seq1, seq2).unwrap();
        assert!(overlap.score() >= global.score());
    }
}

#[test]
fn test_inconsistent_end_gaps() {
    let mut aligner = Aligner::new(affine(1, -2, -4, -1)).unwrap();

    let config = AlignConfig::semi_global(EndGaps::none());
    assert_eq!(
        aligner.align(&config, b"ACGT".as_slice(), b"ACGT".as_slice()),
        Err(Error::InconsistentEndGaps {
            mode: Mode::SemiGlobal
        })
    );

    let config = AlignConfig::new(Mode::Global, EndGaps::all(), None, true);
    assert_eq!(
        aligner.align(&config, b"ACGT".as_slice(), b"ACGT".as_slice()),
        Err(Error::InconsistentEndGaps { mode: Mode::Global })
    );
}
