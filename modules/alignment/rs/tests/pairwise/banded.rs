use seqalign_alignment_rs::pairwise::{AlignConfig, Aligner, Band};
use seqalign_alignment_rs::Error;

use super::affine;

const PAIRS: [(&[u8], &[u8]); 4] = [
    (b"ACGTACGTACGT", b"ACGTTTTTACGTACGT"),
    (b"GGATCCATTAGACA", b"GATCATAGGACCA"),
    (b"ACGTTGCAGGTACA", b"ACGTGCATTGGTA"),
    (b"TTTTTTTTTTACGT", b"ACGT"),
];

#[test]
fn test_wide_band_is_exact() {
    let mut aligner = Aligner::new(affine(2, -3, -5, -1)).unwrap();
    for (seq1, seq2) in PAIRS {
        let full = Band::full(seq1.len(), seq2.len());
        for config in [AlignConfig::global(), AlignConfig::local(), AlignConfig::overlap()] {
            let expected = aligner.align(&config, seq1, seq2).unwrap();

            let banded = config.clone().with_band(full);
            assert_eq!(aligner.align(&banded, seq1, seq2).unwrap(), expected);

            // Bands are clipped to the matrix
            let banded = config.with_band(Band::new(-1000, 1000));
            assert_eq!(aligner.align(&banded, seq1, seq2).unwrap(), expected);
        }
    }
}

#[test]
fn test_narrow_band() {
    let mut aligner = Aligner::new(affine(2, -3, -5, -1)).unwrap();
    for (seq1, seq2) in PAIRS {
        let terminal = seq2.len() as isize - seq1.len() as isize;
        let band = Band::new(terminal.min(0) - 1, terminal.max(0) + 1);
        let config = AlignConfig::global().with_band(band);

        let unbanded = aligner.align(&AlignConfig::global(), seq1, seq2).unwrap();
        let banded = aligner.align(&config, seq1, seq2).unwrap();
        assert!(banded.score() <= unbanded.score());

        let alignment = banded.alignment().as_ref().unwrap();
        assert_eq!(alignment.rescore(aligner.scheme(), seq1, seq2), *banded.score());
        for tracked in alignment.tracked_steps() {
            for (row, col) in [tracked.start, tracked.end()].map(|x| (x.seq1, x.seq2)) {
                assert!(band.contains(col as isize - row as isize));
            }
        }
    }
}

#[test]
fn test_diagonal_band() {
    let mut aligner = Aligner::new(affine(2, -3, -5, -2)).unwrap();
    let config = AlignConfig::global().with_band(Band::new(0, 0));
    let solution = aligner.align(&config, b"ACGT".as_slice(), b"AGGT".as_slice()).unwrap();

    assert_eq!(*solution.score(), 3);
    assert_eq!(solution.alignment().as_ref().unwrap().rle(), "1=1X2=");
}

#[test]
fn test_infeasible_band() {
    let mut aligner = Aligner::new(affine(2, -3, -5, -2)).unwrap();

    // A pure diagonal never reaches the end of unequal sequences
    let config = AlignConfig::global().with_band(Band::new(0, 0));
    let result = aligner.align(&config, b"ACGT".as_slice(), b"ACGTA".as_slice());
    assert!(matches!(result, Err(Error::InfeasibleBand { .. })));

    // Outside of the matrix
    let config = AlignConfig::local().with_band(Band::new(10, 20));
    let result = aligner.align(&config, b"ACGT".as_slice(), b"ACGTA".as_slice());
    assert!(matches!(result, Err(Error::InfeasibleBand { .. })));

    let config = AlignConfig::global().with_band(Band::new(2, -2));
    let result = aligner.align(&config, b"ACGT".as_slice(), b"ACGT".as_slice());
    assert_eq!(result, Err(Error::InvalidBand { lower: 2, upper: -2 }));
}
