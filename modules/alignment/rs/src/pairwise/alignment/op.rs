/// `Op` represents a single operation in a pairwise alignment.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Op {
    /// Gap step consuming a symbol of the first sequence only (v), a vertical move in the DP matrix
    GapFirst,
    /// Gap step consuming a symbol of the second sequence only (^), a horizontal move in the DP matrix
    GapSecond,
    /// Represents an equivalence, which is ambiguous. It could be a match or mismatch between the target sequences (~).
    /// The interpretation depends on the target problem, e.g. it might represent similar amino acids in two proteins.
    Equivalent,
    /// Represents a match between the sequences (=)
    Match,
    /// Represents a mismatch between the sequences (X)
    Mismatch,
}

impl Op {
    /// Returns `true` if the operation is represented by a diagonal movement in the alignment matrix.
    pub fn is_diagonal(&self) -> bool {
        matches!(self, Op::Match | Op::Mismatch | Op::Equivalent)
    }

    /// Returns the symbol representation of the operation.
    pub fn symbol(&self) -> char {
        match self {
            Op::GapFirst => 'v',
            Op::GapSecond => '^',
            Op::Equivalent => '~',
            Op::Match => '=',
            Op::Mismatch => 'X',
        }
    }

    /// Number of symbols consumed from (seq1, seq2) by a single operation.
    pub fn consumes(&self) -> (usize, usize) {
        match self {
            Op::GapFirst => (1, 0),
            Op::GapSecond => (0, 1),
            Op::Equivalent | Op::Match | Op::Mismatch => (1, 1),
        }
    }

    /// Advance sequence coordinates by `len` repetitions of the operation.
    pub fn apply(&self, seq1: &mut usize, seq2: &mut usize, len: usize) {
        let (d1, d2) = self.consumes();
        *seq1 += d1 * len;
        *seq2 += d2 * len;
    }
}

impl TryFrom<char> for Op {
    type Error = ();

    /// Tries to convert a character into an `Op`.
    /// Returns an error if the character does not represent a valid operation.
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'v' => Ok(Op::GapFirst),
            '^' => Ok(Op::GapSecond),
            '~' => Ok(Op::Equivalent),
            '=' => Ok(Op::Match),
            'X' => Ok(Op::Mismatch),
            _ => Err(()),
        }
    }
}
