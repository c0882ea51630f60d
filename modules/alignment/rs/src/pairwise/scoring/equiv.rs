use crate::pairwise::Op;

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Match,
    Mismatch,
    Equivalent,
}

/// Labels aligned symbol pairs. Used after the traceback to split diagonal runs into
/// match/mismatch/equivalent steps, it never affects scores.
pub trait Classifier {
    type Symbol;

    fn classify(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> Type;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct RNAComplementarity {}

impl Classifier for RNAComplementarity {
    type Symbol = u8;

    #[inline(always)]
    fn classify(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> Type {
        match (*s1, *s2) {
            (b'A', b'U') | (b'U', b'A') | (b'G', b'C') | (b'C', b'G') => Type::Match,
            (b'G', b'U') | (b'U', b'G') => Type::Equivalent,
            _ => Type::Mismatch,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Equality {}

impl Classifier for Equality {
    type Symbol = u8;

    #[inline(always)]
    fn classify(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> Type {
        if *s1 == *s2 {
            Type::Match
        } else {
            Type::Mismatch
        }
    }
}

impl From<Type> for Op {
    fn from(value: Type) -> Self {
        match value {
            Type::Match => Op::Match,
            Type::Mismatch => Op::Mismatch,
            Type::Equivalent => Op::Equivalent,
        }
    }
}
