/// Predecessor of the best path through a DP node.
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Source {
    /// The path starts here: the origin, a free border or the local-alignment baseline
    Start = 0,
    Diagonal = 1,
    Vertical = 2,
    Horizontal = 3,
}

/// Packed traceback value of a DP node.
///
/// Bits 0-1 hold the winning [`Source`], bit 2 (bit 3) is set when the vertical (horizontal)
/// gap track extends the track of the previous node instead of opening a new gap,
/// bits 4-6 flag co-optimal diagonal/vertical/horizontal tracks.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Trace(u8);

impl Trace {
    const SOURCE: u8 = 0b11;
    const VERT_EXTEND: u8 = 1 << 2;
    const HORIZ_EXTEND: u8 = 1 << 3;
    const TIE_SHIFT: u8 = 4;

    pub const START: Trace = Trace(0);

    #[inline(always)]
    pub fn new(source: Source, vert_extends: bool, horiz_extends: bool) -> Self {
        let mut bits = source as u8;
        if vert_extends {
            bits |= Self::VERT_EXTEND;
        }
        if horiz_extends {
            bits |= Self::HORIZ_EXTEND;
        }
        Self(bits)
    }

    /// Flag `source` as co-optimal for this node.
    #[inline(always)]
    pub fn with_tie(mut self, source: Source) -> Self {
        if source != Source::Start {
            self.0 |= 1 << (Self::TIE_SHIFT + source as u8 - 1);
        }
        self
    }

    #[inline(always)]
    pub fn source(&self) -> Source {
        match self.0 & Self::SOURCE {
            0 => Source::Start,
            1 => Source::Diagonal,
            2 => Source::Vertical,
            _ => Source::Horizontal,
        }
    }

    #[inline(always)]
    pub fn vert_extends(&self) -> bool {
        self.0 & Self::VERT_EXTEND != 0
    }

    #[inline(always)]
    pub fn horiz_extends(&self) -> bool {
        self.0 & Self::HORIZ_EXTEND != 0
    }

    #[inline(always)]
    pub fn is_tied(&self, source: Source) -> bool {
        source != Source::Start && self.0 & (1 << (Self::TIE_SHIFT + source as u8 - 1)) != 0
    }

    /// Number of co-optimal tracks, 0 for start nodes.
    pub fn ties(&self) -> u32 {
        (self.0 >> Self::TIE_SHIFT).count_ones()
    }
}
