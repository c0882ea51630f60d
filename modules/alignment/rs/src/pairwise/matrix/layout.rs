use std::fmt::Debug;
use std::ops::Range;

use crate::pairwise::config::Band;

/// Maps logical DP nodes `(row, col)` of a `(len1 + 1) x (len2 + 1)` matrix to physical indices.
pub trait Layout: Clone + Debug + Send + Sync {
    fn rows(&self) -> usize;

    fn cols(&self) -> usize;

    /// Columns of `row` stored by the layout. Might be empty.
    fn span(&self, row: usize) -> Range<usize>;

    /// Physical index of a node. Only meaningful for nodes inside of the layout.
    fn offset(&self, row: usize, col: usize) -> usize;

    /// Number of physical slots required to store the layout.
    fn capacity(&self) -> usize;

    #[inline(always)]
    fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows() && self.span(row).contains(&col)
    }

    /// Physical index of a node. Panics if the node is outside of the layout.
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            self.contains(row, col),
            "Node ({row}, {col}) is outside of the DP layout {self:?}"
        );
        self.offset(row, col)
    }

    #[inline(always)]
    fn get(&self, row: usize, col: usize) -> Option<usize> {
        if self.contains(row, col) {
            Some(self.offset(row, col))
        } else {
            None
        }
    }
}

/// Columns of `row` covered by the band, clipped to `0..cols`.
#[inline(always)]
pub(crate) fn band_span(row: usize, cols: usize, band: &Band) -> Range<usize> {
    let row = row as isize;
    let start = (row + band.lower).max(0);
    let end = (row + band.upper + 1).min(cols as isize);
    if start >= end {
        0..0
    } else {
        start as usize..end as usize
    }
}

/// Dense row-major storage.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Full {
    rows: usize,
    cols: usize,
}

impl Full {
    pub fn new(len1: usize, len2: usize) -> Self {
        Self {
            rows: len1 + 1,
            cols: len2 + 1,
        }
    }
}

impl Layout for Full {
    #[inline(always)]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn span(&self, _: usize) -> Range<usize> {
        0..self.cols
    }

    #[inline(always)]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

/// Skewed storage of the diagonals `lower..=upper`: every row keeps `upper - lower + 1` slots.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct Banded {
    rows: usize,
    cols: usize,
    band: Band,
}

impl Banded {
    /// `band` must be clipped to the matrix and non-empty.
    pub fn new(len1: usize, len2: usize, band: Band) -> Self {
        debug_assert!(band.lower <= band.upper);
        Self {
            rows: len1 + 1,
            cols: len2 + 1,
            band,
        }
    }

    pub fn band(&self) -> &Band {
        &self.band
    }

    #[inline(always)]
    fn width(&self) -> usize {
        (self.band.upper - self.band.lower + 1) as usize
    }
}

impl Layout for Banded {
    #[inline(always)]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn span(&self, row: usize) -> Range<usize> {
        band_span(row, self.cols, &self.band)
    }

    #[inline(always)]
    fn offset(&self, row: usize, col: usize) -> usize {
        let shift = col as isize - row as isize - self.band.lower;
        row * self.width() + shift as usize
    }

    fn capacity(&self) -> usize {
        self.rows * self.width()
    }
}

/// Square tiles of `tile x tile` nodes stored one after another.
/// With a band, only tiles intersecting it are stored.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Tiled {
    rows: usize,
    cols: usize,
    tile: usize,
    band: Option<Band>,
    grid: (usize, usize),
    slots: Vec<Option<usize>>,
    stored: usize,
}

impl Tiled {
    pub fn new(len1: usize, len2: usize, tile: usize, band: Option<Band>) -> Self {
        let (rows, cols) = (len1 + 1, len2 + 1);
        // A single tile covers the whole matrix
        let tile = tile.clamp(1, rows.max(cols));
        let grid = (rows.div_ceil(tile), cols.div_ceil(tile));

        let mut slots = Vec::with_capacity(grid.0 * grid.1);
        let mut stored = 0;
        for trow in 0..grid.0 {
            for tcol in 0..grid.1 {
                let (r, c) = Self::bounds(rows, cols, tile, trow, tcol);
                let diagonals = (
                    c.start as isize - (r.end as isize - 1),
                    (c.end as isize - 1) - r.start as isize,
                );
                let exists = match &band {
                    None => true,
                    Some(band) => band.intersects(diagonals.0, diagonals.1),
                };
                if exists {
                    slots.push(Some(stored));
                    stored += 1;
                } else {
                    slots.push(None);
                }
            }
        }

        Self {
            rows,
            cols,
            tile,
            band,
            grid,
            slots,
            stored,
        }
    }

    fn bounds(
        rows: usize,
        cols: usize,
        tile: usize,
        trow: usize,
        tcol: usize,
    ) -> (Range<usize>, Range<usize>) {
        (
            trow * tile..((trow + 1) * tile).min(rows),
            tcol * tile..((tcol + 1) * tile).min(cols),
        )
    }

    pub fn tile(&self) -> usize {
        self.tile
    }

    /// Number of tile rows and tile columns.
    pub fn grid(&self) -> (usize, usize) {
        self.grid
    }

    /// Number of stored tiles.
    pub fn stored(&self) -> usize {
        self.stored
    }

    pub fn band(&self) -> Option<&Band> {
        self.band.as_ref()
    }

    /// Tile containing the node.
    #[inline(always)]
    pub fn tile_of(&self, row: usize, col: usize) -> (usize, usize) {
        (row / self.tile, col / self.tile)
    }

    /// Storage slot of a tile, `None` for tiles outside of the grid or the band.
    #[inline(always)]
    pub fn slot(&self, trow: usize, tcol: usize) -> Option<usize> {
        if trow >= self.grid.0 || tcol >= self.grid.1 {
            return None;
        }
        self.slots[trow * self.grid.1 + tcol]
    }

    /// Node ranges (rows, cols) covered by the tile.
    pub fn tile_bounds(&self, trow: usize, tcol: usize) -> (Range<usize>, Range<usize>) {
        Self::bounds(self.rows, self.cols, self.tile, trow, tcol)
    }

    /// Number of nodes covered by the tile.
    pub fn area(&self, trow: usize, tcol: usize) -> usize {
        let (rows, cols) = self.tile_bounds(trow, tcol);
        rows.len() * cols.len()
    }

    /// Offset of a node inside of its tile. Nodes of a tile are stored row by row
    /// over the tile bounds, see [`Tiled::area`].
    #[inline(always)]
    pub fn local(&self, row: usize, col: usize) -> usize {
        let start = col - col % self.tile;
        let width = (start + self.tile).min(self.cols) - start;
        (row % self.tile) * width + col % self.tile
    }

    /// Stored tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.grid.1;
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(move |(ind, _)| (ind / width, ind % width))
    }
}

impl Layout for Tiled {
    #[inline(always)]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    fn cols(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn span(&self, row: usize) -> Range<usize> {
        match &self.band {
            None => 0..self.cols,
            Some(band) => band_span(row, self.cols, band),
        }
    }

    #[inline(always)]
    fn offset(&self, row: usize, col: usize) -> usize {
        let (trow, tcol) = self.tile_of(row, col);
        match self.slots[trow * self.grid.1 + tcol] {
            Some(slot) => slot * self.tile * self.tile + self.local(row, col),
            None => usize::MAX,
        }
    }

    fn capacity(&self) -> usize {
        self.stored * self.tile * self.tile
    }
}
