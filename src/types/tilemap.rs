//! Tile references and authored tile grids.

use serde::{Deserialize, Serialize};

/// Fixed column count of an emitted tilemap.
pub const TILEMAP_WIDTH: usize = 64;

/// Fixed row count reported by the tilemap descriptor.
pub const TILEMAP_HEIGHT: usize = 32;

/// Tile attribute words keep the tile index in their low 11 bits.
pub const TILE_INDEX_MASK: u32 = 0x7ff;

/// One cell of a tile grid.
///
/// On the wire both `Empty` and `Tile(0)` serialize to `0`; keeping them apart
/// here stops the two meanings leaking into the compaction logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<u32>", into = "Option<u32>")]
pub enum TileRef {
    #[default]
    Empty,
    Tile(u32),
}

impl TileRef {
    /// Extract the tile index from an editor attribute word.
    pub fn from_attribute(attr: u32) -> Self {
        TileRef::Tile(attr & TILE_INDEX_MASK)
    }

    /// Drop flip, priority and palette bits from a tile cell.
    pub fn masked(self) -> Self {
        match self {
            TileRef::Tile(attr) => TileRef::from_attribute(attr),
            TileRef::Empty => TileRef::Empty,
        }
    }

    /// Raw value written into tilemap data.
    pub fn to_raw(self) -> u32 {
        match self {
            TileRef::Empty => 0,
            TileRef::Tile(id) => id,
        }
    }

    pub fn tile_id(self) -> Option<u32> {
        match self {
            TileRef::Empty => None,
            TileRef::Tile(id) => Some(id),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, TileRef::Empty)
    }
}

impl From<Option<u32>> for TileRef {
    fn from(value: Option<u32>) -> Self {
        value.map_or(TileRef::Empty, TileRef::Tile)
    }
}

impl From<TileRef> for Option<u32> {
    fn from(value: TileRef) -> Self {
        value.tile_id()
    }
}

/// A row-major grid of tile references as authored in the editor.
///
/// Rows may have different lengths; the emission width is applied later.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileGrid {
    rows: Vec<Vec<TileRef>>,
}

impl TileGrid {
    pub fn new(rows: Vec<Vec<TileRef>>) -> Self {
        Self { rows }
    }

    /// Build a grid from plain ids, `None` marking empty cells.
    pub fn from_ids(rows: Vec<Vec<Option<u32>>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(TileRef::from).collect())
                .collect(),
        }
    }

    /// Grid covering every tile of a `tiles_wide` x `tiles_high` bitmap in order.
    pub fn sequential(tiles_wide: usize, tiles_high: usize) -> Self {
        Self {
            rows: (0..tiles_high)
                .map(|y| {
                    (0..tiles_wide)
                        .map(|x| TileRef::Tile((y * tiles_wide + x) as u32))
                        .collect()
                })
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<TileRef>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Iterate every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = TileRef> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    /// Replace every cell through `f`, keeping the grid shape.
    pub fn map(&self, mut f: impl FnMut(TileRef) -> TileRef) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|&cell| f(cell)).collect())
                .collect(),
        }
    }

    /// Flatten to raw words, padding short rows with the empty value and
    /// truncating long ones so every row is exactly `width` wide.
    pub fn to_words(&self, width: usize) -> Vec<u32> {
        let mut words = Vec::with_capacity(self.rows.len() * width);
        for row in &self.rows {
            words.extend(
                row.iter()
                    .map(|cell| cell.to_raw())
                    .chain(std::iter::repeat(TileRef::Empty.to_raw()))
                    .take(width),
            );
        }
        words
    }
}
