//! Tile deduplication.
//!
//! Collapses an authored grid to the tiles it actually references, numbered
//! in order of first use, and renders those tiles into a one-row strip.

use std::collections::HashMap;

use crate::types::{PixelImage, TileGrid, TileRef, TILEMAP_WIDTH, TILE_SIZE};

/// Output of [`compact`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compaction {
    /// The authored grid with every tile renumbered, rows fixed to the
    /// tilemap width.
    pub grid: TileGrid,
    /// Original ids of the referenced tiles, in compacted order.
    pub unique_ids: Vec<u32>,
    /// The referenced tiles side by side, one tile high.
    pub strip: PixelImage,
}

impl Compaction {
    /// Compacted id of an original tile id.
    pub fn compact_id(&self, original: u32) -> Option<u32> {
        self.unique_ids
            .iter()
            .position(|&id| id == original)
            .map(|pos| pos as u32)
    }
}

/// Source location of a tile id in a tileset bitmap, reading tiles row by row.
pub fn tile_origin(tileset: &PixelImage, tile_id: u32) -> Option<(usize, usize)> {
    let per_row = tileset.tiles_wide();
    if per_row == 0 {
        return None;
    }
    let id = tile_id as usize;
    Some((id % per_row, id / per_row))
}

/// Deduplicate the tiles referenced by `grid`.
///
/// Tiles are read from `tileset` by id. Rows shorter than the tilemap width
/// are padded with empty cells and longer ones truncated.
pub fn compact(grid: &TileGrid, tileset: &PixelImage) -> Compaction {
    let mut unique_ids = Vec::new();
    let mut compact_of: HashMap<u32, u32> = HashMap::new();

    for id in grid.cells().filter_map(TileRef::tile_id) {
        compact_of.entry(id).or_insert_with(|| {
            unique_ids.push(id);
            (unique_ids.len() - 1) as u32
        });
    }

    let rows = grid
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell.tile_id() {
                    Some(id) => TileRef::Tile(compact_of[&id]),
                    None => TileRef::Empty,
                })
                .chain(std::iter::repeat(TileRef::Empty))
                .take(TILEMAP_WIDTH)
                .collect()
        })
        .collect();

    let mut strip = PixelImage::new(unique_ids.len() * TILE_SIZE, TILE_SIZE);
    for (slot, &id) in unique_ids.iter().enumerate() {
        if let Some(origin) = tile_origin(tileset, id) {
            strip.blit_tile(tileset, origin, (slot, 0));
        }
    }

    Compaction {
        grid: TileGrid::new(rows),
        unique_ids,
        strip,
    }
}
