//! Dense index + data encoding of a collision map.
//!
//! The native side resolves a height with:
//!
//! ```text
//! idx = index[tile_id]
//! if idx == 0 { 0 } else { data[(idx - 1) * 8 + x] }
//! ```

use crate::error::{PackError, Result};

use super::map::{CollisionMap, HeightMap, HEIGHTMAP_LEN};

/// Heightmaps addressable by the byte index; 0 is reserved for "none".
pub const MAX_HEIGHTMAPS: usize = u8::MAX as usize;

/// A collision map compacted into the two arrays the native build links.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompactCollision {
    /// One entry per tile id up to the largest present one. 0 means no
    /// heightmap; otherwise the 1-based position of the tile's heightmap.
    pub index: Vec<u8>,
    /// Heightmaps concatenated in index order, 8 bytes each.
    pub heights: Vec<u8>,
}

impl CompactCollision {
    /// Number of heightmaps stored in `heights`.
    pub fn heightmap_count(&self) -> usize {
        self.heights.len() / HEIGHTMAP_LEN
    }

    /// Decode the heightmap of a tile exactly as the native accessor does.
    pub fn decode(&self, tile_id: u16) -> HeightMap {
        let mut out = [0; HEIGHTMAP_LEN];
        let slot = match self.index.get(tile_id as usize) {
            Some(&slot) if slot != 0 => slot as usize,
            _ => return out,
        };
        let start = (slot - 1) * HEIGHTMAP_LEN;
        if let Some(chunk) = self.heights.get(start..start + HEIGHTMAP_LEN) {
            out.copy_from_slice(chunk);
        }
        out
    }
}

/// Compact a sparse collision map.
///
/// Present tiles are numbered 1, 2, ... in the map's iteration order. Maps
/// with more than [`MAX_HEIGHTMAPS`] entries do not fit the byte index and
/// are rejected.
pub fn compact_collision(map: &CollisionMap) -> Result<CompactCollision> {
    if map.len() > MAX_HEIGHTMAPS {
        return Err(PackError::Build {
            message: format!(
                "Collision map has {} heightmaps, the index addresses at most {}",
                map.len(),
                MAX_HEIGHTMAPS
            ),
            help: Some("Share heightmaps between tiles or drop unused entries".to_string()),
        });
    }

    let Some(max_id) = map.max_tile_id() else {
        return Ok(CompactCollision::default());
    };

    let mut index = vec![0u8; max_id as usize + 1];
    let mut heights = Vec::with_capacity(map.len() * HEIGHTMAP_LEN);

    for (slot, (tile_id, heightmap)) in (1..=u8::MAX).zip(map.iter()) {
        index[tile_id as usize] = slot;
        heights.extend_from_slice(heightmap);
    }

    Ok(CompactCollision { index, heights })
}
