//! Sparse tile-id to heightmap table.

/// Number of x offsets in a tile heightmap.
pub const HEIGHTMAP_LEN: usize = 8;

/// Tallest floor a heightmap entry can describe (a full tile).
pub const MAX_HEIGHT: u8 = 8;

/// Floor height per x offset within a tile; 0 means fall through.
pub type HeightMap = [u8; HEIGHTMAP_LEN];

/// A heightmap covering the whole tile.
pub const SOLID: HeightMap = [MAX_HEIGHT; HEIGHTMAP_LEN];

/// Tile ids mapped to heightmaps, kept in insertion order.
///
/// A tile with no entry behaves exactly like one whose heightmap is all zeros.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionMap {
    entries: Vec<(u16, HeightMap)>,
}

impl CollisionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heightmap of a tile.
    ///
    /// Replacing an existing entry keeps its position; new tiles go last.
    pub fn insert(&mut self, tile_id: u16, heights: HeightMap) {
        match self.entries.iter_mut().find(|(id, _)| *id == tile_id) {
            Some(entry) => entry.1 = heights,
            None => self.entries.push((tile_id, heights)),
        }
    }

    pub fn get(&self, tile_id: u16) -> Option<HeightMap> {
        self.entries
            .iter()
            .find(|(id, _)| *id == tile_id)
            .map(|(_, heights)| *heights)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &HeightMap)> + '_ {
        self.entries.iter().map(|(id, heights)| (*id, heights))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest tile id with an entry.
    pub fn max_tile_id(&self) -> Option<u16> {
        self.entries.iter().map(|(id, _)| *id).max()
    }
}

impl FromIterator<(u16, HeightMap)> for CollisionMap {
    fn from_iter<I: IntoIterator<Item = (u16, HeightMap)>>(iter: I) -> Self {
        let mut map = CollisionMap::new();
        for (id, heights) in iter {
            map.insert(id, heights);
        }
        map
    }
}
