//! Per-tile collision heightmaps.
//!
//! The editor keeps a sparse `tile id -> 8 heights` table; the native build
//! wants a dense byte index plus packed heightmap data.

mod codec;
mod map;
mod store;

pub use codec::{compact_collision, CompactCollision, MAX_HEIGHTMAPS};
pub use map::{CollisionMap, HeightMap, HEIGHTMAP_LEN, MAX_HEIGHT, SOLID};
pub use store::{load_collision_map, parse_collision_map};
