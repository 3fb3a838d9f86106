//! tilepack - Pixel art to 4bpp tile resource compiler
//!
//! Turns an RGB bitmap and a tile grid into the packed tileset, tilemap and
//! palette data of a two-palette, 8x8-tile console, plus a dense encoding of
//! per-tile collision heightmaps.

pub mod cli;
pub mod collision;
pub mod compile;
pub mod emit;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod output;
pub mod palette;
pub mod tiles;
pub mod types;

pub use collision::{compact_collision, CollisionMap, CompactCollision, HeightMap};
pub use compile::{
    compile, compile_collision, CollisionOutput, CompileOptions, CompileOutput, CompileStats,
    TileMiss,
};
pub use emit::ResourceFile;
pub use error::{PackError, Result};
pub use manifest::{Manifest, MANIFEST_FILENAME};
pub use palette::{assign_palettes, quantize, ColorTable, PaletteAssignment, PaletteSlot};
pub use tiles::{compact, encode_tiles, Compaction, EncodedTiles, TileEncoding};
pub use types::{ColorKey, HardwareColor, PixelImage, TileGrid, TileRef};
