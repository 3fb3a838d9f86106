//! Core domain types for tilepack.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `ColorKey` / `HardwareColor` - source colours and their hardware form
//! - `PixelImage` - RGBA bitmaps addressed in 8x8 tiles
//! - `TileRef` / `TileGrid` - authored tile arrangements

mod colour;
mod pixels;
mod tilemap;

pub use colour::{even_floor, quantize_channel, ColorKey, HardwareColor, CHANNEL_SCALE};
pub use pixels::{PixelImage, TILE_SIZE};
pub use tilemap::{TileGrid, TileRef, TILEMAP_HEIGHT, TILEMAP_WIDTH, TILE_INDEX_MASK};
