//! Tile-level processing: deduplication and 4bpp encoding.

mod compact;
mod encode;

pub use compact::{compact, tile_origin, Compaction};
pub use encode::{
    decode_tile, encode_tiles, unpack_indices, EncodedTiles, TileEncoder, TileEncoding,
    BYTES_PER_TILE,
};
