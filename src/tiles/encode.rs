//! 4bpp tile encoding.
//!
//! Each pixel becomes a 4-bit index into its tile's palette window; two
//! indices share a byte with the left pixel in the high nibble.

use std::collections::HashMap;

use crate::palette::{key_positions, PaletteAssignment, PaletteSlot, PALETTE_SIZE};
use crate::types::{ColorKey, HardwareColor, PixelImage, TILE_SIZE};

/// Packed size of one 8x8 tile.
pub const BYTES_PER_TILE: usize = TILE_SIZE * TILE_SIZE / 2;

/// One encoded tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileEncoding {
    pub bytes: [u8; BYTES_PER_TILE],
    pub slot: PaletteSlot,
    /// Pixels whose colour was missing from the palette window and were
    /// written as index 0.
    pub not_found: usize,
}

/// Every tile of an image, encoded.
#[derive(Debug, Clone)]
pub struct EncodedTiles {
    /// Tiles in tile-row-major order.
    pub tiles: Vec<TileEncoding>,
    /// The image as the hardware would show it.
    pub preview: PixelImage,
}

impl EncodedTiles {
    /// All tile bytes concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.tiles.iter().flat_map(|t| t.bytes).collect()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Total lookup misses over every tile.
    pub fn not_found(&self) -> usize {
        self.tiles.iter().map(|t| t.not_found).sum()
    }
}

/// Encodes tiles against a fixed colour ordering.
pub struct TileEncoder {
    window_a: HashMap<ColorKey, usize>,
    window_b: HashMap<ColorKey, usize>,
}

impl TileEncoder {
    pub fn new(table: &[ColorKey]) -> Self {
        Self {
            window_a: key_positions(PaletteSlot::A.window(table)),
            window_b: key_positions(PaletteSlot::B.window(table)),
        }
    }

    /// Palette index of a colour in a slot's window.
    ///
    /// Indices that do not fit in a nibble count as misses.
    pub fn index_of(&self, slot: PaletteSlot, key: ColorKey) -> Option<u8> {
        let window = match slot {
            PaletteSlot::A => &self.window_a,
            PaletteSlot::B => &self.window_b,
        };
        window
            .get(&key)
            .copied()
            .filter(|&i| i < PALETTE_SIZE)
            .map(|i| i as u8)
    }

    /// Encode the tile at tile coordinates `(tile_x, tile_y)`.
    ///
    /// When `preview` is given, each pixel of the tile is overwritten there
    /// with its reconstructed hardware colour.
    pub fn encode_tile(
        &self,
        image: &PixelImage,
        (tile_x, tile_y): (usize, usize),
        slot: PaletteSlot,
        mut preview: Option<&mut PixelImage>,
    ) -> TileEncoding {
        let mut bytes = [0u8; BYTES_PER_TILE];
        let mut not_found = 0;

        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let (px, py) = (tile_x * TILE_SIZE + x, tile_y * TILE_SIZE + y);
                let key = image.key_at(px, py);
                let index = self.index_of(slot, key).unwrap_or_else(|| {
                    not_found += 1;
                    0
                });

                let n = y * TILE_SIZE + x;
                if n % 2 == 0 {
                    bytes[n / 2] = index << 4;
                } else {
                    bytes[n / 2] |= index;
                }

                if let Some(preview) = preview.as_deref_mut() {
                    preview.set_rgb(px, py, HardwareColor::from_key(key).to_rgb());
                }
            }
        }

        TileEncoding {
            bytes,
            slot,
            not_found,
        }
    }
}

/// Encode every whole tile of `image` with the slots chosen in `assignment`.
pub fn encode_tiles(image: &PixelImage, assignment: &PaletteAssignment) -> EncodedTiles {
    let encoder = TileEncoder::new(&assignment.encoding_table);
    let mut preview = image.clone();
    let mut tiles = Vec::with_capacity(image.tile_count());

    for tile_y in 0..image.tiles_high() {
        for tile_x in 0..image.tiles_wide() {
            let slot = assignment
                .selection(tile_x, tile_y)
                .map(|s| s.slot)
                .unwrap_or_default();
            tiles.push(encoder.encode_tile(image, (tile_x, tile_y), slot, Some(&mut preview)));
        }
    }

    EncodedTiles { tiles, preview }
}

/// Split packed tile bytes back into 64 palette indices.
pub fn unpack_indices(bytes: &[u8; BYTES_PER_TILE]) -> [u8; TILE_SIZE * TILE_SIZE] {
    let mut indices = [0u8; TILE_SIZE * TILE_SIZE];
    for (i, &byte) in bytes.iter().enumerate() {
        indices[i * 2] = byte >> 4;
        indices[i * 2 + 1] = byte & 0x0F;
    }
    indices
}

/// Resolve an encoded tile back to source colours through its palette window.
pub fn decode_tile(encoding: &TileEncoding, table: &[ColorKey]) -> Vec<Option<ColorKey>> {
    let window = encoding.slot.window(table);
    unpack_indices(&encoding.bytes)
        .iter()
        .map(|&i| window.get(i as usize).copied())
        .collect()
}
