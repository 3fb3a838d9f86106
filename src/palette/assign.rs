//! Per-tile palette selection and the global rebalancing pass.
//!
//! Every tile is scored once against the colour ordering as quantized (the
//! decision table). Afterwards palette-A colours that keep showing up in
//! B-leaning tiles are appended again at the end of the ordering, producing
//! the encoding table. Tile decisions are never revisited: the encoder uses
//! the original slot with the extended table.

use std::collections::HashMap;
use std::fmt;

use crate::types::{ColorKey, PixelImage, TILE_SIZE};

use super::quantize::ColorTable;

/// Colours addressable by one hardware palette.
pub const PALETTE_SIZE: usize = 16;

/// Palette-A buckets considered when collecting rebalancing candidates.
/// The last bucket is never moved.
pub const REBALANCE_BUCKETS: usize = PALETTE_SIZE - 1;

/// One of the two hardware palettes a tile can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteSlot {
    #[default]
    A,
    B,
}

impl PaletteSlot {
    /// Hardware palette number.
    pub fn index(self) -> u8 {
        match self {
            PaletteSlot::A => 0,
            PaletteSlot::B => 1,
        }
    }

    /// The part of a colour ordering this palette indexes into:
    /// positions 0..16 for A, everything from 16 on for B.
    pub fn window(self, table: &[ColorKey]) -> &[ColorKey] {
        let split = table.len().min(PALETTE_SIZE);
        match self {
            PaletteSlot::A => &table[..split],
            PaletteSlot::B => &table[split..],
        }
    }
}

impl fmt::Display for PaletteSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PAL{}", self.index())
    }
}

/// How often each palette position is used by the pixels of one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSelection {
    pub slot: PaletteSlot,
    /// Pixel count per palette-A position.
    pub usage_a: [u32; PALETTE_SIZE],
    /// Pixel count per palette-B position (ordering position - 16).
    pub usage_b: Vec<u32>,
    /// Distinct palette-A positions used.
    pub used_a: usize,
    /// Distinct palette-B positions used.
    pub used_b: usize,
    pub pixels_a: u32,
    pub pixels_b: u32,
}

impl TileSelection {
    /// Whether this tile draws more distinct colours from B than from A
    /// while still touching A.
    pub fn leans_to_b(&self) -> bool {
        self.used_b > self.used_a && self.used_a != 0
    }
}

/// Usage totals accumulated over every scored tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageTally {
    pub global_a: [u64; PALETTE_SIZE],
    pub global_b: Vec<u64>,
    /// Palette-A pixel usage coming from tiles that lean towards B.
    pub move_candidates: [u64; PALETTE_SIZE],
}

impl UsageTally {
    fn new(b_len: usize) -> Self {
        Self {
            global_a: [0; PALETTE_SIZE],
            global_b: vec![0; b_len],
            move_candidates: [0; PALETTE_SIZE],
        }
    }

    /// Fold one tile's usage into the totals.
    pub fn record(&mut self, tile: &TileSelection) {
        for (total, &n) in self.global_a.iter_mut().zip(&tile.usage_a) {
            *total += u64::from(n);
        }
        for (total, &n) in self.global_b.iter_mut().zip(&tile.usage_b) {
            *total += u64::from(n);
        }
        if tile.leans_to_b() {
            for i in 0..REBALANCE_BUCKETS {
                self.move_candidates[i] += u64::from(tile.usage_a[i]);
            }
        }
    }

    /// Append a duplicate of every palette-A colour with move candidates.
    pub fn rebalance(&self, decision_table: &[ColorKey]) -> Vec<ColorKey> {
        let mut encoding_table = decision_table.to_vec();
        for (i, &moved) in self.move_candidates.iter().enumerate() {
            if moved != 0 {
                if let Some(&key) = decision_table.get(i) {
                    encoding_table.push(key);
                }
            }
        }
        encoding_table
    }
}

/// Result of palette assignment for a whole image.
#[derive(Debug, Clone)]
pub struct PaletteAssignment {
    /// Selections indexed `[tile_row][tile_col]`.
    pub selections: Vec<Vec<TileSelection>>,
    pub tally: UsageTally,
    /// Colour ordering the slot decisions were made against.
    pub decision_table: Vec<ColorKey>,
    /// Decision table plus rebalanced duplicates; used for encoding.
    pub encoding_table: Vec<ColorKey>,
}

impl PaletteAssignment {
    pub fn selection(&self, tile_x: usize, tile_y: usize) -> Option<&TileSelection> {
        self.selections.get(tile_y)?.get(tile_x)
    }

    /// Count tiles assigned to each slot as `(a, b)`.
    pub fn slot_counts(&self) -> (usize, usize) {
        self.selections
            .iter()
            .flatten()
            .fold((0, 0), |(a, b), sel| match sel.slot {
                PaletteSlot::A => (a + 1, b),
                PaletteSlot::B => (a, b + 1),
            })
    }
}

/// First position of every key in an ordering.
pub fn key_positions(table: &[ColorKey]) -> HashMap<ColorKey, usize> {
    let mut positions = HashMap::with_capacity(table.len());
    for (i, &key) in table.iter().enumerate() {
        positions.entry(key).or_insert(i);
    }
    positions
}

/// Score one 8x8 tile against a colour ordering.
///
/// Pixels whose colour is not in the ordering are ignored. The tile takes
/// palette B only when strictly more of its pixels fall in B.
pub fn score_tile(
    image: &PixelImage,
    (tile_x, tile_y): (usize, usize),
    positions: &HashMap<ColorKey, usize>,
    table_len: usize,
) -> TileSelection {
    let mut usage_a = [0u32; PALETTE_SIZE];
    let mut usage_b = vec![0u32; table_len.saturating_sub(PALETTE_SIZE)];

    for y in 0..TILE_SIZE {
        for x in 0..TILE_SIZE {
            let key = image.key_at(tile_x * TILE_SIZE + x, tile_y * TILE_SIZE + y);
            match positions.get(&key) {
                Some(&pos) if pos < PALETTE_SIZE => usage_a[pos] += 1,
                Some(&pos) => {
                    if let Some(n) = usage_b.get_mut(pos - PALETTE_SIZE) {
                        *n += 1;
                    }
                }
                None => {}
            }
        }
    }

    let used_a = usage_a.iter().filter(|&&n| n != 0).count();
    let used_b = usage_b.iter().filter(|&&n| n != 0).count();
    let pixels_a: u32 = usage_a.iter().sum();
    let pixels_b: u32 = usage_b.iter().sum();

    let slot = if pixels_b > pixels_a {
        PaletteSlot::B
    } else {
        PaletteSlot::A
    };

    TileSelection {
        slot,
        usage_a,
        usage_b,
        used_a,
        used_b,
        pixels_a,
        pixels_b,
    }
}

/// Choose a palette for every whole tile of `image`, then rebalance.
pub fn assign_palettes(image: &PixelImage, table: &ColorTable) -> PaletteAssignment {
    let decision_table = table.keys();
    let positions = key_positions(&decision_table);
    let mut tally = UsageTally::new(decision_table.len().saturating_sub(PALETTE_SIZE));

    let mut selections = Vec::with_capacity(image.tiles_high());
    for tile_y in 0..image.tiles_high() {
        let mut row = Vec::with_capacity(image.tiles_wide());
        for tile_x in 0..image.tiles_wide() {
            let selection = score_tile(image, (tile_x, tile_y), &positions, decision_table.len());
            tally.record(&selection);
            row.push(selection);
        }
        selections.push(row);
    }

    let encoding_table = tally.rebalance(&decision_table);

    PaletteAssignment {
        selections,
        tally,
        decision_table,
        encoding_table,
    }
}
