//! Colour quantization and palette assignment.
//!
//! Quantization collects every distinct source colour in first-seen order;
//! assignment decides per tile which of the two hardware palettes it uses.

mod assign;
mod quantize;

pub use assign::{
    assign_palettes, key_positions, score_tile, PaletteAssignment, PaletteSlot, TileSelection,
    UsageTally, PALETTE_SIZE, REBALANCE_BUCKETS,
};
pub use quantize::{quantize, ColorEntry, ColorTable};
