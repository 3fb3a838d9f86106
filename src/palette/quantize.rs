//! Unique-colour table and hardware colour quantization.

use std::collections::HashMap;

use crate::types::{ColorKey, HardwareColor, PixelImage};

/// One distinct source colour seen in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorEntry {
    pub key: ColorKey,
    /// Number of pixels with this colour.
    pub count: usize,
    pub hardware: HardwareColor,
}

/// Every distinct colour of an image, in order of first appearance.
///
/// The order matters: the first 16 colours are the default candidates for
/// palette A, the rest for palette B.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
    positions: HashMap<ColorKey, usize>,
    /// Last source colour observed for each hardware colour.
    representatives: HashMap<HardwareColor, ColorKey>,
}

impl ColorTable {
    /// Entries in first-seen order.
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    /// Colour keys in first-seen order.
    pub fn keys(&self) -> Vec<ColorKey> {
        self.entries.iter().map(|e| e.key).collect()
    }

    pub fn get(&self, key: ColorKey) -> Option<&ColorEntry> {
        self.positions.get(&key).map(|&i| &self.entries[i])
    }

    /// Hardware colour a source colour quantizes to, if it was seen.
    pub fn hardware(&self, key: ColorKey) -> Option<HardwareColor> {
        self.get(key).map(|e| e.hardware)
    }

    /// The source colour most recently seen for a hardware colour.
    ///
    /// Several source colours can share one hardware colour; only the last
    /// one survives.
    pub fn representative(&self, hardware: HardwareColor) -> Option<ColorKey> {
        self.representatives.get(&hardware).copied()
    }

    /// Number of distinct hardware colours.
    pub fn hardware_count(&self) -> usize {
        self.representatives.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn observe(&mut self, key: ColorKey) {
        let hardware = HardwareColor::from_key(key);
        let entries = &mut self.entries;
        let index = *self.positions.entry(key).or_insert_with(|| {
            entries.push(ColorEntry {
                key,
                count: 0,
                hardware,
            });
            entries.len() - 1
        });
        self.entries[index].count += 1;
        self.representatives.insert(hardware, key);
    }
}

/// Build the colour table of an image in a single row-major pass.
pub fn quantize(image: &PixelImage) -> ColorTable {
    let mut table = ColorTable::default();
    for key in image.keys() {
        table.observe(key);
    }
    table
}
