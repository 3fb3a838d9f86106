//! Assembler data directives (`dc.b` / `dc.w`).
//!
//! The native toolchain parses these files as-is, so spacing, hex case and
//! line grouping are fixed:
//!
//! ```text
//!     dc.b    0x00, 0x11, 0x01, 0x10
//! ```

use std::fmt::{self, Write};

/// Width of a data directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataUnit {
    Byte,
    Word,
    Long,
}

impl DataUnit {
    pub fn suffix(self) -> char {
        match self {
            DataUnit::Byte => 'b',
            DataUnit::Word => 'w',
            DataUnit::Long => 'l',
        }
    }
}

impl fmt::Display for DataUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dc.{}", self.suffix())
    }
}

/// Line layout of a data block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLayout {
    pub unit: DataUnit,
    /// Values per line.
    pub per_line: usize,
    /// Insert an empty line after every this many lines.
    pub group_lines: Option<usize>,
}

impl DataLayout {
    /// Tile bytes: 4 per line, grouped by 8 lines.
    pub const TILESET: Self = Self {
        unit: DataUnit::Byte,
        per_line: 4,
        group_lines: Some(8),
    };

    /// Tilemap words: 4 per line, grouped by 8 lines.
    pub const TILEMAP: Self = Self {
        unit: DataUnit::Word,
        per_line: 4,
        group_lines: Some(8),
    };

    /// Collision tables: 16 bytes per line, ungrouped.
    pub const COLLISION: Self = Self {
        unit: DataUnit::Byte,
        per_line: 16,
        group_lines: None,
    };
}

/// Format one value as `0x` plus at least two lowercase hex digits.
pub fn hex_token(value: u32) -> String {
    format!("0x{:02x}", value)
}

/// Render values as data directive lines.
///
/// No values yields an empty string.
pub fn data_lines<T>(values: &[T], layout: DataLayout) -> String
where
    T: Copy + Into<u32>,
{
    let per_line = layout.per_line.max(1);
    let mut out = String::new();

    for (line, chunk) in values.chunks(per_line).enumerate() {
        let tokens: Vec<String> = chunk.iter().map(|&v| hex_token(v.into())).collect();
        let _ = writeln!(out, "    {}    {}", layout.unit, tokens.join(", "));

        if let Some(group) = layout.group_lines {
            if group > 0 && (line + 1) % group == 0 {
                out.push('\n');
            }
        }
    }

    out
}
