//! Tileset, tilemap and palette resource files.
//!
//! Symbol names derive from a single resource name: `blue` yields
//! `blue_tileset`, `blue_tileset_data`, `blue_tilemap` and `blue_tilemap_data`.

use crate::types::{ColorKey, HardwareColor, TILEMAP_HEIGHT, TILEMAP_WIDTH};

use super::directives::{data_lines, DataLayout, DataUnit};

const RODATA_HEADER: &str = ".section .rodata_binf\n\n    .align  2\n";

/// Tileset assembly: packed tile bytes plus the `TileSet` descriptor
/// (compression, tile count, data pointer).
pub fn tileset_asm(name: &str, bytes: &[u8], tile_count: usize) -> String {
    let mut out = String::from(RODATA_HEADER);
    out.push_str(&format!("{}_tileset_data:\n", name));
    out.push_str(&data_lines(bytes, DataLayout::TILESET));
    out.push_str("\n\n    .align 2\n");
    out.push_str(&format!("    .global {}_tileset\n", name));
    out.push_str(&format!("{}_tileset:\n", name));
    out.push_str(&format!("    {}    0\n", DataUnit::Word));
    out.push_str(&format!("    {}    {} /* number of tiles */\n", DataUnit::Word, tile_count));
    out.push_str(&format!("    {}    {}_tileset_data\n    ", DataUnit::Long, name));
    out
}

/// Tilemap assembly: map words plus the `TileMap` descriptor
/// (compression, width, height, data pointer).
pub fn tilemap_asm(name: &str, words: &[u32]) -> String {
    let mut out = String::from(RODATA_HEADER);
    out.push_str(&format!("{}_tilemap_data:\n", name));
    out.push_str(&data_lines(words, DataLayout::TILEMAP));
    out.push_str("\n\n    .align 2\n");
    out.push_str(&format!("    .global {}_tilemap\n", name));
    out.push_str(&format!("{}_tilemap:\n", name));
    out.push_str(&format!("    {}    0  /* compression */ \n", DataUnit::Word));
    out.push_str(&format!("    {}    {} /* w */\n", DataUnit::Word, TILEMAP_WIDTH));
    out.push_str(&format!("    {}    {} /* h */\n", DataUnit::Word, TILEMAP_HEIGHT));
    out.push_str(&format!("    {}    {}_tilemap_data\n    ", DataUnit::Long, name));
    out
}

/// C declarations of the tileset and tilemap descriptors.
pub fn tileset_header(name: &str) -> String {
    let guard = format!("_RES_{}_TILESET_H_", name.to_uppercase());
    format!(
        "#ifndef {guard}\n    #define {guard}\n    \n    extern const TileSet {name}_tileset;\n    extern const TileMap {name}_tilemap;\n    \n    #endif // {guard}"
    )
}

/// Packed hardware colour words in palette order.
pub fn palette_words(table: &[ColorKey]) -> Vec<u16> {
    table
        .iter()
        .map(|&key| HardwareColor::from_key(key).packed())
        .collect()
}

/// Palette words as a C initializer body: `0xe0e, 0x0, ...`.
pub fn palette_list(words: &[u16]) -> String {
    words
        .iter()
        .map(|&w| HardwareColor::from_packed(w).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Minimal program that loads the tileset, palette and tilemap and idles.
pub fn main_source(name: &str, palette: &[u16]) -> String {
    format!(
        r#"#include <genesis.h>
#include "{name}_tileset.h"

int main(bool hard) {{
    u16 ind = TILE_USER_INDEX;
    VDP_loadTileSet(&{name}_tileset, ind, DMA);

    u16 colors[] = {{ {colors} }};
    PAL_setColors(0, colors, sizeof(colors), CPU);

    VDP_setTileMapEx(BG_B, &{name}_tilemap, TILE_ATTR_FULL(PAL0, FALSE, FALSE, FALSE, ind), 0, 0, 0, 0, {w}, {h}, CPU);

    ind += {name}_tileset.numTile;

    while (TRUE)
    {{
      SYS_doVBlankProcess();
    }}

    return 0;
}}"#,
        name = name,
        colors = palette_list(palette),
        w = TILEMAP_WIDTH,
        h = TILEMAP_HEIGHT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tileset_asm_layout() {
        let asm = tileset_asm("blue", &[0x01, 0x10, 0x11, 0x00, 0xff], 1);
        let expected = [
            ".section .rodata_binf",
            "",
            "    .align  2",
            "blue_tileset_data:",
            "    dc.b    0x01, 0x10, 0x11, 0x00",
            "    dc.b    0xff",
            "",
            "",
            "    .align 2",
            "    .global blue_tileset",
            "blue_tileset:",
            "    dc.w    0",
            "    dc.w    1 /* number of tiles */",
            "    dc.l    blue_tileset_data",
            "    ",
        ]
        .join("\n");
        assert_eq!(asm, expected);
    }

    #[test]
    fn test_tileset_asm_zero_tiles() {
        let asm = tileset_asm("bg", &[], 0);
        assert!(asm.contains("bg_tileset_data:\n\n\n    .align 2\n"));
        assert!(asm.contains("    dc.w    0 /* number of tiles */\n"));
    }

    #[test]
    fn test_tilemap_asm_descriptor() {
        let asm = tilemap_asm("blue", &[0, 1, 2]);
        let lines: Vec<&str> = asm.split('\n').collect();
        assert_eq!(lines[3], "blue_tilemap_data:");
        assert_eq!(lines[4], "    dc.w    0x00, 0x01, 0x02");
        assert_eq!(
            &lines[5..],
            &[
                "",
                "",
                "    .align 2",
                "    .global blue_tilemap",
                "blue_tilemap:",
                "    dc.w    0  /* compression */ ",
                "    dc.w    64 /* w */",
                "    dc.w    32 /* h */",
                "    dc.l    blue_tilemap_data",
                "    ",
            ]
        );
    }

    #[test]
    fn test_tileset_header() {
        let header = tileset_header("blue");
        assert!(header.starts_with("#ifndef _RES_BLUE_TILESET_H_\n    #define _RES_BLUE_TILESET_H_\n"));
        assert!(header.contains("    extern const TileSet blue_tileset;\n"));
        assert!(header.contains("    extern const TileMap blue_tilemap;\n"));
        assert!(header.ends_with("#endif // _RES_BLUE_TILESET_H_"));
    }

    #[test]
    fn test_palette_words_follow_table_order() {
        let table = vec![
            ColorKey::from_rgb(255, 0, 255),
            ColorKey::from_rgb(0, 0, 0),
            ColorKey::from_rgb(255, 0, 255),
        ];
        let words = palette_words(&table);
        assert_eq!(words, vec![0xe0e, 0x000, 0xe0e]);
        assert_eq!(palette_list(&words), "0xe0e, 0x0, 0xe0e");
    }

    #[test]
    fn test_main_source_embeds_palette() {
        let src = main_source("blue", &[0x0, 0xeee]);
        assert!(src.contains("#include \"blue_tileset.h\""));
        assert!(src.contains("    u16 colors[] = { 0x0, 0xeee };\n"));
        assert!(src.contains("VDP_loadTileSet(&blue_tileset, ind, DMA);"));
        assert!(src.contains("0, 0, 0, 0, 64, 32, CPU);"));
        assert!(src.ends_with("return 0;\n}"));
    }
}
