//! The full compile pipeline.
//!
//! Phases run strictly in order, each consuming the complete output of the
//! previous one: compaction, quantization, palette assignment, encoding and
//! finally emission. The run is pure; files come back as [`ResourceFile`]s.

use crate::collision::{compact_collision, CollisionMap, CompactCollision};
use crate::emit::{
    collision_asm, collision_header, main_source, palette_words, tilemap_asm, tileset_asm,
    tileset_header, ResourceFile,
};
use crate::error::Result;
use crate::palette::{assign_palettes, quantize, PaletteSlot};
use crate::tiles::{compact, encode_tiles};
use crate::types::{PixelImage, TileGrid, TileRef, TILEMAP_WIDTH};

/// Resource name used when none is configured.
pub const DEFAULT_NAME: &str = "blue";

/// Settings for one compile run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Symbol prefix of the generated resources.
    pub name: String,
    /// Deduplicate the tiles referenced by the grid before encoding.
    pub compact: bool,
    /// Also emit the `src/main.c` loader.
    pub stub: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            compact: true,
            stub: true,
        }
    }
}

/// A tile whose colours were not all reachable from its palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMiss {
    /// Tile index in encoding order.
    pub tile: usize,
    pub slot: PaletteSlot,
    pub not_found: usize,
}

/// Counters describing a compile run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileStats {
    pub tile_count: usize,
    /// Distinct source colours.
    pub colours: usize,
    /// Distinct hardware colours.
    pub hardware_colours: usize,
    /// Entries appended by rebalancing.
    pub rebalanced: usize,
    pub palette_a_tiles: usize,
    pub palette_b_tiles: usize,
    /// Pixels written as index 0 because their colour was missing.
    pub not_found: usize,
    pub misses: Vec<TileMiss>,
}

/// Everything a compile run produces.
#[derive(Debug, Clone)]
pub struct CompileOutput {
    pub files: Vec<ResourceFile>,
    pub stats: CompileStats,
    /// Packed hardware colour words in encoding order.
    pub palette: Vec<u16>,
    /// Encoded tiles drawn in their hardware colours.
    pub preview: PixelImage,
}

/// Compile a bitmap and optional tile grid into tileset, tilemap and header
/// files.
///
/// With a grid and `compact` set, only the tiles the grid references are
/// encoded and the grid is renumbered to match. Without a grid every whole
/// tile of the bitmap is encoded and laid out in order. Grid cells keep only
/// their tile index bits.
pub fn compile(image: &PixelImage, grid: Option<&TileGrid>, options: &CompileOptions) -> CompileOutput {
    let grid = grid.map(|g| g.map(TileRef::masked));
    let (tiles, map) = match grid {
        Some(grid) if options.compact => {
            let compaction = compact(&grid, image);
            (compaction.strip, compaction.grid)
        }
        Some(grid) => (image.clone(), grid),
        None => (
            image.clone(),
            TileGrid::sequential(image.tiles_wide(), image.tiles_high()),
        ),
    };

    let table = quantize(&tiles);
    let assignment = assign_palettes(&tiles, &table);
    let encoded = encode_tiles(&tiles, &assignment);
    let palette = palette_words(&assignment.encoding_table);

    let (palette_a_tiles, palette_b_tiles) = assignment.slot_counts();
    let misses = encoded
        .tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.not_found > 0)
        .map(|(tile, t)| TileMiss {
            tile,
            slot: t.slot,
            not_found: t.not_found,
        })
        .collect();

    let stats = CompileStats {
        tile_count: encoded.tile_count(),
        colours: table.len(),
        hardware_colours: table.hardware_count(),
        rebalanced: assignment.encoding_table.len() - assignment.decision_table.len(),
        palette_a_tiles,
        palette_b_tiles,
        not_found: encoded.not_found(),
        misses,
    };

    let name = &options.name;
    let mut files = vec![
        ResourceFile::new(
            format!("res/{}_tileset.s", name),
            tileset_asm(name, &encoded.bytes(), encoded.tile_count()),
        ),
        ResourceFile::new(
            format!("res/{}_tilemap.s", name),
            tilemap_asm(name, &map.to_words(TILEMAP_WIDTH)),
        ),
        ResourceFile::new(format!("res/{}_tileset.h", name), tileset_header(name)),
    ];
    if options.stub {
        files.push(ResourceFile::new("src/main.c", main_source(name, &palette)));
    }

    CompileOutput {
        files,
        stats,
        palette,
        preview: encoded.preview,
    }
}

/// Compiled collision tables and their resource files.
#[derive(Debug, Clone)]
pub struct CollisionOutput {
    pub compact: CompactCollision,
    pub files: Vec<ResourceFile>,
}

/// Compact a collision map and emit `res/res_collision.s` and `.h`.
pub fn compile_collision(map: &CollisionMap) -> Result<CollisionOutput> {
    let compact = compact_collision(map)?;
    let files = vec![
        ResourceFile::new("res/res_collision.s", collision_asm(&compact)),
        ResourceFile::new("res/res_collision.h", collision_header(&compact)),
    ];
    Ok(CollisionOutput { compact, files })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorKey, TileRef, TILE_SIZE};

    fn file<'a>(out: &'a [ResourceFile], path: &str) -> &'a str {
        out.iter()
            .find(|f| f.path.to_str() == Some(path))
            .map(|f| f.contents.as_str())
            .unwrap_or_else(|| panic!("missing {}", path))
    }

    /// Four solid tiles in a row, each its own colour.
    fn strip() -> PixelImage {
        let mut img = PixelImage::new(4 * TILE_SIZE, TILE_SIZE);
        for tile in 0..4u8 {
            let key = ColorKey::from_rgb(tile * 60, 0, 0);
            for y in 0..TILE_SIZE {
                for x in 0..TILE_SIZE {
                    img.set_key(tile as usize * TILE_SIZE + x, y, key);
                }
            }
        }
        img
    }

    #[test]
    fn test_default_files() {
        let out = compile(&strip(), None, &CompileOptions::default());
        let paths: Vec<_> = out.files.iter().map(|f| f.path.display().to_string()).collect();
        assert_eq!(
            paths,
            vec![
                "res/blue_tileset.s",
                "res/blue_tilemap.s",
                "res/blue_tileset.h",
                "src/main.c"
            ]
        );
        assert_eq!(out.stats.tile_count, 4);
        assert_eq!(out.stats.colours, 4);
        assert_eq!(out.stats.not_found, 0);
        assert!(file(&out.files, "res/blue_tileset.s").contains("dc.w    4 /* number of tiles */"));
    }

    #[test]
    fn test_without_grid_lays_tiles_out_in_order() {
        let out = compile(&strip(), None, &CompileOptions::default());
        let map = file(&out.files, "res/blue_tilemap.s");
        assert!(map.contains("    dc.w    0x00, 0x01, 0x02, 0x03\n"));
    }

    #[test]
    fn test_compaction_encodes_referenced_tiles_only() {
        let grid = TileGrid::from_ids(vec![vec![Some(3), None, Some(3), Some(1)]]);
        let out = compile(&strip(), Some(&grid), &CompileOptions::default());

        assert_eq!(out.stats.tile_count, 2);
        assert_eq!(out.stats.colours, 2);
        assert!(file(&out.files, "res/blue_tilemap.s").contains("    dc.w    0x00, 0x00, 0x00, 0x01\n"));
    }

    #[test]
    fn test_no_compact_keeps_grid_and_bitmap() {
        let grid = TileGrid::new(vec![vec![TileRef::Tile(3), TileRef::Tile(2)]]);
        let options = CompileOptions {
            compact: false,
            ..Default::default()
        };
        let out = compile(&strip(), Some(&grid), &options);

        assert_eq!(out.stats.tile_count, 4);
        assert!(file(&out.files, "res/blue_tilemap.s").contains("    dc.w    0x03, 0x02, 0x00, 0x00\n"));
    }

    #[test]
    fn test_attribute_words_compact_to_one_tile() {
        let grid = TileGrid::new(vec![vec![TileRef::Tile(0x8003), TileRef::Tile(3)]]);
        let out = compile(&strip(), Some(&grid), &CompileOptions::default());

        assert_eq!(out.stats.tile_count, 1);
        assert!(file(&out.files, "res/blue_tilemap.s").contains("    dc.w    0x00, 0x00, 0x00, 0x00\n"));
    }

    #[test]
    fn test_no_compact_masks_wide_ids() {
        let grid = TileGrid::new(vec![vec![TileRef::Tile(0x10074), TileRef::Tile(0x8003)]]);
        let options = CompileOptions {
            compact: false,
            ..Default::default()
        };
        let out = compile(&strip(), Some(&grid), &options);

        assert!(file(&out.files, "res/blue_tilemap.s").contains("    dc.w    0x74, 0x03, 0x00, 0x00\n"));
    }

    #[test]
    fn test_name_and_stub_options() {
        let options = CompileOptions {
            name: "forest".to_string(),
            compact: true,
            stub: false,
        };
        let out = compile(&strip(), None, &options);

        assert_eq!(out.files.len(), 3);
        assert!(file(&out.files, "res/forest_tileset.h").contains("extern const TileSet forest_tileset;"));
        assert!(file(&out.files, "res/forest_tilemap.s").contains("forest_tilemap_data:"));
    }

    #[test]
    fn test_palette_words_in_stub() {
        let out = compile(&strip(), None, &CompileOptions::default());
        assert_eq!(out.palette, vec![0x000, 0x002, 0x006, 0x00a]);
        assert!(file(&out.files, "src/main.c").contains("{ 0x0, 0x2, 0x6, 0xa }"));
    }

    #[test]
    fn test_collision_files() {
        let map: CollisionMap = [(2u16, [8; 8])].into_iter().collect();
        let out = compile_collision(&map).unwrap();

        assert_eq!(out.compact.index, vec![0, 0, 1]);
        assert_eq!(out.files.len(), 2);
        assert!(out.files[1].contents.contains("tileIdToHeightMap[3];"));
    }
}
