//! Collision resource files (`res_collision.s` / `res_collision.h`).

use crate::collision::{CompactCollision, HEIGHTMAP_LEN};

use super::directives::{data_lines, DataLayout};

/// Assembly for the tile index table followed by the packed heightmaps.
pub fn collision_asm(compact: &CompactCollision) -> String {
    let mut out = String::from(
        ".section .rodata_binf\n\n    .align  2\n    .global tileIdToHeightMap\ntileIdToHeightMap:\n",
    );
    out.push_str(&data_lines(&compact.index, DataLayout::COLLISION));
    out.push_str("\n  .align  2\n  .global heightMaps\nheightMaps:\n");
    out.push_str(&data_lines(&compact.heights, DataLayout::COLLISION));
    out
}

/// Header declaring both tables and the `getHeightValue` accessor.
pub fn collision_header(compact: &CompactCollision) -> String {
    format!(
        r#"#ifndef _RES_COLLISION_H_
#define _RES_COLLISION_H_

extern const u8 tileIdToHeightMap[{index_len}];
extern const u8 heightMaps[{count}][{len}];

u8 getHeightValue(u16 tileId, u8 offsetX) {{
  u8 heightMapIdx = tileIdToHeightMap[tileId];
  if (heightMapIdx == 0) {{
      return 0;
  }}
  const u8 *heightMap = heightMaps[heightMapIdx - 1];
  return heightMap[offsetX];
}}

#endif // _RES_COLLISION_H_"#,
        index_len = compact.index.len(),
        count = compact.heightmap_count(),
        len = HEIGHTMAP_LEN,
    )
}
