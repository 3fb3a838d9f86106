//! JSON heightmap store as saved by the tile editor.
//!
//! The store is an object keyed by tile id:
//!
//! ```json
//! { "116": [8, 8, 8, 8, 8, 8, 8, 8], "117": [null, null, 3] }
//! ```
//!
//! The editor paints single offsets, so arrays may hold `null` holes or stop
//! short of 8 entries. Both read back as height 0. Entries are loaded in
//! ascending tile id order regardless of their order in the file.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{PackError, Result};

use super::map::{CollisionMap, HeightMap, HEIGHTMAP_LEN, MAX_HEIGHT};

/// Parse a heightmap store from JSON text.
pub fn parse_collision_map(source: &str) -> Result<CollisionMap> {
    let object: Map<String, Value> = serde_json::from_str(source).map_err(|e| PackError::Parse {
        message: format!("Invalid collision map: {}", e),
        help: Some("Expected an object of tile id -> array of 8 heights".to_string()),
    })?;

    let mut entries = Vec::with_capacity(object.len());
    for (key, value) in &object {
        let tile_id: u16 = key.trim().parse().map_err(|_| PackError::Parse {
            message: format!("Invalid tile id in collision map: {:?}", key),
            help: Some("Tile ids are integers between 0 and 65535".to_string()),
        })?;
        entries.push((tile_id, parse_heights(tile_id, value)?));
    }
    entries.sort_by_key(|&(tile_id, _)| tile_id);

    Ok(entries.into_iter().collect())
}

fn parse_heights(tile_id: u16, value: &Value) -> Result<HeightMap> {
    let values = value.as_array().ok_or_else(|| PackError::Parse {
        message: format!("Heightmap of tile {} is not an array", tile_id),
        help: None,
    })?;

    if values.len() > HEIGHTMAP_LEN {
        return Err(PackError::Parse {
            message: format!(
                "Heightmap of tile {} has {} entries, expected at most {}",
                tile_id,
                values.len(),
                HEIGHTMAP_LEN
            ),
            help: None,
        });
    }

    let mut heights = [0u8; HEIGHTMAP_LEN];
    for (x, v) in values.iter().enumerate() {
        heights[x] = match v {
            Value::Null => 0,
            other => other
                .as_u64()
                .filter(|&h| h <= u64::from(MAX_HEIGHT))
                .map(|h| h as u8)
                .ok_or_else(|| PackError::Parse {
                    message: format!("Invalid height {} for tile {} at offset {}", other, tile_id, x),
                    help: Some(format!("Heights range from 0 to {}", MAX_HEIGHT)),
                })?,
        };
    }

    Ok(heights)
}

/// Load a heightmap store from disk.
pub fn load_collision_map(path: &Path) -> Result<CollisionMap> {
    let source = fs::read_to_string(path).map_err(|e| PackError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read collision map: {}", e),
    })?;
    parse_collision_map(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::map::SOLID;

    #[test]
    fn test_parse_orders_ids_ascending() {
        let map = parse_collision_map(
            r#"{"116": [8,8,8,8,8,8,8,8], "5": [1,2,3,4,5,6,7,8], "20": [2]}"#,
        )
        .unwrap();
        let ids: Vec<u16> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![5, 20, 116]);
        assert_eq!(map.get(116), Some(SOLID));
    }

    #[test]
    fn test_ids_compare_numerically() {
        let map = parse_collision_map(r#"{"10": [1], "9": [2], "100": [3]}"#).unwrap();
        let ids: Vec<u16> = map.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![9, 10, 100]);
    }

    #[test]
    fn test_parse_fills_nulls_and_short_arrays() {
        let map = parse_collision_map(r#"{"3": [null, 4, null]}"#).unwrap();
        assert_eq!(map.get(3), Some([0, 4, 0, 0, 0, 0, 0, 0]));
    }

    #[test]
    fn test_parse_rejects_out_of_range_height() {
        let err = parse_collision_map(r#"{"3": [9]}"#).unwrap_err();
        assert!(err.to_string().contains("Invalid height"));
    }

    #[test]
    fn test_parse_rejects_long_array() {
        assert!(parse_collision_map(r#"{"3": [0,0,0,0,0,0,0,0,0]}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_key() {
        assert!(parse_collision_map(r#"{"tile": [0]}"#).is_err());
        assert!(parse_collision_map(r#"{"70000": [0]}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(parse_collision_map("[1, 2]").is_err());
    }
}
