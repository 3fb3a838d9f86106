//! Reading inputs from disk and writing generated files back.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageBuffer, RgbaImage};

use crate::emit::ResourceFile;
use crate::error::{PackError, Result};
use crate::types::{PixelImage, TileGrid, TileRef};

/// Decode any bitmap the `image` crate understands into RGBA pixels.
pub fn load_image(path: &Path) -> Result<PixelImage> {
    let img = image::open(path)
        .map_err(|e| PackError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to decode image: {}", e),
        })?
        .to_rgba8();
    Ok(PixelImage::from(img))
}

/// Parse a tile grid: a JSON array of rows of tile ids or `null`.
///
/// Cells may be editor attribute words; only their tile index is kept.
pub fn parse_tile_grid(source: &str) -> Result<TileGrid> {
    let grid: TileGrid = serde_json::from_str(source).map_err(|e| PackError::Parse {
        message: format!("Invalid tilemap: {}", e),
        help: Some("Expected an array of rows, each cell a tile id or null".to_string()),
    })?;
    Ok(grid.map(TileRef::masked))
}

/// Load a tile grid from disk.
pub fn load_tile_grid(path: &Path) -> Result<TileGrid> {
    let source = fs::read_to_string(path).map_err(|e| PackError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read tilemap: {}", e),
    })?;
    parse_tile_grid(&source)
}

/// Write generated files below `root`, creating directories as needed.
///
/// Returns the written paths in order.
pub fn write_files(root: &Path, files: &[ResourceFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = root.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PackError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
        fs::write(&path, &file.contents).map_err(|e| PackError::Io {
            path: path.clone(),
            message: format!("Failed to write file: {}", e),
        })?;
        written.push(path);
    }
    Ok(written)
}

/// Upscale an image by an integer factor; 0 is treated as 1.
pub fn upscale(image: &PixelImage, scale: u32) -> Result<RgbaImage> {
    let scale = scale.max(1);
    let source = RgbaImage::from(image);
    if scale == 1 {
        return Ok(source);
    }

    let (width, height) = source
        .width()
        .checked_mul(scale)
        .zip(source.height().checked_mul(scale))
        .ok_or_else(|| PackError::Build {
            message: format!(
                "Preview of {}x{} pixels cannot be scaled by {}",
                source.width(),
                source.height(),
                scale
            ),
            help: Some("Use a smaller --scale".to_string()),
        })?;

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        *source.get_pixel(x / scale, y / scale)
    }))
}

/// Save an RGBA image as PNG, creating the parent directory if needed.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PackError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    img.save(path).map_err(|e| PackError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

/// Write an image to a PNG file with optional integer scaling.
pub fn write_png(image: &PixelImage, path: &Path, scale: u32) -> Result<()> {
    save_png(&upscale(image, scale)?, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorKey;
    use tempfile::tempdir;

    #[test]
    fn test_parse_tile_grid() {
        let grid = parse_tile_grid("[[1, null, 0], [7]]").unwrap();
        assert_eq!(
            grid.rows(),
            &[
                vec![TileRef::Tile(1), TileRef::Empty, TileRef::Tile(0)],
                vec![TileRef::Tile(7)],
            ]
        );
    }

    #[test]
    fn test_parse_tile_grid_masks_attribute_words() {
        let grid = parse_tile_grid("[[32884, 116, null]]").unwrap();
        assert_eq!(
            grid.rows(),
            &[vec![TileRef::Tile(116), TileRef::Tile(116), TileRef::Empty]]
        );
    }

    #[test]
    fn test_parse_tile_grid_rejects_negative() {
        let err = parse_tile_grid("[[-1]]").unwrap_err();
        assert!(matches!(err, PackError::Parse { .. }));
    }

    #[test]
    fn test_write_files_creates_directories() {
        let dir = tempdir().unwrap();
        let files = vec![
            ResourceFile::new("res/a.s", "A".to_string()),
            ResourceFile::new("src/main.c", "B".to_string()),
        ];

        let written = write_files(dir.path(), &files).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(dir.path().join("res/a.s")).unwrap(), "A");
        assert_eq!(fs::read_to_string(dir.path().join("src/main.c")).unwrap(), "B");
    }

    #[test]
    fn test_png_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preview.png");
        let key = ColorKey::from_rgb(36, 72, 252);
        let mut img = PixelImage::filled(8, 8, key);
        img.set_key(7, 7, ColorKey::from_rgb(0, 0, 0));

        write_png(&img, &path, 1).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, img);
    }

    #[test]
    fn test_png_scaling() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/scaled.png");
        let img = PixelImage::filled(8, 8, ColorKey::from_rgb(1, 2, 3));

        write_png(&img, &path, 3).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.width(), 24);
        assert_eq!(loaded.height(), 24);
        assert_eq!(loaded.key_at(23, 23), ColorKey::from_rgb(1, 2, 3));
    }

    #[test]
    fn test_scale_overflow_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let img = PixelImage::filled(8, 8, ColorKey::from_rgb(1, 2, 3));

        let err = write_png(&img, &path, u32::MAX).unwrap_err();
        assert!(matches!(err, PackError::Build { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_image() {
        let dir = tempdir().unwrap();
        let err = load_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, PackError::Io { .. }));
    }
}
