//! Row-major RGBA pixel buffers.

use image::RgbaImage;

use super::colour::ColorKey;

/// Edge length of a hardware tile in pixels.
pub const TILE_SIZE: usize = 8;

/// A decoded bitmap: `width * height` RGBA pixels stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelImage {
    /// Create a fully transparent image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * 4 {
            return None;
        }
        Some(Self { width, height, data })
    }

    /// Create an opaque image filled with one colour.
    pub fn filled(width: usize, height: usize, key: ColorKey) -> Self {
        let mut img = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.set_key(x, y, key);
            }
        }
        img
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of whole tiles across.
    pub fn tiles_wide(&self) -> usize {
        self.width / TILE_SIZE
    }

    /// Number of whole tiles down.
    pub fn tiles_high(&self) -> usize {
        self.height / TILE_SIZE
    }

    /// Number of whole tiles in the image.
    pub fn tile_count(&self) -> usize {
        self.tiles_wide() * self.tiles_high()
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    /// Colour key of the pixel at `(x, y)`; alpha is ignored.
    pub fn key_at(&self, x: usize, y: usize) -> ColorKey {
        let i = self.offset(x, y);
        ColorKey::from_rgb(self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Overwrite the RGB channels at `(x, y)`, keeping alpha.
    pub fn set_rgb(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// Write an opaque colour at `(x, y)`.
    pub fn set_key(&mut self, x: usize, y: usize, key: ColorKey) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&[key.r(), key.g(), key.b(), 255]);
    }

    /// Iterate colour keys in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = ColorKey> + '_ {
        self.data
            .chunks_exact(4)
            .map(|px| ColorKey::from_rgb(px[0], px[1], px[2]))
    }

    /// Copy an 8x8 tile from `src` at tile coordinates `(src_tx, src_ty)` into
    /// this image at tile coordinates `(dst_tx, dst_ty)`.
    ///
    /// Pixels falling outside either image are skipped.
    pub fn blit_tile(
        &mut self,
        src: &PixelImage,
        (src_tx, src_ty): (usize, usize),
        (dst_tx, dst_ty): (usize, usize),
    ) {
        for y in 0..TILE_SIZE {
            for x in 0..TILE_SIZE {
                let sx = src_tx * TILE_SIZE + x;
                let sy = src_ty * TILE_SIZE + y;
                let dx = dst_tx * TILE_SIZE + x;
                let dy = dst_ty * TILE_SIZE + y;
                if sx >= src.width || sy >= src.height || dx >= self.width || dy >= self.height {
                    continue;
                }
                let si = src.offset(sx, sy);
                let di = self.offset(dx, dy);
                self.data[di..di + 4].copy_from_slice(&src.data[si..si + 4]);
            }
        }
    }
}

impl From<RgbaImage> for PixelImage {
    fn from(img: RgbaImage) -> Self {
        Self {
            width: img.width() as usize,
            height: img.height() as usize,
            data: img.into_raw(),
        }
    }
}

impl From<&PixelImage> for RgbaImage {
    fn from(img: &PixelImage) -> Self {
        RgbaImage::from_fn(img.width as u32, img.height as u32, |x, y| {
            let i = img.offset(x as usize, y as usize);
            image::Rgba([img.data[i], img.data[i + 1], img.data[i + 2], img.data[i + 3]])
        })
    }
}
