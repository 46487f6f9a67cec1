use base::Rect;

use crate::{Classification, ConvertError, DecodedImage, PixelFormat};

/// Accumulates per-pixel classifications into packed bytes for one row.
///
/// Bits are filled MSB-first: the first pushed column of a group of 8 lands
/// in bit 7. With alpha enabled, an opacity byte with the same bit order
/// follows each color byte. State never carries across rows; a fresh packer
/// is used per row.
pub struct RowPacker {
    alpha: bool,
    bit: u32,
    acc: u8,
    alpha_acc: u8,
    bytes: Vec<u8>,
}

impl RowPacker {
    pub fn new(alpha: bool) -> Self {
        Self {
            alpha,
            bit: 0,
            acc: 0,
            alpha_acc: 0,
            bytes: Vec::new(),
        }
    }

    pub fn push(&mut self, c: Classification) {
        if c.visible {
            self.acc |= 1 << (7 - self.bit);
        }
        if self.alpha && c.opaque {
            self.alpha_acc |= 1 << (7 - self.bit);
        }
        self.bit += 1;
        if self.bit == 8 {
            self.flush();
        }
    }

    fn flush(&mut self) {
        self.bytes.push(self.acc);
        if self.alpha {
            self.bytes.push(self.alpha_acc);
        }
        self.acc = 0;
        self.alpha_acc = 0;
        self.bit = 0;
    }

    /// Flush the partial final byte, if any, and return the row bytes.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit != 0 {
            self.flush();
        }
        self.bytes
    }
}

/// A bit-packed raster: one visibility bit per pixel, eight pixels per byte,
/// optionally interleaved with an opacity plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedRaster {
    pub width: usize,
    pub height: usize,
    pub alpha: bool,
    /// ceil(width / 8), doubled when the opacity plane is interleaved.
    pub bytes_per_row: usize,
    pub rows: Vec<Vec<u8>>,
}

impl PackedRaster {
    pub fn size(&self) -> usize {
        self.height * self.bytes_per_row
    }

    /// Read back one visibility bit.
    pub fn bit(&self, x: usize, y: usize) -> bool {
        let stride = if self.alpha { 2 } else { 1 };
        let byte = self.rows[y][(x / 8) * stride];
        (byte >> (7 - x % 8)) & 1 != 0
    }

    /// Read back one opacity bit. Only meaningful when `alpha` is set.
    pub fn alpha_bit(&self, x: usize, y: usize) -> bool {
        debug_assert!(self.alpha);
        let byte = self.rows[y][(x / 8) * 2 + 1];
        (byte >> (7 - x % 8)) & 1 != 0
    }
}

/// Classify and pack `image` (or the part of it covered by `rect`).
///
/// The rect is clamped to the image bounds, so an overhanging crop packs the
/// intersection rather than failing.
pub fn pack_image(
    image: &DecodedImage,
    rect: Option<Rect>,
    alpha: bool,
    special_filter: bool,
) -> Result<PackedRaster, ConvertError> {
    let format = PixelFormat::from_bits_per_pixel(image.bits_per_pixel)?;
    let rect = rect
        .unwrap_or_else(|| Rect::of_image(image.width, image.height))
        .clamped(image.width, image.height);

    let width = rect.width() as usize;
    let height = rect.height() as usize;
    let palette = image.palette.as_deref();

    let mut rows = Vec::with_capacity(height);
    for y in rect.top..rect.bottom {
        let row = &image.rows[y as usize];
        let mut packer = RowPacker::new(alpha);
        for x in rect.left..rect.right {
            let ofs = x as usize * image.samples_per_pixel;
            let samples = &row[ofs..ofs + image.samples_per_pixel];
            packer.push(format.classify(samples, palette, image.has_alpha, special_filter));
        }
        rows.push(packer.finish());
    }

    let bytes_per_row = width.div_ceil(8) * if alpha { 2 } else { 1 };
    debug_assert!(rows.iter().all(|r| r.len() == bytes_per_row));

    Ok(PackedRaster {
        width,
        height,
        alpha,
        bytes_per_row,
        rows,
    })
}
