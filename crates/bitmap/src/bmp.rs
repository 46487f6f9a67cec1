use std::path::Path;

use crate::ConvertError;

const HEADER_SIZE: usize = 54;

/// An uncompressed device-independent bitmap held in memory.
///
/// Rows are stored bottom-up, matching the on-disk convention, and the header
/// layout is byte-exact against the classic 54-byte BITMAPINFOHEADER file.
/// For bit depths of 8 and below a linear grayscale palette is generated on
/// serialization.
pub struct BitmapFile {
    width: usize,
    height: usize,
    bits_per_pixel: usize,
    bytes_per_line: usize,
    palette_size: usize,
    data: Vec<u8>,
}

fn put_u16(buf: &mut [u8], ofs: usize, value: u16) {
    buf[ofs..ofs + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut [u8], ofs: usize, value: u32) {
    buf[ofs..ofs + 4].copy_from_slice(&value.to_le_bytes());
}

impl BitmapFile {
    /// Panics if `bits_per_pixel` is not one of 1/2/4/8/16/24/32.
    pub fn new(width: usize, height: usize, bits_per_pixel: usize) -> Self {
        assert!(
            matches!(bits_per_pixel, 1 | 2 | 4 | 8 | 16 | 24 | 32),
            "invalid bits per pixel: {bits_per_pixel}"
        );
        let bytes_per_line = width * bits_per_pixel / 8;
        let palette_size = if bits_per_pixel <= 8 {
            1 << bits_per_pixel
        } else {
            0
        };
        Self {
            width,
            height,
            bits_per_pixel,
            bytes_per_line,
            palette_size,
            data: vec![0; height * bytes_per_line],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bits_per_pixel(&self) -> usize {
        self.bits_per_pixel
    }

    pub fn bytes_per_line(&self) -> usize {
        self.bytes_per_line
    }

    /// Byte offset of pixel (x, y) in the bottom-up buffer. `None` when out
    /// of bounds, or when the integer-division line stride rounds down to
    /// zero (sub-byte depth narrower than one byte).
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if self.bytes_per_line == 0 {
            return None;
        }
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        let x = x as usize;
        let y = y as usize;
        Some((self.height - y - 1) * self.bytes_per_line + x * self.bits_per_pixel / 8)
    }

    /// Write a raw byte value at the pixel's offset. Out-of-bounds writes are
    /// silently ignored to tolerate rectangle-cropping edge cases.
    pub fn set_pixel(&mut self, x: i32, y: i32, value: u8) {
        let Some(ofs) = self.offset(x, y) else {
            return;
        };
        match self.bits_per_pixel {
            16 => {
                self.data[ofs] = value;
                self.data[ofs + 1] = value;
            }
            24 | 32 => {
                self.data[ofs] = value;
                self.data[ofs + 1] = value;
                self.data[ofs + 2] = value;
            }
            _ => self.data[ofs] = value,
        }
    }

    /// Serialize the 54-byte header, the optional palette block, and the
    /// pixel buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let palette = self.palette_bytes();

        let mut out = vec![0u8; HEADER_SIZE];
        out[0] = b'B';
        out[1] = b'M';
        put_u32(&mut out, 2, (HEADER_SIZE + palette.len() + self.data.len()) as u32);
        put_u32(&mut out, 10, (HEADER_SIZE + palette.len()) as u32); // pixel data offset
        put_u32(&mut out, 14, 40); // info header size
        put_u32(&mut out, 18, self.width as u32);
        put_u32(&mut out, 22, self.height as u32);
        put_u16(&mut out, 26, 1); // planes
        put_u16(&mut out, 28, self.bits_per_pixel as u16);
        if self.bits_per_pixel == 4 || self.bits_per_pixel == 8 {
            put_u32(&mut out, 46, self.palette_size as u32);
        }

        out.extend_from_slice(&palette);
        out.extend_from_slice(&self.data);
        out
    }

    /// A linear grayscale ramp, 4 bytes per entry in B-G-R-A order.
    fn palette_bytes(&self) -> Vec<u8> {
        if self.palette_size <= 1 {
            return Vec::new();
        }
        let mut palette = Vec::with_capacity(self.palette_size * 4);
        for i in 0..self.palette_size {
            let v = (i * 255 / (self.palette_size - 1)) as u8;
            palette.extend_from_slice(&[v, v, v, 255]);
        }
        palette
    }

    pub fn write(&self, path: &Path) -> Result<(), ConvertError> {
        std::fs::write(path, self.to_bytes()).map_err(|source| ConvertError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
