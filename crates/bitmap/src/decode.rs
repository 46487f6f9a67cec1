use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::ConvertError;

/// One palette entry of an indexed image. `a` is present only when the
/// PNG carries transparency data for the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

/// A fully materialized decoded image.
///
/// Rows hold one byte per channel sample: sub-byte depths (1/2/4 bits) are
/// expanded to one index byte per pixel, so a pixel's samples always start at
/// `x * samples_per_pixel`.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    /// Channel count times per-channel bit depth.
    pub bits_per_pixel: usize,
    pub samples_per_pixel: usize,
    pub has_alpha: bool,
    pub palette: Option<Vec<PaletteEntry>>,
    pub rows: Vec<Vec<u8>>,
}

/// Decode a PNG stream into a [`DecodedImage`].
///
/// Indexed images keep their palette indices and palette; nothing is expanded
/// to RGB. 16-bit channel depth is rejected with `UnsupportedFormat`.
pub fn decode_png(source: impl Read) -> Result<DecodedImage, ConvertError> {
    let mut decoder = png::Decoder::new(source);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;

    let width = frame.width as usize;
    let height = frame.height as usize;
    let samples_per_pixel = frame.color_type.samples();
    let bit_depth = frame.bit_depth as usize;

    if frame.bit_depth == png::BitDepth::Sixteen {
        return Err(ConvertError::UnsupportedFormat(samples_per_pixel * 16));
    }

    let has_alpha = matches!(
        frame.color_type,
        png::ColorType::Rgba | png::ColorType::GrayscaleAlpha
    );

    let info = reader.info();
    let palette = info.palette.as_ref().map(|rgb| {
        let trns = info.trns.as_deref().unwrap_or(&[]);
        rgb.chunks_exact(3)
            .enumerate()
            .map(|(i, c)| PaletteEntry {
                r: c[0],
                g: c[1],
                b: c[2],
                a: trns.get(i).copied(),
            })
            .collect()
    });

    let line_size = frame.line_size;
    let rows = buf[..height * line_size]
        .chunks_exact(line_size)
        .map(|raw| expand_row(raw, width, bit_depth))
        .collect();

    Ok(DecodedImage {
        width,
        height,
        bits_per_pixel: samples_per_pixel * bit_depth,
        samples_per_pixel,
        has_alpha,
        palette,
        rows,
    })
}

/// Decode a PNG file from disk.
pub fn decode_png_file(path: &Path) -> Result<DecodedImage, ConvertError> {
    let file = File::open(path)
        .map_err(|e| ConvertError::Decode(format!("{}: {}", path.display(), e)))?;
    decode_png(BufReader::new(file))
}

/// Expand a raw scanline to one byte per sample. Sub-byte samples are packed
/// MSB-first within each source byte.
fn expand_row(raw: &[u8], width: usize, bit_depth: usize) -> Vec<u8> {
    if bit_depth >= 8 {
        return raw.to_vec();
    }

    let per_byte = 8 / bit_depth;
    let mask = ((1u16 << bit_depth) - 1) as u8;
    let mut out = Vec::with_capacity(width);
    for x in 0..width {
        let byte = raw[x / per_byte];
        let shift = 8 - bit_depth * (x % per_byte + 1);
        out.push((byte >> shift) & mask);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::expand_row;

    #[test]
    fn test_expand_row_one_bit() {
        // 0b1010_1100, 0b1000_0000 packed MSB-first
        let expanded = expand_row(&[0xac, 0x80], 10, 1);
        assert_eq!(expanded, vec![1, 0, 1, 0, 1, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn test_expand_row_two_bit() {
        // 0b11_01_00_10
        let expanded = expand_row(&[0b1101_0010], 4, 2);
        assert_eq!(expanded, vec![3, 1, 0, 2]);
    }

    #[test]
    fn test_expand_row_four_bit() {
        let expanded = expand_row(&[0xaf, 0x30], 3, 4);
        assert_eq!(expanded, vec![0xa, 0xf, 0x3]);
    }

    #[test]
    fn test_expand_row_eight_bit_passthrough() {
        let expanded = expand_row(&[1, 2, 3], 3, 8);
        assert_eq!(expanded, vec![1, 2, 3]);
    }
}
