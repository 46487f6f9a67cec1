use crate::{ConvertError, PaletteEntry};

/// The closed set of pixel formats the classifier understands, keyed by the
/// image's total bits per pixel. Anything else fails loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Mono1,
    Indexed2,
    Indexed4,
    Indexed8,
    Rgb24,
    Rgba32,
}

/// The per-pixel classifier verdict: does the pixel contribute a set bit to
/// the color plane, and is it opaque for the opacity plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub visible: bool,
    pub opaque: bool,
}

fn color_to_float(c: u8) -> f32 {
    ((c as f32 + 0.5) / 255.0).min(1.0)
}

fn brightness(r: f32, g: f32, b: f32) -> f32 {
    (r + g + b) / 3.0
}

impl PixelFormat {
    pub fn from_bits_per_pixel(bits: usize) -> Result<Self, ConvertError> {
        match bits {
            1 => Ok(PixelFormat::Mono1),
            2 => Ok(PixelFormat::Indexed2),
            4 => Ok(PixelFormat::Indexed4),
            8 => Ok(PixelFormat::Indexed8),
            24 => Ok(PixelFormat::Rgb24),
            32 => Ok(PixelFormat::Rgba32),
            _ => Err(ConvertError::UnsupportedFormat(bits)),
        }
    }

    pub fn bits_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Mono1 => 1,
            PixelFormat::Indexed2 => 2,
            PixelFormat::Indexed4 => 4,
            PixelFormat::Indexed8 => 8,
            PixelFormat::Rgb24 => 24,
            PixelFormat::Rgba32 => 32,
        }
    }

    /// Classify one pixel from its raw channel samples.
    ///
    /// `special_filter` switches the 24-bit rule from pure-white detection to
    /// pure-red isolation. Indexed formats ignore the filter; it only applies
    /// to true-color input.
    pub fn classify(
        &self,
        samples: &[u8],
        palette: Option<&[PaletteEntry]>,
        has_alpha: bool,
        special_filter: bool,
    ) -> Classification {
        match self {
            PixelFormat::Rgb24 => {
                let r = color_to_float(samples[0]);
                let g = color_to_float(samples[1]);
                let b = color_to_float(samples[2]);
                let visible = if special_filter {
                    g < 1.0 && b < 1.0 && r == 1.0
                } else {
                    brightness(r, g, b) >= 1.0
                };
                Classification {
                    visible,
                    opaque: true,
                }
            }
            PixelFormat::Rgba32 => {
                let r = color_to_float(samples[0]);
                let g = color_to_float(samples[1]);
                let b = color_to_float(samples[2]);
                Classification {
                    visible: brightness(r, g, b) >= 0.5,
                    opaque: !has_alpha || samples[3] >= 128,
                }
            }
            PixelFormat::Indexed2 | PixelFormat::Indexed4 | PixelFormat::Indexed8 => {
                match palette.and_then(|p| p.get(samples[0] as usize)) {
                    Some(entry) => Classification {
                        // Raw 0-255 values against the same 0.5 threshold,
                        // so any non-black entry reads as visible.
                        visible: brightness(entry.r as f32, entry.g as f32, entry.b as f32) >= 0.5,
                        opaque: entry.a.is_none_or(|a| a >= 128),
                    },
                    None => Classification {
                        visible: samples[0] != 0,
                        opaque: true,
                    },
                }
            }
            PixelFormat::Mono1 => Classification {
                visible: samples[0] != 0,
                opaque: true,
            },
        }
    }
}
