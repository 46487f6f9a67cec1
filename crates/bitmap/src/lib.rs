//! Bitmap conversion for 1-bit displays.
//!
//! Converts decoded PNG images into bit-packed monochrome rasters (with an
//! optional interleaved opacity plane) and re-emits them either as C++
//! source declarations for embedding in firmware, or as standalone
//! uncompressed BMP files for previewing.

pub mod bmp;
pub mod classify;
pub mod convert;
pub mod decode;
pub mod emit;
pub mod error;
pub mod pack;

pub use bmp::BitmapFile;
pub use classify::{Classification, PixelFormat};
pub use convert::{ConvertOptions, convert_to_bmp, convert_to_source, write_source_file};
pub use decode::{DecodedImage, PaletteEntry, decode_png, decode_png_file};
pub use emit::{Schema, SourceEmitter, banner};
pub use error::ConvertError;
pub use pack::{PackedRaster, RowPacker, pack_image};
