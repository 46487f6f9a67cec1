use std::path::{Path, PathBuf};

use base::Rect;

use crate::{
    BitmapFile, ConvertError, Schema, SourceEmitter, banner, decode_png_file, pack_image,
};

/// Settings for one conversion batch.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Interleave an opacity plane after each color byte.
    pub alpha: bool,
    /// Classify only pure red as visible on 24-bit input.
    pub special_filter: bool,
    pub schema: Schema,
    /// Restrict processing to a sub-rectangle of each source image.
    pub rect: Option<Rect>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            alpha: false,
            special_filter: false,
            schema: Schema::NamedStruct,
            rect: None,
        }
    }
}

/// Convert a batch of input images into one source-text payload.
///
/// Images are processed in order with zero-based batch indices. Exactly one
/// banner block ends up in the payload: the batch banner for the named-struct
/// schema, or the legacy schema's own first-image banner. Any error aborts
/// the batch with nothing emitted.
pub fn convert_to_source(
    inputs: &[PathBuf],
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    let mut out = String::new();
    if options.schema == Schema::NamedStruct {
        out.push_str(&banner());
    }

    let emitter = SourceEmitter::new(options.schema);
    for (index, input) in inputs.iter().enumerate() {
        let image = decode_png_file(input)?;
        let raster = pack_image(&image, options.rect, options.alpha, options.special_filter)?;
        log::info!(
            "packed {} ({}x{}, {} bytes)",
            input.display(),
            raster.width,
            raster.height,
            raster.size()
        );
        emitter.emit(&symbol_name(input), &raster, index, &mut out);
    }

    Ok(out)
}

/// Write a source payload to its destination in one scoped pass.
pub fn write_source_file(path: &Path, payload: &str) -> Result<(), ConvertError> {
    std::fs::write(path, payload).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Render one input's packed visibility mask as a standalone 8-bit grayscale
/// BMP file (255 for visible pixels, 0 otherwise).
pub fn convert_to_bmp(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<(), ConvertError> {
    let image = decode_png_file(input)?;
    let raster = pack_image(&image, options.rect, options.alpha, options.special_filter)?;

    let mut bmp = BitmapFile::new(raster.width, raster.height, 8);
    for y in 0..raster.height {
        for x in 0..raster.width {
            let value = if raster.bit(x, y) { 0xff } else { 0x00 };
            bmp.set_pixel(x as i32, y as i32, value);
        }
    }

    log::info!(
        "writing {} ({}x{} mask preview)",
        output.display(),
        raster.width,
        raster.height
    );
    bmp.write(output)
}

/// Derive a C identifier from the input's file stem.
fn symbol_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bitmap".to_string());

    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if name.chars().next().is_none_or(|c| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
