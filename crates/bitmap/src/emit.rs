use std::fmt::Write;

use crate::PackedRaster;

const RULE: &str =
    "////////////////////////////////////////////////////////////////////////////////";

/// The two supported source-declaration layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `width_N` / `height_N` / `size_N` constants plus a `bitmap_N` array,
    /// banner emitted with the first image of the batch.
    LegacyConstants,
    /// A named pixel array plus a `graphics::bitmap_t` struct literal.
    NamedStruct,
}

/// The batch-level banner comment that precedes the first emitted symbol.
pub fn banner() -> String {
    format!("{RULE}\n// Bitmap data\n// @generated\n// clang-format off\n{RULE}\n\n")
}

/// Renders packed rasters as C++ source declarations into a caller-owned
/// buffer.
pub struct SourceEmitter {
    schema: Schema,
}

impl SourceEmitter {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Append the declarations for one image. `index` is the zero-based
    /// position in the batch.
    pub fn emit(&self, name: &str, raster: &PackedRaster, index: usize, out: &mut String) {
        match self.schema {
            Schema::LegacyConstants => self.emit_constants(name, raster, index, out),
            Schema::NamedStruct => self.emit_struct(name, raster, index, out),
        }
    }

    fn emit_constants(&self, _name: &str, raster: &PackedRaster, index: usize, out: &mut String) {
        if index == 0 {
            out.push_str(&banner());
        }
        let _ = writeln!(out, "const int width_{index} = {};", raster.width);
        let _ = writeln!(out, "const int height_{index} = {};", raster.height);
        let _ = writeln!(out, "const int size_{index} = {};", raster.size());
        let _ = writeln!(out, "const unsigned char bitmap_{index}[] = {{");
        push_byte_rows(out, raster);
        out.push_str("};\n\n");
    }

    fn emit_struct(&self, name: &str, raster: &PackedRaster, index: usize, out: &mut String) {
        // Index zero keeps the bare name so single-image outputs stay tidy.
        let appendix = if index > 0 {
            format!("_{index}")
        } else {
            String::new()
        };
        let pixels_symbol = format!("{name}_bitmap_pixels{appendix}");

        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "// Bitmap '{name}'");
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "static const uint8_t {pixels_symbol}[] = {{");
        push_byte_rows(out, raster);
        out.push_str("};\n\n");

        let field_width = pixels_symbol.len() + 4;
        let field = |value: String, comment: &str| {
            format!("{:<field_width$}  // {}\n", value, comment)
        };

        let _ = writeln!(out, "const graphics::bitmap_t {name}_bitmap{appendix} = {{");
        out.push_str(&field(format!("    {},", raster.width), "width"));
        out.push_str(&field(format!("    {},", raster.height), "height"));
        out.push_str(&field(
            format!("    {},", raster.alpha),
            "true if alpha channel",
        ));
        out.push_str(&field(
            format!("    {},", raster.bytes_per_row),
            "bytes per line",
        ));
        out.push_str(&field(format!("    {},", raster.size()), "bitmap size"));
        out.push_str(&field(format!("    {pixels_symbol}"), "pixel data"));
        out.push_str("};\n\n");
    }
}

/// Byte rows as lowercase two-digit hex literals, one raster row per line,
/// with no trailing comma after the image's final byte.
fn push_byte_rows(out: &mut String, raster: &PackedRaster) {
    for (y, row) in raster.rows.iter().enumerate() {
        out.push_str("  ");
        for (i, byte) in row.iter().enumerate() {
            let _ = write!(out, "0x{byte:02x}");
            let last = y + 1 == raster.rows.len() && i + 1 == row.len();
            if !last {
                out.push(',');
                if i + 1 < row.len() {
                    out.push(' ');
                }
            }
        }
        out.push('\n');
    }
}
