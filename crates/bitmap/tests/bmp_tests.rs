use bitmap::BitmapFile;

fn u16_at(buf: &[u8], ofs: usize) -> u16 {
    u16::from_le_bytes([buf[ofs], buf[ofs + 1]])
}

fn u32_at(buf: &[u8], ofs: usize) -> u32 {
    u32::from_le_bytes([buf[ofs], buf[ofs + 1], buf[ofs + 2], buf[ofs + 3]])
}

// --- Header layout ---

#[test]
fn test_header_fields_24bpp() {
    let bmp = BitmapFile::new(2, 2, 24);
    assert_eq!(bmp.width(), 2);
    assert_eq!(bmp.height(), 2);
    assert_eq!(bmp.bits_per_pixel(), 24);
    assert_eq!(bmp.bytes_per_line(), 6);
    let bytes = bmp.to_bytes();

    // 54-byte header + 2 rows of 6 bytes, no palette
    assert_eq!(bytes.len(), 66);
    assert_eq!(&bytes[0..2], b"BM");
    assert_eq!(u32_at(&bytes, 2), 66); // file size
    assert_eq!(u32_at(&bytes, 10), 54); // pixel data offset
    assert_eq!(u32_at(&bytes, 14), 40); // info header size
    assert_eq!(u32_at(&bytes, 18), 2); // width
    assert_eq!(u32_at(&bytes, 22), 2); // height
    assert_eq!(u16_at(&bytes, 26), 1); // planes
    assert_eq!(u16_at(&bytes, 28), 24); // bits per pixel
    assert_eq!(u32_at(&bytes, 46), 0); // no palette colors
}

#[test]
fn test_header_palette_count_8bpp() {
    let bmp = BitmapFile::new(4, 4, 8);
    let bytes = bmp.to_bytes();

    assert_eq!(u32_at(&bytes, 46), 256);
    assert_eq!(bytes.len(), 54 + 256 * 4 + 16);
    assert_eq!(u32_at(&bytes, 2), bytes.len() as u32);
}

#[test]
fn test_palette_is_grayscale_ramp_bgra() {
    let bmp = BitmapFile::new(4, 4, 8);
    let bytes = bmp.to_bytes();

    // entry 0 is black, entry 255 is white, alpha always 255
    assert_eq!(&bytes[54..58], &[0, 0, 0, 255]);
    assert_eq!(&bytes[54 + 255 * 4..54 + 256 * 4], &[255, 255, 255, 255]);
    // entry 128 sits on the linear ramp
    let v = (128 * 255 / 255) as u8;
    assert_eq!(&bytes[54 + 128 * 4..54 + 129 * 4], &[v, v, v, 255]);
}

#[test]
fn test_4bpp_palette_ramp() {
    let bmp = BitmapFile::new(8, 1, 4);
    let bytes = bmp.to_bytes();

    assert_eq!(u32_at(&bytes, 46), 16);
    // 16 entries, step 17
    assert_eq!(&bytes[54..58], &[0, 0, 0, 255]);
    assert_eq!(&bytes[58..62], &[17, 17, 17, 255]);
    assert_eq!(&bytes[54 + 15 * 4..54 + 16 * 4], &[255, 255, 255, 255]);
}

#[test]
fn test_pixel_offset_field_skips_palette() {
    let mut bmp = BitmapFile::new(4, 4, 8);
    bmp.set_pixel(0, 3, 0x5a);
    let bytes = bmp.to_bytes();

    // a conforming reader finds the pixel data through the offset field
    let ofs = u32_at(&bytes, 10) as usize;
    assert_eq!(ofs, 54 + 256 * 4);
    // (0, 3) is the first byte of the first stored row
    assert_eq!(bytes[ofs], 0x5a);
    assert_eq!(bytes.len(), ofs + 16);
}

#[test]
fn test_1bpp_palette_emitted_but_count_field_untouched() {
    let bmp = BitmapFile::new(8, 1, 1);
    let bytes = bmp.to_bytes();

    // The color-count field is only written for 4 and 8 bpp.
    assert_eq!(u32_at(&bytes, 46), 0);
    assert_eq!(bytes.len(), 54 + 2 * 4 + 1);
}

// --- Pixel addressing ---

#[test]
fn test_rows_are_stored_bottom_up() {
    let mut bmp = BitmapFile::new(2, 2, 8);
    bmp.set_pixel(0, 0, 0xab);
    bmp.set_pixel(1, 1, 0xcd);

    let bytes = bmp.to_bytes();
    let pixels = &bytes[54 + 256 * 4..];
    // (0, 0) is the first byte of the last stored row
    assert_eq!(pixels, &[0, 0xcd, 0xab, 0]);
}

#[test]
fn test_offset_out_of_bounds_is_none() {
    let bmp = BitmapFile::new(2, 2, 8);
    assert!(bmp.offset(-1, 0).is_none());
    assert!(bmp.offset(0, -1).is_none());
    assert!(bmp.offset(2, 0).is_none());
    assert!(bmp.offset(0, 2).is_none());
    assert_eq!(bmp.offset(0, 1), Some(0));
}

#[test]
fn test_set_pixel_out_of_bounds_is_a_noop() {
    let mut bmp = BitmapFile::new(2, 2, 8);
    bmp.set_pixel(-1, 0, 0xff);
    bmp.set_pixel(5, 5, 0xff);

    let bytes = bmp.to_bytes();
    assert!(bytes[54 + 256 * 4..].iter().all(|&b| b == 0));
}

#[test]
fn test_zero_stride_rows_are_unaddressable() {
    // 4 px at 1 bpp: the integer-division stride rounds down to zero bytes
    let mut bmp = BitmapFile::new(4, 1, 1);
    assert_eq!(bmp.bytes_per_line(), 0);
    assert!(bmp.offset(0, 0).is_none());
    bmp.set_pixel(0, 0, 1);

    // header + 2-entry palette, no pixel data
    assert_eq!(bmp.to_bytes().len(), 54 + 2 * 4);
}

#[test]
fn test_set_pixel_widths_per_depth() {
    let mut bmp = BitmapFile::new(2, 1, 16);
    bmp.set_pixel(0, 0, 0x7f);
    assert_eq!(&bmp.to_bytes()[54..58], &[0x7f, 0x7f, 0, 0]);

    let mut bmp = BitmapFile::new(2, 1, 24);
    bmp.set_pixel(1, 0, 0x7f);
    assert_eq!(&bmp.to_bytes()[54..60], &[0, 0, 0, 0x7f, 0x7f, 0x7f]);
}

// --- File round trip ---

#[test]
fn test_write_and_re_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.bmp");

    let mut bmp = BitmapFile::new(3, 2, 24);
    bmp.set_pixel(0, 0, 0x11);
    bmp.set_pixel(2, 1, 0x22);
    bmp.write(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, bmp.to_bytes());
    assert_eq!(u32_at(&bytes, 18), 3);
    assert_eq!(u32_at(&bytes, 22), 2);
    assert_eq!(u16_at(&bytes, 28), 24);

    // bottom-up: (0,0) lives in the second stored row
    let bytes_per_line = 3 * 3;
    let pixels = &bytes[54..];
    assert_eq!(&pixels[bytes_per_line..bytes_per_line + 3], &[0x11, 0x11, 0x11]);
    assert_eq!(&pixels[2 * 3..2 * 3 + 3], &[0x22, 0x22, 0x22]);
}

#[test]
fn test_write_to_bad_path_reports_io_error() {
    let bmp = BitmapFile::new(1, 1, 24);
    let path = std::path::Path::new("/nonexistent-dir/out.bmp");
    match bmp.write(path) {
        Err(bitmap::ConvertError::Io { path: p, .. }) => {
            assert_eq!(p, path.to_path_buf());
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}
