//! File round trips through the format-dispatching API.

use approx::assert_abs_diff_eq;
use despill_core::ImageBuf;
use despill_io::{read, write, write_with, Format, IoError, WriteOptions};

fn plate() -> ImageBuf {
    let mut img = ImageBuf::new(12, 6, 4);
    for y in 0..6 {
        for x in 0..12 {
            img.pixel_mut(x, y)
                .copy_from_slice(&[0.1, 0.5 + x as f32 / 24.0, 0.1 + y as f32 / 12.0, 1.0]);
        }
    }
    img
}

fn assert_close(a: &ImageBuf, b: &ImageBuf, eps: f32) {
    assert_eq!(a.size(), b.size());
    assert_eq!(a.channels(), b.channels());
    for (x, y) in a.data().iter().zip(b.data()) {
        assert_abs_diff_eq!(*x, *y, epsilon = eps);
    }
}

#[test]
fn test_png_and_tiff_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let img = plate();
    for name in ["plate.png", "plate.tif", "plate.TIFF"] {
        let path = dir.path().join(name);
        write(&path, &img).unwrap();
        assert_close(&read(&path).unwrap(), &img, 1.0 / 65535.0);
    }
}

#[test]
fn test_float_tiff_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plate_f32.tif");
    let img = plate();
    write_with(&path, &img, &WriteOptions { float: true }).unwrap();
    assert_eq!(read(&path).unwrap(), img);
}

#[test]
fn test_detect_prefers_magic_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let png_path = dir.path().join("plate.png");
    write(&png_path, &plate()).unwrap();

    let renamed = dir.path().join("plate.tif");
    std::fs::rename(&png_path, &renamed).unwrap();
    assert_eq!(Format::detect(&renamed).unwrap(), Format::Png);
    assert_eq!(read(&renamed).unwrap().channels(), 4);
}

#[test]
fn test_unsupported_and_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = write(dir.path().join("plate.exr"), &plate()).unwrap_err();
    assert!(matches!(err, IoError::UnsupportedFormat(_)));

    let err = read(dir.path().join("missing.png")).unwrap_err();
    assert!(matches!(err, IoError::Io(_)));

    let junk = dir.path().join("junk.bin");
    std::fs::write(&junk, b"not an image").unwrap();
    assert!(matches!(read(&junk), Err(IoError::UnsupportedFormat(_))));
}
