use approx::assert_relative_eq;
use pfm_core::prelude::*;
use pfm_io::{Endian, ImageReader, ImageWriter, IoError, PfmReader, PfmWriter};
use tempfile::tempdir;

#[test]
fn write_and_read_rgb_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("beauty.pfm");

    let mut img = PfmImage::rgb(4, 3).unwrap();
    img.set(0, 0, Box::new(RgbSample::new(10.0, 0.5, -2.0))).unwrap();
    img.set(3, 2, Box::new(RgbSample::splat(f32::MIN_POSITIVE))).unwrap();

    pfm_io::write(&path, &img).expect("write pfm");
    let back = pfm_io::read(&path).expect("read pfm");

    assert_eq!(back.dimensions(), (4, 3));
    assert_eq!(back.channels(), 3);
    assert_eq!(back.get(0, 0).unwrap().triple_component(), [10.0, 0.5, -2.0]);
    assert_eq!(
        back.get(3, 2).unwrap().triple_component(),
        [f32::MIN_POSITIVE; 3]
    );
    assert_eq!(back.get(1, 1).unwrap().triple_component(), [0.0; 3]);
}

#[test]
fn write_and_read_grayscale_big_endian() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("depth.pfm");

    let data: Vec<f32> = (0..12).map(|i| (i as f32).sqrt()).collect();
    let img = PfmImage::from_f32(6, 2, 1, data.clone()).unwrap();

    PfmWriter::new()
        .with_endian(Endian::Big)
        .write(&path, &img)
        .expect("write pfm");

    let file = PfmReader::new().read_file(&path).expect("read pfm");
    assert_eq!(file.header.endian(), Endian::Big);
    assert_eq!(file.scale(), 1.0);
    for (a, b) in file.image.to_f32().iter().zip(&data) {
        assert_relative_eq!(*a, *b);
    }

    let raw = std::fs::read(&path).unwrap();
    assert!(raw.starts_with(b"Pf\n6 2\n1\n"));
    assert_eq!(raw.len(), b"Pf\n6 2\n1\n".len() + 12 * 4);
}

#[test]
fn converted_images_roundtrip() {
    let img = PfmImage::new(2, 2, &RgbSample::new(0.2, 0.4, 0.6)).unwrap();
    let gray = img.to_grayscale();

    let writer = PfmWriter::new();
    let bytes = writer.write_to_memory(&gray).unwrap();
    assert!(bytes.starts_with(b"Pf\n"));

    let back = PfmReader::new().read_from_memory(&bytes).unwrap();
    assert_eq!(back.channels(), 1);
    assert_relative_eq!(
        back.get(1, 1).unwrap().single_component(),
        RgbSample::new(0.2, 0.4, 0.6).luminance(),
        epsilon = 1e-6
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = pfm_io::read(dir.path().join("nope.pfm")).unwrap_err();
    assert!(matches!(err, IoError::Io(_)));
}

#[test]
fn non_pfm_file_is_rejected() {
    let err = PfmReader::new()
        .read_from_memory(b"P6\n1 1\n255\n\x00\x00\x00")
        .unwrap_err();
    assert!(matches!(err, IoError::InvalidFile(_)));
    assert!(err.to_string().contains("magic"));
}
