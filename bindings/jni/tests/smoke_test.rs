use govphoto_jni::*;

fn make_test_png(width: u32, height: u32) -> Vec<u8> {
    use image::codecs::png::PngEncoder;
    use image::{ImageEncoder, RgbImage};

    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = image::Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ]);
    }
    let mut buffer = Vec::new();
    let encoder = PngEncoder::new(&mut buffer);
    encoder
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buffer
}

#[test]
fn list_presets_returns_the_catalog() {
    let presets = list_presets();
    assert!(!presets.is_empty());
    assert!(presets.iter().any(|p| p.id == "ssc_cgl"));
}

#[test]
fn fit_to_preset_works() {
    let png = make_test_png(1200, 1600);
    let result = fit_to_preset(png, "ssc_cgl".to_string(), 0.7, None).unwrap();
    assert!(result.met);
    assert_eq!(result.width, 350);
    assert_eq!(result.height, 450);
    assert!(result.data.len() <= 50 * 1024);
    // JPEG magic bytes
    assert_eq!(result.data[0], 0xFF);
    assert_eq!(result.data[1], 0xD8);
}

#[test]
fn fit_to_preset_with_background_override() {
    let png = make_test_png(600, 800);
    let result = fit_to_preset(
        png,
        "voter_id".to_string(),
        0.7,
        Some(BackgroundColor::LightBlue),
    )
    .unwrap();
    assert!(result.met);
}

#[test]
fn fit_custom_png() {
    let png = make_test_png(600, 800);
    let result = fit_custom(png, 200, 250, OutputFormat::Png, 400, 0.7).unwrap();
    assert!(result.met);
    assert!(result.quality.is_none());
    assert_eq!(&result.data[1..4], b"PNG");
}

#[test]
fn unknown_preset_is_an_error() {
    let png = make_test_png(100, 100);
    let err = fit_to_preset(png, "no_such_preset".to_string(), 0.7, None).unwrap_err();
    assert!(matches!(err, GovPhotoError::UnknownPreset { .. }));
}

#[test]
fn invalid_input_is_an_error() {
    let result = fit_to_preset(b"not an image".to_vec(), "ssc_cgl".to_string(), 0.7, None);
    assert!(matches!(result, Err(GovPhotoError::DecodeError { .. })));
}

#[test]
fn estimate_matches_core() {
    assert_eq!(estimate_size_kb(350, 450, 0.7), 23);
    assert_eq!(estimate_size_kb(10, 10, 0.5), 10);
}
