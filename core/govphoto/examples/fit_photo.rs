//! Fit a photo to a catalog preset and save the result.
//!
//! Usage:
//!   cargo run --example fit_photo -- <input> [preset-id]
//!
//! Output goes to `output/` in the working directory.

use govphoto::{
    default_filename, DirectorySink, PhotoSession, PhotoSink, PresetCatalog, SizeStatus,
};

fn main() {
    let mut args = std::env::args().skip(1);
    let input_path = args.next().expect("usage: fit_photo <input> [preset-id]");
    let preset_id = args.next().unwrap_or_else(|| "ssc_cgl".to_string());

    let preset = PresetCatalog::bundled()
        .get(&preset_id)
        .unwrap_or_else(|| panic!("unknown preset: {preset_id}"))
        .clone();
    println!(
        "{} — {} ({}), max {} KB",
        preset.exam_name,
        preset.formatted_dimensions(),
        preset.authority,
        preset.max_file_size_kb,
    );

    let raw = std::fs::read(&input_path).expect("failed to read input file");
    let session = PhotoSession::from_bytes(&raw)
        .expect("failed to decode input image")
        .preset(preset.clone());
    println!("estimated output: ~{} KB", session.estimated_size_kb());

    let result = session.fit().expect("fit failed");
    println!(
        "fitted: {width}x{height}, {size} bytes, quality {quality:?}, {attempts} attempt(s)",
        width = result.width,
        height = result.height,
        size = result.data.len(),
        quality = result.quality,
        attempts = result.attempts,
    );

    match preset.check_size(result.data.len()) {
        SizeStatus::WithinBounds => {}
        SizeStatus::ExceedsMaximum => println!("warning: file may exceed the size limit"),
        SizeStatus::BelowMinimum => println!("warning: file is below the minimum size"),
    }

    let saved = DirectorySink::new("output")
        .persist(&result, &default_filename(result.format))
        .expect("failed to save output");
    println!("saved to {}", saved.path.display());
}
