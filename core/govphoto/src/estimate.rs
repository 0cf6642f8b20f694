//! Pre-encode file-size estimation for live UI feedback.
//!
//! JPEG output size tracks pixel count with a bytes-per-pixel factor that
//! falls off steeply as quality drops; the buckets below are a coarse,
//! monotonic fit of that curve. Cheap enough to recompute on every slider
//! move. The measurement from the real encode pass is always authoritative.

/// Smallest estimate ever reported, in kilobytes.
const MIN_ESTIMATE_KB: u32 = 10;

/// Estimate the encoded size in kilobytes for a photo of the given target
/// dimensions at a quality fraction in `[0, 1]`.
pub fn estimate_encoded_kb(width: u32, height: u32, quality: f32) -> u32 {
    let pixels = width as u64 * height as u64;
    let bytes_per_pixel = if quality > 0.9 {
        0.40
    } else if quality > 0.8 {
        0.25
    } else if quality > 0.6 {
        0.15
    } else if quality > 0.4 {
        0.10
    } else {
        0.05
    };

    let estimated_bytes = (pixels as f64 * bytes_per_pixel) as u64;
    ((estimated_bytes / 1024) as u32).max(MIN_ESTIMATE_KB)
}
