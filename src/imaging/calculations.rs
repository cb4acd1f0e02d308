//! Pure calculation functions for the sizing and quality policy.
//!
//! All functions here are pure and testable without any I/O or images.
//! Both heuristics are expressed as ordered threshold tables evaluated
//! top-down, so the policy can be audited in one screenful.

/// Widths at or below this are never downscaled.
const NO_RESIZE_WIDTH: u32 = 1200;

/// Downscale breakpoints as `(minimum original width, target width)`,
/// widest first. The first row whose minimum is met wins.
const BREAKPOINTS: &[(u32, u32)] = &[
    (3600, 2000), // 6K-8K
    (2800, 2000), // 5K
    (2200, 1600), // 4K
    (1600, 1200), // large web
];

/// Base quality for lossy re-encoding; also the upper clamp bound.
pub const BASE_QUALITY: u8 = 76;

/// Quality floor. Penalties never push the result below this.
pub const MIN_QUALITY: u8 = 45;

/// Density penalties as `(bytes-per-megapixel threshold, penalty)`,
/// densest first. Only the first matching bracket applies.
const DENSITY_PENALTIES: &[(f64, i32)] = &[
    (8_000_000.0, 28), // very dense / noisy
    (5_000_000.0, 22),
    (3_500_000.0, 15),
    (2_500_000.0, 8),
];

/// Resolution penalties as `(megapixel threshold, penalty)`, largest
/// first. Only the first matching bracket applies.
const RESOLUTION_PENALTIES: &[(f64, i32)] = &[
    (24.0, 10), // ~8K
    (16.0, 6),  // ~6K
    (12.0, 4),  // ~5K
];

/// Calculate the target output width for an image.
///
/// Images at or below 1200px pass through unchanged. Wider images are
/// mapped to a breakpoint target; the result never exceeds the original
/// width, so no image is ever upscaled.
///
/// # Examples
/// ```
/// # use webshrink::imaging::calculate_target_width;
/// assert_eq!(calculate_target_width(800), 800);
/// assert_eq!(calculate_target_width(4000), 2000);
/// ```
pub fn calculate_target_width(original_width: u32) -> u32 {
    if original_width <= NO_RESIZE_WIDTH {
        return original_width;
    }

    BREAKPOINTS
        .iter()
        .find(|&&(min_width, _)| original_width >= min_width)
        .map(|&(_, target)| target)
        // Between 1200 and 1600 no breakpoint matches; keep the original.
        .unwrap_or(original_width)
}

/// Calculate the WebP quality for an image from its file size and pixel
/// count.
///
/// Sources under one megapixel get [`BASE_QUALITY`] outright. Larger
/// sources lose quality on two independent axes: bytes per megapixel (a
/// proxy for detail/noise density) and absolute resolution. One bracket
/// per axis, then the result is clamped to `[MIN_QUALITY, BASE_QUALITY]`.
///
/// # Examples
/// ```
/// # use webshrink::imaging::calculate_quality;
/// // 0.5 MP thumbnail: base quality regardless of size
/// assert_eq!(calculate_quality(400_000, 500_000), 76);
/// // 2 MP at 8.5 MB/MP: densest bracket
/// assert_eq!(calculate_quality(17_000_000, 2_000_000), 48);
/// ```
pub fn calculate_quality(file_size: u64, pixel_count: u64) -> u8 {
    let megapixels = pixel_count as f64 / 1_000_000.0;
    if megapixels < 1.0 {
        return BASE_QUALITY;
    }

    let bytes_per_megapixel = file_size as f64 / megapixels;

    let mut q = i32::from(BASE_QUALITY);
    q -= first_matching_penalty(bytes_per_megapixel, DENSITY_PENALTIES);
    q -= first_matching_penalty(megapixels, RESOLUTION_PENALTIES);

    q.clamp(i32::from(MIN_QUALITY), i32::from(BASE_QUALITY)) as u8
}

/// Return the penalty of the first bracket whose threshold is exceeded,
/// or 0 when none is.
fn first_matching_penalty(value: f64, brackets: &[(f64, i32)]) -> i32 {
    brackets
        .iter()
        .find(|&&(threshold, _)| value > threshold)
        .map(|&(_, penalty)| penalty)
        .unwrap_or(0)
}

/// Calculate output dimensions for a width-constrained downscale,
/// preserving aspect ratio.
///
/// Returns the original dimensions when `target_width` is not an actual
/// downscale. Height is rounded to nearest and never drops below 1.
pub fn calculate_dimensions(
    current_width: u32,
    current_height: u32,
    target_width: u32,
) -> (u32, u32) {
    if current_width <= target_width {
        return (current_width, current_height);
    }

    let ratio = target_width as f64 / current_width as f64;
    let new_height = (current_height as f64 * ratio).round() as u32;

    (target_width, new_height.max(1))
}
