//! Pure Rust image codec with no system dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Probe (JPEG, PNG, TIFF, WebP) | `image::ImageReader::into_dimensions` |
//! | Decode | `image` crate (pure Rust decoders) |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Sharpening | `image::imageops::unsharpen` |
//! | Encode → lossy WebP | `webp::Encoder` (libwebp) |

use super::backend::{CodecError, Dimensions, ImageCodec};
use super::calculations::calculate_dimensions;
use super::params::{EncodeConfig, OutputFormat, Sharpening};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::sync::LazyLock;

/// Extensions whose decoders are compiled in and known to work.
const PHOTO_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    PHOTO_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders
/// compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust codec using the `image` crate for decoding and resizing and
/// libwebp (via the `webp` crate) for lossy encoding.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode raw bytes into pixels, guessing the format from magic bytes.
fn decode(bytes: &[u8]) -> Result<DynamicImage, CodecError> {
    image::load_from_memory(bytes).map_err(|e| CodecError::Decode(e.to_string()))
}

/// Encode pixels as lossy WebP at the given quality.
fn encode_webp(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, CodecError> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let encoder = webp::Encoder::from_rgba(&rgba, width, height);
    Ok(encoder.encode(f32::from(quality)).to_vec())
}

impl ImageCodec for RustCodec {
    fn probe(&self, bytes: &[u8]) -> Result<Dimensions, CodecError> {
        // into_dimensions reads container headers only, no pixel decode.
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        Ok(Dimensions { width, height })
    }

    fn transcode(&self, bytes: &[u8], config: &EncodeConfig) -> Result<Vec<u8>, CodecError> {
        let img = decode(bytes)?;

        let resized = match config.target_width {
            Some(target) if target < img.width() => {
                let (w, h) = calculate_dimensions(img.width(), img.height(), target);
                img.resize(w, h, FilterType::Lanczos3)
            }
            _ => img,
        };

        let final_img = match config.sharpen {
            Some(Sharpening { sigma, threshold }) => {
                DynamicImage::from(image::imageops::unsharpen(&resized, sigma, threshold))
            }
            None => resized,
        };

        // Decode-and-re-encode drops EXIF/XMP/ICC payloads, which is all
        // strip_metadata asks for. WebP has no progressive mode, so the
        // interlace flag has no effect on this codec.
        match config.format {
            OutputFormat::WebP => encode_webp(&final_img, config.quality.value()),
        }
    }
}
