//! Parameter types for codec operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the planner in [`operations`](super::operations)
//! (which decides widths and qualities) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping
//! codecs (e.g. for testing with a mock) without changing planning logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1-100). Clamped on construction.
//! - [`Sharpening`]: Unsharp-mask parameters (sigma + threshold) restoring
//!   crispness after a downscale.
//! - [`OutputFormat`]: The target encoding. WebP today.
//! - [`EncodeConfig`]: Full instruction set for one transcode.

use serde::{Deserialize, Serialize};

use super::calculations::BASE_QUALITY;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(BASE_QUALITY)
    }
}

/// Sharpening parameters for unsharp mask.
///
/// - `sigma`: Standard deviation of the Gaussian blur (higher = more sharpening)
/// - `threshold`: Minimum brightness difference to sharpen (0 = sharpen all pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sharpening {
    pub sigma: f32,
    pub threshold: i32,
}

impl Sharpening {
    /// Light sharpening applied after Lanczos3 downscales.
    pub fn light() -> Self {
        Self {
            sigma: 0.5,
            threshold: 0,
        }
    }
}

/// Output encoding for optimized images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy WebP.
    #[default]
    WebP,
}

impl OutputFormat {
    /// File extension for this format (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::WebP => "webp",
        }
    }

    /// MIME type for this format.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::WebP => "image/webp",
        }
    }
}

/// Full instruction set for one transcode operation.
///
/// Passed opaquely to the codec. `target_width` of `None` means "keep the
/// original width"; `sharpen` is attached only when a downscale occurs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeConfig {
    /// Resize to this width (aspect preserved). `None` = no resize.
    pub target_width: Option<u32>,
    /// Lossy encoding quality.
    pub quality: Quality,
    /// Target encoding.
    pub format: OutputFormat,
    /// Drop EXIF/XMP/ICC payloads from the output.
    pub strip_metadata: bool,
    /// Request progressive/interlaced encoding where the format supports it.
    pub interlace: bool,
    /// Unsharp mask applied after resizing.
    pub sharpen: Option<Sharpening>,
}
