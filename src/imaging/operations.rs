//! Encode planning.
//!
//! [`plan_encode`] combines the width and quality calculations into a full
//! [`EncodeConfig`] for one source image. Planning is pure (the caller
//! owns probing and I/O), so parameter generation can be tested without a
//! codec.

use super::calculations::{calculate_quality, calculate_target_width};
use super::params::{EncodeConfig, OutputFormat, Quality, Sharpening};
use serde::{Deserialize, Serialize};

/// What the codec reported about a source image, plus its byte size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceImageInfo {
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
}

impl SourceImageInfo {
    /// Total pixel count, the quality heuristic's resolution input.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// A fully resolved encode decision for one source image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodePlan {
    /// Effective output width (equals the source width when not resizing).
    pub target_width: u32,
    /// Chosen lossy quality.
    pub quality: Quality,
    /// Whether a downscale will occur.
    pub resized: bool,
    /// The instruction set handed to the codec.
    pub config: EncodeConfig,
}

/// Plan the encode for a probed source image.
///
/// Width comes from the breakpoint table, quality from the density and
/// resolution penalties. Sharpening is attached exactly when a downscale
/// occurs; metadata stripping and interlacing are always requested.
pub fn plan_encode(info: &SourceImageInfo) -> EncodePlan {
    let target_width = calculate_target_width(info.width);
    let resized = target_width < info.width;
    let quality = Quality::new(calculate_quality(info.byte_size, info.pixel_count()));

    EncodePlan {
        target_width,
        quality,
        resized,
        config: EncodeConfig {
            target_width: resized.then_some(target_width),
            quality,
            format: OutputFormat::WebP,
            strip_metadata: true,
            interlace: true,
            sharpen: resized.then(Sharpening::light),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_small_image_passes_through() {
        // 800x600 under the no-resize guard and under one megapixel
        let plan = plan_encode(&SourceImageInfo {
            width: 800,
            height: 600,
            byte_size: 350_000,
        });

        assert_eq!(plan.target_width, 800);
        assert!(!plan.resized);
        assert_eq!(plan.quality.value(), 76);
        assert_eq!(plan.config.target_width, None);
        assert!(plan.config.sharpen.is_none());
    }

    #[test]
    fn plan_wide_photo_downscales_with_sharpening() {
        // 4000x3000 (12 MP) at 6 MB: 0.5 MB/MP, no penalties
        let plan = plan_encode(&SourceImageInfo {
            width: 4000,
            height: 3000,
            byte_size: 6_000_000,
        });

        assert_eq!(plan.target_width, 1600);
        assert!(plan.resized);
        assert_eq!(plan.quality.value(), 76);
        assert_eq!(plan.config.target_width, Some(1600));
        assert_eq!(plan.config.sharpen, Some(Sharpening::light()));
        assert_eq!(plan.config.format, OutputFormat::WebP);
        assert!(plan.config.strip_metadata);
        assert!(plan.config.interlace);
    }

    #[test]
    fn plan_sharpening_iff_resized() {
        let resized = plan_encode(&SourceImageInfo {
            width: 2200,
            height: 1400,
            byte_size: 1_000_000,
        });
        assert!(resized.resized);
        assert!(resized.config.sharpen.is_some());

        let untouched = plan_encode(&SourceImageInfo {
            width: 1200,
            height: 1800,
            byte_size: 1_000_000,
        });
        assert!(!untouched.resized);
        assert!(untouched.config.sharpen.is_none());
    }

    #[test]
    fn plan_dense_source_drops_quality() {
        // 2 MP at 8.5 MB/MP lands in the densest bracket
        let plan = plan_encode(&SourceImageInfo {
            width: 2000,
            height: 1000,
            byte_size: 17_000_000,
        });
        assert_eq!(plan.quality.value(), 48);
    }

    #[test]
    fn plan_serializes_for_json_output() {
        let plan = plan_encode(&SourceImageInfo {
            width: 4000,
            height: 3000,
            byte_size: 6_000_000,
        });

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["target_width"], 1600);
        assert_eq!(json["quality"], 76);
        assert_eq!(json["config"]["format"], "webp");
    }
}
