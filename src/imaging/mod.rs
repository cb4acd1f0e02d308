//! Image policy and codec seam: pure Rust, no system dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Probe** | `image::ImageReader::into_dimensions` |
//! | **Decode** | `image` crate (pure Rust decoders) |
//! | **Resize** | Lanczos3 via `image::imageops` |
//! | **Sharpen** | `image::imageops::unsharpen` |
//! | **Encode → WebP** | libwebp via the `webp` crate |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for width, quality, and dimension math
//! - **Parameters**: Data structures describing one transcode
//! - **Backend**: [`ImageCodec`] trait + [`RustCodec`]
//! - **Operations**: The planner turning a probed source into an [`EncodeConfig`]

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{CodecError, Dimensions, ImageCodec};
pub use calculations::{
    BASE_QUALITY, MIN_QUALITY, calculate_dimensions, calculate_quality, calculate_target_width,
};
pub use operations::{EncodePlan, SourceImageInfo, plan_encode};
pub use params::{EncodeConfig, OutputFormat, Quality, Sharpening};
pub use rust_backend::{RustCodec, supported_input_extensions};
