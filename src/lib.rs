//! # Webshrink
//!
//! A single-binary web image optimizer. Point it at a photo and it
//! produces a lossy WebP sized for web delivery, choosing the target
//! width and compression quality from the source's dimensions and file
//! size.
//!
//! # Architecture: Plan, Then Execute
//!
//! Every optimization runs through the same two phases:
//!
//! ```text
//! 1. Plan      probe dimensions + file size  →  EncodePlan (pure)
//! 2. Execute   EncodePlan + source bytes     →  WebP bytes on disk
//! ```
//!
//! The planning phase is pure (width and quality come from two small
//! threshold tables in [`imaging::calculate_target_width`] and
//! [`imaging::calculate_quality`]), so the policy is unit-testable
//! without decoding a single pixel. Execution goes through the
//! [`imaging::ImageCodec`] trait, so orchestration logic is tested
//! against a recording mock and only the codec tests touch real pixels.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Policy calculations, encode params, codec trait + pure-Rust codec |
//! | [`optimize`] | Single-file orchestration and parallel batch runs |
//! | [`config`] | Optional `webshrink.toml` loading and validation |
//! | [`output`] | CLI output formatting: report lines, plan display, batch summary |
//!
//! # Design Decisions
//!
//! ## WebP-Only Output
//!
//! All outputs are lossy WebP. The format has had universal browser
//! support for years and produces dramatically smaller files than JPEG at
//! equivalent quality. A single modern output format keeps the tool's
//! surface small; the policy core is format-agnostic and the codec seam
//! is where another target would slot in.
//!
//! ## Policy as Data
//!
//! The width breakpoints and both quality penalty tables are ordered
//! `(threshold, value)` slices evaluated top-down, first match wins. No
//! dynamic dispatch, no nested conditionals: the whole policy is readable
//! and auditable in one screenful, and every boundary has a test.
//!
//! ## Pure-Rust Imaging (No ImageMagick, No libvips)
//!
//! Decoding and resizing use the `image` crate (Lanczos3 resampling);
//! lossy WebP encoding uses libwebp via the `webp` crate, compiled in.
//! There are no system dependencies to install and no version conflicts:
//! download a single binary and it works.
//!
//! ## Single-Shot Operations
//!
//! One invocation, one result. A failure at any step (read, probe,
//! transcode, write) aborts the operation with a path-carrying error and
//! leaves no partial output. There is no retry logic and no fallback
//! width or quality; batch mode reports per-file failures and moves on.

pub mod config;
pub mod imaging;
pub mod optimize;
pub mod output;
