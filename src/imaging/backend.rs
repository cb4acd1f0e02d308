//! Image codec trait and shared types.
//!
//! The [`ImageCodec`] trait defines the two operations every codec must
//! support: probe and transcode. Both work on byte slices; the caller owns
//! all file I/O.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_backend::RustCodec): pure Rust plus libwebp,
//! statically linked into the binary.

use super::params::EncodeConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Result of a probe operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image codecs.
///
/// Every codec must implement both operations, probe and transcode, so
/// the rest of the codebase is codec-agnostic.
pub trait ImageCodec: Sync {
    /// Read image dimensions from raw bytes.
    ///
    /// Fails with a decode error on malformed or unsupported input. Must
    /// not require a full pixel decode where the container makes the
    /// dimensions cheaply available.
    fn probe(&self, bytes: &[u8]) -> Result<Dimensions, CodecError>;

    /// Re-encode raw bytes according to `config`, returning the output
    /// bytes.
    fn transcode(&self, bytes: &[u8], config: &EncodeConfig) -> Result<Vec<u8>, CodecError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{OutputFormat, Quality, Sharpening};
    use std::sync::Mutex;

    /// Mock codec that records operations without touching pixels.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockCodec {
        pub probe_results: Mutex<Vec<Dimensions>>,
        pub transcode_results: Mutex<Vec<Vec<u8>>>,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Probe {
            byte_size: u64,
        },
        Transcode {
            byte_size: u64,
            config: EncodeConfig,
        },
    }

    impl MockCodec {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                probe_results: Mutex::new(dims),
                transcode_results: Mutex::new(Vec::new()),
                operations: Mutex::new(Vec::new()),
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageCodec for MockCodec {
        fn probe(&self, bytes: &[u8]) -> Result<Dimensions, CodecError> {
            self.operations.lock().unwrap().push(RecordedOp::Probe {
                byte_size: bytes.len() as u64,
            });

            self.probe_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| CodecError::Decode("no mock dimensions".to_string()))
        }

        fn transcode(&self, bytes: &[u8], config: &EncodeConfig) -> Result<Vec<u8>, CodecError> {
            self.operations.lock().unwrap().push(RecordedOp::Transcode {
                byte_size: bytes.len() as u64,
                config: config.clone(),
            });

            Ok(self
                .transcode_results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| b"RIFF\0\0\0\0WEBP".to_vec()))
        }
    }

    #[test]
    fn mock_records_probe() {
        let codec = MockCodec::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let dims = codec.probe(&[0u8; 16]).unwrap();
        assert_eq!(dims.width, 800);
        assert_eq!(dims.height, 600);

        let ops = codec.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Probe { byte_size: 16 }));
    }

    #[test]
    fn mock_probe_fails_when_exhausted() {
        let codec = MockCodec::new();
        assert!(codec.probe(&[0u8; 4]).is_err());
    }

    #[test]
    fn mock_records_transcode_config() {
        let codec = MockCodec::new();
        let config = EncodeConfig {
            target_width: Some(1600),
            quality: Quality::new(76),
            format: OutputFormat::WebP,
            strip_metadata: true,
            interlace: true,
            sharpen: Some(Sharpening::light()),
        };

        let out = codec.transcode(&[0u8; 32], &config).unwrap();
        assert!(!out.is_empty());

        let ops = codec.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Transcode { byte_size: 32, config: c } if *c == config
        ));
    }

    #[test]
    fn mock_returns_queued_transcode_output() {
        let codec = MockCodec::new();
        codec
            .transcode_results
            .lock()
            .unwrap()
            .push(vec![1, 2, 3]);

        let config = EncodeConfig {
            target_width: None,
            quality: Quality::default(),
            format: OutputFormat::WebP,
            strip_metadata: true,
            interlace: true,
            sharpen: None,
        };
        assert_eq!(codec.transcode(&[], &config).unwrap(), vec![1, 2, 3]);
    }
}
