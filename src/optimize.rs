//! Single-shot optimization and batch orchestration.
//!
//! [`optimize_file`] is the core operation: read the source, probe its
//! dimensions, plan the encode, transcode, write the output. Each step
//! either completes or aborts the whole call: there is no retry, no
//! fallback width or quality, and no partial output on disk.
//!
//! [`optimize_tree`] fans [`optimize_file`] out over a directory with
//! [rayon](https://docs.rs/rayon), mirroring the source structure under
//! the output root. Per-file failures are reported as events and counted;
//! they do not stop the run.

use crate::imaging::{CodecError, ImageCodec, SourceImageInfo, plan_encode};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum OptimizeError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to probe {path}: {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error("failed to transcode {path}: {source}")]
    Transcode {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one successful optimization.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizeReport {
    pub source: PathBuf,
    pub output: PathBuf,
    pub original_width: u32,
    pub original_height: u32,
    pub target_width: u32,
    pub original_bytes: u64,
    pub output_bytes: u64,
    pub quality: u8,
    pub resized: bool,
}

/// Default output path for a source image: same location, `.webp`
/// extension.
pub fn default_output_path(source: &Path) -> PathBuf {
    source.with_extension("webp")
}

/// Optimize a single image file.
///
/// Reads `source` fully into memory, probes it through `codec`, plans the
/// encode, transcodes, and writes the result to `output`. The first
/// failing step aborts the call; nothing is written unless the transcode
/// succeeded.
pub fn optimize_file(
    codec: &impl ImageCodec,
    source: &Path,
    output: &Path,
) -> Result<OptimizeReport, OptimizeError> {
    let bytes = fs::read(source).map_err(|e| OptimizeError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    let dims = codec.probe(&bytes).map_err(|e| OptimizeError::Probe {
        path: source.to_path_buf(),
        source: e,
    })?;

    let info = SourceImageInfo {
        width: dims.width,
        height: dims.height,
        byte_size: bytes.len() as u64,
    };
    let plan = plan_encode(&info);

    let encoded = codec
        .transcode(&bytes, &plan.config)
        .map_err(|e| OptimizeError::Transcode {
            path: source.to_path_buf(),
            source: e,
        })?;

    fs::write(output, &encoded).map_err(|e| OptimizeError::Write {
        path: output.to_path_buf(),
        source: e,
    })?;

    Ok(OptimizeReport {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        original_width: info.width,
        original_height: info.height,
        target_width: plan.target_width,
        original_bytes: info.byte_size,
        output_bytes: encoded.len() as u64,
        quality: plan.quality.value(),
        resized: plan.resized,
    })
}

/// Per-file progress event emitted during a batch run.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Done(OptimizeReport),
    Failed { source: PathBuf, message: String },
}

/// Totals for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub optimized: usize,
    pub failed: usize,
    pub original_bytes: u64,
    pub output_bytes: u64,
}

/// Find all optimizable images under `root`, matching on extension
/// (case-insensitive). Results are sorted for deterministic runs.
pub fn discover_images(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        })
        .collect()
}

/// Optimize every supported image under `source_root`, mirroring the
/// directory structure under `output_root` with `.webp` outputs.
///
/// Files are processed in parallel on the global rayon pool. `on_event`
/// fires once per file, from worker threads. A failed file is counted in
/// the summary and the run continues.
pub fn optimize_tree(
    codec: &impl ImageCodec,
    source_root: &Path,
    output_root: &Path,
    extensions: &[String],
    on_event: impl Fn(BatchEvent) + Sync,
) -> Result<BatchSummary, OptimizeError> {
    fs::create_dir_all(output_root).map_err(|e| OptimizeError::Write {
        path: output_root.to_path_buf(),
        source: e,
    })?;

    let files = discover_images(source_root, extensions);

    let results: Vec<Result<OptimizeReport, OptimizeError>> = files
        .par_iter()
        .map(|source| {
            let relative = source.strip_prefix(source_root).unwrap_or(source);
            let output = output_root.join(relative).with_extension("webp");

            let result = ensure_parent_dir(&output)
                .and_then(|()| optimize_file(codec, source, &output));

            match &result {
                Ok(report) => on_event(BatchEvent::Done(report.clone())),
                Err(e) => on_event(BatchEvent::Failed {
                    source: source.clone(),
                    message: e.to_string(),
                }),
            }
            result
        })
        .collect();

    let mut summary = BatchSummary::default();
    for result in results {
        match result {
            Ok(report) => {
                summary.optimized += 1;
                summary.original_bytes += report.original_bytes;
                summary.output_bytes += report.output_bytes;
            }
            Err(_) => summary.failed += 1,
        }
    }
    Ok(summary)
}

fn ensure_parent_dir(output: &Path) -> Result<(), OptimizeError> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|e| OptimizeError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}
