//! CLI output formatting.
//!
//! Each result type has a `format_*` function (returns strings) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Optimize
//!
//! ```text
//! 4000x3000 → 1600px | 5860 KB → 842 KB | Q=76
//! 800x600 → no resize | 310 KB → 122 KB | Q=76
//! ```
//!
//! ## Plan
//!
//! ```text
//! Source: 4000x3000, 5860 KB
//! Target width: 1600 (downscale)
//! Quality: 76
//! Sharpen: yes
//! ```
//!
//! ## Batch
//!
//! ```text
//! content/album/dawn.jpg: 4000x3000 → 1600px | 5860 KB → 842 KB | Q=76
//! content/album/broken.jpg: FAILED: failed to probe ...
//! Optimized 12 images (1 failed) | 48210 KB → 9301 KB
//! ```

use crate::imaging::{EncodePlan, SourceImageInfo};
use crate::optimize::{BatchEvent, BatchSummary, OptimizeReport};

/// Whole kilobytes, matching how sizes read in the report line.
fn kb(bytes: u64) -> u64 {
    bytes / 1024
}

/// Format the one-line success report for a single optimization.
pub fn format_report(report: &OptimizeReport) -> String {
    let target = if report.resized {
        format!("{}px", report.target_width)
    } else {
        "no resize".to_string()
    };
    format!(
        "{}x{} → {} | {} KB → {} KB | Q={}",
        report.original_width,
        report.original_height,
        target,
        kb(report.original_bytes),
        kb(report.output_bytes),
        report.quality,
    )
}

/// Format a planned decision without executing it.
pub fn format_plan(info: &SourceImageInfo, plan: &EncodePlan) -> Vec<String> {
    let width_line = if plan.resized {
        format!("Target width: {} (downscale)", plan.target_width)
    } else {
        format!("Target width: {} (no resize)", plan.target_width)
    };
    vec![
        format!("Source: {}x{}, {} KB", info.width, info.height, kb(info.byte_size)),
        width_line,
        format!("Quality: {}", plan.quality.value()),
        format!(
            "Sharpen: {}",
            if plan.config.sharpen.is_some() {
                "yes"
            } else {
                "no"
            }
        ),
    ]
}

/// Format a batch progress event as one line.
pub fn format_batch_event(event: &BatchEvent) -> String {
    match event {
        BatchEvent::Done(report) => {
            format!("{}: {}", report.source.display(), format_report(report))
        }
        BatchEvent::Failed { source, message } => {
            format!("{}: FAILED: {}", source.display(), message)
        }
    }
}

/// Format the batch run summary.
pub fn format_batch_summary(summary: &BatchSummary) -> String {
    let failed = if summary.failed > 0 {
        format!(" ({} failed)", summary.failed)
    } else {
        String::new()
    };
    format!(
        "Optimized {} images{} | {} KB → {} KB",
        summary.optimized,
        failed,
        kb(summary.original_bytes),
        kb(summary.output_bytes),
    )
}

pub fn print_report(report: &OptimizeReport) {
    println!("{}", format_report(report));
}

pub fn print_plan(info: &SourceImageInfo, plan: &EncodePlan) {
    for line in format_plan(info, plan) {
        println!("{line}");
    }
}

pub fn print_batch_summary(summary: &BatchSummary) {
    println!("{}", format_batch_summary(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::plan_encode;
    use std::path::PathBuf;

    fn sample_report(resized: bool) -> OptimizeReport {
        OptimizeReport {
            source: PathBuf::from("content/dawn.jpg"),
            output: PathBuf::from("dist/dawn.webp"),
            original_width: 4000,
            original_height: 3000,
            target_width: if resized { 1600 } else { 4000 },
            original_bytes: 6_000_000,
            output_bytes: 862_208,
            quality: 76,
            resized,
        }
    }

    #[test]
    fn report_line_resized() {
        assert_eq!(
            format_report(&sample_report(true)),
            "4000x3000 → 1600px | 5859 KB → 842 KB | Q=76"
        );
    }

    #[test]
    fn report_line_no_resize() {
        assert_eq!(
            format_report(&sample_report(false)),
            "4000x3000 → no resize | 5859 KB → 842 KB | Q=76"
        );
    }

    #[test]
    fn plan_lines_show_decision() {
        let info = SourceImageInfo {
            width: 4000,
            height: 3000,
            byte_size: 6_000_000,
        };
        let plan = plan_encode(&info);
        let lines = format_plan(&info, &plan);

        assert_eq!(lines[0], "Source: 4000x3000, 5859 KB");
        assert_eq!(lines[1], "Target width: 1600 (downscale)");
        assert_eq!(lines[2], "Quality: 76");
        assert_eq!(lines[3], "Sharpen: yes");
    }

    #[test]
    fn batch_event_lines() {
        let done = format_batch_event(&BatchEvent::Done(sample_report(true)));
        assert!(done.starts_with("content/dawn.jpg: "));
        assert!(done.contains("Q=76"));

        let failed = format_batch_event(&BatchEvent::Failed {
            source: PathBuf::from("content/broken.jpg"),
            message: "failed to probe content/broken.jpg: decode failed".into(),
        });
        assert_eq!(
            failed,
            "content/broken.jpg: FAILED: failed to probe content/broken.jpg: decode failed"
        );
    }

    #[test]
    fn summary_hides_zero_failures() {
        let summary = BatchSummary {
            optimized: 12,
            failed: 0,
            original_bytes: 49_367_040,
            output_bytes: 9_524_224,
        };
        assert_eq!(
            format_batch_summary(&summary),
            "Optimized 12 images | 48210 KB → 9301 KB"
        );

        let with_failures = BatchSummary {
            failed: 1,
            ..summary
        };
        assert_eq!(
            format_batch_summary(&with_failures),
            "Optimized 12 images (1 failed) | 48210 KB → 9301 KB"
        );
    }
}
