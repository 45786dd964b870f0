//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Convert
//!
//! ```text
//! town-hall
//!     Created: content/markers/town-hall
//!     Copy: material/town-hall/1900.png -> content/markers/town-hall/1900.png
//!     Thumbnail: thumb.jpg (96x64)
//!     Article: article.html
//!     warning: marker 'town-hall' has no media source
//!
//! Index: content/markers.json
//! Converted 1 markers, 1 directories created, 1 files copied, 1 thumbnails, 1 articles
//! ```
//!
//! ## Check
//!
//! ```text
//! town-hall
//!     article: simpleArticle
//!     media: imageComparison
//! old-bridge
//!     article: missing
//!     media: literal
//!     missing: material/bridge.png
//!
//! Checked 2 markers, 1 missing sources
//! ```
//!
//! # Architecture
//!
//! Each surface has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure — no I/O, no side effects.

use crate::convert::{
    ARTICLE_FILENAME, CheckReport, ConvertEvent, ConvertReport, THUMB_FILENAME,
};
use std::path::Path;

// ============================================================================
// Convert progress
// ============================================================================

/// Format a single convert progress event as display lines.
///
/// Markers lead with their directory name; every effect under a marker is an
/// indented context line.
pub fn format_convert_event(event: &ConvertEvent) -> Vec<String> {
    match event {
        ConvertEvent::MarkerStarted { directory } => vec![directory.clone()],
        ConvertEvent::DirectoryCreated { path } => {
            vec![format!("    Created: {}", path.display())]
        }
        ConvertEvent::DirectoryExists { path } => {
            vec![format!("    Exists: {}", path.display())]
        }
        ConvertEvent::FileCopied { from, to } => {
            vec![format!("    Copy: {} -> {}", from.display(), to.display())]
        }
        ConvertEvent::ThumbnailWritten { width, height } => {
            vec![format!("    Thumbnail: {THUMB_FILENAME} ({width}x{height})")]
        }
        ConvertEvent::ArticleWritten => {
            vec![format!("    Article: {ARTICLE_FILENAME}")]
        }
        ConvertEvent::Warning(warning) => vec![format!("    warning: {warning}")],
    }
}

/// Print a convert progress event to stdout.
pub fn print_convert_event(event: &ConvertEvent) {
    for line in format_convert_event(event) {
        println!("{}", line);
    }
}

/// Format the end-of-run summary: index location, counters, and any warnings
/// collected along the way (repeated here so they survive scrollback).
pub fn format_convert_summary(report: &ConvertReport, index_path: &Path) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("Index: {}", index_path.display()),
        format!("Converted {}", report.stats),
    ];
    if !report.warnings.is_empty() {
        lines.push("Warnings:".to_string());
        for warning in &report.warnings {
            lines.push(format!("    {warning}"));
        }
    }
    lines
}

/// Print the convert summary to stdout.
pub fn print_convert_summary(report: &ConvertReport, index_path: &Path) {
    for line in format_convert_summary(report, index_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Check (dry run)
// ============================================================================

/// Format dry-run output: per-marker resolution results plus a totals line.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut missing_total = 0;

    for marker in &report.markers {
        lines.push(marker.directory.clone());
        lines.push(format!("    article: {}", marker.article_kind));
        lines.push(format!("    media: {}", marker.media_kind));
        for source in &marker.missing_sources {
            lines.push(format!("    missing: {}", source.display()));
            missing_total += 1;
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Checked {} markers, {} missing sources",
        report.markers.len(),
        missing_total
    ));
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
