//! Shared CLI output helpers for the geneinfo binaries.

use std::time::{Duration, Instant};

use colored::Colorize;

use crate::gene_info::builder::{BuildSummary, ConflictKind};

pub fn banner(subtitle: &str) {
    eprintln!();
    eprintln!("{} {}", "geneinfo".bold().cyan(), subtitle.dimmed());
    eprintln!();
}

pub fn section(title: &str) {
    let bar = "─".repeat(50);
    eprintln!("{} {}", title.bold().blue(), bar.dimmed());
}

pub fn kv(key: &str, value: &str) {
    eprintln!("  {:<20} {}", key.dimmed(), value);
}

pub fn success(msg: &str) {
    eprintln!("  {} {}", "✓".green().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg.yellow());
}

/// Prints the gene count, per-kind conflict counts and malformed rows.
pub fn print_build_summary(summary: &BuildSummary) {
    kv("Rows", &summary.rows.to_string());
    kv("Genes", &summary.genes.to_string());
    for kind in [
        ConflictKind::Chromosome,
        ConflictKind::Start,
        ConflictKind::End,
        ConflictKind::Strand,
    ] {
        kv(&format!("{kind} conflicts"), &summary.conflicts(kind).to_string());
    }

    for row in &summary.malformed {
        warning(&format!(
            "line {}: {} ({})",
            row.line_number,
            row.reason,
            row.line.trim_end()
        ));
    }
    if summary.malformed_count > 0 {
        warning(&format!("{} malformed rows skipped", summary.malformed_count));
    }
}

/// Formats a duration as HH:MM:SS.d (tenths of a second).
#[must_use]
pub fn format_elapsed(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let tenths = d.subsec_millis() / 100;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{tenths}")
}

pub fn print_elapsed(start: Instant) {
    eprintln!();
    eprintln!(
        "{}  {}",
        "Time".dimmed(),
        format_elapsed(start.elapsed()).bold()
    );
    eprintln!();
}
