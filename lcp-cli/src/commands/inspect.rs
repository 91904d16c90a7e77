//! Inspect command implementation - summarise binary LPS records

use anyhow::{Context, Result};
use lcp_core::Lps;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Per-file totals reported after the record lines.
#[derive(Debug, Default, PartialEq)]
pub struct InspectSummary {
    pub records: usize,
    pub cores: usize,
    pub memory_bytes: f64,
}

pub fn execute(input: &Path, show_labels: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = inspect(input, show_labels, &mut out)?;
    log::info!(
        "{} records, {} cores, {:.1} KiB in memory",
        summary.records,
        summary.cores,
        summary.memory_bytes / 1024.0
    );
    Ok(())
}

pub fn inspect<W: Write>(input: &Path, show_labels: bool, out: &mut W) -> Result<InspectSummary> {
    let file = File::open(input)
        .with_context(|| format!("Failed to open LPS file: {}", input.display()))?;
    let mut reader = BufReader::new(file);
    let records = Lps::read_all(&mut reader)
        .with_context(|| format!("Failed to read LPS records from: {}", input.display()))?;

    let mut summary = InspectSummary::default();
    for (index, lps) in records.iter().enumerate() {
        writeln!(
            out,
            "record {}\tlevel {}\tcores {}\tmemory {:.0} B",
            index,
            lps.level(),
            lps.len(),
            lps.memory_footprint_bytes()
        )?;
        if show_labels {
            writeln!(out, "{}", lps)?;
        }

        summary.records += 1;
        summary.cores += lps.len();
        summary.memory_bytes += lps.memory_footprint_bytes();
    }

    Ok(summary)
}
