//! Parse command implementation - FASTA/FASTQ records to binary LPS records

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use lcp_core::{Alphabet, Level, Lps, ParseOptions, SegmentConfig};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::fasta;

/// Settings after merging the configuration file with command-line flags.
#[derive(Debug, Clone)]
pub struct ParseSettings {
    pub level: Level,
    pub options: ParseOptions,
    pub segment: SegmentConfig,
    pub alphabet_file: Option<PathBuf>,
}

impl ParseSettings {
    pub fn resolve(
        config: &Config,
        level: Option<Level>,
        reverse_complement: bool,
        compressed_labels: bool,
        alphabet_file: Option<PathBuf>,
        segment_length: Option<usize>,
        overlap_length: Option<usize>,
    ) -> Self {
        let mut segment = config.segment;
        if let Some(length) = segment_length {
            segment.segment_length = length;
        }
        if let Some(length) = overlap_length {
            segment.overlap_length = length;
        }

        Self {
            level: level.unwrap_or(config.parse.level),
            options: ParseOptions::new(
                compressed_labels || config.parse.compressed_labels,
                reverse_complement || config.parse.reverse_complement,
            ),
            segment,
            alphabet_file: alphabet_file.or_else(|| config.parse.alphabet_file.clone()),
        }
    }
}

pub fn execute(input: &Path, output: &Path, settings: &ParseSettings) -> Result<()> {
    log::info!("Starting LCP parse");
    log::info!("Input file: {}", input.display());
    log::info!("Output file: {}", output.display());

    if settings.level < 1 {
        return Err(anyhow!("Level must be at least 1, got: {}", settings.level));
    }
    settings
        .segment
        .validate_for_level(settings.level)
        .context("Invalid segmentation settings")?;

    let alphabet = match &settings.alphabet_file {
        Some(path) => Alphabet::from_file(path)
            .with_context(|| format!("Failed to load alphabet: {}", path.display()))?,
        None => Alphabet::dna(),
    };

    log::info!(
        "Target level {} on strand {}{}",
        settings.level,
        settings.options.strand,
        if settings.options.compressed_labels { " with compressed labels" } else { "" }
    );

    let file = File::create(output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;
    let mut writer = BufWriter::new(file);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg} ({pos} records)")
            .context("Invalid progress template")?,
    );
    pb.set_message(format!("Parsing {}", input.display()));

    let mut total_cores = 0usize;
    let mut short_records = 0usize;
    let records = fasta::for_each_record(input, |id, seq| {
        let lps = Lps::segmented(seq, &alphabet, settings.level, &settings.segment, settings.options)?;
        if lps.level() < settings.level {
            short_records += 1;
            log::warn!(
                "Record '{}' ({} bp) only reached level {}",
                id,
                seq.len(),
                lps.level()
            );
        }
        log::debug!("Record '{}': {} bp, {} cores", id, seq.len(), lps.len());

        total_cores += lps.len();
        lps.write(&mut writer)?;
        pb.inc(1);
        Ok(())
    })?;

    writer.flush().context("Failed to flush output file")?;
    pb.finish_and_clear();

    log::info!("Parsed {} records into {} cores", records, total_cores);
    if short_records > 0 {
        log::warn!("{} records stopped below level {}", short_records, settings.level);
    }
    log::info!("LPS records written to: {}", output.display());

    Ok(())
}
