//! Segmentation and merge controller
//!
//! Splits long inputs into overlapping windows, parses and deepens every
//! window independently on the rayon pool, then stitches the per-window core
//! lists together in window order. A boundary with no core both windows agree
//! on is re-parsed over a widening bridge until one appears, so the result is
//! identical to a monolithic parse even across runs longer than the overlap.

use crate::alphabet::Alphabet;
use crate::cores::Core;
use crate::error::{LcpError, LcpResult};
use crate::lps::{next_level, parse_level1, Lps};
use crate::types::{Level, ParseOptions, Position};
use fnv::FnvHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Smallest overlap that keeps windows in step with a monolithic parse at
/// `level`: `16 * 2.2^level` symbols, rounded up. Levels below 1 count as 1.
pub fn min_overlap(level: Level) -> usize {
    (16.0 * 2.2f64.powi(level.max(1))).ceil() as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentConfig {
    /// Distance between consecutive window starts.
    #[serde(default = "default_segment_length")]
    pub segment_length: usize,

    /// Extra symbols each window reads past its segment.
    #[serde(default = "default_overlap_length")]
    pub overlap_length: usize,
}

fn default_segment_length() -> usize { 1_000_000 }
fn default_overlap_length() -> usize { 10_000 }

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            segment_length: default_segment_length(),
            overlap_length: default_overlap_length(),
        }
    }
}

impl SegmentConfig {
    pub fn new(segment_length: usize, overlap_length: usize) -> Self {
        Self {
            segment_length,
            overlap_length,
        }
    }

    /// Checks that hold for every level.
    pub fn validate(&self) -> LcpResult<()> {
        self.validate_for_level(1)
    }

    /// Reject a zero segment or an overlap shorter than [`min_overlap`] for
    /// `level`.
    pub fn validate_for_level(&self, level: Level) -> LcpResult<()> {
        if self.segment_length == 0 {
            return Err(LcpError::InvalidParams(
                "segment length must be positive".to_string(),
            ));
        }
        if level < 1 {
            return Err(LcpError::InvalidParams(format!(
                "target level must be at least 1, got {}",
                level
            )));
        }
        let needed = min_overlap(level);
        if self.overlap_length < needed {
            return Err(LcpError::InvalidParams(format!(
                "overlap length {} is too short for level {}, need at least {}",
                self.overlap_length, level, needed
            )));
        }
        Ok(())
    }

    /// Window `k` covers `[k * seg, min(k * seg + seg + overlap, n))`. The
    /// last window is the first one that reaches `n`.
    pub fn windows(&self, n: usize) -> Vec<Range<usize>> {
        let span = self.segment_length + self.overlap_length;
        let mut windows = Vec::new();
        let mut start = 0;
        loop {
            windows.push(start..(start + span).min(n));
            if start + span >= n {
                break;
            }
            start += self.segment_length;
        }
        windows
    }
}

impl Lps {
    /// Parse `seq` at `level` through overlapping windows.
    ///
    /// Inputs that fit in one window are parsed directly. If the target level
    /// turns out to be unreachable the result is the deepest non-empty level,
    /// the same state [`Lps::deepen_to`] stops in.
    pub fn segmented(
        seq: &[u8],
        alphabet: &Alphabet,
        level: Level,
        config: &SegmentConfig,
        options: ParseOptions,
    ) -> LcpResult<Lps> {
        config.validate_for_level(level)?;

        if seq.len() <= config.segment_length + config.overlap_length {
            return Ok(Lps::with_level(seq, alphabet, level, options));
        }

        let windows = config.windows(seq.len());
        log::info!(
            "Parsing {} bp in {} windows (segment {}, overlap {}) to level {}",
            seq.len(),
            windows.len(),
            config.segment_length,
            config.overlap_length,
            level
        );

        // levels[w][l - 1] holds window w at level l
        let levels: Vec<Vec<Vec<Core>>> = windows
            .par_iter()
            .map(|window| window_levels(seq, window, alphabet, level, options))
            .collect();

        let mut reached = level;
        loop {
            let index = (reached - 1) as usize;
            let parts: Vec<&[Core]> = levels
                .iter()
                .map(|window| window.get(index).map_or(&[][..], Vec::as_slice))
                .collect();

            let stitcher = Stitcher {
                seq,
                alphabet,
                level: reached,
                options,
                overlap_length: config.overlap_length,
            };
            let (cores, bridges) = stitcher.stitch(&windows, &parts);

            if !cores.is_empty() || reached == 1 {
                if bridges > 0 {
                    log::info!(
                        "{} of {} window boundaries needed a wider re-parse at level {}",
                        bridges,
                        windows.len() - 1,
                        reached
                    );
                }
                if reached < level {
                    log::debug!("Level {} unreachable, stopping at level {}", level, reached);
                }
                log::info!("Merged {} cores at level {}", cores.len(), reached);
                return Ok(Lps::from_cores(reached, cores).with_options(options));
            }
            reached -= 1;
        }
    }
}

/// Parse one window and deepen it to `level`, allowing empty levels. The
/// result holds one core list per level, level 1 first.
fn window_levels(
    seq: &[u8],
    window: &Range<usize>,
    alphabet: &Alphabet,
    level: Level,
    options: ParseOptions,
) -> Vec<Vec<Core>> {
    let window_options = options.with_offset(options.offset + window.start as Position);
    let mut cores = parse_level1(&seq[window.clone()], alphabet, window_options);
    let mut levels = Vec::with_capacity(level.max(1) as usize);
    for _ in 1..level {
        let next = next_level(&cores, options.strand, options.compressed_labels);
        levels.push(std::mem::replace(&mut cores, next));
    }
    levels.push(cores);
    log::debug!(
        "Window {}..{} produced {} cores at level {}",
        window.start,
        window.end,
        levels.last().map_or(0, Vec::len),
        level
    );
    levels
}

/// Joins per-window core lists at one level, re-parsing boundaries that
/// have no synchronising core.
struct Stitcher<'a> {
    seq: &'a [u8],
    alphabet: &'a Alphabet,
    level: Level,
    options: ParseOptions,
    overlap_length: usize,
}

impl Stitcher<'_> {
    /// Returns the merged list and the number of bridges it took.
    fn stitch(&self, windows: &[Range<usize>], parts: &[&[Core]]) -> (Vec<Core>, usize) {
        let n = self.seq.len();
        let mut merged = parts.first().map(|part| part.to_vec()).unwrap_or_default();
        // merged is final for every core that ends before `covered`
        let mut covered = windows.first().map_or(n, |window| window.end);
        let mut bridges = 0;

        let mut k = 1;
        while k < windows.len() && covered < n {
            let window = &windows[k];
            if window.end <= covered {
                k += 1;
                continue;
            }
            if splice(&mut merged, parts[k], self.global(window.start..covered)) {
                covered = window.end;
                k += 1;
                continue;
            }
            covered = self.bridge(&mut merged, window.start, covered);
            bridges += 1;
        }

        (merged, bridges)
    }

    /// Re-parse a region reaching `extra` symbols past both ends of the
    /// failed overlap `start..covered`, doubling `extra` until the region
    /// joins onto `merged` or starts at the sequence start. Returns the new
    /// covered end.
    fn bridge(&self, merged: &mut Vec<Core>, start: usize, covered: usize) -> usize {
        let n = self.seq.len();
        let mut extra = self.overlap_length.max(1);
        loop {
            let region = start.saturating_sub(extra)..covered.saturating_add(extra).min(n);
            log::debug!(
                "No synchronising core in {}..{} at level {}, re-parsing {}..{}",
                start,
                covered,
                self.level,
                region.start,
                region.end
            );
            let cores = window_levels(self.seq, &region, self.alphabet, self.level, self.options)
                .pop()
                .unwrap_or_default();

            if region.start == 0 {
                *merged = cores;
                return region.end;
            }
            if splice(merged, &cores, self.global(region.start..covered)) {
                return region.end;
            }
            extra = extra.saturating_mul(2);
        }
    }

    fn global(&self, range: Range<usize>) -> Range<Position> {
        let offset = self.options.offset;
        offset + range.start as Position..offset + range.end as Position
    }
}

/// Join `part` onto `merged` across the shared range `overlap`.
///
/// The first core of `part` at or past the overlap midpoint that `merged`
/// also holds marks the switch-over point: `merged` keeps everything before
/// it and takes the rest from `part`. Returns `false` and leaves `merged`
/// untouched when no such core exists.
pub(crate) fn splice(merged: &mut Vec<Core>, part: &[Core], overlap: Range<Position>) -> bool {
    let midpoint = overlap.start + (overlap.end - overlap.start) / 2;

    // Only cores inside the overlap can coincide with the later list.
    let tail_from = merged.partition_point(|c| c.start < overlap.start);
    let tail: FnvHashMap<Core, usize> = merged[tail_from..]
        .iter()
        .enumerate()
        .map(|(i, core)| (*core, tail_from + i))
        .collect();

    let sync = part
        .iter()
        .enumerate()
        .filter(|(_, core)| core.start >= midpoint)
        .find_map(|(j, core)| tail.get(core).map(|&i| (i, j)));

    match sync {
        Some((i, j)) => {
            merged.truncate(i);
            merged.extend_from_slice(&part[j..]);
            true
        }
        None => false,
    }
}
