//! FASTA/FASTQ input
//!
//! Streams records through needletail, which also handles gzip-compressed
//! input transparently.

use anyhow::{anyhow, Context, Result};
use needletail::parse_fastx_file;
use std::path::Path;

/// Call `visit` with the id and sequence of every record, in file order.
/// Returns the number of records visited.
pub fn for_each_record<P, F>(path: P, mut visit: F) -> Result<usize>
where
    P: AsRef<Path>,
    F: FnMut(&str, &[u8]) -> Result<()>,
{
    let path = path.as_ref();
    let mut reader = parse_fastx_file(path)
        .map_err(|e| anyhow!("Failed to open {}: {}", path.display(), e))?;

    let mut count = 0;
    while let Some(record) = reader.next() {
        let record = record
            .map_err(|e| anyhow!("Malformed record {} in {}: {}", count + 1, path.display(), e))?;
        let id = String::from_utf8_lossy(record.id()).to_string();
        let seq = record.seq();
        visit(&id, &seq).with_context(|| format!("Failed to process record '{}'", id))?;
        count += 1;
    }

    if count == 0 {
        return Err(anyhow!("No sequences found in {}", path.display()));
    }
    Ok(count)
}
