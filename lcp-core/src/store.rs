//! Binary LPS records
//!
//! Little-endian, fixed width, no magic and no version tag:
//! - `i32` level
//! - `i64` core count
//! - per core: `u32` label, `u64` start, `u64` end
//!
//! Records may be concatenated; [`Lps::read_all`] reads until a clean end of
//! stream between records.

use crate::cores::Core;
use crate::error::{LcpError, LcpResult};
use crate::lps::Lps;
use crate::types::ParseOptions;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Size of one serialized core.
pub const CORE_RECORD_BYTES: usize = 4 + 8 + 8;

/// Upper bound for the up-front allocation when reading a core list.
const MAX_PREALLOCATED_CORES: usize = 1 << 20;

impl Lps {
    pub fn write<W: Write>(&self, writer: &mut W) -> LcpResult<()> {
        writer.write_i32::<LittleEndian>(self.level())?;
        writer.write_i64::<LittleEndian>(self.len() as i64)?;
        for core in self.cores() {
            writer.write_u32::<LittleEndian>(core.label)?;
            writer.write_u64::<LittleEndian>(core.start)?;
            writer.write_u64::<LittleEndian>(core.end)?;
        }
        Ok(())
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> LcpResult<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Read exactly one record.
    ///
    /// Records carry neither the strand nor the label mode, so the result is
    /// a forward-strand LPS with full labels. Deepening a record written from
    /// a reverse-complement or compressed-label parse needs the original
    /// settings back; use [`Lps::read_with`] for that.
    pub fn read<R: Read>(reader: &mut R) -> LcpResult<Lps> {
        Self::read_with(reader, ParseOptions::default())
    }

    /// Read one record and tag it with the strand and label mode of
    /// `options`. The offset is ignored since cores are stored with
    /// absolute positions.
    pub fn read_with<R: Read>(reader: &mut R, options: ParseOptions) -> LcpResult<Lps> {
        match read_record(reader)? {
            Some(lps) => Ok(lps.with_options(options)),
            None => Err(LcpError::truncated("level", "record header")),
        }
    }

    pub fn read_file<P: AsRef<Path>>(path: P) -> LcpResult<Lps> {
        Self::read_file_with(path, ParseOptions::default())
    }

    pub fn read_file_with<P: AsRef<Path>>(path: P, options: ParseOptions) -> LcpResult<Lps> {
        let mut reader = BufReader::new(File::open(path.as_ref())?);
        Self::read_with(&mut reader, options)
    }

    /// Read records until the stream ends between two of them.
    pub fn read_all<R: Read>(reader: &mut R) -> LcpResult<Vec<Lps>> {
        Self::read_all_with(reader, ParseOptions::default())
    }

    /// [`Lps::read_all`] with every record tagged as in [`Lps::read_with`].
    pub fn read_all_with<R: Read>(reader: &mut R, options: ParseOptions) -> LcpResult<Vec<Lps>> {
        let mut records = Vec::new();
        while let Some(lps) = read_record(reader)? {
            records.push(lps.with_options(options));
        }
        Ok(records)
    }

    /// Serialized size of this record in bytes.
    pub fn serialized_len(&self) -> usize {
        4 + 8 + self.len() * CORE_RECORD_BYTES
    }
}

/// Write several records back to back.
pub fn write_all<'a, W, I>(writer: &mut W, records: I) -> LcpResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Lps>,
{
    for lps in records {
        lps.write(writer)?;
    }
    Ok(())
}

fn read_record<R: Read>(reader: &mut R) -> LcpResult<Option<Lps>> {
    let mut level_bytes = [0u8; 4];
    if !read_or_eof(reader, &mut level_bytes)? {
        return Ok(None);
    }
    let level = i32::from_le_bytes(level_bytes);
    if level < 0 {
        return Err(LcpError::InvalidHeader(format!("negative level {}", level)));
    }

    let count = reader
        .read_i64::<LittleEndian>()
        .map_err(|e| truncation(e, "core count", "record header"))?;
    if count < 0 {
        return Err(LcpError::InvalidHeader(format!("negative core count {}", count)));
    }

    let count = count as usize;
    let mut cores = Vec::with_capacity(count.min(MAX_PREALLOCATED_CORES));
    for index in 0..count {
        let context = || format!("core {} of {}", index, count);
        let label = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| truncation(e, "label", context()))?;
        let start = reader
            .read_u64::<LittleEndian>()
            .map_err(|e| truncation(e, "start", context()))?;
        let end = reader
            .read_u64::<LittleEndian>()
            .map_err(|e| truncation(e, "end", context()))?;
        cores.push(Core::new(label, start, end));
    }

    Ok(Some(Lps::from_cores(level, cores)))
}

/// Fill `buf` completely. Returns `false` if the stream was already at its
/// end; a partial fill is a truncation.
fn read_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> LcpResult<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => return Err(LcpError::truncated("level", "record header")),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

fn truncation(err: io::Error, expected: &'static str, context: impl Into<String>) -> LcpError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        LcpError::truncated(expected, context)
    } else {
        LcpError::Io(err)
    }
}
