use anyhow::{anyhow, Context, Result};
use noodles::sam;
use noodles::sam::alignment::record::cigar::op::Kind as CigarKind;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct FilterStats {
    pub kept: u64,
    pub dropped: u64,
}

/// Length of the aligned portion of the query, in bases.
///
/// Sum of the query-consuming, non-clipping CIGAR operations (M, I, =, X).
/// Soft clips are excluded; records without a CIGAR (e.g. unmapped) yield 0.
pub fn query_alignment_length(record: &sam::Record) -> Result<usize> {
    let mut len = 0usize;
    for op in record.cigar().iter() {
        let op = op.map_err(|e| anyhow!("invalid CIGAR operation: {e}"))?;
        match op.kind() {
            CigarKind::Match
            | CigarKind::Insertion
            | CigarKind::SequenceMatch
            | CigarKind::SequenceMismatch => len += op.len(),
            _ => {}
        }
    }
    Ok(len)
}

/// Copy `input` to `output`, keeping only records whose query-alignment
/// length is at least `min_len`.
///
/// The output header is the input header; record order is preserved and
/// records pass through unmodified. A record whose CIGAR cannot be decoded
/// aborts the filter (fail fast rather than silently dropping data).
pub fn filter_by_alignment_length(
    input: &Path,
    output: &Path,
    min_len: usize,
) -> Result<FilterStats> {
    let mut reader = File::open(input)
        .map(BufReader::new)
        .map(sam::io::Reader::new)
        .with_context(|| format!("failed to open SAM {}", input.display()))?;
    let header = reader
        .read_header()
        .with_context(|| format!("failed to read SAM header from {}", input.display()))?;

    let out_file = File::create(output)
        .with_context(|| format!("failed to create SAM {}", output.display()))?;
    let mut writer = sam::io::Writer::new(BufWriter::new(out_file));
    writer.write_header(&header)?;

    let mut stats = FilterStats::default();
    let mut record = sam::Record::default();
    let mut ordinal = 0u64;
    loop {
        match reader.read_record(&mut record) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("failed to read record {} of {}", ordinal + 1, input.display())
                })
            }
        }
        ordinal += 1;
        let len = query_alignment_length(&record).with_context(|| {
            format!("malformed record {} in {}", ordinal, input.display())
        })?;
        if len >= min_len {
            writer.write_record(&header, &record)?;
            stats.kept += 1;
        } else {
            stats.dropped += 1;
        }
    }

    // Flush before returning so a write failure surfaces as an error instead
    // of being swallowed by the drop.
    writer
        .get_mut()
        .flush()
        .with_context(|| format!("failed to flush SAM {}", output.display()))?;

    Ok(stats)
}
