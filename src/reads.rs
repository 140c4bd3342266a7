use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Sum the sequence lengths of a prepared-read file.
///
/// The file is repeating two-line units: a header line starting with `@`
/// followed by the sequence line. The sequence line is consumed together
/// with its header, so a quality line is never inspected as a header of its
/// own. Returns 0 for a file with no header lines.
pub fn total_read_length(path: &Path) -> Result<u64> {
    let file = File::open(path)
        .with_context(|| format!("failed to open read file {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let mut total = 0u64;
    while let Some(line) = lines.next() {
        let line =
            line.with_context(|| format!("failed to read from {}", path.display()))?;
        if line.starts_with('@') {
            let seq = lines.next().ok_or_else(|| {
                anyhow!(
                    "truncated record in {}: header {:?} has no sequence line",
                    path.display(),
                    line
                )
            })?
            .with_context(|| format!("failed to read from {}", path.display()))?;
            total += seq.trim_end().len() as u64;
        }
    }

    Ok(total)
}
