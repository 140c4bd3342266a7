use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const MARKER: &str = "#total_read_length:";

/// Per-million-reads scaling factor for a sample.
///
/// Scans the sample log for the `#total_read_length:` line and divides its
/// last space-separated token by 1,000,000. Returns 1.0 when no log is
/// supplied or the log carries no such line.
pub fn normalization_factor(log: Option<&Path>) -> Result<f64> {
    let path = match log {
        Some(path) => path,
        None => return Ok(1.0),
    };

    let file = File::open(path)
        .with_context(|| format!("failed to open log {}", path.display()))?;
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("failed to read from {}", path.display()))?;
        if line.contains(MARKER) {
            let token = line.split(' ').next_back().unwrap_or("");
            let total: u64 = token.parse().with_context(|| {
                format!("bad total read length {:?} in {}", token, path.display())
            })?;
            return Ok(total as f64 / 1_000_000.0);
        }
    }

    Ok(1.0)
}
