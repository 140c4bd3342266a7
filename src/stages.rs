//! External stage collaborators.
//!
//! The surrounding pipeline shells out to four stage binaries (read
//! preparation, record fusion, per-family analysis, plotting) plus the
//! aligner. Their argument vocabularies are fixed contracts; this module
//! only shapes argument vectors and runs the processes.

use anyhow::{anyhow, bail, Context, Result};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

pub const PREP_BIN: &str = "tequant-prep";
pub const FUSE_BIN: &str = "tequant-fuse";
pub const ANALYSE_BIN: &str = "tequant-analyse";
pub const PLOT_BIN: &str = "tequant-plot";

#[derive(Debug)]
pub struct Prep<'a> {
    pub input: &'a Path,
    pub quality_threshold: u8,
    pub min_read_length: u32,
    pub min_alignment_length: usize,
    pub quality_encoding: &'a str,
    pub threads: u8,
    pub library: Option<&'a Path>,
}

impl Prep<'_> {
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--input".into(),
            self.input.into(),
            "--qual_threshold".into(),
            self.quality_threshold.to_string().into(),
            "--min_read_length".into(),
            self.min_read_length.to_string().into(),
            "--min_alignment_length".into(),
            self.min_alignment_length.to_string().into(),
            "--quality_encoding".into(),
            self.quality_encoding.into(),
            "--threads".into(),
            self.threads.to_string().into(),
        ];
        if let Some(lib) = self.library {
            args.push("--library".into());
            args.push(lib.into());
        }
        args
    }

    pub fn run(&self) -> Result<()> {
        run_stage(PREP_BIN, &self.to_args())
    }
}

#[derive(Debug)]
pub struct Fuse<'a> {
    pub input: &'a Path,
}

impl Fuse<'_> {
    pub fn to_args(&self) -> Vec<OsString> {
        vec!["--input".into(), self.input.into()]
    }

    pub fn run(&self) -> Result<()> {
        run_stage(FUSE_BIN, &self.to_args())
    }
}

#[derive(Debug)]
pub struct Analyse<'a> {
    pub input: &'a Path,
    pub family: &'a str,
    pub sample_id: &'a str,
    pub output: &'a Path,
    pub library: Option<&'a Path>,
    pub annotation: Option<&'a Path>,
    pub log: Option<&'a Path>,
}

impl Analyse<'_> {
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--input".into(),
            self.input.into(),
            "--family".into(),
            self.family.into(),
            "--sample_id".into(),
            self.sample_id.into(),
            "--output".into(),
            self.output.into(),
        ];
        if let Some(lib) = self.library {
            args.push("--library".into());
            args.push(lib.into());
        }
        if let Some(anno) = self.annotation {
            args.push("--annotation".into());
            args.push(anno.into());
        }
        if let Some(log) = self.log {
            args.push("--log".into());
            args.push(log.into());
        }
        args
    }

    pub fn run(&self) -> Result<()> {
        run_stage(ANALYSE_BIN, &self.to_args())
    }
}

#[derive(Debug)]
pub struct Plot<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub free_yaxis: bool,
    pub color_reference: bool,
}

impl Plot<'_> {
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--input".into(),
            self.input.into(),
            "--output".into(),
            self.output.into(),
        ];
        if self.free_yaxis {
            args.push("--free_yaxis".into());
        }
        if self.color_reference {
            args.push("--color_reference".into());
        }
        args
    }

    pub fn run(&self) -> Result<()> {
        run_stage(PLOT_BIN, &self.to_args())
    }
}

fn run_stage(bin: &str, args: &[OsString]) -> Result<()> {
    tracing::info!(stage = bin, "running external stage");
    let output = Command::new(bin)
        .args(args)
        .output()
        .with_context(|| format!("failed to spawn {bin}"))?;

    if !output.stdout.is_empty() {
        tracing::debug!(stage = bin, "{}", String::from_utf8_lossy(&output.stdout).trim_end());
    }
    if !output.stderr.is_empty() {
        tracing::debug!(stage = bin, "{}", String::from_utf8_lossy(&output.stderr).trim_end());
    }
    if !output.status.success() {
        bail!(
            "{bin} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim_end()
        );
    }
    Ok(())
}

/// Run the aligner, streaming its stdout into `outfile`.
///
/// The aligner writes SAM to stdout; diagnostics on stderr are surfaced via
/// the log. A non-zero exit fails the pipeline step.
pub fn run_aligner(program: &str, args: &[OsString], outfile: &Path) -> Result<()> {
    tracing::info!(aligner = program, out = %outfile.display(), "running aligner");
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("{program} stdout not captured"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("{program} stderr not captured"))?;

    // Drain stderr on its own thread while stdout streams to the output
    // file; a chatty aligner would otherwise fill the stderr pipe and stall
    // with both sides blocked.
    let stderr_reader = thread::spawn(move || {
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).map(|_| buf)
    });

    let out_file = File::create(outfile)
        .with_context(|| format!("failed to create {}", outfile.display()))?;
    let mut writer = BufWriter::new(out_file);
    io::copy(&mut stdout, &mut writer)
        .with_context(|| format!("failed to stream {program} output"))?;
    writer.flush()?;

    let stderr_buf = stderr_reader
        .join()
        .map_err(|_| anyhow!("{program} stderr reader panicked"))?
        .with_context(|| format!("failed to read {program} stderr"))?;
    let status = child.wait()?;

    if !stderr_buf.is_empty() {
        tracing::debug!(aligner = program, "{}", String::from_utf8_lossy(&stderr_buf).trim_end());
    }
    if !status.success() {
        bail!(
            "{program} exited with {}: {}",
            status,
            String::from_utf8_lossy(&stderr_buf).trim_end()
        );
    }
    Ok(())
}
