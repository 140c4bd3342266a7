// pipeline.rs is used only by the binary.
#![allow(dead_code)]
use crate::annotation::AnnotationIndex;
use crate::cli::Args;
use crate::library::RefLibrary;
use crate::{filter, norm, reads, stages};
use anyhow::{anyhow, bail, Context, Result};
use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const ALIGNER_BIN: &str = "bwa";

#[derive(Debug, Default)]
pub struct Stats {
    pub total_read_length: u64,
    pub records_kept: u64,
    pub records_dropped: u64,
    pub normalization_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Reads,
    Alignments,
}

pub fn detect_input(path: &Path) -> Result<InputKind> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "fastq" | "fq" => Ok(InputKind::Reads),
        "sam" => Ok(InputKind::Alignments),
        _ => Err(anyhow!(
            "unable to detect input kind from extension: .{}",
            ext
        )),
    }
}

/// Run the per-sample pipeline: prepare and align reads (external), filter
/// short alignments, fuse records (external), analyse the requested family
/// (external), and plot the result table (external).
pub fn run(args: &Args) -> Result<Stats> {
    let kind = detect_input(&args.input)?;
    let sample_id = match &args.sample_id {
        Some(id) => id.clone(),
        None => args
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .ok_or_else(|| anyhow!("cannot derive sample id from {}", args.input.display()))?,
    };

    if let Some(lib_path) = &args.library {
        let library = RefLibrary::load(lib_path)?;
        match library.get(&args.family) {
            Some(reference) => tracing::info!(
                family = %args.family,
                reference_length = reference.len(),
                "found family in library"
            ),
            None => bail!(
                "family {} not found in library {}",
                args.family,
                lib_path.display()
            ),
        }
    }

    if let Some(anno_path) = &args.annotation {
        let annotations = AnnotationIndex::load(anno_path)?;
        let features = annotations.get(&args.family);
        tracing::info!(
            family = %args.family,
            features = features.len(),
            "loaded family annotations"
        );
    }

    let mut stats = Stats::default();

    let (alignments, log) = match kind {
        InputKind::Reads => {
            let library = args.library.as_deref().ok_or_else(|| {
                anyhow!("a reference library is required to align FASTQ input")
            })?;

            stats.total_read_length = reads::total_read_length(&args.input)?;
            let log = with_suffix(&args.input, ".log");
            write_sample_log(&log, &sample_id, stats.total_read_length)?;
            tracing::info!(
                sample = %sample_id,
                total_read_length = stats.total_read_length,
                log = %log.display(),
                "wrote sample log"
            );

            stages::Prep {
                input: &args.input,
                quality_threshold: args.quality_threshold,
                min_read_length: args.min_read_length,
                min_alignment_length: args.min_alignment_length,
                quality_encoding: &args.quality_encoding,
                threads: args.threads,
                library: Some(library),
            }
            .run()?;

            let prepared = with_suffix(&args.input, ".prep");
            let sam = with_suffix(&args.input, ".sam");
            let aligner_args: Vec<OsString> = vec![
                "bwasw".into(),
                "-t".into(),
                args.threads.to_string().into(),
                library.into(),
                prepared.as_os_str().into(),
            ];
            stages::run_aligner(ALIGNER_BIN, &aligner_args, &sam)?;

            (sam, Some(log))
        }
        InputKind::Alignments => (args.input.clone(), None),
    };

    let filtered = with_suffix(&alignments, ".filtered.sam");
    let filter_stats =
        filter::filter_by_alignment_length(&alignments, &filtered, args.min_alignment_length)?;
    stats.records_kept = filter_stats.kept;
    stats.records_dropped = filter_stats.dropped;
    tracing::info!(
        kept = filter_stats.kept,
        dropped = filter_stats.dropped,
        min_alignment_length = args.min_alignment_length,
        "filtered alignments"
    );

    stages::Fuse { input: &filtered }.run()?;
    let fused = with_suffix(&filtered, ".fused.sam");

    stats.normalization_factor = norm::normalization_factor(log.as_deref())?;
    tracing::info!(
        factor = stats.normalization_factor,
        "computed normalization factor"
    );

    stages::Analyse {
        input: &fused,
        family: &args.family,
        sample_id: &sample_id,
        output: &args.output,
        library: args.library.as_deref(),
        annotation: args.annotation.as_deref(),
        log: log.as_deref(),
    }
    .run()?;

    stages::Plot {
        input: &args.output,
        output: &with_suffix(&args.output, ".pdf"),
        free_yaxis: args.free_yaxis,
        color_reference: args.color_reference,
    }
    .run()?;

    Ok(stats)
}

fn write_sample_log(path: &Path, sample_id: &str, total_read_length: u64) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create log {}", path.display()))?;
    writeln!(file, "#sample_id: {sample_id}")?;
    writeln!(file, "#total_read_length: {total_read_length}")?;
    Ok(())
}

/// Append `suffix` to the full file name (`reads.fastq` -> `reads.fastq.log`).
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
