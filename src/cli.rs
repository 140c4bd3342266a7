// cli.rs is used only by the binary.
#![allow(dead_code)]
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tequant-rs",
    about = "Quantify transposable element insertions from sequencing reads",
    version
)]
pub struct Args {
    /// Input reads (FASTQ) or alignments (SAM)
    pub input: PathBuf,

    /// Transposable element family to analyse
    #[arg(short = 'f', long = "family", value_name = "NAME")]
    pub family: String,

    /// Output table path
    #[arg(short = 'o', long = "out", value_name = "TABLE")]
    pub output: PathBuf,

    /// Reference library of family consensus sequences (FASTA)
    #[arg(short = 'l', long = "library", value_name = "FASTA")]
    pub library: Option<PathBuf>,

    /// Family feature annotations (tab-separated)
    #[arg(short = 'a', long = "annotation", value_name = "TSV")]
    pub annotation: Option<PathBuf>,

    /// Sample identifier (defaults to the input file stem)
    #[arg(long = "sample_id", value_name = "ID")]
    pub sample_id: Option<String>,

    /// Base quality threshold for read preparation
    #[arg(long, default_value_t = 15)]
    pub quality_threshold: u8,

    /// Discard reads shorter than this after trimming
    #[arg(long, default_value_t = 1)]
    pub min_read_length: u32,

    /// Discard alignments spanning fewer than this many bases
    #[arg(long, default_value_t = 1)]
    pub min_alignment_length: usize,

    /// Quality encoding of the input reads
    #[arg(long, default_value = "sanger", value_name = "ENCODING")]
    pub quality_encoding: String,

    /// Number of threads (CPUs) for the external stages
    #[arg(short = 'p', long = "threads", default_value_t = 1)]
    pub threads: u8,

    /// Let each panel of the plot scale its y axis independently
    #[arg(long)]
    pub free_yaxis: bool,

    /// Color the plot's reference track
    #[arg(long)]
    pub color_reference: bool,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}
