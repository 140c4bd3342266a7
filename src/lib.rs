//! tequant-rs: quantify transposable element insertions from sequencing reads.
//!
//! # Library usage
//!
//! ```no_run
//! use tequant_rs::{filter_by_alignment_length, normalization_factor, total_read_length};
//! use tequant_rs::{AnnotationIndex, RefLibrary};
//! use std::path::Path;
//!
//! // Drop alignments spanning fewer than 30 bases.
//! // filter_by_alignment_length(Path::new("sample.sam"), Path::new("sample.filtered.sam"), 30)?;
//! //
//! // Build the lookups once, reuse them for every family in the run.
//! // let library = RefLibrary::load(Path::new("te_library.fasta"))?;
//! // let annotations = AnnotationIndex::load(Path::new("te_features.tsv"))?;
//! // let reference = library.get("PPI251");
//! // let features = annotations.get("PPI251");
//! //
//! // let total = total_read_length(Path::new("sample.fastq"))?;
//! // let factor = normalization_factor(Some(Path::new("sample.fastq.log")))?;
//! ```

// Internal modules — not part of the public API.
pub(crate) mod cli;
pub(crate) mod pipeline;
pub(crate) mod types;

// Public modules — stable API surface.
pub mod annotation;
pub mod filter;
pub mod library;
pub mod norm;
pub mod reads;
pub mod stages;

// Flat re-exports for the most commonly used public items.
pub use annotation::{get_annotations, Annotation, AnnotationIndex};
pub use filter::{filter_by_alignment_length, query_alignment_length, FilterStats};
pub use library::{get_reference, RefLibrary};
pub use norm::normalization_factor;
pub use reads::total_read_length;
