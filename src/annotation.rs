use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One annotated feature of a family: start, end, and feature type, kept as
/// the raw text fields the annotation file carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub start: String,
    pub end: String,
    pub ty: String,
}

/// Annotation file parsed once into an ordered collection.
///
/// Each line is `family<TAB>…<TAB>start<TAB>end<TAB>type…`; a family may
/// appear on any number of lines. Queries are by family-name prefix, so a
/// search for `X` also selects a stored family `XY`.
#[derive(Debug, Default)]
pub struct AnnotationIndex {
    entries: Vec<(String, Annotation)>,
}

impl AnnotationIndex {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open annotation {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut entries = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line
                .with_context(|| format!("failed to read from {}", path.display()))?;
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 5 {
                return Err(anyhow!(
                    "malformed annotation line {} in {}: expected at least 5 tab-separated fields, got {}",
                    idx + 1,
                    path.display(),
                    fields.len()
                ));
            }
            entries.push((
                fields[0].to_string(),
                Annotation {
                    start: fields[2].to_string(),
                    end: fields[3].to_string(),
                    ty: fields[4].to_string(),
                },
            ));
        }

        Ok(Self { entries })
    }

    /// All annotations whose family name starts with `prefix`, in file order.
    /// An unknown family yields an empty vector, not an error.
    pub fn get(&self, prefix: &str) -> Vec<&Annotation> {
        self.entries
            .iter()
            .filter(|(family, _)| family.starts_with(prefix))
            .map(|(_, anno)| anno)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-shot lookup: scan `path` and collect the annotations for `prefix`.
/// Prefer [`AnnotationIndex`] when several lookups hit the same file.
pub fn get_annotations(path: &Path, prefix: &str) -> Result<Vec<Annotation>> {
    let index = AnnotationIndex::load(path)?;
    Ok(index.get(prefix).into_iter().cloned().collect())
}
