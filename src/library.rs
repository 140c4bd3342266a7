use crate::types::{HashMap, HashMapExt};
use anyhow::Result;
use needletail::parse_fastx_file;
use std::path::Path;

/// Reference library: family name -> reference sequence.
///
/// Built once per run and reused for every lookup. Duplicate family names
/// keep the first sequence seen, matching the scan order of the library file.
#[derive(Debug, Default)]
pub struct RefLibrary {
    seqs: HashMap<String, String>,
}

impl RefLibrary {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = parse_fastx_file(path)
            .map_err(|e| anyhow::anyhow!("failed to open library {}: {}", path.display(), e))?;
        let mut seqs: HashMap<String, String> = HashMap::new();

        while let Some(result) = reader.next() {
            let record = result
                .map_err(|e| anyhow::anyhow!("failed to parse library record: {}", e))?;
            let name = std::str::from_utf8(record.id())
                .unwrap_or("")
                .to_string();
            let seq = String::from_utf8_lossy(&record.seq()).into_owned();
            seqs.entry(name).or_insert(seq);
        }

        Ok(Self { seqs })
    }

    /// The reference sequence for `family`, or `None` if the library has no
    /// entry of that exact name.
    pub fn get(&self, family: &str) -> Option<&str> {
        self.seqs.get(family).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }
}

/// One-shot lookup: scan `path` for `family` and return its sequence.
/// Prefer [`RefLibrary`] when several lookups hit the same library.
pub fn get_reference(path: &Path, family: &str) -> Result<Option<String>> {
    let lib = RefLibrary::load(path)?;
    Ok(lib.get(family).map(str::to_string))
}
