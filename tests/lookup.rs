/// Tests for the reference library and annotation lookups.
use std::path::{Path, PathBuf};
use tequant_rs::{get_annotations, get_reference, Annotation, AnnotationIndex, RefLibrary};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write test file");
    path
}

// ── reference library ────────────────────────────────────────────────────────

#[test]
fn reference_lookup_returns_stored_sequence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let lib = write_file(
        dir.path(),
        "library.fasta",
        ">PPI251\nACGTACGT\n>ROO\nTTTTGGGG\n",
    );

    let seq = get_reference(&lib, "ROO").expect("lookup");
    assert_eq!(seq.as_deref(), Some("TTTTGGGG"));
}

#[test]
fn reference_lookup_miss_is_absent_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let lib = write_file(dir.path(), "library.fasta", ">PPI251\nACGTACGT\n");

    let seq = get_reference(&lib, "HOBO").expect("lookup");
    assert_eq!(seq, None);
}

/// Duplicate family names keep the first sequence in the file.
#[test]
fn duplicate_family_first_match_wins() {
    let dir = tempfile::tempdir().expect("tempdir");
    let lib = write_file(
        dir.path(),
        "library.fasta",
        ">PPI251\nAAAA\n>PPI251\nCCCC\n",
    );

    let seq = get_reference(&lib, "PPI251").expect("lookup");
    assert_eq!(seq.as_deref(), Some("AAAA"));
}

/// The load-once form answers repeated lookups without rescanning the file.
#[test]
fn ref_library_serves_repeated_lookups() {
    let dir = tempfile::tempdir().expect("tempdir");
    let lib = write_file(
        dir.path(),
        "library.fasta",
        ">PPI251\nACGT\n>ROO\nTTGG\n>HOBO\nGGCC\n",
    );

    let library = RefLibrary::load(&lib).expect("load");
    assert_eq!(library.len(), 3);
    assert_eq!(library.get("PPI251"), Some("ACGT"));
    assert_eq!(library.get("HOBO"), Some("GGCC"));
    assert_eq!(library.get("JOCKEY"), None);
}

// ── annotations ──────────────────────────────────────────────────────────────

/// The literal example from the contract: line `X\tfoo\t1\t2\t3` queried with
/// prefix `X` yields the tuple ("1", "2", "3").
#[test]
fn annotation_extracts_fields_two_through_four() {
    let dir = tempfile::tempdir().expect("tempdir");
    let anno = write_file(dir.path(), "anno.tsv", "X\tfoo\t1\t2\t3\n");

    let found = get_annotations(&anno, "X").expect("lookup");
    assert_eq!(
        found,
        [Annotation {
            start: "1".into(),
            end: "2".into(),
            ty: "3".into(),
        }]
    );
}

/// A family query is a prefix match: `X` also selects a stored family `XY`.
#[test]
fn annotation_match_is_by_prefix() {
    let dir = tempfile::tempdir().expect("tempdir");
    let anno = write_file(
        dir.path(),
        "anno.tsv",
        "XY\tsrc\t10\t20\tltr\nX\tsrc\t1\t5\torf\nZ\tsrc\t7\t9\tltr\n",
    );

    let found = get_annotations(&anno, "X").expect("lookup");
    assert_eq!(found.len(), 2, "XY and X both match prefix X");
    assert_eq!(found[0].start, "10", "file order is preserved");
    assert_eq!(found[1].start, "1");
}

#[test]
fn annotation_miss_is_empty_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let anno = write_file(dir.path(), "anno.tsv", "ROO\tsrc\t1\t2\tltr\n");

    let found = get_annotations(&anno, "PPI251").expect("lookup");
    assert!(found.is_empty());
}

/// Repeated lines are returned repeatedly; nothing is deduplicated.
#[test]
fn annotation_keeps_duplicates_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let anno = write_file(
        dir.path(),
        "anno.tsv",
        "ROO\tsrc\t1\t2\tltr\nROO\tsrc\t1\t2\tltr\nROO\tsrc\t3\t4\torf\n",
    );

    let index = AnnotationIndex::load(&anno).expect("load");
    assert_eq!(index.len(), 3);
    let found = index.get("ROO");
    assert_eq!(found.len(), 3);
    assert_eq!(found[0], found[1]);
    assert_eq!(found[2].ty, "orf");
}

/// A read error after the file is open (here: the path is a directory, so
/// the first read fails) still names the offending file.
#[cfg(unix)]
#[test]
fn annotation_read_error_names_the_file() {
    let dir = tempfile::tempdir().expect("tempdir");

    let err = AnnotationIndex::load(dir.path()).expect_err("directory is not an annotation file");
    assert!(
        err.to_string().contains(&dir.path().display().to_string()),
        "got: {err}"
    );
}

/// A non-blank line with fewer than five tab-separated fields is a format
/// error naming the line.
#[test]
fn annotation_rejects_short_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let anno = write_file(dir.path(), "anno.tsv", "ROO\tsrc\t1\t2\tltr\nROO\tsrc\t1\n");

    let err = AnnotationIndex::load(&anno).expect_err("short line must fail");
    assert!(err.to_string().contains("line 2"), "got: {err}");
}
