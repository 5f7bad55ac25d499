//! Output Directory Manager Tests
//!
//! Directory preparation is idempotent and the `latest` pointers are
//! advisory: they track the newest run when the filesystem cooperates and
//! are skipped without failing the run when it does not.

use ensayo::experiment::{update_latest_pointer, OutputLayout};

// =============================================================================
// Idempotent Creation
// =============================================================================

#[test]
fn test_preparing_twice_is_not_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let ts = "2026-08-06_120000".to_string();

    OutputLayout::prepare("exp", tmp.path(), Some(ts.clone())).unwrap();
    let layout = OutputLayout::prepare("exp", tmp.path(), Some(ts)).unwrap();

    assert!(layout.logs_dir().is_dir());
    assert!(layout.artifacts_dir().is_dir());
}

#[test]
fn test_prepare_creates_missing_output_root() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("deeply").join("nested").join("outputs");

    let layout =
        OutputLayout::prepare("exp", &root, Some("2026-08-06_120000".into())).unwrap();
    assert!(layout.dir().starts_with(&root));
    assert!(layout.dir().is_dir());
}

#[test]
fn test_distinct_timestamps_get_distinct_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let a = OutputLayout::prepare("exp", tmp.path(), Some("2026-08-06_120000".into())).unwrap();
    let b = OutputLayout::prepare("exp", tmp.path(), Some("2026-08-06_120001".into())).unwrap();
    assert_ne!(a.dir(), b.dir());
}

// =============================================================================
// Latest Pointers
// =============================================================================

#[cfg(unix)]
#[test]
fn test_pointers_are_relative_and_current() {
    let tmp = tempfile::tempdir().unwrap();
    OutputLayout::prepare("exp", tmp.path(), Some("2026-08-06_120000".into())).unwrap();
    let newest =
        OutputLayout::prepare("exp", tmp.path(), Some("2026-08-06_130000".into())).unwrap();

    let exp_latest = tmp.path().join("exp").join("latest");
    let root_latest = tmp.path().join("latest");

    // Relative targets keep the tree relocatable.
    assert_eq!(
        std::fs::read_link(&exp_latest).unwrap(),
        std::path::PathBuf::from("2026-08-06_130000")
    );
    assert_eq!(
        std::fs::read_link(&root_latest).unwrap(),
        std::path::PathBuf::from("exp/2026-08-06_130000")
    );
    assert_eq!(
        std::fs::canonicalize(&root_latest).unwrap(),
        std::fs::canonicalize(newest.dir()).unwrap()
    );
}

#[cfg(unix)]
#[test]
fn test_update_latest_pointer_reports_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let squatter = tmp.path().join("latest");
    std::fs::create_dir(&squatter).unwrap();

    // A real directory at the link path cannot be replaced.
    assert!(!update_latest_pointer(
        &squatter,
        std::path::Path::new("exp/2026-08-06_120000")
    ));

    // The run itself still succeeds.
    let layout =
        OutputLayout::prepare("exp", tmp.path(), Some("2026-08-06_120000".into())).unwrap();
    assert!(layout.dir().is_dir());
}
