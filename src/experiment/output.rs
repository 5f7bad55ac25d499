//! Output Directory Manager
//!
//! Every run owns one directory, `output_root/<experiment_name>/<timestamp>/`,
//! with `logs/` and `artifacts/` children and a fixed set of flat artifact
//! files. Two `latest` symlinks (one per experiment, one at the root) point
//! at the most recently prepared directory; they are a convenience, not a
//! correctness requirement, and failing to update them never aborts a run.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Filesystem-safe, sortable timestamp for run directories.
#[must_use]
pub fn run_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H%M%S").to_string()
}

/// Replace `link` with a symlink to `target` (a path relative to the link's
/// parent). Pre-existing links are removed first.
fn replace_symlink(link: &Path, target: &Path) -> std::io::Result<()> {
    if link.symlink_metadata().is_ok() {
        fs::remove_file(link)?;
    }
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }
    #[cfg(windows)]
    {
        std::os::windows::fs::symlink_dir(target, link)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = target;
        Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "symlinks are not available on this target",
        ))
    }
}

/// Best-effort update of a `latest` convenience pointer.
///
/// Returns whether the pointer now references `target`. Callers decide what
/// to do with a `false`; [`OutputLayout::prepare`] logs it and moves on.
pub fn update_latest_pointer(link: &Path, target: &Path) -> bool {
    replace_symlink(link, target).is_ok()
}

/// Canonical output location for one experiment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
    experiment_name: String,
    timestamp: String,
    dir: PathBuf,
}

impl OutputLayout {
    /// Create the standardized output directory for a run.
    ///
    /// Creates `output_root/<experiment_name>/<timestamp>/` with `logs/` and
    /// `artifacts/` children (idempotently; pre-existing directories are not
    /// an error) and updates the `latest` pointers at the experiment and
    /// root levels. A missing `timestamp` means "now".
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty experiment name and
    /// [`Error::Output`] if the directories cannot be created. Pointer
    /// failures are logged, never returned.
    pub fn prepare(
        experiment_name: &str,
        output_root: impl AsRef<Path>,
        timestamp: Option<String>,
    ) -> Result<Self> {
        if experiment_name.is_empty() {
            return Err(Error::InvalidInput(
                "experiment name must not be empty".to_string(),
            ));
        }

        let root = output_root.as_ref().to_path_buf();
        let timestamp = timestamp.unwrap_or_else(run_timestamp);
        let exp_root = root.join(experiment_name);
        let dir = exp_root.join(&timestamp);

        for path in [&dir, &dir.join("logs"), &dir.join("artifacts")] {
            fs::create_dir_all(path).map_err(|e| {
                Error::Output(format!("failed to create {}: {e}", path.display()))
            })?;
        }

        if !update_latest_pointer(&exp_root.join("latest"), Path::new(&timestamp)) {
            tracing::warn!(
                link = %exp_root.join("latest").display(),
                "could not update experiment-level latest pointer"
            );
        }
        let root_target = Path::new(experiment_name).join(&timestamp);
        if !update_latest_pointer(&root.join("latest"), &root_target) {
            tracing::warn!(
                link = %root.join("latest").display(),
                "could not update root-level latest pointer"
            );
        }

        Ok(Self {
            root,
            experiment_name: experiment_name.to_string(),
            timestamp,
            dir,
        })
    }

    /// Get the output root under which all experiments live.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the experiment name.
    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    /// Get the run timestamp (the directory's leaf segment).
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the run directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get the `logs/` subdirectory.
    #[must_use]
    pub fn logs_dir(&self) -> PathBuf {
        self.dir.join("logs")
    }

    /// Get the `artifacts/` subdirectory.
    #[must_use]
    pub fn artifacts_dir(&self) -> PathBuf {
        self.dir.join("artifacts")
    }

    /// Path of the run's `metrics.json`.
    #[must_use]
    pub fn metrics_path(&self) -> PathBuf {
        self.dir.join("metrics.json")
    }

    /// Path of the run's `params.json`.
    #[must_use]
    pub fn params_path(&self) -> PathBuf {
        self.dir.join("params.json")
    }

    /// Path of the run's `report.md`.
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.dir.join("report.md")
    }

    /// Path of the run's `report_request.json`.
    #[must_use]
    pub fn request_path(&self) -> PathBuf {
        self.dir.join("report_request.json")
    }

    /// Path of the run's `report_request.md` (human-readable mirror).
    #[must_use]
    pub fn request_summary_path(&self) -> PathBuf {
        self.dir.join("report_request.md")
    }

    /// Path of the run's log file.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.logs_dir().join("experiment.log")
    }
}
