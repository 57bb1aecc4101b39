// Ports - Interface definitions (contracts)

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Open a source video and report its frame count, frame rate and duration.
    /// Fails with `MediaFail` when the file cannot be opened or has no video stream.
    async fn probe_video(&self, path: &Path) -> Result<VideoInfo, DomainError>;
}

/// Outcome of a single still capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The frame was written to the destination
    Captured,
    /// The stream ended before the requested frame
    EndOfStream,
}

/// Port for media execution: still capture and sub-range cutting
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Seek to `frame_index` and write that frame as an image to `dest`
    async fn capture_frame(
        &self,
        video: &Path,
        frame_index: u64,
        fps: f64,
        dest: &Path,
    ) -> Result<CaptureOutcome, DomainError>;

    /// Cut `range` out of `video` and encode it into `dest`
    async fn cut_clip(&self, video: &Path, range: &TimeRange, dest: &Path)
        -> Result<(), DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError>;

    /// Create directory (including parent directories)
    async fn create_directory(&self, dir: &Path) -> Result<(), DomainError>;

    /// Files directly inside `dir` whose extension matches one of
    /// `extensions` (case-insensitive), sorted by file name
    async fn list_files(&self, dir: &Path, extensions: &[String])
        -> Result<Vec<PathBuf>, DomainError>;

    /// Delete file
    async fn delete_file(&self, path: &Path) -> Result<(), DomainError>;

    /// Move file atomically within one file system
    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;
}

/// Append-only record of fully segmented videos
#[async_trait]
pub trait LedgerPort: Send + Sync {
    /// Every recorded video file name; empty when the ledger does not exist yet
    async fn entries(&self) -> Result<BTreeSet<String>, DomainError>;

    /// Durably append one video file name
    async fn append(&self, file_name: &str) -> Result<(), DomainError>;
}

/// Per-video clip tables, written once and read thereafter
#[async_trait]
pub trait ClipStorePort: Send + Sync {
    /// Location of the table for `video`
    fn table_path(&self, video: &str) -> PathBuf;

    /// Load the table for `video`, `None` if it was never written
    async fn load_table(&self, video: &str) -> Result<Option<ClipTable>, DomainError>;

    /// Persist a complete table, replacing any previous one atomically
    async fn write_table(&self, table: &ClipTable) -> Result<(), DomainError>;
}
