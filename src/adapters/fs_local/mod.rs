// Local filesystem adapter - File system operations on the host

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::domain::errors::*;
use crate::ports::*;
use crate::utils::path::has_extension;

/// Local filesystem adapter
#[derive(Debug, Default)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, path: &Path) -> Result<bool, DomainError> {
        Ok(path.is_file())
    }

    async fn create_directory(&self, dir: &Path) -> Result<(), DomainError> {
        fs::create_dir_all(dir).map_err(|e| {
            DomainError::FsFail(format!("Failed to create directory {}: {}", dir.display(), e))
        })
    }

    async fn list_files(
        &self,
        dir: &Path,
        extensions: &[String],
    ) -> Result<Vec<PathBuf>, DomainError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                DomainError::FsFail(format!("Failed to list {}: {}", dir.display(), e))
            })?;
            if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    async fn delete_file(&self, path: &Path) -> Result<(), DomainError> {
        fs::remove_file(path).map_err(|e| {
            DomainError::FsFail(format!("Failed to delete {}: {}", path.display(), e))
        })
    }

    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        fs::rename(from, to).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to move {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }
}
