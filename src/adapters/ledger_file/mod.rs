// Ledger file adapter - Plain-text, append-only record of segmented videos

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// One video file name per line
pub struct TextLedgerAdapter {
    path: PathBuf,
}

impl TextLedgerAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LedgerPort for TextLedgerAdapter {
    async fn entries(&self) -> Result<BTreeSet<String>, DomainError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => {
                return Err(DomainError::StoreFail(format!(
                    "Failed to read ledger {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        // Entries are stored verbatim; file names may start or end with spaces
        Ok(content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    async fn append(&self, file_name: &str) -> Result<(), DomainError> {
        if file_name.contains(['\n', '\r']) {
            return Err(DomainError::BadArgs(format!(
                "Ledger entries must be single-line, got {:?}",
                file_name
            )));
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DomainError::StoreFail(format!("Failed to create ledger directory: {}", e))
            })?;
        }

        let fail = |e: std::io::Error| {
            DomainError::StoreFail(format!(
                "Failed to append to ledger {}: {}",
                self.path.display(),
                e
            ))
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(fail)?;
        writeln!(file, "{}", file_name).map_err(fail)?;
        file.sync_data().map_err(fail)?;

        tracing::debug!(ledger = %self.path.display(), entry = file_name, "Ledger entry appended");
        Ok(())
    }
}
