// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments or configuration values
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// Source could not be opened, decoded or encoded by the media codec
    MediaFail(String),
    /// A media operation exceeded its time budget
    Timeout(String),
    /// A file name does not follow the sample/clip naming convention
    InvalidName(String),
    /// No clip table has been written for the video
    MissingClipTable(String),
    /// The clip table has no row for the requested clip
    MissingClipRow { video: String, clip_index: u32 },
    /// Clamping left nothing to cut
    EmptyRange(String),
    /// Clip table or ledger could not be read or written
    StoreFail(String),
    /// File system operation failed
    FsFail(String),
}

impl DomainError {
    /// Whether the failure came from the media codec running out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self, DomainError::Timeout(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::MediaFail(msg) => write!(f, "Media operation failed: {}", msg),
            DomainError::Timeout(msg) => write!(f, "Timed out: {}", msg),
            DomainError::InvalidName(msg) => write!(f, "Invalid file name: {}", msg),
            DomainError::MissingClipTable(video) => {
                write!(f, "No clip table found for video '{}'", video)
            }
            DomainError::MissingClipRow { video, clip_index } => write!(
                f,
                "Clip table for '{}' has no row with clip_index {}",
                video, clip_index
            ),
            DomainError::EmptyRange(msg) => write!(f, "Empty time range: {}", msg),
            DomainError::StoreFail(msg) => write!(f, "Store failure: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system failure: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
