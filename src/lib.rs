//! ClipSift video clip sampling and extraction library
//!
//! Long videos are cut into fixed-length clip units, each represented by one
//! or more sample images. A curator moves the samples worth keeping into a
//! selected-clip directory; the pipeline then cuts exactly those clip units
//! out of the source and deletes source videos nobody is looking at anymore.
//!
//! The crate follows a ports-and-adapters layout: `domain` holds the pure
//! clip arithmetic and naming rules, `ports` the contracts for media, files,
//! the ledger and clip tables, `adapters` their implementations and `app`
//! the use cases wired together by [`app::DefaultAppContainer`].

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{ClipRecord, ClipTable, ExtractRoute, PipelineOptions, VideoInfo};
pub use error::{ClipSiftError, ClipSiftResult};
