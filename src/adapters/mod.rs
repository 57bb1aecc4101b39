// Adapters - External system implementations

pub mod clip_store_csv;
pub mod exec_ffmpeg;
pub mod fs_local;
pub mod ledger_file;
pub mod probe_ffprobe;
#[cfg(feature = "libav")]
pub mod probe_libav;
pub mod toml_config;

// Re-export adapters
pub use clip_store_csv::CsvClipStoreAdapter;
pub use exec_ffmpeg::{EncoderSettings, FfmpegExecAdapter};
pub use fs_local::FsLocalAdapter;
pub use ledger_file::TextLedgerAdapter;
pub use probe_ffprobe::FfprobeAdapter;
#[cfg(feature = "libav")]
pub use probe_libav::LibavProbeAdapter;
pub use toml_config::{SiftConfig, TomlConfigAdapter};
