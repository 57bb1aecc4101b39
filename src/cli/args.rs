//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Overrides for `[pipeline]` and `[encoder]` settings
#[derive(Args, Debug, Default, Clone)]
pub struct PipelineOverrides {
    /// Directory holding the source videos
    #[arg(long, global = true, env = "CLIPSIFT_INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory sample images are written to
    #[arg(long, global = true, env = "CLIPSIFT_SAMPLE_DIR")]
    pub sample_dir: Option<PathBuf>,

    /// Directory clip tables are written to (default: sample directory)
    #[arg(long, global = true, env = "CLIPSIFT_METADATA_DIR")]
    pub metadata_dir: Option<PathBuf>,

    /// File listing fully segmented videos
    #[arg(long, global = true, env = "CLIPSIFT_LEDGER_FILE")]
    pub ledger_file: Option<PathBuf>,

    /// Clip unit length in seconds
    #[arg(long, global = true, env = "CLIPSIFT_CLIP_DURATION")]
    pub clip_duration: Option<f64>,

    /// Sample images captured per clip unit
    #[arg(long, global = true, env = "CLIPSIFT_SAMPLES_PER_CLIP")]
    pub samples_per_clip: Option<u32>,

    /// Accepted source video extensions, comma separated
    #[arg(long, global = true, value_delimiter = ',', env = "CLIPSIFT_VIDEO_EXTENSIONS")]
    pub video_extensions: Vec<String>,

    /// Time budget for a single ffmpeg/ffprobe call, in seconds
    #[arg(long, global = true, env = "CLIPSIFT_MEDIA_TIMEOUT")]
    pub media_timeout: Option<u64>,

    /// Path to the ffmpeg binary
    #[arg(long, global = true, env = "CLIPSIFT_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Path to the ffprobe binary
    #[arg(long, global = true, env = "CLIPSIFT_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Selected-clip directory; repeat together with --output-dir for each route
    #[arg(long = "selected-dir", global = true)]
    pub selected_dirs: Vec<PathBuf>,

    /// Output directory paired with the --selected-dir at the same position
    #[arg(long = "output-dir", global = true)]
    pub output_dirs: Vec<PathBuf>,
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Report what retention would delete without deleting
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the retain command
#[derive(Args, Debug)]
pub struct RetainArgs {
    /// Report what would be deleted without deleting
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Sample image, e.g. movieA_clip_2_frame_1.jpg
    pub marker: PathBuf,
}

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Video name or source file
    pub video: String,
}
