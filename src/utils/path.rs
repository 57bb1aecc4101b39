//! Path helpers shared by adapters and interactors

use std::path::{Path, PathBuf};

/// File name without its extension, the identity of a source video
pub fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
}

/// Last path component as a string
pub fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
}

/// Case-insensitive extension match against a list without leading dots
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
}

/// Normalise a configured extension: lower-case, no leading dot
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Sibling path used while a file is being written
///
/// `clips/v_clip_2.mp4` becomes `clips/v_clip_2.partial.mp4`, keeping the
/// real extension last so encoders still infer the container from it.
pub fn partial_path(path: &Path) -> PathBuf {
    let stem = file_stem(path).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}.partial.{}", stem, ext.to_string_lossy()),
        None => format!("{}.partial", stem),
    };
    path.with_file_name(name)
}
