//! File-name codec for sample images and extracted clips
//!
//! Sample images are named `{video}_clip_{N}_frame_{M}.{ext}` and extracted
//! clips `{video}_clip_{N}.{ext}`, with `N` and `M` 1-based. Parsing is
//! anchored at the end of the name, so a video name may itself contain
//! `_clip_` or `_frame_`. Anything that would not format back to the exact
//! same string is rejected.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::errors::DomainError;

/// Literal token separating the video name from the clip number
pub const CLIP_TOKEN: &str = "_clip_";
/// Literal token separating the clip number from the sample number
pub const FRAME_TOKEN: &str = "_frame_";

fn sample_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<video>.+)_clip_(?P<clip>[1-9][0-9]*)_frame_(?P<sample>[1-9][0-9]*)\.(?P<ext>[A-Za-z0-9]+)$")
            .expect("sample name pattern is valid")
    })
}

fn clip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<video>.+)_clip_(?P<clip>[1-9][0-9]*)\.(?P<ext>[A-Za-z0-9]+)$")
            .expect("clip name pattern is valid")
    })
}

/// Check that a video name can be embedded in a file name
pub fn validate_video_name(video: &str) -> Result<(), DomainError> {
    if video.is_empty() {
        return Err(DomainError::InvalidName("video name is empty".to_string()));
    }
    if video.contains(['/', '\\']) || video.chars().any(char::is_control) {
        return Err(DomainError::InvalidName(format!(
            "video name '{}' contains path separators or control characters",
            video
        )));
    }
    Ok(())
}

fn validate_extension(ext: &str) -> Result<(), DomainError> {
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(DomainError::InvalidName(format!(
            "extension '{}' must be non-empty and alphanumeric",
            ext
        )));
    }
    Ok(())
}

fn parse_number(raw: &str, name: &str) -> Result<u32, DomainError> {
    raw.parse::<u32>()
        .map_err(|_| DomainError::InvalidName(format!("number out of range in '{}'", name)))
}

/// Identity of one sample image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleName {
    pub video: String,
    /// 1-based clip number
    pub clip_number: u32,
    /// 1-based sample number within the clip
    pub sample_number: u32,
    pub extension: String,
}

impl SampleName {
    pub fn new(
        video: impl Into<String>,
        clip_number: u32,
        sample_number: u32,
        extension: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = Self {
            video: video.into(),
            clip_number,
            sample_number,
            extension: extension.into(),
        };
        validate_video_name(&name.video)?;
        validate_extension(&name.extension)?;
        if clip_number == 0 || sample_number == 0 {
            return Err(DomainError::InvalidName(
                "clip and sample numbers are 1-based".to_string(),
            ));
        }
        Ok(name)
    }

    /// Build the name of sample `sample_index` of clip `clip_index`, both 0-based
    pub fn from_indices(
        video: &str,
        clip_index: u32,
        sample_index: u32,
        extension: &str,
    ) -> Result<Self, DomainError> {
        Self::new(video, clip_index + 1, sample_index + 1, extension)
    }

    /// Parse a file name (not a path)
    pub fn parse(file_name: &str) -> Result<Self, DomainError> {
        let caps = sample_pattern().captures(file_name).ok_or_else(|| {
            DomainError::InvalidName(format!(
                "'{}' does not match {{video}}{}{{N}}{}{{M}}.{{ext}}",
                file_name, CLIP_TOKEN, FRAME_TOKEN
            ))
        })?;

        Self::new(
            &caps["video"],
            parse_number(&caps["clip"], file_name)?,
            parse_number(&caps["sample"], file_name)?,
            &caps["ext"],
        )
    }

    /// 0-based clip index as stored in clip tables
    pub fn clip_index(&self) -> u32 {
        self.clip_number - 1
    }

    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SampleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}.{}",
            self.video, CLIP_TOKEN, self.clip_number, FRAME_TOKEN, self.sample_number, self.extension
        )
    }
}

/// Identity of one extracted clip file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClipName {
    pub video: String,
    /// 1-based clip number
    pub clip_number: u32,
    pub extension: String,
}

impl ClipName {
    pub fn new(
        video: impl Into<String>,
        clip_number: u32,
        extension: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let name = Self {
            video: video.into(),
            clip_number,
            extension: extension.into(),
        };
        validate_video_name(&name.video)?;
        validate_extension(&name.extension)?;
        if clip_number == 0 {
            return Err(DomainError::InvalidName("clip numbers are 1-based".to_string()));
        }
        Ok(name)
    }

    /// Output clip belonging to a sample
    pub fn for_sample(sample: &SampleName, extension: &str) -> Result<Self, DomainError> {
        Self::new(sample.video.clone(), sample.clip_number, extension)
    }

    pub fn parse(file_name: &str) -> Result<Self, DomainError> {
        let caps = clip_pattern().captures(file_name).ok_or_else(|| {
            DomainError::InvalidName(format!(
                "'{}' does not match {{video}}{}{{N}}.{{ext}}",
                file_name, CLIP_TOKEN
            ))
        })?;

        Self::new(
            &caps["video"],
            parse_number(&caps["clip"], file_name)?,
            &caps["ext"],
        )
    }

    pub fn file_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}.{}",
            self.video, CLIP_TOKEN, self.clip_number, self.extension
        )
    }
}

/// File name of the clip table for a video
pub fn clip_table_file_name(video: &str) -> String {
    format!("{}_info.csv", video)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_sample_name() {
        let name = SampleName::parse("movieA_clip_2_frame_1.jpg").unwrap();
        assert_eq!(name.video, "movieA");
        assert_eq!(name.clip_number, 2);
        assert_eq!(name.clip_index(), 1);
        assert_eq!(name.sample_number, 1);
        assert_eq!(name.extension, "jpg");
    }

    #[test]
    fn test_video_name_may_contain_tokens() {
        let name = SampleName::parse("my_clip_3_frame_9_take_clip_12_frame_4.png").unwrap();
        assert_eq!(name.video, "my_clip_3_frame_9_take");
        assert_eq!(name.clip_number, 12);
        assert_eq!(name.sample_number, 4);
    }

    #[test]
    fn test_rejects_malformed_names() {
        for bad in [
            "movieA.jpg",
            "_clip_1_frame_1.jpg",
            "movieA_clip_0_frame_1.jpg",
            "movieA_clip_01_frame_1.jpg",
            "movieA_clip_1_frame_0.jpg",
            "movieA_clip_1_frame_1",
            "movieA_clip_x_frame_1.jpg",
            "movieA_clip_99999999999_frame_1.jpg",
            "movieA_clip_1_frame_1.jpg.tmp_",
        ] {
            assert!(SampleName::parse(bad).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_clip_name_for_sample() {
        let sample = SampleName::parse("movieA_clip_2_frame_1.jpg").unwrap();
        let clip = ClipName::for_sample(&sample, "mp4").unwrap();
        assert_eq!(clip.file_name(), "movieA_clip_2.mp4");
        assert_eq!(ClipName::parse("movieA_clip_2.mp4").unwrap(), clip);
    }

    #[test]
    fn test_from_indices_is_one_based() {
        let name = SampleName::from_indices("v", 0, 0, "jpg").unwrap();
        assert_eq!(name.file_name(), "v_clip_1_frame_1.jpg");
    }

    #[test]
    fn test_rejects_path_separators() {
        assert!(SampleName::new("a/b", 1, 1, "jpg").is_err());
        assert!(ClipName::new("a\\b", 1, "mp4").is_err());
    }

    #[test]
    fn test_clip_table_file_name() {
        assert_eq!(clip_table_file_name("movieA"), "movieA_info.csv");
    }

    proptest! {
        #[test]
        fn prop_sample_name_round_trips(
            video in "[A-Za-z0-9 ._-]{0,8}(_clip_[0-9]{1,3}|_frame_[0-9]{1,3}|_)?[A-Za-z0-9 ._-]{0,8}",
            clip in 1u32..100_000,
            sample in 1u32..1_000,
            ext in "[a-z0-9]{1,4}",
        ) {
            prop_assume!(!video.is_empty());
            let name = SampleName::new(video.clone(), clip, sample, ext.clone()).unwrap();
            let parsed = SampleName::parse(&name.file_name()).unwrap();
            prop_assert_eq!(parsed, name);
        }

        #[test]
        fn prop_clip_name_round_trips(
            video in "[A-Za-z0-9._-]{1,6}(_clip_[0-9]{1,3})?",
            clip in 1u32..100_000,
        ) {
            let name = ClipName::new(video, clip, "mp4").unwrap();
            prop_assert_eq!(ClipName::parse(&name.file_name()).unwrap(), name);
        }
    }
}
