// CSV clip store adapter - One `{video}_info.csv` table per source video

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::naming::clip_table_file_name;
use crate::ports::*;

/// Column order of every clip table
pub const CLIP_TABLE_HEADER: [&str; 6] = [
    "clip_index",
    "start_frame",
    "end_frame",
    "start_time",
    "end_time",
    "sample_frame_name",
];

/// Clip tables stored as comma-separated files in one directory
pub struct CsvClipStoreAdapter {
    dir: PathBuf,
}

impl CsvClipStoreAdapter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn store_fail(&self, video: &str, action: &str, e: impl std::fmt::Display) -> DomainError {
        DomainError::StoreFail(format!(
            "Failed to {} clip table {}: {}",
            action,
            self.table_path(video).display(),
            e
        ))
    }
}

#[async_trait]
impl ClipStorePort for CsvClipStoreAdapter {
    fn table_path(&self, video: &str) -> PathBuf {
        self.dir.join(clip_table_file_name(video))
    }

    async fn load_table(&self, video: &str) -> Result<Option<ClipTable>, DomainError> {
        let file = match File::open(self.table_path(video)) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.store_fail(video, "open", e)),
        };

        let mut reader = csv::Reader::from_reader(file);
        let headers = reader
            .headers()
            .map_err(|e| self.store_fail(video, "read", e))?
            .clone();
        if !headers.is_empty() && headers.iter().ne(CLIP_TABLE_HEADER) {
            return Err(self.store_fail(
                video,
                "read",
                format!("unexpected header {:?}", headers),
            ));
        }

        let records = reader
            .deserialize::<ClipRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.store_fail(video, "parse", e))?;

        Ok(Some(ClipTable::with_records(video, records)))
    }

    async fn write_table(&self, table: &ClipTable) -> Result<(), DomainError> {
        let video = table.video_name.as_str();
        fs::create_dir_all(&self.dir).map_err(|e| self.store_fail(video, "prepare", e))?;

        let temp = NamedTempFile::new_in(&self.dir).map_err(|e| self.store_fail(video, "create", e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp);
        writer
            .write_record(CLIP_TABLE_HEADER)
            .map_err(|e| self.store_fail(video, "write", e))?;
        for record in &table.records {
            writer
                .serialize(record)
                .map_err(|e| self.store_fail(video, "write", e))?;
        }

        let temp = writer
            .into_inner()
            .map_err(|e| self.store_fail(video, "flush", e))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| self.store_fail(video, "sync", e))?;
        temp.persist(self.table_path(video))
            .map_err(|e| self.store_fail(video, "persist", e))?;

        tracing::debug!(
            video,
            rows = table.records.len(),
            path = %self.table_path(video).display(),
            "Clip table written"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_table() -> ClipTable {
        let windows = [
            ClipWindow {
                clip_index: 0,
                start_frame: 0,
                end_frame: 900,
            },
            ClipWindow {
                clip_index: 1,
                start_frame: 900,
                end_frame: 1800,
            },
        ];
        ClipTable::with_records(
            "movieA",
            vec![
                ClipRecord::for_sample(&windows[0], 30.0, "movieA_clip_1_frame_1.jpg".into()),
                ClipRecord::for_sample(&windows[1], 30.0, "movieA_clip_2_frame_1.jpg".into()),
            ],
        )
    }

    #[tokio::test]
    async fn test_missing_table_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = CsvClipStoreAdapter::new(dir.path());
        assert!(store.load_table("nothing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_written_table_has_fixed_header_and_reloads() {
        let dir = TempDir::new().unwrap();
        let store = CsvClipStoreAdapter::new(dir.path());
        let table = sample_table();

        store.write_table(&table).await.unwrap();

        let raw = fs::read_to_string(dir.path().join("movieA_info.csv")).unwrap();
        let mut lines = raw.lines();
        assert_eq!(
            lines.next(),
            Some("clip_index,start_frame,end_frame,start_time,end_time,sample_frame_name")
        );
        assert_eq!(lines.next(), Some("0,0,900,0.0,30.0,movieA_clip_1_frame_1.jpg"));

        let loaded = store.load_table("movieA").await.unwrap().unwrap();
        assert_eq!(loaded, table);
    }

    #[tokio::test]
    async fn test_empty_table_keeps_header() {
        let dir = TempDir::new().unwrap();
        let store = CsvClipStoreAdapter::new(dir.path());

        store.write_table(&ClipTable::new("short")).await.unwrap();

        let loaded = store.load_table("short").await.unwrap().unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_rewrite_replaces_whole_table() {
        let dir = TempDir::new().unwrap();
        let store = CsvClipStoreAdapter::new(dir.path());
        store.write_table(&sample_table()).await.unwrap();

        let mut smaller = sample_table();
        smaller.records.truncate(1);
        store.write_table(&smaller).await.unwrap();

        let loaded = store.load_table("movieA").await.unwrap().unwrap();
        assert_eq!(loaded.records.len(), 1);
    }

    #[tokio::test]
    async fn test_foreign_header_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("odd_info.csv"), "a,b\n1,2\n").unwrap();
        let store = CsvClipStoreAdapter::new(dir.path());
        assert!(matches!(
            store.load_table("odd").await,
            Err(DomainError::StoreFail(_))
        ));
    }
}
