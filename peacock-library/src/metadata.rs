use camino::Utf8Path;
use chrono::{DateTime, Local};
use peacock_core::error::{PeacockError, Result};
use peacock_core::format::{format_duration, format_size};
use peacock_core::record::AudioMetadataRecord;
use peacock_core::tags::{TagAccessor, TagField};
use std::fs;

/// Builds one [`AudioMetadataRecord`] per file from its tags and filesystem
/// metadata.
#[derive(Debug, Clone)]
pub struct MetadataExtractor<A> {
    accessor: A,
}

impl<A: TagAccessor> MetadataExtractor<A> {
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    pub fn extract_from_file(&self, path: &Utf8Path) -> Result<AudioMetadataRecord> {
        let metadata = fs::metadata(path.as_std_path())
            .map_err(|e| PeacockError::Library(format!("Failed to read file metadata: {e}")))?;

        let container = self.accessor.open(path)?;
        let properties = container.properties();
        let duration = properties.duration.as_secs_f64();
        let file_size = metadata.len();

        tracing::debug!("Extracting metadata from: {}", path);

        Ok(AudioMetadataRecord {
            file_path: path.to_path_buf(),
            filename: path.file_name().unwrap_or(path.as_str()).to_string(),
            title: container.get(TagField::Title),
            artist: container.get(TagField::Artist),
            album: container.get(TagField::Album),
            genre: container.get(TagField::Genre),
            date: container.get(TagField::Date),
            comment: container.get(TagField::Comment),
            duration,
            duration_formatted: format_duration(duration),
            bitrate: properties.bitrate.unwrap_or(0),
            sample_rate: properties.sample_rate.unwrap_or(0),
            file_size,
            file_size_formatted: format_size(file_size),
            format: path
                .extension()
                .map(|ext| format!(".{}", ext.to_lowercase()))
                .unwrap_or_default(),
            created_date: created_date(&metadata),
        })
    }
}

/// Inode change time on Unix, creation (or modification) time elsewhere, as a
/// local ISO-8601 timestamp.
fn created_date(metadata: &fs::Metadata) -> String {
    #[cfg(unix)]
    let timestamp = {
        use std::os::unix::fs::MetadataExt;
        DateTime::from_timestamp(metadata.ctime(), metadata.ctime_nsec() as u32)
            .map(|utc| utc.with_timezone(&Local))
    };

    #[cfg(not(unix))]
    let timestamp = metadata
        .created()
        .or_else(|_| metadata.modified())
        .ok()
        .map(DateTime::<Local>::from);

    timestamp
        .map(|t| t.naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string())
        .unwrap_or_default()
}
