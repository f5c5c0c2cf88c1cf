//! Shared test utilities for the peacock workspace
//!
//! Record fixtures and an in-memory [`TagAccessor`] whose files can be told
//! to fail. Only available when the "test-utils" feature is enabled.

use crate::error::{PeacockError, Result};
use crate::format::{format_duration, format_size};
use crate::record::AudioMetadataRecord;
use crate::tags::{AudioProperties, TagAccessor, TagContainer, TagField};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Create a record for `path` with the given title and no other tags
///
/// # Examples
///
/// ```
/// # use peacock_core::test_utils::create_test_record;
/// let record = create_test_record("memos/rec1.mp3", Some("Band Meeting"));
/// assert_eq!(record.filename, "rec1.mp3");
/// assert_eq!(record.format, ".mp3");
/// ```
pub fn create_test_record(path: &str, title: Option<&str>) -> AudioMetadataRecord {
    let file_path = Utf8PathBuf::from(path);
    let filename = file_path.file_name().unwrap_or(path).to_string();
    let format = file_path
        .extension()
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default();

    AudioMetadataRecord {
        file_path,
        filename,
        title: title.map(str::to_string),
        artist: None,
        album: None,
        genre: None,
        date: None,
        comment: None,
        duration: 0.0,
        duration_formatted: format_duration(0.0),
        bitrate: 0,
        sample_rate: 0,
        file_size: 0,
        file_size_formatted: format_size(0),
        format,
        created_date: "1970-01-01T00:00:00".to_string(),
    }
}

/// State of one fake file held by [`MemoryTagAccessor`]
#[derive(Debug, Clone, Default)]
pub struct MemoryFile {
    pub tags: HashMap<TagField, String>,
    pub properties: AudioProperties,
    pub fail_open: bool,
    pub fail_save: bool,
    pub saves: usize,
}

impl MemoryFile {
    pub fn with_tag(mut self, field: TagField, value: &str) -> Self {
        self.tags.insert(field, value.to_string());
        self
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.properties.duration = Duration::from_secs(seconds);
        self
    }
}

/// A [`TagAccessor`] backed by a map instead of real files
#[derive(Debug, Clone, Default)]
pub struct MemoryTagAccessor {
    files: Arc<Mutex<HashMap<Utf8PathBuf, MemoryFile>>>,
}

impl MemoryTagAccessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<Utf8PathBuf>, file: MemoryFile) {
        self.lock().insert(path.into(), file);
    }

    /// Register a file that only carries a title tag (or no tags at all)
    pub fn insert_titled(&self, path: impl Into<Utf8PathBuf>, title: Option<&str>) {
        let mut file = MemoryFile::default();
        if let Some(title) = title {
            file.tags.insert(TagField::Title, title.to_string());
        }
        self.insert(path, file);
    }

    pub fn fail_on_open(&self, path: &Utf8Path) {
        self.lock().entry(path.to_path_buf()).or_default().fail_open = true;
    }

    pub fn fail_on_save(&self, path: &Utf8Path) {
        self.lock().entry(path.to_path_buf()).or_default().fail_save = true;
    }

    pub fn tag(&self, path: &Utf8Path, field: TagField) -> Option<String> {
        self.lock().get(path).and_then(|f| f.tags.get(&field).cloned())
    }

    pub fn save_count(&self, path: &Utf8Path) -> usize {
        self.lock().get(path).map_or(0, |f| f.saves)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Utf8PathBuf, MemoryFile>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TagAccessor for MemoryTagAccessor {
    fn open(&self, path: &Utf8Path) -> Result<Box<dyn TagContainer>> {
        let files = self.lock();
        let file = files.get(path).ok_or_else(|| {
            PeacockError::UnsupportedFormat(format!("no tag container in {path}"))
        })?;

        if file.fail_open {
            return Err(PeacockError::Tag(format!("Failed to open {path}")));
        }

        Ok(Box::new(MemoryContainer {
            path: path.to_path_buf(),
            tags: file.tags.clone(),
            properties: file.properties,
            fail_save: file.fail_save,
            files: Arc::clone(&self.files),
        }))
    }
}

struct MemoryContainer {
    path: Utf8PathBuf,
    tags: HashMap<TagField, String>,
    properties: AudioProperties,
    fail_save: bool,
    files: Arc<Mutex<HashMap<Utf8PathBuf, MemoryFile>>>,
}

impl TagContainer for MemoryContainer {
    fn get(&self, field: TagField) -> Option<String> {
        self.tags.get(&field).filter(|v| !v.is_empty()).cloned()
    }

    fn set(&mut self, field: TagField, value: &str) -> Result<()> {
        self.tags.insert(field, value.to_string());
        Ok(())
    }

    fn properties(&self) -> AudioProperties {
        self.properties
    }

    fn save(&mut self) -> Result<()> {
        if self.fail_save {
            return Err(PeacockError::Io(std::io::Error::other(format!(
                "simulated write failure for {}",
                self.path
            ))));
        }

        let mut files = self
            .files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let file = files.entry(self.path.clone()).or_default();
        file.tags = self.tags.clone();
        file.saves += 1;
        Ok(())
    }
}
