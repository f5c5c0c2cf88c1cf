use camino::{Utf8Path, Utf8PathBuf};
use peacock_core::config::Config;
use peacock_core::error::{PeacockError, Result};
use peacock_core::record::{AudioMetadataRecord, TitleUpdate, UpdateResult};
use peacock_core::tags::TagAccessor;
use peacock_library::{ScanOptions, ScanReport, Scanner, TitleUpdater};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

pub type SharedAccessor = Arc<dyn TagAccessor>;

/// The scanned library: a root and the records found under it.
#[derive(Debug, Default, Clone)]
pub struct Library {
    root: Utf8PathBuf,
    records: Vec<AudioMetadataRecord>,
}

impl Library {
    pub fn new(root: impl Into<Utf8PathBuf>, records: Vec<AudioMetadataRecord>) -> Self {
        Self {
            root: root.into(),
            records,
        }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn records(&self) -> &[AudioMetadataRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Swap in a freshly scanned library.
    pub fn replace(&mut self, root: impl Into<Utf8PathBuf>, records: Vec<AudioMetadataRecord>) {
        self.root = root.into();
        self.records = records;
    }

    pub fn get_by_path(&self, path: &Utf8Path) -> Option<&AudioMetadataRecord> {
        self.records.iter().find(|r| r.has_path(path))
    }

    /// First record with this bare filename. Files sharing a name in
    /// different folders are shadowed by the earliest one.
    pub fn find_by_filename(&self, filename: &str) -> Option<&AudioMetadataRecord> {
        self.records.iter().find(|r| r.filename == filename)
    }

    /// Mirror a title that has been written to disk. Returns whether a
    /// record matched.
    pub fn apply_title(&mut self, path: &Utf8Path, title: &str) -> bool {
        match self.records.iter_mut().find(|r| r.has_path(path)) {
            Some(record) => {
                record.title = Some(title.to_string());
                true
            }
            None => false,
        }
    }

    /// Mirror the successful entries of a batch. `results` must line up
    /// with `updates`. Returns the number of records changed.
    pub fn apply_results(&mut self, updates: &[TitleUpdate], results: &[UpdateResult]) -> usize {
        let mut changed = 0;
        for (update, result) in updates.iter().zip(results) {
            if result.success && self.apply_title(&update.file_path, &update.new_title) {
                changed += 1;
            }
        }
        changed
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<RwLock<Library>>,
    pub config: Arc<RwLock<Config>>,
    /// Where directory changes are persisted; `None` keeps them in memory
    pub config_path: Option<PathBuf>,
    pub accessor: SharedAccessor,
}

impl AppState {
    pub fn new(config: Config, library: Library, accessor: SharedAccessor) -> Self {
        Self {
            library: Arc::new(RwLock::new(library)),
            config: Arc::new(RwLock::new(config)),
            config_path: None,
            accessor,
        }
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn scanner(&self, config: &Config) -> Scanner<SharedAccessor> {
        Scanner::new(self.accessor.clone()).with_extensions(&config.library.audio_extensions)
    }

    pub fn updater(&self) -> TitleUpdater<SharedAccessor> {
        TitleUpdater::new(self.accessor.clone())
    }

    /// Scan `root` on the blocking pool using the current config.
    pub async fn scan(&self, root: Utf8PathBuf) -> Result<ScanReport> {
        let (scanner, options) = {
            let config = self.config.read().await;
            (self.scanner(&config), ScanOptions::from(&config.library))
        };

        tokio::task::spawn_blocking(move || scanner.scan(&root, &options))
            .await
            .map_err(|e| PeacockError::Library(format!("Scan task failed: {e}")))?
    }

    /// Record `root` as the library directory and write the config file if
    /// one is attached. A failed write leaves the in-memory config updated.
    pub async fn remember_root(&self, root: &Utf8Path) {
        let mut config = self.config.write().await;
        config.set_root(root);

        if let Some(path) = &self.config_path {
            match config.save_to_path(path) {
                Ok(()) => info!("Saved library directory to {}", path.display()),
                Err(e) => warn!("Failed to save config to {}: {}", path.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peacock_core::test_utils::create_test_record;

    fn library() -> Library {
        Library::new(
            "/music",
            vec![
                create_test_record("/music/a/take.mp3", None),
                create_test_record("/music/b/take.mp3", Some("Second")),
                create_test_record("/music/c/other.mp3", Some("Other")),
            ],
        )
    }

    #[test]
    fn test_find_by_filename_returns_first_match() {
        let library = library();
        let found = library.find_by_filename("take.mp3").unwrap();
        assert_eq!(found.file_path, "/music/a/take.mp3");
        assert!(library.find_by_filename("missing.mp3").is_none());
    }

    #[test]
    fn test_apply_title_only_touches_matching_record() {
        let mut library = library();
        assert!(library.apply_title(Utf8Path::new("/music/b/take.mp3"), "Renamed"));
        assert!(!library.apply_title(Utf8Path::new("/music/z.mp3"), "Nope"));

        assert_eq!(library.records()[0].title, None);
        assert_eq!(library.records()[1].title.as_deref(), Some("Renamed"));
    }

    #[test]
    fn test_apply_results_skips_failures() {
        let mut library = library();
        let updates = vec![
            TitleUpdate::new("/music/a/take.mp3", "One"),
            TitleUpdate::new("/music/b/take.mp3", "Two"),
            TitleUpdate::new("/music/c/other.mp3", "Three"),
        ];
        let results = vec![
            UpdateResult::succeeded("/music/a/take.mp3"),
            UpdateResult::failed("/music/b/take.mp3", "disk full"),
            UpdateResult::succeeded("/music/c/other.mp3"),
        ];

        assert_eq!(library.apply_results(&updates, &results), 2);
        assert_eq!(library.records()[0].title.as_deref(), Some("One"));
        assert_eq!(library.records()[1].title.as_deref(), Some("Second"));
        assert_eq!(library.records()[2].title.as_deref(), Some("Three"));
    }

    #[test]
    fn test_replace_swaps_root_and_records() {
        let mut library = library();
        library.replace("/other", Vec::new());
        assert_eq!(library.root(), "/other");
        assert!(library.is_empty());
    }
}
