use camino::{Utf8Path, Utf8PathBuf};
use peacock_core::config::{DEFAULT_AUDIO_EXTENSIONS, LibraryConfig, normalize_extension};
use peacock_core::error::{PeacockError, Result};
use peacock_core::record::AudioMetadataRecord;
use peacock_core::tags::TagAccessor;
use peacock_core::walker::DirectoryWalker;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::metadata::MetadataExtractor;
use crate::walker::FsWalker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub recursive: bool,
    /// Extract in path order instead of walker order
    pub sort_by_path: bool,
    pub parallel: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            sort_by_path: true,
            parallel: false,
        }
    }
}

impl From<&LibraryConfig> for ScanOptions {
    fn from(config: &LibraryConfig) -> Self {
        Self {
            recursive: config.recursive,
            sort_by_path: config.sort_by_path,
            parallel: config.parallel_scan,
        }
    }
}

/// A candidate file that produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: Utf8PathBuf,
    pub reason: String,
}

#[derive(Debug, Default, Clone)]
pub struct ScanReport {
    pub records: Vec<AudioMetadataRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl ScanReport {
    /// Number of audio candidates looked at, extracted or not.
    pub fn scanned(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    pub fn into_records(self) -> Vec<AudioMetadataRecord> {
        self.records
    }
}

pub struct Scanner<A, W = FsWalker> {
    extractor: MetadataExtractor<A>,
    walker: W,
    extensions: Vec<String>,
}

impl<A: TagAccessor> Scanner<A, FsWalker> {
    pub fn new(accessor: A) -> Self {
        Self::with_walker(accessor, FsWalker)
    }
}

impl<A: TagAccessor, W: DirectoryWalker> Scanner<A, W> {
    pub fn with_walker(accessor: A, walker: W) -> Self {
        Self {
            extractor: MetadataExtractor::new(accessor),
            walker,
            extensions: DEFAULT_AUDIO_EXTENSIONS
                .iter()
                .map(|ext| (*ext).to_owned())
                .collect(),
        }
    }

    /// Replace the extension allow-list. Matching is case-insensitive.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self
    }

    pub fn extractor(&self) -> &MetadataExtractor<A> {
        &self.extractor
    }

    pub fn is_supported_file(&self, path: &Utf8Path) -> bool {
        match path.extension() {
            Some(ext) => {
                let ext = format!(".{}", ext.to_lowercase());
                self.extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }

    /// Audio files under `root`, in the order they will be extracted.
    pub fn candidates(&self, root: &Utf8Path, options: &ScanOptions) -> Result<Vec<Utf8PathBuf>> {
        if !root.exists() {
            return Err(PeacockError::NotFound(format!(
                "Audio directory not found: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(PeacockError::InvalidInput(format!(
                "Audio path is not a directory: {root}"
            )));
        }

        let mut candidates: Vec<Utf8PathBuf> = self
            .walker
            .list(root, options.recursive)?
            .into_iter()
            .filter(|path| self.is_supported_file(path))
            .collect();

        if options.sort_by_path {
            candidates.sort();
        }
        Ok(candidates)
    }

    /// Extract a record for every audio file under `root`.
    ///
    /// Files that cannot be read are reported in [`ScanReport::skipped`];
    /// only a missing or unlistable root fails the whole scan.
    pub fn scan(&self, root: &Utf8Path, options: &ScanOptions) -> Result<ScanReport> {
        info!("Starting audio library scan: {}", root);

        let candidates = self.candidates(root, options)?;
        let total = candidates.len();
        info!("Found {} audio file(s)", total);

        let outcomes: Vec<(Utf8PathBuf, Result<AudioMetadataRecord>)> = if options.parallel {
            candidates
                .into_par_iter()
                .map(|path| {
                    let outcome = self.extractor.extract_from_file(&path);
                    (path, outcome)
                })
                .collect()
        } else {
            candidates
                .into_iter()
                .enumerate()
                .map(|(index, path)| {
                    debug!("Processing {}/{}: {}", index + 1, total, path);
                    let outcome = self.extractor.extract_from_file(&path);
                    (path, outcome)
                })
                .collect()
        };

        let mut report = ScanReport::default();
        for (path, outcome) in outcomes {
            match outcome {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    warn!("Skipping {}: {}", path, e);
                    report.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Scan complete: {} files scanned, {} loaded, {} skipped",
            report.scanned(),
            report.records.len(),
            report.skipped.len()
        );

        Ok(report)
    }
}
