use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Everything known about one scanned audio file.
///
/// `file_path` is the key within a scan. `filename` is only the basename and
/// can repeat across subdirectories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadataRecord {
    pub file_path: Utf8PathBuf,
    pub filename: String,

    // Descriptive tags
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,

    // Technical facts, 0 when unknown
    pub duration: f64,
    pub duration_formatted: String,
    /// Bits per second
    pub bitrate: u32,
    pub sample_rate: u32,
    pub file_size: u64,
    pub file_size_formatted: String,
    /// Lowercased extension including the dot, e.g. `.m4a`
    pub format: String,

    pub created_date: String,
}

impl AudioMetadataRecord {
    /// The title shown to users: the tag title, or the filename when untitled.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.filename)
    }

    pub fn has_path(&self, path: &Utf8Path) -> bool {
        self.file_path == path
    }
}

/// A proposed replacement title. Only produced when it differs from the
/// current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleSuggestion {
    pub file_path: Utf8PathBuf,
    pub filename: String,
    pub current_title: String,
    pub suggested_title: String,
}

impl From<TitleSuggestion> for TitleUpdate {
    fn from(suggestion: TitleSuggestion) -> Self {
        Self {
            file_path: suggestion.file_path,
            new_title: suggestion.suggested_title,
        }
    }
}

/// One write instruction for the updater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleUpdate {
    pub file_path: Utf8PathBuf,
    pub new_title: String,
}

impl TitleUpdate {
    pub fn new(file_path: impl Into<Utf8PathBuf>, new_title: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            new_title: new_title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    pub file_path: Utf8PathBuf,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UpdateResult {
    pub fn succeeded(file_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(file_path: impl Into<Utf8PathBuf>, error: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Outcome of a batch of title writes, in instruction order.
///
/// `success_count + failed_count` always equals the number of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchUpdateReport {
    pub success_count: usize,
    pub failed_count: usize,
    pub results: Vec<UpdateResult>,
}

impl BatchUpdateReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: UpdateResult) {
        if result.success {
            self.success_count += 1;
        } else {
            self.failed_count += 1;
        }
        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn successes(&self) -> impl Iterator<Item = &UpdateResult> {
        self.results.iter().filter(|r| r.success)
    }
}

impl FromIterator<UpdateResult> for BatchUpdateReport {
    fn from_iter<I: IntoIterator<Item = UpdateResult>>(iter: I) -> Self {
        let mut report = Self::new();
        for result in iter {
            report.record(result);
        }
        report
    }
}
