//! Title suggestions for recordings whose title is missing or unhelpful.
//!
//! A title is kept unless it is *generic*: it repeats the filename stem,
//! starts with a raw `YYYYMMDD[ _-]HHMMSS` timestamp, or is shorter than
//! three characters. Generic titles are replaced by a date-based title when
//! the filename carries a valid `YYYYMMDD` date, and by a cleaned-up
//! filename otherwise.

use chrono::NaiveDate;
use peacock_core::record::{AudioMetadataRecord, TitleSuggestion};
use regex::Regex;
use std::sync::LazyLock;

static DATE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})([0-9]{2})([0-9]{2})").expect("valid regex"));

static TIMESTAMP_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{8}[\s_-]?[0-9]{6}").expect("valid regex"));

static EMBEDDED_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{8}\s*[0-9]{6}").expect("valid regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

const MIN_TITLE_CHARS: usize = 3;

#[derive(Debug, Default, Copy, Clone)]
pub struct TitleSuggester;

impl TitleSuggester {
    pub fn new() -> Self {
        Self
    }

    /// Whether `title` says nothing beyond what the filename already does.
    pub fn is_generic(&self, title: &str, filename: &str) -> bool {
        title == file_stem(filename)
            || TIMESTAMP_PREFIX.is_match(title)
            || title.chars().count() < MIN_TITLE_CHARS
    }

    /// `"Recording <Month> <DD>, <YYYY>"` from the first 8-digit run in the
    /// filename, if that run is a real calendar date.
    pub fn date_based_title(&self, filename: &str) -> Option<String> {
        let caps = DATE_RUN.captures(filename)?;
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;

        if year < 1 {
            return None;
        }

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(format!("Recording {}", date.format("%B %d, %Y")))
    }

    /// Turn a filename into a readable title, or return it unchanged when
    /// nothing readable is left.
    pub fn clean_filename(&self, filename: &str) -> String {
        let spaced = file_stem(filename).replace(['_', '-'], " ");
        let without_timestamps = EMBEDDED_TIMESTAMP.replace_all(&spaced, "");
        let collapsed = WHITESPACE_RUN.replace_all(&without_timestamps, " ");
        let title = capitalize_first(collapsed.trim());

        if title.is_empty() {
            filename.to_string()
        } else {
            title
        }
    }

    pub fn suggest(&self, record: &AudioMetadataRecord) -> String {
        if let Some(title) = record.title.as_deref().filter(|t| !t.is_empty()) {
            if !self.is_generic(title, &record.filename) {
                return title.to_string();
            }
        }

        self.date_based_title(&record.filename)
            .unwrap_or_else(|| self.clean_filename(&record.filename))
    }

    /// Suggestions for every record whose suggested title differs from the
    /// one currently displayed, in input order.
    pub fn suggest_all<'a, I>(&self, records: I) -> Vec<TitleSuggestion>
    where
        I: IntoIterator<Item = &'a AudioMetadataRecord>,
    {
        records
            .into_iter()
            .filter_map(|record| {
                let current = record.display_title();
                let suggested = self.suggest(record);
                (suggested != current).then(|| TitleSuggestion {
                    file_path: record.file_path.clone(),
                    filename: record.filename.clone(),
                    current_title: current.to_string(),
                    suggested_title: suggested,
                })
            })
            .collect()
    }
}

/// Everything before the last dot; the whole name when there is none.
fn file_stem(filename: &str) -> &str {
    filename
        .rsplit_once('.')
        .map_or(filename, |(stem, _)| stem)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
