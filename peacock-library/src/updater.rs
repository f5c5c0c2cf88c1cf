use camino::Utf8Path;
use peacock_core::error::Result;
use peacock_core::record::{BatchUpdateReport, TitleUpdate, UpdateResult};
use peacock_core::tags::{TagAccessor, TagField};
use tracing::{debug, info, warn};

/// Writes title tags to disk.
///
/// Paths are trusted: callers must confine them to the library root before
/// handing them over. The updater does not touch any in-memory record list.
#[derive(Debug, Clone)]
pub struct TitleUpdater<A> {
    accessor: A,
}

impl<A: TagAccessor> TitleUpdater<A> {
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }

    /// Write one title. Failures come back as a failed [`UpdateResult`].
    pub fn update_one(&self, file_path: &Utf8Path, new_title: &str) -> UpdateResult {
        match self.write_title(file_path, new_title) {
            Ok(()) => {
                debug!("Updated title of {} to {:?}", file_path, new_title);
                UpdateResult::succeeded(file_path)
            }
            Err(e) => {
                warn!("Error updating title for {}: {}", file_path, e);
                UpdateResult::failed(file_path, e.to_string())
            }
        }
    }

    /// Apply every instruction in order. One failing file never stops the
    /// rest, and titles already written stay written.
    pub fn update_many(&self, updates: &[TitleUpdate]) -> BatchUpdateReport {
        let report: BatchUpdateReport = updates
            .iter()
            .map(|update| self.update_one(&update.file_path, &update.new_title))
            .collect();

        info!(
            "Title batch finished: {} updated, {} failed",
            report.success_count, report.failed_count
        );
        report
    }

    fn write_title(&self, file_path: &Utf8Path, new_title: &str) -> Result<()> {
        let mut container = self.accessor.open(file_path)?;
        container.set(TagField::Title, new_title)?;
        container.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peacock_core::test_utils::MemoryTagAccessor;

    #[test]
    fn test_update_one_writes_title() {
        let accessor = MemoryTagAccessor::new();
        let path = Utf8Path::new("memo.m4a");
        accessor.insert_titled(path, None);

        let result = TitleUpdater::new(accessor.clone()).update_one(path, "Kickoff");
        assert!(result.success);
        assert_eq!(result.error, None);
        assert_eq!(accessor.tag(path, TagField::Title).as_deref(), Some("Kickoff"));
    }

    #[test]
    fn test_update_one_reports_open_failure() {
        let accessor = MemoryTagAccessor::new();
        let result = TitleUpdater::new(accessor).update_one(Utf8Path::new("gone.mp3"), "x");
        assert!(!result.success);
        assert!(result.error.unwrap().contains("gone.mp3"));
    }

    #[test]
    fn test_update_many_continues_past_failure() {
        let accessor = MemoryTagAccessor::new();
        for name in ["one.mp3", "two.mp3", "three.mp3"] {
            accessor.insert_titled(name, None);
        }
        accessor.fail_on_save(Utf8Path::new("two.mp3"));

        let updates = vec![
            TitleUpdate::new("one.mp3", "First"),
            TitleUpdate::new("two.mp3", "Second"),
            TitleUpdate::new("three.mp3", "Third"),
        ];
        let report = TitleUpdater::new(accessor.clone()).update_many(&updates);

        assert_eq!(report.success_count, 2);
        assert_eq!(report.failed_count, 1);
        assert_eq!(report.total(), updates.len());

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].file_path, "two.mp3");
        assert!(failures[0].error.is_some());

        assert_eq!(accessor.tag(Utf8Path::new("one.mp3"), TagField::Title).as_deref(), Some("First"));
        assert_eq!(accessor.tag(Utf8Path::new("two.mp3"), TagField::Title), None);
        assert_eq!(accessor.tag(Utf8Path::new("three.mp3"), TagField::Title).as_deref(), Some("Third"));
    }

    #[test]
    fn test_update_many_empty_batch() {
        let report = TitleUpdater::new(MemoryTagAccessor::new()).update_many(&[]);
        assert_eq!(report, BatchUpdateReport::default());
    }

    #[test]
    fn test_unchanged_title_is_still_written() {
        let accessor = MemoryTagAccessor::new();
        let path = Utf8Path::new("same.mp3");
        accessor.insert_titled(path, Some("Same"));

        let result = TitleUpdater::new(accessor.clone()).update_one(path, "Same");
        assert!(result.success);
        assert_eq!(accessor.save_count(path), 1);
    }
}
