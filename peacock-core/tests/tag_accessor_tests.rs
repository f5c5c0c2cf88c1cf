//! Tests for the in-memory tag accessor used across the workspace

use camino::Utf8Path;
use peacock_core::error::PeacockError;
use peacock_core::tags::{TagAccessor, TagField};
use peacock_core::test_utils::{MemoryFile, MemoryTagAccessor};

#[test]
fn test_get_reads_inserted_tags() {
    let accessor = MemoryTagAccessor::new();
    accessor.insert(
        "rec.mp3",
        MemoryFile::default()
            .with_tag(TagField::Title, "Standup")
            .with_tag(TagField::Comment, "")
            .with_duration(90),
    );

    let container = accessor.open(Utf8Path::new("rec.mp3")).unwrap();
    assert_eq!(container.get(TagField::Title).as_deref(), Some("Standup"));
    assert_eq!(container.get(TagField::Comment), None);
    assert_eq!(container.get(TagField::Artist), None);
    assert_eq!(container.properties().duration.as_secs(), 90);
}

#[test]
fn test_set_is_invisible_until_save() {
    let accessor = MemoryTagAccessor::new();
    let path = Utf8Path::new("rec.mp3");
    accessor.insert_titled(path, Some("Old"));

    let mut container = accessor.open(path).unwrap();
    container.set(TagField::Title, "New").unwrap();
    assert_eq!(accessor.tag(path, TagField::Title).as_deref(), Some("Old"));

    container.save().unwrap();
    assert_eq!(accessor.tag(path, TagField::Title).as_deref(), Some("New"));
    assert_eq!(accessor.save_count(path), 1);
}

#[test]
fn test_unknown_path_is_unsupported() {
    let accessor = MemoryTagAccessor::new();
    let err = accessor.open(Utf8Path::new("missing.mp3")).err().unwrap();
    assert!(matches!(err, PeacockError::UnsupportedFormat(_)));
}

#[test]
fn test_simulated_failures() {
    let accessor = MemoryTagAccessor::new();
    let broken_open = Utf8Path::new("broken.mp3");
    let broken_save = Utf8Path::new("readonly.mp3");
    accessor.insert_titled(broken_open, None);
    accessor.insert_titled(broken_save, Some("Keep"));
    accessor.fail_on_open(broken_open);
    accessor.fail_on_save(broken_save);

    assert!(accessor.open(broken_open).is_err());

    let mut container = accessor.open(broken_save).unwrap();
    container.set(TagField::Title, "Changed").unwrap();
    let err = container.save().unwrap_err();
    assert!(matches!(err, PeacockError::Io(_)));
    assert_eq!(accessor.tag(broken_save, TagField::Title).as_deref(), Some("Keep"));
    assert_eq!(accessor.save_count(broken_save), 0);
}
