//! Real-file tests for the lofty-backed tag accessor

mod common;

use common::{TestLibrary, WAV_SAMPLE_RATE};
use peacock_core::error::PeacockError;
use peacock_core::tags::{TagAccessor, TagField};
use peacock_library::{LoftyTagAccessor, MetadataExtractor, TitleUpdater};
use std::fs;

#[test]
fn test_untagged_wav_reads_properties() {
    let library = TestLibrary::new();
    let path = library.wav("silence.wav", 2);

    let container = LoftyTagAccessor.open(&path).unwrap();
    assert_eq!(container.get(TagField::Title), None);

    let properties = container.properties();
    assert_eq!(properties.sample_rate, Some(WAV_SAMPLE_RATE));
    assert!(properties.duration.as_secs_f64() > 1.9);
    assert!(properties.duration.as_secs_f64() < 2.1);
    assert!(properties.bitrate.unwrap_or(0) > 0);
}

#[test]
fn test_title_round_trip() {
    let library = TestLibrary::new();
    let path = library.wav("memo.wav", 1);

    let mut container = LoftyTagAccessor.open(&path).unwrap();
    container.set(TagField::Title, "Recording March 04, 2024").unwrap();
    container.set(TagField::Artist, "Field Notes").unwrap();
    container.save().unwrap();

    let reopened = LoftyTagAccessor.open(&path).unwrap();
    assert_eq!(
        reopened.get(TagField::Title).as_deref(),
        Some("Recording March 04, 2024")
    );
    assert_eq!(reopened.get(TagField::Artist).as_deref(), Some("Field Notes"));
}

#[test]
fn test_container_is_sniffed_from_content() {
    let library = TestLibrary::new();
    let path = library.wav("20230101_120000.mp3", 1);

    let updater = TitleUpdater::new(LoftyTagAccessor);
    assert!(updater.update_one(&path, "New Year").success);

    let record = MetadataExtractor::new(LoftyTagAccessor)
        .extract_from_file(&path)
        .unwrap();
    assert_eq!(record.title.as_deref(), Some("New Year"));
    assert_eq!(record.format, ".mp3");
    assert_eq!(record.sample_rate, WAV_SAMPLE_RATE);
}

#[test]
fn test_unknown_content_is_unsupported() {
    let library = TestLibrary::new();
    let path = library.root.join("notes.xyz");
    fs::write(&path, b"plain text, not audio").unwrap();

    let err = LoftyTagAccessor.open(&path).err().unwrap();
    assert!(matches!(err, PeacockError::UnsupportedFormat(_)), "{err}");
}

#[test]
fn test_corrupt_audio_fails_to_open() {
    let library = TestLibrary::new();
    let path = library.root.join("broken.flac");
    fs::write(&path, b"fLaC but nothing else").unwrap();

    assert!(LoftyTagAccessor.open(&path).is_err());
}

#[test]
fn test_updater_reports_missing_file() {
    let library = TestLibrary::new();
    let path = library.root.join("missing.wav");

    let result = TitleUpdater::new(LoftyTagAccessor).update_one(&path, "Nope");
    assert!(!result.success);
    assert!(result.error.is_some());
}
