//! Shared helpers for peacock-library integration tests

#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub const WAV_SAMPLE_RATE: u32 = 8000;

/// Write a silent mono 16-bit PCM WAV of the given length.
///
/// Tag readers sniff the RIFF header, so the payload is valid audio whatever
/// extension `path` carries.
pub fn write_wav(path: &Utf8Path, seconds: u32) {
    let data_len = WAV_SAMPLE_RATE * seconds * 2;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);

    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&WAV_SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(WAV_SAMPLE_RATE * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
}

/// A scratch library directory removed on drop
pub struct TestLibrary {
    pub root: Utf8PathBuf,
    _temp_dir: TempDir,
}

impl TestLibrary {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        Self {
            root,
            _temp_dir: temp_dir,
        }
    }

    /// Create an empty file and return its path
    pub fn touch(&self, relative: &str) -> Utf8PathBuf {
        let path = self.root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, b"").unwrap();
        path
    }

    pub fn wav(&self, relative: &str, seconds: u32) -> Utf8PathBuf {
        let path = self.root.join(relative);
        write_wav(&path, seconds);
        path
    }
}
