//! Format-independent access to the tag container embedded in an audio file.
//!
//! Container families name their fields differently (ID3v2 frames, MP4 atoms,
//! Vorbis comment keys). Implementations of [`TagAccessor`] hide that mapping
//! behind [`TagField`].

use crate::error::Result;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Logical tag fields the library reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagField {
    Title,
    Artist,
    Album,
    Genre,
    Date,
    Comment,
}

impl TagField {
    pub const ALL: [TagField; 6] = [
        TagField::Title,
        TagField::Artist,
        TagField::Album,
        TagField::Genre,
        TagField::Date,
        TagField::Comment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TagField::Title => "title",
            TagField::Artist => "artist",
            TagField::Album => "album",
            TagField::Genre => "genre",
            TagField::Date => "date",
            TagField::Comment => "comment",
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Technical stream properties reported by the container.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioProperties {
    pub duration: Duration,
    /// Bits per second
    pub bitrate: Option<u32>,
    pub sample_rate: Option<u32>,
}

/// An opened tag container for one file.
pub trait TagContainer {
    /// Read a field. Empty values read as `None`.
    fn get(&self, field: TagField) -> Option<String>;

    /// Stage a new value; nothing touches the disk until [`save`](Self::save).
    fn set(&mut self, field: TagField, value: &str) -> Result<()>;

    fn properties(&self) -> AudioProperties;

    /// Persist staged changes.
    fn save(&mut self) -> Result<()>;
}

/// Opens tag containers by path.
pub trait TagAccessor: Send + Sync {
    fn open(&self, path: &Utf8Path) -> Result<Box<dyn TagContainer>>;
}

impl<T: TagAccessor + ?Sized> TagAccessor for std::sync::Arc<T> {
    fn open(&self, path: &Utf8Path) -> Result<Box<dyn TagContainer>> {
        (**self).open(path)
    }
}
