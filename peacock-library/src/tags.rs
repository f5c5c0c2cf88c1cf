use camino::{Utf8Path, Utf8PathBuf};
use lofty::config::WriteOptions;
use lofty::error::{ErrorKind, LoftyError};
use lofty::file::TaggedFile;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::Tag;
use peacock_core::error::{PeacockError, Result};
use peacock_core::tags::{AudioProperties, TagAccessor, TagContainer, TagField};

/// [`TagAccessor`] backed by lofty.
///
/// The container type is sniffed from the file content, so a mislabelled
/// extension still opens with the right reader.
#[derive(Debug, Default, Copy, Clone)]
pub struct LoftyTagAccessor;

impl LoftyTagAccessor {
    pub fn new() -> Self {
        Self
    }
}

impl TagAccessor for LoftyTagAccessor {
    fn open(&self, path: &Utf8Path) -> Result<Box<dyn TagContainer>> {
        let tagged_file = Probe::open(path.as_str())
            .map_err(|e| map_lofty_error(path, "open", e))?
            .guess_file_type()
            .map_err(|e| PeacockError::Tag(format!("Failed to sniff {path}: {e}")))?
            .read()
            .map_err(|e| map_lofty_error(path, "read", e))?;

        tracing::debug!(
            "Opened {} as {:?} (primary tag {:?})",
            path,
            tagged_file.file_type(),
            tagged_file.primary_tag_type()
        );

        Ok(Box::new(LoftyContainer {
            path: path.to_path_buf(),
            file: tagged_file,
        }))
    }
}

fn map_lofty_error(path: &Utf8Path, action: &str, err: LoftyError) -> PeacockError {
    match err.kind() {
        ErrorKind::UnknownFormat => {
            PeacockError::UnsupportedFormat(format!("Unrecognised audio container: {path}"))
        }
        _ => PeacockError::Tag(format!("Failed to {action} {path}: {err}")),
    }
}

/// Lofty's generic key for a logical field. Lofty translates it into the
/// container's own naming (ID3v2 frame, MP4 atom, Vorbis comment, RIFF INFO).
fn item_key(field: TagField) -> ItemKey {
    match field {
        TagField::Title => ItemKey::TrackTitle,
        TagField::Artist => ItemKey::TrackArtist,
        TagField::Album => ItemKey::AlbumTitle,
        TagField::Genre => ItemKey::Genre,
        TagField::Date => ItemKey::RecordingDate,
        TagField::Comment => ItemKey::Comment,
    }
}

struct LoftyContainer {
    path: Utf8PathBuf,
    file: TaggedFile,
}

impl LoftyContainer {
    fn tag(&self) -> Option<&Tag> {
        self.file.primary_tag().or_else(|| self.file.first_tag())
    }

    /// The primary tag, created empty when the file has none yet.
    fn tag_mut(&mut self) -> Result<&mut Tag> {
        let tag_type = self.file.primary_tag_type();
        if self.file.tag(tag_type).is_none() {
            self.file.insert_tag(Tag::new(tag_type));
        }

        let path = &self.path;
        self.file.tag_mut(tag_type).ok_or_else(|| {
            PeacockError::UnsupportedFormat(format!("{path} cannot hold {tag_type:?} tags"))
        })
    }
}

impl TagContainer for LoftyContainer {
    fn get(&self, field: TagField) -> Option<String> {
        self.tag()
            .and_then(|tag| tag.get_string(&item_key(field)))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn set(&mut self, field: TagField, value: &str) -> Result<()> {
        let path = self.path.clone();
        let tag = self.tag_mut()?;
        if tag.insert_text(item_key(field), value.to_string()) {
            Ok(())
        } else {
            Err(PeacockError::UnsupportedFormat(format!(
                "{:?} tags in {} cannot hold a {} field",
                tag.tag_type(),
                path,
                field
            )))
        }
    }

    fn properties(&self) -> AudioProperties {
        let properties = self.file.properties();
        AudioProperties {
            duration: properties.duration(),
            bitrate: properties.audio_bitrate().map(|kbps| kbps * 1000),
            sample_rate: properties.sample_rate(),
        }
    }

    fn save(&mut self) -> Result<()> {
        self.file
            .save_to_path(self.path.as_std_path(), WriteOptions::default())
            .map_err(|e| PeacockError::Tag(format!("Failed to save {}: {e}", self.path)))
    }
}
