// Audio library scanning, title suggestion and tag writing
pub mod metadata;
pub mod scanner;
pub mod suggest;
pub mod tags;
pub mod updater;
pub mod walker;

pub use metadata::MetadataExtractor;
pub use scanner::{ScanOptions, ScanReport, Scanner, SkippedFile};
pub use suggest::TitleSuggester;
pub use tags::LoftyTagAccessor;
pub use updater::TitleUpdater;
pub use walker::FsWalker;
