use crate::error::{PeacockError, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extensions recognised as audio files when no override is configured.
pub const DEFAULT_AUDIO_EXTENSIONS: [&str; 8] = [
    ".m4a", ".mp3", ".wav", ".aac", ".flac", ".ogg", ".m4v", ".opus",
];

const CONFIG_FILE_NAME: &str = "peacock.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    #[serde(default = "default_root")]
    pub root: Utf8PathBuf,
    #[serde(default = "default_true")]
    pub recursive: bool,
    #[serde(default = "default_audio_extensions")]
    pub audio_extensions: Vec<String>,
    /// Process files in path order so repeated scans list records identically
    #[serde(default = "default_true")]
    pub sort_by_path: bool,
    #[serde(default)]
    pub parallel_scan: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_title")]
    pub title: String,
    /// Not read by peacock itself; kept so existing config files round-trip
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            recursive: true,
            audio_extensions: default_audio_extensions(),
            sort_by_path: true,
            parallel_scan: false,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            output_filename: default_output_filename(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_owned()
}

fn default_root() -> Utf8PathBuf {
    Utf8PathBuf::from("~/Music")
}

fn default_true() -> bool {
    true
}

fn default_audio_extensions() -> Vec<String> {
    DEFAULT_AUDIO_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_owned())
        .collect()
}

fn default_report_title() -> String {
    "My Audio Library".to_owned()
}

fn default_output_filename() -> String {
    "audio_library_report.html".to_owned()
}

fn default_bind_address() -> String {
    "127.0.0.1".to_owned()
}

const fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load the first config file found in the standard locations, or defaults.
    pub fn load_or_default() -> Self {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PeacockError::Config(format!("Failed to read config: {}", e)))?;

        let mut config: Config = toml::from_str(&content)
            .map_err(|e| PeacockError::Config(format!("Failed to parse config: {}", e)))?;

        config.expand_paths();
        config.normalize_extensions();
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| PeacockError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        tracing::debug!("Configuration written to {}", path.display());
        Ok(())
    }

    /// Where `init` writes and `load_or_default` looks first.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("peacock").join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    fn find_config_file() -> Option<PathBuf> {
        let candidates = [Self::default_path(), PathBuf::from(CONFIG_FILE_NAME)];
        candidates.into_iter().find(|candidate| candidate.exists())
    }

    /// Point the library at a different root, expanding `~/`.
    pub fn set_root(&mut self, root: impl AsRef<Utf8Path>) {
        self.library.root = expand_tilde(root.as_ref());
    }

    /// Check that the configured root exists and is a directory.
    pub fn require_root(&self) -> Result<&Utf8Path> {
        let root = self.library.root.as_path();
        if !root.exists() {
            return Err(PeacockError::NotFound(format!(
                "Audio directory not found: {}",
                root
            )));
        }
        if !root.is_dir() {
            return Err(PeacockError::InvalidInput(format!(
                "Audio path is not a directory: {}",
                root
            )));
        }
        Ok(root)
    }

    fn expand_paths(&mut self) {
        self.library.root = expand_tilde(&self.library.root);
    }

    fn normalize_extensions(&mut self) {
        for ext in &mut self.library.audio_extensions {
            *ext = normalize_extension(ext);
        }
        self.library.audio_extensions.dedup();
    }

    fn validate(&self) -> Result<()> {
        if self.library.audio_extensions.iter().all(|e| e.len() < 2) {
            return Err(PeacockError::Config(
                "audio_extensions must list at least one extension".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            library: LibraryConfig {
                root: expand_tilde(&default_root()),
                ..LibraryConfig::default()
            },
            report: ReportConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

/// Lowercase an extension and make sure it carries a leading dot.
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

fn expand_tilde(path: &Utf8Path) -> Utf8PathBuf {
    let path_str = path.as_str();
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir().and_then(|h| Utf8PathBuf::try_from(h).ok()) {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}
