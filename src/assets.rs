//! Asset loading with embedded fallbacks
//!
//! Runtime assets (events file, photos, fonts, template override) live in
//! the assets directory, `ASSETS_DIR` or the working directory. The
//! dashboard template and the default config are embedded in the binary
//! and used whenever no file overrides them.

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded defaults (template, config, sample events)
#[derive(RustEmbed)]
#[folder = "defaults/"]
#[include = "*.svg"]
#[include = "*.yaml"]
#[include = "*.json"]
struct EmbeddedDefaults;

/// File name of the dashboard template
pub const TEMPLATE_FILE: &str = "dashboard.svg";

/// File name of the embedded default config
pub const CONFIG_FILE: &str = "config.yaml";

/// File name of the embedded sample events
pub const EVENTS_FILE: &str = "events.json";

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with filesystem override and embedded fallback
pub struct AssetLoader {
    /// Directory holding runtime assets
    assets_dir: PathBuf,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    pub fn new(assets_dir: impl Into<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            config_file,
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Resolve a path relative to the assets directory
    pub fn resolve(&self, relative_path: &Path) -> PathBuf {
        self.assets_dir.join(relative_path)
    }

    /// Read a runtime asset from the assets directory
    pub async fn read_asset(&self, relative_path: &Path) -> io::Result<Vec<u8>> {
        let path = self.resolve(relative_path);
        tracing::trace!(path = %path.display(), "Loading asset from filesystem");
        tokio::fs::read(&path).await
    }

    /// Read the dashboard template, preferring a copy in the assets directory
    pub fn read_template(&self) -> io::Result<String> {
        let path = self.assets_dir.join(TEMPLATE_FILE);
        if path.exists() {
            tracing::trace!(path = %path.display(), "Loading template from filesystem");
            return fs::read_to_string(&path);
        }

        let data = Self::embedded(TEMPLATE_FILE)?;
        String::from_utf8(data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Whether the template comes from the assets directory
    pub fn has_template_override(&self) -> bool {
        self.assets_dir.join(TEMPLATE_FILE).exists()
    }

    /// Read config file content (external if configured and present, else embedded)
    pub fn read_config_string(&self) -> io::Result<String> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return fs::read_to_string(path);
            }
            tracing::warn!(path = %path.display(), "Config file not found, using embedded");
        }

        let data = Self::embedded(CONFIG_FILE)?;
        String::from_utf8(data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Load font files (`.ttf`, `.otf`) from `<assets>/fonts`
    pub fn get_fonts(&self) -> Vec<(String, Cow<'static, [u8]>)> {
        let dir = self.assets_dir.join("fonts");
        let Ok(entries) = fs::read_dir(&dir) else {
            return Vec::new();
        };

        let mut fonts = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let is_font = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"));
            if !is_font {
                continue;
            }
            match fs::read(&path) {
                Ok(data) => {
                    let name = entry.file_name().to_string_lossy().to_string();
                    fonts.push((name, Cow::Owned(data)));
                }
                Err(e) => tracing::warn!(path = %path.display(), %e, "Failed to read font"),
            }
        }
        fonts.sort_by(|a, b| a.0.cmp(&b.0));
        fonts
    }

    /// List embedded default files
    pub fn list_embedded() -> Vec<String> {
        let mut files: Vec<String> = EmbeddedDefaults::iter().map(|f| f.to_string()).collect();
        files.sort();
        files
    }

    /// Extract embedded defaults into the assets directory
    ///
    /// The config is written to the configured config path when one is set.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        fs::create_dir_all(&self.assets_dir)?;
        let mut report = InitReport::default();

        for name in Self::list_embedded() {
            let target = match (&self.config_file, name.as_str()) {
                (Some(path), CONFIG_FILE) => path.clone(),
                _ => self.assets_dir.join(&name),
            };

            if target.exists() && !force {
                report.skipped.push(target.display().to_string());
                continue;
            }
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, Self::embedded(&name)?)?;
            report.written.push(target.display().to_string());
        }

        Ok(report)
    }

    fn embedded(name: &str) -> io::Result<Cow<'static, [u8]>> {
        EmbeddedDefaults::get(name).map(|f| f.data).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("Embedded asset not found: {name}"),
            )
        })
    }
}
