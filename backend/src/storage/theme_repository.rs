//! Theme persistence.
//!
//! One JSON file under the app's data directory. A missing or
//! unparsable file never fails a load; it logs and falls back to the
//! built-in default so the app always starts.

use anyhow::Result;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use shared::Theme;

const THEME_FILE: &str = "theme.json";

/// Repository for the persisted visual theme
#[derive(Clone)]
pub struct ThemeRepository {
    base_directory: PathBuf,
}

impl ThemeRepository {
    /// Create a new ThemeRepository rooted at the given base directory
    pub fn new(base_directory: impl Into<PathBuf>) -> Self {
        Self {
            base_directory: base_directory.into(),
        }
    }

    /// Load the saved theme, or the default when there is none
    pub fn load(&self) -> Theme {
        let path = self.theme_path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => {
                info!("🎨 THEME: No theme file at {}, using default", path.display());
                return Theme::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(theme) => theme,
            Err(err) => {
                warn!(
                    "🎨 THEME: Could not parse {} ({}), using default",
                    path.display(),
                    err
                );
                Theme::default()
            }
        }
    }

    /// Persist the theme as pretty-printed JSON
    pub fn save(&self, theme: &Theme) -> Result<()> {
        fs::create_dir_all(&self.base_directory)?;
        let path = self.theme_path();
        let content = serde_json::to_string_pretty(theme)?;
        fs::write(&path, content)?;
        info!("🎨 THEME: Saved theme to {}", path.display());
        Ok(())
    }

    /// Drop any saved theme and return the default
    pub fn reset(&self) -> Result<Theme> {
        let path = self.theme_path();
        if path.exists() {
            fs::remove_file(&path)?;
            info!("🎨 THEME: Removed saved theme at {}", path.display());
        }
        Ok(Theme::default())
    }

    fn theme_path(&self) -> PathBuf {
        self.base_directory.join(THEME_FILE)
    }

    /// Base directory this repository writes under
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }
}
