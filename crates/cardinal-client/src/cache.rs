//! Local theme cache — one JSON entry under a fixed storage key.
//!
//! Used only as the offline/error fallback during initial load. It is
//! written after a confirmed fetch or save, never speculatively, so its
//! contents always reflect server-confirmed state.

use std::fs;
use std::path::PathBuf;

use cardinal_common::models::Theme;

use crate::error::ClientError;

/// Fixed storage key, mirrored by the web shell's localStorage entry.
pub const THEME_STORAGE_KEY: &str = "user-theme";

pub struct ThemeCache {
    path: PathBuf,
}

impl ThemeCache {
    /// Cache rooted at `dir`; the entry lives at `<dir>/user-theme.json`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(format!("{THEME_STORAGE_KEY}.json")),
        }
    }

    /// Read the cached theme. Any failure (missing file, stale format)
    /// degrades to `None` rather than erroring.
    pub fn load(&self) -> Option<Theme> {
        let data = fs::read(&self.path).ok()?;
        match serde_json::from_slice(&data) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!("Discarding unreadable theme cache: {e}");
                None
            }
        }
    }

    /// Replace the cached theme.
    pub fn store(&self, theme: &Theme) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec(theme)?)?;
        Ok(())
    }

    /// Drop the cached entry, e.g. on logout.
    pub fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
