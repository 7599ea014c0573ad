//! Settings store for the NAS monitor
//!
//! Loads settings from `$HOME/.config/nas-monitor/config.conf`, or
//! `/tmp/nas-monitor-config.conf` when `HOME` is unset.
//! A missing or unreadable file yields the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use nas_config::config::{default_config_path, Settings};
//!
//! let path = default_config_path();
//! let mut settings = Settings::load(&path);
//! settings.add_device("nas1.local/media").expect("Invalid device");
//! settings.save(&path).expect("Failed to save config");
//! ```

pub mod fields;
pub mod format;
pub mod schema;

pub use schema::{Settings, MAX_NAS_DEVICES};

use crate::error::{NasConfigError, Result};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Location used when `HOME` is not set
pub const FALLBACK_CONFIG_PATH: &str = "/tmp/nas-monitor-config.conf";

/// Get config file path under `$HOME/.config/nas-monitor`
#[must_use]
pub fn default_config_path() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(FALLBACK_CONFIG_PATH),
        |home| PathBuf::from(home).join(".config/nas-monitor/config.conf"),
    )
}

/// Create the config file's parent directory, owner-only, if it is missing
pub fn ensure_config_dir(path: &Path) -> Result<()> {
    let Some(dir) = path.parent() else {
        return Ok(());
    };
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }

    if let Some(grandparent) = dir.parent() {
        fs::create_dir_all(grandparent)?;
    }
    match nix::unistd::mkdir(dir, nix::sys::stat::Mode::S_IRWXU) {
        Ok(()) | Err(nix::errno::Errno::EEXIST) => {
            tracing::debug!("Created config directory {}", dir.display());
            Ok(())
        }
        Err(e) => Err(NasConfigError::Config(format!(
            "Failed to create {}: {e}",
            dir.display()
        ))),
    }
}

impl Settings {
    /// Read settings from `path`
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read.
    pub fn try_load(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(format::parse(&content))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NasConfigError::Config(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Read settings from `path`, falling back to defaults on any failure
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                tracing::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Write settings to `path` and restrict it to owner read/write
    ///
    /// A failure after the file was opened leaves whatever was written in place.
    ///
    /// # Errors
    /// - `Save` if the file cannot be opened for writing
    /// - `Io` if writing or changing permissions fails
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path).map_err(|source| NasConfigError::Save {
            path: path.to_path_buf(),
            source,
        })?;

        file.write_all(format::render(self).as_bytes())?;
        file.flush()?;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;

        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }
}
