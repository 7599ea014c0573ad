use crate::config::{self, fields, Settings};
use crate::error::{NasConfigError, Result};
use crate::notifications::Notifier;
use crate::service::ServiceController;
use std::path::{Path, PathBuf};

/// Owns the settings being edited and the outcome of the last action
///
/// Edits only touch memory; nothing reaches disk until [`Editor::save`].
#[derive(Debug)]
pub struct Editor {
    path: PathBuf,
    settings: Settings,
    existed: bool,
    status: String,
    notifier: Notifier,
}

impl Editor {
    /// Load settings from `path`, or defaults if it can't be read
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (settings, existed) = match Settings::try_load(&path) {
            Ok(Some(settings)) => (settings, true),
            Ok(None) => {
                tracing::info!("No config at {}, starting from defaults", path.display());
                (Settings::default(), false)
            }
            Err(e) => {
                tracing::warn!("{e}; starting from defaults");
                (Settings::default(), false)
            }
        };

        Self {
            path,
            settings,
            existed,
            status: String::new(),
            notifier: Notifier::default(),
        }
    }

    /// Mirror status updates to desktop notifications
    #[must_use]
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the settings came from an existing file
    #[must_use]
    pub const fn loaded_from_file(&self) -> bool {
        self.existed
    }

    /// Text describing the last action's outcome
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Current value of a scalar setting
    pub fn get_field(&self, key: &str) -> Result<String> {
        let field =
            fields::lookup(key).ok_or_else(|| NasConfigError::UnknownKey(key.to_string()))?;
        Ok(field.render(&self.settings))
    }

    /// Change a scalar setting
    pub fn set_field(&mut self, key: &str, raw: &str) -> Result<()> {
        let outcome = fields::lookup(key)
            .ok_or_else(|| NasConfigError::UnknownKey(key.to_string()))
            .and_then(|field| field.assign_strict(&mut self.settings, raw));

        match outcome {
            Ok(()) => {
                self.status = format!("{key} set to {raw}");
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Append a device entry
    pub fn add_device(&mut self, device: &str) -> Result<()> {
        match self.settings.add_device(device) {
            Ok(()) => {
                self.status = format!("Added {device}");
                Ok(())
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Remove the device entry at zero-based `index`
    pub fn remove_device(&mut self, index: usize) -> Result<String> {
        match self.settings.remove_device(index) {
            Ok(removed) => {
                self.status = format!("Removed {removed}");
                Ok(removed)
            }
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Persist the in-memory settings
    pub fn save(&mut self) -> Result<()> {
        let outcome =
            config::ensure_config_dir(&self.path).and_then(|()| self.settings.save(&self.path));

        match outcome {
            Ok(()) => {
                self.existed = true;
                self.status = "Configuration saved successfully".to_string();
                self.notifier.status(&self.status);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Save failed: {e}");
                self.status = match &e {
                    NasConfigError::Save { source, .. } => {
                        format!("Failed to save configuration: {source}")
                    }
                    other => format!("Failed to save configuration: {other}"),
                };
                self.notifier.error(&self.status);
                Err(e)
            }
        }
    }

    /// Restart the monitor service; failure only changes the status text
    pub fn restart_service(&mut self, controller: &ServiceController) -> bool {
        match controller.restart() {
            Ok(()) => {
                self.status = "Service restarted successfully".to_string();
                self.notifier.status(&self.status);
                true
            }
            Err(e) => {
                tracing::warn!("Restart failed: {e}");
                self.status = "Failed to restart service".to_string();
                self.notifier.error(&self.status);
                false
            }
        }
    }

    fn fail(&mut self, e: NasConfigError) -> NasConfigError {
        self.status = e.to_string();
        self.notifier.error(&self.status);
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_NAS_DEVICES;
    use std::fs;
    use tempfile::TempDir;

    fn editor_in(temp_dir: &TempDir) -> Editor {
        Editor::open(temp_dir.path().join("config.conf"))
    }

    #[test]
    fn test_open_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let editor = editor_in(&temp_dir);
        assert!(!editor.loaded_from_file());
        assert_eq!(editor.settings(), &Settings::default());
        assert_eq!(editor.status(), "");
    }

    #[test]
    fn test_edits_stay_in_memory_until_save() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = editor_in(&temp_dir);

        editor.add_device("nas1.local/media").unwrap();
        editor.set_field("home_networks", "Office,Home").unwrap();
        assert!(!editor.path().exists());

        editor.save().unwrap();
        assert_eq!(editor.status(), "Configuration saved successfully");
        assert!(editor.loaded_from_file());

        let reopened = Editor::open(editor.path());
        assert_eq!(reopened.settings().nas_devices, vec!["nas1.local/media"]);
        assert_eq!(reopened.settings().home_networks, "Office,Home");
    }

    #[test]
    fn test_save_creates_config_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = Editor::open(temp_dir.path().join("nas-monitor/config.conf"));

        editor.save().unwrap();
        assert!(editor.path().is_file());
    }

    #[test]
    fn test_rejected_device_keeps_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = editor_in(&temp_dir);

        assert!(editor.add_device("noSlashHere").is_err());
        assert!(editor.settings().nas_devices.is_empty());
        assert!(editor.status().contains("host/share"));
    }

    #[test]
    fn test_eleventh_device_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = editor_in(&temp_dir);
        for i in 0..MAX_NAS_DEVICES {
            editor.add_device(&format!("nas{i}/share")).unwrap();
        }

        let err = editor.add_device("nas10/share").unwrap_err();
        assert!(matches!(err, NasConfigError::Device(_)));
        assert_eq!(editor.settings().nas_devices.len(), MAX_NAS_DEVICES);
    }

    #[test]
    fn test_remove_device() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = editor_in(&temp_dir);
        editor.add_device("a/1").unwrap();
        editor.add_device("b/2").unwrap();

        assert_eq!(editor.remove_device(0).unwrap(), "a/1");
        assert_eq!(editor.status(), "Removed a/1");
        assert!(editor.remove_device(5).is_err());
        assert_eq!(editor.settings().nas_devices, vec!["b/2"]);
    }

    #[test]
    fn test_set_and_get_field() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = editor_in(&temp_dir);

        editor.set_field("min_battery_level", "20").unwrap();
        assert_eq!(editor.get_field("min_battery_level").unwrap(), "20");

        assert!(matches!(
            editor.set_field("min_battery_level", "lots"),
            Err(NasConfigError::InvalidValue { .. })
        ));
        assert_eq!(editor.settings().min_battery_level, 20);

        assert!(matches!(
            editor.get_field("nope"),
            Err(NasConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_save_failure_reports_os_error() {
        let temp_dir = TempDir::new().unwrap();
        // Target is a directory, so opening it for writing fails
        let target = temp_dir.path().join("config.conf");
        fs::create_dir(&target).unwrap();

        let mut editor = Editor::open(&target);
        let before = editor.settings().clone();
        assert!(editor.save().is_err());
        assert!(editor.status().starts_with("Failed to save configuration: "));
        assert_eq!(editor.settings(), &before);
    }

    #[test]
    fn test_restart_failure_is_status_only() {
        let temp_dir = TempDir::new().unwrap();
        let mut editor = editor_in(&temp_dir);
        let controller = ServiceController::default().with_program("no-such-service-manager");

        assert!(!editor.restart_service(&controller));
        assert_eq!(editor.status(), "Failed to restart service");
    }
}
