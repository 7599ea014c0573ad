use crate::error::DeviceError;
use serde::{Deserialize, Serialize};

/// Maximum number of NAS devices the monitor watches
pub const MAX_NAS_DEVICES: usize = 10;

/// Separator between host and share in a device entry
pub const DEVICE_SEPARATOR: char = '/';

/// User-configurable values for the NAS monitor
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Comma-separated Wi-Fi network names, kept as one string
    #[serde(default)]
    pub home_networks: String,
    #[serde(default)]
    pub nas_devices: Vec<String>,
    #[serde(default = "default_home_ac_interval")]
    pub home_ac_interval: i32,
    #[serde(default = "default_home_battery_interval")]
    pub home_battery_interval: i32,
    #[serde(default = "default_away_ac_interval")]
    pub away_ac_interval: i32,
    #[serde(default = "default_away_battery_interval")]
    pub away_battery_interval: i32,
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: i32,
    #[serde(default = "default_min_battery_level")]
    pub min_battery_level: i32,
    #[serde(default = "default_true")]
    pub enable_notifications: bool,
}

// Default value functions
const fn default_home_ac_interval() -> i32 {
    15
}
const fn default_home_battery_interval() -> i32 {
    60
}
const fn default_away_ac_interval() -> i32 {
    180
}
const fn default_away_battery_interval() -> i32 {
    600
}
const fn default_max_failed_attempts() -> i32 {
    3
}
const fn default_min_battery_level() -> i32 {
    10
}
const fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home_networks: String::new(),
            nas_devices: Vec::new(),
            home_ac_interval: default_home_ac_interval(),
            home_battery_interval: default_home_battery_interval(),
            away_ac_interval: default_away_ac_interval(),
            away_battery_interval: default_away_battery_interval(),
            max_failed_attempts: default_max_failed_attempts(),
            min_battery_level: default_min_battery_level(),
            enable_notifications: default_true(),
        }
    }
}

impl Settings {
    /// Whether another device entry fits in the list
    #[must_use]
    pub fn has_device_capacity(&self) -> bool {
        self.nas_devices.len() < MAX_NAS_DEVICES
    }

    /// Append a device entry at the end of the list
    ///
    /// # Errors
    /// - `DeviceError::Empty` for an empty entry
    /// - `DeviceError::MissingSeparator` if the entry has no `/`
    /// - `DeviceError::NotStorable` if the entry wouldn't read back as the same device line
    /// - `DeviceError::CapacityReached` if the list already holds `MAX_NAS_DEVICES`
    pub fn add_device(&mut self, device: &str) -> Result<(), DeviceError> {
        if device.is_empty() {
            return Err(DeviceError::Empty);
        }
        if !device.contains(DEVICE_SEPARATOR) {
            return Err(DeviceError::MissingSeparator(device.to_string()));
        }
        if !is_storable_device(device) {
            return Err(DeviceError::NotStorable(device.to_string()));
        }
        if !self.has_device_capacity() {
            return Err(DeviceError::CapacityReached(MAX_NAS_DEVICES));
        }

        self.nas_devices.push(device.to_string());
        Ok(())
    }

    /// Remove the device at `index`, shifting later entries down
    pub fn remove_device(&mut self, index: usize) -> Result<String, DeviceError> {
        if index >= self.nas_devices.len() {
            return Err(DeviceError::IndexOutOfRange {
                index,
                len: self.nas_devices.len(),
            });
        }
        Ok(self.nas_devices.remove(index))
    }

    /// Individual home network names, for display
    pub fn home_network_names(&self) -> impl Iterator<Item = &str> {
        self.home_networks
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Whether `device` survives being written as a bare line and read back
fn is_storable_device(device: &str) -> bool {
    !device.contains(['\n', '\r', '='])
        && !device.starts_with(['#', '[', ' ', '\t'])
        && !device.ends_with(char::is_whitespace)
}
