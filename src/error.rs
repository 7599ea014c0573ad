use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nas-config
#[derive(Error, Debug)]
pub enum NasConfigError {
    #[error("Config error: {0}\n\nTroubleshooting:\n- Check config file: ~/.config/nas-monitor/config.conf\n- Run `nas-config show` to see the values currently in effect\n- Run with RUST_LOG=debug for more details")]
    Config(String),

    #[error("Failed to save configuration: {source}\n\nTroubleshooting:\n- Check that {path} is writable\n- Check ownership of ~/.config/nas-monitor")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Device error: {0}")]
    Device(#[from] DeviceError),

    #[error("Unknown setting '{0}'\n\nKnown settings: home_networks, home_ac_interval, home_battery_interval, away_ac_interval, away_battery_interval, max_failed_attempts, min_battery_level, enable_notifications")]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("Service error: {0}\n\nTroubleshooting:\n- Is the unit installed? Check: systemctl --user status nas-monitor.service\n- Reload units after installing: systemctl --user daemon-reload")]
    Service(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device list edit rejections
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeviceError {
    #[error("device entry is empty")]
    Empty,

    #[error("'{0}' is not in host/share format")]
    MissingSeparator(String),

    #[error("{0:?} can't be stored as a device line (no line breaks or '=', no leading '#', '[' or whitespace, no trailing whitespace)")]
    NotStorable(String),

    #[error("device list is full ({0} entries maximum)")]
    CapacityReached(usize),

    #[error("no device at position {index} (list has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, NasConfigError>;
