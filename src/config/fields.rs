//! Declarative table of the scalar settings.
//!
//! Every key/value setting is listed once in [`FIELDS`]. The parser dispatches
//! on it, the writer renders from it, and the CLI `get`/`set` commands look keys
//! up in it. Adding a setting means adding one `field!` line here.

use crate::config::schema::Settings;
use crate::error::{NasConfigError, Result};

/// Bracketed block of the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Networks,
    NasDevices,
    Intervals,
    Behavior,
}

impl Section {
    /// Sections in the order they are written
    pub const ALL: [Self; 4] = [
        Self::Networks,
        Self::NasDevices,
        Self::Intervals,
        Self::Behavior,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Networks => "networks",
            Self::NasDevices => "nas_devices",
            Self::Intervals => "intervals",
            Self::Behavior => "behavior",
        }
    }

    /// Comment line written under the section header
    #[must_use]
    pub const fn comment(self) -> Option<&'static str> {
        match self {
            Self::Networks => Some("# Comma-separated list of home network SSIDs"),
            Self::NasDevices => Some("# Format: host/share (one per line)"),
            Self::Intervals => Some("# Check intervals in seconds"),
            Self::Behavior => None,
        }
    }
}

/// Typed accessors into a `Settings` field
#[derive(Clone, Copy)]
pub enum Slot {
    Text {
        get: fn(&Settings) -> &String,
        get_mut: fn(&mut Settings) -> &mut String,
    },
    /// `min..=max` is enforced for user input only; file values are taken as read
    Int {
        get: fn(&Settings) -> &i32,
        get_mut: fn(&mut Settings) -> &mut i32,
        min: i32,
        max: i32,
    },
    Bool {
        get: fn(&Settings) -> &bool,
        get_mut: fn(&mut Settings) -> &mut bool,
    },
}

/// One scalar setting
#[derive(Clone, Copy)]
pub struct Field {
    pub key: &'static str,
    pub section: Section,
    pub slot: Slot,
}

macro_rules! field {
    ($section:ident, Int, $name:ident, $min:literal, $max:literal) => {
        Field {
            key: stringify!($name),
            section: Section::$section,
            slot: Slot::Int {
                get: |s| &s.$name,
                get_mut: |s| &mut s.$name,
                min: $min,
                max: $max,
            },
        }
    };
    ($section:ident, $kind:ident, $name:ident) => {
        Field {
            key: stringify!($name),
            section: Section::$section,
            slot: Slot::$kind {
                get: |s| &s.$name,
                get_mut: |s| &mut s.$name,
            },
        }
    };
}

/// All scalar settings, in write order
pub const FIELDS: &[Field] = &[
    field!(Networks, Text, home_networks),
    field!(Intervals, Int, home_ac_interval, 5, 3600),
    field!(Intervals, Int, home_battery_interval, 10, 3600),
    field!(Intervals, Int, away_ac_interval, 30, 3600),
    field!(Intervals, Int, away_battery_interval, 60, 3600),
    field!(Behavior, Int, max_failed_attempts, 1, 10),
    field!(Behavior, Int, min_battery_level, 5, 50),
    field!(Behavior, Bool, enable_notifications),
];

/// Look up a field by key name
#[must_use]
pub fn lookup(key: &str) -> Option<&'static Field> {
    FIELDS.iter().find(|f| f.key == key)
}

/// Fields belonging to `section`, in write order
pub fn in_section(section: Section) -> impl Iterator<Item = &'static Field> {
    FIELDS.iter().filter(move |f| f.section == section)
}

impl Field {
    /// Store a value read from the config file, coercing instead of rejecting
    pub fn assign_lenient(&self, settings: &mut Settings, raw: &str) {
        match self.slot {
            Slot::Text { get_mut, .. } => *get_mut(settings) = raw.to_string(),
            Slot::Int { get_mut, .. } => *get_mut(settings) = parse_leading_int(raw),
            Slot::Bool { get_mut, .. } => *get_mut(settings) = raw == "true",
        }
    }

    /// Store a user-supplied value, rejecting anything that doesn't parse
    ///
    /// # Errors
    /// Returns `InvalidValue` for text that wouldn't read back unchanged, integers
    /// that don't parse or fall outside the field's range, and non-boolean flags.
    /// Settings are left untouched on error.
    pub fn assign_strict(&self, settings: &mut Settings, raw: &str) -> Result<()> {
        match self.slot {
            Slot::Text { get_mut, .. } => {
                if raw.contains(['\n', '\r']) {
                    return Err(self.invalid(raw, "a single line of text".to_string()));
                }
                if raw.starts_with([' ', '\t']) {
                    let expected = "text without leading whitespace".to_string();
                    return Err(self.invalid(raw, expected));
                }
                *get_mut(settings) = raw.to_string();
            }
            Slot::Int {
                get_mut, min, max, ..
            } => {
                let expected = || format!("an integer from {min} to {max}");
                let value = raw
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| self.invalid(raw, expected()))?;
                if !(min..=max).contains(&value) {
                    return Err(self.invalid(raw, expected()));
                }
                *get_mut(settings) = value;
            }
            Slot::Bool { get_mut, .. } => {
                let value = match raw.trim() {
                    "true" => true,
                    "false" => false,
                    _ => return Err(self.invalid(raw, "true or false".to_string())),
                };
                *get_mut(settings) = value;
            }
        }
        Ok(())
    }

    /// Value as written to the config file
    #[must_use]
    pub fn render(&self, settings: &Settings) -> String {
        match self.slot {
            Slot::Text { get, .. } => get(settings).clone(),
            Slot::Int { get, .. } => get(settings).to_string(),
            Slot::Bool { get, .. } => get(settings).to_string(),
        }
    }

    fn invalid(&self, raw: &str, expected: String) -> NasConfigError {
        NasConfigError::InvalidValue {
            key: self.key.to_string(),
            value: raw.to_string(),
            expected,
        }
    }
}

/// Leading-digits integer coercion: optional whitespace and sign, then digits.
/// Anything unparsable yields 0; out-of-range values saturate.
#[must_use]
pub fn parse_leading_int(raw: &str) -> i32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative {
        value = -value;
    }

    i32::try_from(value).unwrap_or(if negative { i32::MIN } else { i32::MAX })
}
