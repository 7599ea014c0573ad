//! Line-oriented reader and writer for `config.conf`.
//!
//! ```text
//! [networks]
//! home_networks=Office,Home
//!
//! [nas_devices]
//! nas1.local/media
//! ```
//!
//! `key=value` lines are accepted in any section. Bare lines only count as
//! device entries inside `[nas_devices]`.

use crate::config::fields::{self, Section};
use crate::config::schema::{Settings, DEVICE_SEPARATOR};

const FILE_HEADER: &str = "# NAS Monitor Configuration File";

/// Parse config text on top of the default settings
#[must_use]
pub fn parse(content: &str) -> Settings {
    let mut settings = Settings::default();
    let mut section = String::new();

    for line in content.lines() {
        if line.is_empty() || line.starts_with('#') || line.trim_matches([' ', '\t']).is_empty() {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            section = name.to_string();
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim_start_matches([' ', '\t']);
            let value = value.trim_start_matches([' ', '\t']);
            match fields::lookup(key) {
                Some(field) => field.assign_lenient(&mut settings, value),
                None => tracing::debug!("Ignoring unknown key '{key}'"),
            }
        } else if section == Section::NasDevices.name()
            && line.contains(DEVICE_SEPARATOR)
            && settings.has_device_capacity()
        {
            settings.nas_devices.push(line.to_string());
        } else {
            tracing::debug!("Dropping line outside a device block: {line:?}");
        }
    }

    settings
}

/// Render settings in the fixed sectioned layout
#[must_use]
pub fn render(settings: &Settings) -> String {
    let blocks: Vec<String> = Section::ALL
        .iter()
        .map(|&section| render_section(settings, section))
        .collect();

    format!("{FILE_HEADER}\n\n{}", blocks.join("\n"))
}

fn render_section(settings: &Settings, section: Section) -> String {
    let mut out = format!("[{}]\n", section.name());
    if let Some(comment) = section.comment() {
        out.push_str(comment);
        out.push('\n');
    }

    if section == Section::NasDevices {
        for device in &settings.nas_devices {
            out.push_str(device);
            out.push('\n');
        }
    } else {
        for field in fields::in_section(section) {
            out.push_str(&format!("{}={}\n", field.key, field.render(settings)));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::MAX_NAS_DEVICES;

    const EXPECTED_DEFAULT: &str = "\
# NAS Monitor Configuration File

[networks]
# Comma-separated list of home network SSIDs
home_networks=

[nas_devices]
# Format: host/share (one per line)

[intervals]
# Check intervals in seconds
home_ac_interval=15
home_battery_interval=60
away_ac_interval=180
away_battery_interval=600

[behavior]
max_failed_attempts=3
min_battery_level=10
enable_notifications=true
";

    #[test]
    fn test_render_defaults_layout() {
        assert_eq!(render(&Settings::default()), EXPECTED_DEFAULT);
    }

    #[test]
    fn test_render_devices_in_order() {
        let mut settings = Settings::default();
        settings.home_networks = "Office,Home".to_string();
        settings.add_device("b.local/two").unwrap();
        settings.add_device("a.local/one").unwrap();

        let text = render(&settings);
        assert!(text.contains(
            "[nas_devices]\n# Format: host/share (one per line)\nb.local/two\na.local/one\n\n[intervals]"
        ));
        assert!(text.contains("home_networks=Office,Home\n"));
    }

    #[test]
    fn test_parse_sample() {
        let content = "[networks]\nhome_networks=Office,Home\n[nas_devices]\nnas1.local/media\n[intervals]\nhome_ac_interval=20\n[behavior]\nenable_notifications=false";
        let settings = parse(content);

        assert_eq!(settings.home_networks, "Office,Home");
        assert_eq!(settings.nas_devices, vec!["nas1.local/media"]);
        assert_eq!(settings.home_ac_interval, 20);
        assert!(!settings.enable_notifications);

        let defaults = Settings::default();
        assert_eq!(settings.home_battery_interval, defaults.home_battery_interval);
        assert_eq!(settings.away_ac_interval, defaults.away_ac_interval);
        assert_eq!(settings.away_battery_interval, defaults.away_battery_interval);
        assert_eq!(settings.max_failed_attempts, defaults.max_failed_attempts);
        assert_eq!(settings.min_battery_level, defaults.min_battery_level);
    }

    #[test]
    fn test_parse_malformed_integer_is_zero() {
        let settings = parse("[intervals]\nhome_ac_interval=abc\naway_ac_interval=240\n");
        assert_eq!(settings.home_ac_interval, 0);
        assert_eq!(settings.away_ac_interval, 240);
    }

    #[test]
    fn test_parse_trims_leading_whitespace_only() {
        let settings = parse("  home_networks=\t Lab ,Cafe \n\tmin_battery_level= 25\n");
        assert_eq!(settings.home_networks, "Lab ,Cafe ");
        assert_eq!(settings.min_battery_level, 25);
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let settings = parse("home_networks=a=b,c\n");
        assert_eq!(settings.home_networks, "a=b,c");
    }

    #[test]
    fn test_parse_ignores_unknown_keys_and_comments() {
        let settings = parse("# home_ac_interval=99\nunknown=1\nhome_ac_interval=30\n");
        assert_eq!(settings.home_ac_interval, 30);
    }

    #[test]
    fn test_keys_accepted_in_any_section() {
        let settings = parse("[nas_devices]\nmax_failed_attempts=7\n");
        assert_eq!(settings.max_failed_attempts, 7);
        assert!(settings.nas_devices.is_empty());
    }

    #[test]
    fn test_device_lines_outside_section_dropped() {
        let settings = parse("[networks]\nstray.local/share\n[nas_devices]\nnoslash\nkept.local/share\n");
        assert_eq!(settings.nas_devices, vec!["kept.local/share"]);
    }

    #[test]
    fn test_device_lines_beyond_capacity_dropped() {
        let mut content = String::from("[nas_devices]\n");
        for i in 0..MAX_NAS_DEVICES + 3 {
            content.push_str(&format!("nas{i}.local/share\n"));
        }

        let settings = parse(&content);
        assert_eq!(settings.nas_devices.len(), MAX_NAS_DEVICES);
        assert_eq!(settings.nas_devices[0], "nas0.local/share");
        assert_eq!(settings.nas_devices[MAX_NAS_DEVICES - 1], "nas9.local/share");
    }

    #[test]
    fn test_parse_handles_crlf() {
        let settings = parse("[nas_devices]\r\nnas.local/media\r\n[intervals]\r\nhome_ac_interval=45\r\n");
        assert_eq!(settings.nas_devices, vec!["nas.local/media"]);
        assert_eq!(settings.home_ac_interval, 45);
    }

    #[test]
    fn test_render_parse_round_trip() {
        let mut settings = Settings {
            home_networks: "Office,Home".to_string(),
            home_ac_interval: 20,
            home_battery_interval: 90,
            away_ac_interval: 300,
            away_battery_interval: 1200,
            max_failed_attempts: 5,
            min_battery_level: 25,
            enable_notifications: false,
            ..Settings::default()
        };
        settings.add_device("nas1.local/media").unwrap();
        settings.add_device("192.168.1.20/backup").unwrap();

        let text = render(&settings);
        let parsed = parse(&text);
        assert_eq!(parsed, settings);
        assert_eq!(render(&parsed), text);
    }
}
