use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use reader_core::config::{config_root, ReaderSettings};
use tracing::{debug, warn};

use crate::cli::Cli;

pub const CONFIG_FILE: &str = "config.toml";

pub fn default_config_path() -> Option<PathBuf> {
    config_root().map(|dir| dir.join(CONFIG_FILE))
}

/// Reads settings from `explicit`, or from the default config file.
///
/// An explicit path must exist. The default file is optional, and a broken
/// default file only costs a warning.
pub fn load(explicit: Option<&Path>) -> Result<ReaderSettings> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config {}", path.display()))?;
        return toml::from_str(&text)
            .wrap_err_with(|| format!("parsing config {}", path.display()));
    }
    let Some(path) = default_config_path() else {
        return Ok(ReaderSettings::default());
    };
    let Ok(text) = fs::read_to_string(&path) else {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ReaderSettings::default());
    };
    match toml::from_str(&text) {
        Ok(settings) => Ok(settings),
        Err(err) => {
            warn!(path = %path.display(), %err, "invalid config, using defaults");
            Ok(ReaderSettings::default())
        }
    }
}

/// Command-line flags win over the config file.
pub fn apply_cli(settings: &mut ReaderSettings, cli: &Cli) {
    if let Some(marker) = &cli.marker {
        settings.marker_id = marker.clone();
    }
    if !cli.classes.is_empty() {
        settings.class_fallbacks = cli.classes.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn reads_toml_with_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "marker_id = \"content\"\nmargin = 1\n\n[theme]\nname = \"gruvbox\"\nfooter_fg = \"#ff8800\"\n",
        )
        .expect("write");
        let settings = load(Some(&path)).expect("settings");
        assert_eq!(settings.marker_id, "content");
        assert_eq!(settings.margin, 1);
        assert_eq!(settings.theme.name.as_deref(), Some("gruvbox"));
        assert_eq!(settings.theme.footer_fg.as_deref(), Some("#ff8800"));
        assert_eq!(settings.min_content_len, 10);
    }

    #[test]
    fn explicit_config_must_exist_and_parse() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load(Some(&dir.path().join("missing.toml"))).is_err());
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "margin = \"wide\"").expect("write");
        assert!(load(Some(&bad)).is_err());
    }

    #[test]
    fn cli_overrides_marker() {
        let cli = Cli::try_parse_from(["proseview", "--marker", "story", "--class", "body", "a.html"])
            .expect("parse");
        let mut settings = ReaderSettings::default();
        apply_cli(&mut settings, &cli);
        assert_eq!(settings.marker_id, "story");
        assert_eq!(settings.class_fallbacks, ["body"]);
    }
}
