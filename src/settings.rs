//! Desktop icon theme settings
//!
//! Reads the icon theme name the user configured for GTK, from the same files
//! GTK itself reads:
//! - GTK 3 and 4: `gtk-icon-theme-name` in the `[Settings]` group of
//!   `$XDG_CONFIG_HOME/gtk-{4,3}.0/settings.ini`, then the same file under each
//!   `$XDG_CONFIG_DIRS` entry. The first value found wins.
//! - GTK 2: `gtk-icon-theme-name = "Name"` in the gtkrc files, i.e. the entries
//!   of `$GTK2_RC_FILES` or else `/etc/gtk-2.0/gtkrc` and `~/.gtkrc-2.0`. Later
//!   files override earlier ones.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{IconPathError, IconPathResult};
use crate::keyfile::KeyFile;
use crate::xdg::BaseDirectories;

pub const ICON_THEME_KEY: &str = "gtk-icon-theme-name";
pub const GTK3_DEFAULT_THEME: &str = "Adwaita";
pub const GTK2_DEFAULT_THEME: &str = "hicolor";

const SETTINGS_GROUP: &str = "Settings";
const GTK3_SETTINGS_DIRS: &[&str] = &["gtk-4.0", "gtk-3.0"];
const GTK2_SYSTEM_RC: &str = "/etc/gtk-2.0/gtkrc";

/// Gets the `settings.ini` files GTK 3 reads, highest priority first.
pub fn gtk3_settings_files(dirs: &BaseDirectories) -> Vec<PathBuf> {
    dirs.all_config_dirs()
        .flat_map(|config| {
            GTK3_SETTINGS_DIRS
                .iter()
                .map(move |version| config.join(version).join("settings.ini"))
        })
        .collect()
}

/// Gets the gtkrc files GTK 2 reads, lowest priority first.
pub fn gtk2_rc_files(dirs: &BaseDirectories, rc_files_var: Option<&OsStr>) -> Vec<PathBuf> {
    match rc_files_var.filter(|v| !v.is_empty()) {
        Some(list) => std::env::split_paths(list)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        None => vec![PathBuf::from(GTK2_SYSTEM_RC), dirs.home.join(".gtkrc-2.0")],
    }
}

/// Resolves the GTK 3 icon theme name, falling back to `Adwaita`.
pub fn gtk3_icon_theme_name(files: &[PathBuf]) -> IconPathResult<String> {
    for file in files {
        let Some(content) = read_optional(file)? else {
            continue;
        };
        let settings = match KeyFile::parse(&content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring {}: {}", file.display(), e);
                continue;
            }
        };
        if let Some(name) = settings
            .get(SETTINGS_GROUP, ICON_THEME_KEY)
            .filter(|n| !n.is_empty())
        {
            debug!("Icon theme {} from {}", name, file.display());
            return Ok(name.to_string());
        }
    }

    Ok(GTK3_DEFAULT_THEME.to_string())
}

/// Resolves the GTK 2 icon theme name, falling back to `hicolor`.
pub fn gtk2_icon_theme_name(files: &[PathBuf]) -> IconPathResult<String> {
    let mut theme = None;

    for file in files {
        let Some(content) = read_optional(file)? else {
            continue;
        };
        if let Some(name) = parse_gtkrc_theme(&content) {
            debug!("Icon theme {} from {}", name, file.display());
            theme = Some(name);
        }
    }

    Ok(theme.unwrap_or_else(|| GTK2_DEFAULT_THEME.to_string()))
}

/// Extracts the last `gtk-icon-theme-name` assignment from gtkrc content.
pub fn parse_gtkrc_theme(content: &str) -> Option<String> {
    let mut theme = None;

    for line in content.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(ICON_THEME_KEY) else {
            continue;
        };
        let Some(value) = rest.trim_start().strip_prefix('=') else {
            continue;
        };

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.split_once('"'))
            .map(|(quoted, _)| quoted)
            .unwrap_or(value);

        if !value.is_empty() {
            theme = Some(value.to_string());
        }
    }

    theme
}

/// Whether any of the files exists.
pub fn any_exists(files: &[PathBuf]) -> bool {
    files.iter().any(|f| f.is_file())
}

fn read_optional(path: &Path) -> IconPathResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => Ok(None),
        Err(e) => Err(IconPathError::io(path.display(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gtkrc_quoted_and_bare_values() {
        assert_eq!(parse_gtkrc_theme("gtk-icon-theme-name = \"Papirus\"\n").as_deref(), Some("Papirus"));
        assert_eq!(parse_gtkrc_theme("gtk-icon-theme-name=Breeze\n").as_deref(), Some("Breeze"));
        assert_eq!(
            parse_gtkrc_theme("gtk-icon-theme-name=\"A\"\n# c\ngtk-icon-theme-name = \"B\" # trailing\n").as_deref(),
            Some("B")
        );
        assert_eq!(parse_gtkrc_theme("gtk-icon-theme-name-extra = \"X\"\n"), None);
        assert_eq!(parse_gtkrc_theme("gtk-theme-name = \"Adwaita\"\n"), None);
    }

    #[test]
    fn gtk2_rc_files_var_overrides_defaults() {
        let dirs = BaseDirectories::from_lookup(|k| (k == "HOME").then(|| "/home/bob".into()));
        assert_eq!(
            gtk2_rc_files(&dirs, None),
            vec![PathBuf::from("/etc/gtk-2.0/gtkrc"), PathBuf::from("/home/bob/.gtkrc-2.0")]
        );
        assert_eq!(
            gtk2_rc_files(&dirs, Some(OsStr::new("/a/gtkrc::/b/gtkrc"))),
            vec![PathBuf::from("/a/gtkrc"), PathBuf::from("/b/gtkrc")]
        );
    }

    #[test]
    fn malformed_settings_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.ini");
        let good = dir.path().join("good.ini");
        std::fs::write(&broken, "[Settings\ngtk-icon-theme-name=Broken\n").unwrap();
        std::fs::write(&good, "[Settings]\ngtk-icon-theme-name=Papirus\n").unwrap();

        assert_eq!(gtk3_icon_theme_name(&[broken.clone(), good]).unwrap(), "Papirus");
        assert_eq!(gtk3_icon_theme_name(&[broken]).unwrap(), GTK3_DEFAULT_THEME);
    }

    #[test]
    fn gtk3_settings_search_order() {
        let dirs = BaseDirectories::from_lookup(|k| (k == "HOME").then(|| "/home/bob".into()));
        assert_eq!(
            gtk3_settings_files(&dirs),
            vec![
                PathBuf::from("/home/bob/.config/gtk-4.0/settings.ini"),
                PathBuf::from("/home/bob/.config/gtk-3.0/settings.ini"),
                PathBuf::from("/etc/xdg/gtk-4.0/settings.ini"),
                PathBuf::from("/etc/xdg/gtk-3.0/settings.ini"),
            ]
        );
    }
}
