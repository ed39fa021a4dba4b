//! XDG base directories
//!
//! Resolves the data and config directories from the XDG Base Directory
//! specification. Relative values in the environment are ignored, matching GLib.
//! `directories::BaseDirs` is used only when `$HOME` is unset.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use directories::BaseDirs;

const DEFAULT_DATA_DIRS: &[&str] = &["/usr/local/share", "/usr/share"];
const DEFAULT_CONFIG_DIRS: &[&str] = &["/etc/xdg"];

/// Snapshot of the XDG directories a desktop backend reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirectories {
    pub home: PathBuf,
    pub data_home: PathBuf,
    pub data_dirs: Vec<PathBuf>,
    pub config_home: PathBuf,
    pub config_dirs: Vec<PathBuf>,
}

impl BaseDirectories {
    /// Reads the directories from the process environment. Values need not be
    /// UTF-8.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds the directories from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let home = lookup("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .or_else(|| BaseDirs::new().map(|d| d.home_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("/"));

        let data_home = absolute_var(&lookup, "XDG_DATA_HOME")
            .unwrap_or_else(|| home.join(".local").join("share"));
        let config_home = absolute_var(&lookup, "XDG_CONFIG_HOME")
            .unwrap_or_else(|| home.join(".config"));

        let data_dirs = path_list(&lookup, "XDG_DATA_DIRS", DEFAULT_DATA_DIRS);
        let config_dirs = path_list(&lookup, "XDG_CONFIG_DIRS", DEFAULT_CONFIG_DIRS);

        Self {
            home,
            data_home,
            data_dirs,
            config_home,
            config_dirs,
        }
    }

    /// Data directories in priority order: data home first.
    pub fn all_data_dirs(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.data_home.as_path()).chain(self.data_dirs.iter().map(PathBuf::as_path))
    }

    /// Config directories in priority order: config home first.
    pub fn all_config_dirs(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.config_home.as_path()).chain(self.config_dirs.iter().map(PathBuf::as_path))
    }
}

fn absolute_var<F>(lookup: &F, key: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    lookup(key).map(PathBuf::from).filter(|p| p.is_absolute())
}

fn path_list<F>(lookup: &F, key: &str, defaults: &[&str]) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let dirs: Vec<PathBuf> = lookup(key)
        .map(|value| {
            std::env::split_paths(&value)
                .filter(|p| p.is_absolute())
                .collect()
        })
        .unwrap_or_default();

    if dirs.is_empty() {
        defaults.iter().map(PathBuf::from).collect()
    } else {
        dirs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn dirs_from(vars: &[(&str, &str)]) -> BaseDirectories {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        BaseDirectories::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_follow_home() {
        let dirs = dirs_from(&[("HOME", "/home/alice")]);
        assert_eq!(dirs.data_home, PathBuf::from("/home/alice/.local/share"));
        assert_eq!(dirs.config_home, PathBuf::from("/home/alice/.config"));
        assert_eq!(dirs.data_dirs, vec![PathBuf::from("/usr/local/share"), PathBuf::from("/usr/share")]);
        assert_eq!(dirs.config_dirs, vec![PathBuf::from("/etc/xdg")]);
    }

    #[test]
    fn relative_entries_are_ignored() {
        let dirs = dirs_from(&[
            ("HOME", "/home/alice"),
            ("XDG_DATA_HOME", "relative/share"),
            ("XDG_DATA_DIRS", "/opt/share:relative:/usr/share"),
            ("XDG_CONFIG_DIRS", "nope"),
        ]);
        assert_eq!(dirs.data_home, PathBuf::from("/home/alice/.local/share"));
        assert_eq!(dirs.data_dirs, vec![PathBuf::from("/opt/share"), PathBuf::from("/usr/share")]);
        assert_eq!(dirs.config_dirs, vec![PathBuf::from("/etc/xdg")]);
    }

    #[test]
    fn data_home_comes_first() {
        let dirs = dirs_from(&[("HOME", "/h"), ("XDG_DATA_DIRS", "/a:/b")]);
        let all: Vec<&Path> = dirs.all_data_dirs().collect();
        assert_eq!(all, vec![Path::new("/h/.local/share"), Path::new("/a"), Path::new("/b")]);
    }

    #[test]
    fn non_utf8_values_are_kept() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/opt/sh\xe9re:/usr/share");
        let home = OsStr::from_bytes(b"/home/\xff");
        let dirs = BaseDirectories::from_lookup(|key| match key {
            "HOME" => Some(home.to_os_string()),
            "XDG_DATA_DIRS" => Some(raw.to_os_string()),
            _ => None,
        });

        assert_eq!(dirs.home.as_os_str().as_bytes(), b"/home/\xff");
        assert_eq!(dirs.data_home, Path::new(home).join(".local/share"));
        assert_eq!(
            dirs.data_dirs,
            vec![PathBuf::from(OsStr::from_bytes(b"/opt/sh\xe9re")), PathBuf::from("/usr/share")]
        );
    }
}
