//! Icon theme lookup (freedesktop.org Icon Theme specification)
//!
//! An [`IconTheme`] is built once for a theme name and a search path. Loading
//! parses `index.theme` for the theme and everything it inherits from (ending
//! with `hicolor`), and lists every theme subdirectory once. Lookups after
//! that never touch the filesystem.
//!
//! Selection follows GTK: themes are tried in inheritance order, and within a
//! theme the candidate names in order; for one name the directory whose size
//! is closest to the requested one wins. Icons lying directly in a search path
//! directory (e.g. `/usr/share/pixmaps`) are the last resort.

pub mod index;

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use bitflags::bitflags;
use log::{debug, warn};

use crate::error::{IconPathError, IconPathResult};
use self::index::{ThemeDirectory, ThemeIndex};

/// Theme every other theme implicitly inherits from.
pub const FALLBACK_THEME: &str = "hicolor";

bitflags! {
    /// Lookup options, bit-compatible with GTK's `GtkIconLookupFlags`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct IconLookupFlags: u32 {
        const NO_SVG = 1 << 0;
        const FORCE_SVG = 1 << 1;
        const GENERIC_FALLBACK = 1 << 3;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct IconFormats: u8 {
        const PNG = 1 << 0;
        const SVG = 1 << 1;
        const XPM = 1 << 2;
    }
}

impl IconFormats {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "png" => Some(IconFormats::PNG),
            "svg" => Some(IconFormats::SVG),
            "xpm" => Some(IconFormats::XPM),
            _ => None,
        }
    }

    fn extension(self) -> &'static str {
        if self == IconFormats::SVG {
            "svg"
        } else if self == IconFormats::XPM {
            "xpm"
        } else {
            "png"
        }
    }

    /// Picks the preferred single format present in this set.
    fn best(self, flags: IconLookupFlags) -> Option<Self> {
        let order = if flags.contains(IconLookupFlags::FORCE_SVG) {
            [IconFormats::SVG, IconFormats::PNG, IconFormats::XPM]
        } else {
            [IconFormats::PNG, IconFormats::SVG, IconFormats::XPM]
        };

        order
            .into_iter()
            .filter(|f| !(flags.contains(IconLookupFlags::NO_SVG) && *f == IconFormats::SVG))
            .find(|f| self.contains(*f))
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconInfo {
    filename: PathBuf,
    base_size: Option<i32>,
}

impl IconInfo {
    /// Absolute path of the icon file.
    pub fn get_filename(&self) -> &Path {
        &self.filename
    }

    pub fn into_filename(self) -> PathBuf {
        self.filename
    }

    /// Nominal size of the theme directory the icon came from. `None` for
    /// icons found outside any theme.
    pub fn get_base_size(&self) -> Option<i32> {
        self.base_size
    }

    pub fn is_svg(&self) -> bool {
        self.filename.extension().is_some_and(|ext| ext == "svg")
    }
}

/// A theme subdirectory as found under one search path entry.
#[derive(Debug)]
struct LoadedDirectory {
    entry: ThemeDirectory,
    path: PathBuf,
    icons: HashMap<String, IconFormats>,
}

#[derive(Debug)]
struct LoadedTheme {
    index: ThemeIndex,
    directories: Vec<LoadedDirectory>,
}

impl LoadedTheme {
    fn lookup(&self, name: &str, size: i32, flags: IconLookupFlags) -> Option<IconInfo> {
        let mut best: Option<(i32, &LoadedDirectory, IconFormats)> = None;

        for dir in &self.directories {
            let Some(format) = dir.icons.get(name).and_then(|f| f.best(flags)) else {
                continue;
            };
            let distance = dir.entry.size_distance(size, 1);
            if best.map_or(true, |(d, _, _)| distance < d) {
                best = Some((distance, dir, format));
            }
            if distance == 0 {
                break;
            }
        }

        best.map(|(_, dir, format)| IconInfo {
            filename: dir.path.join(format!("{}.{}", name, format.extension())),
            base_size: Some(dir.entry.size),
        })
    }
}

/// The icons of one theme and its ancestors, resolved against a search path.
#[derive(Debug)]
pub struct IconTheme {
    name: String,
    search_path: Vec<PathBuf>,
    themes: Vec<LoadedTheme>,
    unthemed: HashMap<String, (PathBuf, IconFormats)>,
}

impl IconTheme {
    /// Loads `name` and its inherited themes from the search path.
    ///
    /// A theme that is not installed is not an error; lookups then fall
    /// through to its parents, `hicolor`, and unthemed icons.
    pub fn load(name: &str, search_path: Vec<PathBuf>) -> IconPathResult<Self> {
        let mut theme = Self {
            name: name.to_string(),
            search_path,
            themes: Vec::new(),
            unthemed: HashMap::new(),
        };

        let mut visited = HashSet::new();
        theme.load_chain(name, &mut visited)?;
        if !visited.contains(FALLBACK_THEME) {
            theme.load_chain(FALLBACK_THEME, &mut visited)?;
        }
        theme.load_unthemed()?;

        debug!(
            "Loaded icon theme {} (chain: {:?})",
            theme.name,
            theme.theme_chain()
        );

        Ok(theme)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the themes consulted, in lookup order.
    pub fn theme_chain(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.index.name.as_str()).collect()
    }

    /// Chooses the best icon among `icon_names`, tried in order.
    ///
    /// `size` is the desired pixel size; -1 asks for no particular size, which
    /// ends up preferring the smallest directory as GTK does.
    pub fn choose_icon<S: AsRef<str>>(
        &self,
        icon_names: &[S],
        size: i32,
        flags: IconLookupFlags,
    ) -> Option<IconInfo> {
        let names = candidate_names(icon_names, flags);

        for theme in &self.themes {
            for name in &names {
                if let Some(info) = theme.lookup(name, size, flags) {
                    return Some(info);
                }
            }
        }

        names.iter().find_map(|name| {
            let (dir, formats) = self.unthemed.get(name.as_str())?;
            let format = formats.best(flags)?;
            Some(IconInfo {
                filename: dir.join(format!("{}.{}", name, format.extension())),
                base_size: None,
            })
        })
    }

    pub fn lookup_icon(&self, icon_name: &str, size: i32, flags: IconLookupFlags) -> Option<IconInfo> {
        self.choose_icon(&[icon_name], size, flags)
    }

    pub fn has_icon(&self, icon_name: &str) -> bool {
        self.lookup_icon(icon_name, -1, IconLookupFlags::empty()).is_some()
    }

    fn load_chain(&mut self, name: &str, visited: &mut HashSet<String>) -> IconPathResult<()> {
        if name.is_empty() || !visited.insert(name.to_string()) {
            return Ok(());
        }

        let Some(index) = self.read_index(name)? else {
            debug!("Icon theme {} not found in search path", name);
            return Ok(());
        };

        let mut directories = Vec::new();
        for entry in &index.directories {
            for base in &self.search_path {
                let path = base.join(name).join(&entry.path);
                let icons = scan_icon_dir(&path)?;
                if !icons.is_empty() {
                    directories.push(LoadedDirectory {
                        entry: entry.clone(),
                        path,
                        icons,
                    });
                }
            }
        }

        let parents = index.inherits.clone();
        self.themes.push(LoadedTheme { index, directories });

        for parent in parents {
            self.load_chain(&parent, visited)?;
        }

        Ok(())
    }

    fn read_index(&self, name: &str) -> IconPathResult<Option<ThemeIndex>> {
        for base in &self.search_path {
            let path = base.join(name).join("index.theme");
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if is_missing(&e) => continue,
                Err(e) => return Err(IconPathError::io(path.display(), e)),
            };

            match ThemeIndex::parse(name, &content) {
                Some(index) => return Ok(Some(index)),
                None => warn!("{} is not a usable icon theme index, ignoring", path.display()),
            }
        }

        Ok(None)
    }

    fn load_unthemed(&mut self) -> IconPathResult<()> {
        for base in &self.search_path {
            for (name, formats) in scan_icon_dir(base)? {
                self.unthemed.entry(name).or_insert_with(|| (base.clone(), formats));
            }
        }
        Ok(())
    }
}

fn is_missing(err: &io::Error) -> bool {
    matches!(err.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}

/// Lists the icon files of a directory by name. A missing directory is empty.
fn scan_icon_dir(dir: &Path) -> IconPathResult<HashMap<String, IconFormats>> {
    let mut icons: HashMap<String, IconFormats> = HashMap::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if is_missing(&e) => return Ok(icons),
        Err(e) => return Err(IconPathError::io(dir.display(), e)),
    };

    for entry in entries {
        let entry = entry.map_err(|e| IconPathError::io(dir.display(), e))?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some((stem, ext)) = file_name.rsplit_once('.') else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }
        if let Some(format) = IconFormats::from_extension(ext) {
            icons
                .entry(stem.to_string())
                .or_insert(IconFormats::empty())
                .insert(format);
        }
    }

    Ok(icons)
}

/// Drops empty names and, with `GENERIC_FALLBACK`, adds every dash-truncated
/// prefix after each name ("text-x-python" -> "text-x" -> "text").
fn candidate_names<S: AsRef<str>>(icon_names: &[S], flags: IconLookupFlags) -> Vec<String> {
    fn push(names: &mut Vec<String>, name: &str) {
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    let mut names = Vec::new();
    for name in icon_names {
        let mut current = name.as_ref();
        push(&mut names, current);
        if flags.contains(IconLookupFlags::GENERIC_FALLBACK) {
            while let Some((prefix, _)) = current.rsplit_once('-') {
                push(&mut names, prefix);
                current = prefix;
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_fallback_expands_prefixes() {
        let names = candidate_names(&["text-x-python", "text-x-generic"], IconLookupFlags::GENERIC_FALLBACK);
        assert_eq!(names, vec!["text-x-python", "text-x", "text", "text-x-generic"]);
    }

    #[test]
    fn empty_names_are_dropped() {
        let names = candidate_names(&["", "-x-generic"], IconLookupFlags::GENERIC_FALLBACK);
        assert_eq!(names, vec!["-x-generic", "-x"]);
        assert!(candidate_names(&[""], IconLookupFlags::empty()).is_empty());
    }

    #[test]
    fn format_preference() {
        let all = IconFormats::PNG | IconFormats::SVG | IconFormats::XPM;
        assert_eq!(all.best(IconLookupFlags::empty()), Some(IconFormats::PNG));
        assert_eq!(all.best(IconLookupFlags::FORCE_SVG), Some(IconFormats::SVG));
        assert_eq!(IconFormats::SVG.best(IconLookupFlags::NO_SVG), None);
        assert_eq!(
            (IconFormats::SVG | IconFormats::XPM).best(IconLookupFlags::NO_SVG),
            Some(IconFormats::XPM)
        );
    }
}
