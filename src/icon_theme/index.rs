// Icon theme index parsing
// Implements the index.theme part of the freedesktop.org icon theme specification

use log::warn;

use crate::keyfile::KeyFile;

const THEME_GROUP: &str = "Icon Theme";
const DEFAULT_THRESHOLD: i32 = 2;
/// Largest size or threshold accepted from an index; bigger values are bogus.
const MAX_ICON_SIZE: i32 = 1 << 16;
const MAX_SCALE: i32 = 16;

/// How a theme directory's icons may be scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryType {
    Fixed,
    Scalable,
    Threshold,
}

impl DirectoryType {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("Fixed") => DirectoryType::Fixed,
            Some("Scalable") => DirectoryType::Scalable,
            _ => DirectoryType::Threshold,
        }
    }
}

/// One subdirectory entry of an icon theme, e.g. `16x16/mimetypes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDirectory {
    pub path: String,
    pub size: i32,
    pub scale: i32,
    pub kind: DirectoryType,
    pub min_size: i32,
    pub max_size: i32,
    pub threshold: i32,
}

impl ThemeDirectory {
    /// Distance between this directory's icons and the requested size, 0 for a
    /// match. Negative sizes are not special: they sort the smallest directories
    /// first. Computed in 64 bits so no field values can overflow it.
    pub fn size_distance(&self, size: i32, scale: i32) -> i32 {
        let scale = i64::from(scale);
        let dir_scale = i64::from(self.scale);
        let scaled = i64::from(size) * scale;

        let (low, high) = match self.kind {
            DirectoryType::Fixed => {
                let exact = i64::from(self.size) * dir_scale;
                (exact, exact)
            }
            DirectoryType::Scalable => (
                i64::from(self.min_size) * dir_scale,
                i64::from(self.max_size) * dir_scale,
            ),
            DirectoryType::Threshold => (
                (i64::from(self.size) - i64::from(self.threshold)) * dir_scale,
                (i64::from(self.size) + i64::from(self.threshold)) * dir_scale,
            ),
        };

        let distance = if scaled < low {
            low - scaled
        } else if scaled > high {
            scaled - high
        } else {
            0
        };
        i32::try_from(distance).unwrap_or(i32::MAX)
    }
}

/// Parsed `index.theme`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeIndex {
    pub name: String,
    pub display_name: Option<String>,
    pub inherits: Vec<String>,
    pub directories: Vec<ThemeDirectory>,
}

impl ThemeIndex {
    /// Parses an `index.theme` file. Returns `None` when the file is malformed
    /// or the `[Icon Theme]` group is missing, either of which makes it unusable.
    pub fn parse(name: &str, content: &str) -> Option<Self> {
        let file = match KeyFile::parse(content) {
            Ok(file) => file,
            Err(e) => {
                warn!("Icon theme {}: {}", name, e);
                return None;
            }
        };
        if !file.has_group(THEME_GROUP) {
            return None;
        }

        let mut entries = file.get_list(THEME_GROUP, "Directories");
        for scaled in file.get_list(THEME_GROUP, "ScaledDirectories") {
            if !entries.contains(&scaled) {
                entries.push(scaled);
            }
        }

        let directories = entries
            .into_iter()
            .filter_map(|path| parse_directory(&file, name, path))
            .collect();

        Some(Self {
            name: name.to_string(),
            display_name: file.get(THEME_GROUP, "Name").map(str::to_string),
            inherits: file.get_list(THEME_GROUP, "Inherits"),
            directories,
        })
    }
}

fn parse_directory(file: &KeyFile, theme: &str, path: String) -> Option<ThemeDirectory> {
    let Some(size) = file
        .get_int(&path, "Size")
        .filter(|s| (1..=MAX_ICON_SIZE).contains(s))
    else {
        warn!("Icon theme {}: directory {} has no valid Size, skipping", theme, path);
        return None;
    };
    let bounded = |key: &str, default: i32| {
        file.get_int(&path, key)
            .map(|v| v.clamp(0, MAX_ICON_SIZE))
            .unwrap_or(default)
    };

    Some(ThemeDirectory {
        size,
        scale: file
            .get_int(&path, "Scale")
            .filter(|s| (1..=MAX_SCALE).contains(s))
            .unwrap_or(1),
        kind: DirectoryType::parse(file.get(&path, "Type")),
        min_size: bounded("MinSize", size),
        max_size: bounded("MaxSize", size),
        threshold: bounded("Threshold", DEFAULT_THRESHOLD),
        path,
    })
}
