//! Content type registry backed by the shared-mime-info database.
//!
//! Reads the `aliases`, `icons` and `generic-icons` files from every
//! `<data dir>/mime/` directory. Directories earlier in the list take
//! precedence, so a definition in `$XDG_DATA_HOME/mime` shadows the system one.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use log::debug;

use crate::error::{IconPathError, IconPathResult};
use crate::themed_icon::ThemedIcon;

const GENERIC_SUFFIX: &str = "-x-generic";

#[derive(Debug, Clone, Default)]
pub struct ContentTypeRegistry {
    aliases: HashMap<String, String>,
    icons: HashMap<String, String>,
    generic_icons: HashMap<String, String>,
}

impl ContentTypeRegistry {
    /// Creates an empty registry. Every lookup falls back to the names derived
    /// from the content type itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the MIME database from `<dir>/mime` for each data directory, in
    /// priority order.
    pub fn load<'a, I>(data_dirs: I) -> IconPathResult<Self>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        let mut registry = Self::new();

        for data_dir in data_dirs {
            let mime_dir = data_dir.join("mime");
            if let Some(content) = read_optional(&mime_dir.join("aliases"))? {
                merge_entries(&mut registry.aliases, parse_aliases(&content));
            }
            if let Some(content) = read_optional(&mime_dir.join("icons"))? {
                merge_entries(&mut registry.icons, parse_icon_list(&content));
            }
            if let Some(content) = read_optional(&mime_dir.join("generic-icons"))? {
                merge_entries(&mut registry.generic_icons, parse_icon_list(&content));
            }
        }

        debug!(
            "Loaded MIME database: {} aliases, {} icons, {} generic icons",
            registry.aliases.len(),
            registry.icons.len(),
            registry.generic_icons.len()
        );

        Ok(registry)
    }

    /// Returns the canonical content type for an alias, or the type itself.
    pub fn unalias<'a>(&'a self, content_type: &'a str) -> &'a str {
        self.aliases
            .get(content_type)
            .map(String::as_str)
            .unwrap_or(content_type)
    }

    /// Gets the generic icon name for a content type.
    ///
    /// Uses the `generic-icons` entry when there is one, otherwise derives
    /// `<media>-x-generic` from the part before the first `/`.
    pub fn get_generic_icon_name(&self, content_type: &str) -> String {
        if let Some(icon) = self.generic_icons.get(self.unalias(content_type)) {
            return icon.clone();
        }

        let media = content_type
            .split_once('/')
            .map(|(media, _)| media)
            .unwrap_or(content_type);
        format!("{}{}", media, GENERIC_SUFFIX)
    }

    /// Gets the icon for a content type.
    ///
    /// Candidates, most specific first: the database's own icon for the type,
    /// the type with `/` replaced by `-` (e.g. "text/plain" -> "text-plain"),
    /// then the generic icon name.
    pub fn get_icon(&self, content_type: &str) -> ThemedIcon {
        let mut names = Vec::with_capacity(3);

        if let Some(icon) = self.icons.get(self.unalias(content_type)) {
            names.push(icon.clone());
        }
        names.push(content_type.replace('/', "-"));
        names.push(self.get_generic_icon_name(content_type));

        ThemedIcon::from_names(names)
    }

    /// Gets the symbolic icon for a content type. The `-symbolic` names come
    /// first, followed by the regular candidates.
    pub fn get_symbolic_icon(&self, content_type: &str) -> ThemedIcon {
        self.get_icon(content_type).to_symbolic()
    }
}

fn read_optional(path: &Path) -> IconPathResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(IconPathError::io(path.display(), e)),
    }
}

fn merge_entries(target: &mut HashMap<String, String>, entries: Vec<(String, String)>) {
    for (key, value) in entries {
        target.entry(key).or_insert(value);
    }
}

fn data_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Parses an `aliases` file: `alias canonical` per line.
fn parse_aliases(content: &str) -> Vec<(String, String)> {
    data_lines(content)
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(alias), Some(canonical), None) => Some((alias.to_string(), canonical.to_string())),
                _ => {
                    debug!("Skipping malformed alias line: {}", line);
                    None
                }
            }
        })
        .collect()
}

/// Parses an `icons` or `generic-icons` file: `type:icon-name` per line.
fn parse_icon_list(content: &str) -> Vec<(String, String)> {
    data_lines(content)
        .filter_map(|line| match line.split_once(':') {
            Some((mime, icon)) if !mime.is_empty() && !icon.is_empty() => {
                Some((mime.to_string(), icon.to_string()))
            }
            _ => {
                debug!("Skipping malformed icon line: {}", line);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_icon_lists() {
        let entries = parse_icon_list("# comment\napplication/x-foo:foo-icon\nbroken\n:empty\ntext/x-bar:\n");
        assert_eq!(entries, vec![("application/x-foo".to_string(), "foo-icon".to_string())]);
    }

    #[test]
    fn parses_aliases() {
        let entries = parse_aliases("text/x-c text/x-csrc\nonly-one\na b c\n");
        assert_eq!(entries, vec![("text/x-c".to_string(), "text/x-csrc".to_string())]);
    }

    #[test]
    fn empty_registry_derives_names() {
        let registry = ContentTypeRegistry::new();
        assert_eq!(registry.get_icon("text/plain").get_names(), ["text-plain", "text-x-generic"]);
        assert_eq!(registry.get_icon("").get_names(), ["", "-x-generic"]);
        assert_eq!(registry.get_icon("nonsense").get_names(), ["nonsense", "nonsense-x-generic"]);
    }

    #[test]
    fn symbolic_names_come_first() {
        let registry = ContentTypeRegistry::new();
        assert_eq!(
            registry.get_symbolic_icon("image/png").get_names(),
            ["image-png-symbolic", "image-x-generic-symbolic", "image-png", "image-x-generic"]
        );
    }
}
