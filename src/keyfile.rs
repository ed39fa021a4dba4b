//! freedesktop.org key files (`index.theme`, `settings.ini`) on top of `rust-ini`.
//!
//! ```text
//! [Group Name]
//! Key=Value
//! # comment
//! ```

use std::collections::HashMap;

use ini::{Ini, ParseOption};

use crate::error::{ErrorKind, IconPathError, IconPathResult};

#[derive(Debug, Clone, Default)]
pub struct KeyFile {
    groups: HashMap<String, HashMap<String, String>>,
}

impl KeyFile {
    /// Parses key file content. Keys outside any group are ignored, and a
    /// repeated key keeps its last value. Values are taken literally: key
    /// files have no quoting, and backslashes are common in paths.
    pub fn parse(content: &str) -> IconPathResult<Self> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let ini = Ini::load_from_str_opt(content, options).map_err(ini_error)?;
        Ok(Self::from_ini(&ini))
    }

    fn from_ini(ini: &Ini) -> Self {
        let mut groups: HashMap<String, HashMap<String, String>> = HashMap::new();

        for (section, props) in ini.iter() {
            let Some(name) = section else {
                continue;
            };
            let group = groups.entry(name.to_string()).or_default();
            for (key, value) in props.iter() {
                group.insert(key.to_string(), value.to_string());
            }
        }

        Self { groups }
    }

    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups.get(group)?.get(key).map(String::as_str)
    }

    pub fn get_int(&self, group: &str, key: &str) -> Option<i32> {
        self.get(group, key)?.parse().ok()
    }

    /// Reads a comma separated list, dropping empty items.
    pub fn get_list(&self, group: &str, key: &str) -> Vec<String> {
        self.get(group, key)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn ini_error(e: ini::ParseError) -> IconPathError {
    IconPathError::new(ErrorKind::InvalidData, format!("Malformed key file: {}", e))
}
