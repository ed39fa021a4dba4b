// GTK 3 era desktop conventions:
// theme name from settings.ini, user data dir searched before ~/.icons

use std::path::PathBuf;

use crate::backend::{DesktopBackend, DesktopData};
use crate::error::IconPathResult;
use crate::icon_theme::IconLookupFlags;
use crate::settings;
use crate::xdg::BaseDirectories;

#[derive(Debug)]
pub struct Gtk3Backend {
    dirs: BaseDirectories,
    data: DesktopData,
}

impl Gtk3Backend {
    pub fn new(dirs: BaseDirectories) -> Self {
        Self {
            dirs,
            data: DesktopData::default(),
        }
    }

    /// `$XDG_DATA_HOME/icons`, `~/.icons`, then `icons` and `pixmaps` of each
    /// system data dir.
    pub fn search_path(&self) -> Vec<PathBuf> {
        let mut path = vec![self.dirs.data_home.join("icons"), self.dirs.home.join(".icons")];
        path.extend(self.dirs.data_dirs.iter().map(|d| d.join("icons")));
        path.extend(self.dirs.data_dirs.iter().map(|d| d.join("pixmaps")));
        path
    }

    pub fn theme_name(&self) -> IconPathResult<String> {
        settings::gtk3_icon_theme_name(&settings::gtk3_settings_files(&self.dirs))
    }
}

impl DesktopBackend for Gtk3Backend {
    fn name(&self) -> &'static str {
        "gtk3"
    }

    fn is_available(&self) -> bool {
        self.search_path().iter().any(|p| p.is_dir())
    }

    /// GTK 3 themed icons also try the `-symbolic` variant of every name,
    /// after all of the regular names.
    fn content_type_to_icon_names(&self, content_type: &str) -> IconPathResult<Vec<String>> {
        let registry = self.data.content_types(&self.dirs)?;
        Ok(registry
            .get_icon(content_type)
            .with_symbolic_variants()
            .into_names())
    }

    fn resolve_icon(
        &self,
        names: &[String],
        size: i32,
        flags: IconLookupFlags,
    ) -> IconPathResult<Option<PathBuf>> {
        let theme = self.data.theme(self.name(), || self.theme_name(), || self.search_path())?;
        Ok(theme
            .choose_icon(names, size, flags)
            .map(|info| info.into_filename()))
    }
}
