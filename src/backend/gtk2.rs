// GTK 2 era desktop conventions:
// theme name from gtkrc files, ~/.icons searched before the user data dir

use std::ffi::OsStr;
use std::path::PathBuf;

use crate::backend::{DesktopBackend, DesktopData};
use crate::error::IconPathResult;
use crate::icon_theme::IconLookupFlags;
use crate::settings;
use crate::xdg::BaseDirectories;

#[derive(Debug)]
pub struct Gtk2Backend {
    dirs: BaseDirectories,
    rc_files: Vec<PathBuf>,
    data: DesktopData,
}

impl Gtk2Backend {
    /// `rc_files_var` is the value of `$GTK2_RC_FILES`, if set.
    pub fn new(dirs: BaseDirectories, rc_files_var: Option<&OsStr>) -> Self {
        let rc_files = settings::gtk2_rc_files(&dirs, rc_files_var);
        Self {
            dirs,
            rc_files,
            data: DesktopData::default(),
        }
    }

    pub fn search_path(&self) -> Vec<PathBuf> {
        let mut path = vec![self.dirs.home.join(".icons"), self.dirs.data_home.join("icons")];
        path.extend(self.dirs.data_dirs.iter().map(|d| d.join("icons")));
        path.extend(self.dirs.data_dirs.iter().map(|d| d.join("pixmaps")));
        path
    }

    pub fn theme_name(&self) -> IconPathResult<String> {
        settings::gtk2_icon_theme_name(&self.rc_files)
    }
}

impl DesktopBackend for Gtk2Backend {
    fn name(&self) -> &'static str {
        "gtk2"
    }

    /// Needs a gtkrc file besides the icon directories; without one the GTK 3
    /// conventions apply.
    fn is_available(&self) -> bool {
        settings::any_exists(&self.rc_files) && self.search_path().iter().any(|p| p.is_dir())
    }

    fn content_type_to_icon_names(&self, content_type: &str) -> IconPathResult<Vec<String>> {
        let registry = self.data.content_types(&self.dirs)?;
        Ok(registry.get_icon(content_type).into_names())
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
