// Shared fixture: a small desktop data tree with icon themes and a MIME database
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use icon_path::BaseDirectories;
use tempfile::TempDir;

const HICOLOR_INDEX: &str = "\
[Icon Theme]
Name=Hicolor
Directories=16x16/mimetypes,48x48/mimetypes,scalable/mimetypes

[16x16/mimetypes]
Size=16

[48x48/mimetypes]
Size=48

[scalable/mimetypes]
Size=16
MinSize=16
MaxSize=512
Type=Scalable
";

const CHILD_INDEX: &str = "\
[Icon Theme]
Name=Child
Inherits=Parent
Directories=32x32/mimetypes
ScaledDirectories=32x32@2/mimetypes

[32x32/mimetypes]
Size=32
Type=Fixed

[32x32@2/mimetypes]
Size=32
Scale=2
Type=Fixed
";

// Inherits back from Child to check that cycles terminate
const PARENT_INDEX: &str = "\
[Icon Theme]
Name=Parent
Inherits=Child,hicolor
Directories=24x24/mimetypes

[24x24/mimetypes]
Size=24
Type=Fixed
";

pub struct DesktopFixture {
    root: TempDir,
}

impl DesktopFixture {
    pub fn new() -> Self {
        let fixture = Self {
            root: tempfile::tempdir().expect("Failed to create temp dir"),
        };

        fixture.write("data/icons/hicolor/index.theme", HICOLOR_INDEX);
        for icon in [
            "16x16/mimetypes/text-plain.png",
            "16x16/mimetypes/text-html.png",
            "16x16/mimetypes/text-html.svg",
            "48x48/mimetypes/text-plain.png",
            "48x48/mimetypes/image-x-generic.png",
            "48x48/mimetypes/x-office-document.png",
            "scalable/mimetypes/text-plain.svg",
            "scalable/mimetypes/application-pdf.svg",
        ] {
            fixture.write(&format!("data/icons/hicolor/{}", icon), "icon");
        }

        fixture.write("data/icons/Child/index.theme", CHILD_INDEX);
        fixture.write("data/icons/Child/32x32/mimetypes/text-x-generic.png", "icon");
        fixture.write("data/icons/Parent/index.theme", PARENT_INDEX);
        fixture.write("data/icons/Parent/24x24/mimetypes/audio-x-generic.png", "icon");

        fixture.write("data/pixmaps/legacy-icon.xpm", "icon");

        fixture.write(
            "data/mime/aliases",
            "application/x-pdf application/pdf\ntext/x-python3 text/x-python\n",
        );
        fixture.write(
            "data/mime/icons",
            "# icons\napplication/x-special:special-icon\ntext/x-python:text-x-python\n",
        );
        fixture.write(
            "data/mime/generic-icons",
            "application/pdf:x-office-document\ntext/x-python:text-x-script\n",
        );

        fixture
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture dir");
        }
        std::fs::write(&path, content).expect("Failed to write fixture file");
    }

    pub fn data_dir(&self) -> PathBuf {
        self.path("data")
    }

    pub fn search_path(&self) -> Vec<PathBuf> {
        vec![self.path("data/icons"), self.path("data/pixmaps")]
    }

    /// Points GTK 3 settings at `theme`.
    pub fn set_gtk3_theme(&self, theme: &str) {
        self.write(
            "config/gtk-3.0/settings.ini",
            &format!("[Settings]\ngtk-icon-theme-name={}\n", theme),
        );
    }

    /// Environment a process should see to read only this fixture.
    pub fn env(&self) -> Vec<(&'static str, PathBuf)> {
        vec![
            ("HOME", self.path("home")),
            ("XDG_DATA_HOME", self.path("home/.local/share")),
            ("XDG_DATA_DIRS", self.data_dir()),
            ("XDG_CONFIG_HOME", self.path("config")),
            ("XDG_CONFIG_DIRS", self.path("etc-xdg")),
            ("GTK2_RC_FILES", self.path("gtkrc")),
        ]
    }

    pub fn base_dirs(&self) -> BaseDirectories {
        let env = self.env();
        BaseDirectories::from_lookup(|key| {
            env.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone().into_os_string())
        })
    }
}
