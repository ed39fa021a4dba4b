pub mod gtk2;
pub mod gtk3;

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use log::{debug, info};
use once_cell::sync::{Lazy, OnceCell};

use crate::content_type::ContentTypeRegistry;
use crate::error::{ErrorKind, IconPathError, IconPathResult};
use crate::icon_theme::{IconLookupFlags, IconTheme};
use crate::xdg::BaseDirectories;

pub use self::gtk2::Gtk2Backend;
pub use self::gtk3::Gtk3Backend;

/// Environment variable naming the backend to use instead of auto-selection.
pub const BACKEND_ENV: &str = "ICON_PATH_BACKEND";

/// The two desktop capabilities icon resolution needs.
/// A backend wraps one generation of the desktop toolkit's conventions.
pub trait DesktopBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the host has what this backend reads. Checked at selection time.
    fn is_available(&self) -> bool;

    /// Maps a content type to candidate icon names, most specific first.
    fn content_type_to_icon_names(&self, content_type: &str) -> IconPathResult<Vec<String>>;

    /// Lets the default icon theme pick the best of `names`.
    fn resolve_icon(
        &self,
        names: &[String],
        size: i32,
        flags: IconLookupFlags,
    ) -> IconPathResult<Option<PathBuf>>;
}

/// Process-wide desktop data shared by the backends: the MIME database and the
/// default icon theme, each built on first use and never reloaded.
#[derive(Debug, Default)]
pub(crate) struct DesktopData {
    content_types: OnceCell<ContentTypeRegistry>,
    theme: OnceCell<IconTheme>,
}

impl DesktopData {
    pub(crate) fn content_types(&self, dirs: &BaseDirectories) -> IconPathResult<&ContentTypeRegistry> {
        self.content_types
            .get_or_try_init(|| ContentTypeRegistry::load(dirs.all_data_dirs()))
    }

    pub(crate) fn theme<F, P>(&self, backend: &str, theme_name: F, search_path: P) -> IconPathResult<&IconTheme>
    where
        F: FnOnce() -> IconPathResult<String>,
        P: FnOnce() -> Vec<PathBuf>,
    {
        self.theme.get_or_try_init(|| {
            let name = theme_name()?;
            info!("{}: using icon theme {}", backend, name);
            IconTheme::load(&name, search_path())
        })
    }
}

/// Ordered set of backends; earlier entries win auto-selection.
pub struct BackendRegistry {
    backends: Vec<Arc<dyn DesktopBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// GTK 3 first, then GTK 2, both reading the process environment.
    fn with_defaults() -> Self {
        let dirs = BaseDirectories::from_env();
        let rc_files = std::env::var_os("GTK2_RC_FILES");

        let mut registry = Self::new();
        registry.register(Arc::new(Gtk3Backend::new(dirs.clone())));
        registry.register(Arc::new(Gtk2Backend::new(dirs, rc_files.as_deref())));
        registry
    }

    /// Adds a backend. One with the same name is replaced in place.
    pub fn register(&mut self, backend: Arc<dyn DesktopBackend>) {
        match self.backends.iter_mut().find(|b| b.name() == backend.name()) {
            Some(slot) => *slot = backend,
            None => self.backends.push(backend),
        }
    }

    pub fn get_backend(&self, name: &str) -> Option<Arc<dyn DesktopBackend>> {
        self.backends.iter().find(|b| b.name() == name).cloned()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Picks the backend named by `forced`, or else the first available one.
    pub fn select(&self, forced: Option<&str>) -> IconPathResult<Arc<dyn DesktopBackend>> {
        if let Some(name) = forced.filter(|n| !n.is_empty()) {
            let backend = self.get_backend(name).ok_or_else(|| {
                IconPathError::new(
                    ErrorKind::NotSupported,
                    format!("Unknown desktop backend {} (known: {})", name, self.names().join(", ")),
                )
            })?;
            if !backend.is_available() {
                return Err(IconPathError::new(
                    ErrorKind::NotSupported,
                    format!("Desktop backend {} is not available on this system", name),
                ));
            }
            return Ok(backend);
        }

        for backend in &self.backends {
            if backend.is_available() {
                debug!("Selected desktop backend {}", backend.name());
                return Ok(backend.clone());
            }
            debug!("Desktop backend {} is not available", backend.name());
        }

        Err(IconPathError::new(
            ErrorKind::NotSupported,
            "No desktop icon theme integration available",
        ))
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static REGISTRY: Lazy<RwLock<BackendRegistry>> = Lazy::new(|| {
    RwLock::new(BackendRegistry::with_defaults())
});

pub fn register_backend(backend: Arc<dyn DesktopBackend>) {
    let mut registry = REGISTRY.write().unwrap();
    registry.register(backend);
}

pub fn get_backend(name: &str) -> Option<Arc<dyn DesktopBackend>> {
    let registry = REGISTRY.read().unwrap();
    registry.get_backend(name)
}

/// Selects the backend for this process, honouring `ICON_PATH_BACKEND`.
pub fn select_backend() -> IconPathResult<Arc<dyn DesktopBackend>> {
    let forced = std::env::var(BACKEND_ENV).ok();
    let registry = REGISTRY.read().unwrap();
    registry.select(forced.as_deref())
}
