//! # icon-path
//!
//! Resolves MIME content types to icon files through the desktop's icon theme,
//! following the freedesktop.org shared-mime-info and Icon Theme specifications
//! the way GIO and GTK do.
//!
//! ## Core Concepts
//!
//! - **ContentTypeRegistry**: the shared-mime-info database; turns a content type
//!   into a `ThemedIcon` (ordered candidate icon names)
//! - **IconTheme**: the configured theme, its ancestors and `hicolor`; picks the
//!   best file for a list of names
//! - **DesktopBackend**: the two capabilities above, as one generation of GTK's
//!   conventions (`gtk3`, `gtk2`) applies them
//! - **Resolver**: the line loop behind the `get-icon-path` binary
//!
//! ## Example
//!
//! ```no_run
//! use icon_path::{select_backend, Resolver};
//!
//! # fn example() -> icon_path::IconPathResult<()> {
//! let backend = select_backend()?;
//! let resolver = Resolver::new(backend.as_ref());
//!
//! match resolver.resolve("text/plain")? {
//!     Some(path) => println!("{}", path.display()),
//!     None => println!(),
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod content_type;
pub mod error;
pub mod icon_theme;
pub mod keyfile;
pub mod resolver;
pub mod settings;
pub mod themed_icon;
pub mod xdg;

pub use backend::{BackendRegistry, DesktopBackend, Gtk2Backend, Gtk3Backend, get_backend, register_backend, select_backend};
pub use content_type::ContentTypeRegistry;
pub use error::{ErrorKind, IconPathError, IconPathResult};
pub use icon_theme::{IconInfo, IconLookupFlags, IconTheme};
pub use resolver::{ResolvedLines, Resolver, NATURAL_SIZE};
pub use themed_icon::ThemedIcon;
pub use xdg::BaseDirectories;
