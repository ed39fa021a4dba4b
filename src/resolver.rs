//! Line-oriented content type to icon path resolution.
//!
//! Each input line is one content type; each output line is the icon path for
//! it, or empty when the theme has no icon. Output order follows input order
//! and nothing is retried: the first error ends the stream.

use std::io::{BufRead, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;

use log::trace;

use crate::backend::DesktopBackend;
use crate::error::{ErrorKind, IconPathError, IconPathResult};
use crate::icon_theme::IconLookupFlags;

/// Size hint asking the theme for the icon's natural size.
pub const NATURAL_SIZE: i32 = -1;

pub struct Resolver<'a> {
    backend: &'a dyn DesktopBackend,
}

impl<'a> Resolver<'a> {
    pub fn new(backend: &'a dyn DesktopBackend) -> Self {
        Self { backend }
    }

    /// Resolves a single content type. Surrounding whitespace is ignored.
    pub fn resolve(&self, content_type: &str) -> IconPathResult<Option<PathBuf>> {
        let content_type = content_type.trim();
        let names = self.backend.content_type_to_icon_names(content_type)?;
        let path = self
            .backend
            .resolve_icon(&names, NATURAL_SIZE, IconLookupFlags::empty())?;
        trace!("{:?} -> {:?} -> {:?}", content_type, names, path);
        Ok(path)
    }

    /// Lazily resolves every line of `input`, one output line per input line.
    pub fn resolve_lines<R: BufRead>(&self, input: R) -> ResolvedLines<'_, 'a, R> {
        ResolvedLines {
            resolver: self,
            input,
            buffer: String::new(),
            done: false,
        }
    }

    /// Writes one line per input line to `output`, flushing after each so a
    /// caller reading interactively sees results immediately. Paths are written
    /// as their raw bytes, so names that are not UTF-8 survive unchanged.
    ///
    /// Returns the number of lines written.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> IconPathResult<usize> {
        let mut count = 0;
        for path in self.resolve_lines(input) {
            if let Some(path) = path? {
                output.write_all(path.as_os_str().as_bytes())?;
            }
            output.write_all(b"\n")?;
            output.flush()?;
            count += 1;
        }
        Ok(count)
    }
}

/// Iterator returned by [`Resolver::resolve_lines`]: one item per input line,
/// `None` when no icon was found. Stops after the first error.
pub struct ResolvedLines<'r, 'a, R> {
    resolver: &'r Resolver<'a>,
    input: R,
    buffer: String,
    done: bool,
}

impl<R: BufRead> ResolvedLines<'_, '_, R> {
    fn next_line(&mut self) -> IconPathResult<Option<Option<PathBuf>>> {
        self.buffer.clear();
        let read = self.input.read_line(&mut self.buffer).map_err(|e| {
            if e.kind() == std::io::ErrorKind::InvalidData {
                IconPathError::with_source(ErrorKind::InvalidData, "Input is not valid UTF-8", Box::new(e))
            } else {
                IconPathError::io("stdin", e)
            }
        })?;
        if read == 0 {
            return Ok(None);
        }

        self.resolver.resolve(&self.buffer).map(Some)
    }
}

impl<R: BufRead> Iterator for ResolvedLines<'_, '_, R> {
    type Item = IconPathResult<Option<PathBuf>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_line() {
            Ok(Some(path)) => Some(Ok(path)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
