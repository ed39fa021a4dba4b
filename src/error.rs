use std::fmt;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    NotDirectory,
    InvalidArg,
    InvalidData,
    NotSupported,
    BrokenPipe,
    Interrupted,
    UnexpectedEof,
    Failed,
}

#[derive(Debug)]
pub struct IconPathError {
    kind: ErrorKind,
    message: String,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl IconPathError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(source),
        }
    }

    /// Wraps an I/O error with the path or operation it came from.
    pub fn io(context: impl fmt::Display, err: io::Error) -> Self {
        let kind = ErrorKind::from(err.kind());
        Self::with_source(kind, format!("{}: {}", context, err), Box::new(err))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for IconPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for IconPathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref().map(|e| e as &dyn std::error::Error)
    }
}

impl From<io::ErrorKind> for ErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => ErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            io::ErrorKind::NotADirectory => ErrorKind::NotDirectory,
            io::ErrorKind::BrokenPipe => ErrorKind::BrokenPipe,
            io::ErrorKind::InvalidInput => ErrorKind::InvalidArg,
            io::ErrorKind::InvalidData => ErrorKind::InvalidData,
            io::ErrorKind::Interrupted => ErrorKind::Interrupted,
            io::ErrorKind::Unsupported => ErrorKind::NotSupported,
            io::ErrorKind::UnexpectedEof => ErrorKind::UnexpectedEof,
            _ => ErrorKind::Failed,
        }
    }
}

impl From<io::Error> for IconPathError {
    fn from(err: io::Error) -> Self {
        let kind = ErrorKind::from(err.kind());
        Self::with_source(kind, err.to_string(), Box::new(err))
    }
}

pub type IconPathResult<T> = Result<T, IconPathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_kind() {
        let err: IconPathError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
        assert!(std::error::Error::source(&err).is_some());

        let err = IconPathError::io("/usr/share/icons", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(err.message().starts_with("/usr/share/icons: "));
    }
}
