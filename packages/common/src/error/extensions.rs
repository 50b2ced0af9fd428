//! Extension traits for converting foreign failures into [`Error`]

use super::types::{Error, ErrorKind, Result};
use std::fmt;

/// Wrap a foreign error as the cause of a jwtkit [`Error`]
pub trait ResultExt<T> {
    /// Wrap the error under `kind`
    fn wrap(self, kind: ErrorKind) -> Result<T>;

    /// Wrap the error under `kind` and attach context
    fn wrap_with<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn wrap(self, kind: ErrorKind) -> Result<T> {
        self.map_err(|e| Error::with_source(kind, e))
    }

    fn wrap_with<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T> {
        self.map_err(|e| Error::with_source(kind, e).context(context))
    }
}

/// Turn a missing value into a jwtkit [`Error`]
pub trait OptionExt<T> {
    /// `None` becomes an error of `kind` carrying `context`
    fn ok_or_kind<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_kind<C: fmt::Display>(self, kind: ErrorKind, context: C) -> Result<T> {
        self.ok_or_else(|| Error::new(kind).context(context))
    }
}
