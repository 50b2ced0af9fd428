//! Rendering of an error and its cause chain
//!
//! Each level prints on its own line. Nested jwtkit errors contribute only
//! their kind and context, so a chain built by re-contexting a shared error
//! never repeats itself.

use super::types::Error;
use std::error::Error as StdError;
use std::fmt;

impl Error {
    fn write_head(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.context {
            Some(context) => write!(f, "{}: {context}", self.inner.kind),
            None => write!(f, "{}", self.inner.kind),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_head(f)?;

        let mut cause = self.source();
        while let Some(level) = cause {
            f.write_str("\nCaused by: ")?;
            match level.downcast_ref::<Error>() {
                Some(nested) => nested.write_head(f)?,
                None => write!(f, "{level}")?,
            }
            cause = level.source();
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_deref()
            .map(|source| source as &(dyn StdError + 'static))
    }
}
