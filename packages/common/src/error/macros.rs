//! Macros for error creation and handling

/// Build an [`Error`](crate::Error) of the named kind with a formatted context
///
/// `err!(malformed_pem, "missing END marker")`
#[macro_export]
macro_rules! err {
    ($kind:ident) => {
        $crate::error::Error::$kind()
    };
    ($kind:ident, $($fmt:tt)+) => {
        $crate::error::Error::$kind().context(format!($($fmt)+))
    };
}

/// Return early with an error built by [`err!`]
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}

/// Bail unless a condition holds
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
