use failure::{Backtrace, Context, Fail};
use std::fmt;
use std::io;
use std::sync::PoisonError;

/// Error Type for the preference stores
#[derive(Debug)]
pub struct PrefError {
    inner: Context<PrefErrorKind>,
}

/// Kinds of possible Errors when talking to a preference store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Fail)]
pub enum PrefErrorKind {
    /// IoError triggered by file I/Os
    #[fail(display = "Io Error")]
    IoError,
    /// Serialization/Deserialization Error triggered by serde
    #[fail(display = "Json parsing error")]
    JsonError,
    /// Error triggered by sled engine
    #[fail(display = "Sled Error")]
    SledError,
    /// A thread panicked while holding the store lock
    #[fail(display = "Store lock poisoned")]
    LockPoisoned,
    /// A textual value could not be parsed into the requested type
    #[fail(display = "Invalid value")]
    InvalidValue,
}

impl PrefError {
    /// get the kind of the error
    pub fn kind(&self) -> PrefErrorKind {
        *self.inner.get_context()
    }
}

impl Fail for PrefError {
    fn cause(&self) -> Option<&dyn Fail> {
        self.inner.cause()
    }

    fn backtrace(&self) -> Option<&Backtrace> {
        self.inner.backtrace()
    }
}

impl fmt::Display for PrefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<PrefErrorKind> for PrefError {
    fn from(kind: PrefErrorKind) -> PrefError {
        PrefError {
            inner: Context::new(kind),
        }
    }
}

impl From<Context<PrefErrorKind>> for PrefError {
    fn from(context: Context<PrefErrorKind>) -> PrefError {
        PrefError { inner: context }
    }
}

impl From<io::Error> for PrefError {
    fn from(error: io::Error) -> PrefError {
        error.context(PrefErrorKind::IoError).into()
    }
}

impl From<serde_json::Error> for PrefError {
    fn from(error: serde_json::Error) -> PrefError {
        error.context(PrefErrorKind::JsonError).into()
    }
}

impl From<sled::Error> for PrefError {
    fn from(error: sled::Error) -> PrefError {
        error.context(PrefErrorKind::SledError).into()
    }
}

// the guard is dropped here, only the fact of poisoning survives
impl<G> From<PoisonError<G>> for PrefError {
    fn from(_: PoisonError<G>) -> PrefError {
        PrefErrorKind::LockPoisoned.into()
    }
}
