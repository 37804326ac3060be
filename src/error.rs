//! Error type for driving massdns.

#![warn(missing_docs)]

use std::error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::sync::Arc;

//------------ Error ---------------------------------------------------------

/// Error type for resolution sessions.
///
/// Errors are returned only for conditions that end an operation. A single
/// malformed output line is never an error here; see
/// [`ParseError`][crate::parse::ParseError] for that.
#[derive(Clone, Debug)]
pub enum Error {
    /// No resolvers have been configured for the session.
    ResolversNotSet,

    /// The massdns binary could not be found.
    BinaryNotFound(String),

    /// A path given by the caller does not exist.
    NotFound(PathBuf),

    /// Starting the massdns process failed.
    Launch(Arc<io::Error>),

    /// Reading or writing a file or pipe failed.
    Io(Arc<io::Error>),

    /// The massdns process exited unsuccessfully.
    Subprocess(ExitStatus),
}

impl Error {
    /// Returns whether this is a configuration error.
    ///
    /// Configuration errors are always reported before a process has been
    /// started.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::ResolversNotSet | Error::BinaryNotFound(_))
    }

    pub(crate) fn launch(err: io::Error) -> Self {
        Error::Launch(Arc::new(err))
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(Arc::new(err))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::ResolversNotSet => write!(f, "resolvers not set"),
            Error::BinaryNotFound(name) => {
                write!(f, "massdns binary '{name}' not found")
            }
            Error::NotFound(path) => {
                write!(f, "{}: file not found", path.display())
            }
            Error::Launch(err) => {
                write!(f, "failed to start massdns: {err}")
            }
            Error::Io(err) => write!(f, "{err}"),
            Error::Subprocess(status) => {
                write!(f, "massdns failed: {status}")
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::ResolversNotSet => None,
            Error::BinaryNotFound(_) => None,
            Error::NotFound(_) => None,
            Error::Launch(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Subprocess(_) => None,
        }
    }
}

//============ Tests =========================================================
