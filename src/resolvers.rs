//! The list of upstream resolvers handed to massdns.
//!
//! massdns reads the resolvers it sends queries to from a file given via
//! its `-r` option. The file either belongs to the user, in which case we
//! only remember its path, or is generated by us from a list of addresses,
//! in which case we own it and remove it again once we are done.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::{debug, warn};

use crate::error::Error;

/// The prefix of the names of generated resolvers files.
const TEMP_PREFIX: &str = "resolvers";

//------------ Resolvers -----------------------------------------------------

/// The source of the resolvers file.
#[derive(Debug)]
pub enum Resolvers {
    /// A file owned by the user.
    ///
    /// The file is never removed.
    UserOwned(PathBuf),

    /// A temporary file generated from a list of addresses.
    ///
    /// The file is removed when the value is dropped or [`cleanup`] is
    /// called.
    ///
    /// [`cleanup`]: Resolvers::cleanup
    SystemOwned(TempPath),
}

impl Resolvers {
    /// Uses a file provided by the user.
    ///
    /// Returns an error if the file doesn’t exist.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        if !path.exists() {
            return Err(Error::NotFound(path));
        }
        Ok(Resolvers::UserOwned(path))
    }

    /// Writes the given addresses into a new temporary file.
    ///
    /// Each address is written on a line of its own. If `dir` is given,
    /// the file is created there, otherwise in the system’s temporary
    /// directory.
    pub fn from_list<I>(addrs: I, dir: Option<&Path>) -> Result<Self, Error>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX);
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        {
            let mut writer = io::BufWriter::new(file.as_file_mut());
            for addr in addrs {
                writeln!(writer, "{addr}")?;
            }
            writer.flush()?;
        }
        let path = file.into_temp_path();
        debug!("Wrote resolvers to {}", path.display());
        Ok(Resolvers::SystemOwned(path))
    }

    /// Returns the path of the resolvers file.
    pub fn path(&self) -> &Path {
        match self {
            Resolvers::UserOwned(path) => path.as_path(),
            Resolvers::SystemOwned(path) => path,
        }
    }

    /// Returns whether the file will be removed by us.
    pub fn is_system_owned(&self) -> bool {
        matches!(self, Resolvers::SystemOwned(_))
    }

    /// Removes the file if we own it.
    ///
    /// Failing to remove the file is logged but otherwise ignored.
    pub fn cleanup(self) {
        if let Resolvers::SystemOwned(path) = self {
            let shown = path.display().to_string();
            match path.close() {
                Ok(()) => debug!("Removed resolvers file {shown}"),
                Err(err) => {
                    warn!("Failed to remove resolvers file {shown}: {err}")
                }
            }
        }
    }
}

//============ Tests =========================================================
