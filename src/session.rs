//! A resolution session.
//!
//! A [`Session`] ties together the massdns binary, the resolvers it should
//! use, and the stream all resolved records are delivered on. Records
//! arrive on the receiving half of that stream, returned when the session
//! is created, while a resolve operation is still running. They must be
//! received concurrently: once the stream is full, reading massdns output
//! stops, massdns blocks writing it, and the operation never finishes.
//!
//! The stream ends when the session has been dropped and no operation is
//! running any more.
//!
//! A typical use looks like this:
//!
//! ```no_run
//! use domain::base::iana::Rtype;
//! use domain_massdns::Session;
//! use futures_util::stream;
//!
//! # async fn run() -> Result<(), domain_massdns::Error> {
//! let (mut session, mut output) = Session::new();
//! session.set_resolvers_from_list(["8.8.8.8", "1.1.1.1"])?;
//!
//! let printer = tokio::spawn(async move {
//!     while let Some(record) = output.recv().await {
//!         println!("{record}");
//!     }
//! });
//!
//! let names = stream::iter(["example.com", "example.net"]);
//! session.resolve_from_stream(Rtype::A, names).await?;
//! drop(session);
//! printer.await.unwrap();
//! # Ok(())
//! # }
//! ```

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use domain::base::iana::Rtype;
use futures_util::Stream;
use tokio::sync::mpsc;
use tracing::debug;

use crate::binary::{self, DEFAULT_BINARY};
use crate::collector::Summary;
use crate::config::Config;
use crate::driver::{self, Invocation};
use crate::error::Error;
use crate::parse::ResolvedRecord;
use crate::resolvers::Resolvers;

//------------ Output --------------------------------------------------------

/// The receiving end of the stream of resolved records.
pub type Output = mpsc::Receiver<ResolvedRecord>;

//------------ Session -------------------------------------------------------

/// A session for resolving names with massdns.
pub struct Session {
    /// The path to the massdns binary, if known.
    binary: Option<PathBuf>,

    /// The active resolvers file.
    resolvers: Option<Resolvers>,

    /// The configuration.
    config: Config,

    /// The sending end of the output stream.
    output: mpsc::Sender<ResolvedRecord>,
}

impl Session {
    /// Creates a new session with the default configuration.
    pub fn new() -> (Self, Output) {
        Self::with_config(Config::default())
    }

    /// Creates a new session with the given configuration.
    ///
    /// The session will use the `massdns` command if it can be found. You
    /// can pick a different binary via [`set_binary`][Self::set_binary].
    pub fn with_config(config: Config) -> (Self, Output) {
        let (tx, rx) = mpsc::channel(config.output_capacity());
        let binary = match binary::lookup(DEFAULT_BINARY) {
            Ok(path) => Some(path),
            Err(err) => {
                debug!("{err}");
                None
            }
        };
        let session = Session {
            binary,
            resolvers: None,
            config,
            output: tx,
        };
        (session, rx)
    }

    /// Returns the configuration of the session.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the path of the massdns binary if it is known.
    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    /// Sets the massdns binary to use.
    ///
    /// `name` can be either a command name or a path. Fails if it can’t
    /// be resolved to an executable.
    pub fn set_binary(
        &mut self,
        name: impl AsRef<OsStr>,
    ) -> Result<(), Error> {
        self.binary = Some(binary::lookup(name)?);
        Ok(())
    }

    /// Returns the path of the active resolvers file.
    pub fn resolvers(&self) -> Option<&Path> {
        self.resolvers.as_ref().map(Resolvers::path)
    }

    /// Uses the given resolver addresses.
    ///
    /// The addresses are written into a temporary file which is removed
    /// again by [`cleanup`][Self::cleanup] or when the session is dropped.
    /// A file generated earlier is removed first.
    pub fn set_resolvers_from_list<I>(
        &mut self,
        addrs: I,
    ) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.cleanup();
        let resolvers =
            Resolvers::from_list(addrs, self.config.temp_dir.as_deref())?;
        self.resolvers = Some(resolvers);
        Ok(())
    }

    /// Uses the resolvers file at `path`.
    ///
    /// The file stays in place when the session is cleaned up. A file
    /// generated earlier is removed.
    pub fn set_resolvers_from_path(
        &mut self,
        path: impl Into<PathBuf>,
    ) -> Result<(), Error> {
        let resolvers = Resolvers::from_path(path)?;
        self.cleanup();
        self.resolvers = Some(resolvers);
        Ok(())
    }

    /// Removes a generated resolvers file.
    ///
    /// Does nothing if the resolvers file was provided by the user or
    /// there is none at all.
    pub fn cleanup(&mut self) {
        if self.resolvers.as_ref().is_some_and(Resolvers::is_system_owned) {
            if let Some(resolvers) = self.resolvers.take() {
                resolvers.cleanup()
            }
        }
    }

    /// Resolves the queries listed in the file at `input`.
    ///
    /// Returns once massdns has finished and all records have been sent to
    /// the output stream.
    pub async fn resolve_from_file(
        &self,
        rtype: Rtype,
        input: impl AsRef<Path>,
    ) -> Result<Summary, Error> {
        let invocation = self.invocation(rtype)?;
        let input = input.as_ref();
        if !input.exists() {
            return Err(Error::NotFound(input.into()));
        }
        driver::resolve_file(&invocation, input, self.output.clone()).await
    }

    /// Resolves the queries produced by `input`.
    ///
    /// Each item is passed to massdns as a line. Returns once `input` has
    /// ended, massdns has finished, and all records have been sent to the
    /// output stream.
    pub async fn resolve_from_stream<S>(
        &self,
        rtype: Rtype,
        input: S,
    ) -> Result<Summary, Error>
    where
        S: Stream + Send + Unpin + 'static,
        S::Item: AsRef<str> + Send + 'static,
    {
        let invocation = self.invocation(rtype)?;
        driver::resolve_stream(&invocation, input, self.output.clone()).await
    }

    fn invocation(&self, rtype: Rtype) -> Result<Invocation<'_>, Error> {
        let resolvers = self.resolvers().ok_or(Error::ResolversNotSet)?;
        let binary = self
            .binary()
            .ok_or_else(|| Error::BinaryNotFound(DEFAULT_BINARY.into()))?;
        Ok(Invocation {
            binary,
            resolvers,
            rtype,
            extra_args: &self.config.extra_args,
        })
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Session")
            .field("binary", &self.binary)
            .field("resolvers", &self.resolvers)
            .field("config", &self.config)
            .finish()
    }
}

//============ Tests =========================================================
