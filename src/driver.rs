//! Running the massdns process.
//!
//! massdns is always started in simple output mode, which prints one
//! record per line:
//!
//! ```text
//! <binary> [<extra args>] -r <resolvers> -t <rtype> -o S [<input file>]
//! ```
//!
//! The input file is only given when queries are read from a file. In
//! stream mode the queries arrive via standard input instead.
//!
//! Each run spawns a collector task for standard output and, in stream
//! mode, a feeder task for standard input. A run only completes once the
//! process has exited and the collector has seen the end of the output, so
//! all records have been forwarded by the time it returns.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Stdio;

use domain::base::iana::Rtype;
use futures_util::Stream;
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::collector::{collect, Summary};
use crate::error::Error;
use crate::feeder::feed;
use crate::parse::ResolvedRecord;

//------------ Invocation ----------------------------------------------------

/// Everything needed to start massdns.
#[derive(Clone, Debug)]
pub(crate) struct Invocation<'a> {
    /// Path to the massdns binary.
    pub binary: &'a Path,

    /// Path to the resolvers file.
    pub resolvers: &'a Path,

    /// The record type to query for.
    pub rtype: Rtype,

    /// Additional arguments.
    pub extra_args: &'a [OsString],
}

impl<'a> Invocation<'a> {
    /// Returns the arguments for massdns.
    pub fn args(&self, input: Option<&Path>) -> Vec<OsString> {
        let mut res = self.extra_args.to_vec();
        res.push("-r".into());
        res.push(self.resolvers.into());
        res.push("-t".into());
        res.push(self.rtype.to_string().into());
        res.push("-o".into());
        res.push("S".into());
        if let Some(input) = input {
            res.push(input.into());
        }
        res
    }

    /// Starts massdns.
    ///
    /// If `input` is `None`, standard input is piped, otherwise it is
    /// closed. Standard output is always piped. The process is killed if
    /// the returned value is dropped before it has exited.
    fn spawn(&self, input: Option<&Path>) -> Result<Child, Error> {
        let mut cmd = Command::new(self.binary);
        cmd.args(self.args(input))
            .stdin(if input.is_some() {
                Stdio::null()
            } else {
                Stdio::piped()
            })
            .stdout(Stdio::piped())
            .kill_on_drop(true);
        debug!("Starting {:?}", cmd.as_std());
        cmd.spawn().map_err(Error::launch)
    }
}

//------------ resolve_file and resolve_stream -------------------------------

/// Runs massdns with queries read from the file at `input`.
pub(crate) async fn resolve_file(
    invocation: &Invocation<'_>,
    input: &Path,
    output: mpsc::Sender<ResolvedRecord>,
) -> Result<Summary, Error> {
    let mut child = invocation.spawn(Some(input))?;
    let collector = start_collector(&mut child, output)?;
    finish(child, collector, None).await
}

/// Runs massdns with queries taken from `input`.
pub(crate) async fn resolve_stream<S>(
    invocation: &Invocation<'_>,
    input: S,
    output: mpsc::Sender<ResolvedRecord>,
) -> Result<Summary, Error>
where
    S: Stream + Send + Unpin + 'static,
    S::Item: AsRef<str> + Send + 'static,
{
    let mut child = invocation.spawn(None)?;
    let stdin = child.stdin.take().ok_or_else(|| missing_pipe("input"))?;
    let collector = start_collector(&mut child, output)?;
    let feeder = tokio::spawn(feed(input, stdin));
    finish(child, collector, Some(feeder)).await
}

/// Spawns the collector for the output of `child`.
fn start_collector(
    child: &mut Child,
    output: mpsc::Sender<ResolvedRecord>,
) -> Result<JoinHandle<Result<Summary, io::Error>>, Error> {
    let stdout = child.stdout.take().ok_or_else(|| missing_pipe("output"))?;
    Ok(tokio::spawn(collect(stdout, output)))
}

/// Waits for the process to exit and its output to be drained.
///
/// A failed process takes precedence over problems reading its output.
/// A feeder still waiting for input once massdns is gone is stopped, in
/// which case the number of queries is unknown.
async fn finish(
    mut child: Child,
    collector: JoinHandle<Result<Summary, io::Error>>,
    feeder: Option<JoinHandle<usize>>,
) -> Result<Summary, Error> {
    let status = child.wait().await;
    let collected = collector.await.map_err(join_error);
    let queries = match feeder {
        Some(feeder) => {
            feeder.abort();
            match feeder.await {
                Ok(queries) => Some(queries),
                Err(err) if err.is_cancelled() => {
                    debug!("Stopped feeding queries after massdns exited");
                    None
                }
                Err(err) => return Err(join_error(err).into()),
            }
        }
        None => None,
    };

    let status = status?;
    debug!("massdns exited with {status}");
    if !status.success() {
        return Err(Error::Subprocess(status));
    }
    let summary = collected??;
    Ok(Summary { queries, ..summary })
}

fn missing_pipe(which: &str) -> Error {
    Error::launch(io::Error::new(
        io::ErrorKind::BrokenPipe,
        format!("massdns {which} not captured"),
    ))
}

fn join_error(err: tokio::task::JoinError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arguments() {
        let extra = vec![OsString::from("-s"), OsString::from("100")];
        let invocation = Invocation {
            binary: Path::new("massdns"),
            resolvers: Path::new("/tmp/resolvers"),
            rtype: Rtype::AAAA,
            extra_args: &extra,
        };
        assert_eq!(
            invocation.args(None),
            ["-s", "100", "-r", "/tmp/resolvers", "-t", "AAAA", "-o", "S"]
                .map(OsString::from)
        );
        assert_eq!(
            invocation.args(Some(Path::new("names.txt"))).last(),
            Some(&OsString::from("names.txt"))
        );
    }

    #[tokio::test]
    async fn launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("missing-massdns");
        let invocation = Invocation {
            binary: &binary,
            resolvers: dir.path(),
            rtype: Rtype::A,
            extra_args: &[],
        };
        let (tx, mut rx) = mpsc::channel(1);
        let err = resolve_file(&invocation, dir.path(), tx).await;
        assert!(matches!(err, Err(Error::Launch(_))));
        assert!(rx.recv().await.is_none());
    }
}
