//! Reading and parsing massdns output.

use std::io;
use std::str;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::parse::{parse_record, ResolvedRecord};

//------------ Summary -------------------------------------------------------

/// What happened during a resolve operation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Summary {
    /// Number of records forwarded to the output stream.
    pub records: usize,

    /// Number of output lines that didn’t contain a record.
    pub skipped: usize,

    /// Number of records dropped because the output stream was closed.
    pub discarded: usize,

    /// Number of query lines written to massdns.
    ///
    /// This is only available when queries were fed from a stream and
    /// feeding finished before massdns exited.
    pub queries: Option<usize>,
}

//------------ collect -------------------------------------------------------

/// Reads massdns output until end of file and forwards all records.
///
/// Lines that can’t be parsed are skipped. Records are sent in the order
/// they appear. If the receiving end of `sender` goes away, reading
/// continues so that massdns never blocks on a full pipe, but records are
/// discarded.
///
/// Only an error reading from `output` ends the process early.
pub async fn collect<R>(
    output: R,
    sender: mpsc::Sender<ResolvedRecord>,
) -> Result<Summary, io::Error>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(output);
    let mut sender = Some(sender);
    let mut summary = Summary::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        let record = match str::from_utf8(&line) {
            Ok(text) => match parse_record(text) {
                Ok(record) => record,
                Err(err) => {
                    trace!("Skipping line {:?}: {err}", text.trim_end());
                    summary.skipped += 1;
                    continue;
                }
            },
            Err(err) => {
                trace!("Skipping line: {err}");
                summary.skipped += 1;
                continue;
            }
        };

        match sender.as_ref() {
            Some(tx) => {
                if tx.send(record).await.is_ok() {
                    summary.records += 1;
                } else {
                    warn!("Output stream closed, discarding records");
                    sender = None;
                    summary.discarded += 1;
                }
            }
            None => summary.discarded += 1,
        }
    }

    debug!(
        "Output complete: {} records, {} lines skipped, {} discarded",
        summary.records, summary.skipped, summary.discarded
    );
    Ok(summary)
}

//============ Tests =========================================================
