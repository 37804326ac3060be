//! Feeding queries to massdns.

use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Writes every item of `input` as a line to `stdin`.
///
/// Each line is written as soon as it arrives without any buffering.
/// Once `input` is exhausted, `stdin` is shut down and dropped so massdns
/// sees the end of its input. A failing write ends feeding quietly: it
/// usually means massdns has gone away, which will be reported through its
/// exit status.
///
/// Returns the number of lines written.
pub async fn feed<S, W>(mut input: S, mut stdin: W) -> usize
where
    S: Stream + Unpin,
    S::Item: AsRef<str>,
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    let mut buf = Vec::new();
    while let Some(item) = input.next().await {
        buf.clear();
        buf.extend_from_slice(item.as_ref().as_bytes());
        buf.push(b'\n');
        if let Err(err) = stdin.write_all(&buf).await {
            debug!("Stopped feeding after {written} lines: {err}");
            return written;
        }
        written += 1;
    }
    if let Err(err) = stdin.shutdown().await {
        debug!("Failed to close input: {err}");
    }
    debug!("Input complete: {written} lines");
    written
}

//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use futures_util::stream;
    use std::io;

    #[tokio::test]
    async fn writes_lines() {
        let mut stdin = Vec::new();
        let input = stream::iter(["example.com", "example.net A", ""]);
        assert_eq!(feed(input, &mut stdin).await, 3);
        assert_eq!(stdin, b"example.com\nexample.net A\n\n");
    }

    #[tokio::test]
    async fn empty_input() {
        let mut stdin = Vec::new();
        let input = stream::iter(Vec::<String>::new());
        assert_eq!(feed(input, &mut stdin).await, 0);
        assert!(stdin.is_empty());
    }

    #[tokio::test]
    async fn live_input() {
        let (tx, rx) = tokio::sync::mpsc::channel::<String>(1);
        let producer = tokio::spawn(async move {
            for i in 0..10 {
                tx.send(format!("host{i}.example")).await.unwrap();
            }
        });
        let input = tokio_stream::wrappers::ReceiverStream::new(rx);
        let mut stdin = Vec::new();
        assert_eq!(feed(input, &mut stdin).await, 10);
        producer.await.unwrap();
        assert!(stdin.starts_with(b"host0.example\nhost1.example\n"));
        assert!(stdin.ends_with(b"host9.example\n"));
    }

    #[tokio::test]
    async fn stops_on_broken_pipe() {
        let stdin = tokio_test::io::Builder::new()
            .write(b"a.example\n")
            .write_error(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
            .build();
        let input = stream::iter(["a.example", "b.example", "c.example"]);
        assert_eq!(feed(input, stdin).await, 1);
    }
}
