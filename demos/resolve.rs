//! Resolves names read from stdin with massdns.
//!
//! Usage: resolve <record type> <resolver> [<resolver> ...]
//!
//! Each line on stdin is handed to massdns as a query. Every record found
//! is printed in presentation format.

use std::env;
use std::process::exit;
use std::str::FromStr;

use domain::base::iana::Rtype;
use domain_massdns::Session;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args();
    let prog_name = args.next().unwrap_or_else(|| "resolve".into());
    let rtype = args.next().map(|rtype| Rtype::from_str(&rtype));
    let resolvers: Vec<_> = args.collect();
    let rtype = match rtype {
        Some(Ok(rtype)) if !resolvers.is_empty() => rtype,
        _ => {
            eprintln!("Usage: {prog_name} <record type> <resolver> ...");
            exit(2);
        }
    };

    let (mut session, mut output) = Session::new();
    if session.binary().is_none() {
        eprintln!("massdns not found in PATH");
        exit(1);
    }
    if let Err(err) = session.set_resolvers_from_list(&resolvers) {
        eprintln!("Failed to set resolvers: {err}");
        exit(1);
    }

    let printer = tokio::spawn(async move {
        while let Some(record) = output.recv().await {
            println!("{record}");
        }
    });

    let names = LinesStream::new(BufReader::new(stdin()).lines())
        .filter_map(|line| line.ok());
    let res = session.resolve_from_stream(rtype, names).await;
    drop(session);
    let _ = printer.await;

    match res {
        Ok(summary) => eprintln!(
            "{} records, {} lines skipped",
            summary.records, summary.skipped
        ),
        Err(err) => {
            eprintln!("{err}");
            exit(1);
        }
    }
}
