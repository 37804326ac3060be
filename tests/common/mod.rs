//! Helpers shared by the integration tests.
#![allow(dead_code)]

pub mod massdns;

use std::sync::{Mutex, MutexGuard};

use domain_massdns::{Output, ResolvedRecord};
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by the crate and the test suite.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To enable debug level logging:
///   RUST_LOG=DEBUG
///
/// Or to see every skipped line of massdns output:
///   RUST_LOG=domain_massdns=TRACE
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}

/// Serializes tests that install and run a fake massdns.
///
/// Executing a script while another thread still has it open for writing
/// fails with `ETXTBSY`, so only one test at a time gets to do either.
pub fn exclusive() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|err| err.into_inner())
}

/// Receives all records until the output stream ends.
pub fn receive_all(mut output: Output) -> JoinHandle<Vec<ResolvedRecord>> {
    tokio::spawn(async move {
        let mut res = Vec::new();
        while let Some(record) = output.recv().await {
            res.push(record)
        }
        res
    })
}
