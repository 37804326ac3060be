//! Bulk DNS resolution with massdns.
//!
//! This crate drives an external [massdns] process: it hands it a list of
//! upstream resolvers and the names to query, reads the answers massdns
//! prints, and turns them into records using the presentation format
//! scanner of the [domain] crate.
//!
//! Everything starts with a [`Session`]. It is created together with the
//! receiving end of a stream of records, configured with a set of
//! resolvers, and then used for any number of resolve operations. Names can
//! be read by massdns directly from a file via
//! [`resolve_from_file`][Session::resolve_from_file] or fed from any
//! [`Stream`][futures_util::Stream] via
//! [`resolve_from_stream`][Session::resolve_from_stream].
//!
//! Lines of massdns output that do not contain a record are skipped. Only
//! a failure to configure or start massdns, an I/O error, or massdns
//! exiting unsuccessfully end an operation with an error. Records that
//! have been delivered before that stay delivered.
//!
//! There is no way to cancel a running operation other than dropping its
//! future, which kills the massdns process.
//!
//! # Modules
//!
//! * [session] contains the [`Session`] type,
//! * [parse] converts a line of massdns output into a record,
//! * [resolvers] manages the file listing the upstream resolvers,
//! * [binary] locates the massdns executable,
//! * [config] contains the session configuration, and
//! * [error] contains the error type.
//!
//! [massdns]: https://github.com/blechschmidt/massdns
//! [domain]: https://docs.rs/domain
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod binary;
pub mod config;
pub mod error;
pub mod parse;
pub mod resolvers;
pub mod session;

mod collector;
mod driver;
mod feeder;

pub use self::collector::Summary;
pub use self::config::Config;
pub use self::error::Error;
pub use self::parse::{parse_record, ParseError, ResolvedRecord};
pub use self::session::{Output, Session};
pub use domain;
