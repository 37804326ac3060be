//! Parsing massdns output lines into resource records.
//!
//! massdns in its simple output mode (`-o S`) prints one record per line
//! in presentation format but leaves out the TTL and class:
//!
//! ```text
//! example.com. A 93.184.216.34
//! ```
//!
//! The [`parse_record`] function accepts both this shape and full
//! zonefile-style lines with TTL and class. Missing values are filled in
//! with [`DEFAULT_TTL`] and the `IN` class before the line is handed to the
//! [`Zonefile`] scanner of the `domain` crate, which does the actual work.

use core::fmt;
use core::str::FromStr;

use bytes::Bytes;
use domain::base::iana::{Class, Rtype};
use domain::base::name::{FlattenInto, Name};
use domain::base::Record;
use domain::rdata::ZoneRecordData;
use domain::zonefile::inplace::{self, Entry, Zonefile};

//------------ Type Aliases --------------------------------------------------

/// The type of records produced from massdns output.
pub type ResolvedRecord =
    Record<Name<Bytes>, ZoneRecordData<Bytes, Name<Bytes>>>;

//------------ Constants -----------------------------------------------------

/// The TTL assumed for lines that don’t carry one.
pub const DEFAULT_TTL: u32 = 3600;

//------------ parse_record --------------------------------------------------

/// Parses a single line of massdns output into a record.
///
/// Relative names are taken to be relative to the root. The line must not
/// contain a line feed.
pub fn parse_record(line: &str) -> Result<ResolvedRecord, ParseError> {
    let line = line.trim_end();
    if line.is_empty() || line.starts_with(';') {
        return Err(ParseError::Empty);
    }
    if line.starts_with(char::is_whitespace) {
        return Err(ParseError::MissingOwner);
    }

    // Control entries go through as they are so the scanner can deal with
    // them.
    let line = if line.starts_with('$') {
        format!("{line}\n")
    } else {
        normalize(line)?
    };

    let mut zonefile = Zonefile::from(line.as_str());
    zonefile.set_origin(Name::root_bytes());
    match zonefile.next_entry() {
        Ok(Some(Entry::Record(record))) => Ok(record.flatten_into()),
        Ok(Some(Entry::Include { .. })) => Err(ParseError::NotARecord),
        Ok(None) => Err(ParseError::Empty),
        Err(err) => Err(ParseError::Malformed(err)),
    }
}

/// Rewrites a line into the `<owner> <ttl> <class> <type> <data>` form.
fn normalize(line: &str) -> Result<String, ParseError> {
    let (owner, mut rest) = split_token(line);
    let mut ttl = None;
    let mut class = None;

    // TTL and class may come in either order and are both optional.
    loop {
        let (token, tail) = split_token(rest);
        if token.is_empty() {
            return Err(ParseError::MissingType);
        }
        if ttl.is_none() && u32::from_str(token).is_ok() {
            ttl = Some(token);
        } else if class.is_none()
            && Rtype::from_str(token).is_err()
            && Class::from_str(token).is_ok()
        {
            class = Some(token);
        } else {
            break;
        }
        rest = tail;
    }

    let mut res = String::with_capacity(line.len() + 16);
    res.push_str(owner);
    res.push(' ');
    match ttl {
        Some(ttl) => res.push_str(ttl),
        None => res.push_str(&DEFAULT_TTL.to_string()),
    }
    res.push(' ');
    res.push_str(class.unwrap_or("IN"));
    res.push(' ');
    res.push_str(rest.trim_start());
    res.push('\n');
    Ok(res)
}

/// Splits off the first whitespace-separated token.
fn split_token(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(pos) => s.split_at(pos),
        None => (s, ""),
    }
}

//------------ ParseError ----------------------------------------------------

/// A line of output could not be turned into a record.
#[derive(Debug)]
pub enum ParseError {
    /// The line was empty or contained only a comment.
    Empty,

    /// The line started with white space and thus has no owner name.
    MissingOwner,

    /// The line ended before a record type was found.
    MissingType,

    /// The line contained an entry other than a record.
    NotARecord,

    /// The scanner rejected the line.
    Malformed(inplace::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::Empty => f.write_str("empty record"),
            ParseError::MissingOwner => {
                f.write_str("no domain found in the record")
            }
            ParseError::MissingType => f.write_str("missing record type"),
            ParseError::NotARecord => f.write_str("not a record"),
            ParseError::Malformed(err) => {
                write!(f, "malformed record: {err}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

//============ Tests =========================================================
