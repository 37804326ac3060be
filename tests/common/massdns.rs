//! Configuring and running a fake massdns.
//!
//! The fake is a small shell script that behaves like massdns as far as
//! the session can tell: it takes the same arguments, reads queries either
//! from the file given last or from standard input, prints records in
//! simple output format, and exits with a given status. On top of that it
//! records its arguments and the queries it received for inspection.

use std::fs::{self, File};
use std::io::{self, Write};
use std::net::Ipv4Addr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

//------------ Config --------------------------------------------------------

/// Fake massdns configuration.
///
/// Create and manipulate a value of this type, then [`install`] it into a
/// directory.
///
/// [`install`]: Config::install
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Answer every query with an A record for this address.
    ///
    /// The first word of each query line is used as the owner name.
    pub answer: Option<Ipv4Addr>,

    /// Lines printed verbatim after the answers.
    pub output: Vec<String>,

    /// Exit without reading any queries.
    pub ignore_input: bool,

    /// The exit code.
    pub exit_code: i32,
}

impl Config {
    /// Creates a fake printing the given lines.
    pub fn printing<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Config {
            output: lines.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Creates a fake answering every query.
    pub fn answering(addr: Ipv4Addr) -> Self {
        Config {
            answer: Some(addr),
            ..Default::default()
        }
    }

    /// Writes the script to `dir` and makes it executable.
    pub fn install<P: AsRef<Path>>(
        &self,
        dir: P,
    ) -> Result<Fake, io::Error> {
        let dir = dir.as_ref();
        let fake = Fake {
            binary: dir.join("massdns"),
            args: dir.join("massdns.args"),
            queries: dir.join("massdns.queries"),
        };
        {
            let mut file = File::create(&fake.binary)?;
            self.write(&fake, &mut file)?;
            file.sync_all()?;
        }
        let mode = fs::Permissions::from_mode(0o755);
        fs::set_permissions(&fake.binary, mode)?;
        Ok(fake)
    }

    /// Writes the script to something writable.
    fn write<W: io::Write>(
        &self,
        fake: &Fake,
        target: &mut W,
    ) -> Result<(), io::Error> {
        writeln!(target, "#!/bin/sh")?;
        writeln!(
            target,
            "printf '%s\\n' \"$@\" > '{}'",
            fake.args.display()
        )?;

        if self.ignore_input {
            writeln!(target, ": > '{}'", fake.queries.display())?;
        } else {
            // Queries come from the last argument unless that is the
            // output format, in which case they come via stdin.
            writeln!(target, "for last; do :; done")?;
            writeln!(target, "if [ \"$last\" = S ]; then")?;
            writeln!(target, "    cat > '{}'", fake.queries.display())?;
            writeln!(target, "else")?;
            writeln!(
                target,
                "    cat \"$last\" > '{}'",
                fake.queries.display()
            )?;
            writeln!(target, "fi")?;
        }

        if let Some(addr) = self.answer {
            writeln!(target, "while read -r name rest; do")?;
            writeln!(target, "    printf '%s. A {addr}\\n' \"$name\"")?;
            writeln!(target, "done < '{}'", fake.queries.display())?;
        }

        if !self.output.is_empty() {
            writeln!(target, "cat <<'END_OF_OUTPUT'")?;
            for line in &self.output {
                writeln!(target, "{line}")?;
            }
            writeln!(target, "END_OF_OUTPUT")?;
        }

        writeln!(target, "exit {}", self.exit_code)?;
        Ok(())
    }
}

//------------ Fake ----------------------------------------------------------

/// An installed fake massdns.
#[derive(Clone, Debug)]
pub struct Fake {
    /// The path of the script.
    pub binary: PathBuf,

    /// Where the script records its arguments.
    pub args: PathBuf,

    /// Where the script records the queries it received.
    pub queries: PathBuf,
}

impl Fake {
    /// Returns the arguments of the last run.
    ///
    /// Returns `None` if the fake hasn’t been run yet.
    pub fn args(&self) -> Option<Vec<String>> {
        let args = fs::read_to_string(&self.args).ok()?;
        Some(args.lines().map(Into::into).collect())
    }

    /// Returns the queries received by the last run.
    pub fn queries(&self) -> Option<String> {
        fs::read_to_string(&self.queries).ok()
    }
}
