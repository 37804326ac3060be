//! Session configuration.

use std::cmp;
use std::ffi::OsString;
use std::path::PathBuf;

//------------ Configuration Constants ---------------------------------------

/// Capacity of the output stream.
///
/// The collector suspends once this many records are waiting to be
/// received. Zero isn’t allowed by the channel, hence the minimum.
pub(crate) const OUTPUT_CAPACITY: DefMinMax<usize> =
    DefMinMax::new(1024, 1, 1 << 20);

//------------ Config --------------------------------------------------------

/// Configuration of a session.
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Number of records buffered in the output stream.
    ///
    /// If `None`, a default is used. The value is limited to a sensible
    /// range.
    pub output_capacity: Option<usize>,

    /// Directory where generated resolvers files are created.
    ///
    /// If `None`, the system’s temporary directory is used.
    pub temp_dir: Option<PathBuf>,

    /// Additional arguments passed to massdns.
    ///
    /// They are placed before the arguments selecting resolvers, record
    /// type, and output format, so those can’t be overridden.
    pub extra_args: Vec<OsString>,
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the capacity of the output stream.
    pub fn output_capacity(&self) -> usize {
        self.output_capacity
            .map(|cap| OUTPUT_CAPACITY.limit(cap))
            .unwrap_or_else(|| OUTPUT_CAPACITY.default())
    }

    /// Sets the capacity of the output stream.
    pub fn set_output_capacity(&mut self, value: usize) {
        self.output_capacity = Some(value)
    }

    /// Sets the directory for generated resolvers files.
    pub fn set_temp_dir(&mut self, dir: impl Into<PathBuf>) {
        self.temp_dir = Some(dir.into())
    }

    /// Adds an argument passed to massdns.
    pub fn add_arg(&mut self, arg: impl Into<OsString>) {
        self.extra_args.push(arg.into())
    }
}

//------------ DefMinMax -----------------------------------------------------

/// The default, minimum, and maximum values for a config variable.
#[derive(Clone, Copy)]
pub(crate) struct DefMinMax<T> {
    def: T,
    min: T,
    max: T,
}

impl<T> DefMinMax<T> {
    pub const fn new(def: T, min: T, max: T) -> Self {
        Self { def, min, max }
    }

    pub fn default(self) -> T {
        self.def
    }

    /// Trims the given value to fit into the minimum/maximum range.
    pub fn limit(self, value: T) -> T
    where
        T: Ord,
    {
        cmp::max(self.min, cmp::min(self.max, value))
    }
}

//============ Tests =========================================================
