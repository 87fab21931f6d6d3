//! Error taxonomy shared by the clock and duration codecs
//!
//! Every failing codec operation returns exactly one [`Error`], classified by
//! *why* the input was rejected:
//!
//! | Kind | Variant | Meaning |
//! |------|---------|---------|
//! | **Sentinel** | [`Error::InvalidClock`], [`Error::InvalidDuration`] | The input has the wrong shape for the operation (wrong JSON token, unsupported driver value) |
//! | **Unknown format** | [`Error::UnknownFormat`] | The input had the right shape but matched none of the candidate layouts |
//! | **External** | [`Error::External`] | A collaborating parser (JSON tokenizer, literal grammar) failed; its message is forwarded verbatim |
//!
//! Sentinels are unit variants, so callers test them with plain equality:
//!
//! ```rust
//! use timetype::{Clock, DriverCodec, DriverValue, Error};
//!
//! let err = Clock::from_driver(DriverValue::Integer(2567)).unwrap_err();
//! assert_eq!(err, Error::InvalidClock);
//! assert_eq!(err.to_string(), "timetype: invalid clock");
//! ```

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Boxed collaborator error carried by the external and unknown-format kinds.
pub type BoxDynError = Box<dyn StdError + Send + Sync + 'static>;

/// Standard result type using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the clock and duration codecs
#[derive(Debug, Error)]
pub enum Error {
    /// Input shape cannot represent a clock
    #[error("timetype: invalid clock")]
    InvalidClock,

    /// Input shape cannot represent a duration
    #[error("timetype: invalid duration")]
    InvalidDuration,

    /// Text matched none of the attempted layouts
    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormatError),

    /// Failure reported by a collaborating parser
    #[error(transparent)]
    External(#[from] ExternalError),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong input shape
    Sentinel,
    /// Unparseable content, every layout tried
    UnknownFormat,
    /// Collaborator failure passed through
    External,
}

impl Error {
    /// Wrap a collaborator error as [`Error::External`].
    pub fn external<E>(err: E) -> Self
    where
        E: Into<BoxDynError>,
    {
        Self::External(ExternalError::wrap(err))
    }

    /// Which of the three kinds this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidClock | Self::InvalidDuration => ErrorKind::Sentinel,
            Self::UnknownFormat(_) => ErrorKind::UnknownFormat,
            Self::External(_) => ErrorKind::External,
        }
    }

    /// Returns true for the sentinel ("wrong shape") kind.
    pub fn is_sentinel(&self) -> bool {
        self.kind() == ErrorKind::Sentinel
    }

    /// Borrow the aggregated layout failure, if this is one.
    pub fn as_unknown_format(&self) -> Option<&UnknownFormatError> {
        match self {
            Self::UnknownFormat(err) => Some(err),
            _ => None,
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidClock, Self::InvalidClock)
            | (Self::InvalidDuration, Self::InvalidDuration) => true,
            (Self::UnknownFormat(a), Self::UnknownFormat(b)) => a == b,
            (Self::External(a), Self::External(b)) => a == b,
            _ => false,
        }
    }
}

/// Every layout failed to parse a value.
///
/// `layouts` and `errors` are parallel: `errors[i]` is what the parser
/// reported for `layouts[i]`, in the order the layouts were tried.
#[derive(Debug, Default)]
pub struct UnknownFormatError {
    /// The offending input, as received
    pub value: String,
    /// Layouts attempted, in trial order
    pub layouts: Vec<&'static str>,
    /// One parser error per layout
    pub errors: Vec<BoxDynError>,
}

impl UnknownFormatError {
    /// Start an empty aggregate for `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), layouts: Vec::new(), errors: Vec::new() }
    }

    /// Record one failed layout.
    pub fn push<E>(&mut self, layout: &'static str, err: E)
    where
        E: Into<BoxDynError>,
    {
        self.layouts.push(layout);
        self.errors.push(err.into());
    }

    /// Iterate `(layout, error)` pairs in trial order.
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &(dyn StdError + Send + Sync))> {
        self.layouts.iter().copied().zip(self.errors.iter().map(|err| &**err))
    }
}

impl fmt::Display for UnknownFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timetype: failed to parse {:?} in layouts: [", self.value)?;
        for (i, layout) in self.layouts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{layout:?}")?;
        }
        f.write_str("]")
    }
}

impl StdError for UnknownFormatError {}

impl PartialEq for UnknownFormatError {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
            && self.layouts == other.layouts
            && self.errors.len() == other.errors.len()
            && self.errors.iter().zip(&other.errors).all(|(a, b)| a.to_string() == b.to_string())
    }
}

/// A collaborator's error, forwarded with its message untouched.
#[derive(Debug)]
pub struct ExternalError(BoxDynError);

impl ExternalError {
    /// Wrap `err` without altering its message.
    pub fn wrap<E>(err: E) -> Self
    where
        E: Into<BoxDynError>,
    {
        Self(err.into())
    }

    /// Borrow the wrapped error.
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.0
    }

    /// Unwrap into the original boxed error.
    pub fn into_inner(self) -> BoxDynError {
        self.0
    }
}

impl fmt::Display for ExternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for ExternalError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&*self.0)
    }
}

impl PartialEq for ExternalError {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_string() == other.0.to_string()
    }
}
