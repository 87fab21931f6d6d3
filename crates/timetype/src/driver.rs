//! Storage driver boundary
//!
//! A database layer hands values to [`DriverCodec::scan`] and persists what
//! [`DriverCodec::value`] returns. [`DriverValue`] is the closed set of shapes
//! a driver can produce; codecs dispatch on the tag and reject the shapes
//! they cannot represent with their sentinel error.

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;

use crate::error::Result;

/// A value crossing the storage boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    /// SQL `NULL`
    Null,
    /// Signed 64-bit integer
    Integer(i64),
    /// Double-precision float
    Real(f64),
    /// Boolean
    Bool(bool),
    /// UTF-8 text
    Text(String),
    /// Raw bytes
    Blob(Vec<u8>),
    /// Driver-native point in time
    Time(DateTime<Tz>),
    /// Driver-native signed duration
    Duration(TimeDelta),
}

impl DriverValue {
    /// Stable tag name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
            Self::Time(_) => "time",
            Self::Duration(_) => "duration",
        }
    }

    /// Returns true for [`DriverValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for DriverValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for DriverValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for DriverValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<String> for DriverValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for DriverValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<u8>> for DriverValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl From<&[u8]> for DriverValue {
    fn from(value: &[u8]) -> Self {
        Self::Blob(value.to_vec())
    }
}

impl From<DateTime<Tz>> for DriverValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Time(value)
    }
}

impl From<TimeDelta> for DriverValue {
    fn from(value: TimeDelta) -> Self {
        Self::Duration(value)
    }
}

impl<T> From<Option<T>> for DriverValue
where
    T: Into<DriverValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Conversion pair used when a value is persisted to or read from storage.
///
/// Implementors provide [`from_driver`](Self::from_driver) and
/// [`to_driver`](Self::to_driver); the in-place [`scan`](Self::scan) and the
/// fallible-signature [`value`](Self::value) are derived from them.
pub trait DriverCodec: Sized + Default {
    /// Build a value from a driver value. `Null` yields the zero value.
    fn from_driver(value: DriverValue) -> Result<Self>;

    /// Render the value for storage.
    fn to_driver(&self) -> DriverValue;

    /// Replace `self` with the scanned value.
    ///
    /// On error `self` is reset to the zero value.
    fn scan(&mut self, value: DriverValue) -> Result<()> {
        match Self::from_driver(value) {
            Ok(scanned) => {
                *self = scanned;
                Ok(())
            }
            Err(err) => {
                *self = Self::default();
                Err(err)
            }
        }
    }

    /// Driver value for storage. Never fails for the types in this crate.
    fn value(&self) -> Result<DriverValue> {
        Ok(self.to_driver())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the driver boundary.
    use super::*;
    use crate::error::Error;

    #[derive(Debug, Default, PartialEq)]
    struct Counter(i64);

    impl DriverCodec for Counter {
        fn from_driver(value: DriverValue) -> Result<Self> {
            match value {
                DriverValue::Null => Ok(Self::default()),
                DriverValue::Integer(n) => Ok(Self(n)),
                _ => Err(Error::InvalidDuration),
            }
        }

        fn to_driver(&self) -> DriverValue {
            DriverValue::Integer(self.0)
        }
    }

    /// Validates the provided `scan` behavior.
    ///
    /// Assertions:
    /// - Confirms a successful scan assigns the value.
    /// - Confirms a failed scan resets the target to its zero value.
    #[test]
    fn test_scan_assigns_or_resets() {
        let mut counter = Counter(3);
        counter.scan(DriverValue::Integer(9)).unwrap();
        assert_eq!(counter, Counter(9));

        let err = counter.scan(DriverValue::Bool(true)).unwrap_err();
        assert_eq!(err, Error::InvalidDuration);
        assert_eq!(counter, Counter(0));
    }

    #[test]
    fn test_value_wraps_to_driver() {
        assert_eq!(Counter(4).value().unwrap(), DriverValue::Integer(4));
    }

    #[test]
    fn test_conversions_and_kind_names() {
        assert_eq!(DriverValue::from(None::<i64>), DriverValue::Null);
        assert_eq!(DriverValue::from(Some("x")), DriverValue::Text("x".into()));
        assert_eq!(DriverValue::from(&b"ab"[..]).kind_name(), "blob");
        assert_eq!(DriverValue::from(1.5).kind_name(), "real");
        assert_eq!(DriverValue::from(TimeDelta::seconds(1)).kind_name(), "duration");
        assert!(DriverValue::Null.is_null());
    }
}
