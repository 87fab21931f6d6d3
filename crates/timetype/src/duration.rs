//! Signed elapsed time in nanoseconds
//!
//! [`Duration`] stores an `i64` nanosecond count. Its text form is the
//! literal grammar from [`crate::literal`] (`"1h5m3s"`), its driver form is
//! the raw nanosecond integer.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use chrono::TimeDelta;
use serde_json::{Number, Value};
use tracing::debug;

use crate::driver::{DriverCodec, DriverValue};
use crate::error::{Error, Result};
use crate::literal;

/// A signed span of time with nanosecond resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    /// Zero length span
    pub const ZERO: Self = Self(0);
    /// One nanosecond
    pub const NANOSECOND: Self = Self(1);
    /// One microsecond
    pub const MICROSECOND: Self = Self(1_000);
    /// One millisecond
    pub const MILLISECOND: Self = Self(1_000_000);
    /// One second
    pub const SECOND: Self = Self(1_000_000_000);
    /// One minute
    pub const MINUTE: Self = Self(60 * Self::SECOND.0);
    /// One hour
    pub const HOUR: Self = Self(60 * Self::MINUTE.0);
    /// Longest representable span
    pub const MAX: Self = Self(i64::MAX);
    /// Most negative representable span
    pub const MIN: Self = Self(i64::MIN);

    /// Wrap a nanosecond count.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    /// Nanosecond count.
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    /// Seconds as a float, for display and rates.
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / Self::SECOND.0 as f64
    }

    /// Truncate a float nanosecond count toward zero, saturating at the
    /// `i64` bounds. `NaN` becomes zero.
    pub fn from_nanos_f64(nanos: f64) -> Self {
        Self(nanos as i64)
    }

    /// Parse the literal grammar; failures are [`Error::External`].
    ///
    /// # Examples
    ///
    /// ```
    /// use timetype::Duration;
    ///
    /// let d = Duration::parse("1h5m3s").unwrap();
    /// assert_eq!(d, Duration::HOUR + Duration::MINUTE * 5 + Duration::SECOND * 3);
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        literal::parse(text).map(Self).map_err(Error::external)
    }

    /// Decode stored text as one JSON token: a quoted literal or a bare
    /// nanosecond count. Driver text and the JSON boundary share these rules.
    pub(crate) fn from_token_bytes(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes).map_err(|err| {
            debug!(target_type = "duration", error = %err, "json_decode_rejected");
            Error::external(err)
        })?;
        Self::from_token(value)
    }

    /// Classify an already tokenized JSON value.
    pub(crate) fn from_token(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Self::parse(&text),
            Value::Number(number) => Ok(Self::from_number(&number)),
            other => {
                debug!(target_type = "duration", value = %other, "json_decode_rejected");
                Err(Error::InvalidDuration)
            }
        }
    }

    fn from_number(number: &Number) -> Self {
        match number.as_i64() {
            Some(nanos) => Self(nanos),
            None => Self::from_nanos_f64(number.as_f64().unwrap_or_default()),
        }
    }

    /// Absolute value, saturating at [`Duration::MAX`].
    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Returns true when the span is negative.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Returns true for [`Duration::ZERO`].
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Checked addition, `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Checked subtraction, `None` on overflow.
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Checked multiplication, `None` on overflow.
    pub fn checked_mul(self, rhs: i64) -> Option<Self> {
        self.0.checked_mul(rhs).map(Self)
    }

    /// Checked negation, `None` for [`Duration::MIN`].
    pub fn checked_neg(self) -> Option<Self> {
        self.0.checked_neg().map(Self)
    }
}

impl Add for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics on `i64` overflow; use [`Duration::checked_add`] for untrusted
    /// operands.
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics on `i64` overflow; use [`Duration::checked_sub`] for untrusted
    /// operands.
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics for [`Duration::MIN`], whose negation does not fit.
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i64> for Duration {
    type Output = Self;

    /// # Panics
    ///
    /// Panics on `i64` overflow; use [`Duration::checked_mul`] for untrusted
    /// factors.
    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl From<Duration> for TimeDelta {
    fn from(duration: Duration) -> Self {
        TimeDelta::nanoseconds(duration.0)
    }
}

impl TryFrom<TimeDelta> for Duration {
    type Error = Error;

    fn try_from(delta: TimeDelta) -> Result<Self> {
        delta.num_nanoseconds().map(Self).ok_or(Error::InvalidDuration)
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&literal::format(self.0))
    }
}

impl DriverCodec for Duration {
    fn from_driver(value: DriverValue) -> Result<Self> {
        match value {
            DriverValue::Null => Ok(Self::ZERO),
            DriverValue::Duration(delta) => Self::try_from(delta),
            DriverValue::Integer(nanos) => Ok(Self(nanos)),
            DriverValue::Real(nanos) => Ok(Self::from_nanos_f64(nanos)),
            DriverValue::Text(text) => Self::from_token_bytes(text.as_bytes()),
            DriverValue::Blob(bytes) => Self::from_token_bytes(&bytes),
            other => {
                debug!(target_type = "duration", kind = other.kind_name(), "driver_value_rejected");
                Err(Error::InvalidDuration)
            }
        }
    }

    fn to_driver(&self) -> DriverValue {
        DriverValue::Integer(self.0)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the duration codec.
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_unit_constants() {
        assert_eq!(Duration::MINUTE.as_nanos(), 60_000_000_000);
        assert_eq!(Duration::HOUR.as_nanos(), 3_600_000_000_000);
        assert_eq!(
            Duration::HOUR + Duration::MINUTE * 5 + Duration::SECOND * 3,
            Duration(3_903_000_000_000)
        );
        assert_eq!(-Duration::SECOND, Duration(-1_000_000_000));
        assert_eq!(Duration::SECOND - Duration::MILLISECOND, Duration(999_000_000));
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Duration::MAX.checked_add(Duration::NANOSECOND), None);
        assert_eq!(Duration::MIN.checked_sub(Duration::NANOSECOND), None);
        assert_eq!(Duration::MAX.checked_mul(2), None);
        assert_eq!(Duration::MIN.checked_neg(), None);
        assert_eq!(Duration::SECOND.checked_mul(3), Some(Duration::SECOND * 3));
        assert_eq!(Duration::MAX.checked_neg(), Some(Duration::MIN + Duration::NANOSECOND));
        assert_eq!(Duration::MIN.abs(), Duration::MAX);
        assert!((-Duration::SECOND).is_negative());
        assert!(Duration::default().is_zero());
        assert!(((Duration::MILLISECOND * 1500).as_secs_f64() - 1.5).abs() < f64::EPSILON);
    }

    /// Validates the literal text form.
    ///
    /// Assertions:
    /// - Confirms display uses the canonical literal.
    /// - Confirms parse failures are the external kind with the literal
    ///   parser's message.
    #[test]
    fn test_text_form() {
        assert_eq!(Duration(3_903_000_000_000).to_string(), "1h5m3s");
        assert_eq!("2h3m".parse::<Duration>().unwrap(), Duration::HOUR * 2 + Duration::MINUTE * 3);

        let err = Duration::parse("123").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::External);
        assert_eq!(err.to_string(), r#"missing unit in duration "123""#);
    }

    #[test]
    fn test_time_delta_conversions() {
        let delta = TimeDelta::minutes(5);
        assert_eq!(Duration::try_from(delta).unwrap(), Duration::MINUTE * 5);
        assert_eq!(TimeDelta::from(Duration::SECOND), TimeDelta::seconds(1));
        assert_eq!(Duration::try_from(TimeDelta::days(200_000)).unwrap_err(), Error::InvalidDuration);
    }

    /// Validates the driver scan dispatch table.
    ///
    /// Assertions:
    /// - Confirms every accepted shape converts to the expected nanoseconds.
    /// - Confirms a boolean is the sentinel and leaves the target zeroed.
    #[test]
    fn test_scan() {
        let cases = [
            (DriverValue::Null, Duration::ZERO),
            (DriverValue::Duration(TimeDelta::minutes(5)), Duration::MINUTE * 5),
            (DriverValue::Real(10_000_001_000.0), Duration::SECOND * 10 + Duration::MICROSECOND),
            (DriverValue::Real(1.9), Duration::NANOSECOND),
            (DriverValue::Integer(32 * Duration::HOUR.as_nanos()), Duration::HOUR * 32),
            (
                DriverValue::from(r#""5h3m2s""#),
                Duration::HOUR * 5 + Duration::MINUTE * 3 + Duration::SECOND * 2,
            ),
            (DriverValue::from(br#""2h3m""#.to_vec()), Duration::HOUR * 2 + Duration::MINUTE * 3),
        ];

        for (i, (value, expected)) in cases.into_iter().enumerate() {
            let mut d = Duration::SECOND;
            d.scan(value).unwrap_or_else(|err| panic!("case #{i}: {err}"));
            assert_eq!(d, expected, "case #{i}");
        }

        let mut d = Duration::SECOND;
        let err = d.scan(DriverValue::Bool(true)).unwrap_err();
        assert_eq!(err, Error::InvalidDuration);
        assert_eq!(err.to_string(), "timetype: invalid duration");
        assert_eq!(d, Duration::ZERO);
    }

    #[test]
    #[should_panic]
    fn test_neg_min_panics() {
        let _ = -Duration::MIN;
    }

    /// Validates driver text decoding, which runs with or without the
    /// `json` feature.
    ///
    /// Assertions:
    /// - Confirms a bare numeric string is nanoseconds, fraction truncated.
    /// - Confirms an unquoted literal is the external kind.
    /// - Confirms unbalanced quotes are the external kind.
    /// - Confirms a non-string, non-number token is the sentinel.
    #[test]
    fn test_scan_text_rules() {
        assert_eq!(Duration::from_driver(DriverValue::from("123")).unwrap(), Duration(123));
        assert_eq!(Duration::from_driver(DriverValue::from("-7.9")).unwrap(), Duration(-7));
        assert_eq!(
            Duration::from_driver(DriverValue::from(b"42".to_vec())).unwrap(),
            Duration(42)
        );

        for text in ["1h", "\"1h", "1h\"", ""] {
            let err = Duration::from_driver(DriverValue::from(text)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::External, "input {text:?}");
        }

        let err = Duration::from_driver(DriverValue::from("\"123\"")).unwrap_err();
        assert_eq!(err.to_string(), r#"missing unit in duration "123""#);

        let err = Duration::from_driver(DriverValue::from("true")).unwrap_err();
        assert_eq!(err, Error::InvalidDuration);
    }

    #[test]
    fn test_value() {
        let cases = [
            Duration::HOUR * 2 + Duration::MINUTE * 3,
            Duration::HOUR * 5 + Duration::MINUTE * 3 + Duration::SECOND * 2,
            Duration::SECOND,
            Duration::MILLISECOND,
            Duration::NANOSECOND,
        ];
        for d in cases {
            assert_eq!(d.value().unwrap(), DriverValue::Integer(d.as_nanos()));
        }
    }
}
