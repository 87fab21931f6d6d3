//! JSON boundary for [`Clock`] and [`Duration`]
//!
//! `from_json` tokenizes exactly one JSON value with `serde_json` and then
//! classifies it:
//!
//! | Input | Clock | Duration |
//! |-------|-------|----------|
//! | not valid JSON (`19:24:00`, `1h5m3s`) | [`Error::External`] | [`Error::External`] |
//! | string | layouts [`JSON_LAYOUTS`] | literal grammar |
//! | number | [`Error::InvalidClock`] | nanoseconds, fraction truncated |
//! | anything else | [`Error::InvalidClock`] | [`Error::InvalidDuration`] |
//!
//! The serde impls apply the same rules, so a `Clock` or `Duration` field in
//! a `#[derive(Deserialize)]` struct behaves like `from_json`.
//!
//! # Usage
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use timetype::{Clock, Duration};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Shift {
//!     starts_at: Clock,
//!     length: Duration,
//! }
//!
//! let shift: Shift =
//!     serde_json::from_str(r#"{"starts_at":"09:30:00","length":"8h30m"}"#).unwrap();
//! assert_eq!(shift.starts_at, Clock::new_utc(9, 30, 0, 0));
//! assert_eq!(
//!     serde_json::to_string(&shift).unwrap(),
//!     r#"{"starts_at":"09:30:00.000000","length":"8h30m0s"}"#
//! );
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::clock::Clock;
use crate::duration::Duration;
use crate::error::{Error, Result};
use crate::layout::JSON_LAYOUTS;

/// Serde serialization result type
type SerializeResult<S> = std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

fn tokenize(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|err| {
        debug!(error = %err, "json_decode_rejected");
        Error::external(err)
    })
}

fn quote(text: String) -> Vec<u8> {
    Value::String(text).to_string().into_bytes()
}

impl Clock {
    /// Decode a quoted `"HH:MM:SS"` or `"HH:MM:SS.ffffff"` JSON string, in
    /// UTC.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetype::{Clock, Error};
    ///
    /// let clock = Clock::from_json(br#""19:24:00.000000""#).unwrap();
    /// assert_eq!(clock, Clock::new_utc(19, 24, 0, 0));
    ///
    /// assert_eq!(Clock::from_json(b"32145").unwrap_err(), Error::InvalidClock);
    /// ```
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Self::from_json_value(tokenize(bytes)?)
    }

    /// Decode an already tokenized JSON value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Self::parse_in(&text, JSON_LAYOUTS),
            other => {
                debug!(target_type = "clock", value = %other, "json_decode_rejected");
                Err(Error::InvalidClock)
            }
        }
    }

    /// Encode as a quoted `"HH:MM:SS.ffffff"` string, ignoring the zone.
    pub fn to_json(&self) -> Vec<u8> {
        quote(self.format_micros())
    }
}

impl Duration {
    /// Decode a quoted literal (`"1h5m3s"`) or a bare nanosecond count.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetype::Duration;
    ///
    /// let quoted = Duration::from_json(br#""1h5m3s""#).unwrap();
    /// let bare = Duration::from_json(b"3903000000000").unwrap();
    /// assert_eq!(quoted, bare);
    /// ```
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Self::from_token_bytes(bytes)
    }

    /// Decode an already tokenized JSON value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        Self::from_token(value)
    }

    /// Encode as the quoted canonical literal.
    pub fn to_json(&self) -> Vec<u8> {
        quote(self.to_string())
    }
}

impl Serialize for Clock {
    fn serialize<S>(&self, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_micros())
    }
}

impl<'de> Deserialize<'de> for Clock {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json_value(value).map_err(de::Error::custom)
    }
}

impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> SerializeResult<S>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json_value(value).map_err(de::Error::custom)
    }
}
