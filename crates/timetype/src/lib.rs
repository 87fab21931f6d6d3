//! Time-of-day and duration values that round-trip across JSON, SQL driver
//! and display boundaries.
//!
//! # Types
//!
//! - [`Clock`]: hour, minute, second, sub-second and zone; the date is
//!   pinned and ignored.
//! - [`Duration`]: signed nanoseconds with a `"1h5m3s"` literal form.
//!
//! # Errors
//!
//! Every codec failure is one [`Error`], classified as a sentinel ("wrong
//! shape"), an [`UnknownFormatError`] (every layout tried and failed) or an
//! [`ExternalError`] (a collaborating parser failed). See [`error`].
//!
//! # Feature Tiers
//!
//! - `json` (default): `from_json`/`to_json` and serde impls
//! - `sqlite` (default): `rusqlite` `ToSql`/`FromSql` impls
//!
//! ```rust
//! use timetype::{Clock, DriverCodec, DriverValue, Duration};
//!
//! let clock = Clock::parse("2:21:55").unwrap();
//! assert_eq!(clock.to_string(), "02:21:55 UTC");
//! assert_eq!(clock.to_driver(), DriverValue::Text("02:21:55.000000".into()));
//!
//! let d: Duration = "1h5m3s".parse().unwrap();
//! assert_eq!(d.to_driver(), DriverValue::Integer(3_903_000_000_000));
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod clock;
pub mod driver;
pub mod duration;
pub mod error;
pub mod layout;
pub mod literal;

#[cfg(feature = "json")]
pub mod json;
#[cfg(feature = "sqlite")]
pub mod sqlite;

// Re-export commonly used types and traits for convenience
// ------------------------
pub use clock::Clock;
pub use driver::{DriverCodec, DriverValue};
pub use duration::Duration;
pub use error::{Error, ErrorKind, ExternalError, Result, UnknownFormatError};
pub use layout::{ISO8601_CLOCK, ISO8601_CLOCK_MICRO};
pub use literal::LiteralError;
