//! SQLite column support through `rusqlite`
//!
//! [`Clock`] is stored as `TEXT` (`HH:MM:SS.ffffff`) and [`Duration`] as
//! `INTEGER` nanoseconds. Reads go through [`DriverCodec::from_driver`], so a
//! column holds exactly what the driver codec accepts; failures surface as
//! [`FromSqlError::Other`] wrapping the codec [`Error`](crate::Error).

use chrono::TimeDelta;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};

use crate::clock::Clock;
use crate::driver::{DriverCodec, DriverValue};
use crate::duration::Duration;

impl From<ValueRef<'_>> for DriverValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(n) => Self::Integer(n),
            ValueRef::Real(f) => Self::Real(f),
            ValueRef::Text(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => Self::Text(text.to_string()),
                Err(_) => Self::Blob(bytes.to_vec()),
            },
            ValueRef::Blob(bytes) => Self::Blob(bytes.to_vec()),
        }
    }
}

impl From<DriverValue> for Value {
    /// SQLite has no native time or duration column, so those render as
    /// text and integer nanoseconds. A delta past the `i64` nanosecond range
    /// saturates at the nearest bound.
    fn from(value: DriverValue) -> Self {
        match value {
            DriverValue::Null => Self::Null,
            DriverValue::Integer(n) => Self::Integer(n),
            DriverValue::Real(f) => Self::Real(f),
            DriverValue::Bool(b) => Self::Integer(i64::from(b)),
            DriverValue::Text(text) => Self::Text(text),
            DriverValue::Blob(bytes) => Self::Blob(bytes),
            DriverValue::Time(datetime) => Self::Text(datetime.to_rfc3339()),
            DriverValue::Duration(delta) => Self::Integer(saturating_nanos(delta)),
        }
    }
}

fn saturating_nanos(delta: TimeDelta) -> i64 {
    match delta.num_nanoseconds() {
        Some(nanos) => nanos,
        None if delta < TimeDelta::zero() => i64::MIN,
        None => i64::MAX,
    }
}

fn column_result<T: DriverCodec>(value: ValueRef<'_>) -> FromSqlResult<T> {
    T::from_driver(DriverValue::from(value)).map_err(|err| FromSqlError::Other(Box::new(err)))
}

impl ToSql for Clock {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::from(self.to_driver())))
    }
}

impl FromSql for Clock {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        column_result(value)
    }
}

impl ToSql for Duration {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::from(self.to_driver())))
    }
}

impl FromSql for Duration {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        column_result(value)
    }
}
