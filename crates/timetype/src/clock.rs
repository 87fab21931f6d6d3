//! Wall-clock time of day
//!
//! A [`Clock`] is hour, minute, second, sub-second and zone. It wraps a
//! `DateTime<Tz>` whose calendar date is pinned to `0000-01-01`, so the date
//! never shows up in formatting. Equality, hashing and ordering look at the
//! wall-clock fields and the zone, never at the underlying instant, so
//! `13:00 Europe/Moscow` and the same moment rendered in UTC are different
//! clocks.
//!
//! Text forms:
//!
//! | Boundary | Form |
//! |----------|------|
//! | JSON / driver value | `"HH:MM:SS.ffffff"` |
//! | `Display` | `HH:MM:SS Zone` |
//! | `Debug` | `timetype::Clock::new(H, M, S, Zone)` |

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;
use tracing::debug;

use crate::driver::{DriverCodec, DriverValue};
use crate::error::{Error, Result};
use crate::layout::{self, DISPLAY_LAYOUT, DRIVER_LAYOUTS, LAYOUTS, OUTPUT_LAYOUT};

const SECONDS_PER_DAY: u64 = 86_400;
const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Placeholder date every clock is materialized at.
fn epoch_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(0, 1, 1).unwrap_or_default()
}

/// A time of day with zone; the date is fixed and ignored.
#[derive(Clone, Copy)]
pub struct Clock(DateTime<Tz>);

impl Clock {
    /// Build a clock in `tz`.
    ///
    /// Components past their range wrap around the day: extra nanoseconds
    /// carry into seconds, and `25:00:00` becomes `01:00:00`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono_tz::Europe::Moscow;
    /// use timetype::Clock;
    ///
    /// let clock = Clock::new(13, 24, 32, 0, Moscow);
    /// assert_eq!(clock.to_string(), "13:24:32 Europe/Moscow");
    /// ```
    pub fn new(hour: u32, minute: u32, second: u32, nanosecond: u32, tz: Tz) -> Self {
        let nanos = u64::from(nanosecond);
        let total_secs = u64::from(hour) * 3_600
            + u64::from(minute) * 60
            + u64::from(second)
            + nanos / NANOS_PER_SECOND;
        let secs = (total_secs % SECONDS_PER_DAY) as u32;
        let subsec = (nanos % NANOS_PER_SECOND) as u32;
        let time =
            NaiveTime::from_num_seconds_from_midnight_opt(secs, subsec).unwrap_or_default();
        Self::from_naive_time(time, tz)
    }

    /// Build a clock in UTC.
    pub fn new_utc(hour: u32, minute: u32, second: u32, nanosecond: u32) -> Self {
        Self::new(hour, minute, second, nanosecond, Tz::UTC)
    }

    /// Pin `time` to the placeholder date in `tz`.
    pub fn from_naive_time(time: NaiveTime, tz: Tz) -> Self {
        let naive = NaiveDateTime::new(epoch_date(), time);
        let local = tz.from_local_datetime(&naive).earliest();
        Self(local.unwrap_or_else(|| tz.from_utc_datetime(&naive)))
    }

    /// Keep the wall-clock fields and zone of `datetime`, dropping its date.
    pub fn from_datetime(datetime: DateTime<Tz>) -> Self {
        Self::from_naive_time(datetime.time(), datetime.timezone())
    }

    /// Parse `text` with every registry layout, in UTC.
    ///
    /// Empty text is the wrong shape and returns [`Error::InvalidClock`]; text
    /// that no layout accepts returns [`Error::UnknownFormat`].
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_in(text, LAYOUTS)
    }

    /// Parse `text` trying only `layouts`, in UTC.
    pub fn parse_in(text: &str, layouts: &[&'static str]) -> Result<Self> {
        if text.is_empty() {
            return Err(Error::InvalidClock);
        }
        let time = layout::parse_in_layouts(text, layouts)?;
        Ok(Self::from_naive_time(time, Tz::UTC))
    }

    /// Hour of the day, `0..24`.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Minute of the hour.
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Second of the minute.
    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Sub-second part in nanoseconds.
    pub fn nanosecond(&self) -> u32 {
        self.0.nanosecond()
    }

    /// Zone the clock was built in.
    pub fn timezone(&self) -> Tz {
        self.0.timezone()
    }

    /// Wall-clock fields without zone.
    pub fn naive_time(&self) -> NaiveTime {
        self.0.time()
    }

    /// The wrapped point in time, dated `0000-01-01`.
    pub fn as_datetime(&self) -> &DateTime<Tz> {
        &self.0
    }

    /// Wall-clock fields first, then zone name.
    fn sort_key(&self) -> (NaiveTime, &'static str) {
        (self.naive_time(), self.timezone().name())
    }

    /// `HH:MM:SS.ffffff`, the JSON and driver form.
    pub fn format_micros(&self) -> String {
        self.0.format(OUTPUT_LAYOUT).to_string()
    }
}

impl Default for Clock {
    /// Midnight UTC.
    fn default() -> Self {
        Self::from_naive_time(NaiveTime::default(), Tz::UTC)
    }
}

impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        self.naive_time() == other.naive_time() && self.timezone() == other.timezone()
    }
}

impl Eq for Clock {}

impl Hash for Clock {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.naive_time().hash(state);
        self.timezone().hash(state);
    }
}

impl PartialOrd for Clock {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Clock {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl From<Clock> for DateTime<Tz> {
    fn from(clock: Clock) -> Self {
        clock.0
    }
}

impl From<DateTime<Tz>> for Clock {
    fn from(datetime: DateTime<Tz>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl FromStr for Clock {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0.format(DISPLAY_LAYOUT), self.timezone().name())
    }
}

impl fmt::Debug for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timetype::Clock::new({}, {}, {}, {})",
            self.hour(),
            self.minute(),
            self.second(),
            self.timezone().name()
        )
    }
}

impl DriverCodec for Clock {
    fn from_driver(value: DriverValue) -> Result<Self> {
        match value {
            DriverValue::Null => Ok(Self::default()),
            DriverValue::Time(datetime) => Ok(Self::from_datetime(datetime)),
            DriverValue::Text(text) => Self::parse_in(&text, DRIVER_LAYOUTS),
            DriverValue::Blob(bytes) => {
                let text = String::from_utf8(bytes).map_err(Error::external)?;
                Self::parse_in(&text, DRIVER_LAYOUTS)
            }
            other => {
                debug!(target_type = "clock", kind = other.kind_name(), "driver_value_rejected");
                Err(Error::InvalidClock)
            }
        }
    }

    fn to_driver(&self) -> DriverValue {
        DriverValue::Text(self.format_micros())
    }
}
