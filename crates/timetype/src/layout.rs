//! Clock text layouts and the ordered layout trial
//!
//! Layouts are `chrono` strftime patterns. The registry order is the trial
//! order and also the order reported in [`UnknownFormatError`] diagnostics.
//!
//! When parsing, [`ISO8601_CLOCK`] also accepts a trailing fraction of any
//! length (`19:24:00.5`, `19:24:00.123456789`). [`ISO8601_CLOCK_MICRO`] keeps
//! its exact six digits.

use chrono::NaiveTime;
use tracing::trace;

use crate::error::UnknownFormatError;

/// `HH:MM:SS`, 24-hour
pub const ISO8601_CLOCK: &str = "%H:%M:%S";

/// `HH:MM:SS.ffffff`, microsecond precision
pub const ISO8601_CLOCK_MICRO: &str = "%H:%M:%S%.6f";

/// Every known clock layout, in trial order.
pub const LAYOUTS: &[&str] = &[ISO8601_CLOCK, ISO8601_CLOCK_MICRO];

/// Layouts accepted when decoding JSON strings.
pub const JSON_LAYOUTS: &[&str] = &[ISO8601_CLOCK, ISO8601_CLOCK_MICRO];

/// Layouts accepted when scanning stored driver values.
pub const DRIVER_LAYOUTS: &[&str] = &[ISO8601_CLOCK_MICRO];

/// Layout used for JSON and driver output.
pub(crate) const OUTPUT_LAYOUT: &str = ISO8601_CLOCK_MICRO;

/// Layout used for the human-readable display form.
pub(crate) const DISPLAY_LAYOUT: &str = ISO8601_CLOCK;

/// Pattern actually handed to the parser for `layout`.
fn parse_pattern(layout: &str) -> &str {
    if layout == ISO8601_CLOCK {
        "%H:%M:%S%.f"
    } else {
        layout
    }
}

/// Parse `text` with each layout in order; the first success wins.
///
/// When every layout fails, the returned error carries one parser error per
/// layout, in the same order as `layouts`.
///
/// # Examples
///
/// ```
/// use timetype::layout::{parse_in_layouts, LAYOUTS};
///
/// let t = parse_in_layouts("19:24:00.000250", LAYOUTS).unwrap();
/// assert_eq!(t.to_string(), "19:24:00.000250");
///
/// let err = parse_in_layouts("abacaba", LAYOUTS).unwrap_err();
/// assert_eq!(err.layouts, LAYOUTS);
/// assert_eq!(err.errors.len(), 2);
/// ```
pub fn parse_in_layouts(
    text: &str,
    layouts: &[&'static str],
) -> Result<NaiveTime, UnknownFormatError> {
    let mut failure = UnknownFormatError::new(text);

    for &layout in layouts {
        match NaiveTime::parse_from_str(text, parse_pattern(layout)) {
            Ok(time) => return Ok(time),
            Err(err) => {
                trace!(layout, error = %err, "clock_layout_rejected");
                failure.push(layout, err);
            }
        }
    }

    Err(failure)
}

#[cfg(test)]
mod tests {
    //! Unit tests for the layout registry.
    use chrono::Timelike;

    use super::*;

    #[test]
    fn test_registry_order() {
        assert_eq!(LAYOUTS, &[ISO8601_CLOCK, ISO8601_CLOCK_MICRO]);
        assert_eq!(JSON_LAYOUTS, LAYOUTS);
        assert_eq!(DRIVER_LAYOUTS, &[ISO8601_CLOCK_MICRO]);
    }

    /// Validates that the first matching layout wins.
    ///
    /// Assertions:
    /// - Confirms a plain `H:M:S` value parses.
    /// - Confirms a microsecond value parses through the second layout.
    #[test]
    fn test_first_match_wins() {
        let plain = parse_in_layouts("17:54:00", LAYOUTS).unwrap();
        assert_eq!((plain.hour(), plain.minute(), plain.second()), (17, 54, 0));

        let micro = parse_in_layouts("02:19:30.000001", LAYOUTS).unwrap();
        assert_eq!(micro.nanosecond(), 1_000);
    }

    /// Validates fraction lengths per layout.
    ///
    /// Assertions:
    /// - Confirms the plain layout takes any number of fraction digits.
    /// - Confirms the microsecond layout alone rejects other lengths.
    #[test]
    fn test_fraction_lengths() {
        let short = parse_in_layouts("19:24:00.5", LAYOUTS).unwrap();
        assert_eq!(short.nanosecond(), 500_000_000);

        let long = parse_in_layouts("19:24:00.123456789", LAYOUTS).unwrap();
        assert_eq!(long.nanosecond(), 123_456_789);

        assert!(parse_in_layouts("19:24:00.5", DRIVER_LAYOUTS).is_err());
        assert!(parse_in_layouts("19:24:00.123456789", DRIVER_LAYOUTS).is_err());
    }

    #[test]
    fn test_single_digit_hour() {
        let t = parse_in_layouts("2:21:55.000000", DRIVER_LAYOUTS).unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (2, 21, 55));
    }

    /// Validates that every failure is collected in registry order.
    ///
    /// Assertions:
    /// - Confirms the aggregate lists both layouts.
    /// - Confirms one error was recorded per layout.
    #[test]
    fn test_collects_every_failure() {
        let err = parse_in_layouts("19:24:c00.000000", LAYOUTS).unwrap_err();
        assert_eq!(err.value, "19:24:c00.000000");
        assert_eq!(err.layouts, vec![ISO8601_CLOCK, ISO8601_CLOCK_MICRO]);
        assert_eq!(err.errors.len(), 2);
    }

    #[test]
    fn test_empty_layout_list() {
        let err = parse_in_layouts("12:00:00", &[]).unwrap_err();
        assert!(err.layouts.is_empty());
        assert!(err.errors.is_empty());
    }
}
