//! Duration literal grammar
//!
//! Parses and formats signed nanosecond counts written as a sequence of
//! number-plus-unit tokens:
//!
//! - `"300ms"`, `"-1.5h"`, `"2h45m"`, `"1h5m3s"`
//! - units: `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m`, `h`
//! - a bare `"0"` is the only unitless literal
//!
//! [`format`] produces the canonical form that [`parse`] reads back.

use thiserror::Error;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: u64 = 1_000_000_000;
const NANOS_PER_MINUTE: u64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MINUTE;

/// Largest magnitude a literal may reach; `-(1 << 63)` is still representable.
const MAX_MAGNITUDE: u64 = 1 << 63;

/// Error type for literal parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

/// Parse a duration literal into signed nanoseconds.
///
/// # Examples
///
/// ```
/// use timetype::literal::parse;
///
/// assert_eq!(parse("1h5m3s").unwrap(), 3_903_000_000_000);
/// assert_eq!(parse("-1.5us").unwrap(), -1_500);
/// assert_eq!(parse("0").unwrap(), 0);
/// assert!(parse("123").is_err());
/// ```
pub fn parse(input: &str) -> Result<i64, LiteralError> {
    let invalid = || LiteralError::Invalid(input.to_string());

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;

    while !s.is_empty() {
        // Whole part
        let int_len = leading_digits(s);
        let whole = s[..int_len].bytes().try_fold(0u64, |acc, b| {
            acc.checked_mul(10).and_then(|acc| acc.checked_add(u64::from(b - b'0')))
        });
        let whole = whole.ok_or_else(invalid)?;
        let had_whole = int_len > 0;
        s = &s[int_len..];

        // Fraction, digits past what fits in u64 are dropped
        let mut fraction: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut had_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let frac_len = leading_digits(rest);
            had_fraction = frac_len > 0;
            let mut overflowed = false;
            for b in rest[..frac_len].bytes() {
                if overflowed {
                    continue;
                }
                match fraction.checked_mul(10).and_then(|f| f.checked_add(u64::from(b - b'0'))) {
                    Some(next) => {
                        fraction = next;
                        scale *= 10.0;
                    }
                    None => overflowed = true,
                }
            }
            s = &rest[frac_len..];
        }

        if !had_whole && !had_fraction {
            return Err(invalid());
        }

        // Unit runs until the next number
        let unit_len = s.find(|c: char| c == '.' || c.is_ascii_digit()).unwrap_or(s.len());
        if unit_len == 0 {
            return Err(LiteralError::MissingUnit(input.to_string()));
        }
        let (unit, rest) = s.split_at(unit_len);
        let per_unit = unit_nanos(unit).ok_or_else(|| LiteralError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let mut value = whole.checked_mul(per_unit).ok_or_else(invalid)?;
        if fraction > 0 {
            // Float precision is enough here: the product is below one unit
            let extra = (fraction as f64 * (per_unit as f64 / scale)) as u64;
            value = value.checked_add(extra).ok_or_else(invalid)?;
        }

        total = total.checked_add(value).ok_or_else(invalid)?;
        if total > MAX_MAGNITUDE {
            return Err(invalid());
        }
        s = rest;
    }

    let signed = if negative { -i128::from(total) } else { i128::from(total) };
    i64::try_from(signed).map_err(|_| invalid())
}

/// Split `value` into its whole part and a `.ddd` suffix with `precision`
/// fractional digits, trailing zeros trimmed. The suffix is empty when the
/// fraction is zero.
fn split_fraction(value: u64, precision: u32) -> (u64, String) {
    let scale = 10u64.pow(precision);
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return (whole, String::new());
    }

    let digits = format!("{fraction:0width$}", width = precision as usize);
    (whole, format!(".{}", digits.trim_end_matches('0')))
}

/// Format signed nanoseconds as the canonical literal.
///
/// # Examples
///
/// ```
/// use timetype::literal::format;
///
/// assert_eq!(format(0), "0s");
/// assert_eq!(format(1_500), "1.5µs");
/// assert_eq!(format(3_903_000_000_000), "1h5m3s");
/// assert_eq!(format(-90_000_000_000), "-1m30s");
/// ```
pub fn format(nanos: i64) -> String {
    if nanos == 0 {
        return "0s".to_string();
    }

    let magnitude = nanos.unsigned_abs();
    let sign = if nanos < 0 { "-" } else { "" };

    if magnitude < NANOS_PER_SECOND {
        let (precision, unit) = if magnitude < NANOS_PER_MICRO {
            (0, "ns")
        } else if magnitude < NANOS_PER_MILLI {
            (3, "\u{00b5}s")
        } else {
            (6, "ms")
        };
        let (whole, fraction) = split_fraction(magnitude, precision);
        return format!("{sign}{whole}{fraction}{unit}");
    }

    let (total_secs, fraction) = split_fraction(magnitude, 9);
    let seconds = total_secs % 60;
    let total_mins = total_secs / 60;

    let mut out = String::from(sign);
    if total_mins > 0 {
        let hours = total_mins / 60;
        if hours > 0 {
            out.push_str(&format!("{hours}h"));
        }
        out.push_str(&format!("{}m", total_mins % 60));
    }
    out.push_str(&format!("{seconds}{fraction}s"));
    out
}
