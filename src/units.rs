//! Scheduler unit conversions.
//!
//! This module converts between the formats the scheduler emits in job
//! records and the values the mail tool works with: memory-usage strings
//! (`"1234K"`, `"2G"`) into kilobyte counts, kilobyte counts into
//! human-readable binary sizes, and elapsed-time strings
//! (`"1-02:03:04.500000"`) into microsecond counts.

use std::sync::LazyLock;

use regex::Regex;
use tracing::error;

use crate::fatal::FatalError;

/// Binary unit suffixes walked by [`str_from_kbytes`]. Values that stay
/// above 1024 through the whole sequence are rendered as YiB.
const BINARY_UNITS: &[&str] = &["Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "Zi"];

/// Anchored pattern for scheduler elapsed-time strings:
/// `[[days-]hours:]minutes:seconds[.microseconds]`.
static ELAPSED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((?P<days>\d+)-)?((?P<hours>\d+):)?(?P<mins>\d+):(?P<secs>\d+)(\.(?P<usec>\d+))?",
    )
    .expect("elapsed-time pattern is valid")
});

/// Parse a scheduler memory-usage string into a number of KiB.
///
/// The input is a numeric component followed by a single unit letter
/// (`K`, `M`, `G`, or `T`, case-insensitive). The numeric component may
/// carry a fractional part, which is truncated before scaling, so
/// `"1.5M"` is 1 MiB rather than 1.5 MiB, matching the scheduler's own
/// integer accounting.
///
/// An empty string or a literal `"0"` is 0. Malformed input (non-numeric
/// component, unknown unit letter) is logged and also reported as 0: a
/// bad memory figure must not abort the email being assembled.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn kbytes_from_str(value: &str) -> u64 {
    if value.is_empty() || value == "0" {
        return 0;
    }

    let mut chars = value.chars();
    let Some(unit) = chars.next_back() else {
        return 0;
    };
    let number = chars.as_str();

    let Ok(quantity) = number.parse::<f64>() else {
        error!(
            "kbytes_from_str: input value: {value}, numeric component: {number}, units: {unit}"
        );
        return 0;
    };
    let kbytes = quantity.trunc() as u64;

    match unit.to_ascii_uppercase() {
        'K' => kbytes,
        'M' => 1024 * kbytes,
        'G' => 1_048_576 * kbytes,
        'T' => 1_073_741_824 * kbytes,
        _ => {
            error!("kbytes_from_str: unknown unit '{unit}' for value '{value}'");
            0
        }
    }
}

/// Format a KiB count as a human-readable binary size.
///
/// Divides by 1024 through the unit sequence Ki, Mi, Gi, Ti, Pi, Ei, Zi
/// until the magnitude drops below 1024, then formats with exactly two
/// decimal places; anything still at or above 1024 ZiB is rendered as
/// YiB regardless of magnitude.
///
/// `str_from_kbytes(0.0)` is `"0.00KiB"`; `str_from_kbytes(1024.0)` is
/// `"1.00MiB"`.
#[must_use]
pub fn str_from_kbytes(value: f64) -> String {
    let mut value = value;

    for unit in BINARY_UNITS {
        if value.abs() < 1024.0 {
            return format!("{value:.2}{unit}B");
        }
        value /= 1024.0;
    }

    format!("{value:.2}YiB")
}

/// Parse a scheduler elapsed-time string into microseconds.
///
/// Accepts `[[days-]hours:]minutes:seconds[.microseconds]`. The fractional
/// suffix is the literal microsecond count as the scheduler writes it
/// (always six digits in practice). The days component only contributes
/// when the hours component is present too; scheduler strings always pair
/// them.
///
/// # Errors
///
/// Returns a [`FatalError`] when the string does not match the pattern at
/// all. Unlike [`kbytes_from_str`], an unparseable elapsed time means the
/// job record itself is broken and the program cannot proceed.
pub fn usec_from_str(time_str: &str) -> Result<u64, FatalError> {
    let Some(caps) = ELAPSED_RE.captures(time_str) else {
        return Err(FatalError::new(format!("Could not parse: {time_str}")));
    };

    let group = |name: &str| -> u64 {
        caps.name(name)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0))
    };

    let mut usec = group("usec");
    usec += group("secs") * 1_000_000;
    usec += group("mins") * 1_000_000 * 60;
    if caps.name("hours").is_some() {
        usec += group("hours") * 1_000_000 * 3600;
        if caps.name("days").is_some() {
            usec += group("days") * 1_000_000 * 86400;
        }
    }

    Ok(usec)
}
