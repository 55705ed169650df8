use core::fmt::Write;
use core::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Timelike, Utc};

use crate::text::{InvariantFormat, InvariantParse};

const NANOS_PER_TICK: u32 = 100;
const TICK_DIGITS: usize = 7;
const SECS_PER_DAY: u64 = 86_400;

// -----------------------------------------------------------------------------
// Date and time

fn format_naive(value: &NaiveDateTime) -> String {
    // Leap seconds carry nanoseconds past one second.
    let ticks = value.nanosecond() % 1_000_000_000 / NANOS_PER_TICK;
    format!(
        "{}.{ticks:0width$}",
        value.format("%Y-%m-%dT%H:%M:%S"),
        width = TICK_DIGITS
    )
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

impl InvariantFormat for NaiveDateTime {
    #[inline]
    fn invariant_format(&self) -> String {
        format_naive(self)
    }
}

impl InvariantParse for NaiveDateTime {
    fn invariant_parse(text: &str) -> Option<Self> {
        let text = text.trim();
        parse_naive(text).or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|value| value.naive_utc())
        })
    }
}

impl InvariantFormat for DateTime<Utc> {
    fn invariant_format(&self) -> String {
        let mut text = format_naive(&self.naive_utc());
        text.push('Z');
        text
    }
}

impl InvariantParse for DateTime<Utc> {
    fn invariant_parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match DateTime::parse_from_rfc3339(text) {
            Ok(value) => Some(value.with_timezone(&Utc)),
            Err(_) => parse_naive(text).map(|value| value.and_utc()),
        }
    }
}

impl InvariantFormat for DateTime<FixedOffset> {
    fn invariant_format(&self) -> String {
        let mut text = format_naive(&self.naive_local());
        let _ = write!(text, "{}", self.format("%:z"));
        text
    }
}

impl InvariantParse for DateTime<FixedOffset> {
    fn invariant_parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match DateTime::parse_from_rfc3339(text) {
            Ok(value) => Some(value),
            Err(_) => parse_naive(text).map(|value| value.and_utc().fixed_offset()),
        }
    }
}

// -----------------------------------------------------------------------------
// Time span

/// Formats `[-][d.]hh:mm:ss[.fffffff]`, truncating to 100ns ticks.
fn format_time_span(negative: bool, total_secs: u64, nanos: u32) -> String {
    let days = total_secs / SECS_PER_DAY;
    let hours = total_secs / 3600 % 24;
    let minutes = total_secs / 60 % 60;
    let seconds = total_secs % 60;
    let ticks = nanos / NANOS_PER_TICK;

    let mut text = String::with_capacity(26);
    if negative {
        text.push('-');
    }
    if days > 0 {
        let _ = write!(text, "{days}.");
    }
    let _ = write!(text, "{hours:02}:{minutes:02}:{seconds:02}");
    if ticks > 0 {
        let _ = write!(text, ".{ticks:0width$}", width = TICK_DIGITS);
    }
    text
}

fn digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parses a fraction of a second into nanoseconds.
fn fraction(text: &str) -> Option<u32> {
    if text.len() > 9 {
        return None;
    }
    let value = digits(text)?;
    let scale = 10_u64.pow((9 - text.len()) as u32);
    u32::try_from(value * scale).ok()
}

/// Parses `[-][d.]hh:mm[:ss[.fffffff]]` or `[-]d`.
///
/// Returns the sign, whole seconds and nanoseconds.
fn parse_time_span(text: &str) -> Option<(bool, u64, u32)> {
    let text = text.trim();
    let (negative, text) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let Some((head, clock)) = text.split_once(':') else {
        let days = digits(text)?;
        return Some((negative, days.checked_mul(SECS_PER_DAY)?, 0));
    };

    let (days, hours) = match head.split_once('.') {
        Some((days, hours)) => (digits(days)?, digits(hours)?),
        None => (0, digits(head)?),
    };

    let (minutes, rest) = match clock.split_once(':') {
        Some((minutes, rest)) => (digits(minutes)?, Some(rest)),
        None => (digits(clock)?, None),
    };

    let (seconds, nanos) = match rest {
        None => (0, 0),
        Some(rest) => match rest.split_once('.') {
            Some((seconds, frac)) => (digits(seconds)?, fraction(frac)?),
            None => (digits(rest)?, 0),
        },
    };

    if hours >= 24 || minutes >= 60 || seconds >= 60 {
        return None;
    }

    let total = days
        .checked_mul(SECS_PER_DAY)?
        .checked_add(hours * 3600 + minutes * 60 + seconds)?;
    Some((negative, total, nanos))
}

impl InvariantFormat for Duration {
    #[inline]
    fn invariant_format(&self) -> String {
        format_time_span(false, self.as_secs(), self.subsec_nanos())
    }
}

impl InvariantParse for Duration {
    fn invariant_parse(text: &str) -> Option<Self> {
        match parse_time_span(text)? {
            (true, secs, nanos) if secs > 0 || nanos > 0 => None,
            (_, secs, nanos) => Some(Duration::new(secs, nanos)),
        }
    }
}

impl InvariantFormat for TimeDelta {
    fn invariant_format(&self) -> String {
        let magnitude = self.abs();
        let secs = magnitude.num_seconds().unsigned_abs();
        let nanos = magnitude.subsec_nanos().unsigned_abs();
        format_time_span(*self < TimeDelta::zero(), secs, nanos)
    }
}

impl InvariantParse for TimeDelta {
    fn invariant_parse(text: &str) -> Option<Self> {
        let (negative, secs, nanos) = parse_time_span(text)?;
        let magnitude = TimeDelta::new(i64::try_from(secs).ok()?, nanos)?;
        Some(if negative { -magnitude } else { magnitude })
    }
}
