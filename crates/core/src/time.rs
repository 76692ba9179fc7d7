use chrono::{DateTime, Utc};

/// Timestamp layout used for query log lines (`2023-11-14 22:13:20.000000`).
///
/// Log timestamps are always UTC and carry no offset suffix.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Clock abstraction so log timestamps are deterministic in tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Formats a timestamp the way query log lines expect it, in UTC.
#[must_use]
pub fn format_log_timestamp(at: DateTime<Utc>) -> String {
    at.format(LOG_TIMESTAMP_FORMAT).to_string()
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_stable() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp(), FIXED_TEST_TIMESTAMP);
    }

    #[test]
    fn log_timestamp_is_rendered_in_utc() {
        let local = chrono::DateTime::parse_from_rfc3339("2023-11-15T01:13:20.5+03:00").unwrap();
        assert_eq!(
            format_log_timestamp(local.with_timezone(&Utc)),
            "2023-11-14 22:13:20.500000"
        );
    }

    #[test]
    fn log_timestamp_has_microseconds() {
        assert_eq!(
            format_log_timestamp(fixed_now()),
            "2023-11-14 22:13:20.000000"
        );
    }
}
