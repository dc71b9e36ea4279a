use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use strum::EnumString;
use tracing::warn;
use utoipa::ToSchema;

/// Symbolic reporting period, resolved against "now" into a concrete window.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RangeToken {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl RangeToken {
    /// Lenient parse: absent or unrecognized tokens fall back to the
    /// documented default (`month`). Bad input never fails an aggregation.
    pub fn parse_lenient(raw: Option<&str>) -> RangeToken {
        match raw {
            None => RangeToken::default(),
            Some(token) => token.parse::<RangeToken>().unwrap_or_else(|_| {
                warn!(token = %token, "unknown range token, defaulting to month");
                RangeToken::default()
            }),
        }
    }
}

/// Half-open UTC interval `[start, end)`.
///
/// This type is the single authority on interval inclusivity: a record
/// stamped exactly at `start` is inside the window, one stamped exactly at
/// `end` is not. Every aggregation and every record-store date filter goes
/// through [`DateRange::contains`], so boundary behavior cannot drift
/// between call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window covering the `days` days leading up to `end` (exclusive).
    pub fn trailing_days(end: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Resolve a symbolic range against `now` into `[start, now)`.
///
/// `week` is a fixed 7-day lookback; `month`, `quarter` and `year` land on
/// the same day-of-month 1, 3 and 12 calendar months earlier (the day is
/// clamped at short month ends, e.g. Mar 31 → Feb 28), not fixed-size
/// windows.
pub fn resolve(token: RangeToken, now: DateTime<Utc>) -> DateRange {
    let start = match token {
        RangeToken::Week => now - Duration::days(7),
        RangeToken::Month => now
            .checked_sub_months(Months::new(1))
            .unwrap_or_else(|| now - Duration::days(30)),
        RangeToken::Quarter => now
            .checked_sub_months(Months::new(3))
            .unwrap_or_else(|| now - Duration::days(91)),
        RangeToken::Year => now
            .checked_sub_months(Months::new(12))
            .unwrap_or_else(|| now - Duration::days(365)),
    };
    DateRange { start, end: now }
}
