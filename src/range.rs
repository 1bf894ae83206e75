use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// A closed range of calendar days.
///
/// When intersected with timestamped data the range covers
/// `[start 00:00:00, end 23:59:59.999999999]`.
///
/// A range whose start lies after its end contains nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new day range.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The range covering the `days` days up to and including `end`
    /// (e.g. "the last two years").
    #[must_use]
    pub fn trailing(end: NaiveDate, days: u64) -> Self {
        let start = end
            .checked_sub_days(chrono::Days::new(days))
            .unwrap_or(NaiveDate::MIN);

        Self { start, end }
    }

    /// First day in the range.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// Last day in the range.
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Earliest timestamp in the range.
    #[must_use]
    pub fn start(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Latest timestamp in the range.
    #[must_use]
    pub fn end(&self) -> NaiveDateTime {
        // NOTE: 23:59:59.999999999 is always valid
        #[allow(clippy::unwrap_used)]
        self.end
            .and_time(NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap())
    }

    /// Returns `true` if the range contains no timestamp at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Returns `true` if the timestamp lies within the closed range.
    #[must_use]
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        ts >= self.start() && ts <= self.end()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}..={}]", self.start, self.end)
    }
}
