/// Helpers for calculating bucket widths
///
/// ```
/// use envdash::Duration;
///
/// assert_eq!(Duration::minutes(15), 900);
/// assert_eq!(Duration::days(7), Duration::hours(168));
/// ```
pub struct Duration;

impl Duration {
    /// Formats N weeks as a time frame in seconds.
    #[must_use]
    pub const fn weeks(n: i64) -> i64 {
        Self::days(n) * 7
    }

    /// Formats N days as a time frame in seconds.
    #[must_use]
    pub const fn days(n: i64) -> i64 {
        Self::hours(n) * 24
    }

    /// Formats N hours as a time frame in seconds.
    #[must_use]
    pub const fn hours(n: i64) -> i64 {
        Self::minutes(n) * 60
    }

    /// Formats N minutes as a time frame in seconds.
    #[must_use]
    pub const fn minutes(n: i64) -> i64 {
        Self::seconds(n) * 60
    }

    /// Formats N seconds as a time frame in seconds.
    #[must_use]
    pub const fn seconds(n: i64) -> i64 {
        n
    }
}
