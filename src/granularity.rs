use crate::Duration;
use chrono::{DateTime, NaiveDateTime};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::{all_consuming, map_res, value},
    IResult,
};

/// Bucket width used to resample a time series.
///
/// Only the widths listed in [`Granularity::ALL`] are supported; buckets are
/// anchored to the Unix epoch, so e.g. `1d` buckets always start at midnight UTC
/// and `7d` buckets start on Thursdays (1970-01-01 was one).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    /// `7d`
    #[default]
    SevenDays,

    /// `3d`
    ThreeDays,

    /// `1d`
    Day,

    /// `12h`
    TwelveHours,

    /// `6h`
    SixHours,

    /// `3h`
    ThreeHours,

    /// `1h`
    Hour,

    /// `30m`
    ThirtyMinutes,

    /// `15m`
    FifteenMinutes,

    /// `5m`
    FiveMinutes,

    /// `1m`
    Minute,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Unit {
    Day,
    Hour,
    Minute,
}

impl Unit {
    const fn seconds(self, n: i64) -> i64 {
        match self {
            Self::Day => Duration::days(n),
            Self::Hour => Duration::hours(n),
            Self::Minute => Duration::minutes(n),
        }
    }
}

/// Token and bucket width (in seconds) of every supported granularity,
/// coarsest first.
const GRANULARITY_TABLE: [(Granularity, &str, i64); 11] = [
    (Granularity::SevenDays, "7d", Duration::days(7)),
    (Granularity::ThreeDays, "3d", Duration::days(3)),
    (Granularity::Day, "1d", Duration::days(1)),
    (Granularity::TwelveHours, "12h", Duration::hours(12)),
    (Granularity::SixHours, "6h", Duration::hours(6)),
    (Granularity::ThreeHours, "3h", Duration::hours(3)),
    (Granularity::Hour, "1h", Duration::hours(1)),
    (Granularity::ThirtyMinutes, "30m", Duration::minutes(30)),
    (Granularity::FifteenMinutes, "15m", Duration::minutes(15)),
    (Granularity::FiveMinutes, "5m", Duration::minutes(5)),
    (Granularity::Minute, "1m", Duration::minutes(1)),
];

/// Parses a `<n><unit>` token into its width in seconds.
fn parse_width(input: &str) -> IResult<&str, i64> {
    let (input, n) = map_res(digit1, str::parse::<u32>)(input)?;
    let (input, unit) = alt((
        value(Unit::Day, tag("d")),
        value(Unit::Hour, tag("h")),
        value(Unit::Minute, tag("m")),
    ))(input)?;

    Ok((input, unit.seconds(i64::from(n))))
}

impl Granularity {
    /// All supported granularities, coarsest first.
    pub const ALL: [Self; 11] = [
        Self::SevenDays,
        Self::ThreeDays,
        Self::Day,
        Self::TwelveHours,
        Self::SixHours,
        Self::ThreeHours,
        Self::Hour,
        Self::ThirtyMinutes,
        Self::FifteenMinutes,
        Self::FiveMinutes,
        Self::Minute,
    ];

    // NOTE: Variants are declared in table order
    #[allow(clippy::indexing_slicing)]
    fn entry(self) -> (Self, &'static str, i64) {
        GRANULARITY_TABLE[self as usize]
    }

    /// Returns the duration token, e.g. `"12h"`.
    #[must_use]
    pub fn token(self) -> &'static str {
        self.entry().1
    }

    /// Bucket width in seconds.
    #[must_use]
    pub fn width_secs(self) -> i64 {
        self.entry().2
    }

    /// Index of the epoch-aligned bucket a timestamp falls into.
    #[must_use]
    pub fn bucket_id(self, ts: NaiveDateTime) -> i64 {
        ts.and_utc().timestamp().div_euclid(self.width_secs())
    }

    /// Start of the epoch-aligned bucket a timestamp falls into.
    ///
    /// Returns `None` if the bucket starts before the earliest representable timestamp.
    #[must_use]
    pub fn bucket_start(self, ts: NaiveDateTime) -> Option<NaiveDateTime> {
        let secs = ts.and_utc().timestamp();
        let offset = secs.rem_euclid(self.width_secs());

        DateTime::from_timestamp(secs - offset, 0).map(|dt| dt.naive_utc())
    }

    /// Returns `true` if the timestamp lies exactly on a bucket boundary.
    #[must_use]
    pub fn is_aligned(self, ts: NaiveDateTime) -> bool {
        self.bucket_start(ts) == Some(ts)
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl std::str::FromStr for Granularity {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidGranularity(s.to_owned());

        let token = s.trim();
        let (_, width) = all_consuming(parse_width)(token).map_err(|_| invalid())?;

        let (granularity, _, _) = GRANULARITY_TABLE
            .iter()
            .find(|(_, _, w)| *w == width)
            .ok_or_else(invalid)?;

        // NOTE: "24h" and "1d" describe the same bucket, but only the canonical token is accepted
        if granularity.token() != token {
            return Err(invalid());
        }

        Ok(*granularity)
    }
}

impl TryFrom<&str> for Granularity {
    type Error = crate::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
