use crate::{dashboard::Dashboard, granularity::Granularity, range::DateRange, resample::FilterOrder};
use std::path::PathBuf;

/// Days covered by the default date range.
pub const DEFAULT_RANGE_DAYS: u64 = 365 * 2;

/// Builder for [`Dashboard`].
pub struct Builder {
    resources_dir: PathBuf,
    granularity: Granularity,
    range: Option<DateRange>,
    filter_order: Option<FilterOrder>,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            resources_dir: PathBuf::from("resources"),
            granularity: Granularity::default(),
            range: None,
            filter_order: None,
        }
    }

    /// Sets the directory containing the sensor exports.
    ///
    /// Default = `resources`
    #[must_use]
    pub fn resources_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.resources_dir = path.into();
        self
    }

    /// Sets the bucket width.
    ///
    /// Default = `7d`
    #[must_use]
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Sets the day range.
    ///
    /// Default = the last two years, up to and including today
    #[must_use]
    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Applies the range before or after bucketing for every source.
    ///
    /// By default, each source keeps its own order (see [`crate::Source::default_filter_order`]).
    #[must_use]
    pub fn filter_order(mut self, order: FilterOrder) -> Self {
        self.filter_order = Some(order);
        self
    }

    /// Creates the dashboard.
    ///
    /// No file is read until a panel is requested.
    #[must_use]
    pub fn build(self) -> Dashboard {
        let range = self.range.unwrap_or_else(|| {
            DateRange::trailing(chrono::Local::now().date_naive(), DEFAULT_RANGE_DAYS)
        });

        Dashboard {
            resources_dir: self.resources_dir,
            granularity: self.granularity,
            range,
            filter_order: self.filter_order,
        }
    }
}
