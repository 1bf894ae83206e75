use crate::{
    agg::{Aggregation, Avg, BucketStream},
    granularity::Granularity,
    range::DateRange,
    table::{Row, Table},
};

/// When the date range is applied relative to bucketing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FilterOrder {
    /// Drop out-of-range observations, then bucket what is left.
    ///
    /// Buckets straddling a range boundary only average in-range rows.
    #[default]
    BeforeAggregation,

    /// Bucket all observations, then drop buckets whose start lies outside the range.
    ///
    /// A bucket starting before the range is dropped even if it contains in-range rows,
    /// and a bucket starting inside the range may average rows past its end.
    AfterAggregation,
}

/// Resamples a table into epoch-aligned buckets.
///
/// ```
/// use envdash::{Column, Granularity, Resampler, Row, Table};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
///
/// let table = Table::from_rows(
///     vec![Column::Temperature],
///     vec![
///         Row::new(day.and_hms_opt(0, 0, 0).unwrap(), vec![Some(10.0)]),
///         Row::new(day.and_hms_opt(0, 1, 0).unwrap(), vec![Some(20.0)]),
///         Row::new(day.and_hms_opt(0, 2, 0).unwrap(), vec![Some(30.0)]),
///     ],
/// );
///
/// let resampled = Resampler::new(Granularity::FiveMinutes).run(&table);
///
/// assert_eq!(1, resampled.len());
/// assert_eq!(Some(20.0), resampled.rows()[0].get(0));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Resampler {
    /// Bucket width
    granularity: Granularity,

    /// Optional closed day range
    range: Option<DateRange>,

    /// Whether the range is applied to observations or to buckets
    filter_order: FilterOrder,
}

impl Resampler {
    /// Creates a resampler without a range restriction.
    #[must_use]
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            range: None,
            filter_order: FilterOrder::default(),
        }
    }

    /// Restricts the output to the given day range.
    #[must_use]
    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Sets when the range is applied.
    ///
    /// Default = [`FilterOrder::BeforeAggregation`]
    #[must_use]
    pub fn filter_order(mut self, order: FilterOrder) -> Self {
        self.filter_order = order;
        self
    }

    /// Bucket width.
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Computes the mean of every column per bucket.
    ///
    /// Empty input (or input filtered down to nothing) yields an empty table.
    #[must_use]
    pub fn run(&self, table: &Table) -> Table {
        self.aggregate::<Avg>(table)
    }

    /// Like [`Resampler::run`], but with an arbitrary per-bucket aggregation.
    #[must_use]
    pub fn aggregate<A: Aggregation>(&self, table: &Table) -> Table {
        let mut rows = table
            .rows()
            .iter()
            .filter(|row| match (self.filter_order, &self.range) {
                (FilterOrder::BeforeAggregation, Some(range)) => range.contains(row.ts),
                _ => true,
            })
            .collect::<Vec<_>>();

        // NOTE: Stable, so duplicate timestamps keep file order
        rows.sort_by_key(|row| row.ts);

        let input_len = rows.len();

        let buckets = BucketStream::<A, _>::new(
            self.granularity,
            table.columns().len(),
            rows.into_iter(),
        )
        .filter(|row: &Row| match (self.filter_order, &self.range) {
            (FilterOrder::AfterAggregation, Some(range)) => range.contains(row.ts),
            _ => true,
        })
        .collect::<Vec<_>>();

        log::debug!(
            "resampled {} rows ({input_len} in scope) into {} {} buckets ({:?}, range: {})",
            table.len(),
            buckets.len(),
            self.granularity,
            self.filter_order,
            self.range
                .map_or_else(|| "unbounded".to_owned(), |r| r.to_string()),
        );

        Table::from_rows(table.columns().to_vec(), buckets)
    }
}

/// Resamples a table at the granularity named by `token`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidGranularity`] if the token is not one of the supported widths.
pub fn resample(
    table: &Table,
    token: &str,
    range: Option<DateRange>,
    order: FilterOrder,
) -> crate::Result<Table> {
    let mut resampler = Resampler::new(token.parse()?).filter_order(order);

    if let Some(range) = range {
        resampler = resampler.range(range);
    }

    Ok(resampler.run(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{agg::Max, schema::Column, Value};
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use test_log::test;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, m, 0).unwrap()
    }

    fn temperature(rows: &[(NaiveDateTime, Value)]) -> Table {
        Table::from_rows(
            vec![Column::Temperature],
            rows.iter()
                .map(|&(ts, v)| Row::new(ts, vec![Some(v)]))
                .collect(),
        )
    }

    fn minute_series(days: u32) -> Table {
        #[allow(clippy::cast_precision_loss)]
        let rows = (0..(days * 24 * 60))
            .map(|idx| {
                let ts = at(1, 0, 0) + TimeDelta::minutes(i64::from(idx));
                (ts, (idx % 97) as Value)
            })
            .collect::<Vec<_>>();

        temperature(&rows)
    }

    #[test]
    fn resample_mean_of_three_minutes() {
        let table = temperature(&[
            (at(1, 0, 0), 10.0),
            (at(1, 0, 1), 20.0),
            (at(1, 0, 2), 30.0),
        ]);

        let resampled = Resampler::new(Granularity::FiveMinutes).run(&table);

        assert_eq!(
            vec![Row::new(at(1, 0, 0), vec![Some(20.0)])],
            resampled.into_rows()
        );
    }

    #[test]
    fn resample_single_row() {
        let table = temperature(&[(at(1, 13, 37), 21.5)]);

        for g in Granularity::ALL {
            let resampled = Resampler::new(g).run(&table);

            assert_eq!(1, resampled.len());
            assert_eq!(Some(21.5), resampled.rows()[0].get(0));
            assert_eq!(g.bucket_start(at(1, 13, 37)), Some(resampled.rows()[0].ts));
        }
    }

    #[test]
    fn resample_output_is_strictly_increasing_and_aligned() {
        let table = minute_series(10);

        for g in Granularity::ALL {
            let resampled = Resampler::new(g).run(&table);

            assert!(!resampled.is_empty());
            assert!(resampled.rows().iter().all(|row| g.is_aligned(row.ts)), "{g}");
            assert!(
                resampled.rows().windows(2).all(|w| w[0].ts < w[1].ts),
                "{g}"
            );
        }
    }

    #[test]
    fn resample_minute_data_at_minute_is_identity() {
        let table = minute_series(1);

        let resampled = Resampler::new(Granularity::Minute).run(&table);

        assert_eq!(table, resampled);
    }

    #[test]
    fn resample_unsorted_input() {
        let table = temperature(&[
            (at(1, 2, 0), 30.0),
            (at(1, 0, 0), 10.0),
            (at(1, 0, 30), 20.0),
        ]);

        let resampled = Resampler::new(Granularity::Hour).run(&table);

        assert_eq!(
            vec![
                Row::new(at(1, 0, 0), vec![Some(15.0)]),
                Row::new(at(1, 2, 0), vec![Some(30.0)]),
            ],
            resampled.into_rows()
        );
    }

    #[test]
    fn resample_duplicate_timestamps() {
        let table = temperature(&[(at(1, 0, 0), 10.0), (at(1, 0, 0), 30.0)]);

        let resampled = Resampler::new(Granularity::Minute).run(&table);

        assert_eq!(vec![Row::new(at(1, 0, 0), vec![Some(20.0)])], resampled.into_rows());
    }

    #[test]
    fn resample_empty_input() {
        let table = Table::new(vec![Column::Temperature, Column::Vpd]);

        let resampled = Resampler::new(Granularity::Day).run(&table);

        assert!(resampled.is_empty());
        assert_eq!(table.columns(), resampled.columns());
    }

    #[test]
    fn resample_range_excludes_everything() {
        let table = minute_series(1);
        let range = DateRange::new(day(20), day(21));

        for order in [FilterOrder::BeforeAggregation, FilterOrder::AfterAggregation] {
            let resampled = Resampler::new(Granularity::Hour)
                .range(range)
                .filter_order(order)
                .run(&table);

            assert!(resampled.is_empty(), "{order:?}");
        }
    }

    #[test]
    fn resample_filter_order_is_observable() {
        // 3d buckets are anchored to the epoch: 2024-04-29..=05-01 and 2024-05-02..=05-04
        let table = temperature(&[
            (at(1, 12, 0), 10.0),
            (at(2, 12, 0), 20.0),
            (at(3, 12, 0), 40.0),
        ]);
        let range = DateRange::new(day(1), day(2));

        let before = Resampler::new(Granularity::ThreeDays)
            .range(range)
            .filter_order(FilterOrder::BeforeAggregation)
            .run(&table);

        assert_eq!(
            vec![
                Row::new(at(1, 0, 0) - TimeDelta::days(2), vec![Some(10.0)]),
                Row::new(at(2, 0, 0), vec![Some(20.0)]),
            ],
            before.into_rows()
        );

        let after = Resampler::new(Granularity::ThreeDays)
            .range(range)
            .filter_order(FilterOrder::AfterAggregation)
            .run(&table);

        assert_eq!(
            vec![Row::new(at(2, 0, 0), vec![Some(30.0)])],
            after.into_rows()
        );
    }

    #[test]
    fn resample_range_is_day_inclusive() {
        let table = temperature(&[
            (at(1, 23, 59), 1.0),
            (at(2, 0, 0), 2.0),
            (at(2, 23, 59), 3.0),
            (at(3, 0, 0), 4.0),
        ]);

        let resampled = Resampler::new(Granularity::Minute)
            .range(DateRange::new(day(2), day(2)))
            .run(&table);

        assert_eq!(
            vec![Some(2.0), Some(3.0)],
            resampled.values(Column::Temperature).unwrap().collect::<Vec<_>>()
        );
    }

    #[test]
    fn resample_custom_aggregation() {
        let table = temperature(&[(at(1, 0, 0), 10.0), (at(1, 0, 30), 30.0)]);

        let resampled = Resampler::new(Granularity::Hour).aggregate::<Max>(&table);

        assert_eq!(Some(30.0), resampled.rows()[0].get(0));
    }

    #[test]
    fn resample_token() {
        let table = temperature(&[(at(1, 0, 0), 10.0)]);

        assert_eq!(1, resample(&table, "6h", None, FilterOrder::default()).unwrap().len());
        assert!(matches!(
            resample(&table, "2h", None, FilterOrder::default()),
            Err(crate::Error::InvalidGranularity(_))
        ));
    }
}
