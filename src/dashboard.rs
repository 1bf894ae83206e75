use crate::{
    dashboard_builder::Builder,
    granularity::Granularity,
    loader::load_csv,
    range::DateRange,
    resample::{FilterOrder, Resampler},
    schema::{Chart, Source, SummaryBasis},
    summary::SummaryCards,
    table::Table,
};
use std::path::{Path, PathBuf};

/// Everything a presentation layer needs to draw one source's tab.
#[derive(Clone, Debug)]
pub struct Panel {
    /// Which export this panel shows
    pub source: Source,

    /// Bucket width of `series`
    pub granularity: Granularity,

    /// Requested day range
    pub range: DateRange,

    /// Whether the range was applied before or after bucketing
    pub filter_order: FilterOrder,

    /// Summary cards, `None` if the range holds no data
    pub summary: Option<SummaryCards>,

    /// Resampled series, one row per bucket
    pub series: Table,

    /// Charts to draw from `series`
    pub charts: &'static [Chart],
}

impl Panel {
    /// Returns `true` if there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The columns of a chart, against the bucket timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownColumn`] if the chart plots a column the source does not carry.
    pub fn chart_series(&self, chart: &Chart) -> crate::Result<Table> {
        self.series.select(chart.columns)
    }
}

/// The sensor dashboard.
///
/// Holds the user's selection (granularity and day range); every panel is
/// recomputed from the export on disk.
///
/// ```no_run
/// use envdash::{Dashboard, DateRange, Granularity, Source};
/// use chrono::NaiveDate;
///
/// let dashboard = Dashboard::builder()
///     .resources_dir("resources")
///     .granularity(Granularity::Hour)
///     .range(DateRange::new(
///         NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
///         NaiveDate::from_ymd_opt(2024, 5, 31).unwrap(),
///     ))
///     .build();
///
/// let panel = dashboard.panel(Source::Hub)?;
///
/// match panel.summary {
///     Some(cards) => {
///         for (label, value) in cards.metrics() {
///             println!("{label}: {value:.2}");
///         }
///     }
///     None => println!("no data"),
/// }
/// # Ok::<(), envdash::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Dashboard {
    pub(crate) resources_dir: PathBuf,
    pub(crate) granularity: Granularity,
    pub(crate) range: DateRange,
    pub(crate) filter_order: Option<FilterOrder>,
}

impl Dashboard {
    /// Creates a new dashboard builder.
    #[must_use]
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// Directory containing the sensor exports.
    #[must_use]
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Selected bucket width.
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Selected day range.
    #[must_use]
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Filter order used for a source.
    #[must_use]
    pub fn filter_order(&self, source: Source) -> FilterOrder {
        self.filter_order
            .unwrap_or_else(|| source.default_filter_order())
    }

    /// Loads a source's export and computes its panel.
    ///
    /// # Errors
    ///
    /// Returns error if the export cannot be read or parsed.
    pub fn panel(&self, source: Source) -> crate::Result<Panel> {
        let path = self.resources_dir.join(source.file_name());
        let table = load_csv(path, source)?;

        self.compute(source, &table)
    }

    /// Computes a panel from an already loaded table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownColumn`] if the table lacks a summary column.
    pub fn compute(&self, source: Source, table: &Table) -> crate::Result<Panel> {
        let filter_order = self.filter_order(source);

        let series = Resampler::new(self.granularity)
            .range(self.range)
            .filter_order(filter_order)
            .run(table);

        let summary = match source.summary_basis() {
            SummaryBasis::Raw => SummaryCards::compute(&table.filter(&self.range))?,
            SummaryBasis::Resampled => SummaryCards::compute(&series)?,
        };

        if summary.is_none() {
            log::warn!("{source}: no data in {}", self.range);
        }

        Ok(Panel {
            source,
            granularity: self.granularity,
            range: self.range,
            filter_order,
            summary,
            series,
            charts: source.charts(),
        })
    }

    /// Computes the panels of all sources, in tab order.
    ///
    /// # Errors
    ///
    /// Returns error if an export cannot be read or parsed.
    pub fn panels(&self) -> crate::Result<Vec<Panel>> {
        Source::ALL
            .iter()
            .map(|&source| self.panel(source))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{schema::Column, table::Row, Value};
    use chrono::{NaiveDate, NaiveDateTime};
    use test_log::test;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        day(d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn sub_table(rows: &[(NaiveDateTime, Value, Value)]) -> Table {
        Table::from_rows(
            Source::Sub.columns().to_vec(),
            rows.iter()
                .map(|&(ts, t, h)| {
                    Row::new(
                        ts,
                        vec![Some(t), Some(h), Some(600.0), Some(8.0), Some(9.0), Some(1.0)],
                    )
                })
                .collect(),
        )
    }

    fn dashboard(granularity: Granularity) -> Dashboard {
        Dashboard::builder()
            .granularity(granularity)
            .range(DateRange::new(day(2), day(3)))
            .build()
    }

    #[test]
    fn builder_defaults() {
        let dashboard = Dashboard::builder().build();

        assert_eq!(Granularity::SevenDays, dashboard.granularity());
        assert_eq!(Path::new("resources"), dashboard.resources_dir());
        assert_eq!(
            chrono::Local::now().date_naive(),
            dashboard.range().end_date()
        );
        assert_eq!(
            FilterOrder::BeforeAggregation,
            dashboard.filter_order(Source::Hub)
        );
        assert_eq!(
            FilterOrder::AfterAggregation,
            dashboard.filter_order(Source::Sub)
        );
    }

    #[test]
    fn builder_order_override() {
        let dashboard = Dashboard::builder()
            .filter_order(FilterOrder::BeforeAggregation)
            .build();

        for source in Source::ALL {
            assert_eq!(FilterOrder::BeforeAggregation, dashboard.filter_order(source));
        }
    }

    #[test]
    fn compute_sub_summarizes_buckets() {
        let table = sub_table(&[
            (at(2, 0), 10.0, 40.0),
            (at(2, 1), 20.0, 40.0),
            (at(2, 2), 60.0, 40.0),
            (at(3, 0), 30.0, 50.0),
        ]);

        let panel = dashboard(Granularity::Day).compute(Source::Sub, &table).unwrap();

        assert_eq!(2, panel.series.len());
        assert_eq!(4, panel.charts.len());

        // Means of daily means: (30 + 30) / 2
        let cards = panel.summary.unwrap();
        assert_eq!(30.0, cards.temperature.mean);
        assert_eq!(30.0, cards.temperature.max);
        assert_eq!(45.0, cards.humidity.mean);
    }

    #[test]
    fn compute_hub_summarizes_raw_rows() {
        let table = sub_table(&[
            (at(1, 0), 99.0, 99.0),
            (at(2, 0), 10.0, 40.0),
            (at(2, 1), 20.0, 40.0),
            (at(2, 2), 60.0, 40.0),
        ])
        .select(Source::Hub.columns())
        .unwrap();

        let panel = dashboard(Granularity::Day).compute(Source::Hub, &table).unwrap();

        let cards = panel.summary.unwrap();
        assert_eq!(10.0, cards.temperature.min);
        assert_eq!(60.0, cards.temperature.max);
        assert_eq!(30.0, cards.temperature.mean);
        assert_eq!(1, panel.series.len());
        assert_eq!(3, panel.charts.len());
    }

    #[test]
    fn compute_no_data() {
        let table = sub_table(&[(at(10, 0), 10.0, 40.0)]);

        for source in Source::ALL {
            let table = table.select(source.columns()).unwrap();
            let panel = dashboard(Granularity::Hour).compute(source, &table).unwrap();

            assert!(panel.is_empty());
            assert_eq!(None, panel.summary);
        }
    }

    #[test]
    fn compute_without_summary_column() {
        let table = sub_table(&[(at(2, 0), 10.0, 40.0)])
            .select(&[Column::Temperature, Column::Co2])
            .unwrap();

        assert!(matches!(
            dashboard(Granularity::Hour).compute(Source::Sub, &table),
            Err(crate::Error::UnknownColumn("humidity_relative"))
        ));
    }

    #[test]
    fn chart_series() {
        let table = sub_table(&[(at(2, 0), 10.0, 40.0)]);
        let panel = dashboard(Granularity::Hour).compute(Source::Sub, &table).unwrap();

        for chart in panel.charts {
            let series = panel.chart_series(chart).unwrap();
            assert_eq!(chart.columns, series.columns());
            assert_eq!(1, series.len());
        }

        let co2 = panel
            .chart_series(&Chart {
                title: "CO2",
                columns: &[Column::Co2],
            })
            .unwrap();
        assert_eq!(Some(600.0), co2.rows()[0].get(0));
    }
}
