use crate::{
    agg::{Avg, Bucket, Max, Min},
    schema::Column,
    table::Table,
    Error, Value,
};

/// Minimum, maximum and mean of a column.
///
/// Missing values are excluded from all three statistics.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Summary {
    /// Smallest present value
    pub min: Value,

    /// Largest present value
    pub max: Value,

    /// Arithmetic mean of the present values
    pub mean: Value,

    /// Number of present values
    pub count: usize,
}

impl Summary {
    /// Summarizes a sequence of (possibly missing) values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoData`] if there is no present value.
    pub fn of(values: impl IntoIterator<Item = Option<Value>>) -> crate::Result<Self> {
        let mut min = Bucket::default();
        let mut max = Bucket::default();
        let mut avg = Bucket::default();

        for x in values {
            min.push::<Min>(x);
            max.push::<Max>(x);
            avg.push::<Avg>(x);
        }

        let (Some(min_value), Some(max_value), Some(mean)) = (
            min.finish::<Min>(),
            max.finish::<Max>(),
            avg.finish::<Avg>(),
        ) else {
            return Err(Error::NoData);
        };

        Ok(Self {
            min: min_value,
            max: max_value,
            // NOTE: Rounding can push the mean of near-equal values just outside [min, max]
            mean: mean.clamp(min_value, max_value),
            count: avg.len,
        })
    }
}

/// Computes min/max/mean of a table column.
///
/// # Errors
///
/// Returns [`Error::UnknownColumn`] if the table does not carry the column,
/// and [`Error::NoData`] if the column has no present value.
pub fn summarize(table: &Table, column: Column) -> crate::Result<Summary> {
    Summary::of(table.values(column)?)
}

/// The six summary metrics shown above the charts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SummaryCards {
    /// Temperature statistics (°C)
    pub temperature: Summary,

    /// Relative humidity statistics (%)
    pub humidity: Summary,
}

impl SummaryCards {
    /// Computes the cards, or `None` if either column has no data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownColumn`] if the table lacks one of the columns.
    pub fn compute(table: &Table) -> crate::Result<Option<Self>> {
        let no_data_as_none = |result: crate::Result<Summary>| match result {
            Ok(summary) => Ok(Some(summary)),
            Err(Error::NoData) => Ok(None),
            Err(e) => Err(e),
        };

        let temperature = no_data_as_none(summarize(table, Column::Temperature))?;
        let humidity = no_data_as_none(summarize(table, Column::HumidityRelative))?;

        Ok(temperature
            .zip(humidity)
            .map(|(temperature, humidity)| Self {
                temperature,
                humidity,
            }))
    }

    /// Labelled metrics in display order.
    #[must_use]
    pub fn metrics(&self) -> [(&'static str, Value); 6] {
        [
            ("Avg Temperature (°C)", self.temperature.mean),
            ("Max Temperature (°C)", self.temperature.max),
            ("Min Temperature (°C)", self.temperature.min),
            ("Avg Humidity (%)", self.humidity.mean),
            ("Max Humidity (%)", self.humidity.max),
            ("Min Humidity (%)", self.humidity.min),
        ]
    }
}
