//! Static layout of the two sensor exports.

use crate::resample::FilterOrder;

/// Header of the timestamp column (always the first one).
pub const TIMESTAMP_HEADER: &str = "Timestamp";

/// A semantic measurement column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    /// Air temperature in °C
    Temperature,

    /// Relative humidity in %
    HumidityRelative,

    /// Absolute humidity in g/m³
    HumidityAbsolute,

    /// Dew point temperature in °C
    Dpt,

    /// Vapor pressure deficit in kPa
    Vpd,

    /// CO2 concentration in ppm
    Co2,
}

/// Maps the unit-bearing CSV headers to semantic columns.
pub const COLUMN_RENAMES: [(&str, Column); 6] = [
    ("Temperature_Celsius(°C)", Column::Temperature),
    ("Relative_Humidity(%)", Column::HumidityRelative),
    ("Absolute_Humidity(g/m³)", Column::HumidityAbsolute),
    ("DPT_Celsius(°C)", Column::Dpt),
    ("VPD(kPa)", Column::Vpd),
    ("CO2(ppm)", Column::Co2),
];

impl Column {
    /// Semantic column name, e.g. `humidity_relative`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::HumidityRelative => "humidity_relative",
            Self::HumidityAbsolute => "humidity_absolute",
            Self::Dpt => "dpt",
            Self::Vpd => "vpd",
            Self::Co2 => "co2",
        }
    }

    /// Original CSV header of the column.
    #[must_use]
    pub fn header(self) -> &'static str {
        COLUMN_RENAMES
            .iter()
            .find(|(_, c)| *c == self)
            .map_or_else(|| self.name(), |&(h, _)| h)
    }

    /// Looks up the column for a CSV header.
    #[must_use]
    pub fn from_header(header: &str) -> Option<Self> {
        COLUMN_RENAMES
            .iter()
            .find(|(h, _)| *h == header)
            .map(|(_, c)| *c)
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Which table the dashboard summary cards are computed from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SummaryBasis {
    /// Range-filtered raw observations
    Raw,

    /// The resampled series shown in the charts
    Resampled,
}

/// A line chart: a title and the columns plotted against the timestamp.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Chart {
    /// Chart heading
    pub title: &'static str,

    /// Plotted series
    pub columns: &'static [Column],
}

const TEMPERATURE_CHART: Chart = Chart {
    title: "Temperature (°C)",
    columns: &[Column::Temperature],
};

const HUMIDITY_CHART: Chart = Chart {
    title: "Humidity",
    columns: &[Column::HumidityRelative, Column::HumidityAbsolute],
};

const DPT_VPD_CHART: Chart = Chart {
    title: "DPT and VPD",
    columns: &[Column::Dpt, Column::Vpd],
};

const CO2_CHART: Chart = Chart {
    title: "CO2",
    columns: &[Column::Co2],
};

/// One of the two sensor exports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Source {
    /// Main hub (`sensor_hub2.csv`)
    Hub,

    /// Secondary sensor with CO2 (`sensor_sub.csv`)
    Sub,
}

impl Source {
    /// All sources, in tab order.
    pub const ALL: [Self; 2] = [Self::Hub, Self::Sub];

    /// Tab label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Hub => "Sensor Hub 2",
            Self::Sub => "Sensor Sub",
        }
    }

    /// File name inside the resources directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Hub => "sensor_hub2.csv",
            Self::Sub => "sensor_sub.csv",
        }
    }

    /// Measurement columns in file order.
    #[must_use]
    pub fn columns(self) -> &'static [Column] {
        match self {
            Self::Hub => &[
                Column::Temperature,
                Column::HumidityRelative,
                Column::HumidityAbsolute,
                Column::Dpt,
                Column::Vpd,
            ],
            Self::Sub => &[
                Column::Temperature,
                Column::HumidityRelative,
                Column::Co2,
                Column::HumidityAbsolute,
                Column::Dpt,
                Column::Vpd,
            ],
        }
    }

    /// Charts rendered for this source.
    #[must_use]
    pub fn charts(self) -> &'static [Chart] {
        match self {
            Self::Hub => &[TEMPERATURE_CHART, HUMIDITY_CHART, DPT_VPD_CHART],
            Self::Sub => &[TEMPERATURE_CHART, HUMIDITY_CHART, CO2_CHART, DPT_VPD_CHART],
        }
    }

    /// Whether the range filter is applied before or after bucketing.
    ///
    /// The hub filters raw rows, the sub filters buckets.
    #[must_use]
    pub fn default_filter_order(self) -> FilterOrder {
        match self {
            Self::Hub => FilterOrder::BeforeAggregation,
            Self::Sub => FilterOrder::AfterAggregation,
        }
    }

    /// Table the summary cards are computed from.
    #[must_use]
    pub fn summary_basis(self) -> SummaryBasis {
        match self {
            Self::Hub => SummaryBasis::Raw,
            Self::Sub => SummaryBasis::Resampled,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hub => write!(f, "hub"),
            Self::Sub => write!(f, "sub"),
        }
    }
}
