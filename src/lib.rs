//! Resampling and summary statistics for environmental sensor exports.
//!
//! Loads the two fixed-layout CSV exports of a sensor hub (temperature, humidity,
//! dew point, vapor pressure deficit and, for the secondary sensor, CO2),
//! restricts them to a range of days, averages them into epoch-aligned buckets
//! of a selectable width and computes the min/max/mean summary cards.
//!
//! Nothing here draws anything: the output is plain tables and numbers,
//! ready to be handed to whatever renders the charts.
//!
//! ```
//! use envdash::{read_csv, summarize, Column, FilterOrder, Granularity, Resampler, Source};
//!
//! let csv = "\
//! Timestamp,Temperature_Celsius(°C),Relative_Humidity(%),Absolute_Humidity(g/m³),DPT_Celsius(°C),VPD(kPa)
//! 2024-05-01 00:00,10.0,40,8.0,9.0,1.0
//! 2024-05-01 00:01,20.0,45,8.0,9.0,1.0
//! 2024-05-01 00:02,30.0,50,8.0,9.0,1.0
//! ";
//!
//! let table = read_csv(csv.as_bytes(), Source::Hub)?;
//!
//! let resampled = Resampler::new("5m".parse::<Granularity>()?)
//!     .filter_order(FilterOrder::BeforeAggregation)
//!     .run(&table);
//!
//! assert_eq!(1, resampled.len());
//!
//! let summary = summarize(&resampled, Column::Temperature)?;
//! assert_eq!(20.0, summary.mean);
//!
//! let summary = summarize(&table, Column::Temperature)?;
//! println!("avg {:.2} / max {:.2} / min {:.2}", summary.mean, summary.max, summary.min);
//!
//! # Ok::<(), envdash::Error>(())
//! ```
//!
//! Values are f32s by default, but can be switched to f64 using the `high_precision` feature flag.

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

#[doc(hidden)]
pub mod agg;

mod dashboard;
mod dashboard_builder;
mod duration;
mod error;
mod granularity;
mod loader;
mod range;
mod resample;
mod schema;
mod summary;
mod table;
mod time;

type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;

pub use dashboard::{Dashboard, Panel};
pub use dashboard_builder::{Builder as DashboardBuilder, DEFAULT_RANGE_DAYS};
pub use duration::Duration;
pub use error::{Error, Result};
pub use granularity::Granularity;
pub use loader::{load_csv, read_csv};
pub use range::DateRange;
pub use resample::{resample, FilterOrder, Resampler};
pub use schema::{Chart, Column, Source, SummaryBasis, COLUMN_RENAMES, TIMESTAMP_HEADER};
pub use summary::{summarize, Summary, SummaryCards};
pub use table::{Row, Table};
pub use time::{parse_timestamp, TIMESTAMP_FORMATS};

/// Value used in measurement columns
#[cfg(feature = "high_precision")]
pub type Value = f64;

/// Value used in measurement columns
#[cfg(not(feature = "high_precision"))]
pub type Value = f32;
