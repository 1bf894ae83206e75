use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use envdash::{Dashboard, DateRange, FilterOrder, Granularity, Panel, Source, DEFAULT_RANGE_DAYS};
use std::{path::PathBuf, process::ExitCode};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SourceArg {
    Hub,
    Sub,
    All,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OrderArg {
    /// Filter observations, then aggregate
    Before,

    /// Aggregate, then filter buckets
    After,
}

/// Summary statistics and resampled series of the sensor exports.
#[derive(Parser, Debug)]
#[command(name = "envdash", version, about)]
struct Args {
    /// Directory containing sensor_hub2.csv and sensor_sub.csv
    #[arg(long, default_value = "resources")]
    resources: PathBuf,

    /// Which export to show
    #[arg(long, value_enum, default_value_t = SourceArg::All)]
    source: SourceArg,

    /// Bucket width: 7d, 3d, 1d, 12h, 6h, 3h, 1h, 30m, 15m, 5m or 1m
    #[arg(short, long, default_value = "7d")]
    granularity: Granularity,

    /// First day (YYYY-MM-DD), defaults to two years before the end day
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD), defaults to today
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Apply the date range before or after aggregating (defaults to each export's own order)
    #[arg(long, value_enum)]
    order: Option<OrderArg>,
}

fn format_value(value: Option<envdash::Value>) -> String {
    value.map_or_else(|| "-".to_owned(), |v| format!("{v:.2}"))
}

fn print_panel(panel: &Panel) -> envdash::Result<()> {
    println!("== {} ({} buckets, {})", panel.source.label(), panel.granularity, panel.range);
    println!();
    println!("Summary Statistics");

    match &panel.summary {
        Some(cards) => {
            for (label, value) in cards.metrics() {
                println!("  {label:<22} {value:>8.2}");
            }
        }
        None => println!("  no data"),
    }

    for chart in panel.charts {
        let series = panel.chart_series(chart)?;

        println!();
        println!("{}", chart.title);

        if series.is_empty() {
            println!("  no data");
            continue;
        }

        let header = series
            .columns()
            .iter()
            .map(|c| format!("{:>18}", c.name()))
            .collect::<String>();
        println!("  {:<19}{header}", "Timestamp");

        for row in series.rows() {
            let values = row
                .values
                .iter()
                .map(|&v| format!("{:>18}", format_value(v)))
                .collect::<String>();
            println!("  {:<19}{values}", row.ts.format("%Y-%m-%d %H:%M"));
        }
    }

    println!();

    Ok(())
}

fn run(args: Args) -> envdash::Result<()> {
    let end = args.end.unwrap_or_else(|| chrono::Local::now().date_naive());
    let range = match args.start {
        Some(start) => DateRange::new(start, end),
        None => DateRange::trailing(end, DEFAULT_RANGE_DAYS),
    };

    let mut builder = Dashboard::builder()
        .resources_dir(args.resources)
        .granularity(args.granularity)
        .range(range);

    if let Some(order) = args.order {
        builder = builder.filter_order(match order {
            OrderArg::Before => FilterOrder::BeforeAggregation,
            OrderArg::After => FilterOrder::AfterAggregation,
        });
    }

    let dashboard = builder.build();

    let sources: &[Source] = match args.source {
        SourceArg::Hub => &[Source::Hub],
        SourceArg::Sub => &[Source::Sub],
        SourceArg::All => &Source::ALL,
    };

    for &source in sources {
        let panel = dashboard.panel(source)?;
        log::info!(
            "{source}: {} buckets ({:?})",
            panel.series.len(),
            panel.filter_order
        );
        print_panel(&panel)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_module("envdash", log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use test_log::test;

    #[test]
    fn cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn cli_defaults() {
        let args = Args::try_parse_from(["envdash"]).unwrap();

        assert_eq!(Granularity::SevenDays, args.granularity);
        assert_eq!(PathBuf::from("resources"), args.resources);
        assert!(args.start.is_none());
        assert!(args.order.is_none());
    }

    #[test]
    fn cli_granularity() {
        let args = Args::try_parse_from(["envdash", "-g", "15m", "--start", "2024-05-01"]).unwrap();
        assert_eq!(Granularity::FifteenMinutes, args.granularity);
        assert_eq!(NaiveDate::from_ymd_opt(2024, 5, 1), args.start);

        assert!(Args::try_parse_from(["envdash", "-g", "2h"]).is_err());
        assert!(Args::try_parse_from(["envdash", "--start", "yesterday"]).is_err());
    }

    #[test]
    fn format_missing() {
        assert_eq!("-", format_value(None));
        assert_eq!("21.50", format_value(Some(21.5)));
    }
}
