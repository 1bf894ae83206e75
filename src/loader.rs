use crate::{
    granularity::Granularity,
    schema::{Column, Source, TIMESTAMP_HEADER},
    table::{Row, Table},
    time::parse_timestamp,
    Error, Value,
};
use std::{fs::File, io::Read, path::Path};

/// Loads a sensor export from disk.
///
/// # Errors
///
/// Returns error if the file cannot be read or does not match the source's layout.
pub fn load_csv<P: AsRef<Path>>(path: P, source: Source) -> crate::Result<Table> {
    let path = path.as_ref();
    log::debug!("loading {source} export from {}", path.display());

    let file = File::open(path)?;
    read_csv(file, source)
}

/// Reads a sensor export, renaming its headers to semantic columns.
///
/// Empty cells become missing values, anything else that fails to parse
/// is an error.
///
/// # Errors
///
/// Returns error if the input is malformed, lacks a column of the source,
/// or contains an unparseable timestamp or number.
pub fn read_csv<R: Read>(reader: R, source: Source) -> crate::Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();

    let mut index: crate::HashMap<Column, usize> = crate::HashMap::default();

    for (idx, header) in headers.iter().enumerate() {
        if let Some(column) = Column::from_header(header.trim_start_matches('\u{feff}')) {
            index.entry(column).or_insert(idx);
        }
    }

    let first = headers.get(0).map(|h| h.trim_start_matches('\u{feff}'));
    if first != Some(TIMESTAMP_HEADER) {
        return Err(Error::MissingColumn(TIMESTAMP_HEADER));
    }

    let layout = source
        .columns()
        .iter()
        .map(|&column| {
            index
                .get(&column)
                .map(|&idx| (column, idx))
                .ok_or(Error::MissingColumn(column.header()))
        })
        .collect::<crate::Result<Vec<_>>>()?;

    let mut table = Table::new(source.columns().to_vec());

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);

        let raw_ts = record.get(0).unwrap_or_default();

        // NOTE: Every bucket the row can fall into must be representable
        let ts = parse_timestamp(raw_ts)
            .filter(|&ts| Granularity::ALL.iter().all(|g| g.bucket_start(ts).is_some()))
            .ok_or_else(|| Error::InvalidTimestamp {
                line,
                value: raw_ts.to_owned(),
            })?;

        let values = layout
            .iter()
            .map(|&(column, idx)| parse_value(record.get(idx).unwrap_or_default(), column, line))
            .collect::<crate::Result<Vec<_>>>()?;

        table.push(Row::new(ts, values));
    }

    log::debug!("loaded {} rows from {source} export", table.len());

    if !table.is_sorted() {
        log::debug!("{source} export is not in timestamp order");
    }

    Ok(table)
}

fn parse_value(cell: &str, column: Column, line: u64) -> crate::Result<Option<Value>> {
    if cell.is_empty() {
        return Ok(None);
    }

    cell.parse::<Value>()
        .map(Some)
        .map_err(|_| Error::InvalidValue {
            line,
            column: column.name(),
            value: cell.to_owned(),
        })
}
