use crate::{range::DateRange, schema::Column, Value};
use chrono::NaiveDateTime;

/// A timestamped row of measurements.
///
/// `values` is ordered like the columns of the owning [`Table`];
/// `None` marks a missing measurement.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Observation (or bucket start) time
    pub ts: NaiveDateTime,

    /// One value per table column
    pub values: Vec<Option<Value>>,
}

impl Row {
    /// Creates a new row.
    #[must_use]
    pub fn new(ts: NaiveDateTime, values: Vec<Option<Value>>) -> Self {
        Self { ts, values }
    }

    /// Returns the value at the given column index.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Value> {
        self.values.get(idx).copied().flatten()
    }
}

/// An ordered table of timestamped measurements with named columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Creates an empty table with the given columns.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a table from existing rows.
    ///
    /// Rows are padded or truncated to the column count.
    #[must_use]
    pub fn from_rows(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        let mut table = Self::new(columns);
        table.rows.reserve(rows.len());

        for row in rows {
            table.push(row);
        }

        table
    }

    /// Appends a row.
    pub fn push(&mut self, mut row: Row) {
        row.values.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Columns of this table.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Rows of this table.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column.
    #[must_use]
    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }

    /// Returns `true` if rows are in ascending timestamp order (duplicates allowed).
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.rows.windows(2).all(|w| match w {
            [a, b] => a.ts <= b.ts,
            _ => true,
        })
    }

    /// Iterates over the values of a column.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownColumn`] if the table does not carry the column.
    pub fn values(
        &self,
        column: Column,
    ) -> crate::Result<impl Iterator<Item = Option<Value>> + '_> {
        let idx = self
            .column_index(column)
            .ok_or(crate::Error::UnknownColumn(column.name()))?;

        Ok(self.rows.iter().map(move |row| row.get(idx)))
    }

    /// Projects the table onto a subset of its columns.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownColumn`] if the table does not carry one of the columns.
    pub fn select(&self, columns: &[Column]) -> crate::Result<Self> {
        let indexes = columns
            .iter()
            .map(|&c| {
                self.column_index(c)
                    .ok_or(crate::Error::UnknownColumn(c.name()))
            })
            .collect::<crate::Result<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| Row::new(row.ts, indexes.iter().map(|&idx| row.get(idx)).collect()))
            .collect();

        Ok(Self {
            columns: columns.to_vec(),
            rows,
        })
    }

    /// Keeps only rows whose timestamp lies in the range.
    #[must_use]
    pub fn filter(&self, range: &DateRange) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| range.contains(row.ts))
                .cloned()
                .collect(),
        }
    }

    /// Earliest and latest timestamp.
    #[must_use]
    pub fn time_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.rows.iter().map(|row| row.ts).min()?;
        let max = self.rows.iter().map(|row| row.ts).max()?;
        Some((min, max))
    }
}
