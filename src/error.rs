/// Error type
#[derive(Debug)]
pub enum Error {
    /// An IO error.
    Io(std::io::Error),

    /// Malformed CSV record.
    Csv(csv::Error),

    /// A timestamp cell could not be parsed.
    InvalidTimestamp {
        /// 1-based line in the source file
        line: u64,

        /// Raw cell content
        value: String,
    },

    /// A numeric cell could not be parsed.
    InvalidValue {
        /// 1-based line in the source file
        line: u64,

        /// Semantic column name
        column: &'static str,

        /// Raw cell content
        value: String,
    },

    /// A required header is missing from the input file.
    MissingColumn(&'static str),

    /// The granularity token is not one of the supported bucket widths.
    InvalidGranularity(String),

    /// The table does not carry the requested column.
    UnknownColumn(&'static str),

    /// There are no (non-missing) values to summarize.
    NoData,
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => {
                write!(f, "{e}")
            }
            Self::Csv(e) => {
                write!(f, "{e}")
            }
            Self::InvalidTimestamp { line, value } => {
                write!(f, "line {line}: invalid timestamp {value:?}")
            }
            Self::InvalidValue {
                line,
                column,
                value,
            } => {
                write!(f, "line {line}: invalid value {value:?} in column {column}")
            }
            Self::MissingColumn(header) => {
                write!(f, "missing column {header:?}")
            }
            Self::InvalidGranularity(token) => {
                write!(f, "invalid granularity {token:?}")
            }
            Self::UnknownColumn(column) => {
                write!(f, "unknown column {column:?}")
            }
            Self::NoData => {
                write!(f, "no data")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
