use std::fmt;

#[derive(Debug)]
pub enum TableError {
    /// Output destination could not be opened or created.
    ResourceUnavailable { path: String, message: String },
    /// A match record names a comparison the registry does not know.
    UnknownComparison(String),
    /// `stack` or `close` called on an output that was already closed.
    AlreadyClosed,
    /// Write / flush failure on an open destination.
    Io(String),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty label, duplicate comparison, etc.).
    ConfigValidation(String),
    /// Mapped column missing from a CSV input header.
    MissingColumn(String),
    /// Input record could not be parsed. `line` is 1-based.
    RecordParse { line: usize, message: String },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceUnavailable { path, message } => {
                write!(f, "cannot open '{path}' for writing: {message}")
            }
            Self::UnknownComparison(id) => write!(f, "unknown comparison: '{id}'"),
            Self::AlreadyClosed => write!(f, "match output already closed"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn(column) => write!(f, "missing column '{column}'"),
            Self::RecordParse { line, message } => {
                write!(f, "line {line}: cannot parse match record: {message}")
            }
        }
    }
}

impl std::error::Error for TableError {}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        Self::Io(e.to_string())
    }
}
