// Delimited-text writer for consolidated match tables

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::TableOptions;
use crate::error::TableError;
use crate::model::ConsolidatedRow;
use crate::registry::ComparisonRegistry;

/// Owns the destination from construction until `finish`. The header line is
/// written and flushed by the constructor.
pub struct TableWriter<W: Write> {
    inner: csv::Writer<W>,
    width: usize,
    rows_written: usize,
}

fn builder(options: &TableOptions) -> csv::WriterBuilder {
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(options.delimiter_byte())
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(if options.escape {
            csv::QuoteStyle::Necessary
        } else {
            csv::QuoteStyle::Never
        });
    builder
}

impl TableWriter<File> {
    pub fn create(
        path: &Path,
        registry: &ComparisonRegistry,
        options: &TableOptions,
    ) -> Result<Self, TableError> {
        options.validate()?;
        let inner = builder(options).from_path(path).map_err(|e| {
            TableError::ResourceUnavailable {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        Self::start(inner, registry, options)
    }
}

impl<W: Write> TableWriter<W> {
    pub fn from_writer(
        writer: W,
        registry: &ComparisonRegistry,
        options: &TableOptions,
    ) -> Result<Self, TableError> {
        options.validate()?;
        Self::start(builder(options).from_writer(writer), registry, options)
    }

    fn start(
        mut inner: csv::Writer<W>,
        registry: &ComparisonRegistry,
        options: &TableOptions,
    ) -> Result<Self, TableError> {
        let header = [options.left_label.as_str(), options.right_label.as_str()]
            .into_iter()
            .chain(registry.ids().iter().map(|id| id.as_str()));
        inner.write_record(header)?;
        inner.flush()?;
        log::debug!("wrote header with {} comparison column(s)", registry.len());

        Ok(Self {
            inner,
            width: registry.len(),
            rows_written: 0,
        })
    }

    pub fn write_row(&mut self, row: &ConsolidatedRow) -> Result<(), TableError> {
        debug_assert_eq!(row.indicators.len(), self.width);
        let indicators = row
            .indicators
            .iter()
            .map(|&v| if v == 0 { "0" } else { "1" });
        let record = [row.left_id.as_str(), row.right_id.as_str()]
            .into_iter()
            .chain(indicators);
        self.inner.write_record(record)?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_rows(&mut self, rows: &[ConsolidatedRow]) -> Result<(), TableError> {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and hand back the destination.
    pub fn finish(self) -> Result<W, TableError> {
        self.inner
            .into_inner()
            .map_err(|e| TableError::Io(e.error().to_string()))
    }
}
