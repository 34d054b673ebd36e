use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::accumulator::MatchAccumulator;
use crate::config::TableOptions;
use crate::error::TableError;
use crate::model::{MatchRecord, TableSummary};
use crate::registry::ComparisonRegistry;
use crate::writer::TableWriter;

/// Stack match records as comparisons complete, then `close` once to write the
/// consolidated table.
///
/// The destination is owned from construction; the header is already on it
/// when the constructor returns. After `close` the output rejects further use
/// with [`TableError::AlreadyClosed`]. Dropping an unclosed output releases
/// the destination without writing any rows.
pub struct MatchOutput<W: Write> {
    accumulator: MatchAccumulator,
    writer: Option<TableWriter<W>>,
}

impl MatchOutput<File> {
    pub fn create(
        path: impl AsRef<Path>,
        registry: ComparisonRegistry,
        options: &TableOptions,
    ) -> Result<Self, TableError> {
        options.validate()?;
        let writer = TableWriter::create(path.as_ref(), &registry, options)?;
        Ok(Self::assemble(writer, registry, options))
    }
}

impl<W: Write> MatchOutput<W> {
    pub fn from_writer(
        writer: W,
        registry: ComparisonRegistry,
        options: &TableOptions,
    ) -> Result<Self, TableError> {
        options.validate()?;
        let writer = TableWriter::from_writer(writer, &registry, options)?;
        Ok(Self::assemble(writer, registry, options))
    }

    fn assemble(writer: TableWriter<W>, registry: ComparisonRegistry, options: &TableOptions) -> Self {
        Self {
            accumulator: MatchAccumulator::new(registry, options.unknown_comparison),
            writer: Some(writer),
        }
    }

    pub fn stack(&mut self, record: MatchRecord) -> Result<(), TableError> {
        if self.writer.is_none() {
            return Err(TableError::AlreadyClosed);
        }
        self.accumulator.stack(record)
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    pub fn accumulator(&self) -> &MatchAccumulator {
        &self.accumulator
    }

    /// Write every consolidated row, flush and release the destination.
    /// A second call returns `AlreadyClosed`.
    pub fn close(&mut self) -> Result<TableSummary, TableError> {
        let (summary, destination) = self.write_table()?;
        drop(destination);
        Ok(summary)
    }

    /// Like `close`, but hands the destination back instead of dropping it.
    pub fn finish(mut self) -> Result<(TableSummary, W), TableError> {
        self.write_table()
    }

    fn write_table(&mut self) -> Result<(TableSummary, W), TableError> {
        // Taken up front: the destination is released on every exit path
        let mut writer = self.writer.take().ok_or(TableError::AlreadyClosed)?;
        writer.write_rows(self.accumulator.rows())?;
        let destination = writer.finish()?;

        let summary = self.summary();
        log::info!(
            "match table closed: {} pair(s) from {} record(s), {} skipped",
            summary.pairs,
            summary.records_stacked,
            summary.records_skipped
        );
        Ok((summary, destination))
    }

    fn summary(&self) -> TableSummary {
        let registry = self.accumulator.registry();
        let rows = self.accumulator.rows();

        let mut comparison_hits = BTreeMap::new();
        for (i, id) in registry.ids().iter().enumerate() {
            let hits = rows.iter().filter(|r| r.indicator(i) == Some(1)).count();
            *comparison_hits.entry(id.as_str().to_string()).or_insert(0) += hits;
        }

        TableSummary {
            pairs: rows.len(),
            records_stacked: self.accumulator.stacked(),
            records_skipped: self.accumulator.skipped(),
            comparisons: registry.len(),
            comparison_hits,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            written_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl<W: Write> Drop for MatchOutput<W> {
    fn drop(&mut self) {
        if self.writer.is_some() && !self.accumulator.rows().is_empty() {
            log::warn!(
                "match output dropped without close; {} pending row(s) discarded",
                self.accumulator.rows().len()
            );
        }
    }
}
