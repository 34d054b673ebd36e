use std::collections::HashMap;

use crate::error::TableError;
use crate::model::{ConsolidatedRow, MatchRecord, PairKey};
use crate::registry::ComparisonRegistry;

/// Incremental pair table: rows in first-seen order plus a key → row index.
#[derive(Debug, Default)]
pub(crate) struct Consolidator {
    width: usize,
    rows: Vec<ConsolidatedRow>,
    index: HashMap<PairKey, usize>,
}

impl Consolidator {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            width,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Set the indicator at `position` for the record's pair, creating the
    /// row (all zeros) on first sight. Returns `Some(true)` if a new row was
    /// created, `None` if `position` is outside the table width.
    pub(crate) fn mark(&mut self, record: &MatchRecord, position: usize) -> Option<bool> {
        if position >= self.width {
            return None;
        }
        let key = record.pair_key();
        match self.index.get(&key) {
            Some(&i) => {
                self.rows[i].indicators[position] = 1;
                Some(false)
            }
            None => {
                let mut row = ConsolidatedRow::empty(key.clone(), self.width);
                row.indicators[position] = 1;
                self.index.insert(key, self.rows.len());
                self.rows.push(row);
                Some(true)
            }
        }
    }

    pub(crate) fn rows(&self) -> &[ConsolidatedRow] {
        &self.rows
    }

    pub(crate) fn into_rows(self) -> Vec<ConsolidatedRow> {
        self.rows
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Consolidate a batch of records in one pass.
pub fn consolidate(
    registry: &ComparisonRegistry,
    records: &[MatchRecord],
) -> Result<Vec<ConsolidatedRow>, TableError> {
    let mut table = Consolidator::new(registry.len());
    for record in records {
        let position = registry
            .position(&record.comparison_id)
            .ok_or_else(|| TableError::UnknownComparison(record.comparison_id.clone()))?;
        table.mark(record, position);
    }
    Ok(table.into_rows())
}
