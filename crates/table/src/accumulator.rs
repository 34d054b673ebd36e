use crate::config::UnknownComparisonPolicy;
use crate::consolidate::Consolidator;
use crate::error::TableError;
use crate::model::{ConsolidatedRow, MatchRecord};
use crate::registry::ComparisonRegistry;

/// Receives match records one at a time and keeps the pair table current.
///
/// Records are validated against the registry at `stack` time so a bad
/// comparison id is reported by the call that introduced it.
#[derive(Debug)]
pub struct MatchAccumulator {
    registry: ComparisonRegistry,
    policy: UnknownComparisonPolicy,
    table: Consolidator,
    stacked: usize,
    skipped: usize,
}

impl MatchAccumulator {
    pub fn new(registry: ComparisonRegistry, policy: UnknownComparisonPolicy) -> Self {
        let table = Consolidator::new(registry.len());
        Self {
            registry,
            policy,
            table,
            stacked: 0,
            skipped: 0,
        }
    }

    pub fn stack(&mut self, record: MatchRecord) -> Result<(), TableError> {
        let Some(position) = self.registry.position(&record.comparison_id) else {
            return match self.policy {
                UnknownComparisonPolicy::Reject => {
                    Err(TableError::UnknownComparison(record.comparison_id))
                }
                UnknownComparisonPolicy::Skip => {
                    log::warn!(
                        "skipping match {} / {}: unknown comparison '{}'",
                        record.left_id,
                        record.right_id,
                        record.comparison_id
                    );
                    self.skipped += 1;
                    Ok(())
                }
            };
        };

        if self.table.mark(&record, position) == Some(true) {
            log::debug!("new pair {} / {}", record.left_id, record.right_id);
        }
        self.stacked += 1;
        Ok(())
    }

    pub fn registry(&self) -> &ComparisonRegistry {
        &self.registry
    }

    pub fn rows(&self) -> &[ConsolidatedRow] {
        self.table.rows()
    }

    /// Records accepted into the table.
    pub fn stacked(&self) -> usize {
        self.stacked
    }

    /// Records dropped under `UnknownComparisonPolicy::Skip`.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
