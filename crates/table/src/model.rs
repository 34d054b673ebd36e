use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One observed positive match between a left and a right entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchRecord {
    pub left_id: String,
    pub right_id: String,
    pub comparison_id: String,
}

impl MatchRecord {
    pub fn new(
        left_id: impl Into<String>,
        right_id: impl Into<String>,
        comparison_id: impl Into<String>,
    ) -> Self {
        Self {
            left_id: left_id.into(),
            right_id: right_id.into(),
            comparison_id: comparison_id.into(),
        }
    }

    pub fn pair_key(&self) -> PairKey {
        PairKey {
            left_id: self.left_id.clone(),
            right_id: self.right_id.clone(),
        }
    }
}

/// Row identity = (left_id, right_id). At most one row per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub left_id: String,
    pub right_id: String,
}

// ---------------------------------------------------------------------------
// Consolidated table
// ---------------------------------------------------------------------------

/// One output row. `indicators[i]` is 1 iff comparison `i` of the registry
/// matched this pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedRow {
    pub left_id: String,
    pub right_id: String,
    pub indicators: Vec<u8>,
}

impl ConsolidatedRow {
    pub(crate) fn empty(key: PairKey, width: usize) -> Self {
        Self {
            left_id: key.left_id,
            right_id: key.right_id,
            indicators: vec![0; width],
        }
    }

    pub fn indicator(&self, position: usize) -> Option<u8> {
        self.indicators.get(position).copied()
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub pairs: usize,
    pub records_stacked: usize,
    pub records_skipped: usize,
    pub comparisons: usize,
    /// Pairs with a 1 in each comparison column.
    pub comparison_hits: BTreeMap<String, usize>,
    pub engine_version: String,
    pub written_at: String,
}
