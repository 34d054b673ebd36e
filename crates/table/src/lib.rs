//! `matchgrid-table` — Match-table consolidation engine.
//!
//! Collects pairwise match records (left id, right id, comparison id) and
//! writes one delimited row per unique pair with a 0/1 column per comparison.
//! No CLI dependencies.

pub mod accumulator;
pub mod config;
pub mod consolidate;
pub mod error;
pub mod load;
pub mod model;
pub mod output;
pub mod registry;
pub mod writer;

pub use config::{TableConfig, TableOptions, UnknownComparisonPolicy};
pub use error::TableError;
pub use model::{ConsolidatedRow, MatchRecord, PairKey, TableSummary};
pub use output::MatchOutput;
pub use registry::{Comparison, ComparisonId, ComparisonRegistry};
