// Property-based tests for match-table consolidation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::{HashMap, HashSet};

use matchgrid_table::consolidate::consolidate;
use matchgrid_table::{ComparisonRegistry, MatchOutput, MatchRecord, TableOptions};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

const COMPARISONS: [&str; 4] = ["name", "email", "phone", "dob"];

fn registry() -> ComparisonRegistry {
    ComparisonRegistry::from_ids(COMPARISONS)
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Small id alphabets so pairs collide often.
fn arb_record() -> impl Strategy<Value = MatchRecord> {
    (0..5u8, 0..5u8, 0..COMPARISONS.len()).prop_map(|(l, r, c)| {
        MatchRecord::new(format!("L{l}"), format!("R{r}"), COMPARISONS[c])
    })
}

fn arb_records() -> impl Strategy<Value = Vec<MatchRecord>> {
    prop::collection::vec(arb_record(), 0..60)
}

fn key(r: &MatchRecord) -> (String, String) {
    (r.left_id.clone(), r.right_id.clone())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn one_row_per_distinct_pair(records in arb_records()) {
        let rows = consolidate(&registry(), &records).unwrap();
        let distinct: HashSet<_> = records.iter().map(key).collect();
        prop_assert_eq!(rows.len(), distinct.len());
    }

    #[test]
    fn indicator_set_iff_some_record(records in arb_records()) {
        let rows = consolidate(&registry(), &records).unwrap();
        let hits: HashSet<(String, String, String)> = records
            .iter()
            .map(|r| (r.left_id.clone(), r.right_id.clone(), r.comparison_id.clone()))
            .collect();

        for row in &rows {
            for (i, c) in COMPARISONS.iter().enumerate() {
                let expected = hits.contains(&(row.left_id.clone(), row.right_id.clone(), c.to_string()));
                prop_assert_eq!(row.indicators[i] == 1, expected);
                prop_assert!(row.indicators[i] <= 1);
            }
        }
    }

    #[test]
    fn every_row_has_full_width(records in arb_records()) {
        let rows = consolidate(&registry(), &records).unwrap();
        for row in &rows {
            prop_assert_eq!(row.indicators.len(), COMPARISONS.len());
        }
    }

    #[test]
    fn rows_in_first_seen_order(records in arb_records()) {
        let rows = consolidate(&registry(), &records).unwrap();
        let mut first_seen: HashMap<(String, String), usize> = HashMap::new();
        for (i, r) in records.iter().enumerate() {
            first_seen.entry(key(r)).or_insert(i);
        }
        let positions: Vec<usize> = rows
            .iter()
            .map(|row| first_seen[&(row.left_id.clone(), row.right_id.clone())])
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn repeating_records_changes_nothing(records in arb_records()) {
        let once = consolidate(&registry(), &records).unwrap();
        let doubled: Vec<MatchRecord> = records.iter().chain(records.iter()).cloned().collect();
        let twice = consolidate(&registry(), &doubled).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn written_table_has_header_plus_one_line_per_pair(records in arb_records()) {
        let mut out = MatchOutput::from_writer(Vec::new(), registry(), &TableOptions::default()).unwrap();
        for r in &records {
            out.stack(r.clone()).unwrap();
        }
        let (summary, bytes) = out.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        prop_assert_eq!(lines[0], "Human id,Plant id,name,email,phone,dob");
        prop_assert_eq!(lines.len(), summary.pairs + 1);
        prop_assert_eq!(summary.records_stacked, records.len());
        for line in &lines[1..] {
            prop_assert_eq!(line.split(',').count(), 2 + COMPARISONS.len());
        }
    }
}
