use crate::config::{ColumnMapping, InputConfig, InputFormat};
use crate::error::TableError;
use crate::model::MatchRecord;

/// Load match records according to the input config's format.
pub fn load_records(data: &str, input: &InputConfig) -> Result<Vec<MatchRecord>, TableError> {
    match input.format {
        InputFormat::Csv => load_csv_records(data, &input.columns),
        InputFormat::Jsonl => load_jsonl_records(data),
    }
}

/// Load CSV rows into MatchRecords via the column mapping. Header required.
pub fn load_csv_records(
    csv_data: &str,
    columns: &ColumnMapping,
) -> Result<Vec<MatchRecord>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(&e, 1))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let idx = |name: &str| -> Result<usize, TableError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::MissingColumn(name.into()))
    };

    let left_idx = idx(&columns.left_id)?;
    let right_idx = idx(&columns.right_id)?;
    let comparison_idx = idx(&columns.comparison_id)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| parse_error(&e, 0))?;

        // Blank line
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let field = |i: usize, name: &str| -> Result<String, TableError> {
            record
                .get(i)
                .map(|s| s.to_string())
                .ok_or_else(|| TableError::RecordParse {
                    line,
                    message: format!("missing value for '{name}'"),
                })
        };

        records.push(MatchRecord {
            left_id: field(left_idx, &columns.left_id)?,
            right_id: field(right_idx, &columns.right_id)?,
            comparison_id: field(comparison_idx, &columns.comparison_id)?,
        });
    }

    Ok(records)
}

/// Input-side CSV failure. `fallback_line` is used when csv has no position.
fn parse_error(e: &csv::Error, fallback_line: usize) -> TableError {
    TableError::RecordParse {
        line: e.position().map(|p| p.line() as usize).unwrap_or(fallback_line),
        message: e.to_string(),
    }
}

/// Load one JSON object per line. Blank lines are skipped.
pub fn load_jsonl_records(data: &str) -> Result<Vec<MatchRecord>, TableError> {
    data.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<MatchRecord>(line).map_err(|e| TableError::RecordParse {
                line: i + 1,
                message: e.to_string(),
            })
        })
        .collect()
}
