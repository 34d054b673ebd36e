//! `mgrid build` / `mgrid validate` — config-driven match-table builds.

use std::path::{Path, PathBuf};

use matchgrid_table::load::load_records;
use matchgrid_table::{MatchOutput, MatchRecord, TableConfig, TableError, TableSummary};
use serde::Serialize;

use crate::exit_codes::{
    table_exit_code, EXIT_TABLE_INPUT, EXIT_TABLE_INVALID_CONFIG, EXIT_TABLE_OUTPUT, EXIT_USAGE,
};
use crate::CliError;

fn table_err(err: TableError) -> CliError {
    CliError { code: table_exit_code(&err), message: err.to_string(), hint: None }
}

#[derive(Serialize)]
struct BuildReport<'a> {
    config_name: &'a str,
    output: String,
    #[serde(flatten)]
    summary: TableSummary,
}

fn read_config(config_path: &Path) -> Result<TableConfig, CliError> {
    let config_str = std::fs::read_to_string(config_path).map_err(|e| CliError {
        code: EXIT_USAGE,
        message: format!("cannot read config {}: {e}", config_path.display()),
        hint: None,
    })?;
    TableConfig::from_toml(&config_str).map_err(table_err)
}

pub fn cmd_build(
    config_path: PathBuf,
    output_override: Option<PathBuf>,
    json_output: bool,
) -> Result<(), CliError> {
    let config = read_config(&config_path)?;

    // Paths in the config are relative to the config file's directory
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let input = config.input.as_ref().ok_or_else(|| CliError {
        code: EXIT_TABLE_INVALID_CONFIG,
        message: "config has no [input] section".into(),
        hint: Some("add [input] with file = \"matches.csv\"".into()),
    })?;

    let output_path = match (output_override, config.output.as_ref()) {
        (Some(path), _) => path,
        (None, Some(out)) => base_dir.join(&out.file),
        (None, None) => {
            return Err(CliError {
                code: EXIT_USAGE,
                message: "no output destination".into(),
                hint: Some("pass --output or add [output] file = \"...\" to the config".into()),
            })
        }
    };

    let input_path = base_dir.join(&input.file);
    let data = std::fs::read_to_string(&input_path).map_err(|e| CliError {
        code: EXIT_TABLE_INPUT,
        message: format!("cannot read {}: {e}", input_path.display()),
        hint: None,
    })?;
    let records = load_records(&data, input).map_err(table_err)?;

    // Atomic: build into .tmp, rename over the output only once closed
    let tmp_path = output_path.with_extension("csv.tmp");
    let summary = match write_table(&tmp_path, &config, records) {
        Ok(summary) => summary,
        Err(err) => {
            std::fs::remove_file(&tmp_path).ok();
            return Err(err);
        }
    };
    std::fs::rename(&tmp_path, &output_path).map_err(|e| {
        std::fs::remove_file(&tmp_path).ok();
        CliError {
            code: EXIT_TABLE_OUTPUT,
            message: format!("failed to rename tmp to {}: {e}", output_path.display()),
            hint: None,
        }
    })?;

    eprintln!(
        "match table '{}': {} pair(s) from {} record(s) across {} comparison(s), {} skipped",
        config.name,
        summary.pairs,
        summary.records_stacked,
        summary.comparisons,
        summary.records_skipped,
    );
    eprintln!("wrote {}", output_path.display());

    if json_output {
        let report = BuildReport {
            config_name: &config.name,
            output: output_path.display().to_string(),
            summary,
        };
        let json = serde_json::to_string_pretty(&report).map_err(|e| CliError {
            code: crate::exit_codes::EXIT_ERROR,
            message: format!("JSON serialization error: {e}"),
            hint: None,
        })?;
        println!("{json}");
    }

    Ok(())
}

fn write_table(
    path: &Path,
    config: &TableConfig,
    records: Vec<MatchRecord>,
) -> Result<TableSummary, CliError> {
    let mut out = MatchOutput::create(path, config.registry(), &config.table).map_err(table_err)?;
    for (i, record) in records.into_iter().enumerate() {
        out.stack(record).map_err(|e| {
            let hint = matches!(e, TableError::UnknownComparison(_)).then(|| {
                "register it under [[comparisons]] or set unknown_comparison = \"skip\"".to_string()
            });
            CliError {
                code: table_exit_code(&e),
                message: format!("record {}: {e}", i + 1),
                hint,
            }
        })?;
    }
    out.close().map_err(table_err)
}

pub fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config = read_config(&config_path)?;
    eprintln!(
        "config '{}' is valid: {} comparison(s), unknown comparisons: {}",
        config.name,
        config.comparisons.len(),
        config.table.unknown_comparison,
    );
    Ok(())
}
