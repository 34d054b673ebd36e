//! CLI Exit Code Registry
//!
//! Single source of truth for `mgrid` exit codes. Scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain     | Description                              |
//! |---------|------------|------------------------------------------|
//! | 0       | Universal  | Success                                  |
//! | 1       | Universal  | General error (unspecified)              |
//! | 2       | Universal  | CLI usage error (bad args, missing file) |
//! | 60-69   | table      | Match-table build codes                  |

use matchgrid_table::TableError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Table (60-69)
// =============================================================================

/// Config file failed to parse or validate.
pub const EXIT_TABLE_INVALID_CONFIG: u8 = 60;

/// Input records could not be read or parsed.
pub const EXIT_TABLE_INPUT: u8 = 61;

/// Output destination could not be opened or written.
pub const EXIT_TABLE_OUTPUT: u8 = 62;

/// A record referenced a comparison missing from the config.
pub const EXIT_TABLE_UNKNOWN_COMPARISON: u8 = 63;

/// Map a TableError to its exit code.
pub fn table_exit_code(err: &TableError) -> u8 {
    match err {
        TableError::ConfigParse(_) | TableError::ConfigValidation(_) => EXIT_TABLE_INVALID_CONFIG,
        TableError::MissingColumn(_) | TableError::RecordParse { .. } => EXIT_TABLE_INPUT,
        TableError::ResourceUnavailable { .. } | TableError::Io(_) => EXIT_TABLE_OUTPUT,
        TableError::UnknownComparison(_) => EXIT_TABLE_UNKNOWN_COMPARISON,
        TableError::AlreadyClosed => EXIT_ERROR,
    }
}
