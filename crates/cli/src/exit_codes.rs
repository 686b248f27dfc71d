//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scheduled report jobs rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad args, no input configured)          |
//! | 3    | Input unreadable (missing file, bad workbook/CSV)    |
//! | 4    | Required column or sheet missing from the input      |
//! | 5    | Invalid configuration (`report.toml`, rules, period) |
//! | 6    | Export failed (summary workbook or JSON dump)        |

use carex_io::IoError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, no input file given or configured.
pub const EXIT_USAGE: u8 = 2;

/// Input file missing, unreadable, or not a workbook/CSV.
pub const EXIT_INPUT: u8 = 3;

/// A required sheet or column is absent. The load is aborted.
pub const EXIT_MISSING_COLUMN: u8 = 4;

/// Settings file does not parse or fails validation; bad `--as-of`.
pub const EXIT_CONFIG: u8 = 5;

/// Summary workbook or JSON dump could not be written.
pub const EXIT_EXPORT: u8 = 6;

/// Map an I/O-layer error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::Open { .. } | IoError::Csv { .. } => EXIT_INPUT,
        IoError::SheetNotFound { .. } | IoError::MissingColumn { .. } => EXIT_MISSING_COLUMN,
        IoError::Write { .. } | IoError::Json(_) => EXIT_EXPORT,
        IoError::Metrics(_) => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn io_errors_map_to_distinct_codes() {
        let open = IoError::Open { path: PathBuf::from("x.xlsx"), message: "gone".into() };
        let column = IoError::MissingColumn { table: "BD".into(), column: "Mes".into() };
        let sheet = IoError::SheetNotFound { path: PathBuf::from("x.xlsx"), sheet: "BD".into() };
        let write = IoError::Write { path: PathBuf::from("out"), message: "denied".into() };
        assert_eq!(io_exit_code(&open), EXIT_INPUT);
        assert_eq!(io_exit_code(&column), EXIT_MISSING_COLUMN);
        assert_eq!(io_exit_code(&sheet), EXIT_MISSING_COLUMN);
        assert_eq!(io_exit_code(&write), EXIT_EXPORT);
    }
}
