//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result, WrapErr};

use crate::core::config::Config;
use crate::core::identity::RowId;
use crate::store::RestStore;

/// Open the hosted catalog store from the layered configuration
pub fn open_store() -> Result<RestStore> {
    let config = Config::load();
    RestStore::from_config(&config)
        .into_diagnostic()
        .wrap_err("failed to connect to the catalog store")
}

/// Parse a row id argument
pub fn parse_id(raw: &str) -> Result<RowId> {
    raw.parse::<RowId>()
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid id '{}'", raw))
}

/// ID cell for list output: short prefix by default, the full id under
/// `--verbose` so it can be fed back into show/delete
pub fn id_cell(id: RowId, verbose: bool) -> String {
    if verbose {
        id.to_string()
    } else {
        id.short()
    }
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
