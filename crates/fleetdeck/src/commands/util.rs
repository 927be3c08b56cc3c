//! Shared helpers for command handlers.

use fleetdeck_core::FieldErrors;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Turn form validation errors into a `CliError` listing every field.
/// Nothing has touched the network at this point.
pub fn form_invalid(errors: &FieldErrors) -> CliError {
    let details = errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n");
    CliError::FormInvalid {
        count: errors.len(),
        details,
    }
}

/// Placeholder for empty optional cells in detail output.
pub fn dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_owned(),
        _ => "\u{2500}".into(),
    }
}
