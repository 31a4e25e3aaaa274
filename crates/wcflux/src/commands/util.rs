//! Shared helpers for command handlers.

use std::io::IsTerminal;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Status line on stderr, suppressed by `--quiet`.
pub fn notice(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

pub fn color(global: &GlobalOpts) -> bool {
    output::should_color(global.color)
}

/// Display a price, falling back to `-` for unpriced items.
pub fn price(value: &str) -> String {
    if value.is_empty() {
        "-".into()
    } else {
        value.to_owned()
    }
}

/// Stock column text: quantity when managed, else the status.
pub fn stock(manage_stock: bool, quantity: f64, status: &str, color: bool) -> String {
    let status = output::paint_stock_status(status, color);
    if manage_stock {
        format!("{quantity} ({status})")
    } else {
        status
    }
}
