//! Command dispatch: bridges CLI args -> Console operations -> output formatting.

pub mod alerts;
pub mod config_cmd;
pub mod devices;
pub mod util;
pub mod warehouses;

use fleetdeck_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a service-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    console: &Console,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(console, args, global).await,
        Command::Warehouses(args) => warehouses::handle(console, args, global).await,
        // Alerts, Config, and Completions are handled before dispatch
        Command::Alerts(_) | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
