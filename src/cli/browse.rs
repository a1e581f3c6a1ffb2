//! Browse command handler.
//!
//! Implements the `browse` subcommand: the interactive catalog TUI.

use anyhow::Result;

use crate::config::AppConfig;
use crate::tui::{run_tui, App};

use super::{backend, exit_codes, runtime};

/// Run the browse command.
///
/// The TUI itself stays synchronous; fetches are spawned onto this runtime's
/// workers and their results come back through the coordinator channel that
/// [`App`] drains between frames.
pub fn run_browse(config: AppConfig, sample: bool) -> Result<i32> {
    let api = if sample { None } else { Some(backend(&config)?) };

    let rt = runtime()?;
    let mut app = App::new(config, api, rt.handle().clone());
    run_tui(&mut app)?;

    Ok(exit_codes::SUCCESS)
}
