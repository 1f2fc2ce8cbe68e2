//! Top-level command execution: settings, optional bulk load, session loop

use std::io;

use tracing::{debug, instrument};

use crate::application::Session;
use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::config::Settings;

#[instrument(level = "debug", skip(cli))]
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");
    if !settings.color {
        colored::control::set_override(false);
    }

    let mut session = Session::new(settings);
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    if let Some(file) = &cli.file {
        session.load(file, &mut stderr)?;
    }
    session.run(io::stdin().lock(), &mut stdout, &mut stderr)?;
    Ok(())
}
