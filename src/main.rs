use std::process::ExitCode;

use anyhow::Result;
use game_engine::{logging, App, AppConfig};
use tracing::{debug, error};

fn main() -> ExitCode {
    if let Err(err) = logging::init() {
        eprintln!("failed to initialize logging: {err:#}");
        return ExitCode::FAILURE;
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = AppConfig::default();
    debug!("Starting with {:?}", config);

    let mut app = App::new(&config)?;
    debug!(
        "Validation {}, using \"{}\"",
        if app.validation_enabled() { "enabled" } else { "disabled" },
        app.physical_device().info.name
    );
    app.run();

    Ok(())
}
