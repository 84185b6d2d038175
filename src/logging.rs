use anyhow::Result;
use log::LevelFilter;
use simple_logger::{set_up_color_terminal, SimpleLogger};

/// Logger with every level enabled, so verbose validation messages reach stderr.
pub fn logger() -> SimpleLogger {
    SimpleLogger::new().with_level(LevelFilter::Trace)
}

/// Routes `tracing`/`log` output to stderr. `RUST_LOG` overrides the default level.
pub fn init() -> Result<()> {
    set_up_color_terminal();
    logger().env().init()?;
    Ok(())
}
