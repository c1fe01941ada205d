//! Desktop analog clock.
//!
//! Opens a window with a 3D clock face whose needles follow the system time.
//! The camera drifts towards the pointer. `Esc` or closing the window quits.

mod app;
mod config;
mod face;
mod stage;

use dial_engine::logging::{init_logging, LoggingConfig};

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = config::StudioConfig::default();
    log::info!(
        "starting {} at {}x{}",
        config.title,
        config.size.0,
        config.size.1
    );

    app::run(config)
}
