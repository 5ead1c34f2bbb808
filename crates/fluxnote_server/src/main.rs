//! FluxNote HTTP health server.

use anyhow::{bail, Context};
use fluxnote_core::{init_stderr_logging, CoreConfig};
use log::error;

fn main() -> anyhow::Result<()> {
    let config = CoreConfig::from_env();
    init_stderr_logging(&config.log_level).context("failed to initialize logging")?;

    if let Err(err) = rocket::execute(fluxnote_server::build_rocket().launch()) {
        error!("event=server_launch module=server status=error error={err}");
        bail!("failed to launch rocket: {err}");
    }
    Ok(())
}
