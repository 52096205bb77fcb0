use std::process::ExitCode;

use profilenet_common::Endpoint;
use profilenet_common::config::Config;

use crate::commands::target;
use crate::terminal::print;

pub fn connect(endpoint: Option<Endpoint>, cfg: &Config) -> anyhow::Result<ExitCode> {
    let endpoint: Endpoint = target(endpoint, cfg)?;
    print::print_status(format!("Connecting to {endpoint} (system timeout)"));

    let handle = profilenet_core::connect(endpoint)?;
    print::verdict(true, &format!("Connected to {}", handle.endpoint()));
    handle.close();

    Ok(ExitCode::SUCCESS)
}
