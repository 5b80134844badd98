use tracing::info;
use wildprobe_domain::{CliOverrides, Config};

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;

    info!(
        config_file = config_path.unwrap_or("default"),
        queries_per_server = config.probe.queries_per_server,
        query_timeout_ms = config.probe.query_timeout,
        lookup_retries = config.resolver.lookup_retries,
        "Configuration loaded"
    );

    Ok(config)
}
