use std::env;

use anyhow::Context;
use tracing::warn;
use tracing_subscriber::EnvFilter;

const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let raw_args: Vec<String> = env::args().collect();
    if raw_args.get(1).map(|s| s.as_str()) == Some("serve") {
        let port = match raw_args.get(2) {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                warn!(port = %raw, "invalid port, falling back to {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        sporadic::api::run_http_server(port)
            .await
            .with_context(|| format!("HTTP server on port {port} failed"))?;
        return Ok(());
    }

    let report = sporadic::api::run_cli(raw_args)?;
    print!("{report}");
    Ok(())
}
