use anyhow::{Context, Result};
use clap::Parser;
use searchwire::{Client, ClientConfig, RequestLogger};
use std::path::PathBuf;

mod commands;
mod telemetry;

#[derive(Parser, Debug)]
#[command(name = "searchwire")]
#[command(about = "Command line client for a search engine cluster")]
#[command(version)]
struct Cli {
    /// JSON client configuration file
    #[arg(short, long, env = "SEARCHWIRE_CONFIG", default_value = "config.json")]
    config: String,

    /// Server address; repeat for several (overrides the config file)
    #[arg(short, long)]
    server: Vec<String>,

    /// Log every request and response
    #[arg(long)]
    debug: bool,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long)]
    timeout: Option<f64>,

    /// Directory for rotated log files
    #[arg(long, default_value = "./logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: commands::Command,
}

/// Config file merged with flag overrides, plus the load error when the
/// defaults had to be used
fn load_config(cli: &Cli) -> (ClientConfig, Option<anyhow::Error>) {
    let (mut config, load_error) = match ClientConfig::load(&cli.config) {
        Ok(config) => (config, None),
        Err(e) => (ClientConfig::default(), Some(e)),
    };

    if !cli.server.is_empty() {
        config.servers = cli.server.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    config.debug |= cli.debug;
    (config, load_error)
}

/// A configured trace file gets its own subscriber; otherwise request
/// events flow into the global one
fn request_logger(config: &ClientConfig) -> Result<RequestLogger> {
    match config.trace_file {
        Some(_) => RequestLogger::from_config(config).context("failed to open trace file"),
        None => Ok(RequestLogger::current()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, load_error) = load_config(&cli);
    let _guard = telemetry::init_telemetry(&cli.log_dir, config.debug)?;
    if let Some(e) = load_error {
        tracing::warn!("Failed to load {} ({:#}), using defaults", cli.config, e);
    }
    tracing::info!(servers = ?config.servers, timeout_secs = config.timeout_secs, "searchwire starting");

    let client = Client::with_logger(&config, request_logger(&config)?)
        .context("failed to build client")?;

    let reply = commands::run(&client, &cli.command)?;
    println!("{}", serde_json::to_string_pretty(&reply)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::try_parse_from([
            "searchwire",
            "--config",
            "/nonexistent/searchwire.json",
            "--server",
            "es1:9200",
            "--server",
            "es2:9200",
            "--timeout",
            "1.5",
            "--debug",
            "state",
        ])
        .unwrap();

        let (config, load_error) = load_config(&cli);
        assert!(load_error.is_some());
        assert_eq!(config.servers, vec!["es1:9200", "es2:9200"]);
        assert_eq!(config.timeout_secs, 1.5);
        assert!(config.debug);
    }

    #[test]
    fn test_config_file_debug_selects_debug_filter() {
        let dir = std::env::temp_dir().join(format!("searchwire-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let trace = dir.join("requests.log");
        let path = dir.join("config.json");
        std::fs::write(
            &path,
            serde_json::json!({"servers": "es1:9200", "debug": true, "trace_file": trace})
                .to_string(),
        )
        .unwrap();

        let cli = Cli::try_parse_from(["searchwire", "--config", path.to_str().unwrap(), "state"])
            .unwrap();
        let (config, load_error) = load_config(&cli);

        assert!(load_error.is_none());
        assert!(config.debug);
        assert!(telemetry::default_filter(config.debug).contains("searchwire=debug"));
        assert!(!telemetry::default_filter(false).contains("searchwire=debug"));

        request_logger(&config).unwrap();
        assert!(trace.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_parse_index_command() {
        let cli = Cli::try_parse_from([
            "searchwire",
            "index",
            "twitter",
            "tweet",
            r#"{"user":"kimchy"}"#,
            "--id",
            "1",
            "--create",
        ])
        .unwrap();

        match cli.command {
            commands::Command::Index { id, create, .. } => {
                assert_eq!(id.as_deref(), Some("1"));
                assert!(create);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
