//! `q330`: poll Q330 dataloggers and print their records as JSON

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use qdp::{Serial, Soh};

/// Query Q330 dataloggers for serial or state of health details.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Recover instrument serial number details instead of state of health.
    #[arg(long)]
    serial: bool,
    /// Port to use for hosts given without one.
    #[arg(long, env = "Q330_PORT", default_value_t = qdp::DEFAULT_PORT)]
    ipport: u16,
    /// How long to wait for each reply, as seconds (`2.5`) or a duration (`1500ms`, `1m30s`).
    #[arg(long, env = "Q330_TIMEOUT", default_value = "2s", value_parser = parse_timeout)]
    timeout: Duration,
    /// Devices to poll, as `host` or `host:port`.
    hosts: Vec<String>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

/// One decoded device record
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Record {
    Serial(Serial),
    Soh(Box<Soh>),
}

/// Parse a timeout given as plain seconds or as `<number><unit>` terms
fn parse_timeout(arg: &str) -> std::result::Result<Duration, String> {
    let secs = match arg.parse::<f64>() {
        Ok(secs) => secs,
        Err(_) => duration_secs(arg).ok_or_else(|| format!("invalid duration `{}`", arg))?,
    };

    match Duration::try_from_secs_f64(secs) {
        Ok(timeout) if !timeout.is_zero() => Ok(timeout),
        Ok(_) => Err("timeout must be greater than zero".to_string()),
        Err(e) => Err(format!("timeout out of range: {}", e)),
    }
}

/// Total seconds of a duration string such as `1m30s` or `250ms`
fn duration_secs(arg: &str) -> Option<f64> {
    let mut rest = arg.trim();
    let mut total = 0.0;

    if rest.is_empty() {
        return None;
    }

    while !rest.is_empty() {
        let split = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(split);
        let value: f64 = number.parse().ok()?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        total += match unit {
            "h" => value * 3600.0,
            "m" => value * 60.0,
            "s" => value,
            "ms" => value / 1e3,
            "us" | "µs" => value / 1e6,
            "ns" => value / 1e9,
            _ => return None,
        };
        rest = tail;
    }

    Some(total)
}

fn setup_logging(verbosity: &Verbosity<WarnLevel>) {
    // stdout carries the JSON output
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}

async fn poll(cli: &Cli) -> Result<BTreeMap<String, Record>> {
    let timeout = cli.timeout;
    let mut results = BTreeMap::new();

    for arg in &cli.hosts {
        let (host, port) = qdp::split_host_port(arg, cli.ipport)?;
        debug!(%host, port, serial = cli.serial, "Polling");

        let record = if cli.serial {
            qdp::request_serial(&host, port, timeout)
                .await
                .with_context(|| format!("Serial request to {} failed", arg))?
                .map(Record::Serial)
        } else {
            qdp::request_status(&host, port, timeout)
                .await
                .with_context(|| format!("Status request to {} failed", arg))?
                .map(|soh| Record::Soh(Box::new(soh)))
        };

        match record {
            Some(record) => {
                results.insert(host, record);
            }
            None => info!(%host, "No usable reply"),
        }
    }

    Ok(results)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.verbose);

    let results = poll(&cli).await?;

    println!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
