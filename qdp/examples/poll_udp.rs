//! Poll a datalogger for its serial and state of health records

use std::time::Duration;

use qdp::{Client, DEFAULT_PORT};

#[tokio::main]
async fn main() -> qdp::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Change to your device address
    let addr = std::env::var("DEVICE_IP").unwrap_or_else(|_| "192.168.1.201".to_string());
    let (host, port) = qdp::split_host_port(&addr, DEFAULT_PORT)?;

    println!("Polling {}:{} via UDP...", host, port);

    let client = Client::new(host, port).with_timeout(Duration::from_secs(2));

    match client.read_serial().await? {
        Some(serial) => println!("{}", serial.to_json_pretty()?),
        None => println!("No usable serial reply"),
    }

    match client.read_soh().await? {
        Some(soh) => println!("{}", soh.to_json_pretty()?),
        None => println!("No usable status reply"),
    }

    Ok(())
}
