// ismartgate_exporter - Prometheus metrics exporter for iSmartGate devices
//
// Copyright 2022 Nick Pillitteri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use clap::Parser;
use ismartgate_exporter::client::GateClient;
use ismartgate_exporter::config::DeviceConfig;
use ismartgate_exporter::http::RequestContext;
use ismartgate_exporter::metrics::TemperatureMetrics;
use ismartgate_exporter::poller::TemperaturePoller;
use prometheus_client::registry::Registry;
use std::error::Error;
use std::io;
use std::process;
use std::sync::Arc;
use tokio::signal::unix::{self, SignalKind};
use tracing::Level;

const DEFAULT_LOG_LEVEL: Level = Level::INFO;
const DEFAULT_HOSTNAME: &str = "192.168.1.242";
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_INTERVAL_SECS: u64 = 60;
const DEFAULT_LISTEN_PORT: u16 = 9805;
const DEFAULT_DOOR: u32 = 1;

#[derive(Debug, Parser)]
#[clap(name = "ismartgate_exporter", version = clap::crate_version!())]
struct IsmartgateExporterApplication {
    /// Hostname of the iSmartGate device
    #[clap(long, default_value_t = DEFAULT_HOSTNAME.into())]
    hostname: String,

    /// Username for the iSmartGate device
    #[clap(long, default_value_t = DEFAULT_USERNAME.into())]
    username: String,

    /// Password for the iSmartGate device (required)
    #[clap(long, default_value = "", hide_default_value = true)]
    password: String,

    /// Read the temperature from the iSmartGate device at this interval, in seconds.
    #[clap(long, default_value_t = DEFAULT_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Port the Prometheus metrics endpoint listens on, on all interfaces.
    #[clap(long = "listenPort", alias = "listen-port", default_value_t = DEFAULT_LISTEN_PORT)]
    listen_port: u16,

    /// Which door to read the temperature for
    #[clap(long, default_value_t = DEFAULT_DOOR)]
    door: u32,

    /// Logging verbosity. Allowed values are 'trace', 'debug', 'info', 'warn', and 'error'
    /// (case insensitive)
    #[clap(long, default_value_t = DEFAULT_LOG_LEVEL)]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let opts = IsmartgateExporterApplication::parse();
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(opts.log_level)
            .finish(),
    )
    .expect("failed to set tracing subscriber");

    let config = DeviceConfig::new(
        &opts.hostname,
        &opts.username,
        &opts.password,
        opts.interval,
        opts.listen_port,
        opts.door,
    )
    .unwrap_or_else(|e| {
        tracing::error!(message = "invalid configuration", error = %e);
        process::exit(1)
    });

    let client = GateClient::new(&config.host, &config.username, &config.password).unwrap_or_else(|e| {
        tracing::error!(message = "unable to initialize device client", error = %e);
        process::exit(1)
    });

    // Read the temperature once before starting the HTTP server so that the first
    // scrape by Prometheus already has a value, if the device is reachable.
    let mut registry = Registry::default();
    let metrics = TemperatureMetrics::new(&mut registry);
    let poller = TemperaturePoller::new(client, metrics, config.door, config.interval);
    tracing::info!(message = "starting temperature polling", hostname = %config.host, door = config.door);
    let polling = poller.start().await;

    let context = Arc::new(RequestContext::new(registry));
    let app = ismartgate_exporter::http::router(context);
    let bind = config.bind_addr();
    let server = axum::Server::try_bind(&bind)
        .unwrap_or_else(|e| {
            tracing::error!(message = "error binding to address", address = %bind, error = %e);
            process::exit(1)
        })
        .serve(app.into_make_service());

    tracing::info!(message = "server started", address = %server.local_addr());
    server
        .with_graceful_shutdown(async {
            // Wait for either SIGTERM or SIGINT to shutdown
            tokio::select! {
                _ = sigterm() => {}
                _ = sigint() => {}
            }
        })
        .await?;

    polling.abort();
    tracing::info!("server shutdown");
    Ok(())
}

/// Return after the first SIGTERM signal received by this process
async fn sigterm() -> io::Result<()> {
    unix::signal(SignalKind::terminate())?.recv().await;
    Ok(())
}

/// Return after the first SIGINT signal received by this process
async fn sigint() -> io::Result<()> {
    unix::signal(SignalKind::interrupt())?.recv().await;
    Ok(())
}
