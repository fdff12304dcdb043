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

//! Prometheus metrics exporter for iSmartGate temperature sensors
//!
//! ## Features
//!
//! `ismartgate_exporter` periodically logs in to the web interface of an [iSmartGate] garage or
//! gate controller, reads the temperature reported by the wireless sensor attached to a door, and
//! emits it as a Prometheus metric. A single door is read per process.
//!
//! * `temperature_fahrenheit{door=$DOOR}` - Temperature, in degrees fahrenheit. `$DOOR` is the
//!   door number prefixed with `door`, e.g. `door1`.
//!
//! The metric only appears after the first successful read. If a later read fails, the last
//! successful value continues to be exported.
//!
//! [iSmartGate]: https://ismartgate.com/
//!
//! ## Build
//!
//! `ismartgate_exporter` is a Rust program and must be built from source using a
//! [Rust toolchain](https://rustup.rs/).
//!
//! ```text
//! cargo build --release
//! ```
//!
//! ## Usage
//!
//! The password of the device's web interface is required. Everything else has a default.
//!
//! ```text
//! ./ismartgate_exporter --hostname 192.168.1.242 --username admin --password 'hunter2' --door 1
//! ```
//!
//! * `--hostname` - Address of the device, default `192.168.1.242`.
//! * `--username` - Web interface user, default `admin`.
//! * `--password` - Web interface password, required.
//! * `--interval` - Seconds between reads, default `60`.
//! * `--listenPort` - Port for the metrics server, default `9805`.
//! * `--door` - Door to read the temperature of, default `1`.
//! * `--log-level` - Logging verbosity, default `info`.
//!
//! ### Prometheus
//!
//! Prometheus metrics are exposed on port `9805` at `/metrics`. Add the host running
//! `ismartgate_exporter` as a target under the Prometheus `scrape_configs` section.
//!
//! ```yaml
//! scrape_configs:
//! - job_name: ismartgate_exporter
//!   static_configs:
//!   - targets: ['example:9805']
//! ```
//!

pub mod client;
pub mod config;
pub mod http;
pub mod metrics;
pub mod poller;
pub mod units;
