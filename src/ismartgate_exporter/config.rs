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

use std::error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    MissingPassword,
    InvalidInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPassword => write!(f, "a password for the device must be supplied"),
            Self::InvalidInterval => write!(f, "polling interval must be at least one second"),
        }
    }
}

impl error::Error for ConfigError {}

/// Everything needed to poll a device and export its temperature. Fixed at startup.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub interval: Duration,
    pub listen_port: u16,
    pub door: u32,
}

impl DeviceConfig {
    pub fn new(
        host: &str,
        username: &str,
        password: &str,
        interval_secs: u64,
        listen_port: u16,
        door: u32,
    ) -> Result<Self, ConfigError> {
        if password.is_empty() {
            return Err(ConfigError::MissingPassword);
        }

        if interval_secs == 0 {
            return Err(ConfigError::InvalidInterval);
        }

        Ok(DeviceConfig {
            host: host.to_owned(),
            username: username.to_owned(),
            password: password.to_owned(),
            interval: Duration::from_secs(interval_secs),
            listen_port,
            door,
        })
    }

    /// Address for the metrics server: all interfaces, since the point is to be scraped remotely.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.listen_port))
    }
}
