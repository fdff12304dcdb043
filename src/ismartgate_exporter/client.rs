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

use crate::units::celsius_to_fahrenheit;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use std::error;
use std::fmt;
use std::num::ParseIntError;

#[derive(Debug)]
pub enum ClientError {
    InvalidHost(String),
    Internal(reqwest::Error),
    Login(StatusCode, Url),
    Body(reqwest::Error),
    Decode(serde_json::Error),
    Shape(usize),
    Parse(String, ParseIntError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHost(h) => write!(f, "invalid device host {}", h),
            Self::Internal(e) => write!(f, "{}", e),
            Self::Login(status, url) => write!(f, "unexpected login status {} for {}", status, url),
            Self::Body(e) => write!(f, "unable to read temperature response: {}", e),
            Self::Decode(e) => write!(f, "unable to decode temperature response: {}", e),
            Self::Shape(len) => write!(f, "expected two value array in temperature response, got {} values", len),
            Self::Parse(raw, e) => write!(f, "unable to parse integer from {:?}: {}", raw, e),
        }
    }
}

impl error::Error for ClientError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Internal(e) => Some(e),
            Self::Body(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Parse(_, e) => Some(e),
            _ => None,
        }
    }
}

/// Something that can produce the current temperature of a door, in degrees fahrenheit.
#[async_trait]
pub trait TemperatureSource: Send + Sync {
    async fn fetch(&self, door: u32) -> Result<f64, ClientError>;
}

/// Client for the web interface of an iSmartGate device.
///
/// The device has no API tokens. Each read logs in through the same form a browser
/// would use and then requests the temperature with the resulting session cookie.
/// Note that the device answers the login form with a `200` even when the credentials
/// are wrong, so bad credentials show up as a malformed temperature response rather
/// than a login error.
#[derive(Debug)]
pub struct GateClient {
    base_url: Url,
    username: String,
    password: String,
}

impl GateClient {
    const LOGIN_PATH: &'static str = "index.php";
    const LOGIN_BUTTON: &'static str = "Sign In";
    const TEMPERATURE_PATH: &'static str = "isg/temperature.php";

    /// Create a new client for the device at `host` (a hostname or IP, optionally with a port).
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(&format!("http://{}/", host)).map_err(|_| ClientError::InvalidHost(host.to_owned()))?;

        Ok(GateClient {
            base_url,
            username: username.to_owned(),
            password: password.to_owned(),
        })
    }

    /// Log in and read the temperature for `door`, converted to degrees fahrenheit.
    pub async fn temperature(&self, door: u32) -> Result<f64, ClientError> {
        // Sessions are scoped to a single read: every call starts with an empty cookie store.
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ClientError::Internal)?;

        self.login(&client).await?;
        let values = self.raw_temperature(&client, door).await?;
        let fahrenheit = parse_temperature(&values)?;

        tracing::debug!(message = "read temperature", door = door, fahrenheit = fahrenheit);
        Ok(fahrenheit)
    }

    async fn login(&self, client: &Client) -> Result<(), ClientError> {
        let url = self.login_url();
        tracing::debug!(message = "making login request", url = %url, username = %self.username);

        let res = client
            .post(url.clone())
            .form(&[
                ("send-login", Self::LOGIN_BUTTON),
                ("login", self.username.as_str()),
                ("pass", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(ClientError::Internal)?;

        let status = res.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(ClientError::Login(status, url))
        }
    }

    async fn raw_temperature(&self, client: &Client, door: u32) -> Result<Vec<String>, ClientError> {
        let url = self.temperature_url(door);
        tracing::debug!(message = "making temperature request", url = %url);

        let res = client.get(url).send().await.map_err(ClientError::Internal)?;
        let body = res.bytes().await.map_err(ClientError::Body)?;

        serde_json::from_slice::<Vec<String>>(&body).map_err(|e| {
            tracing::debug!(
                message = "unexpected temperature response",
                content = %String::from_utf8_lossy(&body),
            );
            ClientError::Decode(e)
        })
    }

    fn login_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(Self::LOGIN_PATH);
        url
    }

    fn temperature_url(&self, door: u32) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(Self::TEMPERATURE_PATH);
        url.query_pairs_mut().append_pair("door", &door.to_string());
        url
    }
}

#[async_trait]
impl TemperatureSource for GateClient {
    async fn fetch(&self, door: u32) -> Result<f64, ClientError> {
        self.temperature(door).await
    }
}

/// Convert the `["<millidegrees C>", "<unused>"]` temperature response to degrees fahrenheit.
fn parse_temperature(values: &[String]) -> Result<f64, ClientError> {
    match values {
        [raw, _] => {
            let millis = raw
                .parse::<i32>()
                .map_err(|e| ClientError::Parse(raw.clone(), e))?;
            Ok(celsius_to_fahrenheit(f64::from(millis) / 1000.0))
        }
        _ => Err(ClientError::Shape(values.len())),
    }
}
