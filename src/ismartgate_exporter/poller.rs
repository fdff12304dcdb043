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

use crate::client::{ClientError, TemperatureSource};
use crate::metrics::{door_label, TemperatureMetrics};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{Instrument, Level};

/// Periodically read the temperature of a single door and publish it to `TemperatureMetrics`.
///
/// Reads never overlap: a single worker performs a read, then waits for the next tick. If a
/// read takes longer than the interval, missed ticks are skipped rather than queued. A failed
/// read leaves the previously published temperature in place.
pub struct TemperaturePoller<S> {
    source: S,
    metrics: TemperatureMetrics,
    door: u32,
    interval: Duration,
}

impl<S> TemperaturePoller<S>
where
    S: TemperatureSource + 'static,
{
    /// Create a new poller for `door`.
    ///
    /// # Panics
    ///
    /// If `interval` is zero, `start()` will panic.
    pub fn new(source: S, metrics: TemperatureMetrics, door: u32, interval: Duration) -> Self {
        TemperaturePoller {
            source,
            metrics,
            door,
            interval,
        }
    }

    /// Read the temperature once and, if successful, publish it.
    pub async fn update(&self) -> Result<f64, ClientError> {
        let label = door_label(self.door);
        tracing::info!(message = "requesting temperature update", door = %label);

        let res = self
            .source
            .fetch(self.door)
            .instrument(tracing::span!(Level::DEBUG, "isg_temperature"))
            .await;

        match &res {
            Ok(fahrenheit) => {
                self.metrics.temperature(self.door, *fahrenheit);
                tracing::info!(message = "read temperature", door = %label, fahrenheit = *fahrenheit);
            }
            Err(e) => {
                tracing::error!(message = "failed temperature update", door = %label, error = %e);
            }
        }

        res
    }

    /// Read the temperature once, then spawn a task that reads it again every interval.
    ///
    /// The first timed read happens one full interval after this method returns. The
    /// spawned task runs until it is aborted via the returned handle.
    pub async fn start(self) -> JoinHandle<()> {
        let _ = self.update().await;
        tokio::spawn(async move { self.run().await })
    }

    async fn run(&self) {
        let mut interval = time::interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tracing::info!(
            message = "temperature polling started",
            door = %door_label(self.door),
            interval_secs = self.interval.as_secs(),
        );

        loop {
            let _ = interval.tick().await;
            let _ = self.update().await;
        }
    }
}
