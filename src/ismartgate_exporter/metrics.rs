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

use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::atomic::AtomicU64;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
struct DoorLabels {
    door: String,
}

/// Holder for the temperature gauge of each door.
///
/// The gauge is created and registered upon call to `TemperatureMetrics::new()`. Each door
/// is a separate series labeled `door{N}` (e.g. `{door="door1"}`) that only appears once
/// a temperature has been successfully read for it. Cloning returns a handle to the same
/// underlying series.
#[derive(Clone, Debug)]
pub struct TemperatureMetrics {
    temperature: Family<DoorLabels, Gauge<f64, AtomicU64>>,
}

impl TemperatureMetrics {
    /// Create a new `TemperatureMetrics` and register the gauge with the provided `Registry`.
    pub fn new(reg: &mut Registry) -> Self {
        let temperature = Family::<DoorLabels, Gauge<f64, AtomicU64>>::default();
        reg.register("temperature_fahrenheit", "Temperature in fahrenheit", temperature.clone());
        Self { temperature }
    }

    /// Set the most recent temperature for a door, replacing any previous value.
    pub fn temperature(&self, door: u32, fahrenheit: f64) {
        self.temperature
            .get_or_create(&DoorLabels { door: door_label(door) })
            .set(fahrenheit);
    }
}

/// Label value used for a door in metrics, e.g. `door1`.
pub fn door_label(door: u32) -> String {
    format!("door{}", door)
}
