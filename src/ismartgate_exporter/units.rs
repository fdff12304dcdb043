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

/// Convert a temperature in degrees celsius to degrees fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    (celsius * 9.0 / 5.0) + 32.0
}

#[cfg(test)]
mod tests {
    use super::celsius_to_fahrenheit;

    #[test]
    fn test_celsius_to_fahrenheit_reference_points() {
        assert_eq!(32.0, celsius_to_fahrenheit(0.0));
        assert_eq!(212.0, celsius_to_fahrenheit(100.0));
        assert_eq!(68.0, celsius_to_fahrenheit(20.0));
        assert_eq!(-40.0, celsius_to_fahrenheit(-40.0));
    }

    #[test]
    fn test_celsius_to_fahrenheit_negative() {
        assert_eq!(14.0, celsius_to_fahrenheit(-10.0));
        assert_eq!(0.5, celsius_to_fahrenheit(-17.5));
    }

    #[test]
    fn test_celsius_to_fahrenheit_matches_formula() {
        for c in [-55.5, -12.25, 0.001, 21.5, 37.0, 1000.0] {
            assert_eq!(c * 9.0 / 5.0 + 32.0, celsius_to_fahrenheit(c));
        }
    }
}
