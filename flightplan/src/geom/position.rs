// SPDX-License-Identifier: Apache-2.0
// Copyright 2024, 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use geo::Point;

use crate::measurements::Altitude;

/// One third of an arc-minute, in degrees (`1/180`). Latitude and longitude
/// are stored as a signed count of these so that "is this the same
/// waypoint" is an exact integer comparison rather than a float tolerance.
const THIRD_MINUTE_DEG: f64 = 1.0 / 180.0;

/// A latitude/longitude/altitude triple.
///
/// Latitude and longitude are quantized to thirds of an arc-minute
/// (~34 meters at the equator) on construction; this is tight enough for
/// every navdatabase and procedure-record source this crate reads, and
/// loose enough that two independently-computed routes to "the same fix"
/// compare equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Position {
    lat_thirds: i32,
    lon_thirds: i32,
    altitude: Option<AltitudeThirds>,
}

/// Altitude stored in whole feet so `Position` can derive `Eq`/`Hash`.
type AltitudeThirds = i32;

impl Position {
    pub fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self {
            lat_thirds: (lat_deg / THIRD_MINUTE_DEG).round() as i32,
            lon_thirds: (lon_deg / THIRD_MINUTE_DEG).round() as i32,
            altitude: None,
        }
    }

    pub fn with_altitude(mut self, altitude: Altitude) -> Self {
        self.altitude = Some(altitude.as_feet());
        self
    }

    pub fn lat_deg(&self) -> f64 {
        self.lat_thirds as f64 * THIRD_MINUTE_DEG
    }

    pub fn lon_deg(&self) -> f64 {
        self.lon_thirds as f64 * THIRD_MINUTE_DEG
    }

    pub fn altitude(&self) -> Option<Altitude> {
        self.altitude.map(Altitude::feet)
    }

    pub fn as_point(&self) -> Point<f64> {
        Point::new(self.lon_deg(), self.lat_deg())
    }

    /// Horizontal equality, ignoring altitude: "is this the same lat/lon".
    pub fn same_horizontal(&self, other: &Position) -> bool {
        self.lat_thirds == other.lat_thirds && self.lon_thirds == other.lon_thirds
    }
}

impl From<Point<f64>> for Position {
    fn from(p: Point<f64>) -> Self {
        Self::new(p.y(), p.x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantizes_to_thirds_of_arcminute() {
        let a = Position::new(47.458333333, 8.547222222);
        let b = Position::new(47.45833, 8.54722);
        assert!(a.same_horizontal(&b));
    }

    #[test]
    fn distinguishes_genuinely_different_fixes() {
        let a = Position::new(47.0, 8.0);
        let b = Position::new(47.1, 8.0);
        assert!(!a.same_horizontal(&b));
    }
}
