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

//! Fixed-point scalar quantities with a unit tag.
//!
//! Every measurement is stored as an `i64` in a fixed *internal* unit so
//! that comparisons and arithmetic never drift through repeated
//! conversions; only display and interop convert to floating degrees,
//! feet or knots.

mod altitude;
mod angle;
pub mod constants;
mod distance;
mod frequency;
mod speed;

pub use altitude::{Altitude, AltitudeUnit};
pub use angle::Angle;
pub use distance::{Distance, DistanceUnit};
pub use frequency::{Frequency, FrequencyUnit};
pub use speed::{Airspeed, SpeedUnit};

/// A unit of measure convertible to and from its quantity's SI base unit.
///
/// Mirrors the conversion contract used throughout the measurement types:
/// `to_si`/`from_si` round-trip through the quantity's SI unit so that two
/// measurements in different units can be compared or added.
pub trait UnitOfMeasure: Copy + Eq {
    fn symbol(&self) -> &'static str;
    fn to_si(self, value: f64) -> f64;
    fn from_si(self, value: f64) -> f64;
}

/// A scalar quantity stored internally as a fixed-point integer in
/// `internal_unit`, exposed to callers as a float in any [`UnitOfMeasure`].
#[derive(Copy, Clone, Debug)]
pub struct Measurement<U> {
    internal: i64,
    scale: i64,
    unit: U,
}

impl<U: UnitOfMeasure> Measurement<U> {
    pub fn new(value: f64, unit: U, scale: i64) -> Self {
        Self {
            internal: (unit.to_si(value) * scale as f64).round() as i64,
            scale,
            unit,
        }
    }

    pub fn from_internal(internal: i64, scale: i64, unit: U) -> Self {
        Self { internal, scale, unit }
    }

    pub fn internal(&self) -> i64 {
        self.internal
    }

    pub fn get(&self, unit: U) -> f64 {
        unit.from_si(self.internal as f64 / self.scale as f64)
    }

    pub fn unit(&self) -> U {
        self.unit
    }
}

impl<U: UnitOfMeasure> PartialEq for Measurement<U> {
    fn eq(&self, other: &Self) -> bool {
        self.internal == other.internal
    }
}

impl<U: UnitOfMeasure> Eq for Measurement<U> {}

impl<U: UnitOfMeasure> PartialOrd for Measurement<U> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.internal.cmp(&other.internal))
    }
}

impl<U: UnitOfMeasure> Ord for Measurement<U> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.internal.cmp(&other.internal)
    }
}
