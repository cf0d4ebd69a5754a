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

use super::constants::{FEET_IN_METER, METERS_IN_FEET, METERS_IN_NAUTICAL_MILE, NAUTICAL_MILES_IN_METER};
use super::{Measurement, UnitOfMeasure};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum DistanceUnit {
    Meters,
    Feet,
    NauticalMiles,
}

impl UnitOfMeasure for DistanceUnit {
    fn symbol(&self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Feet => "ft",
            Self::NauticalMiles => "nm",
        }
    }

    fn to_si(self, value: f64) -> f64 {
        match self {
            Self::Meters => value,
            Self::Feet => value * FEET_IN_METER,
            Self::NauticalMiles => value * METERS_IN_NAUTICAL_MILE,
        }
    }

    fn from_si(self, value: f64) -> f64 {
        match self {
            Self::Meters => value,
            Self::Feet => value * METERS_IN_FEET,
            Self::NauticalMiles => value * NAUTICAL_MILES_IN_METER,
        }
    }
}

/// A distance, stored internally as whole millimeters.
pub type Distance = Measurement<DistanceUnit>;

const MM_PER_METER: i64 = 1000;

impl Distance {
    pub fn meters(value: f64) -> Self {
        Self::new(value, DistanceUnit::Meters, MM_PER_METER)
    }

    pub fn feet(value: f64) -> Self {
        Self::new(value, DistanceUnit::Feet, MM_PER_METER)
    }

    pub fn nautical_miles(value: f64) -> Self {
        Self::new(value, DistanceUnit::NauticalMiles, MM_PER_METER)
    }

    pub fn as_meters(&self) -> f64 {
        self.get(DistanceUnit::Meters)
    }

    pub fn as_feet(&self) -> f64 {
        self.get(DistanceUnit::Feet)
    }

    pub fn as_nautical_miles(&self) -> f64 {
        self.get(DistanceUnit::NauticalMiles)
    }

    pub fn zero() -> Self {
        Distance::from_internal(0, MM_PER_METER, DistanceUnit::Meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_units() {
        let d = Distance::nautical_miles(1.0);
        assert!((d.as_meters() - 1852.0).abs() < 1e-6);
        assert!((d.as_feet() - 6076.115).abs() < 1e-2);
    }
}
