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

use super::constants::{FEET_IN_METER, METERS_IN_FEET};
use super::{Measurement, UnitOfMeasure};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AltitudeUnit {
    Feet,
    Meters,
}

impl UnitOfMeasure for AltitudeUnit {
    fn symbol(&self) -> &'static str {
        match self {
            Self::Feet => "ft",
            Self::Meters => "m",
        }
    }

    fn to_si(self, value: f64) -> f64 {
        match self {
            Self::Feet => value * FEET_IN_METER,
            Self::Meters => value,
        }
    }

    fn from_si(self, value: f64) -> f64 {
        match self {
            Self::Feet => value * METERS_IN_FEET,
            Self::Meters => value,
        }
    }
}

/// A signed altitude, stored internally as whole feet (the unit every
/// restriction and writer in this crate is expressed in).
pub type Altitude = Measurement<AltitudeUnit>;

impl Altitude {
    pub fn feet(value: i32) -> Self {
        Self::from_internal(value as i64, 1, AltitudeUnit::Feet)
    }

    pub fn as_feet(&self) -> i32 {
        self.get(AltitudeUnit::Feet).round() as i32
    }

    pub fn zero() -> Self {
        Self::feet(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_feet() {
        let a = Altitude::feet(10_000);
        assert_eq!(a.as_feet(), 10_000);
    }
}
