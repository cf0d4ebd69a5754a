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

use super::constants::METERS_IN_NAUTICAL_MILE;
use super::{Measurement, UnitOfMeasure};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SpeedUnit {
    Knots,
}

impl UnitOfMeasure for SpeedUnit {
    fn symbol(&self) -> &'static str {
        "kt"
    }

    fn to_si(self, value: f64) -> f64 {
        value * METERS_IN_NAUTICAL_MILE / 3600.0
    }

    fn from_si(self, value: f64) -> f64 {
        value * 3600.0 / METERS_IN_NAUTICAL_MILE
    }
}

/// An airspeed, stored internally as whole knots.
pub type Airspeed = Measurement<SpeedUnit>;

impl Airspeed {
    pub fn knots(value: i32) -> Self {
        Self::from_internal(value as i64, 1, SpeedUnit::Knots)
    }

    pub fn as_knots(&self) -> i32 {
        self.get(SpeedUnit::Knots).round() as i32
    }
}
