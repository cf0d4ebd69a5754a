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

//! Magnetic/true bearing conversion via the World Magnetic Model.
//!
//! The model itself is an external collaborator (out of scope per the
//! purpose statement); this module exposes only the seam the rest of the
//! crate calls through, so a test double can stand in for it.

use world_magnetic_model::GeomagneticField;
use world_magnetic_model::time::Date;
use world_magnetic_model::uom::si::angle::degree;
use world_magnetic_model::uom::si::f32::{Angle, Length};
use world_magnetic_model::uom::si::length::meter;

use crate::geom::{MagneticBearing, Position, TrueBearing};

/// Converts between true and magnetic bearings at a given position and
/// epoch.
pub trait Wmm {
    fn declination_deg(&self, position: Position) -> f64;

    fn true_to_magnetic(&self, true_bearing: TrueBearing, position: Position) -> MagneticBearing {
        true_bearing.to_magnetic(self.declination_deg(position))
    }

    fn magnetic_to_true(&self, magnetic_bearing: MagneticBearing, position: Position) -> TrueBearing {
        magnetic_bearing.to_true(self.declination_deg(position))
    }
}

/// The production [`Wmm`], backed by `world_magnetic_model`'s current
/// coefficient set evaluated at a fixed epoch (the model is revised every
/// five years; a navdatabase's own AIRAC cycle determines which epoch is
/// appropriate, but this crate is not responsible for selecting it).
pub struct WorldMagneticModel {
    date: Date,
}

impl WorldMagneticModel {
    pub fn new(date: Date) -> Self {
        Self { date }
    }
}

impl Wmm for WorldMagneticModel {
    fn declination_deg(&self, position: Position) -> f64 {
        let height_m =
            (position.altitude().map(|a| a.as_feet()).unwrap_or(0) as f32 * 0.3048).max(0.0);
        let field = GeomagneticField::new(
            Length::new::<meter>(height_m),
            Angle::new::<degree>(position.lat_deg() as f32),
            Angle::new::<degree>(position.lon_deg() as f32),
            self.date,
        )
        .expect("position within WMM's valid latitude/longitude/altitude range");
        field.declination().get::<degree>() as f64
    }
}

#[cfg(test)]
pub mod test_double {
    use super::*;

    /// A fixed-declination stand-in for tests that don't want to pull in
    /// real WMM coefficients.
    pub struct FixedDeclination(pub f64);

    impl Wmm for FixedDeclination {
        fn declination_deg(&self, _position: Position) -> f64 {
            self.0
        }
    }
}
