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

//! A bare angle in degrees, normalized to `[0, 360)`.
//!
//! Unlike [`super::Distance`] and friends, an angle is not a linear
//! quantity — two angles don't simply add the way two lengths do when you
//! care about bearings — so it is not expressed as a [`super::Measurement`].
//! [`crate::geom::TrueBearing`] and [`crate::geom::MagneticBearing`] wrap
//! this type to keep the two reference frames from being mixed up by
//! accident.

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Angle(f64);

impl Angle {
    pub fn degrees(value: f64) -> Self {
        Self(value.rem_euclid(360.0))
    }

    pub fn as_degrees(&self) -> f64 {
        self.0
    }

    pub fn as_radians(&self) -> f64 {
        self.0.to_radians()
    }

    pub fn from_radians(value: f64) -> Self {
        Self::degrees(value.to_degrees())
    }

    /// The signed minimum-turn angle from `self` to `other`, in
    /// `(-180, 180]`, right-positive.
    pub fn turn_to(&self, other: Angle) -> f64 {
        let mut diff = (other.0 - self.0) % 360.0;
        if diff <= -180.0 {
            diff += 360.0;
        } else if diff > 180.0 {
            diff -= 360.0;
        }
        diff
    }

    /// Flips a signed turn angle to the long way around: `+θ → θ-360`,
    /// `-θ → θ+360`.
    pub fn reverse_turn(angle: f64) -> f64 {
        if angle > 0.0 {
            angle - 360.0
        } else {
            angle + 360.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_to_picks_shortest_signed_direction() {
        let a = Angle::degrees(350.0);
        let b = Angle::degrees(10.0);
        assert!((a.turn_to(b) - 20.0).abs() < 1e-9);

        let a = Angle::degrees(10.0);
        let b = Angle::degrees(350.0);
        assert!((a.turn_to(b) + 20.0).abs() < 1e-9);
    }

    #[test]
    fn reverse_turn_flips_to_long_way() {
        assert!((Angle::reverse_turn(30.0) - (-330.0)).abs() < 1e-9);
        assert!((Angle::reverse_turn(-30.0) - 330.0).abs() < 1e-9);
    }
}
