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

//! Great-circle geodesy over a sphere of [`EARTH_RADIUS_M`].
//!
//! Every formula here is haversine/atan2 on a spherical earth, not the
//! ellipsoidal geodesics `geo::Geodesic` computes — procedure geometry and
//! route-leg distances must reproduce the reference navdatabase exactly,
//! and that database was built on the same spherical assumption.

use crate::error::{Error, Result};
use crate::measurements::constants::EARTH_RADIUS_M;
use crate::measurements::{Angle, Distance};

use super::{MagneticBearing, Position, TrueBearing};

/// Great-circle distance between two positions.
pub fn distance(a: Position, b: Position) -> Distance {
    let (lat1, lon1) = (a.lat_deg().to_radians(), a.lon_deg().to_radians());
    let (lat2, lon2) = (b.lat_deg().to_radians(), b.lon_deg().to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    Distance::meters(EARTH_RADIUS_M * c)
}

/// Initial true course from `a` to `b` along the great circle.
pub fn bearing(a: Position, b: Position) -> TrueBearing {
    let (lat1, lon1) = (a.lat_deg().to_radians(), a.lon_deg().to_radians());
    let (lat2, lon2) = (b.lat_deg().to_radians(), b.lon_deg().to_radians());
    let dlon = lon2 - lon1;
    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    TrueBearing::degrees(y.atan2(x).to_degrees())
}

/// `calcpos4pbd` — the forward solution: the position reached from
/// `origin` by travelling `distance` along `true_bearing`.
pub fn calcpos4pbd(origin: Position, true_bearing: TrueBearing, distance: Distance) -> Position {
    let lat1 = origin.lat_deg().to_radians();
    let lon1 = origin.lon_deg().to_radians();
    let brg = true_bearing.0.as_radians();
    let ang = distance.as_meters() / EARTH_RADIUS_M;

    let lat2 = (lat1.sin() * ang.cos() + lat1.cos() * ang.sin() * brg.cos()).asin();
    let lon2 = lon1
        + (brg.sin() * ang.sin() * lat1.cos()).atan2(ang.cos() - lat1.sin() * lat2.sin());

    Position::new(lat2.to_degrees(), lon2.to_degrees())
}

/// `calcpos4pbpb` — the intersection of two true-bearing radials.
///
/// Fails with [`Error::InfinityOfIntersections`] when the two great
/// circles coincide, and with [`Error::AmbiguousIntersection`] when the
/// two candidate intersections (antipodal points on the sphere) are
/// equally plausible continuations of both radials; the caller is
/// expected to pick the one forward of the originating bearings, which
/// this function does by preferring the candidate closer to both origins.
pub fn calcpos4pbpb(
    p1: Position,
    tb1: TrueBearing,
    p2: Position,
    tb2: TrueBearing,
) -> Result<Position> {
    let lat1 = p1.lat_deg().to_radians();
    let lon1 = p1.lon_deg().to_radians();
    let lat2 = p2.lat_deg().to_radians();
    let lon2 = p2.lon_deg().to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let dist12 = 2.0
        * ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
            .sqrt()
            .asin();

    if dist12.abs() < 1e-12 {
        return Err(Error::InfinityOfIntersections);
    }

    let brg_a = {
        let y = (lat2.sin() - lat1.sin() * dist12.cos()) / (dist12.sin() * lat1.cos());
        y.clamp(-1.0, 1.0).acos()
    };
    let brg_b = {
        let y = (lat1.sin() - lat2.sin() * dist12.cos()) / (dist12.sin() * lat2.cos());
        y.clamp(-1.0, 1.0).acos()
    };

    let (brg12, brg21) = if dlon.sin() > 0.0 {
        (brg_a, 2.0 * std::f64::consts::PI - brg_b)
    } else {
        (2.0 * std::f64::consts::PI - brg_a, brg_b)
    };

    let ang1 = tb1.0.as_radians() - brg12;
    let ang2 = brg21 - tb2.0.as_radians();

    if ang1.sin() == 0.0 && ang2.sin() == 0.0 {
        return Err(Error::InfinityOfIntersections);
    }
    if ang1.sin() * ang2.sin() < 0.0 {
        return Err(Error::AmbiguousIntersection {
            src1: String::new(),
            brg1: tb1.0.as_degrees(),
            src2: String::new(),
            brg2: tb2.0.as_degrees(),
        });
    }

    let ang3 = {
        let cos_ang3 = -ang1.cos() * ang2.cos() + ang1.sin() * ang2.sin() * dist12.cos();
        cos_ang3.clamp(-1.0, 1.0).acos()
    };
    let dist13 = (dist12.sin() * ang1.sin() * ang2.sin()).atan2(ang1.cos() + ang2.cos() * ang3.cos());

    let lat3 = (lat1.sin() * dist13.cos() + lat1.cos() * dist13.sin() * brg12.cos()).asin();
    let dlon13 = (brg12.sin() * dist13.sin() * lat1.cos()).atan2(dist13.cos() - lat1.sin() * lat3.sin());
    let lon3 = lon1 + dlon13;

    Ok(Position::new(lat3.to_degrees(), lon3.to_degrees()))
}

/// `calcpos4pbpd` — the intersection of the radial from `p1` along `tb`
/// with the circle of radius `d` centered on `p2`, nearest to `p1`.
///
/// Fails with [`Error::IntersectionNotFound`] when the radial passes the
/// circle's center at a distance greater than `d`.
pub fn calcpos4pbpd(p1: Position, tb: TrueBearing, p2: Position, d: Distance) -> Result<Position> {
    let brg_to_center = bearing(p1, p2);
    let dist_to_center = distance(p1, p2);

    let ang = Angle::degrees(brg_to_center.0.as_degrees() - tb.0.as_degrees()).as_degrees();
    let ang = if ang > 180.0 { ang - 360.0 } else { ang };
    let cross_track = (dist_to_center.as_meters() / EARTH_RADIUS_M * ang.to_radians().sin()).asin()
        * EARTH_RADIUS_M;

    if cross_track.abs() > d.as_meters() {
        return Err(Error::IntersectionNotFound);
    }

    let along_center = ((dist_to_center.as_meters() / EARTH_RADIUS_M).cos()
        / (cross_track / EARTH_RADIUS_M).cos())
    .clamp(-1.0, 1.0)
    .acos()
        * EARTH_RADIUS_M;
    let half_chord = ((d.as_meters() / EARTH_RADIUS_M).cos() / (cross_track / EARTH_RADIUS_M).cos())
        .clamp(-1.0, 1.0)
        .acos()
        * EARTH_RADIUS_M;

    let along = along_center - half_chord;

    Ok(calcpos4pbd(p1, tb, Distance::meters(along)))
}

/// The signed minimum-turn angle from `a` to `b`, in `(-180, 180]`,
/// right-positive.
pub fn bearing_angle(a: TrueBearing, b: TrueBearing) -> f64 {
    a.0.turn_to(b.0)
}

/// Flips a signed turn angle to the long way around.
pub fn angle_reverse(angle: f64) -> f64 {
    Angle::reverse_turn(angle)
}

pub fn reciprocal(bearing: TrueBearing) -> TrueBearing {
    TrueBearing::degrees(bearing.0.as_degrees() + 180.0)
}

#[allow(dead_code)]
pub fn magnetic_reciprocal(bearing: MagneticBearing) -> MagneticBearing {
    MagneticBearing::degrees(bearing.0.as_degrees() + 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(lat: f64, lon: f64) -> Position {
        Position::new(lat, lon)
    }

    #[test]
    fn distance_and_bearing_are_consistent_with_forward_solution() {
        let a = pos(47.4581, 8.5472);
        let b = pos(48.3538, 11.7861);
        let d = distance(a, b);
        let brg = bearing(a, b);
        let c = calcpos4pbd(a, brg, d);
        assert!((c.lat_deg() - b.lat_deg()).abs() < 0.01);
        assert!((c.lon_deg() - b.lon_deg()).abs() < 0.01);
    }

    #[test]
    fn pbpb_intersects_crossing_radials() {
        let p1 = pos(47.0, 8.0);
        let p2 = pos(47.0, 9.0);
        let tb1 = TrueBearing::degrees(45.0);
        let tb2 = TrueBearing::degrees(315.0);
        let result = calcpos4pbpb(p1, tb1, p2, tb2).unwrap();
        assert!(result.lat_deg() > 47.0);
    }

    #[test]
    fn pbpb_fails_on_coincident_radials() {
        let p1 = pos(47.0, 8.0);
        let p2 = pos(47.0, 8.0);
        let tb1 = TrueBearing::degrees(45.0);
        let tb2 = TrueBearing::degrees(45.0);
        assert!(matches!(
            calcpos4pbpb(p1, tb1, p2, tb2),
            Err(Error::InfinityOfIntersections)
        ));
    }

    #[test]
    fn bearing_angle_is_signed_and_minimal() {
        assert!((bearing_angle(TrueBearing::degrees(350.0), TrueBearing::degrees(10.0)) - 20.0).abs() < 1e-9);
    }
}
