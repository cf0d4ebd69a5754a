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

//! Restriction datatype and validation (§4.C).

use crate::error::{Error, Result};
use crate::measurements::Altitude;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AltitudeKind {
    No,
    At,
    Above,
    Below,
    Between,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AirspeedKind {
    No,
    At,
    Above,
    Below,
    Between,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AircraftClass {
    All,
    Jet,
    Tbp,
    Oth,
    Non,
}

/// A waypoint-role constraint: initial approach fix, final approach fix,
/// fly-over, or missed-approach point.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum WaypointConstraint {
    No,
    Faf,
    FlyOver,
    Iaf,
    Map,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Turn {
    Left,
    Right,
    Shortest,
}

#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Restriction {
    pub altitude_kind: Option<AltitudeKindValue>,
    pub airspeed_kind: Option<AirspeedKindValue>,
    pub waypoint: Option<WaypointConstraint>,
    pub turn: Option<Turn>,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AltitudeKindValue {
    pub kind: AltitudeKind,
    pub min: Option<Altitude>,
    pub max: Option<Altitude>,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct AirspeedKindValue {
    pub kind: AirspeedKind,
    pub class: AircraftClass,
    pub min: Option<i32>,
    pub max: Option<i32>,
}

impl Restriction {
    pub fn none() -> Self {
        Self::default()
    }

    /// Validates and applies an altitude constraint, per §4.C: `AT`
    /// requires `min == max > 0`; `AB`/`BT` require `min > 0`; `BL`/`BT`
    /// require `max > 0`.
    pub fn with_altitude(mut self, kind: AltitudeKind, min: Option<Altitude>, max: Option<Altitude>) -> Result<Self> {
        match kind {
            AltitudeKind::No => {}
            AltitudeKind::At => match (min, max) {
                (Some(a), Some(b)) if a == b && a.as_feet() > 0 => {}
                _ => return Err(Error::InvalidRestriction("AT altitude requires min == max > 0".into())),
            },
            AltitudeKind::Above => {
                if !matches!(min, Some(a) if a.as_feet() > 0) {
                    return Err(Error::InvalidRestriction("AB altitude requires min > 0".into()));
                }
            }
            AltitudeKind::Below => {
                if !matches!(max, Some(a) if a.as_feet() > 0) {
                    return Err(Error::InvalidRestriction("BL altitude requires max > 0".into()));
                }
            }
            AltitudeKind::Between => {
                if !matches!(min, Some(a) if a.as_feet() > 0) || !matches!(max, Some(a) if a.as_feet() > 0) {
                    return Err(Error::InvalidRestriction("BT altitude requires min > 0 and max > 0".into()));
                }
            }
        }
        self.altitude_kind = Some(AltitudeKindValue { kind, min, max });
        Ok(self)
    }

    /// Validates and applies an airspeed constraint; `NON` forces the
    /// kind to `NO` regardless of what was requested.
    pub fn with_airspeed(
        mut self,
        kind: AirspeedKind,
        class: AircraftClass,
        min: Option<i32>,
        max: Option<i32>,
    ) -> Result<Self> {
        let kind = if matches!(class, AircraftClass::Non) { AirspeedKind::No } else { kind };
        self.airspeed_kind = Some(AirspeedKindValue { kind, class, min, max });
        Ok(self)
    }

    pub fn with_waypoint(mut self, constraint: WaypointConstraint) -> Self {
        self.waypoint = Some(constraint);
        self
    }

    /// Validates and applies a turn constraint. Holds (`HF`/`HA`/`HM`)
    /// accept `LEFT` or `RIGHT` only — `SHORT` is a degenerate hold and
    /// must be rejected, per Design Note (c).
    pub fn with_turn(mut self, turn: Turn, is_hold: bool) -> Result<Self> {
        if is_hold && matches!(turn, Turn::Shortest) {
            return Err(Error::InvalidRestriction("holds require an explicit LEFT or RIGHT turn".into()));
        }
        self.turn = Some(turn);
        Ok(self)
    }

    pub fn altitude_at(&self) -> Option<Altitude> {
        match self.altitude_kind {
            Some(AltitudeKindValue { kind: AltitudeKind::At, min: Some(v), .. }) => Some(v),
            _ => None,
        }
    }

    pub fn is_faf(&self) -> bool {
        matches!(self.waypoint, Some(WaypointConstraint::Faf))
    }

    pub fn is_iaf(&self) -> bool {
        matches!(self.waypoint, Some(WaypointConstraint::Iaf))
    }

    pub fn is_fly_over(&self) -> bool {
        matches!(self.waypoint, Some(WaypointConstraint::FlyOver))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_altitude_requires_equal_bounds() {
        let ok = Restriction::none().with_altitude(AltitudeKind::At, Some(Altitude::feet(5000)), Some(Altitude::feet(5000)));
        assert!(ok.is_ok());

        let bad = Restriction::none().with_altitude(AltitudeKind::At, Some(Altitude::feet(5000)), Some(Altitude::feet(6000)));
        assert!(bad.is_err());
    }

    #[test]
    fn holds_reject_shortest_turn() {
        let bad = Restriction::none().with_turn(Turn::Shortest, true);
        assert!(bad.is_err());
        let ok = Restriction::none().with_turn(Turn::Left, true);
        assert!(ok.is_ok());
    }

    #[test]
    fn non_aircraft_class_forces_no_airspeed_kind() {
        let r = Restriction::none()
            .with_airspeed(AirspeedKind::At, AircraftClass::Non, Some(250), None)
            .unwrap();
        assert_eq!(r.airspeed_kind.unwrap().kind, AirspeedKind::No);
    }
}
