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

//! The compiled, plan-resident [`Leg`] (§3's "Procedure leg" entry,
//! §4.E.4): a [`ProcedureLeg`] primitive wrapped with everything that
//! only exists once the leg is sitting inside a [`crate::fp::FlightPlan`]
//! — its rolling source, synthesized dummies, restriction, predicted
//! altitude, and a non-owning back-pointer to its segment.
//!
//! Legs never own their segment and segments never own a `Leg` directly
//! (both live in the plan's parallel arenas, linked by index) so that a
//! leg can be relocated between segments — by `split_airways`, or by
//! `insert_direct` splicing inside a procedure's leg list — without a
//! borrow-checker fight over who holds the authoritative copy.

use crate::geom::{MagneticBearing, TrueBearing};
use crate::measurements::{Altitude, Distance};
use crate::nd::{AirwayLeg, Waypoint};
use crate::proc::{Fix, ProcedureLeg, Restriction};

/// A [`ProcedureLeg`] as it exists inside a flight plan, after §4.D's
/// xpfms synthesis and §4.E.4's endpoint-consistency pass have run at
/// least once.
#[derive(Clone, PartialEq, Debug)]
pub struct Leg {
    pub leg: ProcedureLeg,
    /// The rolling source fix, overwritten on every `route_leg_update`
    /// pass (§4.E.4) except across a discontinuity.
    pub src: Option<Fix>,
    pub restriction: Restriction,
    /// Synthesized waypoints not present in the navdatabase — intercept
    /// points, DF turn helpers, course/heading dummies (§4.D.3). Owned
    /// here and, weakly, by `flp.cws`.
    pub xpfms: Vec<Waypoint>,
    pub predicted_altitude: Option<Altitude>,
    /// Index into the owning `RouteSegment`'s plan-level arena.
    pub segment: usize,
    /// The database airway leg this leg was resolved from, for airway
    /// legs only.
    pub source_airway_leg: Option<AirwayLeg>,
    pub distance: Option<Distance>,
    pub true_bearing: Option<TrueBearing>,
    pub inbound_bearing: Option<MagneticBearing>,
    pub outbound_bearing: Option<MagneticBearing>,
}

impl Leg {
    pub fn new(leg: ProcedureLeg, restriction: Restriction, segment: usize) -> Self {
        Self {
            leg,
            src: None,
            restriction,
            xpfms: Vec::new(),
            predicted_altitude: None,
            segment,
            source_airway_leg: None,
            distance: None,
            true_bearing: None,
            inbound_bearing: None,
            outbound_bearing: None,
        }
    }

    pub fn discontinuity(segment: usize) -> Self {
        Self::new(ProcedureLeg::Zz, Restriction::none(), segment)
    }

    pub fn from_airway_leg(source: AirwayLeg, dst: Fix, segment: usize) -> Self {
        let mut leg = Self::new(ProcedureLeg::Tf { dst }, Restriction::none(), segment);
        leg.source_airway_leg = Some(source);
        leg
    }

    pub fn is_discontinuity(&self) -> bool {
        self.leg.is_discontinuity()
    }

    /// The fixed endpoint this leg carries from its own record, when it
    /// has one (course/heading-terminated legs have none until a dummy
    /// is synthesized — see `dst_or_dummy`).
    pub fn dst(&self) -> Option<&Fix> {
        self.leg.dst()
    }

    /// `dst()`, falling back to the last synthesized xpfms dummy for
    /// legs with no fixed endpoint of their own (§4.D's dummy rules
    /// exist precisely so every leg has *some* notion of "where it
    /// ends" once opened).
    pub fn dst_or_dummy(&self) -> Option<&Waypoint> {
        if let Some(fix) = self.dst() {
            return self.xpfms.iter().find(|w| w.id == fix.id);
        }
        self.xpfms.last()
    }

    pub fn clear_geodesy(&mut self) {
        self.distance = None;
        self.true_bearing = None;
        self.inbound_bearing = None;
        self.outbound_bearing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Position;

    #[test]
    fn discontinuity_leg_has_no_endpoint() {
        let leg = Leg::discontinuity(0);
        assert!(leg.is_discontinuity());
        assert!(leg.dst().is_none());
    }

    #[test]
    fn airway_leg_carries_its_database_source() {
        let src = AirwayLeg {
            in_id: "SOSAL".into(),
            in_position: Position::new(46.0, 6.0),
            out_id: "TELNO".into(),
            out_position: Position::new(46.5, 6.5),
            inbound_course: TrueBearing::degrees(45.0),
            outbound_course: TrueBearing::degrees(45.0),
            length: Distance::nautical_miles(30.0),
        };
        let dst = Fix::new("TELNO", Position::new(46.5, 6.5));
        let leg = Leg::from_airway_leg(src.clone(), dst.clone(), 2);
        assert_eq!(leg.source_airway_leg, Some(src));
        assert_eq!(leg.dst(), Some(&dst));
        assert_eq!(leg.segment, 2);
    }

    #[test]
    fn dst_or_dummy_falls_back_to_last_synthesized_waypoint() {
        use crate::nd::WaypointKind;

        let mut leg = Leg::new(
            ProcedureLeg::Ci { course: MagneticBearing::degrees(90.0) },
            Restriction::none(),
            0,
        );
        assert!(leg.dst_or_dummy().is_none());
        leg.xpfms.push(Waypoint::new("CI01", "LS", Position::new(47.0, 8.0), WaypointKind::Int));
        assert_eq!(leg.dst_or_dummy().unwrap().id, "CI01");
    }
}
