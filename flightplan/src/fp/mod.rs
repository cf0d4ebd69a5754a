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

//! The flight-plan assembler (§4.E): the [`FlightPlan`] aggregate, its
//! setters, incremental editors, and the `route_leg_update` fixed point.

pub mod edit;
pub mod leg;
pub mod segment;
pub mod update;

pub use leg::Leg;
pub use segment::{RouteSegment, SegmentKind};

use std::rc::Rc;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::measurements::Altitude;
use crate::nd::wmm::Wmm;
use crate::nd::{Airport, NavigationDatabase, Runway, Waypoint, WaypointKind};
use crate::proc::leg::Fix;
use crate::proc::procedure::Procedure;
use crate::proc::restriction::Restriction;

/// The departure side of a [`FlightPlan`] (§4.E.1, §3).
#[derive(Default)]
pub struct DepartureState {
    pub airport: Option<Rc<Airport>>,
    pub runway: Option<Rc<Runway>>,
    pub sid: Option<RouteSegment>,
    pub sid_enroute: Option<RouteSegment>,
}

impl DepartureState {
    /// Clears every SID-derived segment, leaving the airport/runway.
    fn clear_sid(&mut self) {
        self.sid = None;
        self.sid_enroute = None;
    }
}

/// The arrival side of a [`FlightPlan`] (§4.E.1, §3).
#[derive(Default)]
pub struct ArrivalState {
    pub airport: Option<Rc<Airport>>,
    pub runway: Option<Rc<Runway>>,
    pub star_enroute: Option<RouteSegment>,
    pub star: Option<RouteSegment>,
    pub approach_transition: Option<RouteSegment>,
    pub approach: Option<RouteSegment>,
    /// The approach's `MAPP`-delimited missed-approach legs, kept as a
    /// segment of their own so they stay out of `route_leg_update`'s
    /// primary leg concatenation (§4.E.4 never lists missed-approach
    /// legs among the segments it rebuilds `flp.legs` from).
    pub missed_approach: Option<RouteSegment>,
    pub last: Option<RouteSegment>,
}

impl ArrivalState {
    /// Clears STAR and approach state, leaving the airport/runway and
    /// `last` terminal segment (`route_leg_update` rebuilds `last`).
    fn clear_star_and_approach(&mut self) {
        self.star_enroute = None;
        self.star = None;
        self.approach_transition = None;
        self.approach = None;
        self.missed_approach = None;
    }
}

/// The aggregate flight plan (§3, §4.E): the departure and arrival
/// procedure stacks, the enroute segment list, the leg arena every
/// segment indexes into, and the owned custom waypoints synthesized
/// along the way.
pub struct FlightPlan {
    ndb: Rc<dyn NavigationDatabase>,
    wmm: Rc<dyn Wmm>,
    pub departure: DepartureState,
    pub arrival: ArrivalState,
    /// Enroute route segments, in traversal order.
    pub rte: Vec<RouteSegment>,
    /// The plan's leg arena; every `RouteSegment.legs` entry is an index
    /// into this vector.
    pub legs: Vec<Leg>,
    /// Custom waypoints synthesized by xpfms dummies or the route parser
    /// (PBD/PBX/INT/LLC fixes), owned here so they outlive any single
    /// leg that references one.
    pub cws: Vec<Waypoint>,
    pub cruise_altitude: Altitude,
    pub tra_altitude: Option<Altitude>,
    pub trl_altitude: Option<Altitude>,
}

impl FlightPlan {
    pub fn new(ndb: Rc<dyn NavigationDatabase>, wmm: Rc<dyn Wmm>) -> Self {
        Self {
            ndb,
            wmm,
            departure: DepartureState::default(),
            arrival: ArrivalState::default(),
            rte: Vec::new(),
            legs: Vec::new(),
            cws: Vec::new(),
            cruise_altitude: Altitude::feet(33_000),
            tra_altitude: None,
            trl_altitude: None,
        }
    }

    pub fn ndb(&self) -> &dyn NavigationDatabase {
        self.ndb.as_ref()
    }

    pub fn wmm(&self) -> &dyn Wmm {
        self.wmm.as_ref()
    }

    fn resolve_airport(&self, icao: &str) -> Result<Rc<Airport>> {
        let apt = self.ndb.get_airport(icao).ok_or_else(|| Error::UnknownAirport(icao.to_string()))?;
        self.ndb.init_airport(&apt, self.wmm.as_ref())?;
        Ok(apt)
    }

    fn resolve_runway(apt: &Airport, rwy: &str) -> Result<Rc<Runway>> {
        apt.runway(rwy).ok_or_else(|| Error::UnknownRunway { apt: apt.id.clone(), rwy: rwy.to_string() })
    }

    /// The waypoint a segment should source from when a runway is on
    /// file: its threshold, tagged `RW<id>`; falls back to the airport's
    /// own position when no runway is set (§4.E.1, §4.E.4).
    fn runway_or_airport_fix(apt: &Airport, rwy: Option<&Runway>) -> Fix {
        match rwy {
            Some(rwy) => Fix::new(rwy.waypoint_id(), rwy.threshold),
            None => Fix::new(apt.id.clone(), apt.position),
        }
    }

    fn departure_fix(&self) -> Option<Fix> {
        let apt = self.departure.airport.as_ref()?;
        Some(Self::runway_or_airport_fix(apt, self.departure.runway.as_deref()))
    }

    /// `set_departure(icao, rwy)` (§4.E.1).
    pub fn set_departure(&mut self, icao: &str, rwy: Option<&str>) -> Result<()> {
        let apt = self.resolve_airport(icao)?;
        let runway = rwy.map(|r| Self::resolve_runway(&apt, r)).transpose()?;

        let changed = self.departure.airport.as_ref().map(|a| a.id != apt.id).unwrap_or(true)
            || self.departure.runway.as_deref().map(|r| Some(r.id.as_str())) != Some(rwy);
        if changed {
            self.departure.clear_sid();
        }

        self.tra_altitude = Some(apt.departure_transition_altitude());
        debug!("departure set to {icao} rwy {rwy:?}, tra={:?}", self.tra_altitude);
        self.departure.airport = Some(apt);
        self.departure.runway = runway;
        self.route_leg_update()
    }

    /// `set_arrival(icao, rwy)` (§4.E.1).
    pub fn set_arrival(&mut self, icao: &str, rwy: Option<&str>) -> Result<()> {
        let apt = self.resolve_airport(icao)?;
        let runway = rwy.map(|r| Self::resolve_runway(&apt, r)).transpose()?;

        let changed = self.arrival.airport.as_ref().map(|a| a.id != apt.id).unwrap_or(true)
            || self.arrival.runway.as_deref().map(|r| Some(r.id.as_str())) != Some(rwy);
        if changed {
            self.arrival.clear_star_and_approach();
        }

        self.trl_altitude = Some(apt.arrival_transition_level());
        debug!("arrival set to {icao} rwy {rwy:?}, trl={:?}", self.trl_altitude);
        self.arrival.airport = Some(apt);
        self.arrival.runway = runway;
        self.route_leg_update()
    }

    /// Merges a skipped entry-leg's restriction into the prior leg,
    /// matching §4.E.1's "skipped-constraints channel" through
    /// `leg_restrict`: the last leg of `segment`, if any.
    fn leg_restrict(&mut self, segment: Option<&RouteSegment>, restriction: Restriction) {
        let last = segment.and_then(|s| s.legs.last().copied());
        self.leg_restrict_idx(last, restriction);
    }

    /// Same as [`Self::leg_restrict`], but takes the already-extracted last
    /// leg index so callers can borrow a segment stored on `self` before
    /// taking the mutable borrow needed to update the leg.
    fn leg_restrict_idx(&mut self, last: Option<usize>, restriction: Restriction) {
        if let Some(last) = last {
            if let Some(leg) = self.legs.get_mut(last) {
                leg.restriction = restriction;
            }
        }
    }

    /// Appends a freshly-stitched segment's legs to the arena, fixing up
    /// each leg's `segment` back-pointer, and returns the populated
    /// [`RouteSegment`] shell.
    fn splice(&mut self, result: crate::proc::interpret::SegmentResult, slot: usize) -> RouteSegment {
        let mut segment = result.segment;
        for mut leg in result.legs {
            leg.segment = slot;
            segment.push_leg(self.legs.len());
            self.legs.push(leg);
        }
        segment
    }

    /// `set_departsid(name, trans)` (§4.E.1).
    pub fn set_departsid(&mut self, name: &str, trans: Option<&str>) -> Result<()> {
        let apt = self.departure.airport.clone().ok_or_else(|| Error::UnknownAirport(String::new()))?;
        let proc = apt.find_sid(name).ok_or_else(|| Error::UnknownProcedure { apt: apt.id.clone(), name: name.to_string() })?;
        if proc.proc_type.requires_runway() && self.departure.runway.is_none() {
            return Err(Error::SidRequiresRunway { apt: apt.id.clone(), name: name.to_string(), rwy: String::new() });
        }

        let src = if self.departure.runway.is_some() { Some(Self::runway_or_airport_fix(&apt, self.departure.runway.as_deref())) } else { None };
        let result = crate::proc::interpret::segment_proced(src, &proc)?;
        let sid_segment = self.splice(result, 0);
        self.departure.sid = Some(sid_segment);

        if let Some(trans_name) = trans {
            let trans_proc = apt.find_any(trans_name).ok_or_else(|| Error::UnknownProcedure { apt: apt.id.clone(), name: trans_name.to_string() })?;
            let trans_src = self.departure.sid.as_ref().and_then(|s| s.legs.last()).and_then(|&i| self.legs.get(i)).and_then(|l| l.dst().cloned());
            let trans_result = crate::proc::interpret::segment_proced(trans_src, &trans_proc)?;
            let restriction = trans_result.carried_restriction;
            let segment = self.splice(trans_result, 1);
            if let Some(r) = restriction {
                let last = self.departure.sid.as_ref().and_then(|s| s.legs.last().copied());
                self.leg_restrict_idx(last, r);
            }
            self.departure.sid_enroute = Some(segment);
        }

        debug!("departure SID set to {name} (transition {trans:?})");
        self.route_leg_update()
    }

    /// The last populated upstream leg's destination, per §4.E.1's
    /// "deepest currently-populated upstream segment" rule: SID-enroute,
    /// then enroute, then SID, then the departure runway/airport.
    fn deepest_departure_side_fix(&self) -> Option<Fix> {
        let from_segment = |seg: &Option<RouteSegment>| {
            seg.as_ref().and_then(|s| s.legs.last()).and_then(|&i| self.legs.get(i)).and_then(|l| l.dst().cloned())
        };
        from_segment(&self.departure.sid_enroute)
            .or_else(|| self.rte.last().and_then(|s| s.legs.last()).and_then(|&i| self.legs.get(i)).and_then(|l| l.dst().cloned()))
            .or_else(|| from_segment(&self.departure.sid))
            .or_else(|| self.departure_fix())
    }

    /// `set_arrivstar(name, trans)` (§4.E.1).
    pub fn set_arrivstar(&mut self, name: &str, trans: Option<&str>) -> Result<()> {
        let apt = self.arrival.airport.clone().ok_or_else(|| Error::UnknownAirport(String::new()))?;
        let proc = apt.find_star(name).ok_or_else(|| Error::UnknownProcedure { apt: apt.id.clone(), name: name.to_string() })?;

        if proc.proc_type.requires_runway() && self.arrival.runway.is_none() && proc.star_prefix.borrow().is_none() {
            return Err(Error::StarRequiresRunway { apt: apt.id.clone(), name: name.to_string() });
        }

        if let Some(trans_name) = trans {
            let trans_proc =
                apt.find_any(trans_name).ok_or_else(|| Error::UnknownProcedure { apt: apt.id.clone(), name: trans_name.to_string() })?;
            let src = self.deepest_departure_side_fix();
            let trans_result = crate::proc::interpret::segment_proced(src, &trans_proc)?;
            let trans_carried = trans_result.carried_restriction;
            let trans_segment = self.splice(trans_result, 2);
            self.arrival.star_enroute = Some(trans_segment);

            let star_src = self.arrival.star_enroute.as_ref().and_then(|s| s.legs.last()).and_then(|&i| self.legs.get(i)).and_then(|l| l.dst().cloned());
            let star_result = crate::proc::interpret::segment_proced(star_src, &proc)?;
            let star_restriction = star_result.carried_restriction;
            let star_segment = self.splice(star_result, 3);
            if let Some(r) = trans_carried {
                let last = self.arrival.star_enroute.as_ref().and_then(|s| s.legs.last().copied());
                self.leg_restrict_idx(last, r);
            }
            if let Some(r) = star_restriction {
                self.leg_restrict(Some(&star_segment), r);
            }
            self.arrival.star = Some(star_segment);
        } else {
            let src = self.deepest_departure_side_fix();
            let result = crate::proc::interpret::segment_proced(src, &proc)?;
            let restriction = result.carried_restriction;
            let segment = self.splice(result, 3);
            self.arrival.star = Some(segment.clone());
            if let Some(r) = restriction {
                self.leg_restrict(Some(&segment), r);
            }
        }

        debug!("arrival STAR set to {name} (transition {trans:?})");
        self.route_leg_update()
    }

    /// The last leg currently populated on the arrival side, searched
    /// deepest-first (approach-transition, STAR, STAR-enroute, then the
    /// departure side) per §4.E.1's chaining rule for approaches.
    fn deepest_arrival_side_fix(&self) -> Option<Fix> {
        let from_segment = |seg: &Option<RouteSegment>| {
            seg.as_ref().and_then(|s| s.legs.last()).and_then(|&i| self.legs.get(i)).and_then(|l| l.dst().cloned())
        };
        from_segment(&self.arrival.star)
            .or_else(|| from_segment(&self.arrival.star_enroute))
            .or_else(|| self.deepest_departure_side_fix())
    }

    /// `set_arrivapch(name, trans)` (§4.E.1).
    pub fn set_arrivapch(&mut self, name: &str, trans: Option<&str>) -> Result<()> {
        let apt = self.arrival.airport.clone().ok_or_else(|| Error::UnknownAirport(String::new()))?;
        if self.arrival.runway.is_none() {
            return Err(Error::ApproachRequiresRunway { apt: apt.id.clone() });
        }
        let proc = apt.find_any(name).ok_or_else(|| Error::UnknownProcedure { apt: apt.id.clone(), name: name.to_string() })?;

        let mut src = self.deepest_arrival_side_fix();
        if let Some(trans_name) = trans {
            let trans_proc =
                apt.find_any(trans_name).ok_or_else(|| Error::UnknownProcedure { apt: apt.id.clone(), name: trans_name.to_string() })?;
            let trans_result = crate::proc::interpret::segment_proced(src, &trans_proc)?;
            let trans_carried = trans_result.carried_restriction;
            let trans_segment = self.splice(trans_result, 4);
            src = trans_segment.legs.last().and_then(|&i| self.legs.get(i)).and_then(|l| l.dst().cloned());
            if let Some(r) = trans_carried {
                self.leg_restrict(Some(&trans_segment), r);
            }
            self.arrival.approach_transition = Some(trans_segment);
        }

        let result = crate::proc::interpret::segment_proced(src, &proc)?;
        let restriction = result.carried_restriction;
        let segment = self.splice(result, 5);
        if let Some(r) = restriction {
            let last = self.arrival.approach_transition.as_ref().and_then(|s| s.legs.last().copied());
            self.leg_restrict_idx(last, r);
        }
        self.arrival.approach = Some(segment);

        let missed_legs = proc.missed_approach_legs();
        if !missed_legs.is_empty() {
            let mut segment = RouteSegment::missed_approach(proc.clone());
            let approach_dst = self.arrival.approach.as_ref().and_then(|s| s.legs.last()).and_then(|&i| self.legs.get(i)).and_then(|l| l.dst().cloned());
            for pl in missed_legs.iter() {
                let mut leg = Leg::new(pl.leg.clone(), pl.restriction, 6);
                if leg.src.is_none() {
                    leg.src = approach_dst.clone();
                }
                segment.push_leg(self.legs.len());
                self.legs.push(leg);
            }
            debug!("missed approach for {name} has {} legs", segment.legs.len());
            self.arrival.missed_approach = Some(segment);
        }

        debug!("arrival approach set to {name} (transition {trans:?})");
        self.route_leg_update()
    }

    /// `route_leg_update` (§4.E.4): rebuild `legs`/segment membership is
    /// delegated to [`update::route_leg_update`], which has access to
    /// `self` as `&mut FlightPlan`.
    pub fn route_leg_update(&mut self) -> Result<()> {
        update::route_leg_update(self)
    }

    fn arrival_fix(&self) -> Option<Fix> {
        let apt = self.arrival.airport.as_ref()?;
        Some(Self::runway_or_airport_fix(apt, self.arrival.runway.as_deref()))
    }

    /// A placeholder waypoint kind for a synthesized custom waypoint not
    /// otherwise classified (route parser PBD/LLC fixes land here before
    /// a more specific kind is known).
    pub fn push_custom_waypoint(&mut self, wp: Waypoint) -> Waypoint {
        self.cws.push(wp.clone());
        wp
    }

    pub(crate) fn default_waypoint_kind() -> WaypointKind {
        WaypointKind::Fix
    }
}

/// Every segment slot a [`FlightPlan`] can hold a [`RouteSegment`] in,
/// used by `update` and `edit` to address one without matching on
/// `DepartureState`/`ArrivalState` fields by hand.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum SegmentSlot {
    Sid,
    SidEnroute,
    Enroute(usize),
    StarEnroute,
    Star,
    ApprTrans,
    Appr,
    MissedAppr,
    Last,
}

impl FlightPlan {
    pub(crate) fn segment(&self, slot: SegmentSlot) -> Option<&RouteSegment> {
        match slot {
            SegmentSlot::Sid => self.departure.sid.as_ref(),
            SegmentSlot::SidEnroute => self.departure.sid_enroute.as_ref(),
            SegmentSlot::Enroute(i) => self.rte.get(i),
            SegmentSlot::StarEnroute => self.arrival.star_enroute.as_ref(),
            SegmentSlot::Star => self.arrival.star.as_ref(),
            SegmentSlot::ApprTrans => self.arrival.approach_transition.as_ref(),
            SegmentSlot::Appr => self.arrival.approach.as_ref(),
            SegmentSlot::MissedAppr => self.arrival.missed_approach.as_ref(),
            SegmentSlot::Last => self.arrival.last.as_ref(),
        }
    }

    pub(crate) fn segment_mut(&mut self, slot: SegmentSlot) -> Option<&mut RouteSegment> {
        match slot {
            SegmentSlot::Sid => self.departure.sid.as_mut(),
            SegmentSlot::SidEnroute => self.departure.sid_enroute.as_mut(),
            SegmentSlot::Enroute(i) => self.rte.get_mut(i),
            SegmentSlot::StarEnroute => self.arrival.star_enroute.as_mut(),
            SegmentSlot::Star => self.arrival.star.as_mut(),
            SegmentSlot::ApprTrans => self.arrival.approach_transition.as_mut(),
            SegmentSlot::Appr => self.arrival.approach.as_mut(),
            SegmentSlot::MissedAppr => self.arrival.missed_approach.as_mut(),
            SegmentSlot::Last => self.arrival.last.as_mut(),
        }
    }

    /// Every leg-bearing slot in `route_leg_update`'s concatenation order
    /// (§4.E.4): SID, SID-enroute, the enroute segments, STAR-enroute,
    /// STAR, approach-transition, approach. `Last` is reconciled
    /// separately once the rolling source past `Appr` is known, and
    /// `MissedAppr` is never part of the primary leg list.
    pub(crate) fn primary_slots(&self) -> Vec<SegmentSlot> {
        let mut slots = vec![SegmentSlot::Sid, SegmentSlot::SidEnroute];
        slots.extend((0..self.rte.len()).map(SegmentSlot::Enroute));
        slots.extend([SegmentSlot::StarEnroute, SegmentSlot::Star, SegmentSlot::ApprTrans, SegmentSlot::Appr]);
        slots
    }

    /// `true` for every slot whose legs belong to the arrival side, for
    /// `route_leg_update`'s altitude profile (§4.D.3 runs descent rates
    /// on these, climb rates on everything else).
    pub(crate) fn is_arrival_slot(slot: SegmentSlot) -> bool {
        matches!(slot, SegmentSlot::StarEnroute | SegmentSlot::Star | SegmentSlot::ApprTrans | SegmentSlot::Appr | SegmentSlot::Last)
    }

    /// Removes every empty segment left behind by an editor or by
    /// `route_leg_update`'s overlap-resolution pass (§4.E.2, §4.E.4):
    /// airway/direct/discontinuity segments are dropped outright from
    /// `rte`; procedure-backed slots are cleared to `None`.
    pub(crate) fn drop_empty_segments(&mut self) {
        self.rte.retain(|seg| !seg.is_empty());
        if self.departure.sid.as_ref().is_some_and(RouteSegment::is_empty) {
            self.departure.sid = None;
        }
        if self.departure.sid_enroute.as_ref().is_some_and(RouteSegment::is_empty) {
            self.departure.sid_enroute = None;
        }
        if self.arrival.star_enroute.as_ref().is_some_and(RouteSegment::is_empty) {
            self.arrival.star_enroute = None;
        }
        if self.arrival.star.as_ref().is_some_and(RouteSegment::is_empty) {
            self.arrival.star = None;
        }
        if self.arrival.approach_transition.as_ref().is_some_and(RouteSegment::is_empty) {
            self.arrival.approach_transition = None;
        }
        if self.arrival.approach.as_ref().is_some_and(RouteSegment::is_empty) {
            self.arrival.approach = None;
        }
        if self.arrival.missed_approach.as_ref().is_some_and(RouteSegment::is_empty) {
            self.arrival.missed_approach = None;
        }
        if self.arrival.last.as_ref().is_some_and(RouteSegment::is_empty) {
            self.arrival.last = None;
        }
    }

    /// The leg-arena indices of every slot in `primary_slots()` order,
    /// each tagged with the slot it came from. `include_last` appends
    /// `arr.last`'s single leg, when present, after `Appr`.
    pub(crate) fn ordered_legs(&self, include_last: bool) -> Vec<(SegmentSlot, usize)> {
        let mut out = Vec::new();
        for slot in self.primary_slots() {
            if let Some(seg) = self.segment(slot) {
                out.extend(seg.legs.iter().map(|&i| (slot, i)));
            }
        }
        if include_last {
            if let Some(seg) = self.segment(SegmentSlot::Last) {
                out.extend(seg.legs.iter().map(|&i| (SegmentSlot::Last, i)));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Position;
    use crate::measurements::{Altitude, Distance};
    use crate::nd::airport::RawRunway;
    use crate::nd::wmm::test_double::FixedDeclination;
    use crate::nd::Database;

    fn test_ndb() -> Database {
        let mut db = Database::new("2601");
        let apt = Airport::new(
            "LSZH",
            "ZURICH",
            Position::new(47.4581, 8.5472),
            Some(Altitude::feet(10_000)),
            None,
            Distance::feet(12800.0),
            vec![RawRunway {
                id: "16".to_string(),
                database_heading: crate::geom::MagneticBearing::degrees(160.0),
                length: Distance::feet(8000.0),
                width: Distance::feet(150.0),
                threshold: Position::new(47.45, 8.54),
                threshold_elevation: Altitude::feet(1400),
                ils: None,
                surface: "ASPH".to_string(),
                usage: crate::nd::airport::RunwayUsage::Both,
            }],
            Some(String::new()),
        );
        db.add_airport(Rc::new(apt));
        db
    }

    #[test]
    fn set_departure_computes_transition_altitude() {
        let ndb: Rc<dyn NavigationDatabase> = Rc::new(test_ndb());
        let wmm: Rc<dyn Wmm> = Rc::new(FixedDeclination(2.0));
        let mut flp = FlightPlan::new(ndb, wmm);
        flp.set_departure("LSZH", Some("16")).unwrap();
        assert_eq!(flp.tra_altitude, Some(Altitude::feet(10_000)));
        assert!(flp.departure.runway.is_some());
    }

    #[test]
    fn set_departure_unknown_airport_errors() {
        let ndb: Rc<dyn NavigationDatabase> = Rc::new(test_ndb());
        let wmm: Rc<dyn Wmm> = Rc::new(FixedDeclination(0.0));
        let mut flp = FlightPlan::new(ndb, wmm);
        assert!(flp.set_departure("ZZZZ", None).is_err());
    }

    #[test]
    fn changing_departure_runway_clears_sid() {
        let ndb: Rc<dyn NavigationDatabase> = Rc::new(test_ndb());
        let wmm: Rc<dyn Wmm> = Rc::new(FixedDeclination(2.0));
        let mut flp = FlightPlan::new(ndb, wmm);
        flp.set_departure("LSZH", Some("16")).unwrap();
        flp.departure.sid = Some(RouteSegment::direct());
        flp.set_departure("LSZH", None).unwrap();
        assert!(flp.departure.sid.is_none());
    }

    #[test]
    fn set_arrivapch_requires_runway() {
        let ndb: Rc<dyn NavigationDatabase> = Rc::new(test_ndb());
        let wmm: Rc<dyn Wmm> = Rc::new(FixedDeclination(2.0));
        let mut flp = FlightPlan::new(ndb, wmm);
        flp.set_arrival("LSZH", None).unwrap();
        assert!(flp.set_arrivapch("ILS16", None).is_err());
    }
}
