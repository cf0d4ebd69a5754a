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

//! `route_leg_update` (§4.E.4): the assembler's fixed point.
//!
//! Every setter and editor ends by calling this; it is the only place
//! that touches leg-to-leg geometry, so a plan is only ever internally
//! consistent between calls, never during one. Four passes, each over
//! the plan's current leg concatenation (SID, SID-enroute, the enroute
//! segments, STAR-enroute, STAR, approach-transition, approach):
//!
//! 1. overlap resolution — collapse a duplicated entry fix and whatever
//!    it re-enters on top of;
//! 2. endpoint consistency — roll a `src` fix forward through the whole
//!    plan, downgrading airway segments the roll invalidates and
//!    recomputing distance/bearing for every fix-terminated leg;
//! 3. reconcile the terminal `arr.last` direct into the arrival
//!    runway/airport;
//! 4. replay xpfms synthesis (§4.D.3) over the final leg order, seeding
//!    top-of-descent at the first arrival-side leg.
//!
//! A failure during synthesis is reported as-is; passes 1–3 only ever
//! remove or rewrite legs already in the plan, so there is nothing to
//! roll back — the plan is always a valid (if stale) route even if step
//! 4 errors out partway through.

use std::rc::Rc;

use crate::error::Result;
use crate::fp::{FlightPlan, Leg, SegmentSlot};
use crate::geom::{geodesy, Position};
use crate::proc::leg::ProcedureLeg;
use crate::proc::restriction::Restriction;
use crate::proc::xpfms;

/// §4.E.4's overlap pass: for every leg `i`, scan forward for a later
/// entry leg `j` (an `IF`, or one tagged IAF) ending at the same fix as
/// `i`, aborting the scan at a discontinuity. When found, legs `[i, j)`
/// are redundant — the plan re-enters the same fix it was already at —
/// and are dropped, with the scan resuming from `j`.
fn resolve_overlaps(flp: &mut FlightPlan) {
    let order = flp.ordered_legs(false);
    let mut keep = Vec::with_capacity(order.len());
    let mut i = 0;
    while i < order.len() {
        let (_, idx_i) = order[i];
        let mut matched = None;
        let mut j = i + 1;
        while j < order.len() {
            let (_, idx_j) = order[j];
            let leg_j = &flp.legs[idx_j];
            if leg_j.is_discontinuity() {
                break;
            }
            let is_entry = matches!(leg_j.leg, ProcedureLeg::If { .. }) || leg_j.restriction.is_iaf();
            let dst_i = flp.legs[idx_i].dst();
            if is_entry && dst_i.is_some() && dst_i == leg_j.dst() {
                matched = Some(j);
                break;
            }
            j += 1;
        }
        match matched {
            Some(j) => i = j,
            None => {
                keep.push(order[i]);
                i += 1;
            }
        }
    }

    if keep.len() == order.len() {
        return;
    }
    let keep_idx: std::collections::HashSet<usize> = keep.iter().map(|&(_, i)| i).collect();
    for slot in flp.primary_slots() {
        if let Some(seg) = flp.segment_mut(slot) {
            seg.legs.retain(|i| keep_idx.contains(i));
        }
    }
    flp.drop_empty_segments();
}

/// A dangling `IF` left immediately after a `CI`/`PI`/`VI` intercept: the
/// entry fix it names was already reached by the intercept that precedes
/// it, so it is dropped rather than treated as a second entry.
fn remove_dangling_entry_after_intercept(flp: &mut FlightPlan) {
    let order = flp.ordered_legs(false);
    let mut remove = std::collections::HashSet::new();
    for pair in order.windows(2) {
        let (_, prev_idx) = pair[0];
        let (_, cur_idx) = pair[1];
        let prev_is_intercept =
            matches!(flp.legs[prev_idx].leg, ProcedureLeg::Ci { .. } | ProcedureLeg::Pi { .. } | ProcedureLeg::Vi { .. });
        let cur_is_entry = matches!(flp.legs[cur_idx].leg, ProcedureLeg::If { .. });
        if prev_is_intercept && cur_is_entry {
            remove.insert(cur_idx);
        }
    }
    if remove.is_empty() {
        return;
    }
    for slot in flp.primary_slots() {
        if let Some(seg) = flp.segment_mut(slot) {
            seg.legs.retain(|i| !remove.contains(i));
        }
    }
    flp.drop_empty_segments();
}

/// §4.E.4's endpoint-consistency pass: roll a `src` fix forward from the
/// departure runway/airport through every non-discontinuity leg,
/// downgrading a single-leg airway segment the roll has invalidated,
/// overwriting `leg.src`, and recomputing distance/bearing for legs with
/// a fixed destination of their own (course-terminated legs get theirs
/// from xpfms synthesis, below).
fn endpoint_consistency(flp: &mut FlightPlan) {
    remove_dangling_entry_after_intercept(flp);

    let order = flp.ordered_legs(false);
    let wmm = Rc::clone(&flp.wmm);
    let mut rolling_src = flp.departure_fix();

    for &(slot, idx) in &order {
        if flp.legs[idx].is_discontinuity() {
            continue;
        }

        let single_leg_airway = flp.segment(slot).is_some_and(|s| s.kind.is_airway() && s.legs.len() == 1);
        if single_leg_airway && flp.legs[idx].src != rolling_src {
            if let Some(seg) = flp.segment_mut(slot) {
                seg.downgrade_to_direct();
            }
        }

        flp.legs[idx].src = rolling_src.clone();

        if let (Some(dst), Some(src)) = (flp.legs[idx].dst().cloned(), rolling_src.clone()) {
            let true_bearing = geodesy::bearing(src.position, dst.position);
            let leg = &mut flp.legs[idx];
            leg.distance = Some(geodesy::distance(src.position, dst.position));
            leg.true_bearing = Some(true_bearing);
            leg.inbound_bearing = Some(wmm.true_to_magnetic(true_bearing, dst.position));
            leg.outbound_bearing = Some(wmm.true_to_magnetic(true_bearing, src.position));
        }

        rolling_src = flp.legs[idx].dst().cloned().or(rolling_src);
    }
}

/// §4.E.4's terminal reconciliation: `arr.last` is always exactly one
/// direct leg from wherever the rolling source ended up to the arrival
/// runway/airport, or absent entirely when the plan already ends there.
fn reconcile_last_leg(flp: &mut FlightPlan) {
    let Some(arrival_fix) = flp.arrival_fix() else {
        flp.arrival.last = None;
        return;
    };

    let order = flp.ordered_legs(false);
    let rolling_src = order
        .iter()
        .rev()
        .find_map(|&(_, idx)| (!flp.legs[idx].is_discontinuity()).then(|| flp.legs[idx].dst().cloned()).flatten())
        .or_else(|| flp.departure_fix());

    let Some(src) = rolling_src else {
        flp.arrival.last = None;
        return;
    };
    if src.id == arrival_fix.id && src.position.same_horizontal(&arrival_fix.position) {
        flp.arrival.last = None;
        return;
    }

    // Reuse the existing terminal leg's arena slot when there is one, so a
    // repeat call rewrites it in place instead of growing the arena.
    let idx = match flp.arrival.last.as_ref().and_then(|s| s.legs.first().copied()) {
        Some(existing) => existing,
        None => {
            let idx = flp.legs.len();
            flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: arrival_fix.clone() }, Restriction::none(), 7));
            let mut segment = crate::fp::RouteSegment::direct();
            segment.push_leg(idx);
            flp.arrival.last = Some(segment);
            idx
        }
    };

    let wmm = Rc::clone(&flp.wmm);
    let true_bearing = geodesy::bearing(src.position, arrival_fix.position);
    let leg = &mut flp.legs[idx];
    leg.leg = ProcedureLeg::Tf { dst: arrival_fix.clone() };
    leg.src = Some(src.clone());
    leg.distance = Some(geodesy::distance(src.position, arrival_fix.position));
    leg.true_bearing = Some(true_bearing);
    leg.inbound_bearing = Some(wmm.true_to_magnetic(true_bearing, arrival_fix.position));
    leg.outbound_bearing = Some(wmm.true_to_magnetic(true_bearing, src.position));
}

/// §4.D.3's replay: runs [`xpfms::synthesize`] over the plan's final leg
/// order, threading `predicted_altitude` through from the departure
/// runway/airport elevation, seeding top-of-descent (reset to cruise) at
/// the first arrival-side leg.
fn synthesize_profile(flp: &mut FlightPlan) -> Result<()> {
    let order = flp.ordered_legs(true);
    let wmm = Rc::clone(&flp.wmm);
    let cruise = flp.cruise_altitude;
    let mut predicted_altitude =
        flp.departure.airport.as_ref().and_then(|a| a.position.altitude()).unwrap_or(crate::measurements::Altitude::zero());
    let mut descending = false;

    for i in 0..order.len() {
        let (slot, idx) = order[i];
        if flp.legs[idx].is_discontinuity() {
            flp.legs[idx].xpfms.clear();
            flp.legs[idx].predicted_altitude = None;
            continue;
        }

        let is_arrival_leg = FlightPlan::is_arrival_slot(slot);
        if is_arrival_leg && !descending {
            predicted_altitude = cruise;
            descending = true;
        }

        let src_pos = flp.legs[idx]
            .src
            .as_ref()
            .map(|f| f.position)
            .or_else(|| flp.legs[idx].dst().map(|f| f.position))
            .unwrap_or(Position::new(0.0, 0.0));
        let next = order.get(i + 1).map(|&(_, j)| flp.legs[j].clone());

        let leg = &mut flp.legs[idx];
        predicted_altitude = xpfms::synthesize(leg, src_pos, next.as_ref(), predicted_altitude, cruise, is_arrival_leg, wmm.as_ref())?;
        leg.predicted_altitude = Some(predicted_altitude);
    }
    Ok(())
}

/// `route_leg_update(flp)` (§4.E.4).
pub fn route_leg_update(flp: &mut FlightPlan) -> Result<()> {
    resolve_overlaps(flp);
    endpoint_consistency(flp);
    reconcile_last_leg(flp);
    synthesize_profile(flp)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fp::RouteSegment;
    use crate::geom::Position;
    use crate::measurements::{Altitude, Distance};
    use crate::nd::airport::RawRunway;
    use crate::nd::wmm::test_double::FixedDeclination;
    use crate::nd::{Airport, Database, NavigationDatabase, Waypoint, WaypointKind};
    use crate::proc::leg::Fix as ProcFix;

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
        db.add_waypoint(Waypoint::new("KLO", "LS", Position::new(47.48, 8.44), WaypointKind::Vor));
        db
    }

    fn plan() -> FlightPlan {
        let ndb: Rc<dyn NavigationDatabase> = Rc::new(test_ndb());
        let wmm: Rc<dyn crate::nd::wmm::Wmm> = Rc::new(FixedDeclination(2.0));
        FlightPlan::new(ndb, wmm)
    }

    #[test]
    fn empty_plan_updates_without_error() {
        let mut flp = plan();
        flp.set_departure("LSZH", Some("16")).unwrap();
        assert!(flp.legs.is_empty());
    }

    #[test]
    fn terminal_direct_reaches_the_arrival_fix() {
        let mut flp = plan();
        flp.set_arrival("LSZH", Some("16")).unwrap();
        flp.rte.push(RouteSegment::direct());
        let idx = flp.legs.len();
        flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: ProcFix::new("KLO", Position::new(47.48, 8.44)) }, Restriction::none(), 8));
        flp.rte.last_mut().unwrap().push_leg(idx);
        flp.route_leg_update().unwrap();

        let last = flp.arrival.last.as_ref().expect("terminal direct expected");
        let leg = &flp.legs[last.legs[0]];
        assert_eq!(leg.dst().unwrap().id, "RW16");
    }

    #[test]
    fn update_is_idempotent_once_converged() {
        let mut flp = plan();
        flp.set_arrival("LSZH", Some("16")).unwrap();
        flp.rte.push(RouteSegment::direct());
        let idx = flp.legs.len();
        flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: ProcFix::new("KLO", Position::new(47.48, 8.44)) }, Restriction::none(), 8));
        flp.rte.last_mut().unwrap().push_leg(idx);
        flp.route_leg_update().unwrap();
        let before = flp.legs.clone();
        flp.route_leg_update().unwrap();
        assert_eq!(flp.legs, before);
    }
}
