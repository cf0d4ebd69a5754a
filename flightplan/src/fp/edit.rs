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

//! Incremental route editing (§4.E.2, §4.E.3): `insert_direct`,
//! `insert_airway`, `remove_leg`, and the airway split/consolidate pair.
//!
//! Every editor here leaves the plan by calling `route_leg_update`
//! before returning, success or failure, so a caller never observes a
//! half-edited route.

use crate::error::{Error, Result};
use crate::fp::segment::SegmentKind;
use crate::fp::{FlightPlan, Leg, RouteSegment, SegmentSlot};
use crate::nd::{Index, NavigationDatabase, Waypoint};
use crate::proc::leg::{Fix, ProcedureLeg};
use crate::proc::restriction::Restriction;

/// The enroute-arena slot a freshly inserted leg is tagged with; `rte`
/// entries have no single fixed slot number the way the departure/
/// arrival procedure segments do, so editors all share this one.
const ENROUTE_SLOT: usize = 8;

fn locate_slot(flp: &FlightPlan, leg_idx: usize) -> Option<SegmentSlot> {
    let mut slots = flp.primary_slots();
    slots.push(SegmentSlot::MissedAppr);
    slots.push(SegmentSlot::Last);
    slots.into_iter().find(|&slot| flp.segment(slot).is_some_and(|s| s.legs.contains(&leg_idx)))
}

fn locate_rte_index(flp: &FlightPlan, leg_idx: usize) -> Option<usize> {
    flp.rte.iter().position(|s| s.legs.contains(&leg_idx))
}

/// `split_airways` (§4.E.3): every enroute airway segment with more than
/// one leg becomes one single-leg airway segment per leg, in place,
/// preserving every leg's arena index so cursor positions held by a
/// caller stay valid.
pub fn split_airways(flp: &mut FlightPlan) -> Result<()> {
    let old = std::mem::take(&mut flp.rte);
    let mut rebuilt = Vec::with_capacity(old.len());
    for seg in old {
        match seg.kind {
            SegmentKind::Airway { ref airway_id, source_leg, .. } if seg.legs.len() > 1 => {
                for (offset, &leg_idx) in seg.legs.iter().enumerate() {
                    let mut single = RouteSegment::airway(airway_id.clone(), source_leg + offset, source_leg + offset);
                    single.push_leg(leg_idx);
                    rebuilt.push(single);
                }
            }
            _ => rebuilt.push(seg),
        }
    }
    flp.rte = rebuilt;
    Ok(())
}

/// `consolidate_airways` (§4.E.3's open question (a)): the inverse of
/// `split_airways`, deliberately left unimplemented. A conforming
/// implementation must tolerate runs where a leg's rolled `src` no
/// longer matches the previous leg's destination — those legs have
/// become de-facto directs since the split and must stay broken out —
/// which needs `route_leg_update`'s endpoint pass threaded through the
/// merge, not just a leg-list scan.
pub fn consolidate_airways(_flp: &mut FlightPlan) -> Result<()> {
    Err(Error::NotImplemented("consolidate_airways"))
}

/// `insert_direct(wpt, cursor_leg, insert_after)` (§4.E.2).
pub fn insert_direct(flp: &mut FlightPlan, wpt: Waypoint, cursor_leg: Option<usize>, insert_after: bool) -> Result<()> {
    split_airways(flp)?;

    let fix = Fix::new(wpt.id.clone(), wpt.position);
    flp.push_custom_waypoint(wpt);

    let Some(cursor) = cursor_leg else {
        let idx = flp.legs.len();
        flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: fix }, Restriction::none(), ENROUTE_SLOT));
        let mut seg = RouteSegment::direct();
        seg.push_leg(idx);
        flp.rte.push(seg);
        return flp.route_leg_update();
    };

    let is_terminal = flp.arrival.last.as_ref().is_some_and(|s| s.legs.first() == Some(&cursor));
    if is_terminal {
        let idx = flp.legs.len();
        flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: fix }, Restriction::none(), ENROUTE_SLOT));
        for slot in [SegmentSlot::Appr, SegmentSlot::ApprTrans, SegmentSlot::Star, SegmentSlot::StarEnroute] {
            if let Some(seg) = flp.segment_mut(slot) {
                seg.push_leg(idx);
                return flp.route_leg_update();
            }
        }
        let mut seg = RouteSegment::direct();
        seg.push_leg(idx);
        flp.rte.push(seg);
        return flp.route_leg_update();
    }

    let Some(slot) = locate_slot(flp, cursor) else {
        return Err(Error::InvalidRoute("cursor leg is not part of the plan".into()));
    };

    if flp.segment(slot).is_some_and(|s| s.kind.is_procedure()) {
        let idx = flp.legs.len();
        flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: fix }, Restriction::none(), ENROUTE_SLOT));
        let seg = flp.segment_mut(slot).expect("slot located above");
        let Some(pos) = seg.legs.iter().position(|&i| i == cursor) else {
            return Err(Error::InvalidRoute("cursor leg vanished from its segment".into()));
        };
        seg.legs.insert(if insert_after { pos + 1 } else { pos }, idx);
        return flp.route_leg_update();
    }

    if let SegmentSlot::Enroute(rte_index) = slot {
        let idx = flp.legs.len();
        flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: fix }, Restriction::none(), ENROUTE_SLOT));
        let mut seg = RouteSegment::direct();
        seg.push_leg(idx);
        flp.rte.insert(if insert_after { rte_index + 1 } else { rte_index }, seg);
        return flp.route_leg_update();
    }

    Err(Error::InvalidRoute("cursor leg cannot host a direct-to here".into()))
}

/// `insert_airway(src, dst, awy, in_leg, out_leg, cursor_leg)` (§4.E.2):
/// `in_leg`/`out_leg` are the airway's own leg indices — the
/// `AirwayMatch` range a prior `get_wpt4awy`/`get_wpt4aws` lookup
/// resolved — spliced as one new airway segment placed immediately after
/// the segment containing `cursor_leg` (or appended, with no cursor).
pub fn insert_airway(
    flp: &mut FlightPlan,
    src: &str,
    dst: &str,
    awy: &str,
    in_leg: usize,
    out_leg: usize,
    cursor_leg: Option<usize>,
) -> Result<()> {
    split_airways(flp)?;

    match build_airway_segment(flp, src, dst, awy, in_leg, out_leg) {
        Ok(seg) => {
            let insert_at = cursor_leg.and_then(|c| locate_rte_index(flp, c)).map(|i| i + 1).unwrap_or(flp.rte.len());
            flp.rte.insert(insert_at, seg);
            flp.route_leg_update()
        }
        Err(e) => {
            flp.route_leg_update()?;
            Err(e)
        }
    }
}

pub(crate) fn build_airway_segment(flp: &mut FlightPlan, src: &str, dst: &str, awy: &str, in_leg: usize, out_leg: usize) -> Result<RouteSegment> {
    let mut idx = Index::new();
    let airway = flp
        .ndb
        .get_airway(awy, &mut idx)
        .ok_or_else(|| Error::UnexpectedRouteToken(format!("unknown airway '{awy}'")))?;

    if in_leg > out_leg || out_leg >= airway.legs.len() {
        return Err(Error::InvalidRoute(format!("airway leg range {in_leg}..={out_leg} out of bounds for '{awy}'")));
    }
    if airway.legs[in_leg].in_id != src {
        return Err(Error::UnexpectedRouteToken(format!("'{awy}' does not start from '{src}' at leg {in_leg}")));
    }
    if airway.legs[out_leg].out_id != dst {
        return Err(Error::UnexpectedRouteToken(format!("'{awy}' does not reach '{dst}' at leg {out_leg}")));
    }

    let airway_legs: Vec<_> = airway.legs[in_leg..=out_leg].to_vec();
    let mut seg = RouteSegment::airway(awy.to_string(), in_leg, out_leg);
    for leg in airway_legs {
        let dst_fix = Fix::new(leg.out_id.clone(), leg.out_position);
        let src_fix = Fix::new(leg.in_id.clone(), leg.in_position);
        let mut new_leg = Leg::from_airway_leg(leg, dst_fix, ENROUTE_SLOT);
        new_leg.src = Some(src_fix);
        let idx = flp.legs.len();
        flp.legs.push(new_leg);
        seg.push_leg(idx);
    }
    Ok(seg)
}

/// `remove_leg(leg)` (§4.E.2).
pub fn remove_leg(flp: &mut FlightPlan, leg_idx: usize) -> Result<()> {
    split_airways(flp)?;

    let mut slots = flp.primary_slots();
    slots.push(SegmentSlot::MissedAppr);
    slots.push(SegmentSlot::Last);
    for slot in slots {
        if let Some(seg) = flp.segment_mut(slot) {
            if seg.legs.contains(&leg_idx) {
                seg.remove_leg(leg_idx);
                break;
            }
        }
    }
    flp.drop_empty_segments();
    flp.route_leg_update()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Position;
    use crate::measurements::{Altitude, Distance};
    use crate::nd::airport::RawRunway;
    use crate::nd::wmm::test_double::FixedDeclination;
    use crate::nd::{Airway, AirwayLeg, Database, Waypoint, WaypointKind};
    use std::rc::Rc;

    fn test_ndb() -> Database {
        let mut db = Database::new("2601");
        let apt = crate::nd::Airport::new(
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
        db.add_airway(Airway::new(
            "N871",
            vec![AirwayLeg {
                in_id: "SOSAL".into(),
                in_position: Position::new(46.0, 6.0),
                out_id: "TELNO".into(),
                out_position: Position::new(46.5, 6.5),
                inbound_course: crate::geom::TrueBearing::degrees(45.0),
                outbound_course: crate::geom::TrueBearing::degrees(45.0),
                length: Distance::nautical_miles(30.0),
            }],
        ));
        db
    }

    fn plan() -> FlightPlan {
        let ndb: Rc<dyn NavigationDatabase> = Rc::new(test_ndb());
        let wmm: Rc<dyn crate::nd::wmm::Wmm> = Rc::new(FixedDeclination(2.0));
        FlightPlan::new(ndb, wmm)
    }

    #[test]
    fn insert_direct_with_no_cursor_appends_to_enroute() {
        let mut flp = plan();
        flp.set_departure("LSZH", Some("16")).unwrap();
        insert_direct(&mut flp, Waypoint::new("KLO", "LS", Position::new(47.48, 8.44), WaypointKind::Vor), None, true).unwrap();
        assert_eq!(flp.rte.len(), 1);
        assert_eq!(flp.legs[flp.rte[0].legs[0]].dst().unwrap().id, "KLO");
    }

    #[test]
    fn split_airways_breaks_a_multi_leg_segment_into_singles() {
        let mut flp = plan();
        let mut seg = RouteSegment::airway("N871", 0, 1);
        let i0 = flp.legs.len();
        flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: Fix::new("A", Position::new(0.0, 0.0)) }, Restriction::none(), ENROUTE_SLOT));
        seg.push_leg(i0);
        let i1 = flp.legs.len();
        flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: Fix::new("B", Position::new(0.0, 0.0)) }, Restriction::none(), ENROUTE_SLOT));
        seg.push_leg(i1);
        flp.rte.push(seg);

        split_airways(&mut flp).unwrap();
        assert_eq!(flp.rte.len(), 2);
        assert!(flp.rte.iter().all(|s| s.legs.len() == 1));
    }

    #[test]
    fn insert_airway_rejects_a_source_that_does_not_start_the_airway() {
        let mut flp = plan();
        let err = insert_airway(&mut flp, "NOPE", "TELNO", "N871", 0, 0, None);
        assert!(err.is_err());
    }

    #[test]
    fn remove_leg_drops_an_empty_enroute_segment() {
        let mut flp = plan();
        let mut seg = RouteSegment::direct();
        let idx = flp.legs.len();
        flp.legs.push(Leg::new(ProcedureLeg::Tf { dst: Fix::new("A", Position::new(0.0, 0.0)) }, Restriction::none(), ENROUTE_SLOT));
        seg.push_leg(idx);
        flp.rte.push(seg);

        remove_leg(&mut flp, idx).unwrap();
        assert!(flp.rte.is_empty());
    }

    #[test]
    fn consolidate_airways_is_not_implemented() {
        let mut flp = plan();
        assert!(matches!(consolidate_airways(&mut flp), Err(Error::NotImplemented("consolidate_airways"))));
    }
}
