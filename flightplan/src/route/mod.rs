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

//! ICAO route string parsing (§4.F).
//!
//! `parse_route` walks a whitespace-separated route string left to
//! right, resolving one token at a time against a rolling "current
//! position" and an at-most-one pending airway, and pushes the same
//! kind of direct/airway [`RouteSegment`]s a caller would otherwise
//! build through `insert_direct`/`insert_airway`. It does not call
//! those editors directly — there is nothing to insert relative to,
//! since the plan starts empty — but it ends with `route_leg_update`
//! exactly as they do.

mod llc;

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::fp::{edit, FlightPlan, RouteSegment, SegmentKind};
use crate::nd::airport::{Airport, Runway};
use crate::nd::{Index, NavigationDatabase, Waypoint, WaypointKind};
use crate::proc::leg::{Fix, ProcedureLeg};
use crate::proc::restriction::Restriction;

const ENROUTE_SLOT: usize = 8;

fn endpoint_fix(apt: &Airport, rwy: Option<&Runway>) -> Fix {
    match rwy {
        Some(r) => Fix::new(r.waypoint_id(), r.threshold),
        None => Fix::new(apt.id.clone(), apt.position),
    }
}

fn is_nat_track(token: &str) -> bool {
    token.len() == 4 && token.starts_with("NAT") && token.chars().next_back().is_some_and(|c| c.is_ascii_alphabetic())
}

/// `parse_route(route)` (§4.F): parses an ICAO route string into the
/// plan's departure, enroute, and arrival state.
pub fn parse_route(flp: &mut FlightPlan, route: &str) -> Result<()> {
    let tokens: Vec<String> = route.split_whitespace().map(|t| t.to_ascii_uppercase()).collect();

    let mut rolling: Option<Fix> = None;
    let mut pending_airway: Option<String> = None;
    let mut first_airport: Option<(String, Option<String>)> = None;
    let mut last_airport: Option<(String, Option<String>)> = None;

    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].clone();

        if token == "SID" || token == "STAR" || token == "DCT" {
            i += 1;
            continue;
        }
        if is_nat_track(&token) {
            i += 1;
            continue;
        }

        let (prefix, suffix) = match token.split_once('/') {
            Some((p, s)) => (p.to_string(), Some(s.to_string())),
            None => (token.clone(), None),
        };

        if let Some(apt) = flp.ndb().get_airport(&prefix) {
            flp.ndb().init_airport(&apt, flp.wmm())?;
            let rwy = suffix.as_deref().and_then(|r| apt.runway(r));
            let fix = endpoint_fix(&apt, rwy.as_deref());
            let rwy_id = rwy.map(|r| r.id.clone());
            first_airport.get_or_insert_with(|| (apt.id.clone(), rwy_id.clone()));
            last_airport = Some((apt.id.clone(), rwy_id));
            push_direct(flp, rolling.as_ref(), &fix);
            rolling = Some(fix);
            i += 1;
            continue;
        }

        if let Some((fix, consumed)) = try_pbd(flp, &tokens, i, &prefix, &suffix, rolling.as_ref())? {
            push_direct(flp, rolling.as_ref(), &fix);
            rolling = Some(fix);
            i += consumed;
            continue;
        }

        let mut scan = Index::new();
        if flp.ndb().get_airway(&prefix, &mut scan).is_some() {
            if let Some(already) = &pending_airway {
                return Err(Error::UnexpectedRouteToken(format!("two consecutive airways: {already} then {prefix}")));
            }
            pending_airway = Some(prefix);
            i += 1;
            continue;
        }

        let mut widx = Index::new();
        if let Some(wp) = flp.ndb().get_waypoint(&prefix, &mut widx).cloned() {
            match pending_airway.take() {
                Some(awy) => {
                    let src = rolling.clone().ok_or_else(|| Error::UnexpectedRouteToken(format!("{awy} has no prior fix to join from")))?;
                    let src = reconcile_airway_startpoint(flp, &awy, src)?;
                    let m = flp.ndb().get_wpt4awy(&src.id, &wp.id, &awy)?;
                    let dst_id = m.destination.id.clone();
                    let seg = edit::build_airway_segment(flp, &src.id, &dst_id, &awy, m.start_leg, m.end_leg)?;
                    rolling = seg_dst(flp, &seg).or_else(|| Some(Fix::new(m.destination.id.clone(), m.destination.position)));
                    flp.rte.push(seg);
                }
                None => {
                    let fix = Fix::new(wp.id.clone(), wp.position);
                    push_direct(flp, rolling.as_ref(), &fix);
                    rolling = Some(fix);
                }
            }
            i += 1;
            continue;
        }

        if let Some(pos) = llc::parse(&token) {
            let wp = flp.push_custom_waypoint(Waypoint::new(prefix.clone(), "", pos, WaypointKind::Fix));
            let fix = Fix::new(wp.id, wp.position);
            push_direct(flp, rolling.as_ref(), &fix);
            rolling = Some(fix);
            i += 1;
            continue;
        }

        return Err(Error::UnexpectedRouteToken(token));
    }

    if let Some(awy) = pending_airway {
        return Err(Error::UnexpectedRouteToken(format!("{awy} has no endpoint")));
    }

    if let Some((icao, rwy)) = first_airport {
        if flp.departure.airport.is_none() {
            flp.set_departure(&icao, rwy.as_deref())?;
        }
    }
    if let Some((icao, rwy)) = last_airport {
        flp.set_arrival(&icao, rwy.as_deref())?;
    }

    trim_redundant_ends(flp);
    flp.route_leg_update()
}

/// Appends a single direct leg from `src` (if any) to `dst`, unless it
/// would be pointless — same id and position, or zero distance.
fn push_direct(flp: &mut FlightPlan, src: Option<&Fix>, dst: &Fix) {
    if let Some(src) = src {
        if src.id == dst.id && src.position.same_horizontal(&dst.position) {
            return;
        }
    }
    let idx = flp.legs.len();
    flp.legs.push(crate::fp::Leg::new(ProcedureLeg::Tf { dst: dst.clone() }, Restriction::none(), ENROUTE_SLOT));
    let mut seg = RouteSegment::direct();
    seg.push_leg(idx);
    flp.rte.push(seg);
}

fn seg_dst(flp: &FlightPlan, seg: &RouteSegment) -> Option<Fix> {
    seg.legs.last().and_then(|&i| flp.legs.get(i)).and_then(|l| l.dst().cloned())
}

/// §4.F step 2's fallback: if `src` is not a valid join point for `awy`
/// and the last enroute segment was a plain direct into a
/// same-named waypoint, retries every other waypoint sharing that name
/// for one that *is* a valid startpoint, and rewrites the prior direct's
/// destination to match.
fn reconcile_airway_startpoint(flp: &mut FlightPlan, awy: &str, src: Fix) -> Result<Fix> {
    let mut idx = Index::new();
    if flp.ndb().get_airway(awy, &mut idx).is_some_and(|a| a.is_valid_startpoint(&src.id)) {
        return Ok(src);
    }

    let Some(last_seg) = flp.rte.last() else {
        return Err(Error::UnexpectedRouteToken(format!("{} is not a valid start of {awy}", src.id)));
    };
    if !matches!(last_seg.kind, SegmentKind::Direct) || last_seg.legs.len() != 1 {
        return Err(Error::UnexpectedRouteToken(format!("{} is not a valid start of {awy}", src.id)));
    }
    let leg_idx = last_seg.legs[0];

    let mut widx = Index::new();
    while let Some(candidate) = flp.ndb().get_waypoint(&src.id, &mut widx).cloned() {
        let mut aidx = Index::new();
        if flp.ndb().get_airway(awy, &mut aidx).is_some_and(|a| a.is_valid_startpoint(&candidate.id)) {
            let new_fix = Fix::new(candidate.id.clone(), candidate.position);
            if let Some(leg) = flp.legs.get_mut(leg_idx) {
                leg.leg = ProcedureLeg::Tf { dst: new_fix.clone() };
            }
            return Ok(new_fix);
        }
    }
    Err(Error::UnexpectedRouteToken(format!("{} is not a valid start of {awy}", src.id)))
}

/// §4.F step 1: matches `PPPPPBBBDDD`, `PLACE/BRG/DIST`, or
/// `PLACE` followed by a separate `BRG/DIST` token. Returns the
/// synthesized fix and the number of tokens consumed.
fn try_pbd(
    flp: &mut FlightPlan,
    tokens: &[String],
    i: usize,
    prefix: &str,
    suffix: &Option<String>,
    rolling: Option<&Fix>,
) -> Result<Option<(Fix, usize)>> {
    let (place, brg, dist, consumed) = if let Some(suffix) = suffix {
        if let Some((brg_s, dist_s)) = suffix.split_once('/') {
            match (brg_s.parse::<f64>(), dist_s.parse::<f64>()) {
                (Ok(brg), Ok(dist)) => (prefix.to_string(), brg, dist, 1),
                _ => return Ok(None),
            }
        } else {
            return Ok(None);
        }
    } else if prefix.len() == 11 && prefix[5..].chars().all(|c| c.is_ascii_digit()) {
        let place = prefix[..5].to_string();
        let brg: f64 = prefix[5..8].parse().map_err(|_| Error::UnexpectedRouteToken(prefix.to_string()))?;
        let dist: f64 = prefix[8..11].parse().map_err(|_| Error::UnexpectedRouteToken(prefix.to_string()))?;
        (place, brg, dist, 1)
    } else if let Some(next) = tokens.get(i + 1) {
        match next.split_once('/') {
            Some((brg_s, dist_s)) => match (brg_s.parse::<f64>(), dist_s.parse::<f64>()) {
                (Ok(brg), Ok(dist)) => (prefix.to_string(), brg, dist, 2),
                _ => return Ok(None),
            },
            None => return Ok(None),
        }
    } else {
        return Ok(None);
    };

    let mut idx = Index::new();
    let Some(place_wp) = flp.ndb().get_waypoint(&place, &mut idx).cloned() else {
        return Ok(None);
    };

    let origin = match rolling {
        Some(r) if r.id == place_wp.id => place_wp.position,
        _ => {
            let mut nidx = Index::new();
            flp.ndb()
                .get_wptnear2(&place, &mut nidx, rolling.map(|r| r.position).unwrap_or(place_wp.position))
                .map(|w| w.position)
                .unwrap_or(place_wp.position)
        }
    };

    let true_bearing = flp.wmm().magnetic_to_true(crate::geom::MagneticBearing::degrees(brg), origin);
    let position = crate::geom::geodesy::calcpos4pbd(origin, true_bearing, crate::measurements::Distance::nautical_miles(dist));
    let id = format!("{place}{brg:03.0}{dist:03.0}");
    let wp = flp.push_custom_waypoint(Waypoint::new(id.clone(), "", position, WaypointKind::Fix));
    Ok(Some((Fix::new(wp.id, wp.position), consumed)))
}

/// Post-pass (§4.F): drops a leading direct segment into the departure
/// fix and a trailing direct segment into the arrival fix, both
/// redundant once `set_departure`/`set_arrival` have run.
fn trim_redundant_ends(flp: &mut FlightPlan) {
    let dep_fix = flp.departure.airport.as_ref().map(|a| endpoint_fix(a, flp.departure.runway.as_deref()));
    let arr_fix = flp.arrival.airport.as_ref().map(|a| endpoint_fix(a, flp.arrival.runway.as_deref()));

    if let (Some(dep), Some(first)) = (&dep_fix, flp.rte.first()) {
        if matches!(first.kind, SegmentKind::Direct) && first.legs.len() == 1 {
            if let Some(leg) = first.legs.first().and_then(|&i| flp.legs.get(i)) {
                if leg.dst().is_some_and(|d| d.id == dep.id) {
                    flp.rte.remove(0);
                }
            }
        }
    }
    if let (Some(arr), Some(last)) = (&arr_fix, flp.rte.last()) {
        if matches!(last.kind, SegmentKind::Direct) && last.legs.len() == 1 {
            if let Some(leg) = last.legs.first().and_then(|&i| flp.legs.get(i)) {
                if leg.dst().is_some_and(|d| d.id == arr.id) {
                    flp.rte.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Position;
    use crate::measurements::{Altitude, Distance};
    use crate::nd::airport::RawRunway;
    use crate::nd::wmm::test_double::FixedDeclination;
    use crate::nd::{Airway, AirwayLeg, Database};

    fn apt(id: &str, name: &str, pos: Position) -> Airport {
        Airport::new(
            id,
            name,
            pos,
            Some(Altitude::feet(10_000)),
            None,
            Distance::feet(8000.0),
            vec![RawRunway {
                id: "16".to_string(),
                database_heading: crate::geom::MagneticBearing::degrees(160.0),
                length: Distance::feet(8000.0),
                width: Distance::feet(150.0),
                threshold: pos,
                threshold_elevation: Altitude::feet(1400),
                ils: None,
                surface: "ASPH".to_string(),
                usage: crate::nd::airport::RunwayUsage::Both,
            }],
            Some(String::new()),
        )
    }

    fn test_ndb() -> Database {
        let mut db = Database::new("2601");
        db.add_airport(Rc::new(apt("LSGG", "GENEVA", Position::new(46.2381, 6.1089))));
        db.add_airport(Rc::new(apt("LSZH", "ZURICH", Position::new(47.4581, 8.5472))));
        db.add_waypoint(Waypoint::new("MOLUS", "LS", Position::new(46.4, 6.3), WaypointKind::Fix));
        db.add_waypoint(Waypoint::new("SOSAL", "LS", Position::new(46.5, 6.5), WaypointKind::Fix));
        db.add_waypoint(Waypoint::new("BERSU", "LS", Position::new(47.3, 8.3), WaypointKind::Fix));
        db.add_airway(Airway::new(
            "N871",
            vec![
                AirwayLeg {
                    in_id: "SOSAL".into(),
                    in_position: Position::new(46.5, 6.5),
                    out_id: "TELNO".into(),
                    out_position: Position::new(46.7, 6.9),
                    inbound_course: crate::geom::TrueBearing::degrees(45.0),
                    outbound_course: crate::geom::TrueBearing::degrees(45.0),
                    length: Distance::nautical_miles(30.0),
                },
                AirwayLeg {
                    in_id: "TELNO".into(),
                    in_position: Position::new(46.7, 6.9),
                    out_id: "KORED".into(),
                    out_position: Position::new(47.0, 7.5),
                    inbound_course: crate::geom::TrueBearing::degrees(45.0),
                    outbound_course: crate::geom::TrueBearing::degrees(45.0),
                    length: Distance::nautical_miles(30.0),
                },
                AirwayLeg {
                    in_id: "KORED".into(),
                    in_position: Position::new(47.0, 7.5),
                    out_id: "KONOL".into(),
                    out_position: Position::new(47.1, 7.8),
                    inbound_course: crate::geom::TrueBearing::degrees(45.0),
                    outbound_course: crate::geom::TrueBearing::degrees(45.0),
                    length: Distance::nautical_miles(30.0),
                },
                AirwayLeg {
                    in_id: "KONOL".into(),
                    in_position: Position::new(47.1, 7.8),
                    out_id: "BERSU".into(),
                    out_position: Position::new(47.3, 8.3),
                    inbound_course: crate::geom::TrueBearing::degrees(45.0),
                    outbound_course: crate::geom::TrueBearing::degrees(45.0),
                    length: Distance::nautical_miles(30.0),
                },
            ],
        ));
        db
    }

    fn plan() -> FlightPlan {
        let ndb: Rc<dyn NavigationDatabase> = Rc::new(test_ndb());
        let wmm: Rc<dyn crate::nd::wmm::Wmm> = Rc::new(FixedDeclination(0.0));
        FlightPlan::new(ndb, wmm)
    }

    #[test]
    fn seeded_case_one_builds_airway_run_and_trims_arrival() {
        let mut flp = plan();
        parse_route(&mut flp, "LSGG MOLUS N871 BERSU LSZH").unwrap();
        assert_eq!(flp.departure.airport.as_ref().unwrap().id, "LSGG");
        assert_eq!(flp.arrival.airport.as_ref().unwrap().id, "LSZH");
        let dsts: Vec<String> = flp.legs.iter().filter_map(|l| l.dst().map(|f| f.id.clone())).collect();
        assert!(dsts.contains(&"MOLUS".to_string()));
        assert!(dsts.contains(&"BERSU".to_string()));
        assert!(!dsts.contains(&"LSZH".to_string()));
    }

    #[test]
    fn star_keyword_is_ignored() {
        let mut a = plan();
        let mut b = plan();
        parse_route(&mut a, "LSGG MOLUS N871 BERSU LSZH").unwrap();
        parse_route(&mut b, "LSGG MOLUS N871 BERSU STAR LSZH").unwrap();
        let ids_a: Vec<String> = a.legs.iter().filter_map(|l| l.dst().map(|f| f.id.clone())).collect();
        let ids_b: Vec<String> = b.legs.iter().filter_map(|l| l.dst().map(|f| f.id.clone())).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn unknown_token_is_rejected() {
        let mut flp = plan();
        assert!(parse_route(&mut flp, "LSGG ZZZZZZ LSZH").is_err());
    }
}
