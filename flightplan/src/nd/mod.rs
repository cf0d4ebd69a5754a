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

//! The navdatabase façade (§4.B): airports, airways, and waypoints,
//! loaded once from the navdatabase CSV grammars and looked up through a
//! small set of deterministic, sort-order-dependent queries.

pub mod airport;
pub mod airway;
pub mod index;
pub mod parser;
pub mod waypoint;
pub mod wmm;

use std::rc::Rc;

use crate::error::{Error, Result};
use crate::geom::{geodesy, Position};
pub use airport::{Airport, Runway};
pub use airway::{Airway, AirwayLeg};
pub use index::Index;
pub use waypoint::{Waypoint, WaypointKind};
use wmm::Wmm;

/// The destination of an airway join, plus the range of legs consumed —
/// `[start_leg, end_leg]`, inclusive — so the caller can splice exactly
/// that run into a route segment.
pub struct AirwayMatch {
    pub destination: Waypoint,
    pub start_leg: usize,
    pub end_leg: usize,
}

/// The navdatabase query surface (§4.B). All lookups return the first
/// match in the deterministic sort order the in-memory [`Database`]
/// maintains; `idx` lets a caller resume a scan past a prior match
/// rather than re-starting from the top.
pub trait NavigationDatabase {
    fn get_airport(&self, id: &str) -> Option<Rc<Airport>>;
    fn init_airport(&self, apt: &Airport, wmm: &dyn Wmm) -> Result<()>;
    fn get_airway(&self, id: &str, idx: &mut Index) -> Option<&Airway>;
    fn get_waypoint(&self, id: &str, idx: &mut Index) -> Option<&Waypoint>;
    fn get_wptnear2(&self, id: &str, idx: &mut Index, pos: Position) -> Option<&Waypoint>;
    fn get_wpt4pos(&self, id: &str, idx: &mut Index, pos: Position) -> Option<&Waypoint>;
    fn get_wpt4awy(&self, src: &str, dstid: &str, awyid: &str) -> Result<AirwayMatch>;
    fn get_wpt4aws(&self, src: &str, awy2id: &str, awyid: &str) -> Result<AirwayMatch>;
}

/// An in-memory navdatabase: every record loaded once by
/// [`parser::load`], kept in the sort orders §4.B's lookups depend on.
pub struct Database {
    pub cycle: String,
    airports: Vec<Rc<Airport>>,
    waypoints: Vec<Waypoint>,
    airways: Vec<Airway>,
}

impl Database {
    pub fn new(cycle: impl Into<String>) -> Self {
        Self { cycle: cycle.into(), airports: Vec::new(), waypoints: Vec::new(), airways: Vec::new() }
    }

    /// Inserts a waypoint, keeping the list sorted by id, then
    /// [`WaypointKind::sort_priority`], then `|latitude|` (§4.B).
    pub fn add_waypoint(&mut self, wp: Waypoint) {
        let pos = self
            .waypoints
            .binary_search_by(|existing| waypoint_order(existing).cmp(&waypoint_order(&wp)))
            .unwrap_or_else(|i| i);
        self.waypoints.insert(pos, wp);
    }

    pub fn add_airport(&mut self, apt: Rc<Airport>) {
        let pos = self
            .airports
            .binary_search_by(|existing| airport_order(existing).cmp(&airport_order(&apt)))
            .unwrap_or_else(|i| i);
        self.airports.insert(pos, apt);
    }

    pub fn add_airway(&mut self, awy: Airway) {
        let pos = self.airways.binary_search_by(|existing| existing.id.cmp(&awy.id)).unwrap_or_else(|i| i);
        self.airways.insert(pos, awy);
    }

    fn airways_named<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Airway> {
        self.airways.iter().filter(move |a| a.id == id)
    }
}

fn waypoint_order(wp: &Waypoint) -> (String, u8, ordered_float::OrderedF64) {
    (wp.id.clone(), wp.kind.sort_priority(), ordered_float::OrderedF64(wp.position.lat_deg().abs()))
}

fn airport_order(apt: &Airport) -> (String, ordered_float::OrderedF64) {
    (apt.id.clone(), ordered_float::OrderedF64(apt.position.lat_deg().abs()))
}

/// A tiny total-order wrapper for `f64`, since navdatabase latitudes are
/// never NaN; avoids pulling in the `ordered-float` crate for one
/// comparator.
mod ordered_float {
    #[derive(Copy, Clone, PartialEq, PartialOrd)]
    pub struct OrderedF64(pub f64);

    impl Eq for OrderedF64 {}

    impl Ord for OrderedF64 {
        fn cmp(&self, other: &Self) -> std::cmp::Ordering {
            self.0.partial_cmp(&other.0).unwrap_or(std::cmp::Ordering::Equal)
        }
    }
}

impl NavigationDatabase for Database {
    fn get_airport(&self, id: &str) -> Option<Rc<Airport>> {
        self.airports.iter().find(|a| a.id == id).cloned()
    }

    fn init_airport(&self, apt: &Airport, wmm: &dyn Wmm) -> Result<()> {
        apt.init(wmm)
    }

    fn get_airway(&self, id: &str, idx: &mut Index) -> Option<&Airway> {
        let found = self.airways.iter().enumerate().skip(idx.0).find(|(_, a)| a.id == id);
        if let Some((i, awy)) = found {
            idx.0 = i + 1;
            Some(awy)
        } else {
            None
        }
    }

    fn get_waypoint(&self, id: &str, idx: &mut Index) -> Option<&Waypoint> {
        let found = self.waypoints.iter().enumerate().skip(idx.0).find(|(_, w)| w.id == id);
        if let Some((i, wp)) = found {
            idx.0 = i + 1;
            Some(wp)
        } else {
            None
        }
    }

    fn get_wptnear2(&self, id: &str, idx: &mut Index, pos: Position) -> Option<&Waypoint> {
        let candidates: Vec<usize> =
            self.waypoints.iter().enumerate().skip(idx.0).filter(|(_, w)| w.id == id).map(|(i, _)| i).collect();
        let best = candidates
            .into_iter()
            .min_by(|&a, &b| {
                let da = geodesy::distance(self.waypoints[a].position, pos);
                let db = geodesy::distance(self.waypoints[b].position, pos);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })?;
        idx.0 = best + 1;
        Some(&self.waypoints[best])
    }

    fn get_wpt4pos(&self, id: &str, idx: &mut Index, pos: Position) -> Option<&Waypoint> {
        let found = self
            .waypoints
            .iter()
            .enumerate()
            .skip(idx.0)
            .find(|(_, w)| w.id == id && w.position.same_horizontal(&pos));
        if let Some((i, wp)) = found {
            idx.0 = i + 1;
            Some(wp)
        } else {
            None
        }
    }

    fn get_wpt4awy(&self, src: &str, dstid: &str, awyid: &str) -> Result<AirwayMatch> {
        for awy in self.airways_named(awyid) {
            if !awy.is_valid_startpoint(src) {
                continue;
            }
            let Some(start) = awy.legs.iter().position(|l| l.in_id == src) else {
                continue;
            };
            if let Some(end) = awy.find_leg_to(start, dstid) {
                let out_pos = awy.legs[end].out_position;
                let mut idx = Index::new();
                let destination = self
                    .get_wptnear2(dstid, &mut idx, out_pos)
                    .cloned()
                    .unwrap_or_else(|| Waypoint::new(dstid, "", out_pos, WaypointKind::Fix));
                return Ok(AirwayMatch { destination, start_leg: start, end_leg: end });
            }
        }
        Err(Error::UnexpectedRouteToken(format!("{awyid} has no leg from {src} to {dstid}")))
    }

    fn get_wpt4aws(&self, src: &str, awy2id: &str, awyid: &str) -> Result<AirwayMatch> {
        for awy in self.airways_named(awyid) {
            if !awy.is_valid_startpoint(src) {
                continue;
            }
            let Some(start) = awy.legs.iter().position(|l| l.in_id == src) else {
                continue;
            };
            for (offset, leg) in awy.legs[start..].iter().enumerate() {
                let candidate = &leg.out_id;
                if self.airways_named(awy2id).any(|second| second.is_valid_startpoint(candidate)) {
                    let end = start + offset;
                    let mut idx = Index::new();
                    let destination = self
                        .get_wptnear2(candidate, &mut idx, leg.out_position)
                        .cloned()
                        .unwrap_or_else(|| Waypoint::new(candidate.clone(), "", leg.out_position, WaypointKind::Fix));
                    return Ok(AirwayMatch { destination, start_leg: start, end_leg: end });
                }
            }
        }
        Err(Error::UnexpectedRouteToken(format!("{awyid} never meets {awy2id} after {src}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::Distance;
    use crate::geom::TrueBearing;

    fn wp(id: &str, lat: f64, lon: f64, kind: WaypointKind) -> Waypoint {
        Waypoint::new(id, "LS", Position::new(lat, lon), kind)
    }

    #[test]
    fn waypoint_lookup_prefers_fix_then_latitude() {
        let mut db = Database::new("2601");
        db.add_waypoint(wp("KLO", 47.0, 8.0, WaypointKind::Vor));
        db.add_waypoint(wp("KLO", 10.0, 8.0, WaypointKind::Fix));
        db.add_waypoint(wp("KLO", 5.0, 8.0, WaypointKind::Fix));

        let mut idx = Index::new();
        let first = db.get_waypoint("KLO", &mut idx).unwrap();
        assert_eq!(first.kind, WaypointKind::Fix);
        assert!((first.position.lat_deg() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn airway_join_finds_destination_and_leg_range() {
        let mut db = Database::new("2601");
        let legs = vec![
            AirwayLeg {
                in_id: "SOSAL".into(),
                in_position: Position::new(46.0, 6.0),
                out_id: "TELNO".into(),
                out_position: Position::new(46.5, 6.5),
                inbound_course: TrueBearing::degrees(45.0),
                outbound_course: TrueBearing::degrees(45.0),
                length: Distance::nautical_miles(30.0),
            },
            AirwayLeg {
                in_id: "TELNO".into(),
                in_position: Position::new(46.5, 6.5),
                out_id: "KORED".into(),
                out_position: Position::new(47.0, 7.0),
                inbound_course: TrueBearing::degrees(45.0),
                outbound_course: TrueBearing::degrees(45.0),
                length: Distance::nautical_miles(30.0),
            },
        ];
        db.add_airway(Airway::new("N871", legs));
        db.add_waypoint(wp("KORED", 47.0, 7.0, WaypointKind::Fix));

        let found = db.get_wpt4awy("SOSAL", "KORED", "N871").unwrap();
        assert_eq!(found.destination.id, "KORED");
        assert_eq!(found.start_leg, 0);
        assert_eq!(found.end_leg, 1);
    }
}
