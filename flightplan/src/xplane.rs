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

//! The XP-FMS external writer (§6): the one textual output carrying
//! semantic information beyond plain waypoint sequencing — a single
//! decimal "altcode" per line folds in both the altitude constraint and
//! whether the waypoint is flown as a fly-over, an RNAV FAF, or an NPA
//! point past one.

use crate::error::{Error, Result};
use crate::fp::{FlightPlan, Leg, SegmentSlot};
use crate::geom::{geodesy, Position};
use crate::measurements::Altitude;
use crate::nd::{Index, WaypointKind};
use crate::proc::leg::Fix;
use crate::proc::restriction::{AltitudeKind, Restriction};
use crate::proc::ApproachType;

struct Row {
    type_code: u8,
    id: String,
    altcode: i32,
    position: Position,
    speed: i32,
}

impl Row {
    fn discontinuity() -> Self {
        Self { type_code: 0, id: "-------".to_string(), altcode: 0, position: Position::new(0.0, 0.0), speed: 0 }
    }

    fn line(&self) -> String {
        let lat = self.position.lat_deg();
        let lon = self.position.lon_deg();
        if self.speed > 0 {
            format!("{} {} {} {lat:.6} {lon:.6} {}", self.type_code, self.id, self.altcode, self.speed)
        } else {
            format!("{} {} {} {lat:.6} {lon:.6}", self.type_code, self.id, self.altcode)
        }
    }
}

fn round_to_ten(feet: i32) -> i32 {
    let rounded = ((feet as f64 / 10.0).round() as i32) * 10;
    if rounded == 0 {
        10
    } else {
        rounded
    }
}

/// Maps a waypoint's database kind to the line-leading type digit
/// (§6): `1` airport, `2` NDB, `3` VOR, `11` fix, `28` anything else
/// (runway thresholds, synthesized dummies, lat/lon fixes).
fn type_code(kind: WaypointKind) -> u8 {
    match kind {
        WaypointKind::Apt | WaypointKind::Xpa => 1,
        WaypointKind::Ndb => 2,
        WaypointKind::Vor => 3,
        WaypointKind::Fix => 11,
        _ => 28,
    }
}

/// A [`Fix`] only carries an id and a position, not a navdatabase kind,
/// so the type digit is recovered by a fresh lookup — the departure and
/// arrival airports are checked directly first since a runway-specific
/// ICAO id can otherwise collide with nothing in the waypoint table.
fn fix_type_code(flp: &FlightPlan, fix: &Fix) -> u8 {
    if flp.departure.airport.as_ref().is_some_and(|a| a.id == fix.id) || flp.arrival.airport.as_ref().is_some_and(|a| a.id == fix.id) {
        return 1;
    }
    let mut idx = Index::new();
    flp.ndb().get_waypoint(&fix.id, &mut idx).map(|w| type_code(w.kind)).unwrap_or(28)
}

fn altitude_altcode(predicted: Option<Altitude>, restriction: &Restriction, overfly: bool) -> i32 {
    let Some(value) = restriction.altitude_kind else {
        return if overfly { 3 } else { 0 };
    };
    match value.kind {
        AltitudeKind::Below => {
            let rounded = round_to_ten(value.max.unwrap_or(Altitude::feet(0)).as_feet());
            rounded - 1 - if overfly { 1 } else { 0 }
        }
        AltitudeKind::Above | AltitudeKind::Between => {
            let rounded = round_to_ten(value.min.unwrap_or(Altitude::feet(0)).as_feet());
            rounded + 1 + if overfly { 1 } else { 0 }
        }
        AltitudeKind::At => {
            let rounded = round_to_ten(value.max.unwrap_or(Altitude::feet(0)).as_feet());
            rounded + if overfly { 3 } else { 0 }
        }
        AltitudeKind::No => {
            let _ = predicted;
            if overfly {
                3
            } else {
                0
            }
        }
    }
}

/// `…8`/`…9` (§6): the RNAV final approach's FAF gets `…8`, every leg
/// after it up to the runway gets `…9`, overriding the ordinary
/// constraint-kind encoding.
fn faf_altcode(leg: &Leg, is_faf: bool) -> i32 {
    let feet = leg.predicted_altitude.map(|a| a.as_feet()).unwrap_or(0);
    let rounded = round_to_ten(feet);
    if is_faf {
        rounded - 2
    } else {
        rounded - 1
    }
}

fn speed_knots(restriction: &Restriction) -> i32 {
    restriction.airspeed_kind.and_then(|a| a.max.or(a.min)).filter(|&v| v > 0).unwrap_or(0)
}

fn push_dummy_rows(rows: &mut Vec<Row>, leg: &Leg, terminal: Option<Position>) {
    for (i, dummy) in leg.xpfms.iter().enumerate() {
        let next = leg.xpfms.get(i + 1).map(|w| w.position).or(terminal);
        if let Some(next) = next {
            if geodesy::distance(dummy.position, next).as_nautical_miles() < 1.0 {
                continue;
            }
        }
        rows.push(Row { type_code: type_code(dummy.kind), id: dummy.id.clone(), altcode: 0, position: dummy.position, speed: 0 });
    }
}

fn is_rnav_final(flp: &FlightPlan, slot: SegmentSlot) -> bool {
    matches!(slot, SegmentSlot::Appr)
        && flp
            .arrival
            .approach
            .as_ref()
            .and_then(|s| s.kind.procedure())
            .is_some_and(|p| p.approach_type.is_some_and(ApproachType::is_rnav_family))
}

/// `write(flp)` (§6): renders the plan as an XP-FMS text blob — header,
/// departure airport/runway, every leg's dummies and destination in
/// plan order, arrival runway/airport, and the two-line discontinuity
/// footer.
pub fn write(flp: &FlightPlan) -> Result<String> {
    let dep_apt = flp.departure.airport.clone().ok_or_else(|| Error::UnknownAirport(String::new()))?;
    let arr_apt = flp.arrival.airport.clone().ok_or_else(|| Error::UnknownAirport(String::new()))?;

    let mut rows = Vec::new();
    rows.push(Row { type_code: 1, id: dep_apt.id.clone(), altcode: 0, position: dep_apt.position, speed: 0 });
    if let Some(rwy) = &flp.departure.runway {
        let altcode = round_to_ten(rwy.threshold.altitude().map(|a| a.as_feet()).unwrap_or(0));
        rows.push(Row { type_code: 28, id: rwy.waypoint_id(), altcode, position: rwy.threshold, speed: 0 });
    }

    let mut after_faf = false;
    for (slot, idx) in flp.ordered_legs(false) {
        let Some(leg) = flp.legs.get(idx) else { continue };
        if leg.is_discontinuity() {
            rows.push(Row::discontinuity());
            continue;
        }

        let rnav_final = is_rnav_final(flp, slot);
        let is_faf = rnav_final && leg.restriction.is_faf();
        if is_faf {
            after_faf = true;
        }
        let post_faf = rnav_final && after_faf && !is_faf;

        let terminal = leg.dst().map(|f| f.position);
        push_dummy_rows(&mut rows, leg, terminal);

        if let Some(dst) = leg.dst() {
            let overfly = leg.restriction.is_fly_over();
            let altcode =
                if is_faf || post_faf { faf_altcode(leg, is_faf) } else { altitude_altcode(leg.predicted_altitude, &leg.restriction, overfly) };
            rows.push(Row {
                type_code: fix_type_code(flp, dst),
                id: dst.id.clone(),
                altcode,
                position: dst.position,
                speed: speed_knots(&leg.restriction),
            });
        }
    }

    if let Some(rwy) = &flp.arrival.runway {
        let altcode = round_to_ten(rwy.threshold.altitude().map(|a| a.as_feet()).unwrap_or(0));
        let altcode = if flp.arrival.approach.as_ref().and_then(|s| s.kind.procedure()).is_some_and(|p| p.approach_type.is_some_and(ApproachType::is_rnav_family)) {
            altcode - 1
        } else {
            altcode
        };
        rows.push(Row { type_code: 28, id: rwy.waypoint_id(), altcode, position: rwy.threshold, speed: 0 });
    }
    rows.push(Row { type_code: 1, id: arr_apt.id.clone(), altcode: 0, position: arr_apt.position, speed: 0 });

    let mut out = format!("I\n3 version\n1\n{}\n", rows.len());
    for row in &rows {
        out.push_str(&row.line());
        out.push('\n');
    }
    out.push_str(&Row::discontinuity().line());
    out.push('\n');
    out.push_str(&Row::discontinuity().line());
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::MagneticBearing;
    use crate::measurements::Distance;
    use crate::nd::airport::{RawRunway, RunwayUsage};
    use crate::nd::wmm::test_double::FixedDeclination;
    use crate::nd::{Airport, Database, NavigationDatabase};
    use std::rc::Rc;

    fn test_ndb() -> Database {
        let mut db = Database::new("2601");
        let apt = |id: &str, name: &str, pos: Position| {
            Airport::new(
                id,
                name,
                pos,
                Some(Altitude::feet(10_000)),
                None,
                Distance::feet(8000.0),
                vec![RawRunway {
                    id: "16".to_string(),
                    database_heading: MagneticBearing::degrees(160.0),
                    length: Distance::feet(8000.0),
                    width: Distance::feet(150.0),
                    threshold: pos,
                    threshold_elevation: Altitude::feet(1400),
                    ils: None,
                    surface: "ASPH".to_string(),
                    usage: RunwayUsage::Both,
                }],
                Some(String::new()),
            )
        };
        db.add_airport(Rc::new(apt("LSGG", "GENEVA", Position::new(46.2381, 6.1089))));
        db.add_airport(Rc::new(apt("LSZH", "ZURICH", Position::new(47.4581, 8.5472))));
        db
    }

    fn plan() -> FlightPlan {
        let ndb: Rc<dyn NavigationDatabase> = Rc::new(test_ndb());
        let wmm: Rc<dyn crate::nd::wmm::Wmm> = Rc::new(FixedDeclination(0.0));
        FlightPlan::new(ndb, wmm)
    }

    #[test]
    fn header_reports_the_emitted_row_count() {
        let mut flp = plan();
        flp.set_departure("LSGG", Some("16")).unwrap();
        flp.set_arrival("LSZH", Some("16")).unwrap();
        let text = write(&flp).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "I");
        assert_eq!(text.lines().nth(1).unwrap(), "3 version");
        let count: usize = text.lines().nth(3).unwrap().parse().unwrap();
        assert_eq!(count, 4); // dep apt, dep rwy, arr rwy, arr apt
    }

    #[test]
    fn footer_has_two_discontinuity_lines() {
        let mut flp = plan();
        flp.set_departure("LSGG", None).unwrap();
        flp.set_arrival("LSZH", None).unwrap();
        let text = write(&flp).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[lines.len() - 2][..1], "0");
        assert_eq!(&lines[lines.len() - 1][..1], "0");
    }

    #[test]
    fn missing_arrival_airport_is_rejected() {
        let mut flp = plan();
        flp.set_departure("LSGG", None).unwrap();
        assert!(write(&flp).is_err());
    }
}
