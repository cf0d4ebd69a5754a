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

//! Ingests the navdatabase's six CSV grammars (§6) into a [`Database`].
//!
//! Each file is read independently; a parse failure anywhere in a file
//! propagates rather than silently dropping the bad line, since a
//! malformed navdatabase is a configuration error the caller needs to
//! see, not something this crate should guess past.

use std::collections::HashMap;
use std::rc::Rc;

use arinc424::records::{
    AirportRecord, AirwayHeaderRecord, AirwaySegmentRecord, CycleRecord, NavaidKind, NavaidRecord, WaypointRecord,
};
use arinc424::Record;

use crate::error::Result;
use crate::geom::{Position, TrueBearing};
use crate::measurements::{Altitude, Distance, Frequency};
use crate::nd::airport::{Airport, Ils, RawRunway, RunwayUsage};
use crate::nd::airway::{Airway, AirwayLeg};
use crate::nd::waypoint::{Waypoint, WaypointKind};
use crate::nd::Database;

/// Parses the `X,<airac_cycle>` line into the cycle string, defaulting to
/// `"unknown"` when the file carries none.
pub fn parse_cycle(text: &str) -> String {
    for line in text.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("X,") {
            if let Ok(rec) = CycleRecord::parse(&format!("X,{rest}")) {
                return rec.cycle.to_string();
            }
        }
    }
    "unknown".to_string()
}

/// Parses the airports file into `(icao, Airport-without-procedures)`
/// pairs; the caller attaches each airport's procedure text separately
/// (procedures live in a per-airport file, not the airports file).
pub fn parse_airports(text: &str) -> Result<Vec<Airport>> {
    let mut airports = Vec::new();
    let mut current: Option<(AirportRecord<'_>, Vec<RawRunway>)> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line.as_bytes()[0] {
            b'A' => {
                if let Some((rec, runways)) = current.take() {
                    airports.push(build_airport(rec, runways));
                }
                current = Some((AirportRecord::parse(line)?, Vec::new()));
            }
            b'R' => {
                let rec = arinc424::records::RunwayRecord::parse(line)?;
                if let Some((_, runways)) = current.as_mut() {
                    runways.push(build_runway(rec));
                }
            }
            b'X' => {}
            _ => {}
        }
    }
    if let Some((rec, runways)) = current.take() {
        airports.push(build_airport(rec, runways));
    }
    Ok(airports)
}

fn build_runway(rec: arinc424::records::RunwayRecord<'_>) -> RawRunway {
    let ils = if rec.ils_available {
        Some(Ils {
            frequency: Frequency::khz(rec.ils_freq_khz.unwrap_or(0) as f64),
            course: crate::geom::MagneticBearing::degrees(rec.ils_course_deg.unwrap_or(rec.heading_deg)),
            glideslope_deg: rec.glideslope_deg,
        })
    } else {
        None
    };
    let usage = match rec.usage_code {
        "C" => RunwayUsage::Closed,
        "T" => RunwayUsage::Takeoff,
        "L" => RunwayUsage::Landing,
        _ => RunwayUsage::Both,
    };
    RawRunway {
        id: rec.id.to_string(),
        database_heading: crate::geom::MagneticBearing::degrees(rec.heading_deg),
        length: Distance::feet(rec.length_ft as f64),
        width: Distance::feet(rec.width_ft as f64),
        threshold: Position::new(rec.threshold_lat.0, rec.threshold_lon.0),
        threshold_elevation: Altitude::feet(rec.threshold_elev_ft),
        ils,
        surface: rec.surface_code.to_string(),
        usage,
    }
}

fn build_airport(rec: AirportRecord<'_>, runways: Vec<RawRunway>) -> Airport {
    Airport::new(
        rec.icao,
        rec.name,
        Position::new(rec.lat.0, rec.lon.0),
        rec.transition_altitude_ft.map(Altitude::feet),
        rec.transition_level_ft.map(Altitude::feet),
        Distance::feet(rec.longest_runway_ft as f64),
        runways,
        None,
    )
}

/// Attaches the per-airport procedure file's raw text to an already
/// constructed [`Airport`]; must run before the first `init()` call.
pub fn attach_procedures(airports: Vec<Airport>, mut procedure_text_by_icao: HashMap<String, String>) -> Vec<Rc<Airport>> {
    airports
        .into_iter()
        .map(|mut apt| {
            if let Some(text) = procedure_text_by_icao.remove(&apt.id) {
                apt = apt.with_procedure_text(text);
            }
            Rc::new(apt)
        })
        .collect()
}

/// Parses the waypoints file.
pub fn parse_waypoints(text: &str) -> Result<Vec<Waypoint>> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| {
            let rec = WaypointRecord::parse(line)?;
            Ok(Waypoint::new(rec.id, rec.region, Position::new(rec.lat.0, rec.lon.0), WaypointKind::Fix))
        })
        .collect()
}

/// Parses the navaids file, deriving each entry's [`WaypointKind`] from
/// its frequency and flags per [`NavaidKind`]'s rule table.
pub fn parse_navaids(text: &str) -> Result<Vec<Waypoint>> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| {
            let rec = NavaidRecord::parse(line)?;
            let kind = match rec.kind() {
                NavaidKind::Vor => WaypointKind::Vor,
                NavaidKind::Loc => WaypointKind::Loc,
                NavaidKind::Dme => WaypointKind::Dme,
                NavaidKind::Ndb => WaypointKind::Ndb,
                NavaidKind::Llc => WaypointKind::Llc,
            };
            let mut wp = Waypoint::new(rec.id, rec.region, Position::new(rec.lat.0, rec.lon.0), kind)
                .with_frequency(Frequency::mhz(rec.freq))
                .with_range(Distance::nautical_miles(rec.range_nm));
            if rec.exclude {
                wp = wp.with_range(Distance::zero());
            }
            Ok(wp)
        })
        .collect()
}

/// Parses the airways file: one [`AirwayHeaderRecord`] followed by its
/// `leg_count` [`AirwaySegmentRecord`] lines.
pub fn parse_airways(text: &str) -> Result<Vec<Airway>> {
    let mut airways = Vec::new();
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());

    while let Some(line) = lines.next() {
        if !line.starts_with('A') {
            continue;
        }
        let header = AirwayHeaderRecord::parse(line)?;
        let mut legs = Vec::with_capacity(header.leg_count);
        for _ in 0..header.leg_count {
            let seg_line = lines.next().ok_or_else(|| {
                crate::error::Error::InvalidRoute(format!("airway {} truncated before {} legs", header.id, header.leg_count))
            })?;
            let seg = AirwaySegmentRecord::parse(seg_line)?;
            legs.push(AirwayLeg {
                in_id: seg.in_id.to_string(),
                in_position: Position::new(seg.in_lat.0, seg.in_lon.0),
                out_id: seg.out_id.to_string(),
                out_position: Position::new(seg.out_lat.0, seg.out_lon.0),
                inbound_course: TrueBearing::degrees(seg.inbound_course_deg),
                outbound_course: TrueBearing::degrees(seg.outbound_course_deg),
                length: Distance::nautical_miles(seg.distance_nm),
            });
        }
        airways.push(Airway::new(header.id, legs));
    }
    Ok(airways)
}

/// Loads every navdatabase file into a fresh [`Database`], attaching
/// each airport's procedure text by ICAO identifier.
pub fn load(
    cycle_text: &str,
    airports_text: &str,
    waypoints_text: &str,
    navaids_text: &str,
    airways_text: &str,
    procedure_texts: HashMap<String, String>,
) -> Result<(Database, Vec<Rc<Airport>>)> {
    let mut db = Database::new(parse_cycle(cycle_text));

    for wp in parse_waypoints(waypoints_text)? {
        db.add_waypoint(wp);
    }
    for wp in parse_navaids(navaids_text)? {
        db.add_waypoint(wp);
    }
    for awy in parse_airways(airways_text)? {
        db.add_airway(awy);
    }

    let airports = attach_procedures(parse_airports(airports_text)?, procedure_texts);
    for apt in &airports {
        db.add_airport(apt.clone());
    }

    Ok((db, airports))
}
