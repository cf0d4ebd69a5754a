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

use std::cell::RefCell;
use std::rc::Rc;

use crate::geom::{geodesy, MagneticBearing, Position};
use crate::measurements::{Altitude, Distance, Frequency};
use crate::nd::wmm::Wmm;
use crate::proc::procedure::{ApproachType, Procedure, ProcedureType};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RunwayUsage {
    Closed,
    Takeoff,
    Landing,
    Both,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Ils {
    pub frequency: Frequency,
    pub course: MagneticBearing,
    pub glideslope_deg: Option<f64>,
}

/// A runway as recorded by the database, before [`Airport::init`] has
/// recomputed its heading and attached its procedures.
#[derive(Clone, PartialEq, Debug)]
pub struct RawRunway {
    pub id: String,
    pub database_heading: MagneticBearing,
    pub length: Distance,
    pub width: Distance,
    pub threshold: Position,
    pub threshold_elevation: Altitude,
    pub ils: Option<Ils>,
    pub surface: String,
    pub usage: RunwayUsage,
}

/// A fully-initialized runway: heading recomputed from threshold
/// geodesy, procedures attached.
#[derive(Debug)]
pub struct Runway {
    pub id: String,
    pub heading: MagneticBearing,
    pub length: Distance,
    pub width: Distance,
    pub threshold: Position,
    pub ils: Option<Ils>,
    pub surface: String,
    pub usage: RunwayUsage,
    pub sids: Vec<Rc<Procedure>>,
    pub stars: Vec<Rc<Procedure>>,
    pub approaches: Vec<Rc<Procedure>>,
}

impl Runway {
    pub fn waypoint_id(&self) -> String {
        format!("RW{}", self.id)
    }

    /// The runway this one is paired with for reciprocal-heading
    /// purposes: same numeric designator, opposite side suffix.
    /// Per Design Note, assumes exactly two paired runways (L↔R);
    /// center (`C`) runways have no pair, and `T` is a parallel suffix
    /// rather than a side.
    pub fn reciprocal_id(&self) -> Option<String> {
        let (number, suffix) = split_runway_id(&self.id)?;
        let opposite_number = (number + 18) % 36;
        let opposite_number = if opposite_number == 0 { 36 } else { opposite_number };
        let opposite_suffix = match suffix {
            'L' => Some('R'),
            'R' => Some('L'),
            _ => None,
        }?;
        Some(format!("{opposite_number:02}{opposite_suffix}"))
    }
}

/// Splits a runway id into its numeric designator and side suffix.
/// Returns `None` for plain numeric ids (e.g. `"16"`) or a center/`T`
/// suffix, since those have no `L`/`R` reciprocal to pair against.
fn split_runway_id(id: &str) -> Option<(u32, char)> {
    let trimmed = id.trim_start_matches("RW");
    let last = trimmed.chars().last()?;
    if !last.is_ascii_alphabetic() {
        return None;
    }
    let digits = &trimmed[..trimmed.len() - 1];
    let number: u32 = digits.parse().ok()?;
    Some((number, last.to_ascii_uppercase()))
}

/// An airport, initialized on demand. Procedure placement and runway
/// heading recomputation happen exactly once, on the first
/// [`Airport::init`] call (§3).
pub struct Airport {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub transition_altitude: Option<Altitude>,
    pub transition_level: Option<Altitude>,
    pub longest_runway: Distance,
    raw_runways: Vec<RawRunway>,
    raw_procedure_text: RefCell<Option<String>>,
    init: RefCell<Option<Rc<AirportInit>>>,
}

pub struct AirportInit {
    pub runways: Vec<Rc<Runway>>,
    pub sids: Vec<Rc<Procedure>>,
    pub stars: Vec<Rc<Procedure>>,
    pub allprocs: Vec<Rc<Procedure>>,
}

impl Airport {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        transition_altitude: Option<Altitude>,
        transition_level: Option<Altitude>,
        longest_runway: Distance,
        raw_runways: Vec<RawRunway>,
        raw_procedure_text: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
            transition_altitude,
            transition_level,
            longest_runway,
            raw_runways,
            raw_procedure_text: RefCell::new(raw_procedure_text),
            init: RefCell::new(None),
        }
    }

    /// Attaches (or replaces) the raw procedure-file text before the
    /// first [`Airport::init`] call.
    pub fn with_procedure_text(self, text: String) -> Self {
        *self.raw_procedure_text.borrow_mut() = Some(text);
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.init.borrow().is_some()
    }

    /// `tra_altitude`: `apt.transition_altitude`, else
    /// `apt.transition_level`, else 10,000 ft.
    pub fn departure_transition_altitude(&self) -> Altitude {
        self.transition_altitude.or(self.transition_level).unwrap_or(Altitude::feet(10_000))
    }

    /// `trl_altitude`: same fallback chain, for the arrival side.
    pub fn arrival_transition_level(&self) -> Altitude {
        self.transition_level.or(self.transition_altitude).unwrap_or(Altitude::feet(10_000))
    }

    pub fn runway(&self, id: &str) -> Option<Rc<Runway>> {
        self.init.borrow().as_ref()?.runways.iter().find(|r| r.id == id).cloned()
    }

    pub fn sids(&self) -> Vec<Rc<Procedure>> {
        self.init.borrow().as_ref().map(|i| i.sids.clone()).unwrap_or_default()
    }

    pub fn stars(&self) -> Vec<Rc<Procedure>> {
        self.init.borrow().as_ref().map(|i| i.stars.clone()).unwrap_or_default()
    }

    pub fn find_sid(&self, name: &str) -> Option<Rc<Procedure>> {
        self.init.borrow().as_ref()?.sids.iter().find(|p| p.name == name).cloned()
    }

    pub fn find_star(&self, name: &str) -> Option<Rc<Procedure>> {
        self.init.borrow().as_ref()?.stars.iter().find(|p| p.name == name).cloned()
    }

    pub fn find_any(&self, name: &str) -> Option<Rc<Procedure>> {
        self.init.borrow().as_ref()?.allprocs.iter().find(|p| p.name == name).cloned()
    }

    /// Idempotent initialization: parses the procedure preamble, places
    /// each procedure, and recomputes every runway's magnetic heading.
    pub fn init(&self, wmm: &dyn Wmm) -> crate::error::Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let text = self.raw_procedure_text.borrow_mut().take().unwrap_or_default();
        let (sids, stars, allprocs, apprs_by_rwy, star_prefixes) = parse_procedure_preamble(&text)?;

        let mut runways = Vec::with_capacity(self.raw_runways.len());
        for raw in &self.raw_runways {
            let heading = recompute_heading(raw, &self.raw_runways, wmm);
            let rwy_sids: Vec<Rc<Procedure>> = sids
                .iter()
                .filter(|p| p.runway_id.as_deref() == Some(raw.id.as_str()))
                .cloned()
                .collect();
            let rwy_stars: Vec<Rc<Procedure>> = stars
                .iter()
                .filter(|p| p.runway_id.as_deref() == Some(raw.id.as_str()))
                .cloned()
                .collect();
            if let Some(prefix) = star_prefixes.get(&raw.id) {
                for s in &rwy_stars {
                    *s.star_prefix.borrow_mut() = Some(prefix.clone());
                }
            }
            let approaches = apprs_by_rwy.get(&raw.id).cloned().unwrap_or_default();

            runways.push(Rc::new(Runway {
                id: raw.id.clone(),
                heading,
                length: raw.length,
                width: raw.width,
                threshold: raw.threshold,
                ils: raw.ils.clone(),
                surface: raw.surface.clone(),
                usage: raw.usage,
                sids: rwy_sids,
                stars: rwy_stars,
                approaches,
            }));
        }

        *self.init.borrow_mut() = Some(Rc::new(AirportInit { runways, sids, stars, allprocs }));
        Ok(())
    }
}

/// Recomputes a runway's magnetic heading from its reciprocal's threshold
/// when one is on file (true bearing between the two thresholds, then
/// converted via the WMM); falls back to the database-supplied heading
/// when the runway has no `L`/`R` pair (center or single runways).
fn recompute_heading(raw: &RawRunway, all: &[RawRunway], wmm: &dyn Wmm) -> MagneticBearing {
    let reciprocal = split_runway_id(&raw.id).and_then(|(number, suffix)| {
        let opposite_number = {
            let n = (number + 18) % 36;
            if n == 0 {
                36
            } else {
                n
            }
        };
        let opposite_suffix = match suffix {
            'L' => Some('R'),
            'R' => Some('L'),
            _ => None,
        }?;
        all.iter().find(|r| r.id == format!("{opposite_number:02}{opposite_suffix}"))
    });

    match reciprocal {
        Some(other) => wmm.true_to_magnetic(geodesy::bearing(raw.threshold, other.threshold), raw.threshold),
        None => raw.database_heading,
    }
}

type ApproachesByRunway = std::collections::HashMap<String, Vec<Rc<Procedure>>>;
type StarPrefixes = std::collections::HashMap<String, Rc<Procedure>>;

/// Groups a procedure file's lines into `(header line, leg lines)` blocks,
/// then parses each header and builds its [`Procedure`]. `ProcedureHeader`
/// borrows from its source line, so headers are parsed fresh per block
/// rather than carried across the grouping pass.
fn parse_procedure_preamble(
    text: &str,
) -> crate::error::Result<(Vec<Rc<Procedure>>, Vec<Rc<Procedure>>, Vec<Rc<Procedure>>, ApproachesByRunway, StarPrefixes)> {
    use arinc424::records::ProcedureHeader;

    let mut sids = Vec::new();
    let mut stars = Vec::new();
    let mut allprocs: Vec<Rc<Procedure>> = Vec::new();
    let mut apprs_by_rwy: ApproachesByRunway = std::collections::HashMap::new();
    let mut star_prefixes: StarPrefixes = std::collections::HashMap::new();

    let mut blocks: Vec<(String, Vec<String>)> = Vec::new();
    let mut header_line: Option<&str> = None;
    let mut leg_lines: Vec<String> = Vec::new();
    for raw_line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let head = raw_line.split(',').next().unwrap_or("");
        if matches!(head, "SID" | "STAR" | "APPTR" | "FINAL") {
            if let Some(h) = header_line.take() {
                blocks.push((h.to_string(), std::mem::take(&mut leg_lines)));
            }
            header_line = Some(raw_line);
        } else if header_line.is_some() {
            leg_lines.push(raw_line.to_string());
        }
    }
    if let Some(h) = header_line.take() {
        blocks.push((h.to_string(), leg_lines));
    }

    for (header_line, legs) in blocks {
        let header = ProcedureHeader::parse(&header_line)?;
        let raw_text = legs.join("\n");
        match header {
            ProcedureHeader::Sid(h) => {
                let proc_type = ProcedureType::from_seg_type(true, h.seg_type, h.rwy_or_trans)?;
                let mut proc = Procedure::new(h.name, proc_type, raw_text);
                if !h.rwy_or_trans.eq_ignore_ascii_case("ALL") {
                    proc.runway_id = Some(h.rwy_or_trans.to_string());
                }
                let proc = Rc::new(proc);
                sids.push(proc.clone());
                allprocs.push(proc);
            }
            ProcedureHeader::Star(h) => {
                let proc_type = ProcedureType::from_seg_type(false, h.seg_type, h.rwy_or_trans)?;
                let mut proc = Procedure::new(h.name, proc_type, raw_text);
                if !h.rwy_or_trans.eq_ignore_ascii_case("ALL") {
                    proc.runway_id = Some(h.rwy_or_trans.to_string());
                }
                let proc = Rc::new(proc);
                if proc_type == ProcedureType::Star2 || proc_type == ProcedureType::Star5 {
                    // Runway-agnostic prefix for the paired runway-specific STAR.
                    star_prefixes.insert(h.rwy_or_trans.to_string(), proc.clone());
                }
                stars.push(proc.clone());
                allprocs.push(proc);
            }
            ProcedureHeader::ApprTrans(h) => {
                let proc = Rc::new(Procedure::new(h.appr_name, ProcedureType::ApprTrans, raw_text));
                allprocs.push(proc);
            }
            ProcedureHeader::Final(h) => {
                let approach_type = ApproachType::from_letter(h.appr_letter)?;
                let mut proc = Procedure::new(h.appr_name, ProcedureType::Final, raw_text);
                proc.approach_type = Some(approach_type);
                proc.runway_id = Some(h.rwy.to_string());
                let proc = Rc::new(proc);
                apprs_by_rwy.entry(h.rwy.to_string()).or_default().push(proc.clone());
                allprocs.push(proc);
            }
        }
    }

    Ok((sids, stars, allprocs, apprs_by_rwy, star_prefixes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nd::wmm::test_double::FixedDeclination;

    fn raw_runway(id: &str, threshold: Position) -> RawRunway {
        RawRunway {
            id: id.to_string(),
            database_heading: MagneticBearing::degrees(0.0),
            length: Distance::feet(8000.0),
            width: Distance::feet(150.0),
            threshold,
            threshold_elevation: Altitude::feet(1400),
            ils: None,
            surface: "ASPH".to_string(),
            usage: RunwayUsage::Both,
        }
    }

    #[test]
    fn init_is_idempotent() {
        let apt = Airport::new(
            "LSZH",
            "ZURICH",
            Position::new(47.4581, 8.5472),
            Some(Altitude::feet(10_000)),
            None,
            Distance::feet(12800.0),
            vec![raw_runway("16", Position::new(47.45, 8.54)), raw_runway("34", Position::new(47.47, 8.56))],
            Some("SID,FOO1A,ALL,2\nTF,ALBI,N47.30,E008.40,0,,,,,,0,,,0,0,,,0,0,,,,,,\n".to_string()),
        );
        let wmm = FixedDeclination(2.0);
        apt.init(&wmm).unwrap();
        assert!(apt.is_initialized());
        let count_before = apt.sids().len();
        apt.init(&wmm).unwrap();
        assert_eq!(apt.sids().len(), count_before);
    }

    #[test]
    fn reciprocal_runway_pairs_by_suffix() {
        let rwy = Runway {
            id: "04L".to_string(),
            heading: MagneticBearing::degrees(40.0),
            length: Distance::feet(8000.0),
            width: Distance::feet(150.0),
            threshold: Position::new(47.45, 8.54),
            ils: None,
            surface: "ASPH".to_string(),
            usage: RunwayUsage::Both,
            sids: Vec::new(),
            stars: Vec::new(),
            approaches: Vec::new(),
        };
        assert_eq!(rwy.reciprocal_id().as_deref(), Some("22R"));
    }
}
