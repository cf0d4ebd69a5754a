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

//! Record → leg mapping (§4.D.1): turns a parsed CSV
//! [`arinc424::records::ProcedureLegRecord`] into a [`ProcedureLeg`], its
//! [`Restriction`], and the short identifier/description text §6 requires
//! writers to expose.

use arinc424::fields::LegType;
use arinc424::records::ProcedureLegRecord;

use crate::error::{Error, Result};
use crate::geom::{MagneticBearing, Position};
use crate::measurements::{Altitude, Distance};
use crate::proc::leg::{Fix, HoldLength, ProcedureLeg};
use crate::proc::restriction::{AircraftClass, AirspeedKind, AltitudeKind, Restriction, Turn};

/// A leg record mapped into the engine's native types: the leg itself,
/// its validated restriction, and its writer-visible label.
pub struct CompiledLeg {
    pub leg: ProcedureLeg,
    pub restriction: Restriction,
    pub identifier: String,
    pub description: String,
}

fn turn(code: arinc424::fields::TurnDirection) -> Turn {
    use arinc424::fields::TurnDirection;
    match code {
        TurnDirection::Left => Turn::Left,
        TurnDirection::Right => Turn::Right,
        TurnDirection::Short => Turn::Shortest,
    }
}

fn altitude_kind(code: arinc424::fields::RestrictionCode) -> AltitudeKind {
    use arinc424::fields::RestrictionCode;
    match code {
        RestrictionCode::No => AltitudeKind::No,
        RestrictionCode::At => AltitudeKind::At,
        RestrictionCode::Ab => AltitudeKind::Above,
        RestrictionCode::Bl => AltitudeKind::Below,
        RestrictionCode::Bt => AltitudeKind::Between,
    }
}

fn airspeed_kind(code: arinc424::fields::RestrictionCode) -> AirspeedKind {
    use arinc424::fields::RestrictionCode;
    match code {
        RestrictionCode::No => AirspeedKind::No,
        RestrictionCode::At => AirspeedKind::At,
        RestrictionCode::Ab => AirspeedKind::Above,
        RestrictionCode::Bl => AirspeedKind::Below,
        RestrictionCode::Bt => AirspeedKind::Between,
    }
}

fn aircraft_class(code: arinc424::fields::AircraftClass) -> AircraftClass {
    use arinc424::fields::AircraftClass as Code;
    match code {
        Code::All => AircraftClass::All,
        Code::Jet => AircraftClass::Jet,
        Code::Tbp => AircraftClass::Tbp,
        Code::Oth => AircraftClass::Oth,
        Code::Non => AircraftClass::Non,
    }
}

fn waypoint_constraint(code: arinc424::fields::SpecialFlag) -> crate::proc::restriction::WaypointConstraint {
    use crate::proc::restriction::WaypointConstraint as W;
    use arinc424::fields::SpecialFlag;
    match code {
        SpecialFlag::No => W::No,
        SpecialFlag::Iaf => W::Iaf,
        SpecialFlag::Faf => W::Faf,
        SpecialFlag::Map => W::Map,
    }
}

fn position_of(lat: Option<arinc424::fields::Coordinate>, lon: Option<arinc424::fields::Coordinate>) -> Option<Position> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Position::new(lat.0, lon.0)),
        _ => None,
    }
}

fn fix_of(rec: &ProcedureLegRecord<'_>) -> Result<Fix> {
    let id = rec.waypoint_id.ok_or(Error::InvalidRoute("leg record missing waypoint id".into()))?;
    let position = position_of(rec.waypoint_lat, rec.waypoint_lon)
        .ok_or(Error::InvalidRoute("leg record missing waypoint position".into()))?;
    Ok(Fix::new(id, position))
}

fn navaid_of(rec: &ProcedureLegRecord<'_>) -> Result<Fix> {
    let id = rec.navaid_id.ok_or(Error::InvalidRoute("leg record missing navaid id".into()))?;
    let position = position_of(rec.waypoint_lat, rec.waypoint_lon).unwrap_or(Position::new(0.0, 0.0));
    Ok(Fix::new(id, position))
}

fn course_of(rec: &ProcedureLegRecord<'_>) -> MagneticBearing {
    MagneticBearing::degrees(rec.course.unwrap_or(0.0))
}

fn distance_of(rec: &ProcedureLegRecord<'_>) -> Distance {
    Distance::nautical_miles(rec.distance.unwrap_or(0.0))
}

fn build_restriction(rec: &ProcedureLegRecord<'_>, is_hold: bool) -> Result<Restriction> {
    let mut restriction = Restriction::none();
    let alt_kind = altitude_kind(rec.altitude_kind);
    let (min, max) = altitude_min_max(rec, alt_kind);
    restriction = restriction.with_altitude(alt_kind, min, max)?;

    let spd_kind = airspeed_kind(rec.speed_kind);
    let class = aircraft_class(rec.speed_class);
    restriction = restriction.with_airspeed(spd_kind, class, rec.speed1, rec.speed2)?;

    restriction = restriction.with_waypoint(waypoint_constraint(rec.special_flag));

    if let Some(code) = rec.turn {
        restriction = restriction.with_turn(turn(code), is_hold)?;
    }

    Ok(restriction)
}

/// `ProcedureLegRecord.altitude1`/`altitude2` already has the vendor's
/// reversed-BT quirk corrected by `arinc424`; this just converts units
/// and orders `(min, max)` by restriction kind.
fn altitude_min_max(
    rec: &ProcedureLegRecord<'_>,
    kind: AltitudeKind,
) -> (Option<Altitude>, Option<Altitude>) {
    let a1 = rec.altitude1.map(Altitude::feet);
    let a2 = rec.altitude2.map(Altitude::feet);
    match kind {
        AltitudeKind::At | AltitudeKind::Above => (a1, a1),
        AltitudeKind::Below => (a1, a1),
        AltitudeKind::Between => (a1, a2.or(a1)),
        AltitudeKind::No => (None, None),
    }
}

fn hold_length(rec: &ProcedureLegRecord<'_>) -> HoldLength {
    match rec.hold_distance_type {
        Some(arinc424::fields::HoldDistanceType::Seconds) => HoldLength::Time(rec.hold_value.unwrap_or(60.0)),
        _ => HoldLength::Distance(Distance::nautical_miles(rec.hold_value.unwrap_or(5.0))),
    }
}

/// Maps one parsed leg record into the engine's native leg model.
pub fn compile(rec: &ProcedureLegRecord<'_>) -> Result<CompiledLeg> {
    let is_hold = matches!(rec.leg_type, LegType::Hf | LegType::Ha | LegType::Hm);
    let restriction = build_restriction(rec, is_hold)?;

    let leg = match rec.leg_type {
        LegType::If => ProcedureLeg::If { fix: fix_of(rec)? },
        LegType::Tf => ProcedureLeg::Tf { dst: fix_of(rec)? },
        LegType::Cf => ProcedureLeg::Cf { dst: fix_of(rec)?, course: course_of(rec), distance: distance_of(rec) },
        LegType::Df => ProcedureLeg::Df { dst: fix_of(rec)? },
        LegType::Fa => ProcedureLeg::Fa {
            fix: fix_of(rec)?,
            course: course_of(rec),
            altitude: rec.altitude1.map(Altitude::feet).unwrap_or(Altitude::zero()),
        },
        LegType::Fm => ProcedureLeg::Fm { fix: fix_of(rec)?, course: course_of(rec) },
        LegType::Fc => ProcedureLeg::Fc { fix: fix_of(rec)?, course: course_of(rec), distance: distance_of(rec) },
        LegType::Fd => ProcedureLeg::Fd {
            fix: fix_of(rec)?,
            course: course_of(rec),
            navaid: navaid_of(rec)?,
            dme_distance: Distance::nautical_miles(rec.dme_distance.unwrap_or(0.0)),
        },
        LegType::Ca => ProcedureLeg::Ca {
            course: course_of(rec),
            altitude: rec.altitude1.map(Altitude::feet).unwrap_or(Altitude::zero()),
        },
        LegType::Ci => ProcedureLeg::Ci { course: course_of(rec) },
        LegType::Cd => ProcedureLeg::Cd {
            course: course_of(rec),
            navaid: navaid_of(rec)?,
            dme_distance: Distance::nautical_miles(rec.dme_distance.unwrap_or(0.0)),
        },
        LegType::Cr => ProcedureLeg::Cr {
            course: course_of(rec),
            navaid: navaid_of(rec)?,
            radial: MagneticBearing::degrees(rec.radial.unwrap_or(0.0)),
        },
        LegType::Va => ProcedureLeg::Va {
            heading: course_of(rec),
            altitude: rec.altitude1.map(Altitude::feet).unwrap_or(Altitude::zero()),
        },
        LegType::Vi => ProcedureLeg::Vi { heading: course_of(rec) },
        LegType::Vd => ProcedureLeg::Vd {
            heading: course_of(rec),
            navaid: navaid_of(rec)?,
            dme_distance: Distance::nautical_miles(rec.dme_distance.unwrap_or(0.0)),
        },
        LegType::Vr => ProcedureLeg::Vr {
            heading: course_of(rec),
            navaid: navaid_of(rec)?,
            radial: MagneticBearing::degrees(rec.radial.unwrap_or(0.0)),
        },
        LegType::Vm => ProcedureLeg::Vm { heading: course_of(rec) },
        LegType::Af => ProcedureLeg::Af {
            navaid: navaid_of(rec)?,
            start_radial: MagneticBearing::degrees(rec.radial.unwrap_or(0.0)),
            end_radial: course_of(rec),
            radius: Distance::nautical_miles(rec.arc_radius.unwrap_or(0.0)),
            dst: fix_of(rec)?,
            turn: rec.turn.map(turn).unwrap_or(Turn::Shortest),
        },
        LegType::Rf => ProcedureLeg::Rf {
            center: Fix::new(
                rec.center_id.unwrap_or(""),
                position_of(rec.center_lat, rec.center_lon).unwrap_or(Position::new(0.0, 0.0)),
            ),
            radius: Distance::nautical_miles(rec.arc_radius.unwrap_or(0.0)),
            dst: fix_of(rec)?,
            turn: rec.turn.map(turn).unwrap_or(Turn::Shortest),
        },
        LegType::Pi => ProcedureLeg::Pi {
            fix: fix_of(rec)?,
            outbound_course: course_of(rec),
            outbound_distance: distance_of(rec),
            limit_distance: Distance::nautical_miles(rec.dme_distance.unwrap_or(distance_of(rec).as_nautical_miles())),
            turn_angle: match rec.turn {
                Some(arinc424::fields::TurnDirection::Left) => -45.0,
                _ => 45.0,
            },
        },
        LegType::Hf => ProcedureLeg::Hf {
            fix: fix_of(rec)?,
            inbound_course: course_of(rec),
            leg_length: hold_length(rec),
            turn: rec.turn.map(turn).unwrap_or(Turn::Right),
        },
        LegType::Ha => ProcedureLeg::Ha {
            fix: fix_of(rec)?,
            inbound_course: course_of(rec),
            leg_length: hold_length(rec),
            altitude: rec.altitude1.map(Altitude::feet).unwrap_or(Altitude::zero()),
            turn: rec.turn.map(turn).unwrap_or(Turn::Right),
        },
        LegType::Hm => ProcedureLeg::Hm {
            fix: fix_of(rec)?,
            inbound_course: course_of(rec),
            leg_length: hold_length(rec),
            turn: rec.turn.map(turn).unwrap_or(Turn::Right),
        },
        LegType::Zz => ProcedureLeg::Zz,
    };

    let (identifier, description) = describe(&leg, rec.overfly);

    Ok(CompiledLeg { leg, restriction, identifier, description })
}

/// Builds the §6 short identifier/description pair for a compiled leg.
fn describe(leg: &ProcedureLeg, overfly: bool) -> (String, String) {
    let overfly_suffix = if overfly { " (FOV)" } else { "" };
    match leg {
        ProcedureLeg::Cf { dst, course, .. } => {
            (dst.id.clone(), format!("TRK {:03.0}{overfly_suffix}", course.0.as_degrees()))
        }
        ProcedureLeg::Af { dst, navaid, radius, turn, .. } => (
            dst.id.clone(),
            format!(
                "ARC {} {} D{:.1}",
                match turn {
                    Turn::Left => "LEFT",
                    Turn::Right => "RIGHT",
                    Turn::Shortest => "SHORTEST",
                },
                navaid.id,
                radius.as_nautical_miles()
            ),
        ),
        ProcedureLeg::Pi { fix, .. } => ("(INTC)".to_string(), format!("P-TURN {}", fix.id)),
        ProcedureLeg::Hf { fix, turn, .. } | ProcedureLeg::Hm { fix, turn, .. } => (
            fix.id.clone(),
            format!("HOLD {}", if matches!(turn, Turn::Left) { "LEFT" } else { "RIGHT" }),
        ),
        ProcedureLeg::Ha { fix, turn, altitude, .. } => (
            fix.id.clone(),
            format!(
                "HOLD {} {}",
                if matches!(turn, Turn::Left) { "LEFT" } else { "RIGHT" },
                altitude.as_feet()
            ),
        ),
        ProcedureLeg::Fm { .. } | ProcedureLeg::Vm { .. } => ("(VECTOR)".to_string(), "MANUAL".to_string()),
        ProcedureLeg::Zz => ("(DISC)".to_string(), "DISCONTINUITY".to_string()),
        other => (
            other.dst().map(|f| f.id.clone()).unwrap_or_else(|| "(VECTOR)".to_string()),
            other.type_code().to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg_line(fields: &str) -> String {
        fields.to_string()
    }

    #[test]
    fn compiles_cf_leg_with_identifier() {
        let line = leg_line("CF,KLO,N47.45,E008.55,0,,,,253,4.5,0,,,0,0,0,,0,0,,,,,,");
        let rec = ProcedureLegRecord::parse(&line).unwrap();
        let compiled = compile(&rec).unwrap();
        assert!(matches!(compiled.leg, ProcedureLeg::Cf { .. }));
        assert_eq!(compiled.identifier, "KLO");
        assert_eq!(compiled.description, "TRK 253");
    }

    #[test]
    fn compiles_hold_with_left_turn_restriction() {
        let line = leg_line("HA,ZH552,N47.45,E008.55,1,,,,090,,4,5000,,0,0,0,,0,0,0,1.0,,,,");
        let rec = ProcedureLegRecord::parse(&line).unwrap();
        let compiled = compile(&rec).unwrap();
        assert!(matches!(compiled.leg, ProcedureLeg::Ha { .. }));
        assert_eq!(compiled.restriction.turn, Some(Turn::Left));
    }
}
