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

//! The xpfms dummy-waypoint synthesis (§4.D.3): turns a leg's abstract
//! geometry (a course, a radial, an arc) into navigable lat/lon fixes,
//! and advances the plan's predicted-altitude scalar alongside them.

use crate::error::Result;
use crate::fp::Leg;
use crate::geom::{geodesy, MagneticBearing, Position, TrueBearing};
use crate::measurements::{Altitude, Distance};
use crate::nd::wmm::Wmm;
use crate::nd::{Waypoint, WaypointKind};
use crate::proc::leg::ProcedureLeg;
use crate::proc::restriction::{AltitudeKind, Turn};

fn dummy(id: &str, position: Position, kind: WaypointKind) -> Waypoint {
    Waypoint::new(id, "", position, kind)
}

/// §4.D.3's climb/descent dummy for `CA`/`FA`/`VA`: a single terminator
/// placed at the horizontal distance implied by the altitude gained or
/// lost, at the leg's terminating course.
fn climb_descent_distance(src_alt: Altitude, target_alt: Altitude) -> Distance {
    let delta = (target_alt.as_feet() - src_alt.as_feet()) as f64;
    let ratio = if delta >= 0.0 { 11.0 } else { 15.0 };
    Distance::feet(delta.abs() * ratio)
}

/// Synthesizes the geometry dummies for one leg (first half of §4.D.3).
/// `src` is the rolling source position; `wmm` resolves magnetic courses
/// to true for the geodesy calls, which all operate on true bearings.
fn synthesize_geometry(leg: &mut Leg, src: Position, predicted_altitude: Altitude, wmm: &dyn Wmm) -> Result<()> {
    leg.xpfms.clear();
    match leg.leg.clone() {
        ProcedureLeg::Ca { course, altitude } | ProcedureLeg::Va { heading: course, altitude } => {
            let tb = wmm.magnetic_to_true(course, src);
            let dist = climb_descent_distance(predicted_altitude, altitude);
            let pos = geodesy::calcpos4pbd(src, tb, dist);
            leg.xpfms.push(dummy(&format!("{}01", leg.leg.type_code()), pos, WaypointKind::Pbd));
        }
        ProcedureLeg::Fa { fix, course, altitude } => {
            let tb = wmm.magnetic_to_true(course, fix.position);
            let dist = climb_descent_distance(predicted_altitude, altitude);
            let pos = geodesy::calcpos4pbd(fix.position, tb, dist);
            leg.xpfms.push(dummy("FA01", pos, WaypointKind::Pbd));
        }
        ProcedureLeg::Cd { course, navaid, dme_distance } | ProcedureLeg::Vd { heading: course, navaid, dme_distance } => {
            let tb = wmm.magnetic_to_true(course, src);
            if let Ok(pos) = geodesy::calcpos4pbpd(src, tb, navaid.position, dme_distance) {
                leg.xpfms.push(dummy("INT01", pos, WaypointKind::Int));
            }
        }
        ProcedureLeg::Fd { fix, course, navaid, dme_distance } => {
            let tb = wmm.magnetic_to_true(course, fix.position);
            if let Ok(pos) = geodesy::calcpos4pbpd(fix.position, tb, navaid.position, dme_distance) {
                leg.xpfms.push(dummy("INT01", pos, WaypointKind::Int));
            }
        }
        ProcedureLeg::Cr { course, navaid, radial } | ProcedureLeg::Vr { heading: course, navaid, radial } => {
            let tb = wmm.magnetic_to_true(course, src);
            let radial_tb = wmm.magnetic_to_true(radial, navaid.position);
            if let Ok(pos) = geodesy::calcpos4pbpb(src, tb, navaid.position, radial_tb) {
                leg.xpfms.push(dummy("PBX01", pos, WaypointKind::Pbx));
            }
        }
        ProcedureLeg::Fc { fix, course, distance } => {
            let tb = wmm.magnetic_to_true(course, fix.position);
            let pos = geodesy::calcpos4pbd(fix.position, tb, distance);
            leg.xpfms.push(dummy("PBD01", pos, WaypointKind::Pbd));
        }
        ProcedureLeg::Af { navaid, start_radial, end_radial, radius, .. } => {
            synthesize_arc(leg, navaid.position, start_radial, end_radial, radius, src, wmm);
        }
        ProcedureLeg::Rf { center, dst, .. } => {
            let start = geodesy::bearing(center.position, src);
            let end = geodesy::bearing(center.position, dst.position);
            let radius = geodesy::distance(center.position, src);
            let start_mag = wmm.true_to_magnetic(start, center.position);
            let end_mag = wmm.true_to_magnetic(end, center.position);
            synthesize_arc(leg, center.position, start_mag, end_mag, radius, src, wmm);
        }
        ProcedureLeg::Pi { fix, outbound_course, outbound_distance, turn_angle, .. } => {
            let tb = wmm.magnetic_to_true(outbound_course, fix.position);
            let p1 = geodesy::calcpos4pbd(fix.position, tb, outbound_distance);
            let h2 = TrueBearing::degrees(tb.0.as_degrees() + turn_angle);
            let p2 = geodesy::calcpos4pbd(p1, h2, Distance::meters(5000.0));
            let h3 = TrueBearing::degrees(tb.0.as_degrees() + turn_angle / 2.0);
            let p3 = geodesy::calcpos4pbd(p1, h3, Distance::meters(5000.0));
            leg.xpfms.push(dummy("PI01", p1, WaypointKind::Pbd));
            leg.xpfms.push(dummy("PI02", p2, WaypointKind::Pbd));
            leg.xpfms.push(dummy("PI03", p3, WaypointKind::Pbd));
        }
        _ => {}
    }
    Ok(())
}

/// ≥3 helper fixes spaced ≤~5° apart around an arc (`AF`); the first
/// helper is skipped when it would land within 1 nmi of `src` (this also
/// covers `RF`, whose caller passes `src` as the implicit first helper).
fn synthesize_arc(
    leg: &mut Leg,
    center: Position,
    start_radial: MagneticBearing,
    end_radial: MagneticBearing,
    radius: Distance,
    src: Position,
    wmm: &dyn Wmm,
) {
    let start_tb = wmm.magnetic_to_true(start_radial, center).0.as_degrees();
    let end_tb = wmm.magnetic_to_true(end_radial, center).0.as_degrees();
    let mut sweep = end_tb - start_tb;
    while sweep <= -180.0 {
        sweep += 360.0;
    }
    while sweep > 180.0 {
        sweep -= 360.0;
    }
    let steps = ((sweep.abs() / 5.0).ceil() as usize).max(1);
    for i in 1..=steps {
        let frac = i as f64 / steps as f64;
        let radial = TrueBearing::degrees(start_tb + sweep * frac);
        let pos = geodesy::calcpos4pbd(center, radial, radius);
        if i == 1 && geodesy::distance(pos, src).as_nautical_miles() < 1.0 {
            continue;
        }
        leg.xpfms.push(dummy(&format!("ARC{i:02}"), pos, WaypointKind::Pbd));
    }
}

/// The intercept and DF-helper passes (§4.D.3), run once the leg's own
/// geometry dummies exist.
fn synthesize_intercept(leg: &mut Leg, next: Option<&Leg>, src: Position, wmm: &dyn Wmm) {
    let Some(next) = next else { return };

    let src1 = leg.xpfms.last().map(|w| w.position).or_else(|| leg.dst().map(|f| f.position)).unwrap_or(src);
    let Some(src2) = next.dst().map(|f| f.position).or_else(|| next.xpfms.first().map(|w| w.position)) else { return };

    let Some(brg1) = terminating_true_bearing(leg, src, wmm) else { return };
    let next_src = next.src.as_ref().map(|f| f.position).unwrap_or(src1);
    let Some(brg2_raw) = terminating_true_bearing(next, next_src, wmm) else { return };
    let brg2 = geodesy::reciprocal(brg2_raw);

    if geodesy::distance(src1, src2).as_nautical_miles() < 3.0 && matches!(next.leg, ProcedureLeg::Cf { .. }) {
        return;
    }

    let result = geodesy::calcpos4pbpb(src1, brg1, src2, brg2);
    let too_far = |p: Position| geodesy::distance(src1, p).as_nautical_miles() > 99.0;

    let point = match result {
        Ok(p) if !too_far(p) => Some(p),
        _ => {
            let sign = if geodesy::bearing_angle(brg1, brg2) >= 0.0 { 90.0 } else { -90.0 };
            let retry_brg = TrueBearing::degrees(brg1.0.as_degrees() + sign);
            match geodesy::calcpos4pbpb(src1, retry_brg, src2, brg2) {
                Ok(p) if !too_far(p) => Some(p),
                _ => None,
            }
        }
    };

    if let Some(point) = point {
        if geodesy::bearing_angle(brg1, geodesy::bearing(src1, point)).abs() >= 6.0 {
            leg.xpfms.push(dummy("INTC01", point, WaypointKind::Int));
        }
    }
}

/// This leg's terminating bearing as a true course (§4.D.3's intercept
/// synthesis): the leg's own recorded course/heading when it has one,
/// else the dynamic course toward its own last dummy or fixed
/// destination (covers `CF`/`DF`/`IF`/`TF`/`CI`/`VI`, none of which carry
/// an explicit course field).
fn terminating_true_bearing(leg: &Leg, src: Position, wmm: &dyn Wmm) -> Option<TrueBearing> {
    if let Some(last) = leg.xpfms.last() {
        return Some(geodesy::bearing(src, last.position));
    }
    if let Some(mag) = leg.leg.terminating_course() {
        let at = leg.dst().map(|f| f.position).unwrap_or(src);
        return Some(wmm.magnetic_to_true(mag, at));
    }
    leg.dst().map(|dst| geodesy::bearing(src, dst.position))
}

/// Direct-to turn helpers (§4.D.3's "Direct-to (DF) helpers"), inserted
/// to avoid a sharp reversal when a `DF` (or `CF` immediately followed by
/// `DF`) turns sharply onto the next leg.
fn synthesize_df_helpers(leg: &mut Leg, next: Option<&Leg>, wmm: &dyn Wmm) {
    if !matches!(leg.leg, ProcedureLeg::Df { .. }) {
        return;
    }
    let Some(next) = next else { return };
    let Some(dst) = leg.dst().map(|f| f.position) else { return };
    let Some(next_dst) = next.dst().map(|f| f.position) else { return };
    // brg1 is the leg's terminating bearing: the last intercept dummy
    // `synthesize_intercept` may already have left on `leg.xpfms`, or
    // (absent one) the direct course onward, per §4.D.3.
    let brg1 = match leg.xpfms.last() {
        Some(w) => geodesy::bearing(dst, w.position),
        None => geodesy::bearing(dst, next_dst),
    };

    let sign = match leg.restriction.turn {
        Some(Turn::Left) => -1.0,
        _ => 1.0,
    };

    if geodesy::distance(dst, next_dst).as_meters() < 1.0 {
        let a = geodesy::calcpos4pbd(next_dst, brg1, Distance::meters(3000.0));
        let b = geodesy::calcpos4pbd(next_dst, TrueBearing::degrees(brg1.0.as_degrees() + sign * 60.0), Distance::meters(3000.0));
        leg.xpfms.push(dummy("DF01", a, WaypointKind::Pbd));
        leg.xpfms.push(dummy("DF02", b, WaypointKind::Pbd));
        return;
    }

    let direct_course = geodesy::bearing(dst, next_dst);
    let angle = geodesy::bearing_angle(brg1, direct_course).abs();
    let offsets: &[f64] = if angle > 270.0 {
        &[90.0, 135.0, 180.0]
    } else if angle > 180.0 {
        &[90.0, 135.0]
    } else if angle > 120.0 {
        &[90.0]
    } else {
        &[]
    };
    if leg.restriction.is_fly_over() {
        return;
    }
    for (i, offset) in offsets.iter().enumerate() {
        let hdg = TrueBearing::degrees(brg1.0.as_degrees() + sign * offset);
        let pos = geodesy::calcpos4pbd(dst, hdg, Distance::meters(3000.0));
        leg.xpfms.push(dummy(&format!("DF{:02}", i + 1), pos, WaypointKind::Pbd));
    }
}

/// §4.D.3's altitude profile: advances `predicted_altitude` by this
/// leg's horizontal distance, at climb/descent rates that depend on the
/// current altitude band and whether this segment is an arrival.
fn advance_altitude(leg: &Leg, horizontal: Distance, predicted_altitude: Altitude, cruise: Altitude, is_arrival: bool) -> Altitude {
    let nm = horizontal.as_nautical_miles();
    let cur_ft = predicted_altitude.as_feet() as f64;

    let mut next_ft = if is_arrival {
        let rate = if cur_ft > 10_000.0 { 15.0 } else { 18.0 };
        cur_ft - nm * 6076.12 / rate
    } else {
        let rate = if cur_ft <= 10_000.0 {
            10.0
        } else if cur_ft <= 20_000.0 {
            15.0
        } else if cur_ft <= 30_000.0 {
            30.0
        } else if cur_ft <= 40_000.0 {
            45.0
        } else if cur_ft <= 50_000.0 {
            60.0
        } else {
            75.0
        };
        (cur_ft + nm * 6076.12 / rate).min(cruise.as_feet() as f64)
    };

    if let Some(floor) = leg.leg.altitude_floor() {
        next_ft = next_ft.max(floor.as_feet() as f64);
    }
    if let Some(kind) = leg.restriction.altitude_kind {
        next_ft = match kind.kind {
            AltitudeKind::At => kind.min.map(|v| v.as_feet() as f64).unwrap_or(next_ft),
            AltitudeKind::Above => kind.min.map(|v| next_ft.max(v.as_feet() as f64)).unwrap_or(next_ft),
            AltitudeKind::Below => kind.max.map(|v| next_ft.min(v.as_feet() as f64)).unwrap_or(next_ft),
            AltitudeKind::Between => {
                let mut v = next_ft;
                if let Some(min) = kind.min {
                    v = v.max(min.as_feet() as f64);
                }
                if let Some(max) = kind.max {
                    v = v.min(max.as_feet() as f64);
                }
                v
            }
            AltitudeKind::No => next_ft,
        };
    }
    Altitude::feet(next_ft.round() as i32)
}

/// Total horizontal distance of a leg's resolved geometry: the chain of
/// dummies (if any), ending at the leg's own destination.
fn leg_horizontal_distance(leg: &Leg, src: Position) -> Distance {
    let mut total = 0.0;
    let mut from = src;
    for dummy in &leg.xpfms {
        total += geodesy::distance(from, dummy.position).as_meters();
        from = dummy.position;
    }
    if let Some(dst) = leg.dst() {
        total += geodesy::distance(from, dst.position).as_meters();
    }
    Distance::meters(total)
}

/// Runs the full §4.D.3 pass over one leg: geometry synthesis, intercept,
/// DF helpers, then the altitude advance.
pub fn synthesize(
    leg: &mut Leg,
    src: Position,
    next: Option<&Leg>,
    predicted_altitude: Altitude,
    cruise: Altitude,
    is_arrival: bool,
    wmm: &dyn Wmm,
) -> Result<Altitude> {
    synthesize_geometry(leg, src, predicted_altitude, wmm)?;
    synthesize_intercept(leg, next, src, wmm);
    synthesize_df_helpers(leg, next, wmm);
    let horizontal = leg_horizontal_distance(leg, src);
    Ok(advance_altitude(leg, horizontal, predicted_altitude, cruise, is_arrival))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nd::wmm::test_double::FixedDeclination;
    use crate::proc::restriction::Restriction;

    #[test]
    fn ca_leg_synthesizes_single_climb_dummy() {
        let mut leg = Leg::new(
            ProcedureLeg::Ca { course: MagneticBearing::degrees(90.0), altitude: Altitude::feet(5000) },
            Restriction::none(),
            0,
        );
        let wmm = FixedDeclination(0.0);
        synthesize_geometry(&mut leg, Position::new(47.0, 8.0), Altitude::feet(1000), &wmm).unwrap();
        assert_eq!(leg.xpfms.len(), 1);
        assert_eq!(leg.xpfms[0].kind, WaypointKind::Pbd);
    }

    #[test]
    fn climb_altitude_advances_toward_cruise_but_never_past_it() {
        let leg = Leg::new(ProcedureLeg::Tf { dst: crate::proc::leg::Fix::new("A", Position::new(47.1, 8.0)) }, Restriction::none(), 0);
        let next = advance_altitude(&leg, Distance::nautical_miles(100.0), Altitude::feet(9000), Altitude::feet(9500), false);
        assert!(next.as_feet() <= 9500);
    }

    #[test]
    fn arrival_descent_reduces_altitude() {
        let leg = Leg::new(ProcedureLeg::Tf { dst: crate::proc::leg::Fix::new("A", Position::new(47.1, 8.0)) }, Restriction::none(), 0);
        let next = advance_altitude(&leg, Distance::nautical_miles(20.0), Altitude::feet(9000), Altitude::feet(9000), true);
        assert!(next.as_feet() < 9000);
    }
}
