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

//! Stitching a procedure's compiled legs into a route segment (§4.D.2,
//! §4.D.4): entry-fix resolution, the copy loop, and leg cloning.
//!
//! `segment_proced` never assigns leg indices or a segment index — it
//! hands back a bare `(RouteSegment, Vec<Leg>, Option<Restriction>)`
//! triple. The flight-plan assembler splices the legs into its arena,
//! fixes up every `Leg::segment` back-pointer to the slot it actually
//! lands in, and merges the returned `Restriction` into the leg that
//! precedes the segment — exactly the "skipped-constraints channel"
//! §4.E.1 describes for chained transitions.

use crate::error::Result;
use crate::fp::segment::SegmentKind;
use crate::fp::{Leg, RouteSegment};
use crate::geom::Position;
use crate::proc::leg::{Fix, ProcedureLeg};
use crate::proc::procedure::{ProcLeg, Procedure};
use crate::proc::restriction::Restriction;
use std::rc::Rc;

fn is_entry_leg(pl: &ProcLeg) -> bool {
    matches!(pl.leg, ProcedureLeg::If { .. }) || pl.restriction.is_iaf()
}

fn matches_entry(first: &ProcedureLeg) -> bool {
    matches!(first, ProcedureLeg::If { .. } | ProcedureLeg::Cf { .. } | ProcedureLeg::Df { .. } | ProcedureLeg::Tf { .. })
}

/// §4.D.4: how a leg clone differs from the leg it was copied from.
fn clone_leg(pl: &ProcLeg, entry_fix: &Option<Fix>) -> Leg {
    let mut leg = Leg::new(pl.leg.clone(), pl.restriction, 0);
    match &pl.leg {
        ProcedureLeg::If { .. } | ProcedureLeg::Tf { .. } => {
            leg.src = entry_fix.clone();
        }
        _ => {
            if leg.src.is_none() {
                leg.src = entry_fix.clone();
            }
        }
    }
    leg
}

fn entry_fix_of(legs: &[Leg]) -> Fix {
    legs.iter()
        .find_map(|l| l.dst().cloned())
        .unwrap_or_else(|| Fix::new("", Position::new(0.0, 0.0)))
}

/// The result of `segment_proced`: the segment shell, its legs in
/// traversal order, and any restriction that belongs to the *prior*
/// segment's final leg (an entry fix's constraints, skipped here because
/// it duplicates the transition's own endpoint).
pub struct SegmentResult {
    pub segment: RouteSegment,
    pub legs: Vec<Leg>,
    pub carried_restriction: Option<Restriction>,
}

/// `segment_proced(src, proc)` (§4.D.2).
pub fn segment_proced(mut src: Option<Fix>, proc: &Rc<Procedure>) -> Result<SegmentResult> {
    proc.open()?;
    let proc_legs = proc.legs();

    let mut legs: Vec<Leg> = Vec::new();
    let mut carried: Option<Restriction> = None;
    let mut start = 0usize;

    if proc.proc_type.is_runway_specific_sid() {
        if src.is_none() {
            legs.push(Leg::discontinuity(0));
        }
    } else if proc.proc_type.is_runway_agnostic_sid() {
        legs.push(Leg::discontinuity(0));
        src = None;
    } else {
        if proc.proc_type.has_star_prefix() {
            if let Some(prefix) = proc.star_prefix.borrow().clone() {
                prefix.open()?;
                for pl in prefix.legs().iter() {
                    legs.push(clone_leg(pl, &src));
                }
            }
        }

        let first_matches_src = proc_legs
            .first()
            .and_then(|first| first.leg.explicit_src())
            .zip(src.as_ref())
            .is_some_and(|(explicit, s)| explicit.id == s.id);

        start = if first_matches_src {
            0
        } else if let (Some(first), Some(s)) = (proc_legs.first(), src.as_ref()) {
            if first.leg.dst().is_some_and(|d| d.id == s.id) && matches_entry(&first.leg) {
                carried = Some(first.restriction);
                1
            } else {
                let scanned = proc_legs
                    .iter()
                    .enumerate()
                    .find(|(_, pl)| is_entry_leg(pl) && pl.leg.dst().is_some_and(|d| d.id == s.id))
                    .map(|(i, pl)| (i + 1, pl.restriction));

                match scanned {
                    Some((next_index, restriction)) => {
                        carried = Some(restriction);
                        next_index
                    }
                    None => {
                        src = None;
                        legs.push(Leg::discontinuity(0));
                        if let Some(explicit) = proc_legs.first().and_then(|first| first.leg.explicit_src()) {
                            legs.push(Leg::new(ProcedureLeg::Tf { dst: explicit.clone() }, Restriction::none(), 0));
                        }
                        0
                    }
                }
            }
        } else {
            0
        };
    }

    let mut rolling_src = src;
    for pl in proc_legs[start..].iter() {
        if matches!(pl.leg, ProcedureLeg::If { .. }) && pl.leg.dst().zip(rolling_src.as_ref()).is_some_and(|(d, s)| d.id == s.id) {
            continue;
        }
        let leg = clone_leg(pl, &rolling_src);
        rolling_src = leg.dst().cloned().or(rolling_src);
        let append_break = leg.leg.is_manual_termination();
        legs.push(leg);
        if append_break {
            legs.push(Leg::discontinuity(0));
        }
    }

    let entry_waypoint = entry_fix_of(&legs);
    let kind = SegmentKind::Procedure { procedure: proc.clone(), entry_waypoint };
    Ok(SegmentResult { segment: RouteSegment::new(kind), legs, carried_restriction: carried })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proc::procedure::ProcedureType;

    #[test]
    fn runway_agnostic_sid_always_prepends_discontinuity() {
        let proc = Rc::new(Procedure::new(
            "ALBI1D",
            ProcedureType::Sid2,
            "TF,ALBI,N47.30,E008.40,0,,,,,,0,,,0,0,,,0,0,,,,,,\n".to_string(),
        ));
        let result = segment_proced(Some(Fix::new("RW16", Position::new(47.0, 8.0))), &proc).unwrap();
        assert!(result.legs[0].is_discontinuity());
        assert_eq!(result.legs.len(), 2);
    }

    #[test]
    fn manual_termination_leg_is_followed_by_discontinuity() {
        let proc = Rc::new(Procedure::new(
            "TEST1A",
            ProcedureType::Sid1,
            "FM,ALBI,N47.30,E008.40,0,,,,090,,0,,,0,0,,,0,0,,,,,,\n".to_string(),
        ));
        let result = segment_proced(Some(Fix::new("RW16", Position::new(47.0, 8.0))), &proc).unwrap();
        assert!(result.legs[0].leg.is_manual_termination());
        assert!(result.legs[1].is_discontinuity());
    }
}
