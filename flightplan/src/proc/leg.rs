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

//! The 22-variant procedure leg datatype (§4.C, §6).
//!
//! One explicit match over all 22 variants is kept in each consumer
//! (dummy synthesis, cloning, identifier text) rather than spread across
//! trait impls per variant, so the correspondence to the ARINC 424 leg
//! grammar stays self-documenting.

use crate::geom::{MagneticBearing, Position};
use crate::measurements::{Altitude, Distance};
use crate::proc::restriction::Turn;

/// An endpoint already resolved to a navdatabase position.
#[derive(Clone, PartialEq, Debug)]
pub struct Fix {
    pub id: String,
    pub position: Position,
}

impl Fix {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self { id: id.into(), position }
    }
}

/// How a holding pattern's outbound leg is measured.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum HoldLength {
    Distance(Distance),
    Time(f64),
}

/// One ARINC 424 procedure leg primitive.
///
/// The two-letter name follows the convention in the glossary: first
/// letter is the terminator family (course/heading/from-fix/direct/
/// track/arc/radius-to-fix/initial/hold/procedure-turn), second is the
/// termination (fix/altitude/manual/DME-distance/radial/intercept/
/// course-distance).
#[derive(Clone, PartialEq, Debug)]
pub enum ProcedureLeg {
    /// Initial fix: establishes the procedure's entry point.
    If { fix: Fix },
    /// Track to fix.
    Tf { dst: Fix },
    /// Course to fix.
    Cf { dst: Fix, course: MagneticBearing, distance: Distance },
    /// Direct to fix.
    Df { dst: Fix },
    /// Fix to altitude.
    Fa { fix: Fix, course: MagneticBearing, altitude: Altitude },
    /// Fix to manual termination.
    Fm { fix: Fix, course: MagneticBearing },
    /// Fix to distance along course.
    Fc { fix: Fix, course: MagneticBearing, distance: Distance },
    /// Fix to DME distance.
    Fd { fix: Fix, course: MagneticBearing, navaid: Fix, dme_distance: Distance },
    /// Course to altitude.
    Ca { course: MagneticBearing, altitude: Altitude },
    /// Course to intercept (the next leg).
    Ci { course: MagneticBearing },
    /// Course to DME distance.
    Cd { course: MagneticBearing, navaid: Fix, dme_distance: Distance },
    /// Course to radial.
    Cr { course: MagneticBearing, navaid: Fix, radial: MagneticBearing },
    /// Heading to altitude (vector).
    Va { heading: MagneticBearing, altitude: Altitude },
    /// Heading to intercept (vector).
    Vi { heading: MagneticBearing },
    /// Heading to DME distance (vector).
    Vd { heading: MagneticBearing, navaid: Fix, dme_distance: Distance },
    /// Heading to radial (vector).
    Vr { heading: MagneticBearing, navaid: Fix, radial: MagneticBearing },
    /// Heading to manual termination (vector).
    Vm { heading: MagneticBearing },
    /// Arc to fix, around a navaid.
    Af {
        navaid: Fix,
        start_radial: MagneticBearing,
        end_radial: MagneticBearing,
        radius: Distance,
        dst: Fix,
        turn: Turn,
    },
    /// Constant-radius arc to fix.
    Rf { center: Fix, radius: Distance, dst: Fix, turn: Turn },
    /// Procedure turn.
    Pi {
        fix: Fix,
        outbound_course: MagneticBearing,
        outbound_distance: Distance,
        limit_distance: Distance,
        turn_angle: f64,
    },
    /// Hold to fix (exits when able).
    Hf { fix: Fix, inbound_course: MagneticBearing, leg_length: HoldLength, turn: Turn },
    /// Hold to altitude.
    Ha { fix: Fix, inbound_course: MagneticBearing, leg_length: HoldLength, altitude: Altitude, turn: Turn },
    /// Hold to manual termination.
    Hm { fix: Fix, inbound_course: MagneticBearing, leg_length: HoldLength, turn: Turn },
    /// A manually-inserted discontinuity. Not an ARINC leg type; used by
    /// the assembler to mark a break in an otherwise-continuous leg list.
    Zz,
}

impl ProcedureLeg {
    pub fn type_code(&self) -> &'static str {
        match self {
            Self::If { .. } => "IF",
            Self::Tf { .. } => "TF",
            Self::Cf { .. } => "CF",
            Self::Df { .. } => "DF",
            Self::Fa { .. } => "FA",
            Self::Fm { .. } => "FM",
            Self::Fc { .. } => "FC",
            Self::Fd { .. } => "FD",
            Self::Ca { .. } => "CA",
            Self::Ci { .. } => "CI",
            Self::Cd { .. } => "CD",
            Self::Cr { .. } => "CR",
            Self::Va { .. } => "VA",
            Self::Vi { .. } => "VI",
            Self::Vd { .. } => "VD",
            Self::Vr { .. } => "VR",
            Self::Vm { .. } => "VM",
            Self::Af { .. } => "AF",
            Self::Rf { .. } => "RF",
            Self::Pi { .. } => "PI",
            Self::Hf { .. } => "HF",
            Self::Ha { .. } => "HA",
            Self::Hm { .. } => "HM",
            Self::Zz => "ZZ",
        }
    }

    pub fn is_discontinuity(&self) -> bool {
        matches!(self, Self::Zz)
    }

    pub fn is_manual_termination(&self) -> bool {
        matches!(self, Self::Fm { .. } | Self::Vm { .. } | Self::Hm { .. })
    }

    /// The endpoint this leg terminates at, when it has one fixed by the
    /// record itself (course/heading-terminated legs have none until
    /// dummy synthesis computes one).
    pub fn dst(&self) -> Option<&Fix> {
        match self {
            Self::If { fix } => Some(fix),
            Self::Tf { dst } | Self::Df { dst } => Some(dst),
            Self::Cf { dst, .. } => Some(dst),
            Self::Af { dst, .. } | Self::Rf { dst, .. } => Some(dst),
            Self::Hf { fix, .. } | Self::Ha { fix, .. } | Self::Hm { fix, .. } => Some(fix),
            Self::Fa { fix, .. } | Self::Fm { fix, .. } | Self::Fc { fix, .. } | Self::Fd { fix, .. } => Some(fix),
            Self::Pi { fix, .. } => Some(fix),
            _ => None,
        }
    }

    /// The explicit source fix this leg starts from, when the record
    /// names one (`FROM-fix` terminator families, plus arcs/holds/PI).
    pub fn explicit_src(&self) -> Option<&Fix> {
        match self {
            Self::Fa { fix, .. } | Self::Fm { fix, .. } | Self::Fc { fix, .. } | Self::Fd { fix, .. } => Some(fix),
            Self::Pi { fix, .. } => Some(fix),
            _ => None,
        }
    }

    /// The magnetic course this leg terminates on, for legs that carry
    /// one directly (not arcs, not fix-terminated legs without a course).
    pub fn terminating_course(&self) -> Option<MagneticBearing> {
        match self {
            Self::Cf { course, .. }
            | Self::Fa { course, .. }
            | Self::Fm { course, .. }
            | Self::Fc { course, .. }
            | Self::Fd { course, .. }
            | Self::Ca { course, .. }
            | Self::Ci { course }
            | Self::Cd { course, .. }
            | Self::Cr { course, .. } => Some(*course),
            Self::Va { heading, .. }
            | Self::Vi { heading }
            | Self::Vd { heading, .. }
            | Self::Vr { heading, .. }
            | Self::Vm { heading } => Some(*heading),
            _ => None,
        }
    }

    pub fn altitude_floor(&self) -> Option<Altitude> {
        match self {
            Self::Ca { altitude, .. } | Self::Fa { altitude, .. } | Self::Va { altitude, .. } | Self::Ha { altitude, .. } => {
                Some(*altitude)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_code_round_trips_variant_name() {
        let leg = ProcedureLeg::Cf {
            dst: Fix::new("KLO", Position::new(47.45, 8.55)),
            course: MagneticBearing::degrees(253.0),
            distance: Distance::nautical_miles(4.5),
        };
        assert_eq!(leg.type_code(), "CF");
        assert_eq!(leg.dst().unwrap().id, "KLO");
    }

    #[test]
    fn fm_and_vm_are_manual_termination() {
        assert!(ProcedureLeg::Fm { fix: Fix::new("A", Position::new(0.0, 0.0)), course: MagneticBearing::degrees(0.0) }
            .is_manual_termination());
        assert!(!ProcedureLeg::Tf { dst: Fix::new("A", Position::new(0.0, 0.0)) }.is_manual_termination());
    }
}
