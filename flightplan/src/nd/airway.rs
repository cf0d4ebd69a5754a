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

use crate::geom::{Position, TrueBearing};
use crate::measurements::Distance;

/// One leg of a named airway.
///
/// Airway legs are *not* pre-resolved to database waypoints: the in/out
/// identifier and recorded position are the lookup key, and resolution
/// happens lazily in [`crate::nd::Database::get_waypoint`] only when a
/// leg is actually traversed (an airway may run through hundreds of
/// fixes that never get visited by any flight plan).
#[derive(Clone, PartialEq, Debug)]
pub struct AirwayLeg {
    pub in_id: String,
    pub in_position: Position,
    pub out_id: String,
    pub out_position: Position,
    pub inbound_course: TrueBearing,
    pub outbound_course: TrueBearing,
    pub length: Distance,
}

/// A named ordered chain of [`AirwayLeg`]s.
#[derive(Clone, PartialEq, Debug)]
pub struct Airway {
    pub id: String,
    pub legs: Vec<AirwayLeg>,
}

impl Airway {
    pub fn new(id: impl Into<String>, legs: Vec<AirwayLeg>) -> Self {
        Self { id: id.into(), legs }
    }

    /// `true` if `waypoint_id` is the in-endpoint of some leg — i.e. a
    /// valid place to join this airway outbound.
    pub fn is_valid_startpoint(&self, waypoint_id: &str) -> bool {
        self.legs.iter().any(|leg| leg.in_id == waypoint_id)
    }

    /// The index of the first leg, at or after `from`, whose out-endpoint
    /// matches `dst_id`.
    pub fn find_leg_to(&self, from: usize, dst_id: &str) -> Option<usize> {
        self.legs[from..]
            .iter()
            .position(|leg| leg.out_id == dst_id)
            .map(|i| i + from)
    }

    /// The index of the first leg, at or after `from`, whose in-endpoint
    /// matches `src_id`.
    pub fn find_leg_from(&self, from: usize, src_id: &str) -> Option<usize> {
        self.legs[from..].iter().position(|leg| leg.in_id == src_id).map(|i| i + from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(in_id: &str, out_id: &str) -> AirwayLeg {
        AirwayLeg {
            in_id: in_id.to_string(),
            in_position: Position::new(0.0, 0.0),
            out_id: out_id.to_string(),
            out_position: Position::new(0.0, 1.0),
            inbound_course: TrueBearing::degrees(90.0),
            outbound_course: TrueBearing::degrees(90.0),
            length: Distance::nautical_miles(60.0),
        }
    }

    #[test]
    fn finds_startpoint_and_destination_leg() {
        let awy = Airway::new("N871", vec![leg("SOSAL", "TELNO"), leg("TELNO", "KORED")]);
        assert!(awy.is_valid_startpoint("SOSAL"));
        assert!(!awy.is_valid_startpoint("KORED"));
        assert_eq!(awy.find_leg_to(0, "KORED"), Some(1));
    }
}
