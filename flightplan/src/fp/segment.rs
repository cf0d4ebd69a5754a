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

//! Route segments (§3, §4.E): the plan's grouping of legs into airway,
//! direct, discontinuity, procedure and missed-approach runs.
//!
//! A segment owns a leg list by index into [`crate::fp::FlightPlan`]'s
//! leg arena rather than by direct reference — legs already carry a
//! `segment` back-pointer to their own index in `flp.rte` (or to the
//! dedicated departure/arrival slot they live in), and indices survive
//! the insert/remove churn of §4.E.2 without fighting the borrow
//! checker over two owners of the same `Leg`.

use std::rc::Rc;

use crate::proc::{Fix, Procedure};

/// What a [`RouteSegment`] is made of, and the extra bookkeeping each
/// kind carries (§3's "Route segment" glossary entry).
#[derive(Clone, PartialEq, Debug)]
pub enum SegmentKind {
    /// A run of consecutive legs drawn from one named airway.
    Airway {
        airway_id: String,
        /// Index of the airway's own leg list at which this run starts.
        source_leg: usize,
        /// Index of the airway's own leg list at which this run ends
        /// (inclusive).
        destination_leg: usize,
    },
    /// A single leg with no database-recorded relationship to its
    /// neighbors: either a direct-to, a PBD/LLC synthetic fix, or the
    /// terminal leg into the arrival runway/airport.
    Direct,
    /// A manually inserted break (`ZZ`). Never holds more than one leg.
    Discontinuity,
    /// Legs materialized from a SID, STAR or approach/transition.
    Procedure { procedure: Rc<Procedure>, entry_waypoint: Fix },
    /// The final-approach procedure's `mapplegs`, kept distinct from its
    /// main `Procedure` segment so it can be dropped independently.
    MissedApproach { procedure: Rc<Procedure> },
}

impl SegmentKind {
    pub fn is_airway(&self) -> bool {
        matches!(self, Self::Airway { .. })
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, Self::Procedure { .. } | Self::MissedApproach { .. })
    }

    /// The procedure a procedure-kind segment belongs to, if any.
    pub fn procedure(&self) -> Option<&Rc<Procedure>> {
        match self {
            Self::Procedure { procedure, .. } | Self::MissedApproach { procedure } => Some(procedure),
            _ => None,
        }
    }
}

/// An ordered run of legs sharing one [`SegmentKind`] (§3, §4.E.3).
///
/// `legs` holds indices into the plan's leg arena, in traversal order.
/// An airway segment downgraded to direct by §4.E.4's endpoint pass
/// keeps its `legs` list untouched — only `kind` changes.
#[derive(Clone, PartialEq, Debug)]
pub struct RouteSegment {
    pub kind: SegmentKind,
    pub legs: Vec<usize>,
}

impl RouteSegment {
    pub fn new(kind: SegmentKind) -> Self {
        Self { kind, legs: Vec::new() }
    }

    pub fn airway(airway_id: impl Into<String>, source_leg: usize, destination_leg: usize) -> Self {
        Self::new(SegmentKind::Airway { airway_id: airway_id.into(), source_leg, destination_leg })
    }

    pub fn direct() -> Self {
        Self::new(SegmentKind::Direct)
    }

    pub fn discontinuity() -> Self {
        Self::new(SegmentKind::Discontinuity)
    }

    pub fn procedure(procedure: Rc<Procedure>, entry_waypoint: Fix) -> Self {
        Self::new(SegmentKind::Procedure { procedure, entry_waypoint })
    }

    pub fn missed_approach(procedure: Rc<Procedure>) -> Self {
        Self::new(SegmentKind::MissedApproach { procedure })
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    pub fn push_leg(&mut self, leg_index: usize) {
        self.legs.push(leg_index);
    }

    /// Removes a leg's index, used by `remove_leg` (§4.E.2) before the
    /// caller checks whether the segment emptied out.
    pub fn remove_leg(&mut self, leg_index: usize) {
        self.legs.retain(|&i| i != leg_index);
    }

    /// Downgrades an airway segment to a direct, clearing its airway
    /// fields (§4.E.4's endpoint-consistency pass). A no-op on any other
    /// kind.
    pub fn downgrade_to_direct(&mut self) {
        if self.kind.is_airway() {
            self.kind = SegmentKind::Direct;
        }
    }

    /// The identifier `split_airways` (§4.E.3) assigns a single-leg
    /// airway segment carved out of this one: `"{awy-id} {dst_id}"`.
    pub fn split_identifier(&self, dst_id: &str) -> Option<String> {
        match &self.kind {
            SegmentKind::Airway { airway_id, .. } => Some(format!("{airway_id} {dst_id}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airway_segment_downgrades_to_direct() {
        let mut seg = RouteSegment::airway("N871", 0, 2);
        seg.push_leg(5);
        seg.downgrade_to_direct();
        assert_eq!(seg.kind, SegmentKind::Direct);
        assert_eq!(seg.legs, vec![5]);
    }

    #[test]
    fn empty_segment_is_reported_empty() {
        let mut seg = RouteSegment::direct();
        assert!(seg.is_empty());
        seg.push_leg(0);
        assert!(!seg.is_empty());
        seg.remove_leg(0);
        assert!(seg.is_empty());
    }

    #[test]
    fn split_identifier_only_applies_to_airway_segments() {
        let awy = RouteSegment::airway("N871", 0, 1);
        assert_eq!(awy.split_identifier("KORED"), Some("N871 KORED".to_string()));
        assert_eq!(RouteSegment::direct().split_identifier("KORED"), None);
    }
}
