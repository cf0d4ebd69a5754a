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

use crate::geom::Position;
use crate::measurements::{Distance, Frequency};

/// The variant tag a [`Waypoint`] carries.
///
/// `Toc`/`Tod` (top-of-climb / top-of-descent) are pseudo-kinds: no
/// database ever stores one, but the vertical-profile pass in
/// [`crate::proc::interpret`] synthesizes waypoints tagged this way so
/// writers can mark them distinctly.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum WaypointKind {
    /// Airport reference point.
    Apt,
    Ndb,
    Vor,
    /// ILS localizer.
    Loc,
    /// Enroute or terminal fix.
    Fix,
    Dme,
    /// Runway threshold.
    Rwy,
    /// Raw latitude/longitude, not otherwise identified.
    Llc,
    /// Airport matched only via a navdatabase index lookup (no ICAO match).
    Xpa,
    /// Place/bearing/distance synthetic fix.
    Pbd,
    /// Place/bearing–place/bearing intersection synthetic fix.
    Pbx,
    /// Place/bearing–place/distance intersection synthetic fix.
    Int,
    Toc,
    Tod,
}

impl WaypointKind {
    /// Sort priority used by [`crate::nd::Database`] lookups:
    /// `FIX > (APT/XPA) > VOR > NDB > DME > rest`.
    pub fn sort_priority(self) -> u8 {
        match self {
            Self::Fix => 0,
            Self::Apt | Self::Xpa => 1,
            Self::Vor => 2,
            Self::Ndb => 3,
            Self::Dme => 4,
            _ => 5,
        }
    }
}

/// A navigable fix: identifier, two-letter region, position, and variant.
///
/// Identifier uniqueness is not guaranteed across the database — two
/// `VOR`s named `KLO` in different regions are common — so every lookup
/// in [`crate::nd`] accepts an optional position tiebreaker.
#[derive(Clone, PartialEq, Debug)]
pub struct Waypoint {
    pub id: String,
    pub region: String,
    pub position: Position,
    pub kind: WaypointKind,
    pub frequency: Option<Frequency>,
    pub range: Option<Distance>,
}

impl Waypoint {
    pub fn new(id: impl Into<String>, region: impl Into<String>, position: Position, kind: WaypointKind) -> Self {
        Self {
            id: id.into(),
            region: region.into(),
            position,
            kind,
            frequency: None,
            range: None,
        }
    }

    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_range(mut self, range: Distance) -> Self {
        self.range = Some(range);
        self
    }
}
