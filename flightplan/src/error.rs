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

//! Error handling.
//!
//! Every setter, editor and writer returns a [`Result`]; on error it leaves
//! the [`FlightPlan`](crate::fp::FlightPlan) untouched and logs a diagnostic
//! line at `warn` or `error`, per §7 of the design.

use std::error;
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// The errno-style class a given [`Error`] maps to, for callers (e.g. a CLI)
/// that need a process exit code rather than a typed error.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Errno {
    /// `ENOMEM` — allocation failure.
    NoMem,
    /// `EINVAL` — missing identifier, unknown procedure, wrong-type leg,
    /// invalid restriction.
    Invalid,
    /// `EDOM` — infinity-of-intersections.
    Domain,
    /// `ERANGE` — ambiguous (equidistant) intersection.
    Range,
    /// `ENOENT` — missing file.
    NotFound,
    /// `EIO` — failed read.
    Io,
    /// `ENOSYS` — deliberately unimplemented.
    NotImplemented,
}

#[derive(Clone, PartialEq, Debug)]
pub enum Error {
    UnknownIdent(String),
    UnknownAirport(String),
    UnknownRunway { apt: String, rwy: String },
    UnknownProcedure { apt: String, name: String },
    SidRequiresRunway { apt: String, name: String, rwy: String },
    StarRequiresRunway { apt: String, name: String },
    ApproachRequiresRunway { apt: String },
    InvalidLegType { expected: &'static str },
    InvalidRestriction(String),
    InvalidRoute(String),
    AmbiguousTerminalArea { wp: String, a: String, b: String },
    UnexpectedRouteToken(String),
    UnknownRunwayInRoute { apt: String, rwy: String },
    InfinityOfIntersections,
    AmbiguousIntersection { src1: String, brg1: f64, src2: String, brg2: f64 },
    IntersectionNotFound,
    NotImplemented(&'static str),
    Arinc424(arinc424::Error),
}

impl Error {
    pub fn errno(&self) -> Errno {
        match self {
            Self::InfinityOfIntersections => Errno::Domain,
            Self::AmbiguousIntersection { .. } => Errno::Range,
            Self::NotImplemented(_) => Errno::NotImplemented,
            Self::Arinc424(_) => Errno::Io,
            _ => Errno::Invalid,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownIdent(id) => write!(f, "unknown identifier '{id}'"),
            Self::UnknownAirport(id) => write!(f, "unknown airport '{id}'"),
            Self::UnknownRunway { apt, rwy } => write!(f, "{apt}: unknown runway '{rwy}'"),
            Self::UnknownProcedure { apt, name } => write!(f, "{apt}: unknown procedure '{name}'"),
            Self::SidRequiresRunway { apt, name, rwy } => {
                write!(f, "flightplan: {apt}: invalid SID '{name}' for runway {rwy}")
            }
            Self::StarRequiresRunway { apt, name } => {
                write!(f, "flightplan: {apt}: STAR '{name}' requires a runway")
            }
            Self::ApproachRequiresRunway { apt } => {
                write!(f, "flightplan: {apt}: an approach requires an arrival runway")
            }
            Self::InvalidLegType { expected } => write!(f, "leg is not a {expected} leg"),
            Self::InvalidRestriction(msg) => write!(f, "invalid restriction: {msg}"),
            Self::InvalidRoute(msg) => write!(f, "invalid route: {msg}"),
            Self::AmbiguousTerminalArea { wp, a, b } => {
                write!(f, "{wp} is ambiguous between terminal areas {a} and {b}")
            }
            Self::UnexpectedRouteToken(tok) => write!(f, "unexpected route token '{tok}'"),
            Self::UnknownRunwayInRoute { apt, rwy } => {
                write!(f, "{apt}: unknown runway '{rwy}' in route")
            }
            Self::InfinityOfIntersections => write!(f, "great circles coincide: infinite intersections"),
            Self::AmbiguousIntersection { src1, brg1, src2, brg2 } => {
                write!(f, "{src1} {brg1}, {src2} {brg2}: intersection(s) ambiguous")
            }
            Self::IntersectionNotFound => write!(f, "no intersection found"),
            Self::NotImplemented(what) => write!(f, "{what} is not implemented"),
            Self::Arinc424(e) => write!(f, "{e}"),
        }
    }
}

impl error::Error for Error {}

impl From<arinc424::Error> for Error {
    fn from(e: arinc424::Error) -> Self {
        Self::Arinc424(e)
    }
}
