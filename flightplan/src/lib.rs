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

//! Flight-plan construction and serialization engine over an
//! aeronautical navigation database.
//!
//! [`nd`] loads the navdatabase and exposes it through
//! [`nd::NavigationDatabase`]; [`proc`] compiles procedure records into
//! leg lists and stitches them into route segments; [`fp`] assembles a
//! [`fp::FlightPlan`] out of those segments and keeps it internally
//! consistent through `route_leg_update`; [`route`] turns an ICAO route
//! string into the same segments; [`xplane`] is the one external writer
//! that carries semantic information beyond plain waypoint sequencing.

pub mod error;
pub mod fp;
pub mod geom;
pub mod measurements;
pub mod nd;
pub mod proc;
pub mod route;
pub mod xplane;

pub use error::{Error, Result};
pub use fp::FlightPlan;
