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

//! The procedure interpreter (§4.C, §4.D): leg model, restriction
//! validation, record→leg compilation, procedure materialization,
//! segment stitching, and xpfms dummy-waypoint synthesis.

pub mod interpret;
pub mod leg;
pub mod procedure;
pub mod record;
pub mod restriction;
pub mod xpfms;

pub use leg::{Fix, HoldLength, ProcedureLeg};
pub use procedure::{ApproachType, ProcLeg, Procedure, ProcedureType};
pub use restriction::{AircraftClass, AirspeedKind, AltitudeKind, Restriction, Turn, WaypointConstraint};
