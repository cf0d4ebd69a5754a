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

mod navdata;
mod procedure;

pub use navdata::{
    AirportRecord, AirwayHeaderRecord, AirwaySegmentRecord, CycleRecord, NavaidKind, NavaidRecord,
    RunwayRecord, WaypointRecord,
};
pub use procedure::{
    ApprTransHeader, FinalHeader, ProcedureHeader, ProcedureLegRecord, SidHeader, StarHeader,
};

/// One line of a procedure file, classified by its leading column.
pub enum ProcedureLine<'a> {
    Header(ProcedureHeader<'a>),
    Leg(&'a str),
}

/// Splits a procedure file's text into classified lines.
///
/// Header lines (`SID`, `STAR`, `APPTR`, `FINAL`) start a new procedure;
/// every other non-blank line is a leg record belonging to the procedure
/// most recently opened by a header line.
pub fn procedure_lines(text: &str) -> impl Iterator<Item = Result<ProcedureLine<'_>, crate::Error>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let head = line.split(',').next().unwrap_or("");
            match head {
                "SID" | "STAR" | "APPTR" | "FINAL" => {
                    ProcedureHeader::parse(line).map(ProcedureLine::Header)
                }
                _ => Ok(ProcedureLine::Leg(line)),
            }
        })
}
