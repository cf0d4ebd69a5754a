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

use crate::fields::{AircraftClass, Coordinate, HoldDistanceType, LegType, RestrictionCode, SpecialFlag, TurnDirection};
use crate::{Error, Fields, Record};

/// `SID,<name>,<rwy_or_trans>,<segtype 1..6>`
#[derive(Clone, PartialEq, Debug)]
pub struct SidHeader<'a> {
    pub name: &'a str,
    pub rwy_or_trans: &'a str,
    pub seg_type: u8,
}

/// `STAR,<name>,<rwy_or_trans>,<segtype 1..9>`
#[derive(Clone, PartialEq, Debug)]
pub struct StarHeader<'a> {
    pub name: &'a str,
    pub rwy_or_trans: &'a str,
    pub seg_type: u8,
}

/// `APPTR,<appr_name>,<rwy>,<trans>`
#[derive(Clone, PartialEq, Debug)]
pub struct ApprTransHeader<'a> {
    pub appr_name: &'a str,
    pub rwy: &'a str,
    pub trans: &'a str,
}

/// `FINAL,<appr_name>,<rwy>,<appr_letter>[,...]`
#[derive(Clone, PartialEq, Debug)]
pub struct FinalHeader<'a> {
    pub appr_name: &'a str,
    pub rwy: &'a str,
    pub appr_letter: char,
}

#[derive(Clone, PartialEq, Debug)]
pub enum ProcedureHeader<'a> {
    Sid(SidHeader<'a>),
    Star(StarHeader<'a>),
    ApprTrans(ApprTransHeader<'a>),
    Final(FinalHeader<'a>),
}

impl<'a> ProcedureHeader<'a> {
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let mut f = Fields::new("procedure header", line);
        match f.next_required("kind")? {
            "SID" => Ok(Self::Sid(SidHeader {
                name: f.next_required("name")?,
                rwy_or_trans: f.next_required("rwy_or_trans")?,
                seg_type: f.next_required("seg_type")?.parse().map_err(|_| Error::NotANumber {
                    field: "seg_type",
                    value: line.to_string(),
                })?,
            })),
            "STAR" => Ok(Self::Star(StarHeader {
                name: f.next_required("name")?,
                rwy_or_trans: f.next_required("rwy_or_trans")?,
                seg_type: f.next_required("seg_type")?.parse().map_err(|_| Error::NotANumber {
                    field: "seg_type",
                    value: line.to_string(),
                })?,
            })),
            "APPTR" => Ok(Self::ApprTrans(ApprTransHeader {
                appr_name: f.next_required("appr_name")?,
                rwy: f.next_required("rwy")?,
                trans: f.next_required("trans")?,
            })),
            "FINAL" => {
                let appr_name = f.next_required("appr_name")?;
                let rwy = f.next_required("rwy")?;
                let appr_letter = f
                    .next_required("appr_letter")?
                    .chars()
                    .next()
                    .ok_or(Error::MissingField {
                        record: "FINAL",
                        field: "appr_letter",
                    })?;
                Ok(Self::Final(FinalHeader {
                    appr_name,
                    rwy,
                    appr_letter,
                }))
            }
            other => Err(Error::InvalidVariant {
                field: "kind",
                value: other.to_string(),
                expected: "SID, STAR, APPTR or FINAL",
            }),
        }
    }
}

/// One leg of a procedure's raw text, §4.D.1's CSV grammar.
///
/// Columns not meaningful for a given [`LegType`] are simply left empty in
/// the source line and surface here as `None`.
#[derive(Clone, PartialEq, Debug)]
pub struct ProcedureLegRecord<'a> {
    pub leg_type: LegType,
    pub waypoint_id: Option<&'a str>,
    pub waypoint_lat: Option<Coordinate>,
    pub waypoint_lon: Option<Coordinate>,
    pub turn: Option<TurnDirection>,
    pub navaid_id: Option<&'a str>,
    pub radial: Option<f64>,
    pub dme_distance: Option<f64>,
    pub course: Option<f64>,
    pub distance: Option<f64>,
    pub altitude_kind: RestrictionCode,
    pub altitude1: Option<i32>,
    pub altitude2: Option<i32>,
    pub speed_kind: RestrictionCode,
    pub speed_class: AircraftClass,
    pub speed1: Option<i32>,
    pub speed2: Option<i32>,
    pub special_flag: SpecialFlag,
    pub overfly: bool,
    pub hold_distance_type: Option<HoldDistanceType>,
    pub hold_value: Option<f64>,
    pub arc_radius: Option<f64>,
    pub center_id: Option<&'a str>,
    pub center_lat: Option<Coordinate>,
    pub center_lon: Option<Coordinate>,
}

impl<'a> Record<'a> for ProcedureLegRecord<'a> {
    fn parse(line: &'a str) -> Result<Self, Error> {
        let mut f = Fields::new("procedure leg", line);

        let leg_type: LegType = f.next_required("leg_type")?.parse()?;
        let waypoint_id = f.next_opt::<_, Error>(|s| Ok(s))?;
        let waypoint_lat = f.next_opt(Coordinate::parse_lat)?;
        let waypoint_lon = f.next_opt(Coordinate::parse_lon)?;
        let turn = f.next_opt(|s| TurnDirection::from_code("turn", s))?;
        let navaid_id = f.next_opt::<_, Error>(|s| Ok(s))?;
        let radial = f.next_opt(parse_f64("radial"))?;
        let dme_distance = f.next_opt(parse_f64("dme_distance"))?;
        let course = f.next_opt(parse_f64("course"))?;
        let distance = f.next_opt(parse_f64("distance"))?;

        let altitude_kind = RestrictionCode::from_code("altitude_kind", f.next_required("altitude_kind")?)?;
        let mut altitude1 = f.next_opt(parse_i32("altitude1"))?;
        let mut altitude2 = f.next_opt(parse_i32("altitude2"))?;
        // Some vendors code BT as (min, max), others as (max, min); detect and swap.
        if altitude_kind == RestrictionCode::Bt {
            if let (Some(a1), Some(a2)) = (altitude1, altitude2) {
                if a2 < a1 {
                    std::mem::swap(&mut altitude1, &mut altitude2);
                }
            }
        }

        let speed_kind = RestrictionCode::from_code("speed_kind", f.next_required("speed_kind")?)?;
        let speed_class = AircraftClass::from_code("speed_class", f.next_required("speed_class")?)?;
        let speed1 = f.next_opt(parse_i32("speed1"))?;
        let speed2 = f.next_opt(parse_i32("speed2"))?;

        let special_flag = SpecialFlag::from_code("special_flag", f.next_required("special_flag")?)?;
        let overfly = f.next_required("overfly")? == "1";

        let hold_distance_type = f.next_opt(|s| HoldDistanceType::from_code("hold_distance_type", s))?;
        let hold_value = f.next_opt(parse_f64("hold_value"))?;
        let arc_radius = f.next_opt(parse_f64("arc_radius"))?;
        let center_id = f.next_opt::<_, Error>(|s| Ok(s))?;
        let center_lat = f.next_opt(Coordinate::parse_lat)?;
        let center_lon = f.next_opt(Coordinate::parse_lon)?;

        Ok(Self {
            leg_type,
            waypoint_id,
            waypoint_lat,
            waypoint_lon,
            turn,
            navaid_id,
            radial,
            dme_distance,
            course,
            distance,
            altitude_kind,
            altitude1,
            altitude2,
            speed_kind,
            speed_class,
            speed1,
            speed2,
            special_flag,
            overfly,
            hold_distance_type,
            hold_value,
            arc_radius,
            center_id,
            center_lat,
            center_lon,
        })
    }
}

impl<'a> ProcedureLegRecord<'a> {
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        <Self as Record<'a>>::parse(line)
    }
}

fn parse_f64(field: &'static str) -> impl Fn(&str) -> Result<f64, Error> {
    move |s| {
        s.parse().map_err(|_| Error::NotANumber {
            field,
            value: s.to_string(),
        })
    }
}

fn parse_i32(field: &'static str) -> impl Fn(&str) -> Result<i32, Error> {
    move |s| {
        s.parse().map_err(|_| Error::NotANumber {
            field,
            value: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cf_leg() {
        let line = "CF,KLO,473030N,0084500E,0,KLO,090,,253,5.2,1,4000,,0,0,,,0,0,,,,,,";
        let leg = ProcedureLegRecord::parse(line).unwrap();
        assert_eq!(leg.leg_type, LegType::Cf);
        assert_eq!(leg.waypoint_id, Some("KLO"));
        assert_eq!(leg.course, Some(253.0));
        assert_eq!(leg.altitude_kind, RestrictionCode::At);
        assert_eq!(leg.altitude1, Some(4000));
        assert!(!leg.overfly);
    }

    #[test]
    fn swaps_reversed_bt_altitudes() {
        let line = "CA,,,,,,,,180,,4,3000,5000,0,0,,,0,0,,,,,,";
        let leg = ProcedureLegRecord::parse(line).unwrap();
        assert_eq!(leg.altitude1, Some(3000));
        assert_eq!(leg.altitude2, Some(5000));

        let reversed = "CA,,,,,,,,180,,4,5000,3000,0,0,,,0,0,,,,,,";
        let leg = ProcedureLegRecord::parse(reversed).unwrap();
        assert_eq!(leg.altitude1, Some(3000));
        assert_eq!(leg.altitude2, Some(5000));
    }

    #[test]
    fn parses_sid_header() {
        let header = ProcedureHeader::parse("SID,ALBI1D,ALL,2").unwrap();
        assert_eq!(
            header,
            ProcedureHeader::Sid(SidHeader {
                name: "ALBI1D",
                rwy_or_trans: "ALL",
                seg_type: 2,
            })
        );
    }
}
