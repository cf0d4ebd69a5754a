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

use crate::fields::Coordinate;
use crate::{Error, Fields, Record};

/// `A,<icao>,<name>,<lat>,<lon>,<elev_ft>,<trans_alt_ft>,<trans_lvl_ft>,<longest_rwy_ft>`
#[derive(Clone, PartialEq, Debug)]
pub struct AirportRecord<'a> {
    pub icao: &'a str,
    pub name: &'a str,
    pub lat: Coordinate,
    pub lon: Coordinate,
    pub elevation_ft: i32,
    pub transition_altitude_ft: Option<i32>,
    pub transition_level_ft: Option<i32>,
    pub longest_runway_ft: i32,
}

impl<'a> Record<'a> for AirportRecord<'a> {
    fn parse(line: &'a str) -> Result<Self, Error> {
        let mut f = Fields::new("airport", line);
        let _kind = f.next_required("kind")?;
        Ok(Self {
            icao: f.next_required("icao")?,
            name: f.next_required("name")?,
            lat: Coordinate::parse_lat(f.next_required("lat")?)?,
            lon: Coordinate::parse_lon(f.next_required("lon")?)?,
            elevation_ft: parse_i32("elevation_ft", f.next_required("elevation_ft")?)?,
            transition_altitude_ft: f.next_opt(|s| parse_i32("trans_alt_ft", s))?,
            transition_level_ft: f.next_opt(|s| parse_i32("trans_lvl_ft", s))?,
            longest_runway_ft: parse_i32("longest_rwy_ft", f.next_required("longest_rwy_ft")?)?,
        })
    }
}

/// `R,<rwy_id>,<hdg_deg>,<length_ft>,<width_ft>,<ils_avail>,<ils_freq_khz>,
/// <ils_course>,<thr_lat>,<thr_lon>,<thr_elev_ft>,<gs_deg>,<overfly_ft>,
/// <surface_code>,<usage_code>`
#[derive(Clone, PartialEq, Debug)]
pub struct RunwayRecord<'a> {
    pub id: &'a str,
    pub heading_deg: f64,
    pub length_ft: i32,
    pub width_ft: i32,
    pub ils_available: bool,
    pub ils_freq_khz: Option<i32>,
    pub ils_course_deg: Option<f64>,
    pub threshold_lat: Coordinate,
    pub threshold_lon: Coordinate,
    pub threshold_elev_ft: i32,
    pub glideslope_deg: Option<f64>,
    pub overfly_ft: Option<i32>,
    pub surface_code: &'a str,
    pub usage_code: &'a str,
}

impl<'a> Record<'a> for RunwayRecord<'a> {
    fn parse(line: &'a str) -> Result<Self, Error> {
        let mut f = Fields::new("runway", line);
        let _kind = f.next_required("kind")?;
        Ok(Self {
            id: f.next_required("rwy_id")?,
            heading_deg: parse_f64("hdg_deg", f.next_required("hdg_deg")?)?,
            length_ft: parse_i32("length_ft", f.next_required("length_ft")?)?,
            width_ft: parse_i32("width_ft", f.next_required("width_ft")?)?,
            ils_available: f.next_required("ils_avail")? == "1",
            ils_freq_khz: f.next_opt(|s| parse_i32("ils_freq_khz", s))?,
            ils_course_deg: f.next_opt(|s| parse_f64("ils_course", s))?,
            threshold_lat: Coordinate::parse_lat(f.next_required("thr_lat")?)?,
            threshold_lon: Coordinate::parse_lon(f.next_required("thr_lon")?)?,
            threshold_elev_ft: parse_i32("thr_elev_ft", f.next_required("thr_elev_ft")?)?,
            glideslope_deg: f.next_opt(|s| parse_f64("gs_deg", s))?,
            overfly_ft: f.next_opt(|s| parse_i32("overfly_ft", s))?,
            surface_code: f.next_required("surface_code")?,
            usage_code: f.next_required("usage_code")?,
        })
    }
}

/// `X,<airac_cycle>`
#[derive(Clone, PartialEq, Debug)]
pub struct CycleRecord<'a> {
    pub cycle: &'a str,
}

impl<'a> Record<'a> for CycleRecord<'a> {
    fn parse(line: &'a str) -> Result<Self, Error> {
        let mut f = Fields::new("cycle", line);
        let _kind = f.next_required("kind")?;
        Ok(Self {
            cycle: f.next_required("airac_cycle")?,
        })
    }
}

/// `A,<id>,<leg_count>` airway header, followed by `leg_count`
/// [`AirwaySegmentRecord`] lines.
#[derive(Clone, PartialEq, Debug)]
pub struct AirwayHeaderRecord<'a> {
    pub id: &'a str,
    pub leg_count: usize,
}

impl<'a> Record<'a> for AirwayHeaderRecord<'a> {
    fn parse(line: &'a str) -> Result<Self, Error> {
        let mut f = Fields::new("airway header", line);
        let _kind = f.next_required("kind")?;
        Ok(Self {
            id: f.next_required("id")?,
            leg_count: f
                .next_required("leg_count")?
                .parse()
                .map_err(|_| Error::NotANumber {
                    field: "leg_count",
                    value: line.to_string(),
                })?,
        })
    }
}

/// `S,<in_id>,<in_lat>,<in_lon>,<out_id>,<out_lat>,<out_lon>,<in_crs>,<out_crs>,<dist_nmi>`
#[derive(Clone, PartialEq, Debug)]
pub struct AirwaySegmentRecord<'a> {
    pub in_id: &'a str,
    pub in_lat: Coordinate,
    pub in_lon: Coordinate,
    pub out_id: &'a str,
    pub out_lat: Coordinate,
    pub out_lon: Coordinate,
    pub inbound_course_deg: f64,
    pub outbound_course_deg: f64,
    pub distance_nm: f64,
}

impl<'a> Record<'a> for AirwaySegmentRecord<'a> {
    fn parse(line: &'a str) -> Result<Self, Error> {
        let mut f = Fields::new("airway segment", line);
        let _kind = f.next_required("kind")?;
        Ok(Self {
            in_id: f.next_required("in_id")?,
            in_lat: Coordinate::parse_lat(f.next_required("in_lat")?)?,
            in_lon: Coordinate::parse_lon(f.next_required("in_lon")?)?,
            out_id: f.next_required("out_id")?,
            out_lat: Coordinate::parse_lat(f.next_required("out_lat")?)?,
            out_lon: Coordinate::parse_lon(f.next_required("out_lon")?)?,
            inbound_course_deg: parse_f64("in_crs", f.next_required("in_crs")?)?,
            outbound_course_deg: parse_f64("out_crs", f.next_required("out_crs")?)?,
            distance_nm: parse_f64("dist_nmi", f.next_required("dist_nmi")?)?,
        })
    }
}

/// `<id>,<name>,<freq>,<vor?>,<dme?>,<range_nmi>,<lat>,<lon>,<elev_ft>,<region>,<exclude>`
#[derive(Clone, PartialEq, Debug)]
pub struct NavaidRecord<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub freq: f64,
    pub is_vor: bool,
    pub is_dme: bool,
    pub range_nm: f64,
    pub lat: Coordinate,
    pub lon: Coordinate,
    pub elev_ft: i32,
    pub region: &'a str,
    pub exclude: bool,
}

/// The navaid variant derived from the raw flags and frequency, per §6.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum NavaidKind {
    Vor,
    Loc,
    Dme,
    Ndb,
    Llc,
}

impl<'a> NavaidRecord<'a> {
    pub fn kind(&self) -> NavaidKind {
        if self.is_vor {
            NavaidKind::Vor
        } else if (108.00..=111.95).contains(&self.freq) && is_odd_first_decimal(self.freq) {
            NavaidKind::Loc
        } else if self.is_dme {
            NavaidKind::Dme
        } else if (175.0..=1750.0).contains(&self.freq) {
            NavaidKind::Ndb
        } else {
            NavaidKind::Llc
        }
    }
}

fn is_odd_first_decimal(freq: f64) -> bool {
    let tenths = ((freq * 10.0).round() as i64).rem_euclid(10);
    tenths % 2 == 1
}

impl<'a> Record<'a> for NavaidRecord<'a> {
    fn parse(line: &'a str) -> Result<Self, Error> {
        let mut f = Fields::new("navaid", line);
        Ok(Self {
            id: f.next_required("id")?,
            name: f.next_required("name")?,
            freq: parse_f64("freq", f.next_required("freq")?)?,
            is_vor: f.next_required("vor")? == "1",
            is_dme: f.next_required("dme")? == "1",
            range_nm: parse_f64("range_nmi", f.next_required("range_nmi")?)?,
            lat: Coordinate::parse_lat(f.next_required("lat")?)?,
            lon: Coordinate::parse_lon(f.next_required("lon")?)?,
            elev_ft: parse_i32("elev_ft", f.next_required("elev_ft")?)?,
            region: f.next_required("region")?,
            exclude: f.next_required("exclude")? == "1",
        })
    }
}

/// `<id>,<lat>,<lon>,<region>`
#[derive(Clone, PartialEq, Debug)]
pub struct WaypointRecord<'a> {
    pub id: &'a str,
    pub lat: Coordinate,
    pub lon: Coordinate,
    pub region: &'a str,
}

impl<'a> Record<'a> for WaypointRecord<'a> {
    fn parse(line: &'a str) -> Result<Self, Error> {
        let mut f = Fields::new("waypoint", line);
        Ok(Self {
            id: f.next_required("id")?,
            lat: Coordinate::parse_lat(f.next_required("lat")?)?,
            lon: Coordinate::parse_lon(f.next_required("lon")?)?,
            region: f.next_required("region")?,
        })
    }
}

fn parse_i32(field: &'static str, s: &str) -> Result<i32, Error> {
    s.parse().map_err(|_| Error::NotANumber {
        field,
        value: s.to_string(),
    })
}

fn parse_f64(field: &'static str, s: &str) -> Result<f64, Error> {
    s.parse().map_err(|_| Error::NotANumber {
        field,
        value: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_airport() {
        let rec = AirportRecord::parse("A,LSZH,ZURICH,N47.4581,E008.5472,1416,10000,130,3700").unwrap();
        assert_eq!(rec.icao, "LSZH");
        assert_eq!(rec.transition_altitude_ft, Some(10000));
    }

    #[test]
    fn derives_navaid_kind() {
        let loc = NavaidRecord::parse("IKLO,KLOTEN LOC,109.95,0,0,25,N47.45,E008.55,1400,LS,0").unwrap();
        assert_eq!(loc.kind(), NavaidKind::Loc);

        let vor = NavaidRecord::parse("KLO,KLOTEN VOR,110.05,1,1,100,N47.45,E008.55,1400,LS,0").unwrap();
        assert_eq!(vor.kind(), NavaidKind::Vor);

        let ndb = NavaidRecord::parse("ZH,ZURICH NDB,350,0,0,50,N47.45,E008.55,1400,LS,0").unwrap();
        assert_eq!(ndb.kind(), NavaidKind::Ndb);
    }
}
