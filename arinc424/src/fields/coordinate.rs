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

use crate::Error;

/// A latitude or longitude as coded in vendor CSV records: a sign-bearing
/// decimal degrees value, e.g. `N53.6334` or `-053.6334`.
///
/// Vendor files coming from an ARINC 424 source instead encode
/// `DDMMSSH`/`DDDMMSSH` (degrees, minutes, seconds, hemisphere); both forms
/// are accepted.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Coordinate(pub f64);

impl Coordinate {
    pub fn parse_lat(s: &str) -> Result<Self, Error> {
        Self::parse(s, 2, b'N', b'S')
    }

    pub fn parse_lon(s: &str) -> Result<Self, Error> {
        Self::parse(s, 3, b'E', b'W')
    }

    fn parse(s: &str, deg_digits: usize, pos: u8, neg: u8) -> Result<Self, Error> {
        let s = s.trim();
        let err = || Error::InvalidCoordinate {
            value: s.to_string(),
        };

        // Trailing hemisphere: ARINC-424-style "473030N" / "0084500E".
        if let Some(hemi) = s.bytes().last() {
            if hemi == pos || hemi == neg {
                let digits = &s[..s.len() - 1];
                let value = Self::magnitude(digits, deg_digits).ok_or_else(err)?;
                return Ok(Self(if hemi == neg { -value } else { value }));
            }
        }

        // Leading hemisphere: "N47.4581".
        if let Some(hemi) = s.bytes().next() {
            if hemi == pos || hemi == neg {
                let digits = &s[1..];
                let value = Self::magnitude(digits, deg_digits).ok_or_else(err)?;
                return Ok(Self(if hemi == neg { -value } else { value }));
            }
        }

        s.parse::<f64>().map(Self).map_err(|_| err())
    }

    fn magnitude(digits: &str, deg_digits: usize) -> Option<f64> {
        if digits.len() == deg_digits + 4 && digits.bytes().all(|b| b.is_ascii_digit()) {
            // DDMMSS / DDDMMSS
            let deg: f64 = digits[..deg_digits].parse().ok()?;
            let min: f64 = digits[deg_digits..deg_digits + 2].parse().ok()?;
            let sec: f64 = digits[deg_digits + 2..].parse().ok()?;
            Some(deg + min / 60.0 + sec / 3600.0)
        } else {
            digits.parse().ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_degree_minute_second() {
        let lat = Coordinate::parse_lat("473030N").unwrap();
        assert!((lat.0 - 47.508333).abs() < 1e-4);

        let lon = Coordinate::parse_lon("0084500E").unwrap();
        assert!((lon.0 - 8.75).abs() < 1e-4);
    }

    #[test]
    fn parses_decimal_degrees() {
        let lat = Coordinate::parse_lat("N53.6334").unwrap();
        assert!((lat.0 - 53.6334).abs() < 1e-6);

        let lon = Coordinate::parse_lon("-009.9882").unwrap();
        assert!((lon.0 + 9.9882).abs() < 1e-6);
    }
}
