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

//! Lat/lon route token parsing (§6's `waypoint_llc` table, used by the
//! route parser's step 4). A waypoint identifier can encode a position
//! directly instead of naming a navdatabase fix; every format in the
//! table folds to a handful of fixed-width layouts once interior
//! slashes are stripped, plus one variable-width decimal form and one
//! five-character compact-oceanic form that keeps its slash-free shape.

use crate::geom::Position;

/// Parses a route token as a lat/lon identifier, trying the decimal
/// form first (it is the only one a stray `/` inside a fixed-width
/// pattern could be confused with), then the five-character compact
/// form, then the slash-stripped fixed-width forms.
pub fn parse(token: &str) -> Option<Position> {
    parse_decimal(token).or_else(|| parse_compact(token)).or_else(|| parse_fixed_width(token))
}

fn parse_decimal(token: &str) -> Option<Position> {
    let (lat_s, lon_s) = token.split_once('/')?;
    if !(lat_s.contains('.') || lon_s.contains('.') || lat_s.starts_with('-') || lon_s.starts_with('-')) {
        return None;
    }
    let lat = parse_signed(lat_s, 'N', 'S')?;
    let lon = parse_signed(lon_s, 'E', 'W')?;
    Some(Position::new(lat, lon))
}

fn parse_signed(s: &str, pos: char, neg: char) -> Option<f64> {
    if let Some(stripped) = s.strip_suffix(pos) {
        stripped.parse().ok()
    } else if let Some(stripped) = s.strip_suffix(neg) {
        stripped.parse::<f64>().ok().map(|v| -v)
    } else {
        s.parse().ok()
    }
}

/// `4466N` / `44N66` — a two-digit latitude and a two-digit longitude
/// remainder, disambiguated only by one hemisphere letter. The
/// longitude is assumed to be the `1xx` band west of Greenwich, which
/// is the band every worked NAT-track example in the table falls in;
/// a longitude already 100 or greater is left alone.
fn parse_compact(token: &str) -> Option<Position> {
    if token.len() != 5 || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let chars: Vec<char> = token.chars().collect();
    let (lat_digits, lon_digits, hemi) = if chars[..4].iter().all(char::is_ascii_digit) && is_hemisphere(chars[4]) {
        (&token[0..2], &token[2..4], chars[4])
    } else if chars[0].is_ascii_digit() && chars[1].is_ascii_digit() && is_hemisphere(chars[2]) && chars[3].is_ascii_digit() && chars[4].is_ascii_digit() {
        (&token[0..2], &token[3..5], chars[2])
    } else {
        return None;
    };
    let lat: f64 = lat_digits.parse().ok()?;
    let lon_raw: f64 = lon_digits.parse().ok()?;
    let lon = if lon_raw < 100.0 { lon_raw + 100.0 } else { lon_raw };
    let lat_signed = if hemi == 'S' { -lat } else { lat };
    Some(Position::new(lat_signed, -lon))
}

fn is_hemisphere(c: char) -> bool {
    matches!(c, 'N' | 'S' | 'E' | 'W')
}

/// The fixed-width forms, once every `/` is stripped: 7 characters is
/// degrees only, 11 is degrees+minutes, 15 is degrees+minutes+seconds
/// or degrees+decimal-minutes (distinguished by the presence of `.`).
fn parse_fixed_width(token: &str) -> Option<Position> {
    let stripped: String = token.chars().filter(|&c| c != '/').collect();
    match stripped.len() {
        7 => parse_degrees(&stripped),
        11 => parse_degrees_minutes(&stripped),
        15 if stripped.contains('.') => parse_degrees_decimal_minutes(&stripped),
        15 => parse_degrees_minutes_seconds(&stripped),
        _ => None,
    }
}

fn parse_degrees(s: &str) -> Option<Position> {
    let chars: Vec<char> = s.chars().collect();
    let lat_hemi = chars.first().copied()?;
    let lon_hemi = chars.get(3).copied()?;
    let lat: f64 = s.get(1..3)?.parse().ok()?;
    let lon: f64 = s.get(4..7)?.parse().ok()?;
    Some(Position::new(signed(lat, lat_hemi), signed(lon, lon_hemi)))
}

fn parse_degrees_minutes(s: &str) -> Option<Position> {
    let chars: Vec<char> = s.chars().collect();
    let lat_hemi = chars.first().copied()?;
    let lon_hemi = chars.get(5).copied()?;
    let lat_deg: f64 = s.get(1..3)?.parse().ok()?;
    let lat_min: f64 = s.get(3..5)?.parse().ok()?;
    let lon_deg: f64 = s.get(6..9)?.parse().ok()?;
    let lon_min: f64 = s.get(9..11)?.parse().ok()?;
    Some(Position::new(signed(lat_deg + lat_min / 60.0, lat_hemi), signed(lon_deg + lon_min / 60.0, lon_hemi)))
}

fn parse_degrees_minutes_seconds(s: &str) -> Option<Position> {
    let chars: Vec<char> = s.chars().collect();
    let lat_hemi = chars.first().copied()?;
    let lon_hemi = chars.get(7).copied()?;
    let lat_deg: f64 = s.get(1..3)?.parse().ok()?;
    let lat_min: f64 = s.get(3..5)?.parse().ok()?;
    let lat_sec: f64 = s.get(5..7)?.parse().ok()?;
    let lon_deg: f64 = s.get(8..11)?.parse().ok()?;
    let lon_min: f64 = s.get(11..13)?.parse().ok()?;
    let lon_sec: f64 = s.get(13..15)?.parse().ok()?;
    let lat = lat_deg + lat_min / 60.0 + lat_sec / 3600.0;
    let lon = lon_deg + lon_min / 60.0 + lon_sec / 3600.0;
    Some(Position::new(signed(lat, lat_hemi), signed(lon, lon_hemi)))
}

fn parse_degrees_decimal_minutes(s: &str) -> Option<Position> {
    let chars: Vec<char> = s.chars().collect();
    let lat_hemi = chars.first().copied()?;
    let lon_hemi = chars.get(7).copied()?;
    let lat_deg: f64 = s.get(1..3)?.parse().ok()?;
    let lat_min: f64 = s.get(3..7)?.parse().ok()?;
    let lon_deg: f64 = s.get(8..11)?.parse().ok()?;
    let lon_min: f64 = s.get(11..15)?.parse().ok()?;
    let lat = lat_deg + lat_min / 60.0;
    let lon = lon_deg + lon_min / 60.0;
    Some(Position::new(signed(lat, lat_hemi), signed(lon, lon_hemi)))
}

fn signed(value: f64, hemisphere: char) -> f64 {
    if hemisphere == 'S' || hemisphere == 'W' {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(pos: Position, lat: f64, lon: f64) {
        assert!((pos.lat_deg() - lat).abs() < 1e-6, "{} vs {lat}", pos.lat_deg());
        assert!((pos.lon_deg() - lon).abs() < 1e-6, "{} vs {lon}", pos.lon_deg());
    }

    #[test]
    fn parses_degrees_only() {
        close(parse("N46W066").unwrap(), 46.0, -66.0);
    }

    #[test]
    fn parses_degrees_only_with_slash() {
        close(parse("N46/W066").unwrap(), 46.0, -66.0);
    }

    #[test]
    fn parses_degrees_and_minutes() {
        close(parse("N4411W06622").unwrap(), 44.0 + 11.0 / 60.0, -(66.0 + 22.0 / 60.0));
    }

    #[test]
    fn parses_degrees_minutes_seconds() {
        close(parse("N441154W0662206").unwrap(), 44.0 + 11.0 / 60.0 + 54.0 / 3600.0, -(66.0 + 22.0 / 60.0 + 6.0 / 3600.0));
    }

    #[test]
    fn parses_degrees_decimal_minutes() {
        close(parse("N4411.9W06622.1").unwrap(), 44.0 + 11.9 / 60.0, -(66.0 + 22.1 / 60.0));
    }

    #[test]
    fn parses_signed_decimal_form() {
        close(parse("-44.4/-111.1").unwrap(), -44.4, -111.1);
    }

    #[test]
    fn parses_compact_oceanic() {
        close(parse("44N66").unwrap(), 44.0, -166.0);
        close(parse("4466N").unwrap(), 44.0, -166.0);
    }

    #[test]
    fn rejects_unrelated_tokens() {
        assert!(parse("MOLUS").is_none());
        assert!(parse("N871").is_none());
    }
}
