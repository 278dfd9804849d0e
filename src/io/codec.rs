// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker placement and drop-zone geometry text encodings.
//!
//! Placements travel as a single flat field: `"x1,y1;x2,y2;..."` with no
//! trailing separator. Drop-zone geometry uses the same building blocks,
//! one string per shape: circle `"cx,cy;r"`, rectangle `"x,y;w,h"`,
//! polygon `"x1,y1;x2,y2;..."`.
//!
//! Polygon parsing is deliberately forgiving: segments that do not match
//! `int,int` or that fall outside the image are dropped without error.
//! Stored answer fields keep that legacy tolerance on the geometry side
//! only; [`decode`] itself rejects malformed pairs.

use crate::util::geometry::{ImageSize, Point};
use thiserror::Error;

/// A malformed coordinate or geometry string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("malformed coordinate pair {0:?}, expected \"x,y\"")]
    BadPair(String),
}

/// Encode an ordered list of placements as `"x1,y1;x2,y2;..."`.
///
/// An empty list encodes to the empty string.
pub fn encode(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(";")
}

/// Decode a `"x1,y1;x2,y2;..."` field back into an ordered list.
///
/// The empty string decodes to an empty list. Any segment that is not
/// exactly two integers fails the whole decode.
pub fn decode(s: &str) -> Result<Vec<Point>, FormatError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(';')
        .map(|part| parse_pair(part).ok_or_else(|| FormatError::BadPair(part.to_string())))
        .collect()
}

/// Parse circle geometry `"cx,cy;r"`; `None` if the pattern does not match.
pub fn parse_circle(s: &str) -> Option<(Point, i32)> {
    let (center, radius) = s.split_once(';')?;
    Some((parse_pair(center)?, parse_int(radius)?))
}

/// Parse rectangle geometry `"x,y;w,h"`; `None` if the pattern does not match.
pub fn parse_rectangle(s: &str) -> Option<(Point, i32, i32)> {
    let (origin, dims) = s.split_once(';')?;
    let origin = parse_pair(origin)?;
    let dims = parse_pair(dims)?;
    Some((origin, dims.x, dims.y))
}

/// Parse polygon geometry `"x1,y1;x2,y2;..."`.
///
/// Segments that do not match `int,int` or whose point lies outside the
/// image are silently dropped; the caller decides whether enough vertices
/// survive to draw anything.
pub fn parse_polygon(s: &str, size: ImageSize) -> Vec<Point> {
    s.split(';')
        .filter_map(parse_pair)
        .filter(|p| size.contains(*p))
        .collect()
}

fn parse_pair(part: &str) -> Option<Point> {
    let (x, y) = part.split_once(',')?;
    Some(Point::new(parse_int(x)?, parse_int(y)?))
}

fn parse_int(s: &str) -> Option<i32> {
    s.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_pairs() {
        let points = vec![Point::new(10, 20), Point::new(30, 40)];
        assert_eq!(encode(&points), "10,20;30,40");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_decode_pairs() {
        assert_eq!(
            decode("10,20;30,40").unwrap(),
            vec![Point::new(10, 20), Point::new(30, 40)]
        );
        assert_eq!(decode("").unwrap(), Vec::<Point>::new());
    }

    #[test]
    fn test_decode_encode_roundtrip() {
        let points = vec![Point::new(1, 1), Point::new(55, 7), Point::new(100, 100)];
        assert_eq!(decode(&encode(&points)).unwrap(), points);
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        assert!(decode("10;20").is_err());
        assert!(decode("10,20;").is_err());
        assert!(decode("10,20;30,40,50").is_err());
        assert!(decode("a,b").is_err());
    }

    #[test]
    fn test_parse_circle() {
        assert_eq!(parse_circle("50,50;20"), Some((Point::new(50, 50), 20)));
        assert_eq!(parse_circle("50,50"), None);
        assert_eq!(parse_circle("50;50;20"), None);
    }

    #[test]
    fn test_parse_rectangle() {
        assert_eq!(
            parse_rectangle("10,20;30,40"),
            Some((Point::new(10, 20), 30, 40))
        );
        assert_eq!(parse_rectangle("10,20;30"), None);
        assert_eq!(parse_rectangle("10,20"), None);
    }

    #[test]
    fn test_parse_polygon_drops_bad_segments() {
        let size = ImageSize::new(100, 100);
        // The second vertex is off the image and is filtered out.
        assert_eq!(
            parse_polygon("10,10;200,10;50,90", size),
            vec![Point::new(10, 10), Point::new(50, 90)]
        );
        // Malformed segments are dropped, not fatal.
        assert_eq!(
            parse_polygon("10,10;bogus;20,20;30", size),
            vec![Point::new(10, 10), Point::new(20, 20)]
        );
    }
}
