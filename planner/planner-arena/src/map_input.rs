//! Obstacle list parsing.
//!
//! Two textual forms are accepted:
//!
//! - The compact map string `MAP=[[id,x,y,f],...]`, where `f` is a numeric
//!   facing code (`0` north, `1` south, `2` east, `3` west).
//! - A JSON list of records `{"id": 1, "x": 5, "y": 10, "dir": "N"}`.
//!   Single-quoted keys and strings are accepted.
//!
//! Both produce [`ObstacleSpec`]s. Any failure is
//! [`PlannerError::MalformedMap`].
//!
//! # Example
//!
//! ```
//! use planner_arena::{parse_map_string, parse_obstacle_json};
//! use planner_types::Facing;
//!
//! let obstacles = parse_map_string("MAP=[[1,06,12,0],[2,15,03,3]]").unwrap();
//! assert_eq!(obstacles.len(), 2);
//! assert_eq!((obstacles[0].x, obstacles[0].y), (6, 12));
//! assert_eq!(obstacles[1].facing, Facing::West);
//!
//! let obstacles = parse_obstacle_json(r#"[{"id": 4, "x": 9, "y": 9, "dir": "E"}]"#).unwrap();
//! assert_eq!(obstacles[0].facing, Facing::East);
//! ```

use planner_types::{Facing, PlannerError};
use regex::Regex;
use serde::Deserialize;

use crate::arena::ObstacleSpec;

const MAP_PREFIX: &str = "MAP=";

/// Parses a `MAP=[[id,x,y,f],...]` string.
///
/// Whitespace around numbers and leading zeros are accepted. `MAP=[]`
/// yields no obstacles.
///
/// # Errors
///
/// [`PlannerError::MalformedMap`] if the prefix, brackets, numbers or facing
/// codes are invalid, or if text other than separators sits between records.
pub fn parse_map_string(input: &str) -> Result<Vec<ObstacleSpec>, PlannerError> {
    let body = input
        .trim()
        .strip_prefix(MAP_PREFIX)
        .ok_or_else(|| PlannerError::malformed_map(format!("missing {MAP_PREFIX} prefix")))?;
    let inner = body
        .trim()
        .strip_prefix('[')
        .and_then(|b| b.strip_suffix(']'))
        .ok_or_else(|| PlannerError::malformed_map("obstacle list must be enclosed in brackets"))?;

    let record = Regex::new(r"\[\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\]")
        .map_err(|e| PlannerError::malformed_map(e.to_string()))?;

    let mut obstacles = Vec::new();
    let mut cursor = 0;
    for captures in record.captures_iter(inner) {
        let Some(whole) = captures.get(0) else { continue };
        check_separator(&inner[cursor..whole.start()])?;
        cursor = whole.end();

        let field = |i: usize| captures.get(i).map_or("", |m| m.as_str());
        let id = parse_number::<u32>(field(1), "id")?;
        let x = parse_number::<i32>(field(2), "x")?;
        let y = parse_number::<i32>(field(3), "y")?;
        let code = parse_number::<u8>(field(4), "facing")?;
        let facing = Facing::from_map_code(code)
            .ok_or_else(|| PlannerError::malformed_map(format!("unknown facing code {code}")))?;
        obstacles.push(ObstacleSpec::new(id, x, y, facing));
    }
    check_separator(&inner[cursor..])?;

    Ok(obstacles)
}

fn check_separator(text: &str) -> Result<(), PlannerError> {
    if text.chars().all(|c| c == ',' || c.is_whitespace()) {
        Ok(())
    } else {
        Err(PlannerError::malformed_map(format!("unexpected text {:?}", text.trim())))
    }
}

fn parse_number<T: std::str::FromStr>(text: &str, name: &str) -> Result<T, PlannerError> {
    text.parse()
        .map_err(|_| PlannerError::malformed_map(format!("invalid {name} {text:?}")))
}

#[derive(Debug, Deserialize)]
struct ObstacleRecord {
    id: u32,
    x: i32,
    y: i32,
    dir: String,
}

/// Parses a JSON list of `{id, x, y, dir}` records.
///
/// `dir` is a single letter `N`, `E`, `S` or `W`.
///
/// # Errors
///
/// [`PlannerError::MalformedMap`] on invalid JSON or an unknown direction.
pub fn parse_obstacle_json(input: &str) -> Result<Vec<ObstacleSpec>, PlannerError> {
    let normalized = input.replace('\'', "\"");
    let records: Vec<ObstacleRecord> =
        serde_json::from_str(&normalized).map_err(|e| PlannerError::malformed_map(e.to_string()))?;

    records
        .into_iter()
        .map(|record| -> Result<ObstacleSpec, PlannerError> {
            let mut letters = record.dir.trim().chars();
            let facing = match (letters.next(), letters.next()) {
                (Some(letter), None) => Facing::from_letter(letter),
                _ => None,
            }
            .ok_or_else(|| PlannerError::malformed_map(format!("unknown direction {:?}", record.dir)))?;
            Ok(ObstacleSpec::new(record.id, record.x, record.y, facing))
        })
        .collect()
}

/// Formats obstacles back into a `MAP=` string.
///
/// # Example
///
/// ```
/// use planner_arena::{ObstacleSpec, format_map_string};
/// use planner_types::Facing;
///
/// let map = format_map_string(&[ObstacleSpec::new(1, 6, 12, Facing::South)]);
/// assert_eq!(map, "MAP=[[1,6,12,1]]");
/// ```
#[must_use]
pub fn format_map_string(obstacles: &[ObstacleSpec]) -> String {
    let records: Vec<String> = obstacles
        .iter()
        .map(|o| format!("[{},{},{},{}]", o.id, o.x, o.y, o.facing.map_code()))
        .collect();
    format!("{MAP_PREFIX}[{}]", records.join(","))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_string_codes() {
        let obstacles = parse_map_string("MAP=[[1,1,1,0],[2,2,2,1],[3,3,3,2],[4,4,4,3]]").unwrap();
        let facings: Vec<Facing> = obstacles.iter().map(|o| o.facing).collect();
        assert_eq!(facings, vec![Facing::North, Facing::South, Facing::East, Facing::West]);
        assert_eq!(obstacles[3].id, 4);
    }

    #[test]
    fn test_parse_map_string_whitespace() {
        let obstacles = parse_map_string("  MAP=[ [ 7 , 10, 11, 2 ] , [8,3,4,0] ]\n").unwrap();
        assert_eq!(obstacles.len(), 2);
        assert_eq!(obstacles[0], ObstacleSpec::new(7, 10, 11, Facing::East));
    }

    #[test]
    fn test_parse_map_string_empty() {
        assert!(parse_map_string("MAP=[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_map_string_missing_prefix() {
        let err = parse_map_string("[[1,1,1,0]]").unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("MAP="));
    }

    #[test]
    fn test_parse_map_string_bad_facing() {
        let err = parse_map_string("MAP=[[1,1,1,7]]").unwrap_err();
        assert!(err.to_string().contains("facing code 7"));
    }

    #[test]
    fn test_parse_map_string_garbage_between_records() {
        assert!(parse_map_string("MAP=[[1,1,1,0] oops [2,2,2,0]]").is_err());
        assert!(parse_map_string("MAP=[[1,1,1]]").is_err());
        assert!(parse_map_string("MAP=[[1,-1,1,0]]").is_err());
    }

    #[test]
    fn test_format_then_parse() {
        let original = vec![
            ObstacleSpec::new(1, 6, 12, Facing::North),
            ObstacleSpec::new(5, 18, 3, Facing::West),
        ];
        assert_eq!(parse_map_string(&format_map_string(&original)).unwrap(), original);
    }

    #[test]
    fn test_parse_json_single_quotes() {
        let obstacles = parse_obstacle_json("[{'id': 2, 'x': 4, 'y': 15, 'dir': 's'}]").unwrap();
        assert_eq!(obstacles, vec![ObstacleSpec::new(2, 4, 15, Facing::South)]);
    }

    #[test]
    fn test_parse_json_bad_direction() {
        assert!(parse_obstacle_json(r#"[{"id": 2, "x": 4, "y": 15, "dir": "NE"}]"#).is_err());
        assert!(parse_obstacle_json(r#"[{"id": 2, "x": 4}]"#).is_err());
        assert!(parse_obstacle_json("not json").is_err());
    }
}
