//! Grid locations and the Manhattan distance between them.
//!
//! Locations serialize as `row,column` both in event logs and in [std::fmt::Display].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An immutable cell on the simulation grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: i64,
    pub column: i64,
}

impl Location {
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }
}

/// L1 distance: `|Δrow| + |Δcolumn|`, saturating at `u64::MAX` for extreme coordinates.
pub fn manhattan_distance(origin: Location, destination: Location) -> u64 {
    origin
        .row
        .abs_diff(destination.row)
        .saturating_add(origin.column.abs_diff(destination.column))
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid location `{input}`: expected `row,column`")]
pub struct LocationParseError {
    pub input: String,
}

impl FromStr for Location {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LocationParseError {
            input: s.to_string(),
        };
        let (row, column) = s.split_once(',').ok_or_else(invalid)?;
        let row = row.trim().parse::<i64>().map_err(|_| invalid())?;
        let column = column.trim().parse::<i64>().map_err(|_| invalid())?;
        Ok(Self { row, column })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(span: i64) -> Vec<Location> {
        let mut cells = Vec::new();
        for row in -span..=span {
            for column in -span..=span {
                cells.push(Location::new(row, column));
            }
        }
        cells
    }

    #[test]
    fn distance_is_symmetric_and_zero_only_on_self() {
        let cells = grid(2);
        for a in &cells {
            assert_eq!(manhattan_distance(*a, *a), 0);
            for b in &cells {
                assert_eq!(manhattan_distance(*a, *b), manhattan_distance(*b, *a));
                if a != b {
                    assert!(manhattan_distance(*a, *b) > 0);
                }
            }
        }
    }

    #[test]
    fn distance_satisfies_triangle_inequality() {
        let cells = grid(2);
        for a in &cells {
            for b in &cells {
                for c in &cells {
                    assert!(
                        manhattan_distance(*a, *b) + manhattan_distance(*b, *c)
                            >= manhattan_distance(*a, *c)
                    );
                }
            }
        }
    }

    #[test]
    fn distance_adds_row_and_column_deltas() {
        assert_eq!(
            manhattan_distance(Location::new(1, 2), Location::new(4, -2)),
            7
        );
    }

    #[test]
    fn distance_saturates_at_grid_extremes() {
        let corner = Location::new(i64::MIN, i64::MIN);
        let opposite = Location::new(i64::MAX, i64::MAX);
        assert_eq!(manhattan_distance(corner, opposite), u64::MAX);
        assert_eq!(
            manhattan_distance(Location::new(i64::MIN, 0), Location::new(i64::MAX, 0)),
            u64::MAX
        );
    }

    #[test]
    fn parses_and_displays_row_column() {
        let location: Location = "4, 2".parse().expect("location");
        assert_eq!(location, Location::new(4, 2));
        assert_eq!(location.to_string(), "4,2");
        assert_eq!("-3,7".parse::<Location>(), Ok(Location::new(-3, 7)));
    }

    #[test]
    fn rejects_malformed_locations() {
        for input in ["", "4", "4;2", "a,2", "4,b", "1,2,3"] {
            let err = input.parse::<Location>().expect_err(input);
            assert_eq!(err.input, input);
        }
    }
}
