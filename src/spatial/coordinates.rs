//! Grid and pixel coordinate types
//!
//! Grid coordinates address one tile cell; pixel coordinates address the
//! off-grid layer and collision rectangles. The y axis grows downward, so a
//! smaller y is higher terrain.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::io::configuration::TILE_SIZE_PX;

/// Integer tile-grid position used as the tilemap key
///
/// Ordering is x-major so iterating a map keyed by coordinates walks the level
/// column by column, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct GridCoordinate {
    /// Column index
    pub x: i32,
    /// Row index (grows downward)
    pub y: i32,
}

impl GridCoordinate {
    /// Create a coordinate from column and row
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by a grid offset
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Cell directly above
    pub const fn above(self) -> Self {
        self.offset(0, -1)
    }

    /// Cell directly below
    pub const fn below(self) -> Self {
        self.offset(0, 1)
    }

    /// Top-left pixel corner of this cell
    pub const fn to_pixel(self) -> PixelPosition {
        PixelPosition {
            x: self.x * TILE_SIZE_PX,
            y: self.y * TILE_SIZE_PX,
        }
    }

    /// Cell containing a floating-point pixel position
    pub fn containing(x: f32, y: f32) -> Self {
        let size = TILE_SIZE_PX as f32;
        Self {
            x: (x / size).floor() as i32,
            y: (y / size).floor() as i32,
        }
    }
}

impl From<[i32; 2]> for GridCoordinate {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<GridCoordinate> for [i32; 2] {
    fn from(coord: GridCoordinate) -> Self {
        [coord.x, coord.y]
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

/// Failure to parse a `"x;y"` coordinate key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateParseError {
    /// The rejected key text
    pub key: String,
}

impl fmt::Display for CoordinateParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not an \"x;y\" grid coordinate", self.key)
    }
}

impl std::error::Error for CoordinateParseError {}

impl FromStr for GridCoordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reject = || CoordinateParseError { key: s.to_string() };
        let (x, y) = s.split_once(';').ok_or_else(reject)?;
        let x = x.trim().parse::<i32>().ok().ok_or_else(reject)?;
        let y = y.trim().parse::<i32>().ok().ok_or_else(reject)?;
        Ok(Self::new(x, y))
    }
}

/// Integer pixel position used by the off-grid layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct PixelPosition {
    /// Horizontal pixel offset
    pub x: i32,
    /// Vertical pixel offset (grows downward)
    pub y: i32,
}

impl PixelPosition {
    /// Create a pixel position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by whole tiles
    pub const fn offset_tiles(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx * TILE_SIZE_PX,
            y: self.y + dy * TILE_SIZE_PX,
        }
    }
}

impl From<[i32; 2]> for PixelPosition {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<PixelPosition> for [i32; 2] {
    fn from(pos: PixelPosition) -> Self {
        [pos.x, pos.y]
    }
}

/// Axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl PixelRect {
    /// Rectangle covering exactly one grid cell
    pub const fn from_cell(coord: GridCoordinate) -> Self {
        let corner = coord.to_pixel();
        Self {
            x: corner.x,
            y: corner.y,
            width: TILE_SIZE_PX,
            height: TILE_SIZE_PX,
        }
    }

    /// Bottom edge (exclusive)
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Whether two rectangles overlap with non-zero area
    pub const fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
