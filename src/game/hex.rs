//! Hex coordinate math: axial and cube coordinates, distance, and
//! pointy-top pixel conversion.

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Axial unit offsets of the 6 neighbors of a hex.
pub const HEX_DIRECTIONS: [AxialCoord; 6] = [
    AxialCoord::new(1, 0),
    AxialCoord::new(1, -1),
    AxialCoord::new(0, -1),
    AxialCoord::new(-1, 0),
    AxialCoord::new(-1, 1),
    AxialCoord::new(0, 1),
];

/// Axial hex coordinate. The implicit cube coordinate is `s = -q - r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

impl AxialCoord {
    pub const ORIGIN: AxialCoord = AxialCoord::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn s(self) -> i32 {
        -self.q - self.r
    }

    pub fn to_cube(self) -> CubeCoord {
        CubeCoord {
            q: self.q,
            r: self.r,
            s: self.s(),
        }
    }

    /// Cube distance: (|dq| + |dq + dr| + |dr|) / 2.
    pub fn distance(self, other: AxialCoord) -> i32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        (dq.abs() + (dq + dr).abs() + dr.abs()) / 2
    }

    /// Distance from the origin, i.e. the ring this hex lies on.
    pub fn ring(self) -> i32 {
        self.distance(AxialCoord::ORIGIN)
    }

    /// Rotate 60° clockwise about the origin: (q, r) -> (-r, q + r).
    pub fn rotate_cw(self) -> Self {
        Self::new(-self.r, self.q + self.r)
    }

    pub fn rotate_cw_by(self, steps: u8) -> Self {
        (0..steps % 6).fold(self, |c, _| c.rotate_cw())
    }

    pub fn neighbors(self) -> [AxialCoord; 6] {
        HEX_DIRECTIONS.map(|d| self + d)
    }

    /// Pixel center of this hex for a pointy-top layout with the given
    /// hex size (center-to-vertex).
    pub fn to_pixel(self, size: f64) -> (f64, f64) {
        let sqrt3 = 3f64.sqrt();
        let x = size * (sqrt3 * self.q as f64 + sqrt3 / 2.0 * self.r as f64);
        let y = size * (1.5 * self.r as f64);
        (x, y)
    }

    /// Hex containing the pixel `(x, y)` in a pointy-top layout.
    pub fn from_pixel(x: f64, y: f64, size: f64) -> Self {
        let sqrt3 = 3f64.sqrt();
        let q = (sqrt3 / 3.0 * x - y / 3.0) / size;
        let r = (2.0 / 3.0 * y) / size;
        CubeCoord::round(q, r, -q - r).to_axial()
    }
}

impl Add for AxialCoord {
    type Output = AxialCoord;

    fn add(self, rhs: AxialCoord) -> AxialCoord {
        AxialCoord::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for AxialCoord {
    type Output = AxialCoord;

    fn sub(self, rhs: AxialCoord) -> AxialCoord {
        AxialCoord::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl From<(i32, i32)> for AxialCoord {
    fn from((q, r): (i32, i32)) -> Self {
        AxialCoord::new(q, r)
    }
}

impl fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.q, self.r)
    }
}

/// Cube hex coordinate; always satisfies `q + r + s == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CubeCoord {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl CubeCoord {
    /// Returns None unless `q + r + s == 0`.
    pub fn new(q: i32, r: i32, s: i32) -> Option<Self> {
        (q + r + s == 0).then_some(Self { q, r, s })
    }

    pub fn to_axial(self) -> AxialCoord {
        AxialCoord::new(self.q, self.r)
    }

    /// Round fractional cube coordinates to the nearest hex. The component
    /// with the largest rounding error is recomputed from the other two.
    pub fn round(q: f64, r: f64, s: f64) -> Self {
        let mut rq = q.round();
        let mut rr = r.round();
        let rs = s.round();

        let dq = (rq - q).abs();
        let dr = (rr - r).abs();
        let ds = (rs - s).abs();

        if dq > dr && dq > ds {
            rq = -rr - rs;
        } else if dr > ds {
            rr = -rq - rs;
        }

        let q = rq as i32;
        let r = rr as i32;
        Self { q, r, s: -q - r }
    }
}

impl From<AxialCoord> for CubeCoord {
    fn from(c: AxialCoord) -> Self {
        c.to_cube()
    }
}
