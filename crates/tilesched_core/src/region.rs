//! Region grid coordinates

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer coordinate of one cell in a map's region grid.
///
/// `z` is the second horizontal axis; equality and hashing are by value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionCoord {
    pub x: i32,
    pub z: i32,
}

impl RegionCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Squared Euclidean distance in region-grid units.
    ///
    /// Per-axis deltas are taken in 64-bit, so each squared term fits a `u64`
    /// for any pair of `i32` coordinates; only the final sum can saturate.
    pub fn distance_squared(self, other: RegionCoord) -> u64 {
        let dx = (self.x as i64 - other.x as i64).unsigned_abs();
        let dz = (self.z as i64 - other.z as i64).unsigned_abs();
        (dx * dx).saturating_add(dz * dz)
    }
}

impl From<IVec2> for RegionCoord {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<RegionCoord> for IVec2 {
    fn from(r: RegionCoord) -> Self {
        IVec2::new(r.x, r.z)
    }
}

impl fmt::Display for RegionCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = RegionCoord::new(0, 0);
        let b = RegionCoord::new(5, 5);
        assert_eq!(a.distance_squared(b), 50);
        assert_eq!(b.distance_squared(a), 50);
        assert_eq!(a.distance_squared(a), 0);
    }

    #[test]
    fn distance_does_not_overflow_at_extremes() {
        let a = RegionCoord::new(i32::MIN, 0);
        let b = RegionCoord::new(i32::MAX, 0);
        let span = u32::MAX as u64;
        assert_eq!(a.distance_squared(b), span * span);

        let c = RegionCoord::new(i32::MIN, i32::MIN);
        let d = RegionCoord::new(i32::MAX, i32::MAX);
        assert_eq!(c.distance_squared(d), u64::MAX);
    }
}
