//! Math utilities
//!
//! Re-exports glam with the block-coordinate helpers the scheduler needs

pub use glam::*;

/// Horizontal block coordinate (x, z) containing a world position.
///
/// Floors each axis, so -0.5 lands in block -1. Non-finite components
/// saturate the way `as` casts do (NaN becomes 0).
pub fn block_xz(pos: DVec3) -> IVec2 {
    IVec2::new(pos.x.floor() as i32, pos.z.floor() as i32)
}
