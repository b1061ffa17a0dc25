//! Minimum squared distance between task regions and player regions.

use super::PlayerDistance;
use crate::region::RegionCoord;
use std::collections::HashSet;

/// Smallest squared grid distance between any task region and any player
/// region, or [`PlayerDistance::Infinite`] if either side is empty.
///
/// Exhaustive pairwise scan. Both inputs are small in practice (a handful
/// of regions, a few dozen players), so no spatial index is kept.
pub fn min_squared_distance(
    regions: &HashSet<RegionCoord>,
    player_regions: &[RegionCoord],
) -> PlayerDistance {
    regions
        .iter()
        .flat_map(|region| {
            player_regions
                .iter()
                .map(move |player| region.distance_squared(*player))
        })
        .min()
        .map_or(PlayerDistance::Infinite, PlayerDistance::Finite)
}
