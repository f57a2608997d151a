//! Axis-aligned overlap test used by every colliding scene.
//!
//! Touching edges count as overlapping.

use crate::types::Aabb;

/// True when the boxes overlap on both axes.
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.min_x <= b.max_x && a.max_x >= b.min_x && a.min_y <= b.max_y && a.max_y >= b.min_y
}

/// Overlap test for entities that may already be gone.
/// A missing box never collides.
pub fn overlaps_opt(a: Option<Aabb>, b: Option<Aabb>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => overlaps(&a, &b),
        _ => false,
    }
}
