//! Collision detection and response for circular agents in a walled grid
//!
//! Two passes run for every moving agent each tick:
//! - predictive blocking: each movement axis is probed independently before it
//!   is committed, so an agent slides along a wall instead of stopping dead
//! - penetration correction: any remaining circle/box overlap is pushed out

use glam::Vec2;

use super::grid::{Face, Wall};
use super::raycast::SolidQuery;

/// Squared center-to-box distance below which the center counts as inside
const INSIDE_EPSILON_SQ: f32 = 1e-8;

/// Overlap smaller than this is left alone (keeps correction idempotent)
const PENETRATION_SLOP: f32 = 1e-5;

/// Result of a circle/box overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the circle overlaps the box
    pub hit: bool,
    /// Closest point on the box surface
    pub point: Vec2,
    /// Separation direction (box toward circle center)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a circle against a wall box.
///
/// Reports a miss when the center itself is inside the box; that degenerate
/// case has no separation direction and is handled by [`push_out_of_wall`].
pub fn circle_wall_collision(center: Vec2, radius: f32, wall: &Wall) -> CollisionResult {
    let closest = wall.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq <= INSIDE_EPSILON_SQ || dist_sq >= radius * radius {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    CollisionResult {
        hit: true,
        point: closest,
        normal: delta / dist,
        penetration: radius - dist,
    }
}

/// Move a center that lies inside a wall just past the nearest face
pub fn push_out_of_wall(center: Vec2, wall: &Wall, clearance: f32) -> Vec2 {
    let (face, depth) = wall.nearest_face(center);
    center + face.normal() * (depth + clearance)
}

/// Like [`push_out_of_wall`], but never through a face that another wall in
/// `walls` sits flush against. Falls back to the nearest face when the box is
/// sealed on all four sides.
pub fn push_out_of_wall_run(center: Vec2, wall: &Wall, walls: &[Wall], clearance: f32) -> Vec2 {
    let open = |face: Face| !walls.iter().any(|w| wall.is_flush_neighbor(w, face));
    match wall.nearest_face_where(center, open) {
        Some((face, depth)) => center + face.normal() * (depth + clearance),
        None => push_out_of_wall(center, wall, clearance),
    }
}

/// Distance from a wall center beyond which a circle cannot touch the wall
#[inline]
fn broadphase_reach(radius: f32, wall: &Wall) -> f32 {
    wall.half_extent * std::f32::consts::SQRT_2 + radius
}

/// Remove overlap between a circle and every nearby wall.
///
/// A center found inside a wall is first moved past the nearest face that is
/// not shared with a neighbouring wall, then the normal overlap push takes it
/// to `radius` from that face. Exiting through an open face keeps the center
/// out of the next cell of a wall run, so a second pass is a no-op. With no
/// walls the position is returned unchanged.
pub fn resolve_penetration(center: Vec2, radius: f32, walls: &[Wall], clearance: f32) -> Vec2 {
    let mut pos = center;

    for wall in walls {
        if pos.distance(wall.center) > broadphase_reach(radius, wall) {
            continue;
        }

        if wall.closest_point(pos).distance_squared(pos) <= INSIDE_EPSILON_SQ {
            pos = push_out_of_wall_run(pos, wall, walls, clearance);
        }

        let result = circle_wall_collision(pos, radius, wall);
        if result.hit && result.penetration > PENETRATION_SLOP {
            pos += result.normal * result.penetration;
        }
    }

    pos
}

/// Probe one axis of movement; true if the move may be committed.
///
/// The probe runs from `pos` along the movement direction for the movement
/// distance plus `margin`. Zero-length moves are always permitted.
pub fn can_move<Q: SolidQuery + ?Sized>(
    query: &Q,
    pos: Vec2,
    displacement: Vec2,
    margin: f32,
) -> bool {
    let distance = displacement.length();
    if distance < 1e-6 {
        return true;
    }
    !query.is_blocked(pos, displacement, distance + margin)
}

/// Apply a displacement split over two axes, each probed independently from
/// the starting position (first axis, then second). A blocked axis is
/// cancelled for this tick while the other may still slide.
pub fn advance_along<Q: SolidQuery + ?Sized>(
    query: &Q,
    pos: Vec2,
    axes: [(Vec2, f32); 2],
    margin: f32,
) -> Vec2 {
    let moves = axes.map(|(axis, amount)| axis * amount);
    let allowed = moves.map(|m| can_move(query, pos, m, margin));

    let mut next = pos;
    for (m, ok) in moves.iter().zip(allowed) {
        if ok {
            next += *m;
        }
    }
    next
}

/// [`advance_along`] on the world x and z axes
pub fn advance<Q: SolidQuery + ?Sized>(
    query: &Q,
    pos: Vec2,
    displacement: Vec2,
    margin: f32,
) -> Vec2 {
    advance_along(
        query,
        pos,
        [(Vec2::X, displacement.x), (Vec2::Y, displacement.y)],
        margin,
    )
}
