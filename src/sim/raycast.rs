//! Ray queries against solid geometry
//!
//! A single obstruction capability shared by predictive movement blocking,
//! enemy whiskers and the hit-scan weapon. Only walls are solid: triggers and
//! decoration never take part in these queries.

use glam::Vec2;

use super::grid::Wall;

/// Something rays can be cast against
pub trait SolidQuery {
    /// Distance to the nearest solid obstruction along `dir` within `max_distance`.
    ///
    /// `dir` need not be normalized; a zero direction never hits.
    fn nearest_solid_hit(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<f32>;

    /// True if a probe of length `distance` along `dir` is obstructed
    fn is_blocked(&self, origin: Vec2, dir: Vec2, distance: f32) -> bool {
        self.nearest_solid_hit(origin, dir, distance).is_some()
    }
}

impl SolidQuery for [Wall] {
    fn nearest_solid_hit(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<f32> {
        let dir = dir.try_normalize()?;
        self.iter()
            .filter_map(|wall| wall.ray_distance(origin, dir, max_distance))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Entry distance of a ray into a circle, if within `max_distance`.
///
/// `dir` must be normalized. An origin inside the circle hits at distance 0.
pub fn ray_circle_distance(
    origin: Vec2,
    dir: Vec2,
    center: Vec2,
    radius: f32,
    max_distance: f32,
) -> Option<f32> {
    let oc = origin - center;
    let c = oc.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let b = oc.dot(dir);
    if b > 0.0 {
        // Outside and pointing away
        return None;
    }

    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }

    let t = -b - disc.sqrt();
    (t <= max_distance).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> Vec<Wall> {
        vec![
            Wall {
                center: Vec2::new(6.0, 0.0),
                half_extent: 2.0,
            },
            Wall {
                center: Vec2::new(10.0, 0.0),
                half_extent: 2.0,
            },
        ]
    }

    #[test]
    fn test_nearest_solid_hit_picks_closest() {
        let walls = corridor();
        let d = walls.nearest_solid_hit(Vec2::ZERO, Vec2::X, 50.0).unwrap();
        assert!((d - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_nearest_solid_hit_unnormalized_direction() {
        let walls = corridor();
        let d = walls
            .nearest_solid_hit(Vec2::ZERO, Vec2::new(7.0, 0.0), 50.0)
            .unwrap();
        assert!((d - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_direction_never_hits() {
        let walls = corridor();
        assert!(walls.nearest_solid_hit(Vec2::ZERO, Vec2::ZERO, 50.0).is_none());
    }

    #[test]
    fn test_empty_geometry_never_blocks() {
        let walls: Vec<Wall> = Vec::new();
        assert!(!walls.is_blocked(Vec2::ZERO, Vec2::X, 100.0));
    }

    #[test]
    fn test_ray_circle() {
        let d = ray_circle_distance(Vec2::ZERO, Vec2::X, Vec2::new(5.0, 0.0), 1.0, 50.0).unwrap();
        assert!((d - 4.0).abs() < 1e-6);

        // Miss to the side
        assert!(ray_circle_distance(Vec2::ZERO, Vec2::X, Vec2::new(5.0, 2.0), 1.0, 50.0).is_none());
        // Behind
        assert!(ray_circle_distance(Vec2::ZERO, Vec2::X, Vec2::new(-5.0, 0.0), 1.0, 50.0).is_none());
        // Out of range
        assert!(ray_circle_distance(Vec2::ZERO, Vec2::X, Vec2::new(5.0, 0.0), 1.0, 3.0).is_none());
        // Inside
        assert_eq!(
            ray_circle_distance(Vec2::new(5.2, 0.0), Vec2::X, Vec2::new(5.0, 0.0), 1.0, 3.0),
            Some(0.0)
        );
    }
}
