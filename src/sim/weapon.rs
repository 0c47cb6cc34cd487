//! Hit-scan weapon
//!
//! A shot is a single bounded ray. The nearest wall and the nearest live enemy
//! along it are found separately; a wall strictly closer than every enemy
//! absorbs the shot, otherwise the nearest enemy takes the hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::cooldown_elapsed;
use super::enemy::Enemy;
use super::raycast::{SolidQuery, ray_circle_distance};
use crate::tuning::WeaponTuning;

/// Where a shot ended up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// An enemy took the hit
    EnemyHit {
        enemy_id: u32,
        distance: f32,
        point: Vec2,
        killed: bool,
    },
    /// Absorbed by a wall
    WallImpact { distance: f32, point: Vec2 },
    /// Nothing within range; `point` is the end of the ray
    Miss { point: Vec2 },
}

/// A fired shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub origin: Vec2,
    pub direction: Vec2,
    pub outcome: ShotOutcome,
}

impl Shot {
    /// End point of the tracer
    pub fn end_point(&self) -> Vec2 {
        match self.outcome {
            ShotOutcome::EnemyHit { point, .. }
            | ShotOutcome::WallImpact { point, .. }
            | ShotOutcome::Miss { point } => point,
        }
    }
}

/// Pure ray resolution, before any damage is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitScan {
    /// Index into the enemy slice
    Enemy { index: usize, distance: f32 },
    Wall { distance: f32 },
    Miss,
}

/// Resolve a ray against walls and live enemies.
///
/// `dir` must be normalized. Dead enemies are ignored. A wall wins only when
/// it is strictly closer than the nearest enemy.
pub fn resolve_hit_scan<Q: SolidQuery + ?Sized>(
    origin: Vec2,
    dir: Vec2,
    range: f32,
    enemies: &[Enemy],
    walls: &Q,
) -> HitScan {
    let wall_hit = walls.nearest_solid_hit(origin, dir, range);

    let enemy_hit = enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| !e.is_dead())
        .filter_map(|(i, e)| {
            ray_circle_distance(origin, dir, e.agent.pos, e.agent.radius, range).map(|d| (i, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match (wall_hit, enemy_hit) {
        (Some(wall), Some((_, enemy))) if wall < enemy => HitScan::Wall { distance: wall },
        (_, Some((index, distance))) => HitScan::Enemy { index, distance },
        (Some(distance), None) => HitScan::Wall { distance },
        (None, None) => HitScan::Miss,
    }
}

/// Fire-rate-gated hit-scan gun
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    /// Seconds between shots
    pub fire_rate: f64,
    pub range: f32,
    /// Damage dealt per enemy hit
    pub damage: f32,
    /// Session time of the last shot
    pub last_shot: Option<f64>,
}

impl Weapon {
    pub fn new(tuning: &WeaponTuning) -> Self {
        Self {
            fire_rate: tuning.fire_rate,
            range: tuning.range,
            damage: tuning.damage,
            last_shot: None,
        }
    }

    pub fn can_fire(&self, now: f64) -> bool {
        cooldown_elapsed(self.last_shot, now, self.fire_rate)
    }

    /// Fire along `aim`.
    ///
    /// Returns `None` (and leaves the cooldown untouched) when still cooling
    /// down or when `aim` has no length.
    pub fn fire<Q: SolidQuery + ?Sized>(
        &mut self,
        now: f64,
        origin: Vec2,
        aim: Vec2,
        enemies: &mut [Enemy],
        walls: &Q,
    ) -> Option<Shot> {
        if !self.can_fire(now) {
            return None;
        }
        let direction = aim.try_normalize()?;
        self.last_shot = Some(now);

        let outcome = match resolve_hit_scan(origin, direction, self.range, enemies, walls) {
            HitScan::Enemy { index, distance } => {
                let enemy = &mut enemies[index];
                let report = enemy.take_hit(self.damage);
                ShotOutcome::EnemyHit {
                    enemy_id: enemy.id,
                    distance,
                    point: origin + direction * distance,
                    killed: report.killed,
                }
            }
            HitScan::Wall { distance } => ShotOutcome::WallImpact {
                distance,
                point: origin + direction * distance,
            },
            HitScan::Miss => ShotOutcome::Miss {
                point: origin + direction * self.range,
            },
        };

        Some(Shot {
            origin,
            direction,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Wall;
    use crate::tuning::EnemyTuning;

    fn enemy_at(id: u32, x: f32) -> Enemy {
        Enemy::new(id, Vec2::new(x, 0.0), &EnemyTuning::default())
    }

    fn wall_at(x: f32) -> Vec<Wall> {
        vec![Wall {
            center: Vec2::new(x, 0.0),
            half_extent: 2.0,
        }]
    }

    #[test]
    fn test_enemy_in_front_of_wall_takes_hit() {
        let mut weapon = Weapon::new(&WeaponTuning::default());
        let mut enemies = vec![enemy_at(7, 5.0)];
        let walls = wall_at(12.0);

        let shot = weapon
            .fire(0.0, Vec2::ZERO, Vec2::X, &mut enemies, walls.as_slice())
            .unwrap();
        match shot.outcome {
            ShotOutcome::EnemyHit {
                enemy_id, distance, ..
            } => {
                assert_eq!(enemy_id, 7);
                assert!((distance - (5.0 - enemies[0].agent.radius)).abs() < 1e-5);
            }
            other => panic!("expected enemy hit, got {other:?}"),
        }
        assert_eq!(enemies[0].agent.vitals.shield, 0.0);
    }

    #[test]
    fn test_wall_in_front_absorbs_shot() {
        let mut weapon = Weapon::new(&WeaponTuning::default());
        let mut enemies = vec![enemy_at(1, 10.0)];
        let walls = wall_at(5.0);

        let shot = weapon
            .fire(0.0, Vec2::ZERO, Vec2::X, &mut enemies, walls.as_slice())
            .unwrap();
        assert!(matches!(shot.outcome, ShotOutcome::WallImpact { distance, .. } if (distance - 3.0).abs() < 1e-5));
        // No damage through walls
        assert_eq!(enemies[0].agent.vitals.shield, enemies[0].agent.vitals.max_shield);
    }

    #[test]
    fn test_miss_reports_full_range_point() {
        let mut weapon = Weapon::new(&WeaponTuning::default());
        let walls: Vec<Wall> = Vec::new();
        let shot = weapon
            .fire(0.0, Vec2::ZERO, Vec2::new(0.0, 2.0), &mut [], walls.as_slice())
            .unwrap();
        assert_eq!(shot.outcome, ShotOutcome::Miss { point: Vec2::new(0.0, 50.0) });
        assert_eq!(shot.end_point(), Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_fire_rate_gate() {
        let mut weapon = Weapon::new(&WeaponTuning::default());
        let walls: Vec<Wall> = Vec::new();

        assert!(weapon.fire(1.0, Vec2::ZERO, Vec2::X, &mut [], walls.as_slice()).is_some());
        assert!(weapon.fire(1.1, Vec2::ZERO, Vec2::X, &mut [], walls.as_slice()).is_none());
        assert!(weapon.fire(1.2, Vec2::ZERO, Vec2::X, &mut [], walls.as_slice()).is_some());
        // Exactly one fire interval later again, from a clock that is not a round number
        assert!(weapon.fire(1.4, Vec2::ZERO, Vec2::X, &mut [], walls.as_slice()).is_some());
        assert_eq!(weapon.last_shot, Some(1.4));
    }

    #[test]
    fn test_zero_aim_keeps_cooldown() {
        let mut weapon = Weapon::new(&WeaponTuning::default());
        let walls: Vec<Wall> = Vec::new();
        assert!(weapon.fire(0.0, Vec2::ZERO, Vec2::ZERO, &mut [], walls.as_slice()).is_none());
        assert!(weapon.last_shot.is_none());
    }

    #[test]
    fn test_nearest_enemy_wins_and_dead_are_skipped() {
        let mut enemies = vec![enemy_at(1, 8.0), enemy_at(2, 4.0)];
        let walls: Vec<Wall> = Vec::new();
        let scan = resolve_hit_scan(Vec2::ZERO, Vec2::X, 50.0, &enemies, walls.as_slice());
        assert!(matches!(scan, HitScan::Enemy { index: 1, .. }));

        enemies[1].take_hit(100.0);
        let scan = resolve_hit_scan(Vec2::ZERO, Vec2::X, 50.0, &enemies, walls.as_slice());
        assert!(matches!(scan, HitScan::Enemy { index: 0, .. }));
    }

    /// Solid geometry that always reports a fixed distance
    struct FixedHit(f32);

    impl SolidQuery for FixedHit {
        fn nearest_solid_hit(&self, _: Vec2, _: Vec2, max_distance: f32) -> Option<f32> {
            (self.0 <= max_distance).then_some(self.0)
        }
    }

    #[test]
    fn test_tie_goes_to_enemy() {
        let enemies = vec![enemy_at(1, 4.0)];
        let enemy_distance = ray_circle_distance(
            Vec2::ZERO,
            Vec2::X,
            enemies[0].agent.pos,
            enemies[0].agent.radius,
            50.0,
        )
        .unwrap();

        let scan = resolve_hit_scan(Vec2::ZERO, Vec2::X, 50.0, &enemies, &FixedHit(enemy_distance));
        assert!(matches!(scan, HitScan::Enemy { .. }));

        let scan = resolve_hit_scan(
            Vec2::ZERO,
            Vec2::X,
            50.0,
            &enemies,
            &FixedHit(enemy_distance - 0.01),
        );
        assert!(matches!(scan, HitScan::Wall { .. }));
    }

    #[test]
    fn test_two_hits_kill_enemy() {
        let mut weapon = Weapon::new(&WeaponTuning::default());
        let mut enemies = vec![enemy_at(3, 5.0)];
        let walls: Vec<Wall> = Vec::new();

        weapon.fire(0.0, Vec2::ZERO, Vec2::X, &mut enemies, walls.as_slice());
        assert_eq!(enemies[0].agent.vitals.shield, 0.0);
        assert_eq!(enemies[0].agent.vitals.health, 50.0);

        let shot = weapon
            .fire(1.0, Vec2::ZERO, Vec2::X, &mut enemies, walls.as_slice())
            .unwrap();
        assert!(matches!(shot.outcome, ShotOutcome::EnemyHit { killed: true, .. }));
        assert!(enemies[0].is_dead());

        // Corpses no longer block the ray
        let shot = weapon
            .fire(2.0, Vec2::ZERO, Vec2::X, &mut enemies, walls.as_slice())
            .unwrap();
        assert!(matches!(shot.outcome, ShotOutcome::Miss { .. }));
    }
}
