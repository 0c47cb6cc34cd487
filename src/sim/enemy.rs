//! Enemy AI: patrol/chase state machine with whisker steering
//!
//! Each enemy is polled once per tick. The state decides only the desired
//! displacement; every move then goes through the shared collision passes.

use std::f32::consts::{FRAC_PI_4, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, DamageReport, Vitals, cooldown_elapsed};
use super::collision::{advance, resolve_penetration};
use super::grid::{GridMap, Wall};
use super::raycast::SolidQuery;
use crate::consts::*;
use crate::ground_dir;
use crate::rotate_about_up;
use crate::tuning::EnemyTuning;

/// AI state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Wandering between random nearby points
    Patrol {
        /// Current destination, if one has been picked
        target: Option<Vec2>,
        /// Seconds left before picking the next destination
        wait: f32,
    },
    /// Heading straight for the player; the interrupted wander resumes after
    Chase {
        target: Option<Vec2>,
        wait: f32,
    },
    /// Terminal: no movement, targeting or damage for the rest of the level
    Dead,
}

impl Default for EnemyState {
    fn default() -> Self {
        EnemyState::Patrol {
            target: None,
            wait: 0.0,
        }
    }
}

impl EnemyState {
    /// Per-tick transition.
    ///
    /// Chase while the player is strictly inside `detection_range`, patrol
    /// otherwise. The patrol target and wait carry across a chase. Dead is
    /// absorbing.
    pub fn transition(self, distance_to_player: f32, detection_range: f32) -> Self {
        let inside = distance_to_player < detection_range;
        match self {
            EnemyState::Dead => EnemyState::Dead,
            EnemyState::Patrol { target, wait } if inside => EnemyState::Chase { target, wait },
            EnemyState::Chase { target, wait } if !inside => EnemyState::Patrol { target, wait },
            _ => self,
        }
    }

    pub fn is_chasing(&self) -> bool {
        matches!(self, EnemyState::Chase { .. })
    }
}

/// A hostile agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub agent: Agent,
    pub state: EnemyState,
    pub speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    /// Seconds between melee attacks
    pub attack_cooldown: f64,
    /// Session time of the last melee attack
    pub last_attack: Option<f64>,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, tuning: &EnemyTuning) -> Self {
        Self {
            id,
            agent: Agent::new(
                pos,
                tuning.radius,
                Vitals::new(tuning.max_health, tuning.max_shield),
            ),
            state: EnemyState::default(),
            speed: tuning.speed,
            detection_range: tuning.detection_range,
            attack_range: tuning.attack_range,
            attack_damage: tuning.attack_damage,
            attack_cooldown: tuning.attack_cooldown,
            last_attack: None,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self.state, EnemyState::Dead) || self.agent.is_dead()
    }

    /// Advance AI and movement by one tick
    pub fn update<R: Rng>(
        &mut self,
        player_pos: Vec2,
        dt: f32,
        walls: &[Wall],
        tuning: &EnemyTuning,
        rng: &mut R,
    ) {
        if self.is_dead() {
            self.state = EnemyState::Dead;
            return;
        }

        let distance = self.agent.distance_to(player_pos);
        self.state = self.state.transition(distance, self.detection_range);

        let displacement = match self.state {
            EnemyState::Patrol { .. } => self.patrol_step(dt, rng),
            EnemyState::Chase { .. } => {
                chase_direction(walls, self.agent.pos, player_pos, tuning.whisker_length)
                    .map(|dir| dir * self.speed * dt)
                    .unwrap_or(Vec2::ZERO)
            }
            EnemyState::Dead => Vec2::ZERO,
        };

        let start = self.agent.pos;
        let moved = advance(walls, start, displacement, tuning.collision_margin);
        self.agent.pos =
            resolve_penetration(moved, self.agent.radius, walls, tuning.inside_clearance);

        // A patrol goal behind a wall is never reached; drop it and pick another
        if let EnemyState::Patrol { target, wait } = &mut self.state {
            let wanted = displacement.length();
            let progress = (self.agent.pos - start).dot(displacement.normalize_or_zero());
            if target.is_some() && wanted > 0.0 && progress < wanted * PATROL_MIN_PROGRESS {
                log::debug!("Enemy {} patrol blocked, picking a new target", self.id);
                *target = None;
                *wait = 0.0;
            }
        }
        self.agent.vel = if dt > 0.0 {
            (self.agent.pos - start) / dt
        } else {
            Vec2::ZERO
        };
    }

    /// Wander: wait, pick a point 3-6 units away, walk there at half speed.
    fn patrol_step<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Vec2 {
        let pos = self.agent.pos;
        let speed = self.speed * PATROL_SPEED_FACTOR;
        let EnemyState::Patrol { target, wait } = &mut self.state else {
            return Vec2::ZERO;
        };

        match *target {
            None => {
                *wait -= dt;
                if *wait <= 0.0 {
                    let angle = rng.random::<f32>() * TAU;
                    let distance = rng.random_range(PATROL_MIN_DISTANCE..PATROL_MAX_DISTANCE);
                    *target = Some(pos + Vec2::new(angle.cos(), angle.sin()) * distance);
                }
                Vec2::ZERO
            }
            Some(goal) => {
                let to_goal = goal - pos;
                if to_goal.length() < PATROL_ARRIVE_DISTANCE {
                    *target = None;
                    *wait = rng.random_range(PATROL_MIN_WAIT..PATROL_MAX_WAIT);
                    return Vec2::ZERO;
                }
                to_goal.normalize_or_zero() * speed * dt
            }
        }
    }

    /// Melee gate: alive, within attack range and off cooldown
    pub fn can_attack(&self, player_pos: Vec2, now: f64) -> bool {
        if self.is_dead() || self.agent.distance_to(player_pos) > self.attack_range {
            return false;
        }
        cooldown_elapsed(self.last_attack, now, self.attack_cooldown)
    }

    /// Start the attack cooldown and return the damage to deal
    pub fn attack(&mut self, now: f64) -> f32 {
        self.last_attack = Some(now);
        self.attack_damage
    }

    /// Apply a weapon hit; a killing hit moves the enemy to `Dead`
    pub fn take_hit(&mut self, damage: f32) -> DamageReport {
        if self.is_dead() {
            return DamageReport::default();
        }
        let report = self.agent.vitals.apply_damage(damage);
        if report.killed {
            self.state = EnemyState::Dead;
            self.agent.vel = Vec2::ZERO;
        }
        report
    }
}

/// Steering direction while chasing.
///
/// Probes straight at the player first, then 45° to the left and to the
/// right; the first clear whisker wins. `None` means hold position.
pub fn chase_direction<Q: SolidQuery + ?Sized>(
    query: &Q,
    pos: Vec2,
    player_pos: Vec2,
    whisker_length: f32,
) -> Option<Vec2> {
    let forward = ground_dir(player_pos - pos)?;
    [
        forward,
        rotate_about_up(forward, FRAC_PI_4),
        rotate_about_up(forward, -FRAC_PI_4),
    ]
    .into_iter()
    .find(|dir| !query.is_blocked(pos, *dir, whisker_length))
}

/// Random open cell (jittered) for a new enemy, or the fixed fallback
pub fn spawn_position<R: Rng>(map: Option<&GridMap>, rng: &mut R) -> Vec2 {
    let candidates = map.map(|m| m.open_cells()).unwrap_or_default();
    if candidates.is_empty() {
        log::warn!("No open cell for enemy spawn, using fallback position");
        return Vec2::new(ENEMY_FALLBACK_SPAWN.0, ENEMY_FALLBACK_SPAWN.1);
    }

    let cell = candidates[rng.random_range(0..candidates.len())];
    let jitter = Vec2::new(
        rng.random_range(-ENEMY_SPAWN_JITTER..ENEMY_SPAWN_JITTER),
        rng.random_range(-ENEMY_SPAWN_JITTER..ENEMY_SPAWN_JITTER),
    );
    cell + jitter
}
