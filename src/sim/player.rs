//! Player avatar movement
//!
//! Intents are applied in the player's local frame: `local_vel.x` is strafe
//! speed along [`right_of`] the facing, `local_vel.y` is forward speed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, Vitals};
use super::collision::{advance_along, resolve_penetration};
use super::grid::Wall;
use crate::right_of;
use crate::tuning::PlayerTuning;

/// Held movement keys for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub fn is_moving(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// Local-frame wish direction (x strafe, y forward), normalized
    pub fn wish_dir(&self) -> Vec2 {
        let strafe = f32::from(self.right as u8) - f32::from(self.left as u8);
        let forward = f32::from(self.forward as u8) - f32::from(self.back as u8);
        Vec2::new(strafe, forward).normalize_or_zero()
    }
}

/// The player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub agent: Agent,
    /// Unit ground-plane facing
    pub facing: Vec2,
    /// Velocity in the local frame (x strafe, y forward)
    pub local_vel: Vec2,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &PlayerTuning) -> Self {
        Self {
            agent: Agent::new(
                pos,
                tuning.radius,
                Vitals::new(tuning.max_health, tuning.max_shield),
            ),
            facing: Vec2::NEG_Y,
            local_vel: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.agent.pos
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.agent.is_dead()
    }

    /// Turn to face `aim`; a zero aim keeps the current facing
    pub fn face(&mut self, aim: Vec2) {
        if let Some(dir) = aim.try_normalize() {
            self.facing = dir;
        }
    }

    /// Integrate one tick of movement, then resolve against walls
    pub fn step(&mut self, intent: MoveIntent, dt: f32, walls: &[Wall], tuning: &PlayerTuning) {
        if self.is_dead() {
            self.local_vel = Vec2::ZERO;
            self.agent.vel = Vec2::ZERO;
            return;
        }

        self.local_vel *= (-tuning.friction * dt).exp();
        if intent.is_moving() {
            let accel = tuning.speed * tuning.accel_factor;
            self.local_vel += intent.wish_dir() * accel * dt;
        }
        self.local_vel = self
            .local_vel
            .clamp(Vec2::splat(-tuning.max_velocity), Vec2::splat(tuning.max_velocity));

        let right = right_of(self.facing);
        let moved = advance_along(
            walls,
            self.agent.pos,
            [
                (right, self.local_vel.x * dt),
                (self.facing, self.local_vel.y * dt),
            ],
            tuning.collision_margin,
        );
        self.agent.pos =
            resolve_penetration(moved, self.agent.radius, walls, tuning.inside_clearance);
        self.agent.vel = right * self.local_vel.x + self.facing * self.local_vel.y;
    }

    /// Place at a level start with velocity cleared
    pub fn respawn(&mut self, pos: Vec2) {
        self.agent.pos = pos;
        self.agent.vel = Vec2::ZERO;
        self.local_vel = Vec2::ZERO;
    }
}
