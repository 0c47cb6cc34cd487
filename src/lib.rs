//! Grid Arena - a walled-maze first-person arena simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid map, collisions, enemy AI, combat, progression)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `quiz`: Question bank behind the trigger prompts
//! - `audio`: Sound cues derived from simulation events
//!
//! Planar convention: world `x` is `Vec2::x`, world `z` is `Vec2::y`. Height is
//! fixed and never simulated.

pub mod audio;
pub mod error;
pub mod quiz;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Upper bound on the per-frame timestep used for integration
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Slack on cooldown checks so a retry exactly one cooldown later passes
    pub const COOLDOWN_EPSILON: f64 = 1e-9;

    /// Grid defaults
    pub const CELL_SIZE: f32 = 4.0;
    /// World units between grid (0,0) and the world origin, on both axes
    pub const ORIGIN_OFFSET: f32 = 20.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 0.4;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_MAX_SHIELD: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 1.5;
    /// Acceleration is speed * this factor (units/s²)
    pub const PLAYER_ACCEL_FACTOR: f32 = 60.0;
    /// Exponential velocity damping rate (per second)
    pub const PLAYER_FRICTION: f32 = 10.0;
    /// Per-axis velocity cap to avoid tunneling
    pub const PLAYER_MAX_VELOCITY: f32 = 15.0;
    /// Extra probe length beyond the movement distance
    pub const PLAYER_COLLISION_MARGIN: f32 = 0.5;
    /// Clearance past the nearest face when the center ends up inside a wall
    pub const PLAYER_INSIDE_CLEARANCE: f32 = 0.01;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 0.7;
    pub const ENEMY_MAX_HEALTH: f32 = 50.0;
    pub const ENEMY_MAX_SHIELD: f32 = 50.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_DETECTION_RANGE: f32 = 10.0;
    pub const ENEMY_ATTACK_RANGE: f32 = 1.5;
    pub const ENEMY_ATTACK_DAMAGE: f32 = 10.0;
    /// Seconds between melee attacks
    pub const ENEMY_ATTACK_COOLDOWN: f64 = 2.0;
    /// Whisker probe length while chasing
    pub const ENEMY_WHISKER_LENGTH: f32 = 1.0;
    pub const ENEMY_INSIDE_CLEARANCE: f32 = 0.1;
    pub const ENEMY_COLLISION_MARGIN: f32 = 0.1;
    /// Fallback spawn when the map has no open cell
    pub const ENEMY_FALLBACK_SPAWN: (f32, f32) = (0.0, 5.0);
    /// Spawn jitter around the chosen cell center (± units per axis)
    pub const ENEMY_SPAWN_JITTER: f32 = 1.0;

    /// Patrol behaviour
    pub const PATROL_MIN_DISTANCE: f32 = 3.0;
    pub const PATROL_MAX_DISTANCE: f32 = 6.0;
    pub const PATROL_ARRIVE_DISTANCE: f32 = 0.5;
    pub const PATROL_MIN_WAIT: f32 = 1.0;
    pub const PATROL_MAX_WAIT: f32 = 3.0;
    /// Patrol speed relative to chase speed
    pub const PATROL_SPEED_FACTOR: f32 = 0.5;
    /// Share of a patrol step that must be gained toward the goal, or it is dropped
    pub const PATROL_MIN_PROGRESS: f32 = 0.1;

    /// Weapon defaults
    /// Seconds between shots
    pub const WEAPON_FIRE_RATE: f64 = 0.2;
    pub const WEAPON_RANGE: f32 = 50.0;
    pub const WEAPON_DAMAGE: f32 = 50.0;

    /// Progression defaults
    pub const TRIGGER_INTERACT_RADIUS: f32 = 3.0;
    pub const REQUIRED_ANSWERS: u32 = 10;
    pub const QUIZ_HEAL: f32 = 50.0;
    pub const QUIZ_PENALTY: f32 = 25.0;
}

/// Flatten a direction onto the ground plane and normalize it.
///
/// Returns `None` for degenerate (near zero) vectors.
#[inline]
pub fn ground_dir(v: Vec2) -> Option<Vec2> {
    v.try_normalize()
}

/// Rotate a planar direction about the world up axis.
///
/// Matches a right-handed y-up frame: positive angles turn `+z` toward `+x`.
#[inline]
pub fn rotate_about_up(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(v.x * c + v.y * s, -v.x * s + v.y * c)
}

/// Right-hand strafe axis for a facing direction (forward × up)
#[inline]
pub fn right_of(forward: Vec2) -> Vec2 {
    Vec2::new(-forward.y, forward.x)
}

/// Facing direction for a yaw angle (0 looks down -z)
#[inline]
pub fn yaw_to_forward(yaw: f32) -> Vec2 {
    Vec2::new(-yaw.sin(), -yaw.cos())
}
