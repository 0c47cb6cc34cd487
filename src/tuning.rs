//! Data-driven game balance
//!
//! Defaults come from [`crate::consts`]; any subset can be overridden from
//! JSON since every section is `#[serde(default)]`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;

/// Player movement and survivability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub radius: f32,
    pub max_health: f32,
    pub max_shield: f32,
    pub speed: f32,
    pub accel_factor: f32,
    pub friction: f32,
    pub max_velocity: f32,
    pub collision_margin: f32,
    pub inside_clearance: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            max_health: PLAYER_MAX_HEALTH,
            max_shield: PLAYER_MAX_SHIELD,
            speed: PLAYER_SPEED,
            accel_factor: PLAYER_ACCEL_FACTOR,
            friction: PLAYER_FRICTION,
            max_velocity: PLAYER_MAX_VELOCITY,
            collision_margin: PLAYER_COLLISION_MARGIN,
            inside_clearance: PLAYER_INSIDE_CLEARANCE,
        }
    }
}

/// Enemy stats and steering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub radius: f32,
    pub max_health: f32,
    pub max_shield: f32,
    pub speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_damage: f32,
    pub attack_cooldown: f64,
    pub whisker_length: f32,
    pub collision_margin: f32,
    pub inside_clearance: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            radius: ENEMY_RADIUS,
            max_health: ENEMY_MAX_HEALTH,
            max_shield: ENEMY_MAX_SHIELD,
            speed: ENEMY_SPEED,
            detection_range: ENEMY_DETECTION_RANGE,
            attack_range: ENEMY_ATTACK_RANGE,
            attack_damage: ENEMY_ATTACK_DAMAGE,
            attack_cooldown: ENEMY_ATTACK_COOLDOWN,
            whisker_length: ENEMY_WHISKER_LENGTH,
            collision_margin: ENEMY_COLLISION_MARGIN,
            inside_clearance: ENEMY_INSIDE_CLEARANCE,
        }
    }
}

/// Hit-scan weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    /// Seconds between shots
    pub fire_rate: f64,
    pub range: f32,
    pub damage: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            fire_rate: WEAPON_FIRE_RATE,
            range: WEAPON_RANGE,
            damage: WEAPON_DAMAGE,
        }
    }
}

/// Level flow: triggers, quiz effects and enemy population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelTuning {
    pub interact_radius: f32,
    /// Correct answers required per level (index 0 is level 1); levels past
    /// the end use [`REQUIRED_ANSWERS`]
    pub required_answers: Vec<u32>,
    pub quiz_heal: f32,
    pub quiz_penalty: f32,
    pub enemies_base: u32,
    pub enemies_per_level: u32,
}

impl Default for LevelTuning {
    fn default() -> Self {
        Self {
            interact_radius: TRIGGER_INTERACT_RADIUS,
            required_answers: vec![REQUIRED_ANSWERS; 3],
            quiz_heal: QUIZ_HEAL,
            quiz_penalty: QUIZ_PENALTY,
            enemies_base: 3,
            enemies_per_level: 1,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub weapon: WeaponTuning,
    pub level: LevelTuning,
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load overrides from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Correct answers needed to clear a (1-based) level
    pub fn required_answers_for(&self, level: u32) -> u32 {
        level
            .checked_sub(1)
            .and_then(|i| self.level.required_answers.get(i as usize))
            .copied()
            .unwrap_or(REQUIRED_ANSWERS)
    }

    /// Enemies spawned on a (1-based) level
    pub fn enemy_count_for(&self, level: u32) -> u32 {
        self.level.enemies_base + self.level.enemies_per_level * level.saturating_sub(1)
    }
}
