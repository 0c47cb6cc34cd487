//! Shared agent shape and damage model for the player and enemies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::COOLDOWN_EPSILON;

/// Health and shield pools.
///
/// Invariant: `0 <= health <= max_health` and `0 <= shield <= max_shield`.
/// An agent with zero health is dead and ignores further damage and healing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub shield: f32,
    pub max_health: f32,
    pub max_shield: f32,
}

/// What a single damage event did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageReport {
    /// Damage soaked by the shield
    pub absorbed: f32,
    /// Health removed by overflow
    pub health_lost: f32,
    /// This event took health to zero
    pub killed: bool,
}

impl Vitals {
    /// Full health and shield
    pub fn new(max_health: f32, max_shield: f32) -> Self {
        Self {
            health: max_health,
            shield: max_shield,
            max_health,
            max_shield,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply one damage event: shield first, overflow into health.
    pub fn apply_damage(&mut self, amount: f32) -> DamageReport {
        if self.is_dead() || amount <= 0.0 {
            return DamageReport::default();
        }

        let shield_before = self.shield;
        let health_before = self.health;

        self.shield -= amount;
        if self.shield < 0.0 {
            // Negative remainder spills into health
            self.health += self.shield;
            self.shield = 0.0;
        }
        self.health = self.health.max(0.0);

        DamageReport {
            absorbed: shield_before - self.shield,
            health_lost: health_before - self.health,
            killed: self.is_dead(),
        }
    }

    /// Restore health up to the maximum; returns the amount actually healed
    pub fn heal(&mut self, amount: f32) -> f32 {
        if self.is_dead() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }
}

/// Planar body shared by the player and enemies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Ground-plane position (x, z)
    pub pos: Vec2,
    /// Ground-plane velocity (x, z), units/s
    pub vel: Vec2,
    pub radius: f32,
    pub vitals: Vitals,
}

impl Agent {
    pub fn new(pos: Vec2, radius: f32, vitals: Vitals) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            vitals,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.vitals.is_dead()
    }

    /// Ground-plane distance to a point
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.pos.distance(point)
    }
}

/// Whether an action last taken at `last` may run again at `now`.
///
/// Never-used actions are always ready. Retrying exactly `cooldown` seconds
/// later is allowed even when the clock subtraction rounds just below it.
#[inline]
pub fn cooldown_elapsed(last: Option<f64>, now: f64, cooldown: f64) -> bool {
    last.is_none_or(|last| now - last + COOLDOWN_EPSILON >= cooldown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cooldown_boundary() {
        assert!(cooldown_elapsed(None, 0.0, 2.0));
        assert!(!cooldown_elapsed(Some(1.0), 1.1, 0.2));
        // 1.2 - 1.0 rounds to 0.19999999999999996
        assert!(cooldown_elapsed(Some(1.0), 1.2, 0.2));
        assert!(cooldown_elapsed(Some(0.1), 0.3, 0.2));
    }

    #[test]
    fn test_shield_then_health() {
        let mut vitals = Vitals::new(50.0, 50.0);

        let first = vitals.apply_damage(50.0);
        assert_eq!((vitals.shield, vitals.health), (0.0, 50.0));
        assert_eq!(first.absorbed, 50.0);
        assert!(!first.killed);

        let second = vitals.apply_damage(50.0);
        assert_eq!((vitals.shield, vitals.health), (0.0, 0.0));
        assert_eq!(second.health_lost, 50.0);
        assert!(second.killed);
        assert!(vitals.is_dead());
    }

    #[test]
    fn test_overflow_splits() {
        let mut vitals = Vitals::new(100.0, 20.0);
        let report = vitals.apply_damage(30.0);
        assert_eq!(vitals.shield, 0.0);
        assert_eq!(vitals.health, 90.0);
        assert_eq!(report.absorbed, 20.0);
        assert_eq!(report.health_lost, 10.0);
    }

    #[test]
    fn test_dead_ignores_damage_and_healing() {
        let mut vitals = Vitals::new(10.0, 0.0);
        vitals.apply_damage(25.0);
        assert!(vitals.is_dead());

        assert_eq!(vitals.apply_damage(5.0), DamageReport::default());
        assert_eq!(vitals.heal(50.0), 0.0);
        assert_eq!(vitals.health, 0.0);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut vitals = Vitals::new(100.0, 100.0);
        vitals.apply_damage(150.0);
        assert_eq!(vitals.health, 50.0);
        assert_eq!(vitals.heal(80.0), 50.0);
        assert_eq!(vitals.health, 100.0);
    }

    proptest! {
        #[test]
        fn prop_damage_model(
            health in 1.0f32..200.0,
            shield in 0.0f32..200.0,
            amount in 0.0f32..400.0,
        ) {
            let mut vitals = Vitals::new(health, shield);
            vitals.apply_damage(amount);

            prop_assert!(vitals.shield >= 0.0);
            prop_assert!(vitals.health >= 0.0);
            if amount <= shield {
                prop_assert_eq!(vitals.shield, shield - amount);
                prop_assert_eq!(vitals.health, health);
            } else {
                let expected = (health - (amount - shield)).max(0.0);
                prop_assert!((vitals.health - expected).abs() < 1e-3);
                prop_assert_eq!(vitals.shield, 0.0);
            }
        }
    }
}
