//! Session state and core simulation types
//!
//! Everything the per-frame passes mutate lives in [`World`]: the loaded level,
//! the player, enemies, weapon, progression counters and the seeded RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, spawn_position};
use super::grid::{GridMap, Trigger, Wall};
use super::levels::{self, LEVEL_COUNT};
use super::player::Player;
use super::progression::{AnswerOutcome, Progression};
use super::weapon::Weapon;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Waiting on the quiz collaborator for this trigger
    Quiz { trigger_id: u32 },
    /// Player died
    GameOver,
    /// Final level cleared
    Victory,
}

/// Fire-and-forget notifications for the HUD and audio collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelLoaded { level: u32 },
    ShotFired { origin: Vec2, direction: Vec2 },
    EnemyHit { enemy_id: u32, point: Vec2 },
    EnemyKilled { enemy_id: u32 },
    WallImpact { point: Vec2 },
    ShotMissed { point: Vec2 },
    PlayerDamaged { amount: f32, health: f32, shield: f32 },
    PlayerHealed { amount: f32 },
    PlayerDied,
    QuizRequested { trigger_id: u32, level: u32 },
    AnswerCorrect { remaining: u32 },
    AnswerIncorrect,
    LevelComplete { level: u32 },
    Victory,
}

/// Session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Enemies killed this session
    pub kills: u32,
    /// Enemies killed on the current level
    pub level_kills: u32,
    pub shots_fired: u32,
    /// Shots that hit an enemy
    pub hits: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
}

/// Geometry derived from the loaded map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelGeometry {
    /// 1-based level index
    pub index: u32,
    /// `None` when the level could not be loaded
    pub map: Option<GridMap>,
    pub walls: Vec<Wall>,
    pub triggers: Vec<Trigger>,
}

impl LevelGeometry {
    pub fn new(index: u32, map: Option<GridMap>) -> Self {
        let (walls, triggers) = map
            .as_ref()
            .map(|m| (m.walls(), m.triggers(index)))
            .unwrap_or_default();
        Self {
            index,
            map,
            walls,
            triggers,
        }
    }

    /// Player start: the spawn marker, or the world origin
    pub fn spawn_point(&self) -> Vec2 {
        self.map
            .as_ref()
            .and_then(GridMap::spawn_point)
            .unwrap_or(Vec2::ZERO)
    }

    pub fn trigger_mut(&mut self, id: u32) -> Option<&mut Trigger> {
        self.triggers.iter_mut().find(|t| t.id == id)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Simulated seconds since the session started
    pub clock: f64,
    pub level: LevelGeometry,
    pub player: Player,
    /// Enemies on this level (sorted by id)
    pub enemies: Vec<Enemy>,
    pub weapon: Weapon,
    pub progression: Progression,
    pub stats: SessionStats,
    /// Trigger that may not prompt again until the player walks away from it
    pub suppressed_trigger: Option<u32>,
    /// Pending notifications, drained by the host
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl World {
    /// New session on level 1
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut world = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(Vec2::ZERO, &tuning.player),
            weapon: Weapon::new(&tuning.weapon),
            progression: Progression::new(1, tuning.required_answers_for(1), LEVEL_COUNT),
            tuning,
            phase: GamePhase::Playing,
            clock: 0.0,
            level: LevelGeometry::default(),
            enemies: Vec::new(),
            stats: SessionStats::default(),
            suppressed_trigger: None,
            events: Vec::new(),
            next_id: 1,
        };
        world.load_level(1);
        world
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Load built-in level `index`.
    ///
    /// An unknown level loads as an empty arena: no walls, no triggers, and
    /// the fallback spawns apply.
    pub fn load_level(&mut self, index: u32) {
        let map = match levels::builtin(index) {
            Ok(map) => Some(map),
            Err(err) => {
                log::warn!("Level {} unavailable: {}", index, err);
                None
            }
        };
        self.load_map(index, map);
    }

    /// Replace the level wholesale and restart it
    pub fn load_map(&mut self, index: u32, map: Option<GridMap>) {
        self.level = LevelGeometry::new(index, map);
        self.reset_level_counters();

        let spawn = self.level.spawn_point();
        self.player.respawn(spawn);
        self.spawn_enemies();

        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::LevelLoaded { level: index });
        log::info!(
            "Loaded level {}: {} walls, {} triggers, {} enemies",
            index,
            self.level.walls.len(),
            self.level.triggers.len(),
            self.enemies.len()
        );
    }

    /// Reset everything that is counted per level
    pub fn reset_level_counters(&mut self) {
        let index = self.level.index;
        self.progression
            .reset(index, self.tuning.required_answers_for(index));
        self.stats.level_kills = 0;
        self.suppressed_trigger = None;
    }

    /// Replace the enemy population for the current level
    pub fn spawn_enemies(&mut self) {
        let count = self.tuning.enemy_count_for(self.level.index);
        let positions: Vec<Vec2> = (0..count)
            .map(|_| spawn_position(self.level.map.as_ref(), &mut self.rng))
            .collect();

        self.enemies.clear();
        for pos in positions {
            let id = self.next_entity_id();
            self.enemies.push(Enemy::new(id, pos, &self.tuning.enemy));
        }
    }

    /// Enemies still alive
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| !e.is_dead())
    }

    /// Apply damage to the player through the shared damage model
    pub fn damage_player(&mut self, amount: f32) {
        let report = self.player.agent.vitals.apply_damage(amount);
        if report.absorbed + report.health_lost <= 0.0 {
            return;
        }

        let vitals = self.player.agent.vitals;
        self.events.push(GameEvent::PlayerDamaged {
            amount,
            health: vitals.health,
            shield: vitals.shield,
        });

        if report.killed {
            self.events.push(GameEvent::PlayerDied);
            self.phase = GamePhase::GameOver;
            log::info!("Player died on level {}", self.level.index);
        }
    }

    pub fn heal_player(&mut self, amount: f32) {
        let healed = self.player.agent.vitals.heal(amount);
        if healed > 0.0 {
            self.events.push(GameEvent::PlayerHealed { amount: healed });
        }
    }

    /// Resolve the open quiz with the collaborator's verdict.
    ///
    /// Returns `None` when no quiz is open.
    pub fn answer_quiz(&mut self, correct: bool) -> Option<AnswerOutcome> {
        let GamePhase::Quiz { trigger_id } = self.phase else {
            return None;
        };
        self.phase = GamePhase::Playing;

        let Some(trigger) = self.level.trigger_mut(trigger_id) else {
            return Some(AnswerOutcome::Ignored);
        };
        let outcome = self.progression.record_answer(trigger, correct);

        match outcome {
            AnswerOutcome::Ignored => {}
            AnswerOutcome::Incorrect => {
                self.stats.incorrect_answers += 1;
                self.suppressed_trigger = Some(trigger_id);
                self.events.push(GameEvent::AnswerIncorrect);
                self.damage_player(self.tuning.level.quiz_penalty);
            }
            AnswerOutcome::Correct { remaining } => {
                self.record_correct(remaining);
            }
            AnswerOutcome::LevelComplete { level } => {
                self.record_correct(0);
                self.events.push(GameEvent::LevelComplete { level });
                log::info!("Level {} complete", level);
                self.load_level(level + 1);
            }
            AnswerOutcome::Victory => {
                self.record_correct(0);
                self.events.push(GameEvent::Victory);
                self.phase = GamePhase::Victory;
                log::info!(
                    "Victory: {} kills, {} correct answers",
                    self.stats.kills,
                    self.stats.correct_answers
                );
            }
        }

        Some(outcome)
    }

    fn record_correct(&mut self, remaining: u32) {
        self.stats.correct_answers += 1;
        self.events.push(GameEvent::AnswerCorrect { remaining });
        self.heal_player(self.tuning.level.quiz_heal);
    }

    /// Close the open quiz without answering
    pub fn dismiss_quiz(&mut self) {
        if let GamePhase::Quiz { trigger_id } = self.phase {
            self.suppressed_trigger = Some(trigger_id);
            self.phase = GamePhase::Playing;
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
