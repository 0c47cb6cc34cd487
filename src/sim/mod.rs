//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame time clamped before integration
//! - Seeded RNG only
//! - Stable iteration order (row-major cells, enemies by entity ID)
//! - No rendering or platform dependencies

pub mod agent;
pub mod collision;
pub mod enemy;
pub mod grid;
pub mod levels;
pub mod player;
pub mod progression;
pub mod raycast;
pub mod state;
pub mod tick;
pub mod weapon;

pub use agent::{Agent, DamageReport, Vitals};
pub use collision::{CollisionResult, advance, advance_along, can_move, resolve_penetration};
pub use enemy::{Enemy, EnemyState};
pub use grid::{CellKind, Face, GridMap, Trigger, Wall};
pub use levels::LEVEL_COUNT;
pub use player::{MoveIntent, Player};
pub use progression::{AnswerOutcome, Progression};
pub use raycast::SolidQuery;
pub use state::{GameEvent, GamePhase, LevelGeometry, SessionStats, World};
pub use tick::{TickInput, tick};
pub use weapon::{Shot, ShotOutcome, Weapon};
