//! Per-frame simulation tick
//!
//! Strictly ordered passes: player move, enemy AI, combat, trigger check.

use glam::Vec2;

use super::player::MoveIntent;
use super::state::{GameEvent, GamePhase, World};
use super::weapon::ShotOutcome;
use crate::consts::MAX_FRAME_DT;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement keys
    pub movement: MoveIntent,
    /// View direction on the ground plane; `None` keeps the current facing
    pub aim: Option<Vec2>,
    /// Fire request
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the world by one frame
pub fn tick(world: &mut World, input: &TickInput, frame_dt: f32) {
    // Handle pause toggle
    if input.pause {
        match world.phase {
            GamePhase::Playing => {
                world.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => world.phase = GamePhase::Playing,
            _ => {}
        }
    }

    // Paused, quiz open or run over
    if world.phase != GamePhase::Playing {
        return;
    }

    let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
    world.clock += dt as f64;

    if let Some(aim) = input.aim {
        world.player.face(aim);
    }
    world
        .player
        .step(input.movement, dt, &world.level.walls, &world.tuning.player);

    let player_pos = world.player.pos();
    for enemy in &mut world.enemies {
        enemy.update(
            player_pos,
            dt,
            &world.level.walls,
            &world.tuning.enemy,
            &mut world.rng,
        );
    }

    if input.fire {
        fire_weapon(world);
    }
    resolve_melee(world);

    if world.phase == GamePhase::Playing {
        check_triggers(world);
    }
}

/// Fire along the player's facing and report the outcome
fn fire_weapon(world: &mut World) {
    let origin = world.player.pos();
    let Some(shot) = world.weapon.fire(
        world.clock,
        origin,
        world.player.facing,
        &mut world.enemies,
        world.level.walls.as_slice(),
    ) else {
        return;
    };

    world.stats.shots_fired += 1;
    world.events.push(GameEvent::ShotFired {
        origin,
        direction: shot.direction,
    });

    match shot.outcome {
        ShotOutcome::EnemyHit {
            enemy_id,
            point,
            killed,
            ..
        } => {
            world.stats.hits += 1;
            world.events.push(GameEvent::EnemyHit { enemy_id, point });
            if killed {
                world.stats.kills += 1;
                world.stats.level_kills += 1;
                world.events.push(GameEvent::EnemyKilled { enemy_id });
                log::debug!("Enemy {} killed ({} total)", enemy_id, world.stats.kills);
            }
        }
        ShotOutcome::WallImpact { point, .. } => {
            world.events.push(GameEvent::WallImpact { point });
        }
        ShotOutcome::Miss { point } => {
            world.events.push(GameEvent::ShotMissed { point });
        }
    }
}

/// Enemies in reach and off cooldown strike the player
fn resolve_melee(world: &mut World) {
    let player_pos = world.player.pos();
    let now = world.clock;
    let strikes: Vec<f32> = world
        .enemies
        .iter_mut()
        .filter(|e| e.can_attack(player_pos, now))
        .map(|e| e.attack(now))
        .collect();

    for damage in strikes {
        if world.player.is_dead() {
            break;
        }
        world.damage_player(damage);
    }
}

/// Open a quiz for the nearest active trigger in reach
fn check_triggers(world: &mut World) {
    let player_pos = world.player.pos();
    let radius = world.tuning.level.interact_radius;
    let in_reach = |pos: Vec2| pos.distance(player_pos) < radius;

    // Re-arm a suppressed trigger once the player has walked away
    if let Some(id) = world.suppressed_trigger {
        let near = world
            .level
            .triggers
            .iter()
            .any(|t| t.id == id && in_reach(t.position));
        if !near {
            world.suppressed_trigger = None;
        }
    }

    let nearest = world
        .level
        .triggers
        .iter()
        .filter(|t| t.active && Some(t.id) != world.suppressed_trigger)
        .filter(|t| in_reach(t.position))
        .min_by(|a, b| {
            a.position
                .distance_squared(player_pos)
                .total_cmp(&b.position.distance_squared(player_pos))
        })
        .map(|t| (t.id, t.level_index));

    if let Some((trigger_id, level)) = nearest {
        world.phase = GamePhase::Quiz { trigger_id };
        world.events.push(GameEvent::QuizRequested { trigger_id, level });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::Enemy;
    use crate::tuning::Tuning;

    const FRAME: f32 = 1.0 / 60.0;

    /// Empty arena with a single enemy
    fn arena_with_enemy(enemy_pos: Vec2) -> World {
        let mut world = World::new(12345, Tuning::default());
        world.load_map(1, None);
        world.enemies = vec![Enemy::new(99, enemy_pos, &world.tuning.enemy)];
        world.drain_events();
        world
    }

    #[test]
    fn test_tick_pause() {
        let mut world = World::new(12345, Tuning::default());
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        tick(&mut world, &pause, FRAME);
        assert_eq!(world.phase, GamePhase::Paused);

        let clock = world.clock;
        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.clock, clock);

        tick(&mut world, &pause, FRAME);
        assert_eq!(world.phase, GamePhase::Playing);
        assert!(world.clock > clock);
    }

    #[test]
    fn test_frame_dt_clamped() {
        let mut world = World::new(1, Tuning::default());
        tick(&mut world, &TickInput::default(), 1.0);
        assert!((world.clock - MAX_FRAME_DT as f64).abs() < 1e-9);
    }

    #[test]
    fn test_enemy_detects_approaching_player() {
        let mut world = arena_with_enemy(Vec2::new(15.0, 0.0));

        tick(&mut world, &TickInput::default(), FRAME);
        assert!(!world.enemies[0].state.is_chasing());

        let near = world.enemies[0].agent.pos - Vec2::new(5.0, 0.0);
        world.player.respawn(near);
        tick(&mut world, &TickInput::default(), FRAME);
        assert!(world.enemies[0].state.is_chasing());
    }

    #[test]
    fn test_shots_kill_enemy() {
        let mut world = arena_with_enemy(Vec2::new(0.0, -6.0));
        let input = TickInput {
            aim: Some(Vec2::NEG_Y),
            fire: true,
            ..Default::default()
        };

        for _ in 0..30 {
            tick(&mut world, &input, 0.05);
        }

        assert!(world.enemies[0].is_dead());
        assert_eq!(world.stats.kills, 1);
        assert_eq!(world.stats.hits, 2);
        assert!(world.stats.shots_fired > 2);
        let events = world.drain_events();
        assert!(events.contains(&GameEvent::EnemyKilled { enemy_id: 99 }));
    }

    #[test]
    fn test_melee_damages_player_on_cooldown() {
        let mut world = arena_with_enemy(Vec2::new(1.0, 0.0));

        tick(&mut world, &TickInput::default(), FRAME);
        let vitals = world.player.agent.vitals;
        assert_eq!(vitals.shield, 90.0);

        // Still cooling down
        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.player.agent.vitals.shield, 90.0);
    }

    #[test]
    fn test_player_death_ends_run() {
        let mut world = arena_with_enemy(Vec2::new(1.0, 0.0));
        world.damage_player(195.0);

        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.phase, GamePhase::GameOver);

        let clock = world.clock;
        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.clock, clock);
    }

    #[test]
    fn test_trigger_opens_quiz_and_suspends() {
        let mut world = World::new(3, Tuning::default());
        world.enemies.clear();
        let trigger = world.level.triggers[0].clone();
        world.player.respawn(trigger.position);
        world.drain_events();

        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.phase, GamePhase::Quiz { trigger_id: trigger.id });
        assert_eq!(
            world.drain_events(),
            vec![GameEvent::QuizRequested {
                trigger_id: trigger.id,
                level: 1
            }]
        );

        let clock = world.clock;
        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.clock, clock);

        world.answer_quiz(true);
        assert!(!world.level.triggers[0].active);

        // Spent trigger never prompts again
        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.phase, GamePhase::Playing);
    }

    #[test]
    fn test_wrong_answer_waits_for_player_to_leave() {
        let mut world = World::new(3, Tuning::default());
        world.enemies.clear();
        let trigger = world.level.triggers[0].clone();
        world.player.respawn(trigger.position);

        tick(&mut world, &TickInput::default(), FRAME);
        world.answer_quiz(false);
        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.phase, GamePhase::Playing);

        // Walk away, come back
        world.player.respawn(trigger.position + Vec2::new(0.0, 3.5));
        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.suppressed_trigger, None);
        world.player.respawn(trigger.position);
        tick(&mut world, &TickInput::default(), FRAME);
        assert_eq!(world.phase, GamePhase::Quiz { trigger_id: trigger.id });
    }

    #[test]
    fn test_determinism() {
        // Two worlds with the same seed produce identical results
        let mut world1 = World::new(99999, Tuning::default());
        let mut world2 = World::new(99999, Tuning::default());

        let inputs = [
            TickInput {
                movement: MoveIntent {
                    forward: true,
                    ..Default::default()
                },
                aim: Some(Vec2::new(1.0, 0.3)),
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut world1, input, FRAME);
                tick(&mut world2, input, FRAME);
            }
        }

        assert_eq!(world1.player.pos(), world2.player.pos());
        assert_eq!(world1.enemies, world2.enemies);
        assert_eq!(world1.events, world2.events);
        assert_eq!(world1.phase, world2.phase);
    }
}
