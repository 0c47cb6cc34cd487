//! Grid Arena - headless native runner
//!
//! Drives the simulation at 60 fps with a scripted bot and logs what happens.
//! Usage: `grid-arena [seed] [frames]`

#[cfg(not(target_arch = "wasm32"))]
mod bot {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use grid_arena::audio::cue_for;
    use grid_arena::quiz::{QuestionBank, QuizProvider};
    use grid_arena::sim::{GameEvent, GamePhase, MoveIntent, SolidQuery, TickInput, World, tick};
    use grid_arena::{Settings, Tuning, yaw_to_forward};

    /// Frame time the runner feeds the simulation
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest simulated mouse motion per frame (pixels)
    const MAX_MOUSE_PX: f32 = 40.0;
    /// Enemies closer than this are engaged
    const ENGAGE_RANGE: f32 = 12.0;
    /// Aim error below which the bot pulls the trigger (radians)
    const FIRE_CONE: f32 = 0.08;
    /// Chance the bot knows the answer
    const ANSWER_SKILL: f64 = 0.8;

    struct Bot {
        yaw: f32,
        rng: Pcg32,
        settings: Settings,
        bank: QuestionBank,
    }

    impl Bot {
        /// Pick the next input: engage a visible enemy, otherwise head for a trigger
        fn input(&mut self, world: &World) -> TickInput {
            let pos = world.player.pos();
            let walls = world.level.walls.as_slice();

            let visible_enemy = world
                .live_enemies()
                .map(|e| e.agent.pos)
                .filter(|p| p.distance(pos) < ENGAGE_RANGE)
                .filter(|p| {
                    let to = *p - pos;
                    walls
                        .nearest_solid_hit(pos, to, to.length())
                        .is_none()
                })
                .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)));

            let trigger = world
                .level
                .triggers
                .iter()
                .filter(|t| t.active && Some(t.id) != world.suppressed_trigger)
                .map(|t| t.position)
                .min_by(|a, b| a.distance_squared(pos).total_cmp(&b.distance_squared(pos)));

            let Some(target) = visible_enemy.or(trigger) else {
                return TickInput::default();
            };

            let facing = yaw_to_forward(self.yaw);
            let turn = facing.angle_to(target - pos);
            let mouse_dx = (turn / self.settings.mouse_sensitivity).clamp(-MAX_MOUSE_PX, MAX_MOUSE_PX);
            self.yaw -= self.settings.look_delta(mouse_dx);
            let aim = yaw_to_forward(self.yaw);

            let blocked = walls.is_blocked(pos, aim, 1.0);
            let movement = MoveIntent {
                forward: visible_enemy.is_none() && !blocked,
                right: blocked,
                ..Default::default()
            };

            TickInput {
                movement,
                aim: Some(aim),
                fire: visible_enemy.is_some() && turn.abs() < FIRE_CONE,
                pause: false,
            }
        }

        /// Answer the open quiz, mostly correctly
        fn answer(&mut self, world: &mut World, trigger_id: u32) {
            let level = world
                .level
                .triggers
                .iter()
                .find(|t| t.id == trigger_id)
                .map(|t| t.level_index)
                .unwrap_or(world.level.index);

            let Some(question) = self.bank.question_for(level, &mut self.rng) else {
                world.dismiss_quiz();
                return;
            };

            let choice = if self.rng.random_bool(ANSWER_SKILL) {
                question.answer
            } else {
                (question.answer + 1) % question.options.len()
            };
            log::info!(
                "Quiz: {} -> {}",
                question.prompt,
                question.options[choice]
            );
            world.answer_quiz(question.is_correct(choice));
        }
    }

    fn log_event(event: &GameEvent) {
        let cue = cue_for(event).map(|c| c.as_str()).unwrap_or("-");
        match event {
            GameEvent::ShotFired { .. } | GameEvent::ShotMissed { .. } | GameEvent::WallImpact { .. } => {
                log::debug!("{:?} [{}]", event, cue)
            }
            _ => log::info!("{:?} [{}]", event, cue),
        }
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345u64);
        let frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 300u32);

        let bank = match QuestionBank::builtin() {
            Ok(bank) => bank,
            Err(err) => {
                log::error!("Failed to load question bank: {}", err);
                return;
            }
        };

        let mut world = World::new(seed, Tuning::default());
        let mut bot = Bot {
            yaw: 0.0,
            rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
            settings: Settings::default(),
            bank,
        };

        log::info!("Running seed {} for up to {} frames", seed, frames);

        let mut frame = 0;
        while frame < frames {
            match world.phase {
                GamePhase::Quiz { trigger_id } => bot.answer(&mut world, trigger_id),
                GamePhase::GameOver | GamePhase::Victory => break,
                GamePhase::Playing | GamePhase::Paused => {
                    let input = bot.input(&world);
                    tick(&mut world, &input, FRAME_DT);
                    frame += 1;
                }
            }

            for event in world.drain_events() {
                log_event(&event);
            }
        }

        let stats = world.stats;
        let vitals = world.player.agent.vitals;
        log::info!(
            "Finished after {} frames ({:.1}s): phase {:?}, level {}, kills {}, shots {}/{} hit, answers {} correct / {} wrong, health {:.0}, shield {:.0}",
            frame,
            world.clock,
            world.phase,
            world.level.index,
            stats.kills,
            stats.hits,
            stats.shots_fired,
            stats.correct_answers,
            stats.incorrect_answers,
            vitals.health,
            vitals.shield,
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Grid Arena (headless) starting...");
    bot::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library; browser hosts embed it directly
}
