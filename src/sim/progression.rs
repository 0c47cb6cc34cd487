//! Progression gate: correct answers per level and level advancement

use serde::{Deserialize, Serialize};

use super::grid::Trigger;

/// What recording an answer did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    /// Trigger was already spent; nothing changed
    Ignored,
    Incorrect,
    /// Counted; `remaining` more needed to clear the level
    Correct { remaining: u32 },
    /// Threshold met on a non-final level
    LevelComplete { level: u32 },
    /// Threshold met on the final level
    Victory,
}

/// Per-level answer tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    /// Current level, 1-based
    pub level_index: u32,
    pub correct_answers: u32,
    pub required_answers: u32,
    pub final_level: u32,
}

impl Progression {
    pub fn new(level_index: u32, required_answers: u32, final_level: u32) -> Self {
        Self {
            level_index,
            correct_answers: 0,
            required_answers,
            final_level,
        }
    }

    /// Start counting for a freshly loaded level
    pub fn reset(&mut self, level_index: u32, required_answers: u32) {
        self.level_index = level_index;
        self.correct_answers = 0;
        self.required_answers = required_answers;
    }

    /// Correct answers still needed on this level
    pub fn remaining(&self) -> u32 {
        self.required_answers.saturating_sub(self.correct_answers)
    }

    pub fn is_final_level(&self) -> bool {
        self.level_index >= self.final_level
    }

    /// Record a quiz outcome for `trigger`.
    ///
    /// A correct answer deactivates the trigger for good and counts toward the
    /// threshold; meeting it resets the counter and reports completion. An
    /// incorrect answer changes nothing. Inactive triggers are ignored.
    pub fn record_answer(&mut self, trigger: &mut Trigger, correct: bool) -> AnswerOutcome {
        if !trigger.active {
            return AnswerOutcome::Ignored;
        }
        if !correct {
            return AnswerOutcome::Incorrect;
        }

        trigger.active = false;
        self.correct_answers += 1;

        if self.correct_answers < self.required_answers {
            return AnswerOutcome::Correct {
                remaining: self.remaining(),
            };
        }

        self.correct_answers = 0;
        if self.is_final_level() {
            AnswerOutcome::Victory
        } else {
            AnswerOutcome::LevelComplete {
                level: self.level_index,
            }
        }
    }
}
