//! Question bank behind the trigger prompts
//!
//! The simulation only asks for a question for a level and later receives a
//! correct/incorrect verdict; how the question is shown is up to the host.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default question bank shipped with the crate
const BUILTIN_QUESTIONS: &str = include_str!("../assets/questions.json");

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Level whose triggers ask this question (1-based)
    pub level: u32,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct choice
    pub answer: usize,
}

impl Question {
    pub fn is_valid(&self) -> bool {
        !self.prompt.is_empty() && self.answer < self.options.len()
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer
    }
}

/// Source of quiz prompts for a level
pub trait QuizProvider {
    /// Pick a question for `level`, or `None` if it has none
    fn question_for<R: Rng>(&self, level: u32, rng: &mut R) -> Option<&Question>;
}

/// Questions grouped by level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// Build from a list, dropping malformed entries
    pub fn new(questions: Vec<Question>) -> Self {
        let (questions, invalid): (Vec<_>, Vec<_>) =
            questions.into_iter().partition(Question::is_valid);
        for q in &invalid {
            log::warn!("Skipping malformed question for level {}: {:?}", q.level, q.prompt);
        }
        Self { questions }
    }

    /// Parse a JSON array of questions
    pub fn from_json(json: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(json)?;
        Ok(Self::new(questions))
    }

    /// Load a question bank from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let bank = Self::from_json(&json)?;
        log::info!("Loaded {} questions", bank.len());
        Ok(bank)
    }

    /// The bundled default bank
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_QUESTIONS)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions for one level
    pub fn for_level(&self, level: u32) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.level == level)
    }
}

impl QuizProvider for QuestionBank {
    fn question_for<R: Rng>(&self, level: u32, rng: &mut R) -> Option<&Question> {
        let count = self.for_level(level).count();
        if count == 0 {
            log::warn!("No questions for level {}", level);
            return None;
        }
        self.for_level(level).nth(rng.random_range(0..count))
    }
}
