//! Sound cues for the audio collaborator
//!
//! The simulation never plays audio itself. Hosts map drained
//! [`GameEvent`]s to cues and play them fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Weapon fired
    Shoot,
    /// Player took damage
    Damage,
    /// Player healed
    Pickup,
    /// Quiz answered correctly
    Correct,
    /// Quiz answered incorrectly
    Wrong,
    /// Level cleared
    LevelComplete,
    /// Final level cleared
    Win,
    /// Player died
    Die,
}

impl SoundCue {
    /// Cue id understood by the audio collaborator
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Shoot => "shoot",
            SoundCue::Damage => "damage",
            SoundCue::Pickup => "pickup",
            SoundCue::Correct => "correct",
            SoundCue::Wrong => "wrong",
            SoundCue::LevelComplete => "level_complete",
            SoundCue::Win => "win",
            SoundCue::Die => "die",
        }
    }
}

/// Cue to play for an event, if any
pub fn cue_for(event: &GameEvent) -> Option<SoundCue> {
    match event {
        GameEvent::ShotFired { .. } => Some(SoundCue::Shoot),
        GameEvent::PlayerDamaged { .. } => Some(SoundCue::Damage),
        GameEvent::PlayerHealed { .. } => Some(SoundCue::Pickup),
        GameEvent::AnswerCorrect { .. } => Some(SoundCue::Correct),
        GameEvent::AnswerIncorrect => Some(SoundCue::Wrong),
        GameEvent::LevelComplete { .. } => Some(SoundCue::LevelComplete),
        GameEvent::Victory => Some(SoundCue::Win),
        GameEvent::PlayerDied => Some(SoundCue::Die),
        GameEvent::LevelLoaded { .. }
        | GameEvent::EnemyHit { .. }
        | GameEvent::EnemyKilled { .. }
        | GameEvent::WallImpact { .. }
        | GameEvent::ShotMissed { .. }
        | GameEvent::QuizRequested { .. } => None,
    }
}

/// Gain for a cue after applying user preferences
pub fn cue_volume(cue: SoundCue, settings: &crate::Settings) -> f32 {
    let base = match cue {
        SoundCue::Shoot => 0.3,
        SoundCue::Damage | SoundCue::Wrong => 0.5,
        SoundCue::Pickup | SoundCue::Correct => 0.4,
        SoundCue::LevelComplete | SoundCue::Win | SoundCue::Die => 0.6,
    };
    base * settings.effective_volume()
}
