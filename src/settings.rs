//! Player preferences
//!
//! Persisted separately from the session as a small JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Lowest allowed mouse sensitivity (radians per pixel)
pub const MIN_SENSITIVITY: f32 = 0.001;
/// Highest allowed mouse sensitivity (radians per pixel)
pub const MAX_SENSITIVITY: f32 = 0.5;
/// Sensitivity slider range is 1..=SLIDER_STEPS
pub const SLIDER_STEPS: u32 = 100;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Look speed (radians of yaw per pixel of mouse motion)
    pub mouse_sensitivity: f32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Mute all audio
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.002,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Set mouse sensitivity, clamped to the allowed range
    pub fn set_mouse_sensitivity(&mut self, sensitivity: f32) {
        self.mouse_sensitivity = sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
    }

    /// Slider position (1-100) for the current sensitivity
    pub fn sensitivity_slider(&self) -> u32 {
        sensitivity_to_slider(self.mouse_sensitivity)
    }

    /// Set sensitivity from a slider position (1-100)
    pub fn set_sensitivity_slider(&mut self, slider: u32) {
        self.set_mouse_sensitivity(slider_to_sensitivity(slider));
    }

    /// Yaw change (radians) for a horizontal mouse motion
    pub fn look_delta(&self, mouse_dx: f32) -> f32 {
        mouse_dx * self.mouse_sensitivity
    }

    /// Effective volume for sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = std::fs::read_to_string(path)
            .map_err(crate::Error::from)
            .and_then(|json| Ok(serde_json::from_str::<Settings>(&json)?));

        match loaded {
            Ok(mut settings) => {
                log::info!("Loaded settings from {}", path.display());
                // Re-clamp values edited by hand
                settings.set_mouse_sensitivity(settings.mouse_sensitivity);
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({})", err);
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

/// `round((s - min) / (max - min) * 99) + 1`
pub fn sensitivity_to_slider(sensitivity: f32) -> u32 {
    let t = (sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY) - MIN_SENSITIVITY)
        / (MAX_SENSITIVITY - MIN_SENSITIVITY);
    (t * (SLIDER_STEPS - 1) as f32).round() as u32 + 1
}

/// Inverse of [`sensitivity_to_slider`]
pub fn slider_to_sensitivity(slider: u32) -> f32 {
    let step = slider.clamp(1, SLIDER_STEPS) - 1;
    MIN_SENSITIVITY + step as f32 / (SLIDER_STEPS - 1) as f32 * (MAX_SENSITIVITY - MIN_SENSITIVITY)
}
