//! Difficulty presets and game settings
//!
//! Settings come from the host page (or the command line when headless).
//! Nothing is persisted between sessions.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH, TICK_PERIOD_MS};
use crate::sim::Arena;

/// Difficulty preset; only controls how often obstacle pairs spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Impossible,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impossible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Impossible => "Impossible",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "impossible" => Some(Difficulty::Impossible),
            _ => None,
        }
    }

    /// Ticks between obstacle-pair spawns
    pub fn spawn_interval(&self) -> u32 {
        match self {
            Difficulty::Easy => 100,
            Difficulty::Medium => 25,
            Difficulty::Hard => 10,
            Difficulty::Impossible => 5,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Canvas size (the browser build overrides these with the canvas element's size)
    pub width: f32,
    pub height: f32,
    /// Milliseconds between ticks
    pub tick_period_ms: u32,
    /// Drop obstacles once they have fully left the canvas
    pub evict_offscreen: bool,
    /// Fixed RNG seed; the host clock is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_period_ms: TICK_PERIOD_MS,
            evict_offscreen: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(format!("width must be positive, got {}", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(format!("height must be positive, got {}", self.height));
        }
        if self.tick_period_ms == 0 {
            return Err("tick_period_ms must be at least 1".to_string());
        }
        Ok(())
    }

    /// Parse and validate, falling back to defaults on any problem
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    log::error!("Invalid settings ({}), using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::error!("Could not parse settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.width, self.height)
    }

    pub fn spawn_interval(&self) -> u32 {
        self.difficulty.spawn_interval()
    }
}
