//! Data-driven game balance
//!
//! Loaded from JSON. Missing fields fall back to the stock values, so a tuning
//! file only needs to name the knobs it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::ENEMY_RADIUS_MAX;

/// Balance knobs for one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield width in pixels
    pub frame_width: u32,
    /// Playfield height in pixels
    pub frame_height: u32,
    /// Number of background stars
    pub star_count: usize,
    /// Fraction of the remaining distance to the target closed each frame
    pub player_smoothing: f32,
    /// Frames between shots
    pub shoot_cooldown: u32,
    /// Initial seconds between enemy spawns
    pub spawn_interval: f64,
    /// Floor for the spawn interval
    pub min_spawn_interval: f64,
    /// Multiplier applied to the interval after every spawn
    pub spawn_decay: f64,
    /// Particles emitted per explosion
    pub explosion_particles: usize,
    /// Chance that a destroyed enemy drops a health power-up
    pub powerup_drop_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            frame_width: 640,
            frame_height: 480,
            star_count: 100,
            player_smoothing: 0.2,
            shoot_cooldown: 5,
            spawn_interval: 2.0,
            min_spawn_interval: 0.5,
            spawn_decay: 0.99,
            explosion_particles: 20,
            powerup_drop_chance: 0.15,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let min_width = 2 * ENEMY_RADIUS_MAX as u32;
        if self.frame_width < min_width {
            return Err(TuningError::invalid(
                "frame_width",
                format!("must be at least {min_width} to fit the largest enemy"),
            ));
        }
        if self.frame_height == 0 {
            return Err(TuningError::invalid("frame_height", "must be positive"));
        }
        if !(self.player_smoothing > 0.0 && self.player_smoothing <= 1.0) {
            return Err(TuningError::invalid("player_smoothing", "must be in (0, 1]"));
        }
        if !(self.min_spawn_interval > 0.0) {
            return Err(TuningError::invalid("min_spawn_interval", "must be positive"));
        }
        if !(self.spawn_interval >= self.min_spawn_interval) {
            return Err(TuningError::invalid(
                "spawn_interval",
                "must not be below min_spawn_interval",
            ));
        }
        if !(self.spawn_decay > 0.0 && self.spawn_decay <= 1.0) {
            return Err(TuningError::invalid("spawn_decay", "must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            return Err(TuningError::invalid("powerup_drop_chance", "must be in [0, 1]"));
        }
        Ok(())
    }

    /// Player spawn point: horizontally centered, near the bottom edge
    pub fn player_spawn(&self) -> (f32, f32) {
        let x = self.frame_width / 2;
        let y = self
            .frame_height
            .saturating_sub(crate::consts::PLAYER_SPAWN_OFFSET);
        (x as f32, y as f32)
    }
}

/// Why a tuning document was rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("could not read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value the simulation cannot run with
    #[error("invalid tuning `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl TuningError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "frame_width": 1280, "star_count": 10 }"#).unwrap();
        assert_eq!(tuning.frame_width, 1280);
        assert_eq!(tuning.star_count, 10);
        assert_eq!(tuning.frame_height, 480);
        assert_eq!(tuning.spawn_interval, 2.0);
    }

    #[test]
    fn test_rejects_narrow_frame() {
        let err = Tuning::from_json(r#"{ "frame_width": 40 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "frame_width", .. }));
    }

    #[test]
    fn test_rejects_bad_decay() {
        let err = Tuning::from_json(r#"{ "spawn_decay": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "spawn_decay", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ frame_width: }").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("malformed tuning json"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Tuning::load("/nonexistent/starjet-tuning.json").unwrap_err();
        assert!(matches!(err, TuningError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_message_names_field() {
        let err = Tuning::from_json(r#"{ "powerup_drop_chance": 1.5 }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid tuning `powerup_drop_chance`: must be in [0, 1]"
        );
    }

    #[test]
    fn test_player_spawn_uses_integer_center() {
        let tuning = Tuning {
            frame_width: 641,
            ..Default::default()
        };
        assert_eq!(tuning.player_spawn(), (320.0, 380.0));
    }
}
