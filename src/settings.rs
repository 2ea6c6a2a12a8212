//! Session settings
//!
//! Field layout, shot economy and projectile tuning. Loaded from JSON; every
//! field falls back to its default when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Settings loading errors
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] SimError),
}

/// Session tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f64,
    pub field_height: f64,
    /// Half side of the target-free square around the turret
    pub exclusion_half_extent: f64,

    // === Shots ===
    /// Shots available on level 1
    pub starting_shots: u32,
    /// Draws per prize catalog (catalog shrinks on duplicates)
    pub prize_count: usize,

    // === Projectile ===
    /// Distance travelled per tick
    pub projectile_speed: f64,
    pub projectile_radius: f64,

    // === Targets ===
    /// Durable counter at spawn
    pub durable_hits: i32,
    /// Glass targets deflect the projectile instead of letting it pass
    pub glass_deflects: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            exclusion_half_extent: EXCLUSION_HALF_EXTENT,

            starting_shots: STARTING_SHOTS,
            prize_count: PRIZE_COUNT,

            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,

            durable_hits: DURABLE_HITS,
            glass_deflects: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject layouts the generator cannot sample from
    pub fn validate(&self) -> Result<(), SimError> {
        let width = SimError::check_non_negative("field width", self.field_width)?;
        let height = SimError::check_non_negative("field height", self.field_height)?;
        if width - TARGET_WIDTH < 1.0 {
            return Err(SimError::InvalidGeometry {
                what: "field width",
                value: width,
            });
        }
        if height - TARGET_HEIGHT < 1.0 {
            return Err(SimError::InvalidGeometry {
                what: "field height",
                value: height,
            });
        }
        SimError::check_non_negative("exclusion half extent", self.exclusion_half_extent)?;
        SimError::check_positive("projectile radius", self.projectile_radius)?;
        SimError::check_positive("projectile speed", self.projectile_speed)?;
        if self.prize_count == 0 {
            return Err(SimError::InvalidSetting {
                what: "prize count",
                value: 0,
            });
        }
        if self.durable_hits < 0 {
            return Err(SimError::InvalidSetting {
                what: "durable hits",
                value: i64::from(self.durable_hits),
            });
        }
        Ok(())
    }
}
