//! Turret Breaker - a turret fires one projectile at a field of destructible targets
//!
//! Core modules:
//! - `sim`: Session engine (entities, collisions, level generation, prizes, state machine)
//! - `settings`: Data-driven session configuration
//! - `error`: Error taxonomy shared by the engine
//!
//! Rendering, window chrome and pointer capture live outside this crate. A host
//! drives [`sim::tick`] once per frame, reads [`sim::Snapshot`]s and reacts to
//! [`sim::SessionEvent`]s.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{Settings, SettingsError};

use glam::DVec2;

/// Position in field coordinates (origin top-left, y grows downward)
pub type Position = DVec2;
/// Per-tick displacement
pub type Velocity = DVec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate the host drives ticks at
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum ticks processed per host frame (prevents spiral of death)
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Target rectangle (fixed for every variant)
    pub const TARGET_WIDTH: f64 = 50.0;
    pub const TARGET_HEIGHT: f64 = 20.0;
    /// Contacts a durable target absorbs before the breaking one
    pub const DURABLE_HITS: i32 = 3;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f64 = 5.0;
    pub const PROJECTILE_SPEED: f64 = 10.0;

    /// Default play-field
    pub const FIELD_WIDTH: f64 = 800.0;
    pub const FIELD_HEIGHT: f64 = 600.0;
    /// Half side of the no-target square around the turret
    pub const EXCLUSION_HALF_EXTENT: f64 = 50.0;

    /// Shots granted when a session starts
    pub const STARTING_SHOTS: u32 = 3;
    /// Random draws per prize catalog
    pub const PRIZE_COUNT: usize = 5;
}

/// Angle (radians) of the vector pointing from `from` to `to`
#[inline]
pub fn angle_between_points(from: Position, to: Position) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Launch velocity for an aim angle.
///
/// Aim angles are measured from the pointer toward the turret, so the
/// projectile travels along the negated direction, back toward the pointer.
#[inline]
pub fn direction_from_angle(angle: f64, speed: f64) -> Velocity {
    DVec2::new(-speed * angle.cos(), -speed * angle.sin())
}

/// Centre point of a `width` x `height` field
#[inline]
pub fn field_center(width: f64, height: f64) -> Position {
    DVec2::new(width / 2.0, height / 2.0)
}
