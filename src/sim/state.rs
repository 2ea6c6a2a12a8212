//! Entity model and session-level value types
//!
//! Targets and the projectile are plain owned values. Only the `Session`
//! mutates them.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::{Position, Velocity};

/// Opaque entity handle, unique within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity-{}", self.0)
    }
}

/// Monotonic id source; ids are never reused within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Targets remain and play continues
    InProgress,
    /// Every target destroyed, waiting for the host to advance
    LevelComplete,
    /// Applying progression (only observable from inside `Session::advance`)
    Advancing,
    /// Targets remain, no shots, nothing in flight
    GameOver,
}

/// Lifecycle notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    LevelStart { level: u32, granted_shots: u32 },
    LevelComplete { level: u32 },
    GameOver { level: u32 },
    /// Remaining shots changed (fire or grant)
    StatsUpdated { remaining_shots: u32 },
}

/// Target variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    /// Destroyed on first contact, deflects the projectile
    Basic,
    /// Destroyed on first contact; deflection is a session setting
    Glass,
    /// Counter drops on every contact, destroyed once it goes below zero
    Durable { hits_remaining: i32 },
}

impl TargetKind {
    pub fn name(&self) -> &'static str {
        match self {
            TargetKind::Basic => "basic",
            TargetKind::Glass => "glass",
            TargetKind::Durable { .. } => "durable",
        }
    }

    /// Durable variant with the standard hit budget
    pub fn durable() -> Self {
        TargetKind::Durable {
            hits_remaining: DURABLE_HITS,
        }
    }
}

/// What a contact did to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// Projectile takes the collision's velocity/position correction
    pub bounce: bool,
    /// Target must be removed from the live set
    pub destroyed: bool,
}

/// A destructible rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: EntityId,
    /// Top-left corner
    pub pos: Position,
    pub size: DVec2,
    pub kind: TargetKind,
}

impl Target {
    /// Build a target at `pos` with the fixed target size
    pub fn new(id: EntityId, pos: Position, kind: TargetKind) -> Result<Self, SimError> {
        Self::with_size(id, pos, DVec2::new(TARGET_WIDTH, TARGET_HEIGHT), kind)
    }

    pub fn with_size(
        id: EntityId,
        pos: Position,
        size: DVec2,
        kind: TargetKind,
    ) -> Result<Self, SimError> {
        SimError::check_non_negative("target width", size.x)?;
        SimError::check_non_negative("target height", size.y)?;
        if !pos.is_finite() {
            return Err(SimError::InvalidGeometry {
                what: "target position",
                value: if pos.x.is_finite() { pos.y } else { pos.x },
            });
        }
        Ok(Self { id, pos, size, kind })
    }

    /// Apply one contact. Decrements before checking, so a durable target
    /// with `hits_remaining = n` breaks on contact `n + 1`.
    pub fn on_hit(&mut self, glass_deflects: bool) -> HitOutcome {
        match &mut self.kind {
            TargetKind::Basic => HitOutcome {
                bounce: true,
                destroyed: true,
            },
            TargetKind::Glass => HitOutcome {
                bounce: glass_deflects,
                destroyed: true,
            },
            TargetKind::Durable { hits_remaining } => {
                *hits_remaining -= 1;
                HitOutcome {
                    bounce: true,
                    destroyed: *hits_remaining < 0,
                }
            }
        }
    }

    /// Durable counter exhausted. Basic and glass targets never linger in
    /// this state; they leave the live set on their first contact.
    pub fn is_destroyed(&self) -> bool {
        matches!(self.kind, TargetKind::Durable { hits_remaining } if hits_remaining < 0)
    }

    /// Remaining durability, durable targets only
    pub fn hits_remaining(&self) -> Option<i32> {
        match self.kind {
            TargetKind::Durable { hits_remaining } => Some(hits_remaining),
            _ => None,
        }
    }

    pub fn center(&self) -> Position {
        self.pos + self.size / 2.0
    }
}

/// The single in-flight shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    /// Centre of the circle
    pub pos: Position,
    pub vel: Velocity,
    pub radius: f64,
}

impl Projectile {
    pub fn new(id: EntityId, pos: Position, vel: Velocity, radius: f64) -> Result<Self, SimError> {
        SimError::check_non_negative("projectile radius", radius)?;
        Ok(Self {
            id,
            pos,
            vel,
            radius,
        })
    }

    /// Advance by one tick of velocity
    #[inline]
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Centre left the `width` x `height` field
    pub fn is_outside(&self, width: f64, height: f64) -> bool {
        self.pos.x < 0.0 || self.pos.y < 0.0 || self.pos.x > width || self.pos.y > height
    }
}
