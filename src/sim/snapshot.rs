//! Read-only per-frame view for renderers

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::session::Session;
use super::state::{EntityId, SessionPhase, Target, TargetKind};
use crate::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: EntityId,
    pub position: Position,
    pub size: DVec2,
    pub kind: TargetKind,
    /// Durable targets only
    pub hits_remaining: Option<i32>,
}

impl From<&Target> for TargetView {
    fn from(target: &Target) -> Self {
        Self {
            id: target.id,
            position: target.pos,
            size: target.size,
            kind: target.kind,
            hits_remaining: target.hits_remaining(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub radius: f64,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub level: u32,
    pub phase: SessionPhase,
    pub aim: f64,
    pub remaining_shots: u32,
    pub targets: Vec<TargetView>,
    pub projectile: Option<ProjectileView>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        Self {
            level: session.level(),
            phase: session.phase(),
            aim: session.aim(),
            remaining_shots: session.remaining_shots(),
            targets: session.targets().iter().map(TargetView::from).collect(),
            projectile: session.projectile().map(|p| ProjectileView {
                position: p.pos,
                radius: p.radius,
            }),
        }
    }

    /// Turret can fire this frame (drives the turret's ready indicator)
    pub fn ready_to_fire(&self) -> bool {
        self.phase == SessionPhase::InProgress && self.projectile.is_none() && self.remaining_shots > 0
    }
}
