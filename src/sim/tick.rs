//! Fixed-step session tick
//!
//! One call per rendered frame. Order within a tick: input, collision
//! resolution (at most one contact), integration, bounds check, terminal
//! checks.

use super::collision::resolve;
use super::session::Session;
use super::state::{EntityId, HitOutcome, SessionPhase, Target};
use crate::angle_between_points;
use crate::error::SimError;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New aim angle (radians), if the pointer moved
    pub aim: Option<f64>,
    /// Fire trigger (click/tap)
    pub fire: bool,
    /// Idle/demo mode - aim at the first live target and fire when ready
    pub idle_mode: bool,
}

/// Advance the session by one tick.
///
/// Does nothing outside `InProgress`, so a cleared or lost session stays put
/// until the host calls `advance` or drops it.
pub fn tick(session: &mut Session, input: &TickInput) {
    if session.phase != SessionPhase::InProgress {
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(session, &mut input);
    }

    if let Some(aim) = input.aim {
        session.set_aim(aim);
    }
    if input.fire {
        session.fire();
    }

    session.ticks += 1;
    step_projectile(session);

    if session.targets.is_empty() {
        session.complete_level();
    } else if session.projectile.is_none() && session.remaining_shots == 0 {
        session.end_game();
    }
}

/// Resolve one contact, integrate, and drop the projectile once it leaves
/// the field. Leaving the field never refunds or consumes a shot.
fn step_projectile(session: &mut Session) {
    let glass_deflects = session.settings.glass_deflects;
    let (width, height) = (session.settings.field_width, session.settings.field_height);

    let Some(projectile) = session.projectile.as_mut() else {
        return;
    };

    if let Some(hit) = resolve(projectile, &session.targets) {
        match apply_hit(&mut session.targets, hit.target_id, glass_deflects) {
            Ok(outcome) if outcome.bounce => {
                projectile.vel = hit.velocity;
                projectile.pos = hit.position;
            }
            Ok(_) => {}
            Err(err) => log::debug!("{}", err),
        }
    }

    projectile.integrate();

    if projectile.is_outside(width, height) {
        log::debug!("projectile {} left the field at {}", projectile.id, projectile.pos);
        session.projectile = None;
    }
}

/// Apply the variant's hit policy and remove the target if it broke
fn apply_hit(
    targets: &mut Vec<Target>,
    id: EntityId,
    glass_deflects: bool,
) -> Result<HitOutcome, SimError> {
    let index = targets
        .iter()
        .position(|t| t.id == id)
        .ok_or(SimError::MissingEntity { id })?;

    let outcome = targets[index].on_hit(glass_deflects);
    if outcome.destroyed {
        let target = targets.remove(index);
        log::debug!("{} target {} destroyed", target.kind.name(), target.id);
    }
    Ok(outcome)
}

/// Demo player: track the first live target, fire whenever allowed
fn autopilot(session: &Session, input: &mut TickInput) {
    if let Some(target) = session.targets.first() {
        input.aim = Some(angle_between_points(target.center(), session.center()));
    }
    input.fire = session.can_fire();
}
