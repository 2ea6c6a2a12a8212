//! Collision detection and response for the projectile against targets
//!
//! The projectile circle is treated as its bounding box, so both shapes are
//! axis-aligned and the overlap test is a plain AABB check. A hit resolves
//! exactly one axis: whichever has the smaller penetration.

use glam::DVec2;

use super::state::{EntityId, Projectile, Target};
use crate::{Position, Velocity};

/// Which pair of edges a contact resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitAxis {
    /// Left or right edge, horizontal velocity flipped
    Side,
    /// Top or bottom edge, vertical velocity flipped
    Cap,
}

/// Velocity flip and position snap for a single contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub axis: HitAxis,
    pub velocity: Velocity,
    pub position: Position,
}

/// Result of a broad-phase + narrow-phase pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub target_id: EntityId,
    pub axis: HitAxis,
    /// Velocity after the flip
    pub velocity: Velocity,
    /// Position flush against the struck edge
    pub position: Position,
}

/// Strict AABB overlap between the projectile's bounding box and a target
#[inline]
pub fn overlaps(projectile: &Projectile, target: &Target) -> bool {
    let (p, r) = (projectile.pos, projectile.radius);
    let (t, s) = (target.pos, target.size);

    p.x + r > t.x && p.x - r < t.x + s.x && p.y + r > t.y && p.y - r < t.y + s.y
}

/// Compute the deflection for a projectile against one target.
///
/// Does not check for overlap first. Corner contacts resolve on a single
/// axis like any other hit.
pub fn bounce(projectile: &Projectile, target: &Target) -> Bounce {
    let (p, r, v) = (projectile.pos, projectile.radius, projectile.vel);
    let (t, s) = (target.pos, target.size);

    let overlap_left = (p.x + r) - t.x;
    let overlap_right = (t.x + s.x) - (p.x - r);
    let overlap_top = (p.y + r) - t.y;
    let overlap_bottom = (t.y + s.y) - (p.y - r);

    let min_overlap_x = overlap_left.min(overlap_right);
    let min_overlap_y = overlap_top.min(overlap_bottom);

    if min_overlap_x < min_overlap_y {
        let x = if overlap_left < overlap_right {
            t.x - r
        } else {
            t.x + s.x + r
        };
        Bounce {
            axis: HitAxis::Side,
            velocity: DVec2::new(-v.x, v.y),
            position: DVec2::new(x, p.y),
        }
    } else {
        let y = if overlap_top < overlap_bottom {
            t.y - r
        } else {
            t.y + s.y + r
        };
        Bounce {
            axis: HitAxis::Cap,
            velocity: DVec2::new(v.x, -v.y),
            position: DVec2::new(p.x, y),
        }
    }
}

/// Resolve at most one contact for this tick.
///
/// Targets are scanned in slice order (creation order) and the first overlap
/// wins, even if another overlapping target is closer.
pub fn resolve(projectile: &Projectile, targets: &[Target]) -> Option<CollisionResult> {
    let target = targets.iter().find(|t| overlaps(projectile, t))?;
    let Bounce {
        axis,
        velocity,
        position,
    } = bounce(projectile, target);

    log::debug!(
        "projectile {} hit {} target {} ({:?})",
        projectile.id,
        target.kind.name(),
        target.id,
        axis
    );

    Some(CollisionResult {
        target_id: target.id,
        axis,
        velocity,
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::TargetKind;

    fn projectile(x: f64, y: f64, vx: f64, vy: f64) -> Projectile {
        Projectile::new(EntityId(99), DVec2::new(x, y), DVec2::new(vx, vy), 5.0).unwrap()
    }

    fn target_at(id: u32, x: f64, y: f64) -> Target {
        Target::new(EntityId(id), DVec2::new(x, y), TargetKind::Basic).unwrap()
    }

    #[test]
    fn test_top_hit_from_above() {
        let t = target_at(1, 100.0, 100.0);
        let p = projectile(100.0, 95.0, 0.0, 5.0);

        let b = bounce(&p, &t);
        assert_eq!(b.axis, HitAxis::Cap);
        assert_eq!(b.velocity, DVec2::new(0.0, -5.0));
        assert_eq!(b.position, DVec2::new(100.0, 95.0));
    }

    #[test]
    fn test_touching_edge_is_not_overlap() {
        let t = target_at(1, 100.0, 100.0);
        let p = projectile(100.0, 95.0, 0.0, 5.0);
        assert!(!overlaps(&p, &t));
        assert!(resolve(&p, std::slice::from_ref(&t)).is_none());
    }

    #[test]
    fn test_resolve_snaps_above_target() {
        let t = target_at(1, 100.0, 100.0);
        let p = projectile(120.0, 97.0, 1.0, 5.0);

        let hit = resolve(&p, &[t]).unwrap();
        assert_eq!(hit.target_id, EntityId(1));
        assert_eq!(hit.axis, HitAxis::Cap);
        assert_eq!(hit.velocity, DVec2::new(1.0, -5.0));
        assert_eq!(hit.position, DVec2::new(120.0, 95.0));
    }

    #[test]
    fn test_bottom_hit_snaps_below() {
        let t = target_at(1, 100.0, 100.0);
        let p = projectile(125.0, 123.0, 0.0, -4.0);

        let hit = resolve(&p, &[t]).unwrap();
        assert_eq!(hit.axis, HitAxis::Cap);
        assert_eq!(hit.velocity, DVec2::new(0.0, 4.0));
        assert_eq!(hit.position.y, 125.0);
    }

    #[test]
    fn test_side_hits_snap_to_struck_edge() {
        let t = target_at(1, 100.0, 100.0);

        let from_left = resolve(&projectile(97.0, 110.0, 3.0, 0.5), std::slice::from_ref(&t)).unwrap();
        assert_eq!(from_left.axis, HitAxis::Side);
        assert_eq!(from_left.velocity, DVec2::new(-3.0, 0.5));
        assert_eq!(from_left.position, DVec2::new(95.0, 110.0));

        let from_right = resolve(&projectile(153.0, 110.0, -3.0, 0.0), &[t]).unwrap();
        assert_eq!(from_right.axis, HitAxis::Side);
        assert_eq!(from_right.velocity, DVec2::new(3.0, 0.0));
        assert_eq!(from_right.position, DVec2::new(155.0, 110.0));
    }

    #[test]
    fn test_first_overlap_in_order_wins() {
        // Both overlap; slice order alone decides
        let first = target_at(1, 104.0, 100.0);
        let second = target_at(2, 60.0, 100.0);
        let p = projectile(106.0, 110.0, 1.0, 0.0);
        assert!(overlaps(&p, &first));
        assert!(overlaps(&p, &second));

        let hit = resolve(&p, &[first.clone(), second.clone()]).unwrap();
        assert_eq!(hit.target_id, EntityId(1));

        let hit = resolve(&p, &[second, first]).unwrap();
        assert_eq!(hit.target_id, EntityId(2));
    }

    #[test]
    fn test_resolve_is_pure() {
        let t = target_at(1, 100.0, 100.0);
        let p = projectile(102.0, 117.0, 2.0, -3.0);
        let a = resolve(&p, std::slice::from_ref(&t));
        let b = resolve(&p, std::slice::from_ref(&t));
        assert_eq!(a, b);
    }
}
