//! Session engine
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - One fixed step per `tick` call, driven by the host
//! - Randomness only through an injected `RngCore`
//! - Stable iteration order (creation order of entities)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod prize;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Bounce, CollisionResult, HitAxis, bounce, overlaps, resolve};
pub use level::{ExclusionZone, LevelGenerator, generate_level, target_roster};
pub use prize::{Prize, PrizeCatalog, PrizeTier};
pub use session::Session;
pub use snapshot::{ProjectileView, Snapshot, TargetView};
pub use state::{
    EntityId, HitOutcome, IdAllocator, Projectile, SessionEvent, SessionPhase, Target, TargetKind,
};
pub use tick::{TickInput, tick};

use rand::RngCore;

/// Draw one uniformly distributed byte
#[inline]
pub(crate) fn random_byte<R: RngCore + ?Sized>(rng: &mut R) -> u8 {
    let mut byte = [0u8; 1];
    rng.fill_bytes(&mut byte);
    byte[0]
}
