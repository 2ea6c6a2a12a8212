//! Session aggregate: level, live targets, projectile slot and shot economy
//!
//! The session is the only owner of targets and the projectile. Hosts drive
//! it through [`super::tick`], `fire`/`set_aim` and `advance`, and read it
//! back through [`Snapshot`]s and drained [`SessionEvent`]s.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::level::LevelGenerator;
use super::prize::{Prize, PrizeCatalog};
use super::snapshot::Snapshot;
use super::state::{EntityId, IdAllocator, Projectile, SessionEvent, SessionPhase, Target, TargetKind};
use crate::error::SimError;
use crate::settings::Settings;
use crate::{Position, angle_between_points, direction_from_angle, field_center};

/// A single-player run from level 1 until game over
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) settings: Settings,
    seed: u64,
    pub(super) rng: Pcg32,
    ids: IdAllocator,
    generator: LevelGenerator,
    pub(super) level: u32,
    pub(super) phase: SessionPhase,
    /// Live targets in creation order (collision tie-break order)
    pub(super) targets: Vec<Target>,
    pub(super) projectile: Option<Projectile>,
    pub(super) remaining_shots: u32,
    /// Radians, measured from the pointer toward the turret
    aim: f64,
    pub(super) ticks: u64,
    prize_catalog: Option<PrizeCatalog>,
    pending_prize: Option<Prize>,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Start a session on a generated level 1
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SimError> {
        let mut session = Self::empty(settings, seed)?;
        let targets = session
            .generator
            .generate(1, &mut session.rng, &mut session.ids)?;
        session.start(targets);
        Ok(session)
    }

    /// Start a session whose level 1 uses hand-placed targets
    pub fn with_targets(
        settings: Settings,
        seed: u64,
        placements: &[(Position, TargetKind)],
    ) -> Result<Self, SimError> {
        let mut session = Self::empty(settings, seed)?;
        let targets = placements
            .iter()
            .map(|&(pos, kind)| Target::new(session.ids.next_id(), pos, kind))
            .collect::<Result<Vec<_>, _>>()?;
        session.start(targets);
        Ok(session)
    }

    fn empty(settings: Settings, seed: u64) -> Result<Self, SimError> {
        settings.validate()?;
        Ok(Self {
            generator: LevelGenerator::from_settings(&settings),
            remaining_shots: settings.starting_shots,
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ids: IdAllocator::default(),
            level: 1,
            phase: SessionPhase::InProgress,
            targets: Vec::new(),
            projectile: None,
            aim: 0.0,
            ticks: 0,
            prize_catalog: None,
            pending_prize: None,
            events: Vec::new(),
        })
    }

    fn start(&mut self, targets: Vec<Target>) {
        self.targets = targets;
        log::info!(
            "Level {} start: {} targets, {} shots",
            self.level,
            self.targets.len(),
            self.remaining_shots
        );
        self.events.push(SessionEvent::LevelStart {
            level: self.level,
            granted_shots: self.remaining_shots,
        });
        self.push_stats();
    }

    fn push_stats(&mut self) {
        self.events.push(SessionEvent::StatsUpdated {
            remaining_shots: self.remaining_shots,
        });
    }

    // === Input ===

    /// Set the aim angle directly (radians)
    pub fn set_aim(&mut self, angle: f64) {
        self.aim = angle;
    }

    /// Aim from a pointer position in field coordinates
    pub fn aim_at(&mut self, x: f64, y: f64) {
        self.aim = angle_between_points(Position::new(x, y), self.center());
    }

    pub fn can_fire(&self) -> bool {
        self.phase == SessionPhase::InProgress && self.projectile.is_none() && self.remaining_shots > 0
    }

    /// Launch a projectile from the field centre along the current aim
    pub fn try_fire(&mut self) -> Result<EntityId, SimError> {
        if self.phase != SessionPhase::InProgress {
            return Err(SimError::IllegalFireAttempt {
                reason: "session is not in progress",
            });
        }
        if let Some(live) = &self.projectile {
            log::debug!("projectile {} still in flight", live.id);
            return Err(SimError::IllegalFireAttempt {
                reason: "projectile already in flight",
            });
        }
        if self.remaining_shots == 0 {
            return Err(SimError::IllegalFireAttempt {
                reason: "no shots remaining",
            });
        }

        let id = self.ids.next_id();
        let projectile = Projectile::new(
            id,
            self.center(),
            direction_from_angle(self.aim, self.settings.projectile_speed),
            self.settings.projectile_radius,
        )?;
        self.projectile = Some(projectile);
        self.remaining_shots -= 1;
        log::debug!("firing projectile {} at {:.3} rad", id, self.aim);
        self.push_stats();
        Ok(id)
    }

    /// Fire if allowed; refused attempts are logged and otherwise ignored
    pub fn fire(&mut self) -> bool {
        match self.try_fire() {
            Ok(_) => true,
            Err(err) => {
                log::debug!("{}", err);
                false
            }
        }
    }

    // === Progression ===

    /// Enter `LevelComplete`: drop the projectile, draw the prize catalog
    /// and roll this level's reward.
    pub(super) fn complete_level(&mut self) {
        self.phase = SessionPhase::LevelComplete;
        self.projectile = None;

        let catalog = PrizeCatalog::generate(&mut self.rng, self.settings.prize_count);
        self.pending_prize = catalog.roll(&mut self.rng).cloned();
        self.prize_catalog = Some(catalog);

        log::info!("Level {} complete", self.level);
        self.events.push(SessionEvent::LevelComplete { level: self.level });
    }

    pub(super) fn end_game(&mut self) {
        self.phase = SessionPhase::GameOver;
        log::info!("Game over on level {}", self.level);
        self.events.push(SessionEvent::GameOver { level: self.level });
    }

    /// Move from `LevelComplete` to the next level, granting the rolled prize.
    ///
    /// Returns `Ok(None)` and changes nothing in any other phase.
    pub fn advance(&mut self) -> Result<Option<u32>, SimError> {
        if self.phase != SessionPhase::LevelComplete {
            log::debug!("advance ignored in {:?}", self.phase);
            return Ok(None);
        }

        let next_level = self.level + 1;
        let targets = self
            .generator
            .generate(next_level, &mut self.rng, &mut self.ids)?;

        self.phase = SessionPhase::Advancing;
        let granted = self.pending_prize.take().map_or(0, |prize| u32::from(prize.balls));
        self.level = next_level;
        self.remaining_shots += granted;
        self.prize_catalog = None;

        self.targets = targets;
        self.phase = SessionPhase::InProgress;
        log::info!(
            "Level {} start: {} targets, +{} shots ({} total)",
            self.level,
            self.targets.len(),
            granted,
            self.remaining_shots
        );
        self.events.push(SessionEvent::LevelStart {
            level: self.level,
            granted_shots: granted,
        });
        self.push_stats();
        Ok(Some(granted))
    }

    // === Queries ===

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn target(&self, id: EntityId) -> Result<&Target, SimError> {
        self.targets
            .iter()
            .find(|t| t.id == id)
            .ok_or(SimError::MissingEntity { id })
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref()
    }

    pub fn remaining_shots(&self) -> u32 {
        self.remaining_shots
    }

    pub fn aim(&self) -> f64 {
        self.aim
    }

    /// Ticks simulated while in progress
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Turret position
    pub fn center(&self) -> Position {
        field_center(self.settings.field_width, self.settings.field_height)
    }

    /// Catalog drawn for the level just completed
    pub fn prize_catalog(&self) -> Option<&PrizeCatalog> {
        self.prize_catalog.as_ref()
    }

    /// Reward `advance` will grant
    pub fn pending_prize(&self) -> Option<&Prize> {
        self.pending_prize.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn is_failed(&self) -> bool {
        !self.targets.is_empty() && self.remaining_shots == 0 && self.projectile.is_none()
    }

    /// Take every notification raised since the last call
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
