//! Procedural level generation
//!
//! A level with number `n` holds `n` targets scattered over the field. The
//! variant roster widens as levels climb, and a square around the turret is
//! kept free of targets.

use glam::DVec2;
use rand::{Rng, RngCore};

use super::random_byte;
use super::state::{IdAllocator, Target, TargetKind};
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;
use crate::{Position, field_center};

/// First level that can contain glass targets
pub const GLASS_FROM_LEVEL: u32 = 3;
/// First level that can contain durable targets
pub const DURABLE_FROM_LEVEL: u32 = 6;

/// Axis-aligned square around the turret where no target may be placed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExclusionZone {
    pub min: Position,
    pub max: Position,
}

impl ExclusionZone {
    pub fn around(center: Position, half_extent: f64) -> Self {
        let half = DVec2::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Edges count as inside
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Variants that may appear on a level, in draw-index order
pub fn target_roster(level: u32, durable_hits: i32) -> Vec<TargetKind> {
    let mut roster = vec![TargetKind::Basic];
    if level >= GLASS_FROM_LEVEL {
        roster.push(TargetKind::Glass);
    }
    if level >= DURABLE_FROM_LEVEL {
        roster.push(TargetKind::Durable {
            hits_remaining: durable_hits,
        });
    }
    roster
}

/// Level generator bound to one field layout
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    pub width: f64,
    pub height: f64,
    pub exclusion: ExclusionZone,
    pub durable_hits: i32,
}

impl LevelGenerator {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            exclusion: ExclusionZone::around(field_center(width, height), EXCLUSION_HALF_EXTENT),
            durable_hits: DURABLE_HITS,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.field_width,
            height: settings.field_height,
            exclusion: ExclusionZone::around(
                field_center(settings.field_width, settings.field_height),
                settings.exclusion_half_extent,
            ),
            durable_hits: settings.durable_hits,
        }
    }

    /// Number of targets on `level` (level 1 is a single target)
    pub fn target_count(level: u32) -> usize {
        level.max(1) as usize
    }

    /// Generate the targets for `level`.
    ///
    /// Positions are only checked against the exclusion zone, never against
    /// each other, so targets may overlap. Sampling retries without bound.
    pub fn generate<R: RngCore>(
        &self,
        level: u32,
        rng: &mut R,
        ids: &mut IdAllocator,
    ) -> Result<Vec<Target>, SimError> {
        let span_x = self.sample_span("field width", self.width, TARGET_WIDTH)?;
        let span_y = self.sample_span("field height", self.height, TARGET_HEIGHT)?;

        let count = Self::target_count(level);
        let mut positions = Vec::with_capacity(count);
        let mut rejected = 0u32;

        while positions.len() < count {
            let x = rng.random_range(0..span_x);
            let y = rng.random_range(0..span_y);
            let pos = DVec2::new(x as f64, y as f64);

            if self.exclusion.contains(pos) {
                rejected = rejected.saturating_add(1);
                continue;
            }
            positions.push(pos);
        }

        let roster = target_roster(level, self.durable_hits);
        let mut targets = Vec::with_capacity(count);
        for pos in positions {
            let kind = if level <= 1 {
                TargetKind::Basic
            } else {
                let index = random_byte(rng) as usize % roster.len();
                roster.get(index).copied().unwrap_or(TargetKind::Basic)
            };
            targets.push(Target::new(ids.next_id(), pos, kind)?);
        }

        log::debug!(
            "level {}: {} targets, roster {:?}, {} samples rejected",
            level,
            targets.len(),
            roster.iter().map(TargetKind::name).collect::<Vec<_>>(),
            rejected
        );

        Ok(targets)
    }

    /// Integer sampling range `[0, extent - target_extent)`
    fn sample_span(&self, what: &'static str, extent: f64, target_extent: f64) -> Result<u32, SimError> {
        let span = (extent - target_extent).floor();
        if span.is_finite() && span >= 1.0 {
            Ok(span as u32)
        } else {
            Err(SimError::InvalidGeometry { what, value: extent })
        }
    }
}

/// Generate `level` on a `width` x `height` field with the default layout
pub fn generate_level<R: RngCore>(
    level: u32,
    width: f64,
    height: f64,
    rng: &mut R,
    ids: &mut IdAllocator,
) -> Result<Vec<Target>, SimError> {
    LevelGenerator::new(width, height).generate(level, rng, ids)
}
