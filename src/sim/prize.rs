//! Prize rolls granted on level completion
//!
//! A fresh catalog of ball-count tiers is drawn for every cleared level, then
//! one entry is picked uniformly. Nothing here outlives the level transition.

use std::collections::BTreeSet;

use rand::RngCore;
use serde::{Deserialize, Serialize};

use super::random_byte;

/// Largest ball count a prize can carry
pub const MAX_PRIZE_BALLS: u8 = 10;

/// Label used if a count falls past every breakpoint
pub const UNKNOWN_TIER_NAME: &str = "an unknown amount of balls";

/// Quality tiers, ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrizeTier {
    Meagre,
    Modest,
    Good,
    Lots,
    Sack,
}

impl PrizeTier {
    pub const ALL: [PrizeTier; 5] = [
        PrizeTier::Meagre,
        PrizeTier::Modest,
        PrizeTier::Good,
        PrizeTier::Lots,
        PrizeTier::Sack,
    ];

    /// Largest ball count that still falls in this tier
    pub fn breakpoint(&self) -> u8 {
        match self {
            PrizeTier::Meagre => 2,
            PrizeTier::Modest => 4,
            PrizeTier::Good => 6,
            PrizeTier::Lots => 8,
            PrizeTier::Sack => 10,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PrizeTier::Meagre => "barely any balls",
            PrizeTier::Modest => "some balls",
            PrizeTier::Good => "a good amount of balls",
            PrizeTier::Lots => "a lot of balls",
            PrizeTier::Sack => "a heavy sack filled with balls",
        }
    }

    /// Smallest tier whose breakpoint is >= `balls`
    pub fn for_balls(balls: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| balls <= tier.breakpoint())
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    pub balls: u8,
    pub tier: Option<PrizeTier>,
}

impl Prize {
    pub fn new(balls: u8) -> Self {
        Self {
            balls,
            tier: PrizeTier::for_balls(balls),
        }
    }

    pub fn name(&self) -> &'static str {
        self.tier.map_or(UNKNOWN_TIER_NAME, |tier| tier.name())
    }
}

/// Sorted, deduplicated prizes for one level transition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeCatalog {
    prizes: Vec<Prize>,
}

impl PrizeCatalog {
    /// Draw `prize_count` bytes and map each to a ball count in `1..=10`.
    /// Duplicates collapse, so the catalog may hold fewer than `prize_count`.
    pub fn generate<R: RngCore>(rng: &mut R, prize_count: usize) -> Self {
        let counts: BTreeSet<u8> = (0..prize_count)
            .map(|_| random_byte(rng) % MAX_PRIZE_BALLS + 1)
            .collect();
        let prizes: Vec<Prize> = counts.into_iter().map(Prize::new).collect();

        log::debug!(
            "prize catalog: {:?}",
            prizes.iter().map(|p| (p.balls, p.name())).collect::<Vec<_>>()
        );
        Self { prizes }
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn len(&self) -> usize {
        self.prizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prizes.is_empty()
    }

    pub fn contains_balls(&self, balls: u8) -> bool {
        self.prizes.iter().any(|p| p.balls == balls)
    }

    /// Uniform pick (byte modulo catalog size). `None` for an empty catalog.
    pub fn roll<R: RngCore>(&self, rng: &mut R) -> Option<&Prize> {
        if self.prizes.is_empty() {
            return None;
        }
        let index = random_byte(rng) as usize % self.prizes.len();
        let prize = self.prizes.get(index)?;
        log::info!("rolled prize: {} ({} balls)", prize.name(), prize.balls);
        Some(prize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Byte source that replays a fixed script
    struct ScriptedBytes(VecDeque<u8>);

    impl ScriptedBytes {
        fn new(bytes: &[u8]) -> Self {
            Self(bytes.iter().copied().collect())
        }
    }

    impl RngCore for ScriptedBytes {
        fn next_u32(&mut self) -> u32 {
            u32::from(self.0.pop_front().unwrap_or(0))
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for b in dest {
                *b = self.0.pop_front().unwrap_or(0);
            }
        }
    }

    #[test]
    fn test_catalog_labels_by_breakpoint() {
        // 11 -> 2, 24 -> 5, 8 -> 9, 101 -> 2 (duplicate), 254 -> 5 (duplicate)
        let mut rng = ScriptedBytes::new(&[11, 24, 8, 101, 254]);
        let catalog = PrizeCatalog::generate(&mut rng, 5);

        let balls: Vec<u8> = catalog.prizes().iter().map(|p| p.balls).collect();
        assert_eq!(balls, vec![2, 5, 9]);

        let tiers: Vec<_> = catalog.prizes().iter().map(|p| p.tier).collect();
        assert_eq!(
            tiers,
            vec![Some(PrizeTier::Meagre), Some(PrizeTier::Good), Some(PrizeTier::Sack)]
        );
        assert_eq!(catalog.prizes()[0].name(), "barely any balls");
        assert_eq!(catalog.prizes()[2].name(), "a heavy sack filled with balls");
    }

    #[test]
    fn test_roll_uses_byte_modulo_len() {
        let mut rng = ScriptedBytes::new(&[11, 24, 8, 1, 91, 4]);
        let catalog = PrizeCatalog::generate(&mut rng, 5);
        assert_eq!(catalog.len(), 3);

        // 4 % 3 = 1 -> second entry
        let prize = catalog.roll(&mut rng).unwrap();
        assert_eq!(prize.balls, 5);
    }

    #[test]
    fn test_every_count_has_a_tier() {
        for balls in 1..=MAX_PRIZE_BALLS {
            let tier = PrizeTier::for_balls(balls).unwrap();
            assert!(balls <= tier.breakpoint());
        }
        assert_eq!(PrizeTier::for_balls(3), Some(PrizeTier::Modest));
        assert_eq!(PrizeTier::for_balls(11), None);
        assert_eq!(Prize::new(11).name(), UNKNOWN_TIER_NAME);
    }

    #[test]
    fn test_empty_catalog_rolls_nothing() {
        let mut rng = ScriptedBytes::new(&[]);
        let catalog = PrizeCatalog::generate(&mut rng, 0);
        assert!(catalog.is_empty());
        assert!(catalog.roll(&mut rng).is_none());
    }
}
