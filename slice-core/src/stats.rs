//! Resource/influence aggregation over parsed tiles.

use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::catalog::{Planet, PlanetTrait, TechSpecialty, Wormhole};
use crate::map::Tile;

/// Resource, influence and flex value of a group of planets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetStats {
    pub resources: u32,
    pub influence: u32,
    pub flex: u32,
}

impl PlanetStats {
    pub fn new(resources: u32, influence: u32, flex: u32) -> Self {
        Self {
            resources,
            influence,
            flex,
        }
    }

    /// Face values of one planet. The smaller of the two counts as flex,
    /// since that much can be spent either way.
    pub fn total_for(planet: &Planet) -> Self {
        Self::new(
            planet.resources,
            planet.influence,
            planet.resources.min(planet.influence),
        )
    }

    /// Best-case spend of one planet: the larger value goes to its axis,
    /// ties go to flex.
    pub fn optimal_for(planet: &Planet) -> Self {
        match planet.resources.cmp(&planet.influence) {
            Ordering::Greater => Self::new(planet.resources, 0, 0),
            Ordering::Less => Self::new(0, planet.influence, 0),
            Ordering::Equal => Self::new(0, 0, planet.resources),
        }
    }

    /// Sum of all three axes, saturating at `u32::MAX`.
    pub fn value(&self) -> u32 {
        self.resources
            .saturating_add(self.influence)
            .saturating_add(self.flex)
    }
}

/// Saturates per axis.
impl Add for PlanetStats {
    type Output = PlanetStats;
    fn add(self, rhs: PlanetStats) -> Self::Output {
        PlanetStats::new(
            self.resources.saturating_add(rhs.resources),
            self.influence.saturating_add(rhs.influence),
            self.flex.saturating_add(rhs.flex),
        )
    }
}

impl AddAssign for PlanetStats {
    fn add_assign(&mut self, rhs: PlanetStats) {
        *self = *self + rhs;
    }
}

impl Sum for PlanetStats {
    fn sum<I: Iterator<Item = PlanetStats>>(iter: I) -> Self {
        iter.fold(PlanetStats::default(), Add::add)
    }
}

/// Planets on system tiles, in tile then printed order.
fn planets(tiles: &[Tile]) -> impl Iterator<Item = &Planet> {
    tiles
        .iter()
        .filter_map(Tile::system_record)
        .flat_map(|system| system.planets.iter())
}

pub fn total_stats(tiles: &[Tile]) -> PlanetStats {
    planets(tiles).map(PlanetStats::total_for).sum()
}

pub fn optimal_stats(tiles: &[Tile]) -> PlanetStats {
    planets(tiles).map(PlanetStats::optimal_for).sum()
}

/// One entry per planet with a specialty, duplicates included.
pub fn tech_specialties(tiles: &[Tile]) -> Vec<TechSpecialty> {
    planets(tiles).filter_map(|p| p.tech_specialty).collect()
}

pub fn planet_traits(tiles: &[Tile]) -> Vec<PlanetTrait> {
    planets(tiles).filter_map(|p| p.r#trait).collect()
}

pub fn wormholes(tiles: &[Tile]) -> Vec<Wormhole> {
    tiles
        .iter()
        .filter_map(Tile::system_record)
        .flat_map(|system| system.wormholes.iter().copied())
        .collect()
}

pub fn legendary_count(tiles: &[Tile]) -> usize {
    planets(tiles).filter(|p| p.legendary).count()
}
