//! Per-slice summaries and random slice dealing.

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{SystemCatalog, TechSpecialty, Wormhole};
use crate::map::{MapError, MapParser, Tile};
use crate::stats::{
    legendary_count, optimal_stats, tech_specialties, total_stats, wormholes, PlanetStats,
};

/// Everything a presentation layer needs to show one slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceSummary {
    pub name: String,
    pub map_string: String,
    pub tiles: Vec<Tile>,
    pub total: PlanetStats,
    pub optimal: PlanetStats,
    pub specialties: Vec<TechSpecialty>,
    pub wormholes: Vec<Wormhole>,
    pub legendaries: usize,
}

impl SliceSummary {
    /// Parse the slice's systems into the slice layout and aggregate them.
    pub fn build<S: AsRef<str>>(
        name: impl Into<String>,
        systems: &[S],
        catalog: &SystemCatalog,
    ) -> Result<Self, MapError> {
        let map_string = systems
            .iter()
            .map(|s| s.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        let map = MapParser::new(catalog).parse(&map_string)?;

        Ok(Self {
            name: name.into(),
            total: total_stats(&map.tiles),
            optimal: optimal_stats(&map.tiles),
            specialties: tech_specialties(&map.tiles),
            wormholes: wormholes(&map.tiles),
            legendaries: legendary_count(&map.tiles),
            map_string,
            tiles: map.tiles,
        })
    }

    pub fn describe(&self) -> String {
        let specialties = if self.specialties.is_empty() {
            "none".to_string()
        } else {
            self.specialties
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };

        format!(
            "{}: optimal {}/{} (+{} flex), total {}/{}, specialties: {}",
            self.name,
            self.optimal.resources,
            self.optimal.influence,
            self.optimal.flex,
            self.total.resources,
            self.total.influence,
            specialties
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DealError {
    #[error("need {needed} systems to deal but the pool only has {available}")]
    NotEnoughSystems { needed: usize, available: usize },
    #[error("{num_slices} slices of {slice_size} systems is more than can be counted")]
    TooManySystems { num_slices: usize, slice_size: usize },
    #[error("slices must hold at least one system")]
    EmptySlice,
}

/// Deal `num_slices` slices of `slice_size` systems each, drawing from
/// `pool` without replacement.
pub fn deal_slices(
    pool: &[u32],
    num_slices: usize,
    slice_size: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<Vec<u32>>, DealError> {
    if slice_size == 0 {
        return Err(DealError::EmptySlice);
    }
    let needed = num_slices
        .checked_mul(slice_size)
        .ok_or(DealError::TooManySystems {
            num_slices,
            slice_size,
        })?;
    if needed > pool.len() {
        return Err(DealError::NotEnoughSystems {
            needed,
            available: pool.len(),
        });
    }

    let drawn: Vec<u32> = pool.choose_multiple(rng, needed).copied().collect();
    Ok(drawn
        .chunks(slice_size)
        .map(<[u32]>::to_vec)
        .collect())
}
