//! Map-string parsing and slice statistics for hex-map drafts.

pub mod catalog;
pub mod hex;
pub mod map;
pub mod settings;
pub mod slice;
pub mod stats;

pub use catalog::{Planet, SystemCatalog, SystemRecord, TechSpecialty};
pub use hex::{Coordinate, SLICE_POSITION_ORDER};
pub use map::{parse_map_string, Map, MapError, MapParser, OverflowPolicy, Tile, TileKind};
pub use slice::SliceSummary;
pub use stats::{optimal_stats, tech_specialties, total_stats, PlanetStats};

use serde::Serialize;

/// Every slice on offer in a draft, plus how they compare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceBoard {
    pub slices: Vec<SliceSummary>,
    pub combined: PlanetStats,
    /// Spread between the richest and poorest slice by optimal value.
    pub optimal_spread: u32,
}

impl SliceBoard {
    pub fn richest(&self) -> Option<&SliceSummary> {
        self.slices.iter().max_by_key(|s| s.optimal.value())
    }

    pub fn poorest(&self) -> Option<&SliceSummary> {
        self.slices.iter().min_by_key(|s| s.optimal.value())
    }
}

/// Summarize named slices, each given as its list of system tokens.
pub fn summarize_slices<N, S>(
    slices: &[(N, Vec<S>)],
    catalog: &SystemCatalog,
) -> Result<SliceBoard, MapError>
where
    N: AsRef<str>,
    S: AsRef<str>,
{
    let summaries = slices
        .iter()
        .map(|(name, systems)| SliceSummary::build(name.as_ref(), systems, catalog))
        .collect::<Result<Vec<_>, _>>()?;

    let combined = summaries.iter().map(|s| s.total).sum();
    let values = summaries.iter().map(|s| s.optimal.value());
    let optimal_spread = match (values.clone().max(), values.min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    };

    Ok(SliceBoard {
        slices: summaries,
        combined,
        optimal_spread,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> SliceBoard {
        let catalog = SystemCatalog::builtin().unwrap();
        summarize_slices(
            &[
                ("Alpha", vec!["19", "27", "39"]),
                ("Beta", vec!["35", "44", "20"]),
                ("Gamma", vec!["46", "47"]),
            ],
            &catalog,
        )
        .unwrap()
    }

    #[test]
    fn board_keeps_slice_order() {
        let board = board();
        let names: Vec<_> = board.slices.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn board_combines_totals() {
        let board = board();
        // Alpha 5/4/3, Beta: Bereg 3/1, Lirta IV 2/3, Vefut II 2/2
        assert_eq!(board.combined, PlanetStats::new(5 + 7, 4 + 6, 3 + 1 + 2 + 2));
    }

    #[test]
    fn board_finds_extremes() {
        let board = board();
        // Beta optimal: 3 res + 3 inf + 2 flex
        assert_eq!(board.richest().unwrap().name, "Beta");
        assert_eq!(board.poorest().unwrap().name, "Gamma");
        assert_eq!(board.optimal_spread, 8);
    }

    #[test]
    fn empty_board() {
        let catalog = SystemCatalog::default();
        let board = summarize_slices::<&str, &str>(&[], &catalog).unwrap();
        assert!(board.slices.is_empty());
        assert_eq!(board.combined, PlanetStats::default());
        assert_eq!(board.optimal_spread, 0);
        assert!(board.richest().is_none());
    }

    #[test]
    fn too_many_systems_fails_the_board() {
        let catalog = SystemCatalog::builtin().unwrap();
        let result = summarize_slices(&[("Wide", vec!["19", "20", "21", "22", "23"])], &catalog);
        assert!(matches!(result, Err(MapError::PositionsExhausted { .. })));
    }
}
