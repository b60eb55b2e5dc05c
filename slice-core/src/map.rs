//! Parsing of space-separated map strings into positioned tiles.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{SystemCatalog, SystemRecord};
use crate::hex::{spiral, Coordinate, SLICE_POSITION_ORDER};

/// What occupies a tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "system", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileKind {
    System(SystemRecord),
    /// The slot exists in the layout but holds no system.
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub position: Coordinate,
    #[serde(flatten)]
    pub kind: TileKind,
}

impl Tile {
    pub fn system(position: Coordinate, system: SystemRecord) -> Self {
        Self {
            position,
            kind: TileKind::System(system),
        }
    }

    pub fn open(position: Coordinate) -> Self {
        Self {
            position,
            kind: TileKind::Open,
        }
    }

    pub fn system_record(&self) -> Option<&SystemRecord> {
        match &self.kind {
            TileKind::System(system) => Some(system),
            TileKind::Open => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.kind, TileKind::Open)
    }
}

/// Tiles in the same order as the tokens they were parsed from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub tiles: Vec<Tile>,
}

impl Map {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Serialize back to the space-separated form; open tiles become `0`.
    pub fn to_map_string(&self) -> String {
        self.tiles
            .iter()
            .map(|tile| tile.system_record().map_or(0, |s| s.id).to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

/// How to handle more tokens than the position table has entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Fail with [`MapError::PositionsExhausted`].
    #[default]
    Reject,
    /// Drop the surplus tokens.
    Truncate,
    /// Keep placing along the spiral, skipping cells already in the table.
    Extend,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("map string has {tokens} tiles but only {positions} positions are available")]
    PositionsExhausted { tokens: usize, positions: usize },
}

/// Resolves map strings against a catalog.
#[derive(Debug, Clone)]
pub struct MapParser<'a> {
    catalog: &'a SystemCatalog,
    positions: &'a [Coordinate],
    overflow: OverflowPolicy,
}

impl<'a> MapParser<'a> {
    /// A parser using the slice layout and rejecting overflow.
    pub fn new(catalog: &'a SystemCatalog) -> Self {
        Self {
            catalog,
            positions: &SLICE_POSITION_ORDER,
            overflow: OverflowPolicy::default(),
        }
    }

    pub fn positions(mut self, positions: &'a [Coordinate]) -> Self {
        self.positions = positions;
        self
    }

    pub fn overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    /// Parse a map string. Tokens that are not integers or not in the
    /// catalog become open tiles rather than errors.
    pub fn parse(&self, map_string: &str) -> Result<Map, MapError> {
        let tokens: Vec<&str> = map_string.split_whitespace().collect();
        let positions = self.positions_for(tokens.len())?;

        let tiles = tokens
            .into_iter()
            .zip(positions)
            .map(|(token, position)| match self.resolve(token) {
                Some(system) => Tile::system(position, system.clone()),
                None => {
                    debug!(token, ?position, "unresolved system, leaving tile open");
                    Tile::open(position)
                }
            })
            .collect();

        Ok(Map { tiles })
    }

    fn resolve(&self, token: &str) -> Option<&'a SystemRecord> {
        token.parse::<u32>().ok().and_then(|id| self.catalog.get(id))
    }

    /// Positions for `count` tokens, shortened to fit when truncating.
    fn positions_for(&self, count: usize) -> Result<Vec<Coordinate>, MapError> {
        let available = self.positions.len();
        if count <= available {
            return Ok(self.positions[..count].to_vec());
        }

        match self.overflow {
            OverflowPolicy::Reject => Err(MapError::PositionsExhausted {
                tokens: count,
                positions: available,
            }),
            OverflowPolicy::Truncate => {
                warn!(
                    tokens = count,
                    positions = available,
                    "dropping tiles beyond the position table"
                );
                Ok(self.positions.to_vec())
            }
            OverflowPolicy::Extend => {
                warn!(
                    tokens = count,
                    positions = available,
                    "extending position table along the spiral"
                );
                Ok(extend_positions(self.positions, count))
            }
        }
    }
}

fn extend_positions(positions: &[Coordinate], count: usize) -> Vec<Coordinate> {
    let mut taken: HashSet<Coordinate> = positions.iter().copied().collect();
    let mut extended = positions.to_vec();
    let mut rings = 1;
    while extended.len() < count {
        for cell in spiral(rings) {
            if extended.len() == count {
                break;
            }
            if taken.insert(cell) {
                extended.push(cell);
            }
        }
        rings += 1;
    }
    extended
}

/// Parse `map_string` against `position_order`, rejecting overflow.
pub fn parse_map_string(
    map_string: &str,
    position_order: &[Coordinate],
    catalog: &SystemCatalog,
) -> Result<Map, MapError> {
    MapParser::new(catalog)
        .positions(position_order)
        .parse(map_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Planet, MECATOL_REX_ID};
    use crate::hex::standard_map_order;

    fn catalog() -> SystemCatalog {
        SystemCatalog::from_records(vec![
            SystemRecord::new(MECATOL_REX_ID, vec![]),
            SystemRecord::new(19, vec![Planet::new("Wellon", 1, 2)]),
            SystemRecord::new(26, vec![Planet::new("Lodor", 3, 1)]),
        ])
        .unwrap()
    }

    #[test]
    fn resolves_known_systems_and_opens_the_rest() {
        let catalog = catalog();
        let map = parse_map_string("18 0 0", &SLICE_POSITION_ORDER, &catalog).unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.tiles[0].position, Coordinate::new(0, 0, 0));
        assert_eq!(map.tiles[0].system_record().unwrap().id, MECATOL_REX_ID);
        assert_eq!(map.tiles[1], Tile::open(Coordinate::new(-1, 0, 0)));
        assert_eq!(map.tiles[2], Tile::open(Coordinate::new(0, -1, 0)));
    }

    #[test]
    fn positions_follow_the_table() {
        let catalog = catalog();
        let order = standard_map_order();
        let map = MapParser::new(&catalog)
            .positions(&order)
            .parse("19 26 9999 18 x")
            .unwrap();

        assert_eq!(map.len(), 5);
        for (tile, expected) in map.iter().zip(&order) {
            assert_eq!(&tile.position, expected);
        }
    }

    #[test]
    fn malformed_tokens_become_open() {
        let catalog = catalog();
        let map = MapParser::new(&catalog).parse("9999 -1 abc 19").unwrap();

        assert!(map.tiles[0].is_open());
        assert!(map.tiles[1].is_open());
        assert!(map.tiles[2].is_open());
        assert!(!map.tiles[3].is_open());
    }

    #[test]
    fn empty_and_blank_strings_give_empty_maps() {
        let catalog = catalog();
        assert!(MapParser::new(&catalog).parse("").unwrap().is_empty());
        assert!(MapParser::new(&catalog).parse("   \t ").unwrap().is_empty());
    }

    #[test]
    fn repeated_whitespace_is_collapsed() {
        let catalog = catalog();
        let map = MapParser::new(&catalog).parse("  19   26 ").unwrap();
        assert_eq!(map.to_map_string(), "19 26");
    }

    #[test]
    fn overflow_is_rejected_by_default() {
        let catalog = catalog();
        let err = MapParser::new(&catalog).parse("19 19 19 19 19").unwrap_err();
        assert_eq!(
            err,
            MapError::PositionsExhausted {
                tokens: 5,
                positions: 4
            }
        );
    }

    #[test]
    fn overflow_can_truncate() {
        let catalog = catalog();
        let map = MapParser::new(&catalog)
            .overflow(OverflowPolicy::Truncate)
            .parse("19 19 19 19 26 26")
            .unwrap();
        assert_eq!(map.to_map_string(), "19 19 19 19");
    }

    #[test]
    fn overflow_can_extend_without_reusing_cells() {
        let catalog = catalog();
        let map = MapParser::new(&catalog)
            .overflow(OverflowPolicy::Extend)
            .parse("19 19 19 19 26 26")
            .unwrap();

        assert_eq!(map.len(), 6);
        assert_eq!(map.tiles[4].position, Coordinate::new(1, 0, 0));
        assert_eq!(map.tiles[5].position, Coordinate::new(0, 1, 0));
    }

    #[test]
    fn parsing_is_deterministic() {
        let catalog = catalog();
        let parser = MapParser::new(&catalog);
        assert_eq!(parser.parse("19 0 26").unwrap(), parser.parse("19 0 26").unwrap());
    }

    #[test]
    fn tiles_serialize_with_type_tag() {
        let json = serde_json::to_value(Tile::open(Coordinate::ORIGIN)).unwrap();
        assert_eq!(json["type"], "OPEN");
        assert_eq!(json["position"]["x"], 0);
    }
}
