//! System catalog: the read-only reference data every parse resolves against.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Identifier of the board's center system.
pub const MECATOL_REX_ID: u32 = 18;

const BUILTIN_SYSTEMS: &str = include_str!("../data/systems.json");

/// Technology color a planet grants a discount towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TechSpecialty {
    Biotic,
    Cybernetic,
    Propulsion,
    Warfare,
}

impl fmt::Display for TechSpecialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TechSpecialty::Biotic => write!(f, "biotic"),
            TechSpecialty::Cybernetic => write!(f, "cybernetic"),
            TechSpecialty::Propulsion => write!(f, "propulsion"),
            TechSpecialty::Warfare => write!(f, "warfare"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanetTrait {
    Cultural,
    Hazardous,
    Industrial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Wormhole {
    Alpha,
    Beta,
}

impl fmt::Display for Wormhole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wormhole::Alpha => write!(f, "alpha"),
            Wormhole::Beta => write!(f, "beta"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anomaly {
    AsteroidField,
    GravityRift,
    Nebula,
    Supernova,
}

/// A resource/influence-bearing body inside a system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planet {
    pub name: String,
    #[serde(default)]
    pub resources: u32,
    #[serde(default)]
    pub influence: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#trait: Option<PlanetTrait>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_specialty: Option<TechSpecialty>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub legendary: bool,
}

impl Planet {
    /// Bare planet with no trait, specialty or legendary ability.
    pub fn new(name: impl Into<String>, resources: u32, influence: u32) -> Self {
        Self {
            name: name.into(),
            resources,
            influence,
            r#trait: None,
            tech_specialty: None,
            legendary: false,
        }
    }

    pub fn with_specialty(mut self, specialty: TechSpecialty) -> Self {
        self.tech_specialty = Some(specialty);
        self
    }

    pub fn with_trait(mut self, planet_trait: PlanetTrait) -> Self {
        self.r#trait = Some(planet_trait);
        self
    }

    pub fn legendary(mut self) -> Self {
        self.legendary = true;
        self
    }
}

/// A catalog entry. Planets are kept in printed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemRecord {
    pub id: u32,
    #[serde(default)]
    pub planets: Vec<Planet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wormholes: Vec<Wormhole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<Anomaly>,
}

impl SystemRecord {
    pub fn new(id: u32, planets: Vec<Planet>) -> Self {
        Self {
            id,
            planets,
            wormholes: Vec::new(),
            anomaly: None,
        }
    }

    /// Blue-backed systems carry at least one planet.
    pub fn is_blue(&self) -> bool {
        !self.planets.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("system {id} appears more than once in the catalog")]
    DuplicateSystem { id: u32 },
    #[error("failed to read catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable mapping from system id to its record.
///
/// Built once at startup and handed around by shared reference; nothing in
/// this crate mutates it after construction.
#[derive(Debug, Clone, Default)]
pub struct SystemCatalog {
    systems: HashMap<u32, SystemRecord>,
}

impl SystemCatalog {
    /// Build a catalog from records, rejecting duplicate ids.
    pub fn from_records(records: Vec<SystemRecord>) -> Result<Self, CatalogError> {
        let mut systems = HashMap::with_capacity(records.len());
        for record in records {
            let id = record.id;
            if systems.insert(id, record).is_some() {
                return Err(CatalogError::DuplicateSystem { id });
            }
        }
        Ok(Self { systems })
    }

    /// Load a catalog from a JSON array of system records.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<SystemRecord> = serde_json::from_str(json)?;
        let catalog = Self::from_records(records)?;
        debug!(systems = catalog.len(), "loaded system catalog");
        Ok(catalog)
    }

    /// The bundled base-game reference data.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_SYSTEMS)
    }

    pub fn get(&self, id: u32) -> Option<&SystemRecord> {
        self.systems.get(&id)
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// All ids in ascending order.
    pub fn ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.systems.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Draftable systems with planets, excluding the center system.
    pub fn blue_tiles(&self) -> Vec<u32> {
        self.filtered_ids(|s| s.is_blue() && s.id != MECATOL_REX_ID)
    }

    /// Systems without planets: wormholes, anomalies and empty space.
    pub fn red_tiles(&self) -> Vec<u32> {
        self.filtered_ids(|s| !s.is_blue())
    }

    fn filtered_ids(&self, keep: impl Fn(&SystemRecord) -> bool) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .systems
            .values()
            .filter(|s| keep(s))
            .map(|s| s.id)
            .collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = SystemCatalog::builtin().unwrap();
        assert!(!catalog.is_empty());

        let mecatol = catalog.get(MECATOL_REX_ID).unwrap();
        assert_eq!(mecatol.planets.len(), 1);
        assert_eq!(mecatol.planets[0].name, "Mecatol Rex");
    }

    #[test]
    fn builtin_catalog_has_specialties_and_wormholes() {
        let catalog = SystemCatalog::builtin().unwrap();

        let wellon = &catalog.get(19).unwrap().planets[0];
        assert_eq!(wellon.tech_specialty, Some(TechSpecialty::Cybernetic));
        assert_eq!(wellon.r#trait, Some(PlanetTrait::Industrial));

        assert_eq!(catalog.get(39).unwrap().wormholes, vec![Wormhole::Alpha]);
        assert_eq!(catalog.get(42).unwrap().anomaly, Some(Anomaly::Nebula));
    }

    #[test]
    fn blue_and_red_tiles_partition_the_draftable_pool() {
        let catalog = SystemCatalog::builtin().unwrap();
        let blue = catalog.blue_tiles();
        let red = catalog.red_tiles();

        assert!(!blue.contains(&MECATOL_REX_ID));
        assert!(!red.contains(&MECATOL_REX_ID));
        assert!(blue.iter().all(|id| !red.contains(id)));
        assert_eq!(blue.len() + red.len() + 1, catalog.len());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let records = vec![
            SystemRecord::new(1, vec![]),
            SystemRecord::new(1, vec![Planet::new("Dup", 1, 1)]),
        ];
        assert!(matches!(
            SystemCatalog::from_records(records),
            Err(CatalogError::DuplicateSystem { id: 1 })
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            SystemCatalog::from_json("{not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let catalog =
            SystemCatalog::from_json(r#"[{"id": 7, "planets": [{"name": "Bare", "resources": 2, "influence": 0}]}]"#)
                .unwrap();
        let system = catalog.get(7).unwrap();
        assert!(system.wormholes.is_empty());
        assert_eq!(system.anomaly, None);
        assert_eq!(system.planets[0], Planet::new("Bare", 2, 0));
        assert_eq!(catalog.ids(), vec![7]);
    }

    #[test]
    fn zero_values_may_be_left_out() {
        let catalog = SystemCatalog::from_json(
            r#"[{"id": 3, "planets": [{"name": "Dry", "influence": 3}, {"name": "Poor", "resources": 2}]}]"#,
        )
        .unwrap();
        let planets = &catalog.get(3).unwrap().planets;
        assert_eq!(planets[0], Planet::new("Dry", 0, 3));
        assert_eq!(planets[1], Planet::new("Poor", 2, 0));
    }

    #[test]
    fn builtin_zero_value_planets() {
        let catalog = SystemCatalog::builtin().unwrap();
        let planets = &catalog.get(28).unwrap().planets;
        assert_eq!(planets[0].name, "Tequ'ran");
        assert_eq!((planets[0].resources, planets[0].influence), (2, 0));
        assert_eq!(planets[1].name, "Torkan");
        assert_eq!((planets[1].resources, planets[1].influence), (0, 3));

        let hopes_end = &catalog.get(66).unwrap().planets[0];
        assert_eq!((hopes_end.resources, hopes_end.influence), (3, 0));
        assert!(hopes_end.legendary);
    }

    #[test]
    fn specialty_displays_lowercase() {
        assert_eq!(TechSpecialty::Warfare.to_string(), "warfare");
        assert_eq!(Wormhole::Beta.to_string(), "beta");
    }
}
