//! Draft settings assembly from the setup screen's state, and packaging of
//! those settings into a request for the draft runner.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Where a multidraft form is posted.
pub const MULTIDRAFT_ACTION: &str = "/multidraft";
/// Where a single draft is started.
pub const NEW_DRAFT_PATH: &str = "/draft/new";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSet {
    Base,
    Pok,
    Discordant,
    DiscordantExp,
    Drahn,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    #[default]
    Milty,
    MiltyEq,
    Heisen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum MinorFactionsMode {
    SharedPool,
    SeparatePool {
        #[serde(rename = "numMinorFactions")]
        num_minor_factions: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordData {
    pub guild_id: String,
    pub channel_id: String,
}

/// Expansion content toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSetup {
    pub pok: bool,
    pub discordant: bool,
    pub discordant_expansion: bool,
    pub drahn: bool,
}

impl ContentSetup {
    pub fn faction_game_sets(&self) -> Vec<GameSet> {
        let mut sets = vec![GameSet::Base];
        if self.pok {
            sets.push(GameSet::Pok);
        }
        if self.discordant {
            sets.push(GameSet::Discordant);
        }
        if self.discordant_expansion {
            sets.push(GameSet::DiscordantExp);
        }
        if self.drahn {
            sets.push(GameSet::Drahn);
        }
        sets
    }

    /// Discordant factions and Drahn bring no systems of their own.
    pub fn tile_game_sets(&self) -> Vec<GameSet> {
        let mut sets = vec![GameSet::Base];
        if self.pok {
            sets.push(GameSet::Pok);
        }
        if self.discordant_expansion {
            sets.push(GameSet::DiscordantExp);
        }
        sets
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSetup {
    pub map_type: MapType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactionSetup {
    pub num_factions: u32,
    pub preassigned_factions: Option<u32>,
    pub minor_factions_mode: Option<MinorFactionsMode>,
    pub allowed_factions: Option<Vec<String>>,
    pub required_factions: Option<Vec<String>>,
    pub stratified_config: Option<BTreeMap<String, u32>>,
}

/// The slice count comes straight from a text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SliceSetup {
    pub num_slices: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatSetup {
    pub draft_speaker: bool,
    pub allow_home_planet_search: bool,
    pub allow_empty_tiles: bool,
    pub draft_player_colors: bool,
    pub ban_factions: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerSetup {
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultidraftSetup {
    pub is_multidraft: bool,
    pub num_drafts: u32,
}

/// Snapshot of every piece of setup state the builder reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftSetup {
    pub content: ContentSetup,
    pub map: MapSetup,
    pub faction: FactionSetup,
    pub slices: SliceSetup,
    pub format: FormatSetup,
    pub player: PlayerSetup,
    pub multidraft: MultidraftSetup,
}

/// Slice balancing knobs for a Milty draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiltyDraftSettings {
    pub min_optimal_influence: u32,
    pub min_optimal_resources: u32,
    pub min_optimal_total: u32,
    pub max_optimal_total: u32,
    pub min_legendaries: u32,
    pub min_alpha_wormholes: u32,
    pub min_beta_wormholes: u32,
    pub safe_path_to_mecatol: bool,
    pub high_quality_adjacent: bool,
}

/// Slice balancing knobs for a Milty-EQ draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MiltyEqDraftSettings {
    pub min_optimal_influence: u32,
    pub min_optimal_resources: u32,
    pub min_optimal_total: u32,
    pub max_optimal_total: u32,
    pub min_legendaries: u32,
    pub min_alpha_wormholes: u32,
    pub min_beta_wormholes: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceGenerationConfig {
    pub min_optimal_influence: u32,
    pub min_optimal_resources: u32,
    pub min_optimal_total: u32,
    pub max_optimal_total: u32,
    pub num_legendaries: u32,
    pub num_alphas: u32,
    pub num_betas: u32,
    pub safe_path_to_mecatol: bool,
    pub high_quality_adjacent: bool,
    pub has_minor_factions: bool,
}

/// Slice generation config for map types that balance slices.
pub fn build_slice_generation_config(
    map_type: MapType,
    milty: &MiltyDraftSettings,
    milty_eq: &MiltyEqDraftSettings,
    has_minor_factions: bool,
) -> Option<SliceGenerationConfig> {
    match map_type {
        MapType::Milty => Some(SliceGenerationConfig {
            min_optimal_influence: milty.min_optimal_influence,
            min_optimal_resources: milty.min_optimal_resources,
            min_optimal_total: milty.min_optimal_total,
            max_optimal_total: milty.max_optimal_total,
            num_legendaries: milty.min_legendaries,
            num_alphas: milty.min_alpha_wormholes,
            num_betas: milty.min_beta_wormholes,
            safe_path_to_mecatol: milty.safe_path_to_mecatol,
            high_quality_adjacent: milty.high_quality_adjacent,
            has_minor_factions,
        }),
        MapType::MiltyEq => Some(SliceGenerationConfig {
            min_optimal_influence: milty_eq.min_optimal_influence,
            min_optimal_resources: milty_eq.min_optimal_resources,
            min_optimal_total: milty_eq.min_optimal_total,
            max_optimal_total: milty_eq.max_optimal_total,
            num_legendaries: milty_eq.min_legendaries,
            num_alphas: milty_eq.min_alpha_wormholes,
            num_betas: milty_eq.min_beta_wormholes,
            safe_path_to_mecatol: false,
            high_quality_adjacent: false,
            has_minor_factions,
        }),
        MapType::Heisen => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BanFactions {
    pub num_factions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftModifiers {
    pub ban_factions: BanFactions,
}

/// The configuration handed to the draft runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSettings {
    pub faction_game_sets: Vec<GameSet>,
    pub tile_game_sets: Vec<GameSet>,
    #[serde(rename = "type")]
    pub map_type: MapType,
    pub num_factions: u32,
    pub randomize_map: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_preassigned_factions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_factions_mode: Option<MinorFactionsMode>,
    pub num_slices: u32,
    pub randomize_slices: bool,
    pub draft_speaker: bool,
    pub allow_home_planet_search: bool,
    pub allow_empty_tiles: bool,
    pub draft_player_colors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<DraftModifiers>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_factions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_factions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faction_stratification: Option<BTreeMap<String, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slice_generation_config: Option<SliceGenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor_factions_in_shared_pool: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_minor_factions: Option<u32>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("slice count {0:?} is not a number")]
    InvalidSliceCount(String),
    #[error("failed to encode draft request: {0}")]
    Json(#[from] serde_json::Error),
}

/// Assemble draft settings from the setup state and the map-type specific
/// slice settings.
pub fn build_draft_settings(
    setup: &DraftSetup,
    milty: &MiltyDraftSettings,
    milty_eq: &MiltyEqDraftSettings,
) -> Result<DraftSettings, SettingsError> {
    let faction = &setup.faction;
    let format = &setup.format;
    let has_minor_factions = faction.minor_factions_mode.is_some();

    let num_slices = setup
        .slices
        .num_slices
        .trim()
        .parse::<u32>()
        .map_err(|_| SettingsError::InvalidSliceCount(setup.slices.num_slices.clone()))?;

    let mut settings = DraftSettings {
        faction_game_sets: setup.content.faction_game_sets(),
        tile_game_sets: setup.content.tile_game_sets(),
        map_type: setup.map.map_type,
        num_factions: faction.num_factions,
        randomize_map: !has_minor_factions,
        num_preassigned_factions: faction.preassigned_factions,
        minor_factions_mode: faction.minor_factions_mode,
        num_slices,
        randomize_slices: true,
        draft_speaker: format.draft_speaker,
        allow_home_planet_search: format.allow_home_planet_search,
        allow_empty_tiles: format.allow_empty_tiles,
        draft_player_colors: format.draft_player_colors,
        modifiers: format.ban_factions.then_some(DraftModifiers {
            ban_factions: BanFactions { num_factions: 1 },
        }),
        allowed_factions: faction.allowed_factions.clone(),
        required_factions: faction.required_factions.clone(),
        faction_stratification: faction.stratified_config.clone(),
        slice_generation_config: build_slice_generation_config(
            setup.map.map_type,
            milty,
            milty_eq,
            has_minor_factions,
        ),
        minor_factions_in_shared_pool: None,
        num_minor_factions: None,
    };

    match faction.minor_factions_mode {
        Some(MinorFactionsMode::SharedPool) => settings.minor_factions_in_shared_pool = Some(true),
        Some(MinorFactionsMode::SeparatePool { num_minor_factions }) => {
            settings.num_minor_factions = Some(num_minor_factions)
        }
        None => {}
    }

    Ok(settings)
}

/// How the draft gets started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftRequest {
    /// Form fields posted to [`MULTIDRAFT_ACTION`].
    Multidraft { form: Vec<(String, String)> },
    /// State handed to [`NEW_DRAFT_PATH`].
    Single {
        draft_settings: DraftSettings,
        players: Vec<Player>,
        discord_data: Option<DiscordData>,
    },
}

impl DraftRequest {
    pub fn target(&self) -> &'static str {
        match self {
            DraftRequest::Multidraft { .. } => MULTIDRAFT_ACTION,
            DraftRequest::Single { .. } => NEW_DRAFT_PATH,
        }
    }
}

pub fn draft_request(
    draft_settings: DraftSettings,
    setup: &DraftSetup,
    discord_data: Option<DiscordData>,
) -> Result<DraftRequest, SettingsError> {
    let players = setup.player.players.clone();
    if !setup.multidraft.is_multidraft {
        return Ok(DraftRequest::Single {
            draft_settings,
            players,
            discord_data,
        });
    }

    let discord = match &discord_data {
        Some(data) => serde_json::to_string(data)?,
        None => String::new(),
    };
    let form = vec![
        (
            "draftSettings".to_string(),
            serde_json::to_string(&draft_settings)?,
        ),
        ("players".to_string(), serde_json::to_string(&players)?),
        ("discordData".to_string(), discord),
        (
            "numDrafts".to_string(),
            setup.multidraft.num_drafts.to_string(),
        ),
    ];
    Ok(DraftRequest::Multidraft { form })
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("draft request rejected: {0}")]
    Rejected(String),
}

/// Consumer of finished draft requests, e.g. a router or form poster.
pub trait DraftSink {
    fn submit(&mut self, request: DraftRequest) -> Result<(), SinkError>;
}

/// Package the settings and hand them to `sink`.
pub fn navigate_to_draft(
    draft_settings: DraftSettings,
    setup: &DraftSetup,
    discord_data: Option<DiscordData>,
    sink: &mut dyn DraftSink,
) -> Result<(), NavigateError> {
    let request = draft_request(draft_settings, setup, discord_data)?;
    debug!(destination = request.target(), "submitting draft request");
    sink.submit(request)?;
    Ok(())
}

#[derive(Debug, Error)]
pub enum NavigateError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Sink(#[from] SinkError),
}
