use clap::{Arg, ArgMatches, Command};
use serde::Serialize;
use slice_core::hex::standard_map_order;
use slice_core::stats::{optimal_stats, tech_specialties, total_stats};
use slice_core::{Map, MapParser, OverflowPolicy, PlanetStats, TechSpecialty, SLICE_POSITION_ORDER};

use super::print_json;
use crate::settings::Settings;

pub const COMMAND_NAME: &str = "parse";

pub fn configure() -> Command {
    Command::new(COMMAND_NAME)
        .about("Parse a map string and print its tiles and stats.")
        .arg(
            Arg::new("map")
                .required(true)
                .help("Space-separated system ids, quoted"),
        )
        .arg(
            Arg::new("layout")
                .long("layout")
                .value_parser(["slice", "standard"])
                .default_value("standard")
                .help("Position table to place tiles on"),
        )
        .arg(
            Arg::new("overflow")
                .long("overflow")
                .value_parser(["reject", "truncate", "extend"])
                .default_value("reject")
                .help("What to do with more ids than positions"),
        )
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    map: &'a Map,
    total: PlanetStats,
    optimal: PlanetStats,
    specialties: Vec<TechSpecialty>,
}

pub fn handle(matches: &ArgMatches, settings: &Settings) -> anyhow::Result<()> {
    let map_string = matches
        .get_one::<String>("map")
        .map(|s| s.as_str())
        .unwrap_or_default();

    let standard = standard_map_order();
    let positions = match matches.get_one::<String>("layout").map(|s| s.as_str()) {
        Some("slice") => &SLICE_POSITION_ORDER[..],
        _ => &standard[..],
    };
    let overflow = match matches.get_one::<String>("overflow").map(|s| s.as_str()) {
        Some("truncate") => OverflowPolicy::Truncate,
        Some("extend") => OverflowPolicy::Extend,
        _ => OverflowPolicy::Reject,
    };

    let map = MapParser::new(&settings.catalog)
        .positions(positions)
        .overflow(overflow)
        .parse(map_string)?;

    let output = ParseOutput {
        map: &map,
        total: total_stats(&map.tiles),
        optimal: optimal_stats(&map.tiles),
        specialties: tech_specialties(&map.tiles),
    };

    if settings.json {
        return print_json(&output);
    }

    for tile in map.iter() {
        let p = tile.position;
        match tile.system_record() {
            Some(system) => {
                let planets = system
                    .planets
                    .iter()
                    .map(|planet| format!("{} {}/{}", planet.name, planet.resources, planet.influence))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("({}, {}, {}) system {} [{}]", p.x, p.y, p.z, system.id, planets);
            }
            None => println!("({}, {}, {}) open", p.x, p.y, p.z),
        }
    }
    println!(
        "total {}/{} (flex {}), optimal {}/{} (+{} flex), {} specialties",
        output.total.resources,
        output.total.influence,
        output.total.flex,
        output.optimal.resources,
        output.optimal.influence,
        output.optimal.flex,
        output.specialties.len()
    );

    Ok(())
}
