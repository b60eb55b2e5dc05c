use clap::{value_parser, Arg, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;
use slice_core::slice::deal_slices;
use slice_core::summarize_slices;
use tracing::debug;

use super::print_json;
use crate::settings::Settings;

pub const COMMAND_NAME: &str = "deal";

pub fn configure() -> Command {
    Command::new(COMMAND_NAME)
        .about("Deal random slices from the catalog's draftable systems.")
        .arg(
            Arg::new("slices")
                .short('n')
                .long("slices")
                .default_value("6")
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("size")
                .short('k')
                .long("size")
                .default_value("3")
                .value_parser(value_parser!(u64).range(1..=4)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .help("Seed for a reproducible deal"),
        )
}

pub fn handle(matches: &ArgMatches, settings: &Settings) -> anyhow::Result<()> {
    let num_slices = matches.get_one::<u64>("slices").copied().unwrap_or(6) as usize;
    let slice_size = matches.get_one::<u64>("size").copied().unwrap_or(3) as usize;
    let mut rng = match matches.get_one::<u64>("seed") {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_entropy(),
    };

    let pool = settings.catalog.blue_tiles();
    debug!(pool = pool.len(), num_slices, slice_size, "dealing slices");
    let dealt = deal_slices(&pool, num_slices, slice_size, &mut rng)?;

    let named: Vec<(String, Vec<String>)> = dealt
        .iter()
        .enumerate()
        .map(|(idx, ids)| {
            let systems = ids.iter().map(u32::to_string).collect();
            (format!("Slice {}", idx + 1), systems)
        })
        .collect();
    let board = summarize_slices(&named, &settings.catalog)?;

    if settings.json {
        return print_json(&board);
    }
    for summary in &board.slices {
        println!("{}  [{}]", summary.describe(), summary.map_string);
    }
    println!("optimal spread: {}", board.optimal_spread);

    Ok(())
}
