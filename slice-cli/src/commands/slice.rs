use clap::{Arg, ArgAction, ArgMatches, Command};
use slice_core::SliceSummary;

use super::print_json;
use crate::settings::Settings;

pub const COMMAND_NAME: &str = "slice";

pub fn configure() -> Command {
    Command::new(COMMAND_NAME)
        .about("Summarize one slice from its system ids.")
        .arg(Arg::new("name").required(true))
        .arg(
            Arg::new("systems")
                .required(true)
                .action(ArgAction::Append)
                .num_args(1..)
                .help("System ids in slice order"),
        )
}

pub fn handle(matches: &ArgMatches, settings: &Settings) -> anyhow::Result<()> {
    let name = matches
        .get_one::<String>("name")
        .map(|s| s.as_str())
        .unwrap_or_default();
    let systems: Vec<&str> = matches
        .get_many::<String>("systems")
        .map(|values| values.map(|s| s.as_str()).collect())
        .unwrap_or_default();

    let summary = SliceSummary::build(name, &systems, &settings.catalog)?;

    if settings.json {
        return print_json(&summary);
    }
    println!("{}", summary.describe());

    Ok(())
}
