mod deal;
mod parse;
mod slice;

use clap::{ArgMatches, Command};
use serde::Serialize;

use crate::settings::Settings;

pub fn configure(command: Command) -> Command {
    command
        .subcommand(parse::configure())
        .subcommand(slice::configure())
        .subcommand(deal::configure())
        .subcommand_required(true)
        .arg_required_else_help(true)
}

pub fn handle(matches: &ArgMatches, settings: &Settings) -> anyhow::Result<()> {
    if let Some((cmd, matches)) = matches.subcommand() {
        match cmd {
            parse::COMMAND_NAME => parse::handle(matches, settings)?,
            slice::COMMAND_NAME => slice::handle(matches, settings)?,
            deal::COMMAND_NAME => deal::handle(matches, settings)?,
            &_ => {}
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
