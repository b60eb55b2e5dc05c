mod commands;
mod settings;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use settings::Settings;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut command = Command::new("slice")
        .about("Inspect hex-map slices: parse map strings, summarize and deal slices.")
        .arg(
            Arg::new("catalog")
                .short('c')
                .long("catalog")
                .env("SLICE_CATALOG")
                .value_name("PATH")
                .help("JSON system catalog; the bundled one is used when omitted")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print JSON instead of text")
                .global(true),
        );

    command = commands::configure(command);

    let matches = command.get_matches();
    // Global args land on the subcommand's matches.
    let scoped = matches.subcommand().map_or(&matches, |(_, sub)| sub);
    let settings = Settings::from_matches(scoped)?;

    commands::handle(&matches, &settings)?;

    Ok(())
}
