use std::fs;

use anyhow::Context;
use clap::ArgMatches;
use slice_core::SystemCatalog;
use tracing::info;

/// Options shared by every subcommand.
pub struct Settings {
    pub catalog: SystemCatalog,
    pub json: bool,
}

impl Settings {
    pub fn from_matches(matches: &ArgMatches) -> anyhow::Result<Self> {
        let catalog = match matches.get_one::<String>("catalog") {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("failed to read catalog {path}"))?;
                let catalog = SystemCatalog::from_json(&raw)
                    .with_context(|| format!("invalid catalog {path}"))?;
                info!(path = %path, systems = catalog.len(), "using catalog file");
                catalog
            }
            None => SystemCatalog::builtin()?,
        };

        Ok(Self {
            catalog,
            json: matches.get_flag("json"),
        })
    }
}
