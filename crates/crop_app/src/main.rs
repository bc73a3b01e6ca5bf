mod config;
mod logging;
mod script;
mod session;

use std::io;

use anyhow::Context;
use crop_field::{load_catalog, load_field_state, Field};
use farm_logging::farm_info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{AppConfig, USAGE};
use crate::session::Session;

fn main() -> anyhow::Result<()> {
    let config = match AppConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            std::process::exit(2);
        }
    };
    logging::initialize(config.log_destination);

    let catalog = load_catalog(&config.catalog_path)
        .with_context(|| format!("loading crop catalog {:?}", config.catalog_path))?;

    let saved = match &config.state_path {
        Some(path) => load_field_state(path)
            .with_context(|| format!("loading field state {:?}", path))?,
        None => None,
    };
    let field = match saved {
        Some(saved) => {
            farm_info!("Resuming field saved at {}", saved.saved_utc);
            Field::restore(catalog, saved.field)
        }
        None => Field::new(catalog),
    };

    let rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = Session::new(field, rng, config.state_path);
    session.run(io::stdin().lock(), io::stdout().lock())
}
