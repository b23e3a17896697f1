mod cli;
mod config;
mod errors;
mod runner;

use app::{AppBuilder, Application};
use clap::Parser;
use color_eyre::{Result, eyre::eyre};

use crate::cli::Cli;
use crate::config::Config;

struct Intake;

impl Application for Intake {
    const APP_ID: &'static str = "intake";
}

#[tokio::main]
pub async fn main() -> Result<()> {
    errors::init()?;
    let args = Cli::parse();
    let context = AppBuilder::<Intake>::new(env!("CARGO_PKG_VERSION"))
        .map_err(|e| eyre!("initialisation failed: {e}"))?
        .build_simple();
    let config = Config::load(context.path_context())?;
    let resources_dir = context.path_context().resources_dir();
    runner::run(args, config, &resources_dir).await
}
