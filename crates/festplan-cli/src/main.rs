//! Festplan CLI Application
//!
//! Command-line interface for the festplan festival schedule planner.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use festplan_core::PlannerBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        base_url,
        lineup_file,
        command,
    } = Args::parse();

    let builder = lineup_file.iter().fold(
        PlannerBuilder::new()
            .with_database_path(database_file)
            .with_base_url(base_url),
        |builder, path| builder.with_lineup_file(path),
    );
    let planner = builder.build().context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Festplan started");

    let cli = Cli::new(planner, renderer);
    match command {
        Some(Festivals) | None => cli.list_festivals(),
        Some(Lineup(args)) => {
            let (open, query) = args.into_params();
            cli.show_lineup(&open, &query)
        }
        Some(Genres(args)) => cli.list_genres(&args.into()),
        Some(Plan(args)) => cli.show_plan(&args.into()),
        Some(Toggle(args)) => cli.toggle(args.into()),
        Some(Favorite(args)) => cli.favorite(args.into()),
        Some(Clear(args)) => cli.clear(&args.into()),
        Some(Import(args)) => cli.import(args),
        Some(Share(args)) => cli.share(&args.into()),
    }
}
