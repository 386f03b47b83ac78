//! Command-line argument definitions using clap.
//!
//! Each command's arguments live in a clap `Args` struct and convert into the
//! framework-free parameter types of `festplan_core::params`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → PlannerSession
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use festplan_core::params::{LineupQuery, OpenFestival, SetSelection};

/// Build a personal schedule for a music festival
///
/// Browse a festival's lineup, pick the sets you want to see, get warned
/// about overlapping sets, and share your plan as a link. Plans and
/// favorites are saved per festival.
#[derive(Parser)]
#[command(version, about, name = "fp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/festplan/festplan.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Base URL share links are built on
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Extra lineup document(s) to load; may be given more than once
    #[arg(long, global = true)]
    pub lineup_file: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the festivals available to plan
    #[command(aliases = ["f", "ls"])]
    Festivals,
    /// Show a festival's lineup for one day
    #[command(alias = "l")]
    Lineup(LineupArgs),
    /// List the genres played at a festival
    #[command(alias = "g")]
    Genres(FestivalArgs),
    /// Show your plan and its conflicts
    #[command(alias = "p")]
    Plan(FestivalArgs),
    /// Add sets to the plan, or remove them if already planned
    #[command(alias = "t")]
    Toggle(SetsArgs),
    /// Mark sets as favorites, or unmark them
    #[command(alias = "fav")]
    Favorite(SetsArgs),
    /// Remove every set from the plan
    Clear(FestivalArgs),
    /// Replace your plan with one from a share link
    #[command(alias = "i")]
    Import(ImportArgs),
    /// Print the share link for your plan
    #[command(alias = "s")]
    Share(FestivalArgs),
}

#[derive(ClapArgs)]
pub struct FestivalArgs {
    #[arg(help = "Festival identifier, e.g. doom-valley-2026")]
    pub festival: String,
}

impl From<FestivalArgs> for OpenFestival {
    fn from(val: FestivalArgs) -> Self {
        OpenFestival {
            festival_id: val.festival,
            plan: None,
        }
    }
}

#[derive(ClapArgs)]
pub struct LineupArgs {
    #[arg(help = "Festival identifier, e.g. doom-valley-2026")]
    pub festival: String,
    #[arg(short, long, help = "Day to show (defaults to the first day)")]
    pub day: Option<String>,
    #[arg(short, long, help = "Only bands whose name contains this text")]
    pub query: Option<String>,
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Only sets with any of these genres, comma-separated"
    )]
    pub genre: Vec<String>,
    #[arg(long, help = "Only show favorited sets")]
    pub favorites: bool,
    #[arg(long, help = "Shared plan value to import before showing the lineup")]
    pub plan: Option<String>,
}

impl LineupArgs {
    /// Splits the arguments into what opens the session and what filters it.
    pub fn into_params(self) -> (OpenFestival, LineupQuery) {
        (
            OpenFestival {
                festival_id: self.festival,
                plan: self.plan,
            },
            LineupQuery {
                day: self.day,
                search: self.query,
                genres: self.genre,
                favorites_only: self.favorites,
            },
        )
    }
}

#[derive(ClapArgs)]
pub struct SetsArgs {
    #[arg(help = "Festival identifier, e.g. doom-valley-2026")]
    pub festival: String,
    #[arg(required = true, help = "Set identifiers as shown by `fp lineup`")]
    pub sets: Vec<String>,
}

impl From<SetsArgs> for SetSelection {
    fn from(val: SetsArgs) -> Self {
        SetSelection {
            festival_id: val.festival,
            set_ids: val.sets,
        }
    }
}

#[derive(ClapArgs)]
pub struct ImportArgs {
    #[arg(help = "Festival identifier, e.g. doom-valley-2026")]
    pub festival: String,
    #[arg(help = "A share link, or just its plan value (comma-separated set IDs)")]
    pub link: String,
}
