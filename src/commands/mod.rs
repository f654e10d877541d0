//! Command-line command handlers for citymap.
//!
//! Each command lives in its own submodule. Handlers print their results with
//! the decorated logger and report whether anything was found, which `main`
//! turns into the process exit code.

pub mod distance;
pub mod my_cities;
pub mod remember;
pub mod render;
pub mod seed;
pub mod show;

use anyhow::Result;

use crate::args::{Command, RunOptions};
use crate::config::Config;
use crate::constants::EXIT_NOT_FOUND;
use crate::service::CityMap;

/// How a command ended, when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Completed,
    /// The city was unknown or the user has no favorites.
    NotFound,
}

impl CommandOutcome {
    pub fn exit_code(self) -> i32 {
        match self {
            CommandOutcome::Completed => 0,
            CommandOutcome::NotFound => EXIT_NOT_FOUND,
        }
    }
}

/// Dispatch a parsed command to its handler.
pub fn run_command(
    service: &CityMap,
    config: &Config,
    options: &RunOptions,
    command: &Command,
) -> Result<CommandOutcome> {
    let output_dir = config.output_dir();
    match command {
        Command::Show { city } => {
            show::handle_show_command(service, &output_dir, options.user_id, city)
        }
        Command::Remember { city } => {
            remember::handle_remember_command(service, options.user_id, city)
        }
        Command::MyCities => {
            my_cities::handle_my_cities_command(service, &output_dir, options.user_id)
        }
        Command::Distance { from, to } => {
            distance::handle_distance_command(service, &output_dir, options.user_id, from, to)
        }
        Command::Render { points, output } => {
            render::handle_render_command(service, points, output)
        }
        Command::Seed { force } => seed::handle_seed_command(service, *force),
    }
}
