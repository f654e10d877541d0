use anyhow::{Context, Result};

use citymap::args::{self, CliAction, Command, ParsedArgs, RunOptions};
use citymap::commands::{self, CommandOutcome};
use citymap::config::Config;
use citymap::constants::EXIT_FAILURE;
use citymap::logger::Log;
use citymap::service::CityMap;

fn main() {
    let parsed = ParsedArgs::from_env();

    let (options, command) = match parsed.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            return;
        }
        CliAction::ShowHelp => {
            args::display_help();
            return;
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run { options, command } => (options, command),
    };

    Log::set_debug(options.debug_enabled);
    Log::log_version();

    let exit_code = match run(&options, &command) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            Log::log_pipe();
            Log::log_error(&format!("{:#}", e));
            EXIT_FAILURE
        }
    };

    Log::log_end();
    std::process::exit(exit_code);
}

fn run(options: &RunOptions, command: &Command) -> Result<CommandOutcome> {
    let config = match &options.config_path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if options.debug_enabled {
        config.log_config();
    }

    let service = CityMap::open(&config).context("Failed to open the city database")?;

    // seeding is the one command that may run against an empty catalog
    if !matches!(command, Command::Seed { .. }) && catalog_is_empty(&service) {
        Log::log_pipe();
        Log::log_warning("The city catalog is empty. Run `citymap seed` to load world cities");
    }

    commands::run_command(&service, &config, options, command)
}

fn catalog_is_empty(service: &CityMap) -> bool {
    match service.catalog().count() {
        Ok(count) => count == 0,
        // a missing cities table surfaces as a storage error on first lookup
        Err(_) => true,
    }
}
