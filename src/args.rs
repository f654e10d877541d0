//! Command-line argument parsing and processing.
//!
//! Arguments are parsed by hand into a [`CliAction`]. Global options may
//! appear anywhere on the line; the first bare word names the command and the
//! remaining words are its operands. City names may span several words, so
//! `citymap show New York` looks up "New York".

use std::path::PathBuf;

use crate::constants::DEFAULT_USER_ID;
use crate::logger::Log;

/// A command operating on the catalog, favorites or renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Render a single city to `map_<user>_single.png`
    Show { city: String },
    /// Add a city to the user's favorites
    Remember { city: String },
    /// List favorites and render them to `map_<user>_all.png`
    MyCities,
    /// Render a route between two cities to `map_<user>_distance.png`
    Distance { from: String, to: String },
    /// Render point records from a JSON file
    Render { points: PathBuf, output: PathBuf },
    /// Load the bundled world-cities database into the catalog
    Seed { force: bool },
}

/// Options shared by every command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub debug_enabled: bool,
    pub user_id: i64,
    pub config_path: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            debug_enabled: false,
            user_id: DEFAULT_USER_ID,
            config_path: None,
        }
    }
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run a command with these options
    Run { options: RunOptions, command: Command },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown or missing arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// The first item is the program name and is skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = RunOptions::default();
        let mut display_help = false;
        let mut display_version = false;
        let mut force = false;
        let mut unknown_arg_found = false;
        let mut command_name: Option<String> = None;
        let mut operands: Vec<String> = Vec::new();

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            let arg_str = &args_vec[i];
            match arg_str.as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => options.debug_enabled = true,
                "--force" | "-f" => force = true,
                "--user" | "-u" => {
                    match args_vec.get(i + 1).map(|value| value.parse::<i64>()) {
                        Some(Ok(user_id)) => options.user_id = user_id,
                        Some(Err(_)) => {
                            Log::log_warning(&format!("Invalid user id: {}", args_vec[i + 1]));
                            unknown_arg_found = true;
                        }
                        None => {
                            Log::log_warning("Missing value for --user. Usage: --user <id>");
                            unknown_arg_found = true;
                        }
                    }
                    i += 1;
                }
                "--config" | "-c" => {
                    match args_vec.get(i + 1) {
                        Some(path) => options.config_path = Some(PathBuf::from(path)),
                        None => {
                            Log::log_warning("Missing value for --config. Usage: --config <path>");
                            unknown_arg_found = true;
                        }
                    }
                    i += 1;
                }
                // separates the two cities of `distance`
                "--" if command_name.is_some() => operands.push(arg_str.clone()),
                _ => {
                    if arg_str.starts_with('-') && arg_str.len() > 1 {
                        Log::log_warning(&format!("Unknown option: {}", arg_str));
                        unknown_arg_found = true;
                    } else if command_name.is_none() {
                        command_name = Some(arg_str.clone());
                    } else {
                        operands.push(arg_str.clone());
                    }
                }
            }
            i += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else {
            match command_name {
                Some(name) => match parse_command(&name, &operands, force) {
                    Some(command) => CliAction::Run { options, command },
                    None => CliAction::ShowHelpDueToError,
                },
                None => {
                    Log::log_warning("No command given");
                    CliAction::ShowHelpDueToError
                }
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

fn parse_command(name: &str, operands: &[String], force: bool) -> Option<Command> {
    if force && name != "seed" {
        Log::log_warning("--force is only accepted by the seed command");
        return None;
    }

    let command = match name {
        "show" => Command::Show {
            city: city_operand(name, operands)?,
        },
        "remember" => Command::Remember {
            city: city_operand(name, operands)?,
        },
        "my-cities" => {
            no_operands(name, operands)?;
            Command::MyCities
        }
        "distance" => {
            let (from, to) = split_city_pair(operands)?;
            Command::Distance { from, to }
        }
        "render" => match operands {
            [points, output] => Command::Render {
                points: PathBuf::from(points),
                output: PathBuf::from(output),
            },
            _ => {
                Log::log_warning("Usage: render <points.json> <output.png>");
                return None;
            }
        },
        "seed" => {
            no_operands(name, operands)?;
            Command::Seed { force }
        }
        other => {
            Log::log_warning(&format!("Unknown command: {}", other));
            return None;
        }
    };

    Some(command)
}

fn city_operand(name: &str, operands: &[String]) -> Option<String> {
    let city = operands.join(" ").trim().to_string();
    if city.is_empty() {
        Log::log_warning(&format!("Usage: {} <city>", name));
        return None;
    }
    Some(city)
}

fn no_operands(name: &str, operands: &[String]) -> Option<()> {
    if !operands.is_empty() {
        Log::log_warning(&format!(
            "{} takes no arguments (got: {})",
            name,
            operands.join(" ")
        ));
        return None;
    }
    Some(())
}

/// Split `distance` operands into two city names.
///
/// Accepts `<a> -- <b>` or `<a>,<b>`, where either name may span several words.
pub fn split_city_pair(operands: &[String]) -> Option<(String, String)> {
    let (from, to) = match operands.iter().position(|operand| operand == "--") {
        Some(separator) => (
            operands[..separator].join(" "),
            operands[separator + 1..].join(" "),
        ),
        None => {
            let joined = operands.join(" ");
            match joined.split_once(',') {
                Some((from, to)) => (from.to_string(), to.to_string()),
                None => (joined, String::new()),
            }
        }
    };

    let (from, to) = (from.trim().to_string(), to.trim().to_string());
    if from.is_empty() || to.is_empty() {
        Log::log_warning("Usage: distance <city> -- <city>  or  distance <city>,<city>");
        return None;
    }
    Some((from, to))
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    Log::log_version();
    Log::log_pipe();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    Log::log_version();
    Log::log_block_start(env!("CARGO_PKG_DESCRIPTION"));
    Log::log_block_start("Usage: citymap [OPTIONS] <COMMAND>");
    Log::log_block_start("Commands:");
    Log::log_indented("show <city>                 Render a map of one city");
    Log::log_indented("remember <city>             Add a city to your favorites");
    Log::log_indented("my-cities                   List and render your favorite cities");
    Log::log_indented("distance <city> -- <city>   Draw a route between two cities");
    Log::log_indented("render <points.json> <png>  Render point records from a JSON file");
    Log::log_indented("seed [--force]              Load the bundled world-cities catalog");
    Log::log_indented("                            (--force adds bundled cities it lacks)");
    Log::log_block_start("Options:");
    Log::log_indented("-c, --config <path>         Use this configuration file");
    Log::log_indented("-d, --debug                 Enable detailed debug output");
    Log::log_indented("-h, --help                  Print help information");
    Log::log_indented("-u, --user <id>             User whose favorites are used (default 0)");
    Log::log_indented("-V, --version               Print version information");
    Log::log_end();
}
