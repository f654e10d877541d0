use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

use citymap::args::{CliAction, Command, ParsedArgs, RunOptions};
use citymap::commands::{CommandOutcome, run_command};
use citymap::seed::{NewCity, create_catalog_table, insert_cities};
use citymap::{CityMap, Config, Database, Log};

/// A config file pointing at a seeded database and a separate output directory.
fn setup() -> (TempDir, Config, CityMap) {
    Log::set_enabled(false);
    let temp_dir = tempdir().unwrap();
    let output_dir = temp_dir.path().join("maps");
    fs::create_dir_all(&output_dir).unwrap();

    let config_path = temp_dir.path().join("citymap.toml");
    fs::write(
        &config_path,
        format!(
            "database = \"cities.db\"\noutput_dir = {:?}\ndpi = 50\n",
            output_dir.display().to_string()
        ),
    )
    .unwrap();
    let config = Config::load_from_path(&config_path).unwrap();

    let db = Database::new(config.database_path());
    create_catalog_table(&db).unwrap();
    insert_cities(
        &db,
        &[
            NewCity::new("Berlin", 52.52, 13.405, "Germany"),
            NewCity::new("New York", 40.6943, -73.9249, "United States"),
            NewCity::new("Los Angeles", 34.1141, -118.4068, "United States"),
        ],
    )
    .unwrap();

    let service = CityMap::open(&config).unwrap();
    (temp_dir, config, service)
}

fn run_args(service: &CityMap, config: &Config, args: &[&str]) -> CommandOutcome {
    let argv = std::iter::once("citymap").chain(args.iter().copied());
    let CliAction::Run { options, command } = ParsedArgs::parse(argv).action else {
        panic!("arguments did not parse to a command: {:?}", args);
    };
    run_command(service, config, &options, &command).unwrap()
}

fn map_path(temp_dir: &Path, name: &str) -> PathBuf {
    temp_dir.join("maps").join(name)
}

#[test]
fn test_database_resolves_next_to_config() {
    let (temp_dir, config, _service) = setup();
    assert_eq!(config.database_path(), temp_dir.path().join("cities.db"));
    assert!(config.database_path().exists());
}

#[test]
fn test_show_writes_single_map() {
    let (temp_dir, config, service) = setup();

    let outcome = run_args(&service, &config, &["show", "-u", "11", "new", "york"]);
    assert_eq!(outcome, CommandOutcome::Completed);
    assert!(map_path(temp_dir.path(), "map_11_single.png").exists());
}

#[test]
fn test_show_unknown_city_is_not_found() {
    let (temp_dir, config, service) = setup();

    let outcome = run_args(&service, &config, &["show", "Atlantis"]);
    assert_eq!(outcome, CommandOutcome::NotFound);
    assert_eq!(outcome.exit_code(), citymap::constants::EXIT_NOT_FOUND);
    assert!(!map_path(temp_dir.path(), "map_0_single.png").exists());
}

#[test]
fn test_remember_then_my_cities() {
    let (temp_dir, config, service) = setup();

    assert_eq!(
        run_args(&service, &config, &["my-cities", "--user", "4"]),
        CommandOutcome::NotFound
    );
    assert_eq!(
        run_args(&service, &config, &["remember", "--user", "4", "Berlin"]),
        CommandOutcome::Completed
    );
    assert_eq!(
        run_args(&service, &config, &["remember", "--user", "4", "Gotham"]),
        CommandOutcome::NotFound
    );
    assert_eq!(
        run_args(&service, &config, &["my-cities", "--user", "4"]),
        CommandOutcome::Completed
    );

    assert!(map_path(temp_dir.path(), "map_4_all.png").exists());
    assert_eq!(service.favorites(4).unwrap().len(), 1);
}

#[test]
fn test_distance_between_multi_word_cities() {
    let (temp_dir, config, service) = setup();

    let outcome = run_args(
        &service,
        &config,
        &["distance", "New", "York", "--", "Los", "Angeles"],
    );
    assert_eq!(outcome, CommandOutcome::Completed);
    assert!(map_path(temp_dir.path(), "map_0_distance.png").exists());

    let outcome = run_args(&service, &config, &["distance", "Berlin,", "Gotham"]);
    assert_eq!(outcome, CommandOutcome::NotFound);
}

#[test]
fn test_render_command_reads_point_file() {
    let (temp_dir, config, service) = setup();
    let points = temp_dir.path().join("points.json");
    let output = temp_dir.path().join("points.png");
    fs::write(
        &points,
        r#"[{"city": "A", "lat": 10.0, "lng": 20.0}, {"name": "B", "lat": -5.0, "lon": 100.0}]"#,
    )
    .unwrap();

    let command = Command::Render {
        points: points.clone(),
        output: output.clone(),
    };
    let outcome = run_command(&service, &config, &RunOptions::default(), &command).unwrap();
    assert_eq!(outcome, CommandOutcome::Completed);
    assert!(output.exists());
}

#[test]
fn test_render_command_rejects_bad_records() {
    let (temp_dir, config, service) = setup();
    let points = temp_dir.path().join("points.json");
    fs::write(&points, r#"[{"city": "A", "lat": 10.0}]"#).unwrap();

    let command = Command::Render {
        points,
        output: temp_dir.path().join("points.png"),
    };
    let err = run_command(&service, &config, &RunOptions::default(), &command).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse points"));
}

#[test]
fn test_seed_leaves_existing_catalog_alone() {
    let (_temp_dir, config, service) = setup();

    let outcome = run_args(&service, &config, &["seed"]);
    assert_eq!(outcome, CommandOutcome::Completed);
    assert_eq!(service.catalog().count().unwrap(), 3);
}
