//! Shot-chart outcome prediction CLI
//!
//! Fetches shot and outcome data from the NBA stats API and trains an
//! SVM on court-grid occupancy features.

use clap::{Parser, Subcommand};
use hoops::training::Kernel;
use hoops::{Config, Result, SeasonType};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "NBA game outcome prediction from shot-chart data", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Data management commands
    Data {
        #[command(subcommand)]
        action: DataCommands,
    },
    /// Train on one split and report test accuracy
    Train {
        /// Shot CSV (defaults to the configured path)
        #[arg(long)]
        shots: Option<String>,
        /// Team whose games are classified
        #[arg(long)]
        team_id: i64,
        /// Outcome cache file (defaults to the configured path)
        #[arg(long)]
        outcomes: Option<String>,
        /// Kernel to use; all three when omitted
        #[arg(long)]
        kernel: Option<Kernel>,
        /// Fraction of games held out for testing
        #[arg(long)]
        test_size: Option<f64>,
        /// Seed for the split shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
    /// K-fold cross-validated accuracy
    CrossValidate {
        /// Shot CSV (defaults to the configured path)
        #[arg(long)]
        shots: Option<String>,
        /// Team whose games are classified
        #[arg(long)]
        team_id: i64,
        /// Outcome cache file (defaults to the configured path)
        #[arg(long)]
        outcomes: Option<String>,
        /// Kernel to use; all three when omitted
        #[arg(long)]
        kernel: Option<Kernel>,
        /// Number of folds
        #[arg(long)]
        folds: Option<usize>,
        /// Seed for the fold shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Initialize a new project with default config
    Init,
}

#[derive(Subcommand)]
enum DataCommands {
    /// Scrape a season of shots for the league's scoring leaders
    FetchShots {
        /// Year the season begins
        #[arg(long)]
        season: u16,
        /// Season stage
        #[arg(long, default_value = "regular")]
        season_type: SeasonType,
        /// Only fetch the top N leaders
        #[arg(long)]
        top: Option<usize>,
        /// Output CSV (defaults to the configured path)
        #[arg(long)]
        output: Option<String>,
        /// JSON checkpoint rewritten after each player
        #[arg(long, default_value = "data/fetch_progress.json")]
        progress: String,
    },
    /// Resolve and cache win/loss outcomes for a team's games
    FetchOutcomes {
        /// Shot CSV (defaults to the configured path)
        #[arg(long)]
        shots: Option<String>,
        /// Team the outcomes are relative to
        #[arg(long)]
        team_id: i64,
        /// Cache file (defaults to the configured path)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show shot table statistics
    Status {
        /// Shot CSV (defaults to the configured path)
        #[arg(long)]
        shots: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Data { action } => match action {
            DataCommands::FetchShots {
                season,
                season_type,
                top,
                output,
                progress,
            } => commands::fetch_shots(&config, season, season_type, top, output, &progress),
            DataCommands::FetchOutcomes {
                shots,
                team_id,
                output,
            } => commands::fetch_outcomes(&config, shots, team_id, output),
            DataCommands::Status { shots } => commands::data_status(&config, shots),
        },
        Commands::Train {
            shots,
            team_id,
            outcomes,
            kernel,
            test_size,
            seed,
        } => commands::train(&config, shots, team_id, outcomes, kernel, test_size, seed),
        Commands::CrossValidate {
            shots,
            team_id,
            outcomes,
            kernel,
            folds,
            seed,
        } => commands::cross_validate(&config, shots, team_id, outcomes, kernel, folds, seed),
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use hoops::data::api::shot_chart::ShotChartRequest;
    use hoops::data::{OutcomeCache, ShotTable, StatsClient, TeamDataset};
    use hoops::features::ShotFeaturizer;
    use hoops::training::{self, Kernel};
    use hoops::{Season, SortCategory, TeamId};

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        std::fs::create_dir_all("data")?;
        println!("Created data/ directory");

        println!("\nNext steps:");
        println!("  1. Edit {} to customize settings", config_path);
        println!("  2. Run 'hoops data fetch-shots --season 2018' to scrape a season");
        println!("  3. Run 'hoops data fetch-outcomes --team-id <ID>' to cache results");
        println!("  4. Run 'hoops train --team-id <ID>' to fit the classifier");
        Ok(())
    }

    pub fn fetch_shots(
        config: &Config,
        season: u16,
        season_type: SeasonType,
        top: Option<usize>,
        output: Option<String>,
        progress: &str,
    ) -> Result<()> {
        let season = Season(season);
        let output = output.unwrap_or_else(|| config.data.shots_path.clone());
        let client = StatsClient::new(&config.api);

        let mut leaders = client.league_leaders(season, season_type, SortCategory::Points)?;
        if let Some(top) = top {
            leaders.truncate(top);
        }
        println!("Fetching shot logs for {} players ({})", leaders.len(), season);

        if let Some(parent) = std::path::Path::new(progress).parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut shots = Vec::new();
        let total = leaders.len();
        for (i, leader) in leaders.into_iter().enumerate() {
            println!("[{}/{}] {}", i + 1, total, leader.player_name);
            client.throttle();

            let request = ShotChartRequest::new(leader.player_id, season, season_type);
            shots.extend(client.shot_chart(&request)?);

            // Checkpoint progress so an aborted run loses one player at most
            std::fs::write(progress, serde_json::to_string_pretty(&shots)?)?;
        }

        let table = ShotTable::new(shots);
        table.write_csv_path(&output)?;
        println!("Wrote {} shots to {}", table.len(), output);
        Ok(())
    }

    pub fn fetch_outcomes(
        config: &Config,
        shots: Option<String>,
        team_id: i64,
        output: Option<String>,
    ) -> Result<()> {
        let shots = shots.unwrap_or_else(|| config.data.shots_path.clone());
        let output = output.unwrap_or_else(|| config.data.outcomes_path.clone());
        let team_id = TeamId(team_id);

        let table = ShotTable::from_csv_path(&shots)?;
        let game_ids = table.team_game_ids(team_id);
        if game_ids.is_empty() {
            return Err(hoops::HoopsError::NoGames(team_id));
        }

        let client = StatsClient::new(&config.api);
        let mut cache = OutcomeCache::load_or_empty(&output);
        let fetched = cache.fetch_missing(&client, &game_ids, team_id)?;
        cache.save(&output)?;

        println!(
            "{} outcomes cached ({} fetched, {} already present)",
            cache.len(),
            fetched,
            game_ids.len() - fetched
        );
        Ok(())
    }

    pub fn data_status(config: &Config, shots: Option<String>) -> Result<()> {
        let shots = shots.unwrap_or_else(|| config.data.shots_path.clone());
        let table = ShotTable::from_csv_path(&shots)?;
        let stats = table.stats();

        println!("Shot table: {}", shots);
        println!("  Shots: {}", stats.shot_count);
        println!("  Games: {}", stats.game_count);
        println!("  Teams: {}", stats.team_count);
        match (stats.earliest_game, stats.latest_game) {
            (Some(earliest), Some(latest)) => {
                println!("  Date range: {} to {}", earliest, latest)
            }
            _ => println!("  Date range: unknown"),
        }
        Ok(())
    }

    fn load_dataset(
        config: &Config,
        shots: Option<String>,
        team_id: i64,
        outcomes: Option<String>,
    ) -> Result<TeamDataset> {
        let shots = shots.unwrap_or_else(|| config.data.shots_path.clone());
        let outcomes = outcomes.unwrap_or_else(|| config.data.outcomes_path.clone());

        let table = ShotTable::from_csv_path(&shots)?;
        let cache = OutcomeCache::load(&outcomes)?;
        let featurizer = ShotFeaturizer::from_config(&config.court);
        TeamDataset::build(&table, TeamId(team_id), &cache, &featurizer)
    }

    pub fn train(
        config: &Config,
        shots: Option<String>,
        team_id: i64,
        outcomes: Option<String>,
        kernel: Option<Kernel>,
        test_size: Option<f64>,
        seed: Option<u64>,
    ) -> Result<()> {
        let dataset = load_dataset(config, shots, team_id, outcomes)?;
        let test_size = test_size.unwrap_or(config.training.test_size);
        let seed = seed.or(config.training.seed);

        let split = dataset.train_test_split(test_size, seed)?;
        println!(
            "{} games: {} train, {} test ({} features)",
            dataset.len(),
            split.x_train.nrows(),
            split.x_test.nrows(),
            dataset.dim()
        );

        let kernels: Vec<Kernel> = match kernel {
            Some(kernel) => vec![kernel],
            None => Kernel::ALL.to_vec(),
        };
        for kernel in kernels {
            let metrics = training::train_and_evaluate(&split, kernel, &config.training)?;
            println!("{} accuracy: {:.4}", kernel, metrics.accuracy());
            log::debug!("{}: {}", kernel, metrics);
        }
        Ok(())
    }

    pub fn cross_validate(
        config: &Config,
        shots: Option<String>,
        team_id: i64,
        outcomes: Option<String>,
        kernel: Option<Kernel>,
        folds: Option<usize>,
        seed: Option<u64>,
    ) -> Result<()> {
        let dataset = load_dataset(config, shots, team_id, outcomes)?;
        let folds = folds.unwrap_or(config.training.folds);
        let seed = seed.or(config.training.seed);

        println!(
            "{} games, {} folds ({} features)",
            dataset.len(),
            folds,
            dataset.dim()
        );

        let kernels: Vec<Kernel> = match kernel {
            Some(kernel) => vec![kernel],
            None => Kernel::ALL.to_vec(),
        };
        for kernel in kernels {
            let report = training::cross_validate(&dataset, kernel, folds, seed, &config.training)?;
            println!("{}: {}", kernel, report);
        }
        Ok(())
    }
}
