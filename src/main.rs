use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use live_game_scraper::{
    parse_page, print_parsed_page, to_json, to_json_all, write_participants_csv, InMemoryLiveGameStore,
    LiveGame, LiveGameClient, LiveGameService, ParsedPage, Platform, ScraperConfig, CSV_OUTPUT_FILE,
};

#[derive(Parser)]
#[command(name = "live_game_scraper")]
#[command(version, about = "Scrape porofessor.gg live game pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Also write participants to this CSV file
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = CSV_OUTPUT_FILE)]
    csv: Option<PathBuf>,

    /// Print JSON instead of the console table
    #[arg(long, global = true)]
    json: bool,

    /// trace, debug, info, warn or error
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: Level,

    /// Never expire cached entries
    #[arg(long, global = true, env = "INFINITE_CACHE")]
    infinite_cache: bool,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,

    /// Live page endpoint
    #[arg(long, global = true, env = "BASE_URL")]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the live game of one or more summoners
    Scrape {
        /// Platform code (EUW, NA, KR, ...)
        platform: Platform,

        #[arg(required = true)]
        summoners: Vec<String>,
    },
    /// Parse a saved live game page
    Parse {
        file: PathBuf,
    },
}

fn config_from(cli: &Cli) -> ScraperConfig {
    let base = if cli.infinite_cache {
        ScraperConfig::infinite_cache()
    } else {
        ScraperConfig::default()
    };
    ScraperConfig {
        request_timeout: Duration::from_secs(cli.timeout_secs),
        base_url: cli.base_url.clone().unwrap_or_else(|| base.base_url.clone()),
        ..base
    }
}

fn write_csv(pages: &[ParsedPage], cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Some(path) = &cli.csv {
        let games: Vec<LiveGame> = pages
            .iter()
            .filter_map(|page| match page {
                ParsedPage::ActiveGameFound(game) => Some(game.clone()),
                ParsedPage::NoActiveGame => None,
            })
            .collect();
        write_participants_csv(&games, path)?;
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    match &cli.command {
        Commands::Parse { file } => {
            let html = std::fs::read_to_string(file)?;
            let page = parse_page(&html)?;
            if cli.json {
                println!("{}", to_json(&page)?);
            } else {
                print_parsed_page(&page);
            }
            write_csv(&[page], cli)?;
        }
        Commands::Scrape { platform, summoners } => {
            let config = config_from(cli);
            let client = LiveGameClient::new(&config)?;
            let service = LiveGameService::new(InMemoryLiveGameStore::new(), client, config);

            let results = service.find_many(*platform, summoners).await;

            let mut pages = Vec::new();
            let mut game_ids = Vec::new();
            for (name, result) in summoners.iter().zip(results) {
                match result {
                    // teammates share one game
                    Ok(Some(game)) if !game_ids.contains(&game.game_id) => {
                        game_ids.push(game.game_id);
                        pages.push(ParsedPage::ActiveGameFound(game));
                    }
                    Ok(Some(_)) => {}
                    Ok(None) => eprintln!("{} is not in game", name),
                    Err(e) => eprintln!("Error scraping {}: {}", name, e),
                }
            }

            if cli.json {
                println!("{}", to_json_all(&pages)?);
            } else {
                pages.iter().for_each(print_parsed_page);
            }
            write_csv(&pages, cli)?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
