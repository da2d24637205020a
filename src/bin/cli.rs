use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rundown_adapter::api::{EventSource, TheRundownClient};
use rundown_adapter::config::parse_id_list;
use rundown_adapter::data::{load_events_from_file, save_events_to_cache};
use rundown_adapter::{process_events, Config, Market, RequestParams, SportId};

#[derive(Parser)]
#[command(name = "cli", about = "Encode TheRundown events for the on-chain consumer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode events from a saved provider response
    Encode {
        /// JSON file with a provider response or a list of events
        #[arg(long)]
        file: String,
        #[arg(long)]
        sport_id: u32,
        #[arg(long, value_enum)]
        market: MarketArg,
        /// Comma separated bookmaker ids, highest priority first
        #[arg(long)]
        bookmaker_ids: Option<String>,
        /// Comma separated game ids or event ids to keep
        #[arg(long)]
        game_ids: Option<String>,
    },
    /// Fetch a day's events from TheRundown
    Fetch {
        #[arg(long)]
        sport_id: u32,
        /// Day to fetch (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Save the events to this file instead of printing them
        #[arg(long)]
        save: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MarketArg {
    Create,
    Resolve,
    Odds,
}

impl From<MarketArg> for Market {
    fn from(market: MarketArg) -> Self {
        match market {
            MarketArg::Create => Market::Create,
            MarketArg::Resolve => Market::Resolve,
            MarketArg::Odds => Market::Odds,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    rundown_adapter::init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Command::Encode {
            file,
            sport_id,
            market,
            bookmaker_ids,
            game_ids,
        } => {
            let sport = SportId::try_from(sport_id)?;
            let bookmaker_ids = match bookmaker_ids {
                Some(ids) => parse_id_list(&ids)?,
                None => config.bookmakers_for(sport).to_vec(),
            };
            let game_ids = game_ids.map(|ids| {
                ids.split(',')
                    .map(|id| id.trim().to_string())
                    .filter(|id| !id.is_empty())
                    .collect()
            });

            let params = RequestParams {
                sport,
                market: market.into(),
                bookmaker_ids,
                game_ids,
                status_ids: None,
            };

            let events = load_events_from_file(&file)?;
            let encoded = process_events(&events, &params, &config.odds)?;
            println!("{}", serde_json::to_string_pretty(&encoded)?);
        }
        Command::Fetch {
            sport_id,
            date,
            save,
        } => {
            let sport = SportId::try_from(sport_id)?;
            let api_key = config
                .api_key
                .clone()
                .context("THERUNDOWN_API_KEY not set in environment or .env file")?;
            let client = TheRundownClient::new(api_key, config.api_url.clone());

            let date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
            let events = client
                .fetch_events(sport, date)
                .await
                .context("Failed to fetch events")?;

            match save {
                Some(path) => {
                    save_events_to_cache(&events, &path)?;
                    println!("Saved {} events to {}", events.len(), path);
                }
                None => println!("{}", serde_json::to_string_pretty(&events)?),
            }
        }
    }

    Ok(())
}
