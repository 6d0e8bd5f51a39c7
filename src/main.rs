mod display;

use anyhow::Result;
use apex_stats::{ApexApiClient, ClientConfig, PlayerQuery, UreqTransport};
use clap::{Args, Parser, Subcommand};
use display::output::*;
use indicatif::ProgressBar;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Apex Stats")]
#[command(about = "Query the Apex Legends status API", long_about = None)]
struct Cli {
    /// API version to request (default: APEX_API_VERSION or 5)
    #[arg(long, global = true)]
    api_version: Option<u32>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "10")]
    timeout: u64,

    /// Print the normalized result as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct PlayerArgs {
    /// Player in-game name
    #[arg(long, conflicts_with = "uid")]
    player: Option<String>,

    /// Player UID
    #[arg(long)]
    uid: Option<String>,

    /// Platform: PC, PS4, X1 or SWITCH
    #[arg(short, long)]
    platform: String,
}

impl PlayerArgs {
    fn query(&self) -> PlayerQuery {
        PlayerQuery {
            player: self.player.clone(),
            uid: self.uid.clone(),
            platform: Some(self.platform.clone()),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a player by name or UID
    Search(PlayerArgs),

    /// Recent news
    News {
        /// Language of the news (default: en-us)
        #[arg(short, long)]
        lang: Option<String>,
    },

    /// Server status per service and region
    Servers,

    /// Match history API (info, get, delete, add)
    History {
        action: String,

        #[arg(long)]
        player: Option<String>,

        #[arg(long)]
        uid: Option<String>,

        #[arg(short, long)]
        platform: Option<String>,

        /// Number of events to fetch with `get`
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Current and next map
    MapRotation,

    /// Find Origin accounts by name
    Origin {
        player: String,

        /// Return every possible hit instead of the first
        #[arg(long)]
        all: bool,
    },

    /// Compare the selected legends of two players
    Compare {
        /// First player name
        first: String,
        /// Second player name
        second: String,
        /// Platform of the first player
        #[arg(short, long)]
        platform: String,
        /// Platform of the second player (default: same as the first)
        #[arg(long)]
        second_platform: Option<String>,
    },

    /// Static game data (deprecated, no longer updated)
    Gamedata { data_type: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(version) = cli.api_version {
        let base_url = config.base_url().to_string();
        config = ClientConfig::with_version(config.api_key(), version)?.with_base_url(base_url)?;
    }
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone())?;
    }
    Ok(config)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let client = ApexApiClient::with_transport(config, UreqTransport::new(Duration::from_secs(cli.timeout)));

    match &cli.command {
        Command::Search(args) => {
            let pb = spinner("Searching player");
            let player = client.search(&args.query());
            pb.finish_and_clear();
            let player = player?;
            if cli.json {
                display_json(&player)?;
            } else {
                display_player(&player);
            }
        }
        Command::News { lang } => {
            let news = client.news(lang.as_deref())?;
            if cli.json {
                display_json(&news)?;
            } else {
                display_news(&news);
            }
        }
        Command::Servers => {
            let pb = spinner("Fetching server status");
            let servers = client.server();
            pb.finish_and_clear();
            let servers = servers?;
            if cli.json {
                display_json(&servers)?;
            } else {
                display_servers(&servers);
            }
        }
        Command::History {
            action,
            player,
            uid,
            platform,
            limit,
        } => {
            let query = (player.is_some() || uid.is_some()).then(|| PlayerQuery {
                player: player.clone(),
                uid: uid.clone(),
                platform: platform.clone(),
            });
            let history = client.history(action, query.as_ref(), *limit)?;
            display_json(&history)?;
        }
        Command::MapRotation => {
            let rotation = client.map_rotation()?;
            if cli.json {
                display_json(&rotation)?;
            } else {
                display_map_rotation(&rotation);
            }
        }
        Command::Origin { player, all } => {
            let lookup = client.origin(player, *all)?;
            if cli.json {
                display_json(&lookup)?;
            } else {
                display_origin(&lookup);
            }
        }
        Command::Compare {
            first,
            second,
            platform,
            second_platform,
        } => {
            let query1 = PlayerQuery::by_name(first.as_str(), platform.as_str());
            let query2 = PlayerQuery::by_name(
                second.as_str(),
                second_platform.as_deref().unwrap_or(platform),
            );

            display_info(&format!("Comparing {} and {}", first, second));
            let pb = spinner("Fetching both players");
            let compared = client.compare(&query1, &query2);
            pb.finish_and_clear();
            let compared = compared?;
            display_success("Both players found");

            if cli.json {
                display_json(&compared)?;
            } else {
                display_comparison(&compared);
            }
        }
        Command::Gamedata { data_type } => {
            #[allow(deprecated)]
            let data = client.gamedata(data_type)?;
            display_json(&data)?;
        }
    }

    Ok(())
}
