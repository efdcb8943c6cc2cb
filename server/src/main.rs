mod broadcaster;
mod leaderboard_service;
mod server_config;
mod storage;
mod web_server;
mod ws_handler;

use clap::Parser;
use common::{log, logger};

use broadcaster::Broadcaster;
use leaderboard_service::LeaderboardService;
use server_config::ServerConfig;
use storage::LeaderboardStorage;

#[derive(Parser)]
#[command(name = "snake_arcade_server")]
struct Args {
    /// Optional YAML config file; defaults apply without one.
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config = match args.config {
        Some(path) => ServerConfig::from_yaml_file(&path)?,
        None => ServerConfig::default(),
    };

    let storage = LeaderboardStorage::new(&config.storage_path);
    let broadcaster = Broadcaster::new();
    let leaderboard = LeaderboardService::new(storage, broadcaster.clone());

    log!(
        "Snake arcade leaderboard server starting; store at {}",
        config.storage_path
    );

    web_server::run_web_server(config, leaderboard, broadcaster).await;

    Ok(())
}
