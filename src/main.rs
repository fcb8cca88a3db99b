//! Console driver for Say Anything
//!
//! Reads chat events from stdin, one per line, and prints everything the
//! game says to stdout. Stands in for a chat platform when play-testing.
//!
//! ```text
//! #general alice: !startgame @alice @bob @carol
//! #general alice: !question favorite food
//! dm bob: pizza
//! dm carol: tacos
//! dm alice: 1
//! react bob #general p1 2
//! ```

use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use say_anything::adapters::{
    parse_console_line, ConsoleChatGateway, ConsoleInput, EventLogger, InMemoryEventBus,
    RngShuffler,
};
use say_anything::application::{GameDispatcher, GamePorts, SessionSettings};
use say_anything::config::{AppConfig, ConfigError, LoggingConfig};
use say_anything::ports::EventSubscriber;

const GAME_EVENTS: &[&str] = &[
    "game.started.v1",
    "game.players_joined.v1",
    "game.round_started.v1",
    "game.answer_chosen.v1",
    "game.round_completed.v1",
    "game.ended.v1",
];

#[derive(Debug, Error)]
enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Reading stdin failed: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.log_level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), DriverError> {
    let config = AppConfig::load_validated()?;
    init_tracing(&config.logging);

    info!(
        prefix = %config.game.command_prefix,
        seeded = config.game.shuffle_seed.is_some(),
        "Starting Say Anything console driver"
    );

    // === Dependency Injection ===
    let bus = Arc::new(InMemoryEventBus::new());
    bus.subscribe_all(GAME_EVENTS, Arc::new(EventLogger::new()));

    let ports = GamePorts::new(
        Arc::new(ConsoleChatGateway::new()),
        Arc::new(RngShuffler::from_seed_option(config.game.shuffle_seed)),
        bus,
    );
    let settings = SessionSettings {
        command_prefix: config.game.command_prefix.clone(),
        rules: config.game.rules(),
    };
    let dispatcher = GameDispatcher::new(settings, ports);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_console_line(&line) {
            Ok(Some(input)) => input,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = %line, error = %e, "could not parse input");
                continue;
            }
        };

        let result = match &input {
            ConsoleInput::Channel(message) => dispatcher.handle_channel_message(message).await,
            ConsoleInput::Private(message) => dispatcher.handle_private_message(message).await,
            ConsoleInput::Reaction(reaction) => dispatcher.handle_reaction(reaction).await,
        };
        if let Err(e) = result {
            warn!(code = %e.code(), error = %e, "failed to handle input");
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}
