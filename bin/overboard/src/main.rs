//! # Overboard Seed
//!
//! Builds a board from configuration and replays the reference Q&A
//! exchange, logging every reputation change along the way.

use anyhow::Context;
use ob_configs::{LoggingSettings, Settings};
use ob_core::Board;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading configuration")?;
    init_tracing(&settings.logging);

    let mut board = Board::new(settings.board.name.clone());

    // 1. Members
    let safet = board.create_user("Safet")?;
    let leila = board.create_user("Leila")?;

    // 2. Content
    let question = board.ask_question(safet, "What's up? ")?;
    let answer = board.answer_question(leila, question, "Nothing.")?;

    // 3. Reputation
    board.up_vote(leila, question)?;
    board.up_vote(safet, answer)?;
    board.accept_answer(safet, answer)?;

    if let Err(err) = board.up_vote(safet, question) {
        tracing::info!(%err, "self vote refused as expected");
    }

    for user in board.users() {
        tracing::info!(
            board = %board.name(),
            user = %user.name(),
            reputation = user.reputation(),
            "final reputation"
        );
    }
    tracing::debug!(
        snapshot = %serde_json::to_string(&board).context("serializing board")?,
        "board state"
    );

    Ok(())
}

fn init_tracing(logging: &LoggingSettings) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::new(filter_directives(rust_log, &logging.level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

/// `RUST_LOG` wins over the configured level when set and non-blank.
fn filter_directives(rust_log: Option<String>, configured: &str) -> String {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| configured.to_string())
}
