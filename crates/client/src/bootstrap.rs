//! Assembles content, engine and session for the selected game.

use anyhow::{Context, Result, anyhow};
use game_core::{GameKind, MatchingGame, OddOneOutGame, SequenceGame, SessionOutcome};
use runtime::{Session, SessionConfig, SessionReport};
use tracing::info;

use crate::config::ClientConfig;
use crate::console::Console;
use crate::play;

pub async fn run(config: ClientConfig) -> Result<()> {
    let factory = config.content_factory();
    let game_config = factory.load_config()?;

    let seed = config.session_config().resolve_seed();
    let session_config = SessionConfig {
        seed: Some(seed),
        ..config.session_config()
    };
    info!("Session seed: {}", seed);

    let mut console = Console::new();
    console.say(format!("{} (type 'quit' to leave, 'restart' to start over)", config.game));

    let outcome = match config.game {
        GameKind::Matching => {
            let cards = factory.load_cards()?;
            let game = MatchingGame::with_seed(game_config.matching, cards, seed);
            let session = Session::builder()
                .config(session_config)
                .game(game)
                .build()?;
            let outcome = play::matching::play(&session.handle(), &mut console).await;
            session.shutdown().await?;
            outcome?
        }
        GameKind::OddOneOut => {
            let bank = factory.load_questions()?;
            let session = Session::builder()
                .config(session_config)
                .game(OddOneOutGame::new(bank))
                .build()?;
            let outcome = play::odd_one_out::play(&session.handle(), &mut console).await;
            session.shutdown().await?;
            outcome?
        }
        kind => {
            let rules = game_config
                .sequence_rules(kind)
                .cloned()
                .ok_or_else(|| anyhow!("{} has no sequence rules", kind))?;
            let alphabet = factory
                .load_alphabet(kind)?
                .ok_or_else(|| anyhow!("{} has no alphabet", kind))?;
            let game = SequenceGame::with_seed(kind, rules, alphabet, seed)
                .with_context(|| format!("Invalid rules for {}", kind))?;
            let session = Session::builder()
                .config(session_config)
                .game(game)
                .build()?;
            let outcome = play::sequence::play(&session.handle(), &mut console).await;
            session.shutdown().await?;
            outcome?
        }
    };

    report(seed, outcome, &console)
}

fn report(seed: u64, outcome: Option<SessionOutcome>, console: &Console) -> Result<()> {
    let Some(outcome) = outcome else {
        info!("Session left before it finished");
        return Ok(());
    };

    console.say(format!("Final result: {outcome}"));
    let report = SessionReport::new(seed, outcome).to_json()?;
    info!(report = %report, "Session finished");
    Ok(())
}
