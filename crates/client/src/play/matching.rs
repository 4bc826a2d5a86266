//! Pair matching on a face-down board.

use anyhow::Result;
use game_core::{BoardPhase, Card, MatchingGame, MatchingInput, MiniGame, SessionOutcome};
use runtime::{SessionHandle, Topic};

use super::{Command, explain, parse_command, wait_for_timer};
use crate::console::Console;

const COLUMNS: usize = 4;

pub async fn play(
    handle: &SessionHandle<MatchingGame>,
    console: &mut Console,
) -> Result<Option<SessionOutcome>> {
    let mut timers = handle.subscribe(Topic::Timer);
    handle.start().await?;

    loop {
        let game = handle.snapshot().await?;
        console.say(board(&game));

        match game.phase() {
            BoardPhase::Mismatched { .. } => {
                console.say("No match.");
                wait_for_timer(&mut timers).await?;
                console.clear();
            }
            BoardPhase::Won => {
                if let Some(outcome) = game.outcome() {
                    console.say(format!("All pairs found! {outcome}"));
                }
                if console.confirm("Play again?").await? {
                    handle.restart().await?;
                    console.clear();
                    continue;
                }
                return Ok(game.outcome());
            }
            BoardPhase::Dealt | BoardPhase::OneRevealed(_) => {
                let label = format!(
                    "Moves {}  pairs {}/{}  pick a card (1-{}):",
                    game.moves(),
                    game.matches(),
                    game.pairs(),
                    game.cards().len()
                );
                let Some(line) = console.prompt(&label).await? else {
                    return Ok(None);
                };
                match parse_command(&line) {
                    Command::Quit => return Ok(None),
                    Command::Restart => {
                        handle.restart().await?;
                        console.clear();
                    }
                    Command::Answer(text) => match parse_pick(text) {
                        Some(position) => {
                            let result = handle.input(MatchingInput::Reveal(position)).await;
                            if let Some(message) = explain(result)? {
                                console.say(message);
                            }
                        }
                        None => console.say("Type a card number."),
                    },
                }
            }
        }
    }
}

/// One-based card number to a board position.
pub fn parse_pick(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok()?.checked_sub(1)
}

fn board(game: &MatchingGame) -> String {
    let width = game
        .alphabet()
        .labels()
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(1)
        .max(2);

    game.cards()
        .chunks(COLUMNS)
        .map(|row| {
            row.iter()
                .map(|card| cell(game, card, width))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn cell(game: &MatchingGame, card: &Card, width: usize) -> String {
    let face = if card.revealed || card.matched {
        game.alphabet().label(card.face).unwrap_or("?").to_owned()
    } else {
        (card.position + 1).to_string()
    };
    let marker = if card.matched { '*' } else { ' ' };
    format!("[{face:^width$}]{marker}")
}
