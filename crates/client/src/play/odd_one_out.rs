//! Odd-one-out quiz.

use anyhow::Result;
use game_core::{MiniGame, OddOneOutGame, OddOneOutInput, QuizPhase, SessionOutcome};
use runtime::SessionHandle;

use super::{Command, explain, parse_command};
use crate::console::Console;

pub async fn play(
    handle: &SessionHandle<OddOneOutGame>,
    console: &mut Console,
) -> Result<Option<SessionOutcome>> {
    handle.start().await?;

    loop {
        let game = handle.snapshot().await?;
        let input = match game.phase() {
            QuizPhase::Idle => {
                handle.start().await?;
                continue;
            }
            QuizPhase::Finished => {
                if let Some(outcome) = game.outcome() {
                    console.say(format!("Quiz over! {outcome}"));
                }
                if console.confirm("Play again?").await? {
                    handle.restart().await?;
                    continue;
                }
                return Ok(game.outcome());
            }
            QuizPhase::Presenting => {
                let Some(question) = game.current() else {
                    continue;
                };
                console.say(format!(
                    "\nQuestion {}/{}: which one does not belong?",
                    game.index() + 1,
                    game.total()
                ));
                for (i, item) in question.items().iter().enumerate() {
                    console.say(format!("  {}) {item}", i + 1));
                }
                let Some(line) = console.prompt(">").await? else {
                    return Ok(None);
                };
                match parse_command(&line) {
                    Command::Answer(text) => pick(text, question.items().len()),
                    Command::Quit => return Ok(None),
                    Command::Restart => {
                        handle.restart().await?;
                        continue;
                    }
                }
            }
            QuizPhase::Resolved => {
                if let Some(feedback) = game.feedback() {
                    if feedback.correct {
                        console.say(format!("Correct! {}", feedback.rationale));
                    } else {
                        console.say(format!(
                            "Wrong! It was {}. {}",
                            feedback.odd, feedback.rationale
                        ));
                    }
                }
                let Some(line) = console.prompt("Press Enter to continue").await? else {
                    return Ok(None);
                };
                match parse_command(&line) {
                    Command::Quit => return Ok(None),
                    Command::Restart => {
                        handle.restart().await?;
                        continue;
                    }
                    Command::Answer(_) => OddOneOutInput::Next,
                }
            }
        };

        if let Some(message) = explain(handle.input(input).await)? {
            console.say(message);
        }
    }
}

/// A number in `1..=len` picks by position, anything else by item.
pub fn pick(text: &str, len: usize) -> OddOneOutInput {
    match text.parse::<usize>() {
        Ok(n) if (1..=len).contains(&n) => OddOneOutInput::Select(n - 1),
        _ => OddOneOutInput::SelectItem(text.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_pick_by_position() {
        assert_eq!(pick("4", 4), OddOneOutInput::Select(3));
        assert_eq!(pick("🚗", 4), OddOneOutInput::SelectItem("🚗".into()));
        assert_eq!(pick("5", 4), OddOneOutInput::SelectItem("5".into()));
    }
}
