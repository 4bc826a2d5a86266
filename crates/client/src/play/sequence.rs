//! Color Sequence, Number Recall and Pattern Memory.

use anyhow::Result;
use game_core::{
    Alphabet, Frame, GameConfig, GameKind, MiniGame, Phase, SequenceGame, SequenceInput,
    SessionOutcome, Symbol,
};
use runtime::{SessionHandle, Topic};

use super::{Command, explain, parse_command, wait_for_timer};
use crate::console::Console;

pub async fn play(
    handle: &SessionHandle<SequenceGame>,
    console: &mut Console,
) -> Result<Option<SessionOutcome>> {
    let mut timers = handle.subscribe(Topic::Timer);
    handle.start().await?;
    let mut shown = None;

    loop {
        let game = handle.snapshot().await?;
        let phase = game.phase();
        if shown != Some(phase) {
            render(&game, console);
            shown = Some(phase);
        }

        match phase {
            Phase::Idle => handle.start().await?,
            Phase::Showing(_) | Phase::Success | Phase::Failure => {
                wait_for_timer(&mut timers).await?
            }
            Phase::AwaitingInput => {
                let Some(line) = console.prompt(">").await? else {
                    return Ok(None);
                };
                match parse_command(&line) {
                    Command::Quit => return Ok(None),
                    Command::Restart => {
                        handle.restart().await?;
                        shown = None;
                    }
                    Command::Answer(text) => answer(handle, &game, text, console).await?,
                }
            }
            Phase::GameOver | Phase::Completed => {
                let outcome = game.outcome();
                if console.confirm("Play again?").await? {
                    handle.restart().await?;
                    shown = None;
                    continue;
                }
                return Ok(outcome);
            }
        }
    }
}

async fn answer(
    handle: &SessionHandle<SequenceGame>,
    game: &SequenceGame,
    text: &str,
    console: &Console,
) -> Result<()> {
    let symbols = match parse_symbols(game.alphabet(), text) {
        Ok(symbols) => symbols,
        Err(message) => {
            console.say(message);
            return Ok(());
        }
    };

    // Number Recall is answered in one go, and an empty answer counts as wrong.
    // The others are checked per press.
    if game.kind() == GameKind::NumberRecall {
        if let Some(message) = explain(handle.input(SequenceInput::Submit(symbols)).await)? {
            console.say(message);
        }
        return Ok(());
    }
    if symbols.is_empty() {
        console.say("Type the sequence you saw.");
        return Ok(());
    }

    for symbol in symbols {
        if let Some(message) = explain(handle.input(SequenceInput::Press(symbol)).await)? {
            console.say(message);
            break;
        }
        if handle.snapshot().await?.phase() != Phase::AwaitingInput {
            break;
        }
    }
    Ok(())
}

/// Resolves typed labels to symbols.
///
/// Tokens are split on whitespace and commas and matched case-insensitively.
/// A token that is not a label is read one character at a time, so digits
/// may be typed joined (`381`).
pub fn parse_symbols(alphabet: &Alphabet, text: &str) -> Result<Vec<Symbol>, String> {
    let mut symbols = Vec::new();
    for token in text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
    {
        if let Some(symbol) = lookup(alphabet, token) {
            symbols.push(symbol);
            continue;
        }
        let spelled: Option<Vec<Symbol>> = token
            .chars()
            .map(|c| lookup(alphabet, c.encode_utf8(&mut [0; 4])))
            .collect();
        match spelled {
            Some(spelled) => symbols.extend(spelled),
            None => {
                return Err(format!(
                    "'{}' is not one of: {}",
                    token,
                    alphabet.labels().join(", ")
                ));
            }
        }
    }
    Ok(symbols)
}

fn lookup(alphabet: &Alphabet, token: &str) -> Option<Symbol> {
    alphabet.symbol_of(token).or_else(|| {
        alphabet
            .labels()
            .iter()
            .position(|label| label.eq_ignore_ascii_case(token))
            .map(|i| Symbol(i as u16))
    })
}

fn labels(alphabet: &Alphabet, symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .filter_map(|symbol| alphabet.label(*symbol))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render(game: &SequenceGame, console: &Console) {
    let counters = game.counters();
    let alphabet = game.alphabet();

    match game.phase() {
        Phase::Idle => {}
        Phase::Showing(Frame::LeadIn) => {
            console.clear();
            console.say(format!(
                "Level {}  lives {}  score {}  - watch closely...",
                counters.level, counters.lives, counters.score
            ));
        }
        Phase::Showing(Frame::Gap(_) | Frame::Holding) => {}
        Phase::Showing(Frame::Countdown(secs)) => {
            console.say(format!("  {}   ({secs})", labels(alphabet, game.visible())));
        }
        Phase::Showing(_) if game.kind() == GameKind::PatternMemory => {
            console.clear();
            console.say(grid(game.visible()));
        }
        Phase::Showing(_) => {
            console.say(format!("  {}", labels(alphabet, game.visible())));
        }
        Phase::AwaitingInput => {
            console.clear();
            console.say(format!(
                "Level {}  lives {}  score {}",
                counters.level, counters.lives, counters.score
            ));
            let hint = match game.kind() {
                GameKind::ColorSequence => format!(
                    "Repeat the {} colors ({}):",
                    game.sequence().len(),
                    alphabet.labels().join(", ")
                ),
                GameKind::NumberRecall => {
                    format!("Type the {}-digit number:", game.sequence().len())
                }
                _ => {
                    console.say(grid(&[]));
                    format!("Type the {} tiles in order:", game.sequence().len())
                }
            };
            console.say(hint);
        }
        Phase::Success => {
            console.say(format!("Correct! Streak {}.", counters.streak));
        }
        Phase::Failure => {
            let position = game.last_miss().map_or(0, |miss| miss + 1);
            console.say(format!(
                "Wrong at position {position}. {} lives left, watch again.",
                counters.lives
            ));
        }
        Phase::GameOver => {
            console.say(format!(
                "Game over. The sequence was: {}",
                labels(alphabet, game.missed_sequence())
            ));
            if let Some(outcome) = game.outcome() {
                console.say(outcome);
            }
        }
        Phase::Completed => {
            console.say("You recalled the longest sequence there is!");
            if let Some(outcome) = game.outcome() {
                console.say(outcome);
            }
        }
    }
}

/// Square grid with lit tiles marked and the rest showing their number.
pub fn grid(lit: &[Symbol]) -> String {
    let side = GameConfig::GRID_SIZE.isqrt();
    let mut rows = Vec::with_capacity(side);
    for row in 0..side {
        let cells: Vec<String> = (0..side)
            .map(|col| {
                let tile = row * side + col;
                if lit.contains(&Symbol(tile as u16)) {
                    " ##".to_owned()
                } else {
                    format!("{tile:>3}")
                }
            })
            .collect();
        rows.push(cells.concat());
    }
    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::SequenceRules;
    use runtime::Session;

    async fn awaiting_input(
        handle: &SessionHandle<SequenceGame>,
        timers: &mut tokio::sync::broadcast::Receiver<runtime::Event>,
    ) -> SequenceGame {
        loop {
            let game = handle.snapshot().await.unwrap();
            if game.phase() == Phase::AwaitingInput {
                return game;
            }
            wait_for_timer(timers).await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn empty_number_recall_answer_is_a_miss() {
        let game = SequenceGame::with_seed(
            GameKind::NumberRecall,
            SequenceRules::number_recall(),
            game_content::digits().unwrap(),
            5,
        )
        .unwrap();
        let session = Session::builder().game(game).build().unwrap();
        let handle = session.handle();
        let mut timers = handle.subscribe(Topic::Timer);
        handle.start().await.unwrap();

        let game = awaiting_input(&handle, &mut timers).await;
        answer(&handle, &game, "", &Console::new()).await.unwrap();

        let after = handle.snapshot().await.unwrap();
        assert_eq!(after.phase(), Phase::GameOver);
        assert_eq!(after.last_miss(), Some(0));
        assert_eq!(after.counters().lives, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_color_answer_sends_nothing() {
        let game = SequenceGame::with_seed(
            GameKind::ColorSequence,
            SequenceRules::color_sequence(),
            game_content::colors().unwrap(),
            5,
        )
        .unwrap();
        let session = Session::builder().game(game).build().unwrap();
        let handle = session.handle();
        let mut timers = handle.subscribe(Topic::Timer);
        handle.start().await.unwrap();

        let game = awaiting_input(&handle, &mut timers).await;
        answer(&handle, &game, "", &Console::new()).await.unwrap();

        let after = handle.snapshot().await.unwrap();
        assert_eq!(after.phase(), Phase::AwaitingInput);
        assert_eq!(after.counters().lives, 3);
    }

    #[test]
    fn colors_resolve_case_insensitively() {
        let colors = game_content::colors().unwrap();
        assert_eq!(
            parse_symbols(&colors, "Red, blue  GREEN").unwrap(),
            vec![Symbol(0), Symbol(1), Symbol(2)]
        );
        assert!(parse_symbols(&colors, "purple").unwrap_err().contains("purple"));
    }

    #[test]
    fn digits_may_be_typed_joined() {
        let digits = game_content::digits().unwrap();
        assert_eq!(
            parse_symbols(&digits, "381").unwrap(),
            vec![Symbol(3), Symbol(8), Symbol(1)]
        );
        assert_eq!(
            parse_symbols(&digits, "3 8 1").unwrap(),
            parse_symbols(&digits, "381").unwrap()
        );
    }

    #[test]
    fn grid_tiles_keep_two_digit_labels() {
        let tiles = game_content::grid().unwrap();
        assert_eq!(
            parse_symbols(&tiles, "12 24 3").unwrap(),
            vec![Symbol(12), Symbol(24), Symbol(3)]
        );
    }

    #[test]
    fn grid_marks_lit_tiles() {
        let rendered = grid(&[Symbol(0), Symbol(24)]);
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[0].starts_with(" ##"));
        assert!(rows[4].ends_with(" ##"));
        assert!(rows[2].contains("12"));
    }
}
