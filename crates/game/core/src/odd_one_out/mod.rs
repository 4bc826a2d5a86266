//! Classification engine ("Odd One Out").
//!
//! Walks a fixed question bank in order. The first selection on a question
//! locks the answer; the rationale is revealed whether it was right or not.
mod error;

pub use error::OddOneOutError;

use core::convert::Infallible;

use crate::env::{Question, QuestionBank};
use crate::error::ErrorContext;
use crate::game::{GameKind, MiniGame, Outcome, SessionOutcome};
use crate::timer::{Deferred, Fired, RoundToken, Schedule, Timeline};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OddOneOutInput {
    /// Pick the item at this index of the current question.
    Select(usize),
    /// Pick an item by its label.
    SelectItem(String),
    /// Move on from a resolved question.
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuizPhase {
    Idle,
    Presenting,
    Resolved,
    Finished,
}

impl QuizPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Presenting => "presenting",
            Self::Resolved => "resolved",
            Self::Finished => "finished",
        }
    }
}

/// What the player sees after answering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feedback<'a> {
    pub selected: &'a str,
    pub odd: &'a str,
    pub correct: bool,
    pub rationale: &'a str,
}

#[derive(Clone, Debug)]
pub struct OddOneOutGame {
    bank: QuestionBank,
    index: usize,
    score: u32,
    selection: Option<usize>,
    phase: QuizPhase,
    timeline: Timeline,
}

impl OddOneOutGame {
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            index: 0,
            score: 0,
            selection: None,
            phase: QuizPhase::Idle,
            timeline: Timeline::default(),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Zero-based index of the question on screen.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> u32 {
        self.bank.len() as u32
    }

    pub fn current(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Presenting | QuizPhase::Resolved => self.bank.get(self.index),
            QuizPhase::Idle | QuizPhase::Finished => None,
        }
    }

    pub fn feedback(&self) -> Option<Feedback<'_>> {
        if self.phase != QuizPhase::Resolved {
            return None;
        }
        let question = self.bank.get(self.index)?;
        let selected = self.selection?;
        Some(Feedback {
            selected: &question.items()[selected],
            odd: question.odd_item(),
            correct: selected == question.odd_index(),
            rationale: question.rationale(),
        })
    }

    /// Locks in the answer for the current question.
    pub fn select(&mut self, index: usize) -> Result<bool, OddOneOutError> {
        let question = self.presented()?;
        let len = question.items().len();
        if index >= len {
            return Err(OddOneOutError::ItemOutOfRange {
                index,
                len,
                context: self.context().with_index(index),
            });
        }

        let correct = index == question.odd_index();
        if correct {
            self.score += 1;
        }
        self.selection = Some(index);
        self.phase = QuizPhase::Resolved;
        Ok(correct)
    }

    pub fn select_item(&mut self, item: &str) -> Result<bool, OddOneOutError> {
        let index = self
            .presented()?
            .position_of(item)
            .ok_or_else(|| OddOneOutError::UnknownItem {
                item: item.to_owned(),
                context: self.context(),
            })?;
        self.select(index)
    }

    /// Advances past a resolved question, finishing after the last one.
    pub fn next(&mut self) -> Result<(), OddOneOutError> {
        if self.phase != QuizPhase::Resolved {
            return Err(OddOneOutError::NotResolved {
                context: self.context(),
            });
        }
        self.selection = None;
        self.index += 1;
        self.phase = if self.index < self.bank.len() {
            QuizPhase::Presenting
        } else {
            QuizPhase::Finished
        };
        Ok(())
    }

    fn presented(&self) -> Result<&Question, OddOneOutError> {
        let not_presenting = || OddOneOutError::NotPresenting {
            phase: self.phase.as_str(),
            context: self.context(),
        };
        if self.phase != QuizPhase::Presenting {
            return Err(not_presenting());
        }
        self.bank.get(self.index).ok_or_else(not_presenting)
    }

    fn context(&self) -> ErrorContext {
        ErrorContext::new(self.timeline.token()).with_index(self.index)
    }

    fn begin_session(&mut self) {
        self.index = 0;
        self.score = 0;
        self.selection = None;
        self.phase = QuizPhase::Presenting;
        self.timeline.invalidate();
    }
}

impl MiniGame for OddOneOutGame {
    type Input = OddOneOutInput;
    type Timer = Infallible;
    type Error = OddOneOutError;

    fn kind(&self) -> GameKind {
        GameKind::OddOneOut
    }

    fn round(&self) -> RoundToken {
        self.timeline.token()
    }

    fn start(&mut self) -> Result<Schedule<Infallible>, OddOneOutError> {
        match self.phase {
            QuizPhase::Idle | QuizPhase::Finished => {
                self.begin_session();
                Ok(None)
            }
            phase => Err(OddOneOutError::SessionActive {
                phase: phase.as_str(),
                context: self.context(),
            }),
        }
    }

    fn handle_input(
        &mut self,
        input: OddOneOutInput,
    ) -> Result<Schedule<Infallible>, OddOneOutError> {
        match input {
            OddOneOutInput::Select(index) => {
                self.select(index)?;
            }
            OddOneOutInput::SelectItem(item) => {
                self.select_item(&item)?;
            }
            OddOneOutInput::Next => self.next()?,
        }
        Ok(None)
    }

    fn fire(&mut self, deferred: Deferred<Infallible>) -> Fired<Infallible> {
        match deferred.timer {}
    }

    fn restart(&mut self) -> Schedule<Infallible> {
        self.begin_session();
        None
    }

    fn outcome(&self) -> Option<SessionOutcome> {
        (self.phase == QuizPhase::Finished).then(|| SessionOutcome {
            kind: GameKind::OddOneOut,
            result: Outcome::Classification {
                correct: self.score,
                total: self.total(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            Question::new(
                1,
                ["🍎", "🍌", "🍇", "🚗"],
                "🚗",
                "Car is a vehicle, others are fruits.",
            )
            .unwrap(),
            Question::new(
                2,
                ["🐶", "🐱", "🐰", "🌲"],
                "🌲",
                "Tree is a plant, others are animals.",
            )
            .unwrap(),
        ])
        .unwrap()
    }

    fn started() -> OddOneOutGame {
        let mut game = OddOneOutGame::new(bank());
        game.start().unwrap();
        game
    }

    #[test]
    fn odd_item_scores_exactly_one() {
        let mut game = started();
        assert!(game.select_item("🚗").unwrap());
        assert_eq!(game.score(), 1);
        let right = game.feedback().unwrap();
        assert!(right.correct);
        let right_rationale = right.rationale.to_owned();

        let mut game = started();
        assert!(!game.select_item("🍌").unwrap());
        assert_eq!(game.score(), 0);
        let wrong = game.feedback().unwrap();
        assert!(!wrong.correct);
        assert_eq!(wrong.selected, "🍌");
        assert_eq!(wrong.odd, "🚗");
        assert_eq!(wrong.rationale, right_rationale);
    }

    #[test]
    fn first_selection_locks_the_answer() {
        let mut game = started();
        game.select(0).unwrap();
        let err = game.select(3).unwrap_err();
        assert!(matches!(err, OddOneOutError::NotPresenting { phase: "resolved", .. }));
        assert_eq!(game.score(), 0);
        assert_eq!(game.feedback().unwrap().selected, "🍎");
    }

    #[test]
    fn invalid_selections_change_nothing() {
        let mut game = started();
        assert!(matches!(
            game.select(4),
            Err(OddOneOutError::ItemOutOfRange { index: 4, len: 4, .. })
        ));
        assert!(matches!(
            game.select_item("🚲"),
            Err(OddOneOutError::UnknownItem { .. })
        ));
        assert!(matches!(game.next(), Err(OddOneOutError::NotResolved { .. })));
        assert_eq!(game.phase(), QuizPhase::Presenting);
    }

    #[test]
    fn finishes_with_score_out_of_total() {
        let mut game = started();
        game.handle_input(OddOneOutInput::SelectItem("🚗".into()))
            .unwrap();
        game.handle_input(OddOneOutInput::Next).unwrap();
        assert_eq!(game.current().unwrap().odd_item(), "🌲");
        assert!(game.outcome().is_none());

        game.handle_input(OddOneOutInput::Select(0)).unwrap();
        game.handle_input(OddOneOutInput::Next).unwrap();

        assert_eq!(game.phase(), QuizPhase::Finished);
        assert!(game.current().is_none());
        let outcome = game.outcome().unwrap();
        assert_eq!(
            outcome.result,
            Outcome::Classification {
                correct: 1,
                total: 2
            }
        );
        assert_eq!(outcome.to_string(), "odd-one-out: 1 out of 2 correct");
    }

    #[test]
    fn selection_before_start_is_rejected() {
        let mut game = OddOneOutGame::new(bank());
        assert!(matches!(
            game.select(0),
            Err(OddOneOutError::NotPresenting { phase: "idle", .. })
        ));
    }

    #[test]
    fn restart_resets_score_and_index() {
        let mut game = started();
        game.select_item("🚗").unwrap();
        game.next().unwrap();
        let round = game.round();

        game.restart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.index(), 0);
        assert_eq!(game.phase(), QuizPhase::Presenting);
        assert!(game.round() > round);
        assert!(matches!(
            game.start(),
            Err(OddOneOutError::SessionActive { .. })
        ));
    }
}
