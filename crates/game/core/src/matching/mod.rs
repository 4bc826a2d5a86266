//! Pair-matching engine.
//!
//! Every alphabet symbol is dealt twice, face down. The player reveals two
//! cards per move; equal faces retire the pair, different faces stay up for
//! the hide delay and then flip back together.
mod error;

pub use error::MatchingError;

use arrayvec::ArrayVec;

use crate::config::MatchingRules;
use crate::env::{Alphabet, Dice, PcgRng, RngOracle, Symbol};
use crate::error::ErrorContext;
use crate::game::{GameKind, MiniGame, Outcome, SessionOutcome};
use crate::timer::{Deferred, Fired, RoundToken, Schedule, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub position: usize,
    pub face: Symbol,
    pub revealed: bool,
    /// Once set, `revealed` stays true for the rest of the deal.
    pub matched: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchingInput {
    Reveal(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchingTimer {
    /// Flip a mismatched pair back face down.
    Hide { first: usize, second: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardPhase {
    /// No unresolved card face up.
    Dealt,
    OneRevealed(usize),
    /// Two different faces up, waiting for the hide timer.
    Mismatched { first: usize, second: usize },
    Won,
}

/// Pair-matching state machine. The board is dealt on construction.
#[derive(Clone, Debug)]
pub struct MatchingGame<R = PcgRng> {
    rules: MatchingRules,
    alphabet: Alphabet,
    dice: Dice<R>,
    cards: Vec<Card>,
    pending: ArrayVec<usize, 2>,
    moves: u32,
    matches: u32,
    won: bool,
    timeline: Timeline,
}

impl MatchingGame<PcgRng> {
    pub fn with_seed(rules: MatchingRules, alphabet: Alphabet, seed: u64) -> Self {
        Self::new(rules, alphabet, Dice::pcg(seed, GameKind::Matching.stream()))
    }
}

impl<R: RngOracle> MatchingGame<R> {
    pub fn new(rules: MatchingRules, alphabet: Alphabet, dice: Dice<R>) -> Self {
        let mut game = Self {
            rules,
            alphabet,
            dice,
            cards: Vec::new(),
            pending: ArrayVec::new(),
            moves: 0,
            matches: 0,
            won: false,
            timeline: Timeline::default(),
        };
        game.deal();
        game
    }

    pub fn rules(&self) -> &MatchingRules {
        &self.rules
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn pairs(&self) -> u32 {
        self.alphabet.len() as u32
    }

    pub fn phase(&self) -> BoardPhase {
        if self.won {
            return BoardPhase::Won;
        }
        match self.pending.as_slice() {
            [] => BoardPhase::Dealt,
            [first] => BoardPhase::OneRevealed(*first),
            [first, second, ..] => BoardPhase::Mismatched {
                first: *first,
                second: *second,
            },
        }
    }

    /// Turns one card face up and resolves the move on the second card.
    pub fn reveal(&mut self, position: usize) -> Result<Schedule<MatchingTimer>, MatchingError> {
        self.check_reveal(position)?;

        self.cards[position].revealed = true;
        self.pending.push(position);
        if !self.pending.is_full() {
            return Ok(None);
        }

        self.moves += 1;
        let (first, second) = (self.pending[0], self.pending[1]);
        if self.cards[first].face != self.cards[second].face {
            return Ok(self
                .timeline
                .schedule(self.rules.hide_delay(), MatchingTimer::Hide { first, second }));
        }

        self.cards[first].matched = true;
        self.cards[second].matched = true;
        self.pending.clear();
        self.matches += 1;
        if self.cards.iter().all(|card| card.matched) {
            self.won = true;
            self.timeline.invalidate();
        }
        Ok(None)
    }

    fn check_reveal(&self, position: usize) -> Result<(), MatchingError> {
        let context = ErrorContext::new(self.timeline.token()).with_index(position);
        if self.won {
            return Err(MatchingError::GameFinished { context });
        }
        if self.pending.is_full() {
            return Err(MatchingError::BoardBusy { context });
        }
        let card = self.cards.get(position).ok_or(MatchingError::OutOfBounds {
            position,
            len: self.cards.len(),
            context: context.clone(),
        })?;
        if card.matched {
            return Err(MatchingError::AlreadyMatched { position, context });
        }
        if card.revealed {
            return Err(MatchingError::AlreadyRevealed { position, context });
        }
        Ok(())
    }

    fn deal(&mut self) {
        let mut faces: Vec<Symbol> = self
            .alphabet
            .symbols()
            .flat_map(|symbol| [symbol, symbol])
            .collect();
        self.dice.shuffle(&mut faces);

        self.cards = faces
            .into_iter()
            .enumerate()
            .map(|(position, face)| Card {
                position,
                face,
                revealed: false,
                matched: false,
            })
            .collect();
        self.pending.clear();
        self.moves = 0;
        self.matches = 0;
        self.won = false;
        self.timeline.invalidate();
    }
}

impl<R: RngOracle> MiniGame for MatchingGame<R> {
    type Input = MatchingInput;
    type Timer = MatchingTimer;
    type Error = MatchingError;

    fn kind(&self) -> GameKind {
        GameKind::Matching
    }

    fn round(&self) -> RoundToken {
        self.timeline.token()
    }

    /// The board is playable as soon as it is dealt; a solved board is redealt.
    fn start(&mut self) -> Result<Schedule<MatchingTimer>, MatchingError> {
        if self.won {
            self.deal();
        }
        Ok(None)
    }

    fn handle_input(
        &mut self,
        input: MatchingInput,
    ) -> Result<Schedule<MatchingTimer>, MatchingError> {
        match input {
            MatchingInput::Reveal(position) => self.reveal(position),
        }
    }

    fn fire(&mut self, deferred: Deferred<MatchingTimer>) -> Fired<MatchingTimer> {
        if !self.timeline.is_live(&deferred) {
            return Fired::Stale;
        }
        let MatchingTimer::Hide { first, second } = deferred.timer;
        if self.pending.as_slice() != [first, second] {
            return Fired::Stale;
        }
        self.cards[first].revealed = false;
        self.cards[second].revealed = false;
        self.pending.clear();
        self.timeline.invalidate();
        Fired::Applied(None)
    }

    fn restart(&mut self) -> Schedule<MatchingTimer> {
        self.deal();
        None
    }

    fn outcome(&self) -> Option<SessionOutcome> {
        self.won.then(|| SessionOutcome {
            kind: GameKind::Matching,
            result: Outcome::Matching {
                moves: self.moves,
                pairs: self.matches,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruits() -> Alphabet {
        Alphabet::new(["🍎", "🍌", "🍇", "🍊", "🍓", "🍉", "🍒", "🥝"]).unwrap()
    }

    fn game(seed: u64) -> MatchingGame {
        MatchingGame::with_seed(MatchingRules::default(), fruits(), seed)
    }

    /// Positions of both cards showing `face`.
    fn pair_of(game: &MatchingGame, face: Symbol) -> (usize, usize) {
        let mut positions = game
            .cards()
            .iter()
            .filter(|card| card.face == face)
            .map(|card| card.position);
        (positions.next().unwrap(), positions.next().unwrap())
    }

    /// Two positions whose faces differ and are both still face down.
    fn mismatch(game: &MatchingGame) -> (usize, usize) {
        let hidden: Vec<&Card> = game.cards().iter().filter(|c| !c.matched).collect();
        let first = hidden[0];
        let second = hidden.iter().find(|c| c.face != first.face).unwrap();
        (first.position, second.position)
    }

    fn revealed_unmatched(game: &MatchingGame) -> usize {
        game.cards()
            .iter()
            .filter(|card| card.revealed && !card.matched)
            .count()
    }

    #[test]
    fn every_symbol_is_dealt_twice() {
        for seed in 0..20 {
            let game = game(seed);
            assert_eq!(game.cards().len(), 16);
            for symbol in game.alphabet().symbols() {
                let count = game.cards().iter().filter(|c| c.face == symbol).count();
                assert_eq!(count, 2, "seed {seed}, symbol {symbol}");
            }
            for (i, card) in game.cards().iter().enumerate() {
                assert_eq!(card.position, i);
                assert!(!card.revealed && !card.matched);
            }
        }
    }

    #[test]
    fn matching_pair_retires_immediately() {
        let mut game = game(1);
        let (a, b) = pair_of(&game, Symbol(0));

        assert_eq!(game.reveal(a).unwrap(), None);
        assert_eq!(game.phase(), BoardPhase::OneRevealed(a));
        assert_eq!(game.reveal(b).unwrap(), None);

        assert!(game.cards()[a].matched && game.cards()[b].matched);
        assert!(game.cards()[a].revealed);
        assert_eq!(game.phase(), BoardPhase::Dealt);
        assert_eq!(game.moves(), 1);
        assert_eq!(game.matches(), 1);

        assert!(matches!(
            game.reveal(a),
            Err(MatchingError::AlreadyMatched { position, .. }) if position == a
        ));
    }

    #[test]
    fn third_reveal_is_rejected_until_hide() {
        let mut game = game(2);
        let (a, b) = mismatch(&game);

        game.reveal(a).unwrap();
        let hide = game.reveal(b).unwrap().unwrap();
        assert_eq!(hide.delay.as_millis(), 1000);
        assert_eq!(hide.timer, MatchingTimer::Hide { first: a, second: b });
        assert_eq!(game.moves(), 1);

        let third = (0..16).find(|p| *p != a && *p != b).unwrap();
        let err = game.reveal(third).unwrap_err();
        assert!(matches!(err, MatchingError::BoardBusy { .. }));
        assert!(!game.cards()[third].revealed);
        assert_eq!(revealed_unmatched(&game), 2);

        assert_eq!(game.fire(hide), Fired::Applied(None));
        assert!(!game.cards()[a].revealed && !game.cards()[b].revealed);
        assert_eq!(game.phase(), BoardPhase::Dealt);
        assert!(game.reveal(third).is_ok());
    }

    #[test]
    fn revealing_the_same_card_twice_is_rejected() {
        let mut game = game(3);
        game.reveal(5).unwrap();
        assert!(matches!(
            game.reveal(5),
            Err(MatchingError::AlreadyRevealed { position: 5, .. })
        ));
        assert!(matches!(
            game.reveal(16),
            Err(MatchingError::OutOfBounds { position: 16, len: 16, .. })
        ));
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn win_fires_on_the_last_match_despite_mismatches() {
        let mut game = game(4);

        for _ in 0..3 {
            let (a, b) = mismatch(&game);
            game.reveal(a).unwrap();
            let hide = game.reveal(b).unwrap().unwrap();
            game.fire(hide);
        }
        assert_eq!(game.moves(), 3);

        let symbols: Vec<Symbol> = game.alphabet().symbols().collect();
        for (i, symbol) in symbols.iter().enumerate() {
            assert!(!game.is_finished());
            let (a, b) = pair_of(&game, *symbol);
            game.reveal(a).unwrap();
            game.reveal(b).unwrap();
            assert!(revealed_unmatched(&game) <= 2);
            assert_eq!(game.matches(), i as u32 + 1);
        }

        assert_eq!(game.phase(), BoardPhase::Won);
        assert_eq!(game.matches(), 8);
        assert_eq!(
            game.outcome(),
            Some(SessionOutcome {
                kind: GameKind::Matching,
                result: Outcome::Matching { moves: 11, pairs: 8 },
            })
        );
        assert!(matches!(
            game.reveal(0),
            Err(MatchingError::GameFinished { .. })
        ));
    }

    #[test]
    fn restart_makes_pending_hide_stale() {
        let mut game = game(5);
        let (a, b) = mismatch(&game);
        game.reveal(a).unwrap();
        let hide = game.reveal(b).unwrap().unwrap();

        game.restart();
        assert_eq!(game.moves(), 0);
        assert_eq!(game.matches(), 0);
        assert!(game.cards().iter().all(|c| !c.revealed && !c.matched));

        // Reveal on the new board, then let the old timer arrive.
        game.reveal(a).unwrap();
        assert_eq!(game.fire(hide), Fired::Stale);
        assert!(game.cards()[a].revealed);
        assert_eq!(game.phase(), BoardPhase::OneRevealed(a));
    }

    #[test]
    fn restart_redeals_with_fresh_randomness() {
        let mut game = game(6);
        let first: Vec<Symbol> = game.cards().iter().map(|c| c.face).collect();
        game.restart();
        let second: Vec<Symbol> = game.cards().iter().map(|c| c.face).collect();
        assert_ne!(first, second);

        let same: Vec<Symbol> = self::game(6).cards().iter().map(|c| c.face).collect();
        assert_eq!(first, same);
    }
}
