use std::time::Duration;

use game_content::{QuestionBankLoader, catalog};
use game_core::{
    Alphabet, BoardPhase, GameKind, MatchingGame, MatchingInput, MatchingRules, OddOneOutGame,
    OddOneOutInput, Outcome, Phase, SequenceGame, SequenceInput, SequenceRules,
};
use runtime::{
    Event, InputEvent, LifecycleEvent, RuntimeError, Session, SessionConfig, TimerEvent, Topic,
};

fn color_session(seed: u64) -> Session<SequenceGame> {
    let game = SequenceGame::with_seed(
        GameKind::ColorSequence,
        SequenceRules::color_sequence(),
        catalog::colors().unwrap(),
        seed,
    )
    .unwrap();
    Session::builder().game(game).build().unwrap()
}

/// Long enough for any chain of timers in these tests to run out.
async fn let_timers_run() {
    tokio::time::sleep(Duration::from_secs(10)).await;
}

#[tokio::test(start_paused = true)]
async fn color_sequence_round_plays_through() {
    let session = color_session(7);
    let handle = session.handle();
    let mut timers = handle.subscribe(Topic::Timer);

    handle.start().await.unwrap();
    let showing = handle.snapshot().await.unwrap();
    assert!(matches!(showing.phase(), Phase::Showing(_)));

    // Input during playback is refused and changes nothing.
    let err = handle
        .input(SequenceInput::Press(showing.sequence()[0]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some("SEQUENCE_NOT_AWAITING_INPUT"));
    assert!(err.is_recoverable());

    let_timers_run().await;
    let waiting = handle.snapshot().await.unwrap();
    assert_eq!(waiting.phase(), Phase::AwaitingInput);
    assert!(waiting.response().is_empty());
    let first = waiting.sequence().to_vec();
    assert_eq!(first.len(), 1);

    // Lead-in, lit and gap for one element.
    let mut scheduled = Vec::new();
    while let Ok(event) = timers.try_recv() {
        if let Event::Timer(TimerEvent::Scheduled { delay_ms, .. }) = event {
            scheduled.push(delay_ms);
        }
    }
    assert_eq!(scheduled, vec![500, 600, 200]);

    handle.input(SequenceInput::Press(first[0])).await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap().phase(), Phase::Success);

    let_timers_run().await;
    let next = handle.snapshot().await.unwrap();
    assert_eq!(next.phase(), Phase::AwaitingInput);
    assert_eq!(next.sequence().len(), 2);
    assert_eq!(next.sequence()[0], first[0]);
    assert_eq!(next.counters().score, 1);

    drop(handle);
    session.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn game_over_is_reported_once() {
    let session = color_session(11);
    let handle = session.handle();
    let mut lifecycle = handle.subscribe(Topic::Lifecycle);

    handle.start().await.unwrap();
    for _ in 0..3 {
        let_timers_run().await;
        let game = handle.snapshot().await.unwrap();
        let wrong = game
            .alphabet()
            .symbols()
            .find(|symbol| *symbol != game.sequence()[0])
            .unwrap();
        handle.input(SequenceInput::Press(wrong)).await.unwrap();
    }

    let game = handle.snapshot().await.unwrap();
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.missed_sequence().len(), 1);

    assert!(matches!(
        lifecycle.recv().await.unwrap(),
        Event::Lifecycle(LifecycleEvent::Started { .. })
    ));
    match lifecycle.recv().await.unwrap() {
        Event::Lifecycle(LifecycleEvent::Finished { outcome }) => {
            assert_eq!(outcome.kind, GameKind::ColorSequence);
            assert!(matches!(
                outcome.result,
                Outcome::Recall {
                    score: 0,
                    completed: false,
                    ..
                }
            ));
        }
        other => panic!("expected Finished, got {:?}", other),
    }
    let_timers_run().await;
    assert!(lifecycle.try_recv().is_err());

    // A terminal session can be started again.
    handle.start().await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap().counters().lives, 3);
}

#[tokio::test(start_paused = true)]
async fn restart_cancels_pending_hide() {
    let game = MatchingGame::with_seed(
        MatchingRules::default(),
        Alphabet::new(["🍎", "🍌", "🍇", "🍊"]).unwrap(),
        3,
    );
    let session = Session::builder().game(game).build().unwrap();
    let handle = session.handle();
    let mut timers = handle.subscribe(Topic::Timer);

    let board = handle.snapshot().await.unwrap();
    let first = board.cards()[0];
    let second = board
        .cards()
        .iter()
        .find(|card| card.face != first.face)
        .unwrap();

    handle
        .input(MatchingInput::Reveal(first.position))
        .await
        .unwrap();
    handle
        .input(MatchingInput::Reveal(second.position))
        .await
        .unwrap();
    assert!(matches!(
        handle.snapshot().await.unwrap().phase(),
        BoardPhase::Mismatched { .. }
    ));

    handle.restart().await.unwrap();
    handle.input(MatchingInput::Reveal(0)).await.unwrap();
    let_timers_run().await;

    let board = handle.snapshot().await.unwrap();
    assert_eq!(board.phase(), BoardPhase::OneRevealed(0));
    assert_eq!(board.moves(), 0);
    assert!(board.cards()[0].revealed);

    let mut fired = 0;
    while let Ok(event) = timers.try_recv() {
        if matches!(event, Event::Timer(TimerEvent::Fired { .. })) {
            fired += 1;
        }
    }
    assert_eq!(fired, 0);
}

#[tokio::test(start_paused = true)]
async fn mismatched_pair_flips_back_after_delay() {
    let game = MatchingGame::with_seed(
        MatchingRules::default(),
        Alphabet::new(["a", "b"]).unwrap(),
        5,
    );
    let session = Session::builder().game(game).build().unwrap();
    let handle = session.handle();

    let board = handle.snapshot().await.unwrap();
    let first = board.cards()[0];
    let second = board.cards().iter().find(|c| c.face != first.face).unwrap();
    handle.input(MatchingInput::Reveal(first.position)).await.unwrap();
    handle.input(MatchingInput::Reveal(second.position)).await.unwrap();

    let third = board
        .cards()
        .iter()
        .find(|c| c.position != first.position && c.position != second.position)
        .unwrap();
    let err = handle
        .input(MatchingInput::Reveal(third.position))
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some("MATCHING_BOARD_BUSY"));

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert!(handle.snapshot().await.unwrap().cards()[first.position].revealed);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let board = handle.snapshot().await.unwrap();
    assert_eq!(board.phase(), BoardPhase::Dealt);
    assert!(!board.cards()[first.position].revealed);
    assert!(!board.cards()[second.position].revealed);
}

#[tokio::test]
async fn odd_one_out_reports_score_out_of_total() {
    let bank = QuestionBankLoader::builtin().unwrap();
    let total = bank.len();
    let session = Session::builder()
        .config(SessionConfig {
            seed: Some(1),
            ..SessionConfig::default()
        })
        .game(OddOneOutGame::new(bank))
        .build()
        .unwrap();
    let handle = session.handle();
    let mut inputs = handle.subscribe(Topic::Input);

    handle.start().await.unwrap();
    for question in 0..total {
        let game = handle.snapshot().await.unwrap();
        let current = game.current().unwrap();
        // Miss the first question on purpose.
        let pick = if question == 0 {
            current.items()[0].clone()
        } else {
            current.odd_item().to_owned()
        };
        handle.input(OddOneOutInput::SelectItem(pick)).await.unwrap();

        let err = handle.input(OddOneOutInput::Select(0)).await.unwrap_err();
        assert!(matches!(err, RuntimeError::Rejected { .. }));

        handle.input(OddOneOutInput::Next).await.unwrap();
    }

    let outcome = handle.outcome().await.unwrap().unwrap();
    assert_eq!(
        outcome.result,
        Outcome::Classification {
            correct: total as u32 - 1,
            total: total as u32,
        }
    );
    assert_eq!(outcome.to_string(), "odd-one-out: 4 out of 5 correct");

    let rejected = std::iter::from_fn(|| inputs.try_recv().ok())
        .filter(|event| matches!(event, Event::Input(InputEvent::Rejected { .. })))
        .count();
    assert_eq!(rejected, total);
}

#[tokio::test]
async fn build_requires_a_game() {
    let result = Session::<OddOneOutGame>::builder().build();
    assert!(matches!(result, Err(RuntimeError::MissingGame)));
}

#[tokio::test]
async fn worker_outlives_dropped_clones() {
    let session = color_session(1);
    let handle = session.handle();
    let clone = handle.clone();
    drop(handle);

    // The remaining clone keeps the worker alive until it is dropped too.
    assert_eq!(clone.snapshot().await.unwrap().phase(), Phase::Idle);
    drop(clone);
    session.shutdown().await.unwrap();
}
