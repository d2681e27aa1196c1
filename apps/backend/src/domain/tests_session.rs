use crate::domain::fixtures::CardFixtures;
use crate::domain::rules::{PlayerCount, RuleSet};
use crate::domain::session::{GameSession, SeatInfo};
use crate::domain::state::{Phase, PlayerId};
use crate::domain::visibility::VisibilitySet;
use crate::domain::Suit;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

fn seats(n: usize) -> Vec<SeatInfo> {
    (0..n)
        .map(|i| SeatInfo {
            player_id: PlayerId::new(),
            display_name: format!("Player {i}"),
        })
        .collect()
}

fn new_session(n: usize) -> GameSession {
    GameSession::start_seeded(seats(n), RuleSet::default(), 42).unwrap()
}

fn player(session: &GameSession, seat: usize) -> PlayerId {
    session.seats()[seat].player_id
}

fn turn_player(session: &GameSession) -> PlayerId {
    player(session, session.state().turn.unwrap())
}

fn assert_validation(err: DomainError, expected: ValidationKind) {
    match err {
        DomainError::Validation(kind, _) => assert_eq!(kind, expected),
        other => panic!("expected {expected:?}, got {other:?}"),
    }
}

/// Predict the given values in seat order, then choose `trump`.
fn predict_all(session: &mut GameSession, values: &[i32], trump: Suit) {
    for &v in values {
        let p = turn_player(session);
        session.submit_prediction(p, v).unwrap();
    }
    let chooser = turn_player(session);
    session.set_trump(chooser, trump).unwrap();
}

/// Play the first legal card for whoever holds the turn until the game ends.
fn drive_to_end(session: &mut GameSession) -> Vec<u8> {
    let mut completed_rounds = Vec::new();
    while !session.is_over() {
        let p = turn_player(session);
        let snap = session.snapshot_for(p).unwrap();
        match session.phase() {
            Phase::Prediction => {
                let value = snap.legal_predictions.unwrap()[0];
                session.submit_prediction(p, i32::from(value)).unwrap();
            }
            Phase::Trump => {
                session.set_trump(p, Suit::Spades).unwrap();
            }
            Phase::Play => {
                let index = snap.playable_indices.unwrap()[0];
                let outcome = session.play_card(p, index as i32).unwrap();
                completed_rounds.extend(outcome.round_completed);
            }
            Phase::GameEnd => unreachable!(),
        }
    }
    completed_rounds
}

#[test]
fn start_deals_equal_hands_with_four_revealed() {
    for n in 4..=6 {
        let session = new_session(n);
        let state = session.state();
        let hand_size = PlayerCount::new(n).unwrap().hand_size();
        assert_eq!(state.phase, Phase::Prediction);
        assert_eq!(state.round_no, 1);
        assert_eq!(state.turn, Some(0));
        assert_eq!(state.hand_size, hand_size);
        assert!(state.hands.iter().all(|h| h.len() == hand_size as usize));
        assert!(state.visibility.iter().all(|v| v.len() == 4 && v.fits(hand_size as usize)));
        assert!(state.round.predictions.iter().all(Option::is_none));
    }
}

#[test]
fn start_rejects_unsupported_table_sizes() {
    for n in [0, 3, 7] {
        let err = GameSession::start_seeded(seats(n), RuleSet::default(), 1).unwrap_err();
        assert_validation(err, ValidationKind::InvalidPlayerCount);
    }
}

#[test]
fn seeded_sessions_are_reproducible() {
    let table = seats(5);
    let a = GameSession::start_seeded(table.clone(), RuleSet::default(), 9).unwrap();
    let b = GameSession::start_seeded(table, RuleSet::default(), 9).unwrap();
    assert_eq!(a.state(), b.state());
}

#[test]
fn out_of_turn_intents_leave_state_identical() {
    let mut session = new_session(4);
    let before = session.state().clone();
    let p1 = player(&session, 1);

    assert_validation(
        session.submit_prediction(p1, 2).unwrap_err(),
        ValidationKind::OutOfTurn,
    );
    assert_validation(
        session.set_trump(p1, Suit::Hearts).unwrap_err(),
        ValidationKind::InvalidPhase,
    );
    assert_validation(
        session.play_card(p1, 0).unwrap_err(),
        ValidationKind::InvalidPhase,
    );
    assert_eq!(session.state(), &before);
}

#[test]
fn non_chooser_cannot_set_trump() {
    let mut session = new_session(5);
    for v in [1, 2, 6, 0, 0] {
        let p = turn_player(&session);
        session.submit_prediction(p, v).unwrap();
    }
    assert_eq!(session.phase(), Phase::Trump);
    let before = session.state().clone();

    for seat in [0, 1, 3, 4] {
        let p = player(&session, seat);
        assert_validation(
            session.set_trump(p, Suit::Spades).unwrap_err(),
            ValidationKind::OutOfTurn,
        );
    }
    assert_eq!(session.state(), &before);
}

#[test]
fn out_of_turn_play_leaves_state_identical() {
    let mut session = new_session(4);
    predict_all(&mut session, &[0, 0, 0, 0], Suit::Clubs);
    assert_eq!(session.state().turn, Some(0));
    let before = session.state().clone();

    for seat in 1..4 {
        let p = player(&session, seat);
        assert_validation(
            session.play_card(p, 0).unwrap_err(),
            ValidationKind::OutOfTurn,
        );
    }
    assert_eq!(session.state(), &before);
}

#[test]
fn unseated_player_is_not_found() {
    let mut session = new_session(4);
    let err = session.submit_prediction(PlayerId::new(), 1).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));
}

#[test]
fn predictions_advance_turn_in_seat_order() {
    let mut session = new_session(4);
    for seat in 0..3 {
        assert_eq!(session.state().turn, Some(seat));
        let p = player(&session, seat);
        session.submit_prediction(p, 2).unwrap();
    }
    assert_eq!(session.state().turn, Some(3));
    assert_eq!(session.state().round.prediction_total(), 6);
    assert_eq!(session.phase(), Phase::Prediction);
}

#[test]
fn out_of_range_prediction_rejected_without_mutation() {
    let mut session = new_session(4);
    let before = session.state().clone();
    let p0 = player(&session, 0);
    for bad in [-1, 14] {
        assert_validation(
            session.submit_prediction(p0, bad).unwrap_err(),
            ValidationKind::InvalidPrediction,
        );
    }
    assert_eq!(session.state(), &before);
}

#[test]
fn last_predictor_cannot_make_total_equal_hand_size() {
    let mut session = new_session(4);
    for _ in 0..3 {
        let p = turn_player(&session);
        session.submit_prediction(p, 3).unwrap();
    }
    let before = session.state().clone();
    let last = turn_player(&session);

    assert_validation(
        session.submit_prediction(last, 4).unwrap_err(),
        ValidationKind::InvalidPrediction,
    );
    assert_eq!(session.state(), &before);

    session.submit_prediction(last, 5).unwrap();
    assert_eq!(session.phase(), Phase::Trump);
    assert_eq!(session.state().turn, Some(3));
}

#[test]
fn trump_goes_to_earliest_highest_predictor() {
    let mut session = new_session(4);
    for v in [4, 4, 2, 0] {
        let p = turn_player(&session);
        session.submit_prediction(p, v).unwrap();
    }
    assert_eq!(session.phase(), Phase::Trump);
    assert_eq!(session.state().turn, Some(0));
}

#[test]
fn set_trump_reveals_every_hand_and_chooser_leads() {
    let mut session = new_session(5);
    for v in [1, 2, 6, 0, 0] {
        let p = turn_player(&session);
        session.submit_prediction(p, v).unwrap();
    }
    let chooser = turn_player(&session);
    assert_eq!(session.seat_of(chooser), Some(2));
    session.set_trump(chooser, Suit::Diamonds).unwrap();

    let state = session.state();
    assert_eq!(state.phase, Phase::Play);
    assert_eq!(state.round.trump, Some(Suit::Diamonds));
    assert_eq!(state.turn, Some(2));
    for (vis, hand) in state.visibility.iter().zip(&state.hands) {
        assert_eq!(vis, &VisibilitySet::all(hand.len()));
    }
}

#[test]
fn card_index_out_of_range_rejected() {
    let mut session = new_session(4);
    predict_all(&mut session, &[0, 0, 0, 0], Suit::Clubs);
    let before = session.state().clone();
    let p = turn_player(&session);
    for bad in [-1, 13, 99] {
        assert_validation(
            session.play_card(p, bad).unwrap_err(),
            ValidationKind::InvalidCardIndex,
        );
    }
    assert_eq!(session.state(), &before);
}

#[test]
fn completed_trick_goes_to_trump_and_winner_leads() {
    let mut session = new_session(4);
    predict_all(&mut session, &[0, 0, 0, 0], Suit::Hearts);
    assert_eq!(session.state().turn, Some(0));
    {
        let state = session.state_mut();
        state.hands = vec![
            CardFixtures::parse_hardcoded(&["TC", "3D"]),
            CardFixtures::parse_hardcoded(&["2H", "4D"]),
            CardFixtures::parse_hardcoded(&["KC", "5D"]),
            CardFixtures::parse_hardcoded(&["AS", "6D"]),
        ];
        state.visibility = vec![VisibilitySet::all(2); 4];
    }

    for seat in 0..4 {
        let p = player(&session, seat);
        let outcome = session.play_card(p, 0).unwrap();
        if seat < 3 {
            assert_eq!(outcome.trick_winner, None);
            assert_eq!(session.state().round.trick_plays.len(), seat + 1);
            assert_eq!(session.state().turn, Some(seat + 1));
        } else {
            assert_eq!(outcome.trick_winner, Some(1));
        }
    }

    let state = session.state();
    assert!(state.round.trick_plays.is_empty());
    assert_eq!(state.round.trick_lead, None);
    assert_eq!(state.round.sets_won, vec![0, 1, 0, 0]);
    assert_eq!(state.turn, Some(1));
    assert_eq!(state.round.last_trick.as_ref().map(|t| t.winner), Some(1));
    assert!(state.visibility.iter().all(|v| v == &VisibilitySet::all(1)));
}

#[test]
fn playing_shifts_hidden_visibility_indices() {
    let mut session = new_session(4);
    predict_all(&mut session, &[0, 0, 0, 0], Suit::Hearts);
    let p0 = player(&session, 0);
    session.state_mut().visibility[0] = VisibilitySet::from_indices([0, 2, 4]);

    session.play_card(p0, 2).unwrap();
    assert_eq!(
        session.state().visibility[0],
        VisibilitySet::from_indices([0, 3])
    );
    assert_eq!(session.state().hands[0].len(), 12);
}

#[test]
fn follow_suit_enforced_only_when_enabled() {
    let rules = RuleSet {
        must_follow_suit: true,
    };
    let mut session = GameSession::start_seeded(seats(4), rules, 5).unwrap();
    predict_all(&mut session, &[0, 0, 0, 0], Suit::Spades);
    {
        let state = session.state_mut();
        state.hands = vec![
            CardFixtures::parse_hardcoded(&["TC", "3D"]),
            CardFixtures::parse_hardcoded(&["4D", "2C"]),
            CardFixtures::parse_hardcoded(&["KH", "5D"]),
            CardFixtures::parse_hardcoded(&["AS", "6D"]),
        ];
        state.visibility = vec![VisibilitySet::all(2); 4];
    }
    let p0 = player(&session, 0);
    let p1 = player(&session, 1);
    session.play_card(p0, 0).unwrap();

    let before = session.state().clone();
    assert_validation(
        session.play_card(p1, 0).unwrap_err(),
        ValidationKind::MustFollowSuit,
    );
    assert_eq!(session.state(), &before);
    session.play_card(p1, 1).unwrap();

    // void in clubs: anything goes
    let p2 = player(&session, 2);
    session.play_card(p2, 1).unwrap();
}

#[test]
fn free_play_allows_any_card() {
    let mut session = new_session(4);
    predict_all(&mut session, &[0, 0, 0, 0], Suit::Spades);
    {
        let state = session.state_mut();
        state.hands[0] = CardFixtures::parse_hardcoded(&["TC", "3D"]);
        state.hands[1] = CardFixtures::parse_hardcoded(&["4D", "2C"]);
    }
    session.play_card(player(&session, 0), 0).unwrap();
    session.play_card(player(&session, 1), 0).unwrap();
}

#[test]
fn round_end_scores_and_redeals() {
    let mut session = new_session(4);
    predict_all(&mut session, &[1, 0, 0, 0], Suit::Hearts);
    {
        let state = session.state_mut();
        state.hands = vec![
            CardFixtures::parse_hardcoded(&["AH"]),
            CardFixtures::parse_hardcoded(&["2C"]),
            CardFixtures::parse_hardcoded(&["3C"]),
            CardFixtures::parse_hardcoded(&["4C"]),
        ];
        state.visibility = vec![VisibilitySet::all(1); 4];
    }

    let mut last = None;
    for seat in 0..4 {
        last = Some(session.play_card(player(&session, seat), 0).unwrap());
    }
    let outcome = last.unwrap();
    assert_eq!(outcome.trick_winner, Some(0));
    assert_eq!(outcome.round_completed, Some(1));
    assert!(!outcome.game_over);

    let state = session.state();
    // seat 0 predicted 1 and won 1; the rest predicted 0 and won 0
    assert_eq!(state.scores_total, vec![11, 10, 10, 10]);
    assert_eq!(state.round_no, 2);
    assert_eq!(state.phase, Phase::Prediction);
    assert_eq!(state.turn, Some(0));
    assert_eq!(state.round.trump, None);
    assert!(state.round.predictions.iter().all(Option::is_none));
    assert!(state.round.sets_won.iter().all(|&w| w == 0));
    assert!(state.hands.iter().all(|h| h.len() == 13));
    assert!(state.visibility.iter().all(|v| v.len() == 4));
    let prev = state.previous_round.as_ref().unwrap();
    assert_eq!(prev.round_no, 1);
    assert_eq!(prev.points, vec![11, 10, 10, 10]);
}

#[test]
fn game_ends_after_one_round_per_player() {
    for n in 4..=6 {
        let mut session = GameSession::start_seeded(seats(n), RuleSet::default(), n as u64).unwrap();
        let rounds = drive_to_end(&mut session);
        assert_eq!(rounds, (1..=n as u8).collect::<Vec<_>>());
        assert_eq!(session.phase(), Phase::GameEnd);
        assert_eq!(session.state().turn, None);
    }
}

#[test]
fn every_action_rejected_after_game_end() {
    let mut session = new_session(4);
    drive_to_end(&mut session);
    let before = session.state().clone();

    for seat in 0..4 {
        let p = player(&session, seat);
        assert_validation(
            session.submit_prediction(p, 0).unwrap_err(),
            ValidationKind::InvalidPhase,
        );
        assert_validation(
            session.set_trump(p, Suit::Clubs).unwrap_err(),
            ValidationKind::InvalidPhase,
        );
        assert_validation(
            session.play_card(p, 0).unwrap_err(),
            ValidationKind::InvalidPhase,
        );
    }
    assert_eq!(session.state(), &before);
}
