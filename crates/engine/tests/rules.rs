// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Rejected operations and table invariants.
use ahash::AHashSet;
use rand::{Rng, SeedableRng, rngs::StdRng};

use holdem_engine::{
    Action, Card, Chips, EngineError, Game, PlayerId, Stage, TableConfig,
};

fn new_game(players: u64) -> Game {
    let rng = StdRng::seed_from_u64(17);
    let mut game = Game::with_rng(TableConfig::default(), rng).unwrap();
    for id in 1..=players {
        game.add_seat(PlayerId::new(id), &format!("Player {id}"), Chips::new(1_000))
            .unwrap();
    }
    game
}

fn pid(id: u64) -> PlayerId {
    PlayerId::new(id)
}

// Snapshot with all the cards so that a change to any of them is detected.
fn hole_cards(game: &Game) -> Vec<Option<[Card; 2]>> {
    game.seats().iter().map(|s| s.hole_cards).collect()
}

#[test]
fn not_your_turn() {
    let mut game = new_game(3);
    game.start_hand().unwrap();

    let before = game.snapshot();
    let cards = hole_cards(&game);

    assert_eq!(
        game.apply_action(pid(2), Action::Call),
        Err(EngineError::NotYourTurn(pid(2)))
    );
    assert_eq!(
        game.apply_action(pid(9), Action::Fold),
        Err(EngineError::NotYourTurn(pid(9)))
    );

    assert_eq!(game.snapshot(), before);
    assert_eq!(hole_cards(&game), cards);
}

#[test]
fn illegal_check() {
    let mut game = new_game(3);
    game.start_hand().unwrap();
    let before = game.snapshot();

    assert_eq!(
        game.apply_action(pid(1), Action::Check),
        Err(EngineError::IllegalCheck(Chips::new(20)))
    );
    assert_eq!(game.snapshot(), before);

    // Call then fold the small blind, the remaining bets are matched.
    game.apply_action(pid(1), Action::Call).unwrap();
    game.apply_action(pid(2), Action::Fold).unwrap();
    assert_eq!(game.stage(), Stage::Flop);
}

#[test]
fn raise_too_small() {
    let mut game = new_game(3);
    game.start_hand().unwrap();
    let before = game.snapshot();

    assert_eq!(
        game.apply_action(pid(1), Action::Raise(Chips::new(30))),
        Err(EngineError::RaiseTooSmall {
            amount: Chips::new(30),
            min: Chips::new(40),
        })
    );
    assert_eq!(game.snapshot(), before);

    // Double the bet is a legal raise.
    game.apply_action(pid(1), Action::Raise(Chips::new(40))).unwrap();
    assert_eq!(game.bet_to_match(), Chips::new(40));
    assert_eq!(game.pot(), Chips::new(70));

    assert!(matches!(
        game.apply_action(pid(2), Action::Raise(Chips::new(79))),
        Err(EngineError::RaiseTooSmall { .. })
    ));
}

#[test]
fn raise_below_big_blind_on_new_street() {
    let mut game = new_game(3);
    game.start_hand().unwrap();
    game.apply_action(pid(1), Action::Call).unwrap();
    game.apply_action(pid(2), Action::Call).unwrap();
    assert_eq!(game.stage(), Stage::Flop);

    let req = game.legal_actions().unwrap();
    assert_eq!(req.player_id, pid(2));
    assert_eq!(req.min_raise, Chips::ZERO);

    // With nothing to match any raise is legal, also below the big blind.
    game.apply_action(pid(2), Action::Raise(Chips::new(10))).unwrap();
    assert_eq!(game.bet_to_match(), Chips::new(10));
    assert_eq!(game.pot(), Chips::new(70));

    let req = game.legal_actions().unwrap();
    assert_eq!(req.player_id, pid(3));
    assert_eq!(req.to_call, Chips::new(10));
    assert_eq!(req.min_raise, Chips::new(20));
}

#[test]
fn raise_over_stack_goes_all_in() {
    let mut game = new_game(2);
    game.start_hand().unwrap();

    game.apply_action(pid(2), Action::Raise(Chips::new(5_000))).unwrap();

    let seat = game.seat(pid(2)).unwrap();
    assert!(seat.is_all_in);
    assert_eq!(seat.bet, Chips::new(1_000));
    assert_eq!(game.bet_to_match(), Chips::new(1_000));
}

#[test]
fn seating_errors() {
    let config = TableConfig {
        max_seats: 2,
        ..TableConfig::default()
    };
    let mut game = Game::with_rng(config, StdRng::seed_from_u64(1)).unwrap();

    game.add_seat(pid(1), "Alice", Chips::new(100)).unwrap();
    assert_eq!(
        game.add_seat(pid(1), "Alice", Chips::new(100)),
        Err(EngineError::AlreadySeated(pid(1)))
    );

    game.add_seat(pid(2), "Bob", Chips::new(100)).unwrap();
    assert_eq!(
        game.add_seat(pid(3), "Carol", Chips::new(100)),
        Err(EngineError::TableFull(2))
    );
    assert_eq!(game.seats().len(), 2);

    assert_eq!(
        game.remove_seat(pid(3)),
        Err(EngineError::SeatNotFound(pid(3)))
    );

    // Outside a hand the seat is released with the stack.
    assert_eq!(game.remove_seat(pid(2)), Ok(Chips::new(100)));
    game.add_seat(pid(3), "Carol", Chips::new(100)).unwrap();
}

#[test]
fn table_chips_fit_in_chips() {
    let mut game = Game::with_rng(TableConfig::default(), StdRng::seed_from_u64(5)).unwrap();
    game.add_seat(pid(1), "Alice", Chips::new(3_000_000_000))
        .unwrap();

    assert_eq!(
        game.add_seat(pid(2), "Bob", Chips::new(3_000_000_000)),
        Err(EngineError::ChipsOverflow(Chips::new(3_000_000_000)))
    );
    assert_eq!(game.seats().len(), 1);

    // Up to the largest amount every chip is accounted for.
    let chips = Chips::new(u32::MAX - 3_000_000_000);
    game.add_seat(pid(2), "Bob", chips).unwrap();
    assert_eq!(
        game.add_seat(pid(3), "Carol", Chips::new(1)),
        Err(EngineError::ChipsOverflow(Chips::new(1)))
    );

    game.start_hand().unwrap();
    game.apply_action(pid(2), Action::AllIn).unwrap();
    game.apply_action(pid(1), Action::Call).unwrap();
    assert_eq!(game.stage(), Stage::Showdown);

    let showdown = game.showdown().unwrap();
    assert_eq!(showdown.pot, chips * 2);
    let paid = showdown.winners.iter().map(|w| w.chips).sum::<Chips>();
    assert_eq!(paid, showdown.pot);

    let stacks = game.seats().iter().map(|s| s.chips).sum::<Chips>();
    assert_eq!(stacks, Chips::new(u32::MAX));
}

#[test]
fn not_enough_players() {
    let mut game = new_game(1);
    assert_eq!(game.start_hand(), Err(EngineError::NotEnoughPlayers(2)));
    assert_eq!(game.stage(), Stage::Waiting);

    // A player with no chips doesn't count.
    game.add_seat(pid(2), "Bob", Chips::ZERO).unwrap();
    assert_eq!(game.start_hand(), Err(EngineError::NotEnoughPlayers(2)));

    game.add_seat(pid(3), "Carol", Chips::new(100)).unwrap();
    game.start_hand().unwrap();
    assert_eq!(game.seats().iter().filter(|s| s.hole_cards.is_some()).count(), 2);
}

#[test]
fn hand_in_progress() {
    let mut game = new_game(2);
    game.start_hand().unwrap();
    let before = game.snapshot();
    let cards = hole_cards(&game);

    assert_eq!(game.start_hand(), Err(EngineError::HandInProgress));
    assert_eq!(game.snapshot(), before);
    assert_eq!(hole_cards(&game), cards);
}

#[test]
fn action_after_hand_ended() {
    let mut game = new_game(2);
    assert_eq!(
        game.apply_action(pid(1), Action::Check),
        Err(EngineError::ActionAfterHandEnded)
    );

    game.start_hand().unwrap();
    game.apply_action(pid(2), Action::Fold).unwrap();
    assert_eq!(game.stage(), Stage::Showdown);

    let before = game.snapshot();
    assert_eq!(
        game.apply_action(pid(1), Action::Check),
        Err(EngineError::ActionAfterHandEnded)
    );
    assert_eq!(game.snapshot(), before);
}

#[test]
fn fresh_deck_every_hand() {
    let mut game = new_game(4);
    let mut boards = AHashSet::default();

    for _ in 0..10 {
        game.start_hand().unwrap();

        // Check down every street.
        while let Some(req) = game.legal_actions() {
            let action = if req.can_check() {
                Action::Check
            } else {
                Action::Call
            };
            game.apply_action(req.player_id, action).unwrap();
        }

        assert_eq!(game.stage(), Stage::Showdown);
        assert_eq!(game.board().len(), 5);

        let mut cards = hole_cards(&game)
            .into_iter()
            .flatten()
            .flatten()
            .chain(game.board().iter().copied())
            .collect::<Vec<_>>();
        let count = cards.len();
        cards.sort();
        cards.dedup();
        assert_eq!(cards.len(), count, "duplicate card dealt");

        boards.insert(game.board().to_vec());
    }

    assert!(boards.len() > 1);
}

#[test]
fn chips_are_conserved() {
    let mut rng = StdRng::seed_from_u64(29);
    let mut game = Game::with_rng(TableConfig::default(), StdRng::seed_from_u64(31)).unwrap();
    for id in 1..=6 {
        game.add_seat(pid(id), &format!("Player {id}"), Chips::new(500))
            .unwrap();
    }

    let total = Chips::new(3_000);
    let with_chips = |game: &Game| game.seats().iter().filter(|s| s.chips > Chips::ZERO).count();

    for _ in 0..200 {
        if with_chips(&game) < 2 {
            break;
        }

        game.start_hand().unwrap();

        while let Some(req) = game.legal_actions() {
            let action = match rng.random_range(0..10) {
                0 => Action::Fold,
                1 => Action::AllIn,
                2..=3 if req.can_raise() => {
                    let min = req.min_raise.amount();
                    let max = req.max_raise.amount();
                    Action::Raise(Chips::new(rng.random_range(min..=max)))
                }
                _ if req.can_check() => Action::Check,
                _ => Action::Call,
            };

            game.apply_action(req.player_id, action).unwrap();

            let stacks = game.seats().iter().map(|s| s.chips).sum::<Chips>();
            assert_eq!(stacks + game.pot(), total);
            assert_eq!(game.board().len(), game.stage().board_cards());

            if game.is_hand_running() {
                let contributed = game.seats().iter().map(|s| s.contributed).sum::<Chips>();
                assert_eq!(contributed, game.pot());
            }
        }

        assert_eq!(game.stage(), Stage::Showdown);
        assert_eq!(game.pot(), Chips::ZERO);

        let showdown = game.showdown().unwrap();
        let paid = showdown.winners.iter().map(|w| w.chips).sum::<Chips>();
        assert_eq!(paid, showdown.pot);
    }
}
