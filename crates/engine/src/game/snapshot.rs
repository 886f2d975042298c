// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table state views for presentation layers.
use serde::Serialize;

use super::{Game, Stage};
use crate::poker::{Card, Chips, PlayerCards, PlayerId};

/// A seat as seen from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatSnapshot {
    /// The player id.
    pub player_id: PlayerId,
    /// The player nickname.
    pub nickname: String,
    /// The player stack.
    pub chips: Chips,
    /// The player bet in this betting round.
    pub bet: Chips,
    /// The player folded or sits out.
    pub is_folded: bool,
    /// The player is all in.
    pub is_all_in: bool,
    /// The player has the button.
    pub has_button: bool,
    /// The player cards.
    pub cards: PlayerCards,
}

/// The table state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// The hand stage.
    pub stage: Stage,
    /// The hand number.
    pub hand_number: u64,
    /// The chips in the pot.
    pub pot: Chips,
    /// The round bet to match.
    pub bet_to_match: Chips,
    /// The board cards.
    pub board: Vec<Card>,
    /// The player who has to act.
    pub actor: Option<PlayerId>,
    /// The seats in seating order.
    pub seats: Vec<SeatSnapshot>,
}

impl GameSnapshot {
    /// The snapshot for the given player.
    pub fn seat(&self, player_id: PlayerId) -> Option<&SeatSnapshot> {
        self.seats.iter().find(|s| s.player_id == player_id)
    }
}

pub(super) fn build(game: &Game, viewer: Option<PlayerId>) -> GameSnapshot {
    let seats = game
        .seats
        .iter()
        .enumerate()
        .map(|(idx, seat)| {
            let cards = match seat.hole_cards {
                None => PlayerCards::None,
                Some([c1, c2]) => {
                    let at_showdown = game.stage == Stage::Showdown && !seat.is_folded;
                    if at_showdown || viewer == Some(seat.player_id) {
                        PlayerCards::Cards(c1, c2)
                    } else {
                        PlayerCards::Covered
                    }
                }
            };

            SeatSnapshot {
                player_id: seat.player_id,
                nickname: seat.nickname.clone(),
                chips: seat.chips,
                bet: seat.bet,
                is_folded: seat.is_folded,
                is_all_in: seat.is_all_in,
                has_button: game.hand_number > 0 && idx == game.dealer,
                cards,
            }
        })
        .collect();

    GameSnapshot {
        stage: game.stage,
        hand_number: game.hand_number,
        pot: game.pot,
        bet_to_match: game.bet_to_match,
        board: game.board.clone(),
        actor: game.current_actor().map(|s| s.player_id),
        seats,
    }
}
