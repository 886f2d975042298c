// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table seat types.
use crate::poker::{Card, Chips, PlayerId};

/// A player seated at a table.
#[derive(Debug, Clone)]
pub struct Seat {
    /// The player id.
    pub player_id: PlayerId,
    /// This player nickname.
    pub nickname: String,
    /// This player chips.
    pub chips: Chips,
    /// The player bet in the current betting round.
    pub bet: Chips,
    /// The chips this player moved to the pot in this hand.
    pub contributed: Chips,
    /// This player private cards.
    pub hole_cards: Option<[Card; 2]>,
    /// The player folded or is not playing this hand.
    pub is_folded: bool,
    /// The player has no chips left to bet in this hand.
    pub is_all_in: bool,
    /// The player left the table during the hand.
    pub(crate) is_leaving: bool,
}

impl Seat {
    /// Creates a new seat.
    pub fn new(player_id: PlayerId, nickname: String, chips: Chips) -> Self {
        Self {
            player_id,
            nickname,
            chips,
            bet: Chips::ZERO,
            contributed: Chips::ZERO,
            hole_cards: None,
            is_folded: false,
            is_all_in: false,
            is_leaving: false,
        }
    }

    /// Moves up to `amount` chips from the stack to the bet.
    ///
    /// Returns the chips moved, the player goes all in if it runs out of chips.
    pub fn post_bet(&mut self, amount: Chips) -> Chips {
        let moved = amount.min(self.chips);
        self.chips -= moved;
        self.bet += moved;
        self.contributed += moved;

        if self.chips == Chips::ZERO && moved > Chips::ZERO {
            self.is_all_in = true;
        }

        moved
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.is_folded = true;
    }

    /// Reset state for a new hand.
    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards = None;
        self.bet = Chips::ZERO;
        self.contributed = Chips::ZERO;
        self.is_folded = false;
        self.is_all_in = false;
    }

    /// Reset state for a new betting round.
    pub fn start_round(&mut self) {
        self.bet = Chips::ZERO;
    }

    /// The player is still contending the pot.
    pub fn is_in_hand(&self) -> bool {
        !self.is_folded
    }

    /// The player can still take actions in this hand.
    pub fn can_act(&self) -> bool {
        !self.is_folded && !self.is_all_in
    }
}
