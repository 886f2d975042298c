// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Engine errors.
use thiserror::Error;

use crate::poker::{Chips, DeckError, EvalError, PlayerId};

/// An error returned by a rejected table operation.
///
/// A failed operation leaves the table state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// All the table seats are taken.
    #[error("table is full with {0} seats")]
    TableFull(usize),
    /// The player has already a seat at the table.
    #[error("player {0} is already seated")]
    AlreadySeated(PlayerId),
    /// The player is not seated at the table.
    #[error("player {0} is not seated")]
    SeatNotFound(PlayerId),
    /// The table chips would not fit in a [Chips] amount.
    #[error("cannot seat a player with {0} chips, too many chips at the table")]
    ChipsOverflow(Chips),
    /// There are not enough players with chips to start a hand.
    #[error("need at least {0} players with chips to start a hand")]
    NotEnoughPlayers(usize),
    /// Tried to draw more cards than left in the deck.
    #[error("deck exhausted: {0}")]
    DeckExhausted(#[from] DeckError),
    /// A hand could not be evaluated.
    #[error("hand evaluation failed: {0}")]
    Evaluation(#[from] EvalError),
    /// The player is not the one who has to act.
    #[error("it is not player {0} turn")]
    NotYourTurn(PlayerId),
    /// Check when there is a bet to call.
    #[error("cannot check with {0} to call")]
    IllegalCheck(Chips),
    /// Raise below the minimum amount.
    #[error("raise to {amount} is below the minimum raise to {min}")]
    RaiseTooSmall {
        /// The raise amount.
        amount: Chips,
        /// The minimum raise amount.
        min: Chips,
    },
    /// An action was sent while no hand is running.
    #[error("no hand in progress")]
    ActionAfterHandEnded,
    /// Start a hand while another one is running.
    #[error("a hand is already in progress")]
    HandInProgress,
    /// The table configuration is not valid.
    #[error("invalid table config: {0}")]
    InvalidConfig(&'static str),
    /// The table is not in the registry.
    #[error("table {0} not found")]
    TableNotFound(String),
}
