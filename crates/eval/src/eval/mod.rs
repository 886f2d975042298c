// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator ranks a hand of 5 or more cards by checking every 5 cards
//! subset, it returns a [HandValue] with the hand category, the tie-break key
//! used to order hands of the same category, and the best five cards for UIs
//! to show a winning hand.

mod hand_rank;
mod hand_value;

pub use hand_rank::HandCategory;
pub use hand_value::{EvalError, HandValue};
