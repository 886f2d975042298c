// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em Poker hand evaluator.
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its category:
//!
//! ```
//! # use holdem_eval::*;
//! let hand = ["AS", "KS", "QS", "JS", "TS", "2D", "3C"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let v1 = HandValue::eval(&hand).unwrap();
//! assert_eq!(v1.category(), HandCategory::RoyalFlush);
//!
//! // 2C, 3C, .., 7C
//! let cards = Deck::default().into_iter().take(6).collect::<Vec<_>>();
//! let v2 = HandValue::eval(&cards).unwrap();
//! assert_eq!(v2.category(), HandCategory::StraightFlush);
//! assert!(v1 > v2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{EvalError, HandCategory, HandValue};

// Reexport cards types.
pub use holdem_cards::{Card, Deck, DeckError, Rank, Suit};
