// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use holdem_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert!(ah > kd);
//! ```
//!
//! and a [Deck] type for shuffling and drawing cards without replacement:
//!
//! ```
//! # use holdem_cards::Deck;
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! let hole_cards = deck.draw(2).unwrap();
//! assert_eq!(hole_cards.len(), 2);
//! assert_eq!(deck.count(), Deck::SIZE - 2);
//! assert!(deck.draw(51).is_err());
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod cards;
mod deck;

pub use cards::{Card, ParseCardError, Rank, Suit};
pub use deck::{Deck, DeckError};
