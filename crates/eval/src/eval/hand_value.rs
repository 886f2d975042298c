// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand values and comparison.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error;

use super::HandCategory;
use crate::{Card, Rank};

/// Error evaluating a hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A hand needs at least five cards.
    #[error("need at least 5 cards to evaluate a hand, got {0}")]
    NotEnoughCards(usize),
    /// The same card appears twice in the hand.
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// The value of the best five cards hand.
///
/// Values compare by category first and by tie-break key when the category is
/// the same, the best cards are not used for comparison so two hands with the
/// same category and key are equal and split a pot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandValue {
    category: HandCategory,
    key: Vec<u8>,
    cards: [Card; 5],
}

impl HandValue {
    /// The size of a hand.
    pub const HAND_SIZE: usize = 5;

    /// Evaluates a hand of 5 or more cards.
    ///
    /// With more than 5 cards every 5 cards subset is evaluated and the best is
    /// returned, if more than one subset has the best value the first found in
    /// input order wins.
    pub fn eval(cards: &[Card]) -> Result<HandValue, EvalError> {
        if cards.len() < Self::HAND_SIZE {
            return Err(EvalError::NotEnoughCards(cards.len()));
        }

        for (i, card) in cards.iter().enumerate() {
            if cards[i + 1..].contains(card) {
                return Err(EvalError::DuplicateCard(*card));
            }
        }

        let n = cards.len();
        let mut best: Option<HandValue> = None;
        for c1 in 0..n {
            for c2 in (c1 + 1)..n {
                for c3 in (c2 + 1)..n {
                    for c4 in (c3 + 1)..n {
                        for c5 in (c4 + 1)..n {
                            let hand = [cards[c1], cards[c2], cards[c3], cards[c4], cards[c5]];
                            let value = Self::eval5(hand);
                            if best.as_ref().is_none_or(|b| value > *b) {
                                best = Some(value);
                            }
                        }
                    }
                }
            }
        }

        // There is at least one subset as n >= 5.
        best.ok_or(EvalError::NotEnoughCards(n))
    }

    /// Compares two hand values.
    pub fn compare(&self, other: &HandValue) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.key.cmp(&other.key))
    }

    /// The hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// The tie-break key, rank values from the most significant.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The best five cards sorted by rank from the highest.
    pub fn hand(&self) -> &[Card] {
        &self.cards
    }

    /// The hand label for UIs.
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    fn eval5(mut cards: [Card; 5]) -> HandValue {
        cards.sort_by(|a, b| b.cmp(a));

        let values = cards.map(|c| c.rank().value());
        let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
        let straight_high = Self::straight_high(&values);

        // Rank groups sorted by count and then by rank, both descending.
        let mut groups: Vec<(usize, u8)> = Vec::with_capacity(5);
        for v in values {
            match groups.iter_mut().find(|(_, r)| *r == v) {
                Some((count, _)) => *count += 1,
                None => groups.push((1, v)),
            }
        }
        groups.sort_by(|a, b| b.cmp(a));

        let counts = groups.iter().map(|(c, _)| *c).collect::<Vec<_>>();
        let group_key = || groups.iter().map(|(_, r)| *r).collect::<Vec<_>>();

        let (category, key) = match (straight_high, is_flush, counts.as_slice()) {
            (Some(high), true, _) if high == Rank::Ace.value() => {
                (HandCategory::RoyalFlush, vec![high])
            }
            (Some(high), true, _) => (HandCategory::StraightFlush, vec![high]),
            (_, _, [4, 1]) => (HandCategory::FourOfAKind, group_key()),
            (_, _, [3, 2]) => (HandCategory::FullHouse, group_key()),
            (_, true, _) => (HandCategory::Flush, values.to_vec()),
            (Some(high), _, _) => (HandCategory::Straight, vec![high]),
            (_, _, [3, 1, 1]) => (HandCategory::ThreeOfAKind, group_key()),
            (_, _, [2, 2, 1]) => (HandCategory::TwoPair, group_key()),
            (_, _, [2, 1, 1, 1]) => (HandCategory::Pair, group_key()),
            _ => (HandCategory::HighCard, values.to_vec()),
        };

        HandValue {
            category,
            key,
            cards,
        }
    }

    /// Returns the straight high card for rank values sorted descending.
    fn straight_high(values: &[u8; 5]) -> Option<u8> {
        const WHEEL: [u8; 5] = [14, 5, 4, 3, 2];

        if values.windows(2).all(|w| w[0] == w[1] + 1) {
            Some(values[0])
        } else if *values == WHEEL {
            Some(Rank::Five.value())
        } else {
            None
        }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)?;
        for card in &self.cards {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}
