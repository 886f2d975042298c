// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A cards deck.
use rand::prelude::*;
use std::collections::VecDeque;
use thiserror::Error;

use crate::{Card, Rank, Suit};

/// Error drawing cards from a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// There are fewer cards in the deck than requested.
    #[error("cannot draw {requested} cards from a deck with {remaining} cards")]
    Exhausted {
        /// The number of cards requested.
        requested: usize,
        /// The number of cards left in the deck.
        remaining: usize,
    },
}

/// A cards Deck, cards are drawn from the front.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut cards = Self::default().cards.into_iter().collect::<Vec<_>>();
        cards.shuffle(rng);
        Self {
            cards: cards.into(),
        }
    }

    /// Removes and returns the first `n` cards.
    ///
    /// The deck is left untouched if it has fewer than `n` cards.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::Exhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }

        Ok(self.cards.drain(..n).collect())
    }

    /// Deals a card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");

        let n = self.cards.len();
        if k > n {
            return;
        }

        // Indices of the current combination in lexicographic order.
        let mut idx = (0..k).collect::<Vec<_>>();
        let mut hand = Vec::with_capacity(k);

        loop {
            hand.clear();
            hand.extend(idx.iter().map(|&i| self.cards[i]));
            f(&hand);

            // Find the rightmost index that can still move right.
            let Some(pos) = (0..k).rev().find(|&i| idx[i] != i + n - k) else {
                break;
            };

            idx[pos] += 1;
            for i in pos + 1..k {
                idx[i] = idx[i - 1] + 1;
            }
        }
    }
}

impl Default for Deck {
    /// The deck with the cards sorted by suit and rank.
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::collections::vec_deque::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::{AHashMap, HashSet};
    use rand::rngs::StdRng;

    #[test]
    fn draw_all_cards() {
        for seed in 0..20 {
            let mut deck = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(seed));
            let mut cards = HashSet::default();

            while !deck.is_empty() {
                let drawn = deck.draw(1).unwrap();
                assert_eq!(drawn.len(), 1);
                assert!(cards.insert(drawn[0]), "duplicate card {}", drawn[0]);
            }

            // Check uniquness.
            assert_eq!(cards.len(), Deck::SIZE);
            assert!(deck.deal().is_none());
        }
    }

    #[test]
    fn draw_from_front() {
        let mut deck = Deck::default();
        let cards = deck.draw(3).unwrap();
        assert_eq!(cards, vec![
            "2C".parse::<Card>().unwrap(),
            "3C".parse::<Card>().unwrap(),
            "4C".parse::<Card>().unwrap()
        ]);
        assert_eq!(deck.count(), Deck::SIZE - 3);
        assert_eq!(deck.deal(), Some("5C".parse().unwrap()));
    }

    #[test]
    fn draw_exhausted() {
        let mut deck = Deck::default();
        deck.draw(50).unwrap();

        let err = deck.draw(3).unwrap_err();
        assert_eq!(err, DeckError::Exhausted {
            requested: 3,
            remaining: 2
        });

        // A failed draw leaves the deck untouched.
        assert_eq!(deck.count(), 2);
        assert_eq!(deck.draw(2).unwrap().len(), 2);
        assert!(deck.is_empty());
    }

    #[test]
    fn shuffle_distribution() {
        // Each card should land on the top of the deck about 1/52 of the times.
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = AHashMap::<Card, usize>::default();
        let rounds = 52_000;

        for _ in 0..rounds {
            let mut deck = Deck::new_and_shuffled(&mut rng);
            *counts.entry(deck.deal().unwrap()).or_default() += 1;
        }

        assert_eq!(counts.len(), Deck::SIZE);
        for (card, count) in counts {
            assert!((700..1300).contains(&count), "{card} drawn first {count} times");
        }
    }

    #[test]
    fn deck_for_each() {
        let deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);

        let mut hands = HashSet::default();
        deck.for_each(2, |cards| {
            assert_eq!(cards.len(), 2);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 1_326);

        hands.clear();
        deck.for_each(3, |cards| {
            assert_eq!(cards.len(), 3);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 22_100);
    }

    #[test]
    fn deck_for_each_remove() {
        let mut deck = Deck::default();
        deck.remove("AD".parse().unwrap());
        deck.remove("KD".parse().unwrap());

        let mut count = 0;
        deck.for_each(5, |cards| {
            assert_eq!(cards.len(), 5);
            count += 1;
        });
        assert_eq!(count, 2_118_760);
    }
}
