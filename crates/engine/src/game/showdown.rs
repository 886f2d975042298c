// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown resolution.
use serde::Serialize;

use super::Seat;
use crate::{
    error::EngineError,
    poker::{Card, Chips, HandValue, PlayerId},
};

/// A player who won chips at showdown.
#[derive(Debug, Clone, Serialize)]
pub struct Winner {
    /// The player id.
    pub player_id: PlayerId,
    /// The player nickname.
    pub nickname: String,
    /// The chips won.
    pub chips: Chips,
    /// The winning hand, none if all other players folded.
    pub hand: Option<HandValue>,
}

/// The outcome of a hand.
#[derive(Debug, Clone, Serialize)]
pub struct ShowdownResult {
    /// The pot paid to the winners.
    pub pot: Chips,
    /// The winners in seating order from the left of the button.
    pub winners: Vec<Winner>,
    /// The hands of all the players who went to showdown.
    pub hands: Vec<(PlayerId, HandValue)>,
}

impl ShowdownResult {
    /// The hand was won without a showdown.
    pub fn is_uncontested(&self) -> bool {
        self.hands.is_empty()
    }
}

/// Pays the pot to the best hands.
///
/// Hands are evaluated before paying so the seats are untouched on error. A
/// pot that doesn't split evenly gives the odd chips one at a time to the
/// winners closest to the left of the button.
pub(crate) fn resolve(
    seats: &mut [Seat],
    board: &[Card],
    pot: Chips,
    dealer: usize,
) -> Result<ShowdownResult, EngineError> {
    let count = seats.len();

    // Contenders in seating order starting left of the button.
    let contenders = (1..=count)
        .map(|offset| (dealer + offset) % count)
        .filter(|&idx| seats[idx].is_in_hand())
        .collect::<Vec<_>>();

    if let [idx] = contenders.as_slice() {
        let seat = &mut seats[*idx];
        seat.chips += pot;

        return Ok(ShowdownResult {
            pot,
            winners: vec![Winner {
                player_id: seat.player_id,
                nickname: seat.nickname.clone(),
                chips: pot,
                hand: None,
            }],
            hands: Vec::default(),
        });
    }

    let mut hands = Vec::with_capacity(contenders.len());
    for &idx in &contenders {
        let Some([c1, c2]) = seats[idx].hole_cards else {
            continue;
        };

        let mut cards = vec![c1, c2];
        cards.extend_from_slice(board);
        hands.push((idx, HandValue::eval(&cards)?));
    }

    let Some(best) = hands.iter().map(|(_, hv)| hv).max().cloned() else {
        return Ok(ShowdownResult {
            pot,
            winners: Vec::default(),
            hands: Vec::default(),
        });
    };

    let winners = hands
        .iter()
        .filter(|(_, hv)| *hv == best)
        .map(|(idx, hv)| (*idx, hv.clone()))
        .collect::<Vec<_>>();

    let share = pot / winners.len() as u32;
    let odd_chips = (pot % winners.len() as u32).amount() as usize;

    let winners = winners
        .into_iter()
        .enumerate()
        .map(|(pos, (idx, hv))| {
            let chips = if pos < odd_chips {
                share + Chips::new(1)
            } else {
                share
            };

            let seat = &mut seats[idx];
            seat.chips += chips;

            Winner {
                player_id: seat.player_id,
                nickname: seat.nickname.clone(),
                chips,
                hand: Some(hv),
            }
        })
        .collect();

    let hands = hands
        .into_iter()
        .map(|(idx, hv)| (seats[idx].player_id, hv))
        .collect();

    Ok(ShowdownResult {
        pot,
        winners,
        hands,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn seat(id: u64, hole: &str) -> Seat {
        let mut seat = Seat::new(PlayerId::new(id), format!("p{id}"), Chips::ZERO);
        let c = cards(hole);
        seat.hole_cards = Some([c[0], c[1]]);
        seat
    }

    #[test]
    fn best_hand_wins() {
        let mut seats = vec![seat(1, "AS AD"), seat(2, "KS KD"), seat(3, "2C 7D")];
        let board = cards("AH KH 9C 4D 3S");

        let res = resolve(&mut seats, &board, Chips::new(300), 0).unwrap();
        assert_eq!(res.winners.len(), 1);
        assert_eq!(res.winners[0].player_id, PlayerId::new(1));
        assert_eq!(res.winners[0].chips, Chips::new(300));
        assert_eq!(res.hands.len(), 3);
        assert!(!res.is_uncontested());
        assert_eq!(seats[0].chips, Chips::new(300));
        assert_eq!(seats[1].chips, Chips::ZERO);
    }

    #[test]
    fn folded_players_do_not_win() {
        let mut seats = vec![seat(1, "AS AD"), seat(2, "KS KD"), seat(3, "2C 7D")];
        seats[0].fold();
        let board = cards("AH KH 9C 4D 3S");

        let res = resolve(&mut seats, &board, Chips::new(300), 0).unwrap();
        assert_eq!(res.winners[0].player_id, PlayerId::new(2));
        assert_eq!(res.hands.len(), 2);
    }

    #[test]
    fn uncontested_pot() {
        let mut seats = vec![seat(1, "AS AD"), seat(2, "KS KD")];
        seats[0].fold();

        // No board needed as no hand is evaluated.
        let res = resolve(&mut seats, &[], Chips::new(30), 0).unwrap();
        assert!(res.is_uncontested());
        assert!(res.winners[0].hand.is_none());
        assert_eq!(seats[1].chips, Chips::new(30));
    }

    #[test]
    fn split_pot_odd_chips() {
        // Everybody plays the board straight.
        let mut seats = vec![seat(1, "2C 3D"), seat(2, "2D 3C"), seat(3, "2H 3H")];
        let board = cards("9S TD JC QH KS");

        // Dealer is seat 1, odd chip goes to seat 2 first.
        let res = resolve(&mut seats, &board, Chips::new(100), 1).unwrap();
        assert_eq!(res.winners.len(), 3);
        assert_eq!(res.winners[0].player_id, PlayerId::new(3));
        assert_eq!(seats[2].chips, Chips::new(34));
        assert_eq!(seats[0].chips, Chips::new(33));
        assert_eq!(seats[1].chips, Chips::new(33));

        let total = seats.iter().map(|s| s.chips).sum::<Chips>();
        assert_eq!(total, Chips::new(100));
    }
}
