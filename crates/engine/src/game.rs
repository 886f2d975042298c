// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em table state machine.
//!
//! A [Game] is created once per table and plays many hands. Each hand goes
//! through the [Stage]s from [Stage::PreFlop] to [Stage::Showdown] driven by
//! the actions of the seated players, a new hand starts with
//! [Game::start_hand]. Rejected operations return an [EngineError] and leave
//! the table untouched.
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::EngineError,
    poker::{Card, Chips, Deck, PlayerId},
};

pub mod seat;
mod showdown;
mod snapshot;

pub use seat::Seat;
pub use showdown::{ShowdownResult, Winner};
pub use snapshot::{GameSnapshot, SeatSnapshot};

/// Table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// The small blind posted at the start of each hand.
    pub small_blind: Chips,
    /// The big blind posted at the start of each hand.
    pub big_blind: Chips,
    /// The number of players with chips needed to start a hand.
    pub min_seats: usize,
    /// The number of seats at the table.
    pub max_seats: usize,
}

impl TableConfig {
    /// Two hole cards each plus the board must fit in a deck.
    pub const MAX_SEATS: usize = (Deck::SIZE - 5) / 2;

    /// Checks the configuration values.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.small_blind == Chips::ZERO || self.big_blind == Chips::ZERO {
            return Err(EngineError::InvalidConfig("blinds must be positive"));
        }

        if self.small_blind > self.big_blind {
            return Err(EngineError::InvalidConfig(
                "small blind is larger than big blind",
            ));
        }

        if self.min_seats < 2 {
            return Err(EngineError::InvalidConfig("a hand needs at least 2 seats"));
        }

        if self.min_seats > self.max_seats {
            return Err(EngineError::InvalidConfig(
                "min seats is larger than max seats",
            ));
        }

        if self.max_seats > Self::MAX_SEATS {
            return Err(EngineError::InvalidConfig("too many seats for one deck"));
        }

        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: Chips::new(10),
            big_blind: Chips::new(20),
            min_seats: 2,
            max_seats: 9,
        }
    }
}

/// The hand stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// No hand has been played yet.
    Waiting,
    /// Hole cards dealt, first betting round.
    PreFlop,
    /// Three board cards dealt.
    Flop,
    /// Fourth board card dealt.
    Turn,
    /// Fifth board card dealt, last betting round.
    River,
    /// The hand has ended and the pot has been paid.
    Showdown,
}

impl Stage {
    /// The number of board cards at this stage.
    pub fn board_cards(&self) -> usize {
        match self {
            Stage::Waiting | Stage::PreFlop => 0,
            Stage::Flop => 3,
            Stage::Turn => 4,
            Stage::River | Stage::Showdown => 5,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Waiting => "waiting",
            Stage::PreFlop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        };

        write!(f, "{s}")
    }
}

/// A player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Give up the hand.
    Fold,
    /// Pass with no bet to call.
    Check,
    /// Match the bet, with the whole stack if short.
    Call,
    /// Raise the round bet to the given amount.
    Raise(Chips),
    /// Bet the whole stack.
    AllIn,
}

impl Action {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            Action::Fold => "FOLD",
            Action::Check => "CHECK",
            Action::Call => "CALL",
            Action::Raise(_) => "RAISE",
            Action::AllIn => "ALL-IN",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Raise(amount) => write!(f, "{} {amount}", self.label()),
            _ => write!(f, "{}", self.label()),
        }
    }
}

/// The actions available to the player who has to act.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRequest {
    /// The player who has to act.
    pub player_id: PlayerId,
    /// The round bet every player has to match.
    pub bet_to_match: Chips,
    /// The chips needed to match the round bet.
    pub to_call: Chips,
    /// The smallest amount a raise can go to.
    pub min_raise: Chips,
    /// The largest amount a raise can go to with the player stack.
    pub max_raise: Chips,
    /// The hand big blind.
    pub big_blind: Chips,
}

impl ActionRequest {
    /// Check if a call action is in the request.
    pub fn can_call(&self) -> bool {
        self.to_call > Chips::ZERO
    }

    /// Check if a check action is in the request.
    pub fn can_check(&self) -> bool {
        self.to_call == Chips::ZERO
    }

    /// Check if a full raise is in the request.
    pub fn can_raise(&self) -> bool {
        self.max_raise >= self.min_raise
    }
}

/// A Hold'em table.
#[derive(Debug)]
pub struct Game {
    config: TableConfig,
    stage: Stage,
    seats: Vec<Seat>,
    deck: Deck,
    board: Vec<Card>,
    pot: Chips,
    bet_to_match: Chips,
    dealer: usize,
    actor: Option<usize>,
    hand_number: u64,
    showdown: Option<ShowdownResult>,
    rng: StdRng,
}

impl Game {
    /// Creates a new table.
    pub fn new(config: TableConfig) -> Result<Self, EngineError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a new table with user initialized randomness.
    pub fn with_rng(config: TableConfig, rng: StdRng) -> Result<Self, EngineError> {
        config.validate()?;

        Ok(Self {
            config,
            stage: Stage::Waiting,
            seats: Vec::default(),
            deck: Deck::default(),
            board: Vec::default(),
            pot: Chips::ZERO,
            bet_to_match: Chips::ZERO,
            dealer: 0,
            actor: None,
            hand_number: 0,
            showdown: None,
            rng,
        })
    }

    /// The table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The hand stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The seats in seating order.
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// The seat for the given player.
    pub fn seat(&self, player_id: PlayerId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.player_id == player_id)
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The chips in the pot for the running hand.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The round bet every player has to match.
    pub fn bet_to_match(&self) -> Chips {
        self.bet_to_match
    }

    /// The index of the seat with the button.
    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// The number of hands started at this table.
    pub fn hand_number(&self) -> u64 {
        self.hand_number
    }

    /// The result of the last hand.
    pub fn showdown(&self) -> Option<&ShowdownResult> {
        self.showdown.as_ref()
    }

    /// Checks if a hand is being played.
    pub fn is_hand_running(&self) -> bool {
        matches!(
            self.stage,
            Stage::PreFlop | Stage::Flop | Stage::Turn | Stage::River
        )
    }

    /// The seat that has to act, none if there isn't a hand running.
    pub fn current_actor(&self) -> Option<&Seat> {
        self.actor.map(|idx| &self.seats[idx])
    }

    /// The actions available to the seat that has to act.
    pub fn legal_actions(&self) -> Option<ActionRequest> {
        let seat = self.current_actor()?;
        Some(ActionRequest {
            player_id: seat.player_id,
            bet_to_match: self.bet_to_match,
            to_call: self.bet_to_match - seat.bet,
            min_raise: self.min_raise(),
            max_raise: seat.bet + seat.chips,
            big_blind: self.config.big_blind,
        })
    }

    /// The table state as seen by an observer, all hole cards are covered
    /// until showdown.
    pub fn snapshot(&self) -> GameSnapshot {
        snapshot::build(self, None)
    }

    /// The table state as seen by a seated player, with the player own cards.
    pub fn player_view(&self, player_id: PlayerId) -> GameSnapshot {
        snapshot::build(self, Some(player_id))
    }

    /// Adds a player to the table.
    ///
    /// A player joining during a hand waits for the next hand.
    pub fn add_seat(
        &mut self,
        player_id: PlayerId,
        nickname: &str,
        chips: Chips,
    ) -> Result<(), EngineError> {
        if self.seats.len() >= self.config.max_seats {
            return Err(EngineError::TableFull(self.config.max_seats));
        }

        if self.seat(player_id).is_some() {
            return Err(EngineError::AlreadySeated(player_id));
        }

        // Pot and payouts are exact only if all the table chips fit in a Chips.
        let table_chips = self
            .seats
            .iter()
            .map(|s| u64::from(s.chips.amount()))
            .sum::<u64>()
            + u64::from(self.pot.amount());
        if table_chips + u64::from(chips.amount()) > u64::from(u32::MAX) {
            return Err(EngineError::ChipsOverflow(chips));
        }

        let mut seat = Seat::new(player_id, nickname.to_string(), chips);
        if self.is_hand_running() {
            seat.fold();
        }

        info!("Player {player_id} {nickname} joined with {chips} chips");
        self.seats.push(seat);

        Ok(())
    }

    /// Removes a player from the table, returns the player stack.
    ///
    /// During a hand the player folds and the chips already bet stay in the
    /// pot, the seat is released when the hand ends.
    pub fn remove_seat(&mut self, player_id: PlayerId) -> Result<Chips, EngineError> {
        let idx = self
            .seats
            .iter()
            .position(|s| s.player_id == player_id && !s.is_leaving)
            .ok_or(EngineError::SeatNotFound(player_id))?;

        if !self.is_hand_running() {
            let seat = self.remove_at(idx);
            info!("Player {player_id} left with {} chips", seat.chips);
            return Ok(seat.chips);
        }

        let seat = &mut self.seats[idx];
        let chips = seat.chips;
        seat.chips = Chips::ZERO;
        seat.is_leaving = true;
        seat.fold();

        warn!(
            "Player {player_id} left during hand {}, {} chips stay in the pot",
            self.hand_number, seat.contributed
        );

        if self.actor == Some(idx) {
            self.advance(idx)?;
        } else if self.count_in_hand() < 2 {
            self.enter_showdown()?;
        }

        Ok(chips)
    }

    /// Starts a new hand.
    pub fn start_hand(&mut self) -> Result<(), EngineError> {
        if self.is_hand_running() {
            return Err(EngineError::HandInProgress);
        }

        let has_chips = |s: &Seat| s.chips > Chips::ZERO;
        let min_seats = self.config.min_seats;
        if self.seats.iter().filter(|&s| has_chips(s)).count() < min_seats {
            return Err(EngineError::NotEnoughPlayers(min_seats));
        }

        // The button moves after the first hand or if it is on a busted seat.
        let dealer = if self.hand_number > 0 || !has_chips(&self.seats[self.dealer]) {
            self.next_seat(self.dealer, has_chips)
                .ok_or(EngineError::NotEnoughPlayers(min_seats))?
        } else {
            self.dealer
        };

        // Deal before changing the table so a failed draw leaves it untouched.
        let mut deck = Deck::new_and_shuffled(&mut self.rng);
        let mut hole_cards = Vec::with_capacity(self.seats.len());
        for seat in &self.seats {
            if has_chips(seat) {
                let cards = deck.draw(2)?;
                hole_cards.push(Some([cards[0], cards[1]]));
            } else {
                hole_cards.push(None);
            }
        }

        self.hand_number += 1;
        self.dealer = dealer;
        self.deck = deck;
        self.board.clear();
        self.pot = Chips::ZERO;
        self.showdown = None;
        self.stage = Stage::PreFlop;

        for (seat, cards) in self.seats.iter_mut().zip(hole_cards) {
            seat.reset_for_new_hand();
            seat.hole_cards = cards;

            // Players with no chips sit out this hand.
            if cards.is_none() {
                seat.fold();
            }
        }

        // Positions are counted over the players in the hand.
        let count = self.seats.len();
        let order = (1..=count)
            .map(|offset| (dealer + offset) % count)
            .filter(|&idx| self.seats[idx].hole_cards.is_some())
            .collect::<Vec<_>>();

        let sb = order[0];
        let bb = order[1 % order.len()];
        let first = order[2 % order.len()];

        self.pot += self.seats[sb].post_bet(self.config.small_blind);
        self.pot += self.seats[bb].post_bet(self.config.big_blind);
        self.bet_to_match = self.config.big_blind;

        info!(
            "Hand {} started with {} players, button {} blinds {}/{}",
            self.hand_number,
            order.len(),
            self.seats[dealer].nickname,
            self.config.small_blind,
            self.config.big_blind,
        );

        self.actor = if self.seats[first].can_act() {
            Some(first)
        } else {
            self.next_seat(first, Seat::can_act)
        };

        // Blinds may have put everybody all in.
        if self.count_can_act() < 2 && self.is_round_complete() {
            self.next_stage()?;
        }

        Ok(())
    }

    /// Applies an action from the player who has to act.
    pub fn apply_action(
        &mut self,
        player_id: PlayerId,
        action: Action,
    ) -> Result<(), EngineError> {
        if !self.is_hand_running() {
            return Err(EngineError::ActionAfterHandEnded);
        }

        let idx = match self.actor {
            Some(idx) if self.seats[idx].player_id == player_id => idx,
            _ => return Err(EngineError::NotYourTurn(player_id)),
        };

        let min_raise = self.min_raise();
        let seat = &mut self.seats[idx];
        match action {
            Action::Check if seat.bet < self.bet_to_match => {
                return Err(EngineError::IllegalCheck(self.bet_to_match - seat.bet));
            }
            Action::Raise(amount) if amount < min_raise => {
                return Err(EngineError::RaiseTooSmall {
                    amount,
                    min: min_raise,
                });
            }
            _ => {}
        }

        match action {
            Action::Fold => seat.fold(),
            Action::Check => {}
            Action::Call => {
                self.pot += seat.post_bet(self.bet_to_match - seat.bet);
            }
            Action::Raise(amount) => {
                self.pot += seat.post_bet(amount - seat.bet);
                self.bet_to_match = self.bet_to_match.max(seat.bet);
            }
            Action::AllIn => {
                self.pot += seat.post_bet(seat.chips);
                self.bet_to_match = self.bet_to_match.max(seat.bet);
            }
        }

        debug!(
            "Hand {} {} {}: {action}, bet {} stack {}",
            self.hand_number, self.stage, seat.nickname, seat.bet, seat.chips
        );

        self.advance(idx)
    }

    /// The smallest amount a raise can go to.
    fn min_raise(&self) -> Chips {
        self.bet_to_match * 2
    }

    /// Moves the turn on after the seat at `from` has acted or left.
    fn advance(&mut self, from: usize) -> Result<(), EngineError> {
        if self.count_in_hand() < 2 {
            return self.enter_showdown();
        }

        if self.is_round_complete() {
            return self.next_stage();
        }

        match self.next_seat(from, Seat::can_act) {
            Some(next) => {
                self.actor = Some(next);
                Ok(())
            }
            None => self.next_stage(),
        }
    }

    /// Deals the next streets until two or more players can bet.
    fn next_stage(&mut self) -> Result<(), EngineError> {
        loop {
            let (cards, stage) = match self.stage {
                Stage::PreFlop => (3, Stage::Flop),
                Stage::Flop => (1, Stage::Turn),
                Stage::Turn => (1, Stage::River),
                _ => return self.enter_showdown(),
            };

            let cards = self.deck.draw(cards)?;
            self.board.extend(cards);
            self.stage = stage;

            for seat in &mut self.seats {
                seat.start_round();
            }
            self.bet_to_match = Chips::ZERO;

            debug!(
                "Hand {} {} board {}",
                self.hand_number,
                self.stage,
                self.board
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            );

            if self.count_can_act() >= 2 {
                self.actor = self.next_seat(self.dealer, Seat::can_act);
                return Ok(());
            }
        }
    }

    /// Pays the pot and ends the hand.
    fn enter_showdown(&mut self) -> Result<(), EngineError> {
        let result = showdown::resolve(&mut self.seats, &self.board, self.pot, self.dealer)?;

        for winner in &result.winners {
            match &winner.hand {
                Some(hand) => info!(
                    "Hand {} {} wins {} with {hand}",
                    self.hand_number, winner.nickname, winner.chips
                ),
                None => info!(
                    "Hand {} {} wins {} uncontested",
                    self.hand_number, winner.nickname, winner.chips
                ),
            }
        }

        for seat in &mut self.seats {
            seat.start_round();
        }

        self.stage = Stage::Showdown;
        self.pot = Chips::ZERO;
        self.bet_to_match = Chips::ZERO;
        self.actor = None;
        self.showdown = Some(result);

        // Release the seats of the players who left during the hand.
        for idx in (0..self.seats.len()).rev() {
            if self.seats[idx].is_leaving {
                self.remove_at(idx);
            }
        }

        Ok(())
    }

    /// Removes a seat keeping the button position.
    fn remove_at(&mut self, idx: usize) -> Seat {
        let seat = self.seats.remove(idx);
        let count = self.seats.len();

        if count == 0 {
            self.dealer = 0;
        } else if idx < self.dealer {
            self.dealer -= 1;
        } else if idx == self.dealer {
            // The button goes to the seat that followed, the first hand keeps
            // the button where it is so it is placed on that seat directly.
            self.dealer = if self.hand_number == 0 {
                idx % count
            } else {
                (idx + count - 1) % count
            };
        }

        seat
    }

    /// The first seat after `from` that matches the predicate, `from` is
    /// checked last.
    fn next_seat<P>(&self, from: usize, pred: P) -> Option<usize>
    where
        P: Fn(&Seat) -> bool,
    {
        let count = self.seats.len();
        (1..=count)
            .map(|offset| (from + offset) % count)
            .find(|&idx| pred(&self.seats[idx]))
    }

    /// Every player who can bet has matched the round bet.
    fn is_round_complete(&self) -> bool {
        self.seats
            .iter()
            .filter(|s| s.can_act())
            .all(|s| s.bet == self.bet_to_match)
    }

    fn count_in_hand(&self) -> usize {
        self.seats.iter().filter(|s| s.is_in_hand()).count()
    }

    fn count_can_act(&self) -> usize {
        self.seats.iter().filter(|s| s.can_act()).count()
    }
}
