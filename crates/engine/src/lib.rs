// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em Poker table engine.
//!
//! ```
//! use holdem_engine::{Action, Chips, Game, PlayerId, Stage, TableConfig};
//!
//! let mut game = Game::new(TableConfig::default()).unwrap();
//! game.add_seat(PlayerId::new(1), "Alice", Chips::new(1_000)).unwrap();
//! game.add_seat(PlayerId::new(2), "Bob", Chips::new(1_000)).unwrap();
//! game.start_hand().unwrap();
//!
//! // Heads up the player after the button posts the small blind and acts first.
//! let actor = game.current_actor().unwrap().player_id;
//! game.apply_action(actor, Action::Fold).unwrap();
//!
//! assert_eq!(game.stage(), Stage::Showdown);
//! assert_eq!(game.showdown().unwrap().pot, Chips::new(30));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod error;
pub mod game;
pub mod poker;
pub mod registry;

pub use error::EngineError;
pub use game::{
    Action, ActionRequest, Game, GameSnapshot, Seat, SeatSnapshot, ShowdownResult, Stage,
    TableConfig, Winner,
};
pub use poker::{Card, Chips, HandCategory, HandValue, PlayerCards, PlayerId, TableId};
pub use registry::{SharedGame, TableRegistry};
