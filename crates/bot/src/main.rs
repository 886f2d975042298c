// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em self-play bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};

use holdem_bot::{Config, Strategy};
use holdem_engine::{
    Action, ActionRequest, Chips, GameSnapshot, PlayerCards, PlayerId, TableConfig,
};

/// Calls or checks, raises pocket pairs and folds some of the time.
struct CallOrCheck {
    player_id: PlayerId,
    rng: StdRng,
}

impl Strategy for CallOrCheck {
    fn execute(&mut self, req: &ActionRequest, state: &GameSnapshot) -> Action {
        // Some randomness.
        let p = self.rng.random::<f64>();

        if let Some(seat) = state.seat(self.player_id) {
            if let PlayerCards::Cards(c1, c2) = seat.cards {
                // Raise preflop with a pair.
                if c1.rank() == c2.rank() && state.board.is_empty() && req.can_raise() && p > 0.2
                {
                    return Action::Raise(req.min_raise.max(req.big_blind));
                }
            }
        }

        if p < 0.1 && !req.can_check() {
            Action::Fold
        } else if req.can_call() {
            Action::Call
        } else {
            Action::Check
        }
    }
}

#[derive(Debug, Parser)]
struct Cli {
    /// Number of tables to run.
    #[clap(long, short, default_value_t = 1)]
    tables: usize,
    /// Number of bots at each table.
    #[clap(long, short, default_value_t = 6,
        value_parser = clap::value_parser!(u8).range(2..=TableConfig::MAX_SEATS as i64))]
    seats: u8,
    /// Number of hands to play at each table.
    #[clap(long, default_value_t = 100)]
    hands: usize,
    /// The bots starting chips.
    #[clap(long, short, default_value_t = 1_000)]
    chips: u32,
    /// The small blind.
    #[clap(long, default_value_t = 10)]
    small_blind: u32,
    /// The big blind.
    #[clap(long, default_value_t = 20)]
    big_blind: u32,
    /// Seed for reproducible games.
    #[clap(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        tables: cli.tables,
        seats: cli.seats as usize,
        hands: cli.hands,
        chips: Chips::new(cli.chips),
        table: TableConfig {
            small_blind: Chips::new(cli.small_blind),
            big_blind: Chips::new(cli.big_blind),
            ..TableConfig::default()
        },
        seed: cli.seed,
    };

    let seed = cli.seed;
    holdem_bot::run(config, move |player_id| {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed ^ player_id.id()),
            None => StdRng::from_os_rng(),
        };

        CallOrCheck { player_id, rng }
    })
    .await
}
