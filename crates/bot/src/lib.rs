// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hold'em self-play driver.
//!
//! Seats bots at a set of tables in a [TableRegistry] and plays hands on each
//! table in its own task until the hands limit is reached, a single player
//! has chips left, or Ctrl-c is pressed.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use log::{error, info};
use rand::{SeedableRng, rngs::StdRng};

use tokio::{
    signal,
    sync::{broadcast, mpsc},
};

use holdem_engine::{Chips, Game, PlayerId, TableConfig, TableId, TableRegistry};

mod table;
pub use table::Strategy;

/// Self play configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Number of tables to run.
    pub tables: usize,
    /// Number of bots at each table.
    pub seats: usize,
    /// Number of hands to play at each table.
    pub hands: usize,
    /// The bots starting chips.
    pub chips: Chips,
    /// The tables configuration.
    pub table: TableConfig,
    /// Seed for reproducible decks.
    pub seed: Option<u64>,
}

static NICKNAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Erin", "Frank", "Grace", "Heidi", "Ivan", "Judy", "Mike",
    "Niaj", "Olivia", "Peggy", "Rupert", "Sybil", "Trent", "Victor", "Walter", "Xena", "Yara",
    "Zoe", "Quinn",
];

/// Runs tables given a config and a strategy factory called for each bot.
pub async fn run<F, S>(config: Config, factory: F) -> Result<()>
where
    F: Fn(PlayerId) -> S,
    S: Strategy,
{
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let table_config = TableConfig {
        max_seats: config.table.max_seats.max(config.seats),
        ..config.table.clone()
    };
    table_config.validate()?;

    if config.seats < table_config.min_seats {
        bail!(
            "{} seats are not enough to start a hand, need {}",
            config.seats,
            table_config.min_seats
        );
    }

    let registry: TableRegistry = TableRegistry::new();
    let (shutdown_broadcast_tx, _) = broadcast::channel(1);
    let (shutdown_complete_tx, mut shutdown_complete_rx) = mpsc::channel(1);

    let mut next_player_id = 1;
    for idx in 0..config.tables {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(idx as u64)),
            None => StdRng::from_os_rng(),
        };

        let mut game = Game::with_rng(table_config.clone(), rng)?;
        let mut bots = Vec::with_capacity(config.seats);
        for seat in 0..config.seats {
            let player_id = PlayerId::new(next_player_id);
            next_player_id += 1;

            game.add_seat(player_id, NICKNAMES[seat % NICKNAMES.len()], config.chips)?;
            bots.push((player_id, factory(player_id)));
        }

        let table_id = TableId::new_id();
        registry.insert(table_id, game);

        let mut table = table::Table::new(
            table_id,
            registry.clone(),
            bots,
            config.hands,
            shutdown_broadcast_tx.subscribe(),
            shutdown_complete_tx.clone(),
        );

        tokio::spawn(async move {
            if let Err(err) = table.run().await {
                error!("Table {table_id} error: {err}");
            }
        });
    }

    // Wait for all tables to complete or for a Ctrl-c.
    drop(shutdown_complete_tx);
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received Ctrl-c signal");
        }
        _ = shutdown_complete_rx.recv() => {}
    }

    // Signal tables to shutdown and wait for tasks to complete.
    drop(shutdown_broadcast_tx);
    let _ = shutdown_complete_rx.recv().await;

    info!("Played {} tables", config.tables);

    Ok(())
}
