// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A table played by bots.
use ahash::AHashMap;
use anyhow::{Result, anyhow};
use log::{info, warn};
use tokio::{
    sync::{broadcast, mpsc},
    task,
};

use holdem_engine::{
    Action, ActionRequest, EngineError, GameSnapshot, PlayerId, TableId, TableRegistry,
};

/// A Poker bot strategy.
pub trait Strategy: Send + 'static {
    /// Execute an action given the request and the table state seen by the bot.
    fn execute(&mut self, req: &ActionRequest, state: &GameSnapshot) -> Action;
}

/// Bots seated at a table.
pub(crate) struct Table<S: Strategy> {
    table_id: TableId,
    registry: TableRegistry,
    bots: AHashMap<PlayerId, S>,
    hands: usize,
    shutdown_broadcast_rx: broadcast::Receiver<()>,
    _shutdown_complete_tx: mpsc::Sender<()>,
}

impl<S: Strategy> Table<S> {
    /// Creates a new table.
    pub(crate) fn new(
        table_id: TableId,
        registry: TableRegistry,
        bots: Vec<(PlayerId, S)>,
        hands: usize,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
        _shutdown_complete_tx: mpsc::Sender<()>,
    ) -> Self {
        Self {
            table_id,
            registry,
            bots: bots.into_iter().collect(),
            hands,
            shutdown_broadcast_rx,
            _shutdown_complete_tx,
        }
    }

    /// Plays hands until done or a shutdown signal.
    pub(crate) async fn run(&mut self) -> Result<()> {
        let mut played = 0;
        while played < self.hands {
            let res = tokio::select! {
                res = play_hand(&self.registry, self.table_id, &mut self.bots) => res,
                _ = self.shutdown_broadcast_rx.recv() => break,
            };

            if !res? {
                info!("Table {} has a single player with chips", self.table_id);
                break;
            }

            played += 1;
        }

        self.registry.with_table(&self.table_id, |game| {
            for seat in game.seats() {
                info!(
                    "Table {} {} ends with {} chips",
                    self.table_id, seat.nickname, seat.chips
                );
            }
        })?;

        self.registry.remove(&self.table_id);
        info!("Table {} played {played} hands", self.table_id);

        Ok(())
    }
}

/// Plays a hand, returns false if a hand cannot be started.
async fn play_hand<S: Strategy>(
    registry: &TableRegistry,
    table_id: TableId,
    bots: &mut AHashMap<PlayerId, S>,
) -> Result<bool> {
    match registry.with_table(&table_id, |game| game.start_hand())? {
        Ok(()) => {}
        Err(EngineError::NotEnoughPlayers(_)) => return Ok(false),
        Err(err) => return Err(err.into()),
    }

    loop {
        let next = registry.with_table(&table_id, |game| {
            game.legal_actions()
                .map(|req| (game.player_view(req.player_id), req))
        })?;

        let Some((state, req)) = next else {
            break;
        };

        let strategy = bots
            .get_mut(&req.player_id)
            .ok_or_else(|| anyhow!("No bot for player {}", req.player_id))?;

        let player_id = req.player_id;
        let action = strategy.execute(&req, &state);
        let res = registry.with_table(&table_id, |game| game.apply_action(player_id, action))?;

        // A rejected action folds the hand.
        if let Err(err) = res {
            warn!("Table {table_id} player {player_id} {action} rejected: {err}");
            registry
                .with_table(&table_id, |game| game.apply_action(player_id, Action::Fold))??;
        }

        // Let other tables run.
        task::yield_now().await;
    }

    Ok(true)
}
