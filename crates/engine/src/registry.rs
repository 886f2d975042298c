// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Registry of the active tables.
use ahash::AHashMap;
use log::info;
use parking_lot::Mutex;
use std::{fmt, hash::Hash, sync::Arc};

use crate::{
    error::EngineError,
    game::{Game, TableConfig},
    poker::TableId,
};

/// A shared table handle, one operation at a time runs on a table.
pub type SharedGame = Arc<Mutex<Game>>;

/// The tables owned by a service.
///
/// Tables are keyed by [TableId] by default, services that already have a
/// natural key (a chat or room id) can use it instead. The registry is a
/// cheap handle, clones share the same tables.
#[derive(Debug)]
pub struct TableRegistry<K = TableId>(Arc<Mutex<Shared<K>>>);

#[derive(Debug)]
struct Shared<K> {
    tables: AHashMap<K, SharedGame>,
}

impl<K> Clone for TableRegistry<K> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<K> Default for TableRegistry<K> {
    fn default() -> Self {
        Self(Arc::new(Mutex::new(Shared {
            tables: AHashMap::default(),
        })))
    }
}

impl TableRegistry<TableId> {
    /// Creates a table with a new unique id.
    pub fn create(&self, config: TableConfig) -> Result<TableId, EngineError> {
        let game = Game::new(config)?;
        let table_id = TableId::new_id();
        self.insert(table_id, game);
        Ok(table_id)
    }
}

impl<K> TableRegistry<K>
where
    K: Eq + Hash + fmt::Display,
{
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, replacing any table with the same key.
    pub fn insert(&self, key: K, game: Game) -> SharedGame {
        let game = Arc::new(Mutex::new(game));
        info!("Table {key} created");
        self.0.lock().tables.insert(key, game.clone());
        game
    }

    /// Gets a table.
    pub fn get(&self, key: &K) -> Option<SharedGame> {
        self.0.lock().tables.get(key).cloned()
    }

    /// Gets a table creating it with the given config if it doesn't exist.
    pub fn get_or_create(&self, key: K, config: TableConfig) -> Result<SharedGame, EngineError> {
        let mut shared = self.0.lock();
        if let Some(game) = shared.tables.get(&key) {
            return Ok(game.clone());
        }

        let game = Arc::new(Mutex::new(Game::new(config)?));
        info!("Table {key} created");
        shared.tables.insert(key, game.clone());
        Ok(game)
    }

    /// Runs `f` on a locked table.
    ///
    /// The registry lock is released before locking the table so operations
    /// on different tables run concurrently.
    pub fn with_table<F, R>(&self, key: &K, f: F) -> Result<R, EngineError>
    where
        F: FnOnce(&mut Game) -> R,
    {
        let game = self
            .get(key)
            .ok_or_else(|| EngineError::TableNotFound(key.to_string()))?;
        let mut game = game.lock();
        Ok(f(&mut game))
    }

    /// Removes a table.
    pub fn remove(&self, key: &K) -> Option<SharedGame> {
        let game = self.0.lock().tables.remove(key);
        if game.is_some() {
            info!("Table {key} removed");
        }
        game
    }

    /// The number of tables.
    pub fn len(&self) -> usize {
        self.0.lock().tables.len()
    }

    /// Checks if there are no tables.
    pub fn is_empty(&self) -> bool {
        self.0.lock().tables.is_empty()
    }
}
