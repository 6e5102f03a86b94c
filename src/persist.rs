// used for persistence
use rusqlite::{params, Connection, Error};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::error::{ProjectedError, Result};
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

// ------------- Persistence -------------
/// SQLite-backed [`Store`]. Every value lives in a single `Preference` table
/// keyed by its text key, with the encoded bytes kept as a blob.
pub struct Persistor {
    db: Mutex<Connection>,
    mode: PersistenceMode,
}

impl Persistor {
    pub fn new(mode: PersistenceMode) -> Result<Self> {
        let connection = match &mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => Connection::open(path)?,
        };
        Self::with_connection(connection, mode)
    }
    fn with_connection(connection: Connection, mode: PersistenceMode) -> Result<Self> {
        // The "STRICT" keyword introduced in 3.37.0 breaks JDBC connections, which makes
        // debugging using an external tool like DBeaver impossible
        connection.execute_batch(
            "
            create table if not exists Preference (
                Preference_Key text not null,
                Preference_Value blob not null,
                constraint unique_and_referenceable_Preference_Key primary key (
                    Preference_Key
                )
            );-- STRICT;
            ",
        )?;
        info!(?mode, "preference store opened");
        Ok(Self {
            db: Mutex::new(connection),
            mode,
        })
    }
    pub fn mode(&self) -> &PersistenceMode {
        &self.mode
    }
    fn db(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|e| ProjectedError::Lock(e.to_string()))
    }
    /// All keys currently held, in key order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let db = self.db()?;
        let mut all_keys = db.prepare_cached(
            "
            select Preference_Key
                from Preference
                order by Preference_Key
        ",
        )?;
        let key_iter = all_keys.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for key in key_iter {
            keys.push(key?);
        }
        Ok(keys)
    }
}

impl Store for Persistor {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let db = self.db()?;
        let mut get_value = db.prepare_cached(
            "
            select Preference_Value
                from Preference
                where Preference_Key = ?
        ",
        )?;
        match get_value.query_row::<Vec<u8>, _, _>(params![key], |r| r.get(0)) {
            Ok(value) => Ok(Some(value)),
            Err(Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let db = self.db()?;
        let mut add_value = db.prepare_cached(
            "
            insert into Preference (
                Preference_Key,
                Preference_Value
            ) values (?, ?)
            on conflict (Preference_Key) do update
                set Preference_Value = excluded.Preference_Value
        ",
        )?;
        add_value.execute(params![key, value])?;
        debug!(key, bytes = value.len(), "preference persisted");
        Ok(())
    }
    fn remove(&self, key: &str) -> Result<()> {
        let db = self.db()?;
        let mut remove_value = db.prepare_cached(
            "
            delete from Preference
                where Preference_Key = ?
        ",
        )?;
        let removed = remove_value.execute(params![key])?;
        debug!(key, removed, "preference removed");
        Ok(())
    }
    fn has(&self, key: &str) -> Result<bool> {
        let db = self.db()?;
        let mut get_key = db.prepare_cached(
            "
            select 1
                from Preference
                where Preference_Key = ?
        ",
        )?;
        match get_key.query_row::<i64, _, _>(params![key], |r| r.get(0)) {
            Ok(_) => Ok(true),
            Err(Error::QueryReturnedNoRows) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
