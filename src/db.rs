// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use flashdeck_core::error::ErrorReport;
use flashdeck_core::error::Fallible;
use flashdeck_core::session::KeyValueStore;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

/// SQLite-backed key-value storage for the session.
pub struct Database {
    conn: Connection,
}

fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::storage(format!("database error: {e}"))
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_error)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        Self::init(Connection::open_in_memory().map_err(db_error)?)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .map_err(db_error)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(db_error)
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Fallible<()> {
        let tx = self.conn.transaction().map_err(db_error)?;
        for (key, value) in entries {
            tx.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(db_error)?;
        }
        tx.commit().map_err(db_error)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Fallible<()> {
        let tx = self.conn.transaction().map_err(db_error)?;
        for key in keys {
            tx.execute("DELETE FROM kv WHERE key = ?1", params![key])
                .map_err(db_error)?;
        }
        tx.commit().map_err(db_error)
    }
}
