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

use std::collections::HashMap;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::card::Side;
use crate::types::user::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Durable string key-value storage. Multi-key writes and removals must be
/// applied all-or-nothing.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Fallible<Option<String>>;
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Fallible<()>;
    fn remove_many(&mut self, keys: &[&str]) -> Fallible<()>;
}

/// In-memory storage, for tests and for front ends without persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Fallible<()> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Fallible<()> {
        for key in keys {
            self.entries.remove(*key);
        }
        Ok(())
    }
}

/// The client-held proof of authentication plus the cached identity.
///
/// `user` is only ever set alongside `token`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The token, or an auth failure for commands that need one.
    pub fn require_token(&self) -> Fallible<&str> {
        self.token()
            .ok_or_else(|| ErrorReport::auth("not logged in; run `flashdeck login` first"))
    }
}

/// Owns the storage and the in-memory session loaded from it.
pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    session: Session,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Read the persisted session. Never fails: unreadable or malformed
    /// entries are logged and treated as absent.
    pub fn load(storage: S) -> Self {
        let token = match storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("Could not read stored token: {e}");
                None
            }
        };
        let user = match storage.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("Discarding malformed stored user: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Could not read stored user: {e}");
                None
            }
        };
        let user = if token.is_none() && user.is_some() {
            log::warn!("Discarding stored user without a token");
            None
        } else {
            user
        };
        Self {
            storage,
            session: Session { token, user },
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Persist a new session. The in-memory session is only replaced once
    /// the write has succeeded.
    pub fn save(&mut self, token: String, user: User) -> Fallible<()> {
        let serialized = serde_json::to_string(&user)?;
        self.storage.set_many(&[
            (TOKEN_KEY, token.as_str()),
            (USER_KEY, serialized.as_str()),
        ])?;
        self.session = Session {
            token: Some(token),
            user: Some(user),
        };
        Ok(())
    }

    /// Forget the session. The in-memory session is reset even if the
    /// storage could not be cleared.
    pub fn clear(&mut self) -> Fallible<()> {
        self.session = Session::default();
        self.storage.remove_many(&[TOKEN_KEY, USER_KEY])
    }

    /// Which side of the cards of a set the viewer shows first.
    pub fn front_side(&self, set_id: i64) -> Side {
        match self.storage.get(&mode_key(set_id)) {
            Ok(Some(raw)) => raw.parse().unwrap_or_default(),
            Ok(None) => Side::default(),
            Err(e) => {
                log::warn!("Could not read viewer preference: {e}");
                Side::default()
            }
        }
    }

    pub fn set_front_side(&mut self, set_id: i64, side: Side) -> Fallible<()> {
        let key = mode_key(set_id);
        self.storage.set_many(&[(key.as_str(), side.as_str())])
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

fn mode_key(set_id: i64) -> String {
    format!("flashcard_mode_{set_id}")
}
