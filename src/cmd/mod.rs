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

pub mod auth;
pub mod drill;
pub mod sets;

use flashdeck_core::error::Fallible;
use flashdeck_core::session::SessionStore;

use crate::client::ApiClient;
use crate::config::Config;
use crate::db::Database;

/// Everything a command needs: the backend client and the session handle.
pub struct Context {
    pub client: ApiClient,
    pub store: SessionStore<Database>,
}

impl Context {
    pub fn open(config: &Config) -> Fallible<Self> {
        let db = Database::new(&config.session_db_path())?;
        Ok(Self {
            client: ApiClient::new(config.api_url.clone()),
            store: SessionStore::load(db),
        })
    }
}
