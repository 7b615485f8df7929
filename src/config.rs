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

use std::env;
use std::fs::create_dir_all;
use std::path::PathBuf;

use flashdeck_core::error::Fallible;
use flashdeck_core::error::fail;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

const HOME_ENV: &str = "FLASHDECK_HOME";
const CONFIG_FILE: &str = "config.toml";
const SESSION_DB: &str = "session.db";

/// The optional `config.toml` in the data directory.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Holds the session database and `config.toml`.
    pub data_dir: PathBuf,
    /// Base URL of the backend, without a trailing slash.
    pub api_url: String,
}

impl Config {
    /// Resolve the configuration. Flags win over `config.toml`, which wins
    /// over the defaults. The data directory is created if missing.
    pub fn load(data_dir: Option<String>, api_url: Option<String>) -> Fallible<Self> {
        let data_dir = match data_dir {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        create_dir_all(&data_dir)?;
        let file = read_config_file(&data_dir)?;
        let api_url = api_url
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();
        log::debug!(
            "Using data directory {} and API {api_url}",
            data_dir.display()
        );
        Ok(Self { data_dir, api_url })
    }

    pub fn session_db_path(&self) -> PathBuf {
        self.data_dir.join(SESSION_DB)
    }
}

fn default_data_dir() -> Fallible<PathBuf> {
    if let Ok(dir) = env::var(HOME_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    match dirs::data_dir() {
        Some(dir) => Ok(dir.join("flashdeck")),
        None => fail(format!(
            "could not determine a data directory; set {HOME_ENV} or pass --data-dir"
        )),
    }
}

fn read_config_file(data_dir: &std::path::Path) -> Fallible<ConfigFile> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(&path)?;
    Ok(toml::from_str(&content)?)
}
