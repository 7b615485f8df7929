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

use flashdeck_core::error::ErrorReport;
use flashdeck_core::error::Fallible;
use flashdeck_core::session::KeyValueStore;
use wasm_bindgen::JsValue;
use web_sys::Storage as WebStorage;

/// Browser `localStorage`. When it is unavailable (e.g. disabled by the
/// user), reads see nothing and writes are dropped.
pub struct LocalStorage {
    inner: Option<WebStorage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        Self { inner }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn storage_error(e: JsValue) -> ErrorReport {
    ErrorReport::storage(format!("localStorage error: {e:?}"))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        match &self.inner {
            Some(storage) => storage.get_item(key).map_err(storage_error),
            None => Ok(None),
        }
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Fallible<()> {
        let Some(storage) = &self.inner else {
            return Ok(());
        };
        // localStorage has no transactions; undo the keys already written
        // if a later write fails (usually a full quota).
        let mut written: Vec<(&str, Option<String>)> = Vec::new();
        for &(key, value) in entries {
            let previous = storage.get_item(key).map_err(storage_error)?;
            if let Err(e) = storage.set_item(key, value) {
                for (key, previous) in written {
                    let _ = match previous {
                        Some(previous) => storage.set_item(key, &previous),
                        None => storage.remove_item(key),
                    };
                }
                return Err(storage_error(e));
            }
            written.push((key, previous));
        }
        Ok(())
    }

    fn remove_many(&mut self, keys: &[&str]) -> Fallible<()> {
        let Some(storage) = &self.inner else {
            return Ok(());
        };
        for key in keys {
            storage.remove_item(key).map_err(storage_error)?;
        }
        Ok(())
    }
}
