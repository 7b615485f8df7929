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

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::error::Fallible;
use crate::types::card::Card;

/// A set as returned by the backend. The list endpoints may omit the
/// description and cards, or send them as `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardSet {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

/// The payload used to create a set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlashcardSet {
    pub name: String,
    pub description: String,
    pub cards: Vec<Card>,
    pub user_id: i64,
}

/// A set written by hand in a TOML file:
///
/// ```toml
/// name = "Capitals"
/// description = "European capitals"
///
/// [[cards]]
/// term = "France"
/// definition = "Paris"
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SetDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl SetDefinition {
    pub fn parse(content: &str) -> Fallible<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn into_new_set(self, user_id: i64) -> NewFlashcardSet {
        NewFlashcardSet {
            name: self.name,
            description: self.description,
            cards: self.cards,
            user_id,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
