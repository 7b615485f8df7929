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
use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// An entry of the "recently seen" list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastSeenFlashcardSet {
    pub flashcard_set_id: i64,
    pub flashcard_set_name: String,
    pub opened_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_deserialize() -> Fallible<()> {
        let json = r#"[{"flashcardSetId": 12, "flashcardSetName": "Verbs", "openedAt": "2025-02-11T09:15:02.4412"}]"#;
        let entries: Vec<LastSeenFlashcardSet> = serde_json::from_str(json)?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].flashcard_set_id, 12);
        assert_eq!(entries[0].opened_at.short(), "2025-02-11 09:15");
        Ok(())
    }
}
