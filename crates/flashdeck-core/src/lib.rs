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

pub mod error;
pub mod quiz;
pub mod rng;
pub mod session;
pub mod types;
pub mod validate;
pub mod viewer;

pub use error::{ErrorKind, ErrorReport, Fallible, fail};
pub use quiz::{AnswerOutcome, Direction, Question, Quiz, QuizState};
pub use session::{KeyValueStore, MemoryStore, Session, SessionStore};
pub use types::card::{Card, Side};
pub use types::flashcard_set::{FlashcardSet, NewFlashcardSet, SetDefinition};
pub use types::last_seen::LastSeenFlashcardSet;
pub use types::timestamp::Timestamp;
pub use types::user::{RegistrationForm, User};
pub use viewer::Viewer;
