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

use wasm_bindgen::prelude::*;
use web_sys::console;

use flashdeck_core::error::ErrorReport;
use flashdeck_core::quiz::AnswerOutcome;
use flashdeck_core::quiz::Direction;
use flashdeck_core::quiz::FEEDBACK_DELAY;
use flashdeck_core::quiz::Quiz;
use flashdeck_core::rng::TinyRng;
use flashdeck_core::session::SessionStore;
use flashdeck_core::types::card::Card;
use flashdeck_core::types::card::Side;
use flashdeck_core::types::user::User;
use flashdeck_core::viewer::Viewer;

mod storage;

use storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"flashdeck WASM initialized".into());
}

fn js_error(e: ErrorReport) -> JsValue {
    JsValue::from_str(e.message())
}

fn parse_cards(cards_json: &str) -> Result<Vec<Card>, JsValue> {
    serde_json::from_str(cards_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse cards JSON: {}", e)))
}

fn parse_side(side: &str) -> Result<Side, JsValue> {
    side.parse().map_err(js_error)
}

fn seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => js_sys::Date::now() as u64,
    }
}

/// The session handle for the browser front end, backed by `localStorage`.
#[wasm_bindgen]
pub struct SessionHandle {
    store: SessionStore<LocalStorage>,
}

#[wasm_bindgen]
impl SessionHandle {
    /// Load the persisted session.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            store: SessionStore::load(LocalStorage::new()),
        }
    }

    #[wasm_bindgen]
    pub fn token(&self) -> Option<String> {
        self.store.session().token().map(String::from)
    }

    /// The current user as JSON, if any.
    #[wasm_bindgen]
    pub fn user_json(&self) -> Option<String> {
        self.store
            .session()
            .user()
            .and_then(|user| serde_json::to_string(user).ok())
    }

    #[wasm_bindgen]
    pub fn is_authenticated(&self) -> bool {
        self.store.session().is_authenticated()
    }

    /// Store the token and user returned by a successful login.
    #[wasm_bindgen]
    pub fn save(&mut self, token: &str, user_json: &str) -> Result<(), JsValue> {
        let user: User = serde_json::from_str(user_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse user: {}", e)))?;
        self.store.save(token.to_string(), user).map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) -> Result<(), JsValue> {
        self.store.clear().map_err(js_error)
    }

    /// "term" or "definition".
    #[wasm_bindgen]
    pub fn front_side(&self, set_id: i64) -> String {
        self.store.front_side(set_id).to_string()
    }

    #[wasm_bindgen]
    pub fn set_front_side(&mut self, set_id: i64, side: &str) -> Result<(), JsValue> {
        let side = parse_side(side)?;
        self.store.set_front_side(set_id, side).map_err(js_error)
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
pub struct QuizApp {
    quiz: Quiz,
}

#[wasm_bindgen]
impl QuizApp {
    /// Create a quiz from a JSON array of `{term, definition}` cards.
    #[wasm_bindgen(constructor)]
    pub fn new(cards_json: &str) -> Result<QuizApp, JsValue> {
        let cards = parse_cards(cards_json)?;
        Ok(Self {
            quiz: Quiz::new(cards, TinyRng::from_seed(seed())),
        })
    }

    /// direction: "term-to-definition" or "definition-to-term"
    #[wasm_bindgen]
    pub fn start(&mut self, direction: &str) -> Result<(), JsValue> {
        let direction: Direction = direction.parse().map_err(js_error)?;
        self.quiz.start(direction).map_err(js_error)
    }

    #[wasm_bindgen]
    pub fn prompt(&self) -> Option<String> {
        self.quiz.question().map(|q| q.prompt)
    }

    /// The options of the current question as a JSON array.
    #[wasm_bindgen]
    pub fn options_json(&self) -> String {
        let options = self.quiz.question().map(|q| q.options).unwrap_or_default();
        serde_json::to_string(&options).unwrap_or_else(|_| "[]".to_string())
    }

    /// One-based position of the current question.
    #[wasm_bindgen]
    pub fn position(&self) -> usize {
        self.quiz.question().map(|q| q.index + 1).unwrap_or(0)
    }

    #[wasm_bindgen]
    pub fn total(&self) -> usize {
        self.quiz.question().map(|q| q.total).unwrap_or(0)
    }

    /// Returns "correct", "incorrect" or "completed".
    #[wasm_bindgen]
    pub fn answer(&mut self, option: &str) -> Result<String, JsValue> {
        let outcome = self.quiz.answer(option).map_err(js_error)?;
        let outcome = match outcome {
            AnswerOutcome::Correct => "correct",
            AnswerOutcome::Incorrect => "incorrect",
            AnswerOutcome::Completed { .. } => "completed",
        };
        Ok(outcome.to_string())
    }

    #[wasm_bindgen]
    pub fn errors(&self) -> usize {
        self.quiz.errors()
    }

    #[wasm_bindgen]
    pub fn is_completed(&self) -> bool {
        self.quiz.is_completed()
    }

    /// How long to show the answer feedback, in milliseconds.
    #[wasm_bindgen]
    pub fn feedback_delay_ms(&self) -> u32 {
        FEEDBACK_DELAY.as_millis() as u32
    }
}

#[wasm_bindgen]
pub struct ViewerApp {
    viewer: Viewer,
}

#[wasm_bindgen]
impl ViewerApp {
    #[wasm_bindgen(constructor)]
    pub fn new(cards_json: &str, front: &str) -> Result<ViewerApp, JsValue> {
        let cards = parse_cards(cards_json)?;
        let viewer = Viewer::new(cards, parse_side(front)?).map_err(js_error)?;
        Ok(Self { viewer })
    }

    #[wasm_bindgen]
    pub fn visible(&self) -> String {
        self.viewer.visible().to_string()
    }

    #[wasm_bindgen]
    pub fn is_revealed(&self) -> bool {
        self.viewer.is_revealed()
    }

    /// One-based position of the current card.
    #[wasm_bindgen]
    pub fn position(&self) -> usize {
        self.viewer.index() + 1
    }

    #[wasm_bindgen]
    pub fn total(&self) -> usize {
        self.viewer.len()
    }

    #[wasm_bindgen]
    pub fn next(&mut self) {
        self.viewer.next();
    }

    #[wasm_bindgen]
    pub fn previous(&mut self) {
        self.viewer.previous();
    }

    #[wasm_bindgen]
    pub fn toggle(&mut self) {
        self.viewer.toggle();
    }

    #[wasm_bindgen]
    pub fn set_front_side(&mut self, side: &str) -> Result<(), JsValue> {
        self.viewer.set_front_side(parse_side(side)?);
        Ok(())
    }
}
