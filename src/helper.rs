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

//! An in-process stand-in for the flashcard backend, for tests.

use std::sync::Arc;
use std::sync::Mutex;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use flashdeck_core::error::Fallible;
use flashdeck_core::types::card::Card;
use flashdeck_core::types::flashcard_set::FlashcardSet;
use flashdeck_core::types::flashcard_set::NewFlashcardSet;
use flashdeck_core::types::last_seen::LastSeenFlashcardSet;
use flashdeck_core::types::timestamp::Timestamp;
use flashdeck_core::types::user::RegistrationForm;
use flashdeck_core::types::user::User;
use portpicker::pick_unused_port;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::spawn;

use crate::utils::wait_for_server;

const HOST: &str = "127.0.0.1";

/// Fetching this set answers 404 with an empty body.
pub const BARE_NOT_FOUND_SET: i64 = 9404;

/// Fetching this set answers 500 with an empty body.
pub const FAILING_SET: i64 = 9500;

/// Seeded with one user, `ann`/`secret` (id 1), who owns three sets:
/// "Capitals" (id 1, four cards), "Single" (id 2, one card) and "Empty"
/// (id 3, no cards).
pub struct MockBackend {
    port: u16,
}

struct Account {
    user: User,
    password: String,
}

struct Data {
    accounts: Vec<Account>,
    sets: Vec<FlashcardSet>,
    last_seen: Vec<LastSeenFlashcardSet>,
}

type Shared = Arc<Mutex<Data>>;

#[derive(Deserialize)]
struct LoginBody {
    login: String,
    password: String,
}

impl MockBackend {
    pub async fn start() -> Fallible<Self> {
        let port = pick_unused_port().unwrap();
        let state: Shared = Arc::new(Mutex::new(seed()));
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/registration", post(register))
            .route("/api/users/currentUser", get(current_user))
            .route("/api/flashcardSet", get(list_sets).post(create_set))
            .route("/api/flashcardSet/LastSeenSets", get(last_seen))
            .route("/api/flashcardSet/owner/{user_id}", get(owned_sets))
            .route("/api/flashcardSet/{id}", get(get_set))
            .with_state(state);
        let listener = TcpListener::bind(format!("{HOST}:{port}")).await?;
        spawn(async move { axum::serve(listener, app).await });
        wait_for_server(HOST, port).await?;
        Ok(Self { port })
    }

    pub fn base_url(&self) -> String {
        format!("http://{HOST}:{}/api", self.port)
    }
}

fn seed() -> Data {
    let ann = User {
        id: 1,
        name: "Ann".to_string(),
        surname: Some("Lee".to_string()),
        login: Some("ann".to_string()),
    };
    let set = |id: i64, name: &str, cards: Vec<Card>| FlashcardSet {
        id,
        name: name.to_string(),
        description: String::new(),
        cards,
        user_id: Some(1),
    };
    Data {
        accounts: vec![Account {
            user: ann,
            password: "secret".to_string(),
        }],
        sets: vec![
            set(
                1,
                "Capitals",
                vec![
                    Card::new("France", "Paris"),
                    Card::new("Italy", "Rome"),
                    Card::new("Spain", "Madrid"),
                    Card::new("Germany", "Berlin"),
                ],
            ),
            set(2, "Single", vec![Card::new("X", "9")]),
            set(3, "Empty", Vec::new()),
        ],
        last_seen: Vec::new(),
    }
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn authorized(headers: &HeaderMap, data: &Data) -> Option<User> {
    let token = headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;
    let id: i64 = token.strip_prefix("token-")?.parse().ok()?;
    data.accounts
        .iter()
        .find(|a| a.user.id == id)
        .map(|a| a.user.clone())
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> Response {
    let data = state.lock().unwrap();
    match data
        .accounts
        .iter()
        .find(|a| a.user.login.as_deref() == Some(body.login.as_str()) && a.password == body.password)
    {
        Some(account) => (StatusCode::OK, format!("token-{}", account.user.id)).into_response(),
        None => message(StatusCode::UNAUTHORIZED, "Invalid login or password"),
    }
}

async fn register(State(state): State<Shared>, Json(form): Json<RegistrationForm>) -> Response {
    let mut data = state.lock().unwrap();
    if data
        .accounts
        .iter()
        .any(|a| a.user.login.as_deref() == Some(form.login.as_str()))
    {
        return message(
            StatusCode::CONFLICT,
            &format!("User with login {} already exists", form.login),
        );
    }
    let user = User {
        id: data.accounts.len() as i64 + 1,
        name: form.name,
        surname: Some(form.surname),
        login: Some(form.login),
    };
    data.accounts.push(Account {
        user: user.clone(),
        password: form.password,
    });
    Json(user).into_response()
}

async fn current_user(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let data = state.lock().unwrap();
    match authorized(&headers, &data) {
        Some(user) => Json(user).into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn list_sets(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let data = state.lock().unwrap();
    if authorized(&headers, &data).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(data.sets.clone()).into_response()
}

async fn owned_sets(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(user_id): Path<i64>,
) -> Response {
    let data = state.lock().unwrap();
    if authorized(&headers, &data).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let sets: Vec<FlashcardSet> = data
        .sets
        .iter()
        .filter(|s| s.user_id == Some(user_id))
        .cloned()
        .collect();
    Json(sets).into_response()
}

async fn get_set(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut data = state.lock().unwrap();
    if authorized(&headers, &data).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match id {
        BARE_NOT_FOUND_SET => return StatusCode::NOT_FOUND.into_response(),
        FAILING_SET => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        _ => {}
    }
    let Some(set) = data.sets.iter().find(|s| s.id == id).cloned() else {
        return message(StatusCode::NOT_FOUND, "Flashcard set not found");
    };
    data.last_seen.retain(|e| e.flashcard_set_id != id);
    data.last_seen.insert(
        0,
        LastSeenFlashcardSet {
            flashcard_set_id: id,
            flashcard_set_name: set.name.clone(),
            opened_at: Timestamp::now(),
        },
    );
    Json(set).into_response()
}

async fn last_seen(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let data = state.lock().unwrap();
    if authorized(&headers, &data).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(data.last_seen.clone()).into_response()
}

async fn create_set(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(payload): Json<NewFlashcardSet>,
) -> Response {
    let mut data = state.lock().unwrap();
    if authorized(&headers, &data).is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    let id = data.sets.iter().map(|s| s.id).max().unwrap_or(0) + 1;
    let set = FlashcardSet {
        id,
        name: payload.name,
        description: payload.description,
        cards: payload.cards,
        user_id: Some(payload.user_id),
    };
    data.sets.push(set.clone());
    Json(set).into_response()
}
