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

use std::process::exit;
use std::sync::Arc;
use std::sync::Mutex;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use clap::ValueEnum;
use flashdeck_core::error::ErrorReport;
use flashdeck_core::error::Fallible;
use flashdeck_core::quiz::Direction;
use flashdeck_core::quiz::Quiz;
use flashdeck_core::rng::TinyRng;
use flashdeck_core::session::KeyValueStore;
use flashdeck_core::session::SessionStore;
use flashdeck_core::types::card::Side;
use flashdeck_core::types::flashcard_set::FlashcardSet;
use flashdeck_core::viewer::Viewer;
use tokio::net::TcpListener;
use tokio::select;
use tokio::signal;
use tokio::spawn;
use tokio::sync::oneshot::Receiver;
use tokio::sync::oneshot::channel;

use crate::client::ApiClient;
use crate::cmd::drill::get::get_handler;
use crate::cmd::drill::post::post_handler;
use crate::cmd::drill::state::Activity;
use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::utils::wait_for_server;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum QuizDirection {
    /// Show the term, pick the definition.
    TermToDefinition,
    /// Show the definition, pick the term.
    DefinitionToTerm,
}

impl From<QuizDirection> for Direction {
    fn from(value: QuizDirection) -> Self {
        match value {
            QuizDirection::TermToDefinition => Direction::TermToDefinition,
            QuizDirection::DefinitionToTerm => Direction::DefinitionToTerm,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum FrontSide {
    Term,
    Definition,
}

impl From<FrontSide> for Side {
    fn from(value: FrontSide) -> Self {
        match value {
            FrontSide::Term => Side::Term,
            FrontSide::Definition => Side::Definition,
        }
    }
}

pub enum DrillMode {
    /// Flip through the cards.
    Study { front: Side },
    /// Multiple choice. Without a direction, the page asks for one.
    Quiz { direction: Option<Direction> },
}

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub set: FlashcardSet,
    pub mode: DrillMode,
    pub rng: TinyRng,
}

/// What happened during a session, read once the server has stopped.
#[derive(Debug, PartialEq)]
pub struct DrillReport {
    /// The side shown first when the study session ended.
    pub front_side: Option<Side>,
    /// Errors made in the quiz, if it was completed.
    pub quiz_errors: Option<usize>,
    /// Whether the user ended the session from the page.
    pub finished: bool,
}

/// Where to serve a session.
pub struct Listen {
    pub host: String,
    pub port: u16,
    pub open_browser: bool,
}

/// Fetch the set, then serve the study or quiz page until the user is done.
/// A failed fetch returns before anything is bound.
pub async fn drill_set<S: KeyValueStore>(
    client: &ApiClient,
    store: &SessionStore<S>,
    id: i64,
    mode: DrillMode,
    listen: Listen,
    rng: TinyRng,
) -> Fallible<DrillReport> {
    let token = store.session().require_token()?;
    let set = client.get_set(token, id).await?;
    let Listen {
        host,
        port,
        open_browser,
    } = listen;
    if open_browser {
        // Start a separate task to open the browser once the server is up.
        let browser_host = host.clone();
        spawn(async move {
            match wait_for_server(&browser_host, port).await {
                Ok(_) => {
                    let _ = open::that(format!("http://{browser_host}:{port}/"));
                }
                Err(e) => {
                    eprintln!("Failed to connect to server: {e}");
                    exit(-1)
                }
            }
        });
    }
    println!("Serving '{}' on http://{host}:{port}/", set.name);
    let config = ServerConfig {
        host,
        port,
        set,
        mode,
        rng,
    };
    start_server(config).await
}

pub async fn start_server(config: ServerConfig) -> Fallible<DrillReport> {
    let ServerConfig {
        host,
        port,
        set,
        mode,
        rng,
    } = config;

    if set.cards.is_empty() {
        return Err(ErrorReport::no_cards());
    }
    let activity = match mode {
        DrillMode::Study { front } => Activity::Study(Viewer::new(set.cards, front)?),
        DrillMode::Quiz { direction } => {
            let mut quiz = Quiz::new(set.cards, rng);
            if let Some(direction) = direction {
                quiz.start(direction)?;
            }
            Activity::Quiz(quiz)
        }
    };

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = channel();

    let state = ServerState {
        set_id: set.id,
        set_name: set.name,
        mutable: Arc::new(Mutex::new(MutableState {
            activity,
            feedback: None,
            finished: false,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state.clone());
    let bind = format!("{host}:{port}");

    // Start the server with graceful shutdown on Ctrl+C or the "Done" button.
    log::debug!("Starting server for set {} on {bind}", state.set_id);
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;

    let mutable = state.mutable.lock().unwrap();
    let report = match &mutable.activity {
        Activity::Study(viewer) => DrillReport {
            front_side: Some(viewer.front_side()),
            quiz_errors: None,
            finished: mutable.finished,
        },
        Activity::Quiz(quiz) => DrillReport {
            front_side: None,
            quiz_errors: quiz.is_completed().then(|| quiz.errors()),
            finished: mutable.finished,
        },
    };
    Ok(report)
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 1], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (StatusCode::OK, [(CONTENT_TYPE, "text/css")], bytes)
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal(shutdown_rx: Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    let shutdown = async {
        shutdown_rx.await.ok();
    };

    select! {
        _ = ctrl_c => {
            log::debug!("Received Ctrl+C, shutting down gracefully");
        },
        _ = shutdown => {
            log::debug!("Received shutdown signal, shutting down gracefully");
        },
    }
}
