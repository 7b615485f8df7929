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

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use flashdeck_core::quiz::AnswerOutcome;
use flashdeck_core::quiz::Direction;
use maud::html;
use serde::Deserialize;

use crate::cmd::drill::state::Activity;
use crate::cmd::drill::state::Feedback;
use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;

#[derive(Deserialize)]
pub struct ActionForm {
    action: Option<String>,
    answer: Option<String>,
}

pub async fn post_handler(State(state): State<ServerState>, Form(form): Form<ActionForm>) -> Response {
    if form.action.as_deref() == Some("Done") {
        state.mutable.lock().unwrap().finished = true;
        state.shutdown();
        let body = html! {
            div.root {
                p { "Session finished. You can close this tab." }
            }
        };
        return Html(page_template(&state.set_name, body, None).into_string()).into_response();
    }
    {
        let mut m = state.mutable.lock().unwrap();
        handle(&mut m, form);
    }
    Redirect::to("/").into_response()
}

fn handle(m: &mut MutableState, form: ActionForm) {
    match &mut m.activity {
        Activity::Study(viewer) => match form.action.as_deref() {
            Some("Previous") => viewer.previous(),
            Some("Next") => viewer.next(),
            Some("Flip") => viewer.toggle(),
            Some("Swap") => viewer.set_front_side(viewer.front_side().opposite()),
            other => log::debug!("Ignoring study action {other:?}"),
        },
        Activity::Quiz(quiz) => {
            if let Some(answer) = form.answer {
                match quiz.answer(&answer) {
                    Ok(AnswerOutcome::Incorrect) => m.feedback = Some(Feedback::Incorrect),
                    Ok(AnswerOutcome::Correct | AnswerOutcome::Completed { .. }) => {
                        m.feedback = Some(Feedback::Correct)
                    }
                    Err(e) => log::warn!("{e}"),
                }
            } else if let Some(action) = form.action {
                match action.parse::<Direction>() {
                    Ok(direction) => {
                        if let Err(e) = quiz.start(direction) {
                            log::warn!("{e}");
                        }
                    }
                    Err(_) => log::debug!("Ignoring quiz action {action:?}"),
                }
            }
        }
    }
}
