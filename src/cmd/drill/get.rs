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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use flashdeck_core::quiz::Direction;
use flashdeck_core::quiz::FEEDBACK_DELAY;
use flashdeck_core::quiz::Question;
use flashdeck_core::quiz::Quiz;
use flashdeck_core::quiz::QuizState;
use flashdeck_core::viewer::Viewer;
use maud::Markup;
use maud::html;

use crate::cmd::drill::state::Activity;
use crate::cmd::drill::state::Feedback;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut m = state.mutable.lock().unwrap();
    let feedback = m.feedback.take();
    let (body, refresh) = match &m.activity {
        Activity::Study(viewer) => (render_study(&state, viewer), None),
        Activity::Quiz(quiz) => match feedback {
            Some(feedback) => (render_feedback(&state, feedback), Some(FEEDBACK_DELAY)),
            None => (render_quiz(&state, quiz), None),
        },
    };
    let page = page_template(&state.set_name, body, refresh);
    (StatusCode::OK, Html(page.into_string()))
}

fn done_button() -> Markup {
    html! {
        form action="/" method="post" {
            button type="submit" name="action" value="Done" title="Close the session." { "Done" }
        }
    }
}

fn header(state: &ServerState, progress: Option<(usize, usize)>) -> Markup {
    html! {
        div.header {
            h1 { (state.set_name) }
            @if let Some((position, total)) = progress {
                span.progress { (position) " / " (total) }
            }
            (done_button())
        }
    }
}

fn render_study(state: &ServerState, viewer: &Viewer) -> Markup {
    let showing = if viewer.is_revealed() {
        viewer.front_side().opposite()
    } else {
        viewer.front_side()
    };
    html! {
        div.root {
            (header(state, Some((viewer.index() + 1, viewer.len()))))
            div.card {
                div.side { (showing.as_str()) }
                div.text { (viewer.visible()) }
            }
            form.controls action="/" method="post" {
                button type="submit" name="action" value="Previous" { "Previous" }
                button.primary type="submit" name="action" value="Flip" { "Flip" }
                button type="submit" name="action" value="Next" { "Next" }
            }
            form action="/" method="post" {
                button type="submit" name="action" value="Swap" title="Show the other side first." {
                    "Show " (viewer.front_side().opposite().as_str()) " first"
                }
            }
        }
    }
}

fn render_quiz(state: &ServerState, quiz: &Quiz) -> Markup {
    match quiz.state() {
        QuizState::ModeSelection { .. } => render_mode_selection(state),
        QuizState::InProgress { .. } => match quiz.question() {
            Some(question) => render_question(state, &question),
            None => render_mode_selection(state),
        },
        QuizState::Completed { errors } => render_completed(state, *errors),
    }
}

fn render_mode_selection(state: &ServerState) -> Markup {
    html! {
        div.root {
            (header(state, None))
            p { "Choose a quiz direction" }
            form.modes action="/" method="post" {
                button.primary type="submit" name="action" value=(Direction::DefinitionToTerm.as_str()) {
                    "Definition → Term"
                }
                button.primary type="submit" name="action" value=(Direction::TermToDefinition.as_str()) {
                    "Term → Definition"
                }
            }
        }
    }
}

fn render_question(state: &ServerState, question: &Question) -> Markup {
    html! {
        div.root {
            (header(state, Some((question.index + 1, question.total))))
            div.card {
                div.text { (question.prompt) }
            }
            form.options action="/" method="post" {
                @for option in &question.options {
                    button type="submit" name="answer" value=(option) { (option) }
                }
            }
        }
    }
}

fn render_feedback(state: &ServerState, feedback: Feedback) -> Markup {
    html! {
        div.root {
            (header(state, None))
            @match feedback {
                Feedback::Correct => {
                    p.feedback.correct { "Correct!" }
                },
                Feedback::Incorrect => {
                    p.feedback.incorrect { "Incorrect, try again." }
                },
            }
        }
    }
}

fn render_completed(state: &ServerState, errors: usize) -> Markup {
    html! {
        div.root {
            div.dialog {
                h1 { "Well done!" }
                p { "You finished the quiz for \"" (state.set_name) "\"." }
                p { "Errors: " (errors) }
                (done_button())
            }
        }
    }
}
