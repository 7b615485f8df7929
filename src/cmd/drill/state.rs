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

use std::sync::Arc;
use std::sync::Mutex;

use flashdeck_core::quiz::Quiz;
use flashdeck_core::viewer::Viewer;
use tokio::sync::oneshot::Sender;

#[derive(Clone)]
pub struct ServerState {
    pub set_id: i64,
    pub set_name: String,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

impl ServerState {
    /// Ask the server to stop after the current request.
    pub fn shutdown(&self) {
        if let Some(tx) = self.shutdown_tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
    }
}

pub struct MutableState {
    pub activity: Activity,
    /// Shown once, on the next page load, before the next question.
    pub feedback: Option<Feedback>,
    /// The user pressed "Done".
    pub finished: bool,
}

pub enum Activity {
    Study(Viewer),
    Quiz(Quiz),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Feedback {
    Correct,
    Incorrect,
}
