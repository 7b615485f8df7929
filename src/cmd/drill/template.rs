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

use std::time::Duration;

use maud::DOCTYPE;
use maud::Markup;
use maud::html;

/// Wrap a page body. With `refresh`, the browser reloads the page after
/// that long, which is how transient feedback gives way to the next screen.
pub fn page_template(title: &str, body: Markup, refresh: Option<Duration>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if let Some(delay) = refresh {
                    meta http-equiv="refresh" content=(delay.as_secs().max(1));
                }
                title { (title) " | flashdeck" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                (body)
            }
        }
    }
}
