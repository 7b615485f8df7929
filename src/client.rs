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

//! HTTP client for the flashcard backend.

use flashdeck_core::error::ErrorKind;
use flashdeck_core::error::ErrorReport;
use flashdeck_core::error::Fallible;
use flashdeck_core::types::flashcard_set::FlashcardSet;
use flashdeck_core::types::flashcard_set::NewFlashcardSet;
use flashdeck_core::types::last_seen::LastSeenFlashcardSet;
use flashdeck_core::types::user::RegistrationForm;
use flashdeck_core::types::user::User;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// How a non-success status of a given call is classified.
#[derive(Clone, Copy, PartialEq)]
enum Call {
    /// Any client error means bad credentials.
    Login,
    /// A 404 means the requested resource is missing.
    Lookup,
    Plain,
}

#[derive(Serialize)]
struct Credentials<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        log::debug!("{method} {path}");
        let request = self.http.request(method, format!("{}{path}", self.base_url));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, call: Call, fallback: &str) -> Fallible<Response> {
        self.send_with(request, call, |status| format!("{fallback} ({status})"))
            .await
    }

    /// Like `send`, but the message for an empty error body depends on the
    /// status.
    async fn send_with(
        &self,
        request: RequestBuilder,
        call: Call,
        fallback: impl FnOnce(StatusCode) -> String,
    ) -> Fallible<Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = server_message(&body).unwrap_or_else(|| fallback(status));
        log::debug!("Request failed with {status}: {message}");
        Err(ErrorReport::with_kind(classify(status, call), message))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        call: Call,
        fallback: &str,
    ) -> Fallible<T> {
        let request = self.request(Method::GET, path, Some(token));
        let response = self.send(request, call, fallback).await?;
        response.json().await.map_err(transport_error)
    }

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, login: &str, password: &str) -> Fallible<String> {
        let request = self
            .request(Method::POST, "/auth/login", None)
            .json(&Credentials { login, password });
        let response = self.send(request, Call::Login, "Login failed").await?;
        let body = response.text().await.map_err(transport_error)?;
        match parse_token(&body) {
            Some(token) => Ok(token),
            None => Err(ErrorReport::auth("Login failed: the server sent no token")),
        }
    }

    pub async fn register(&self, form: &RegistrationForm) -> Fallible<User> {
        let request = self
            .request(Method::POST, "/auth/registration", None)
            .json(form);
        let response = match self.send(request, Call::Plain, "Registration failed").await {
            Ok(response) => response,
            Err(e) if is_duplicate_login(e.message()) => {
                return Err(ErrorReport::with_kind(
                    e.kind(),
                    format!("A user with login '{}' already exists", form.login),
                ));
            }
            Err(e) => return Err(e),
        };
        response.json().await.map_err(transport_error)
    }

    pub async fn current_user(&self, token: &str) -> Fallible<User> {
        self.get_json("/users/currentUser", token, Call::Plain, "Could not load the current user")
            .await
    }

    pub async fn list_sets(&self, token: &str) -> Fallible<Vec<FlashcardSet>> {
        self.get_json("/flashcardSet", token, Call::Plain, "Could not load flashcard sets")
            .await
    }

    pub async fn list_owned_sets(&self, token: &str, user_id: i64) -> Fallible<Vec<FlashcardSet>> {
        let path = format!("/flashcardSet/owner/{user_id}");
        self.get_json(&path, token, Call::Plain, "Could not load your flashcard sets")
            .await
    }

    pub async fn get_set(&self, token: &str, id: i64) -> Fallible<FlashcardSet> {
        let path = format!("/flashcardSet/{id}");
        let request = self.request(Method::GET, &path, Some(token));
        let response = self
            .send_with(request, Call::Lookup, |status| set_fallback(id, status))
            .await?;
        response.json().await.map_err(transport_error)
    }

    pub async fn create_set(&self, token: &str, payload: &NewFlashcardSet) -> Fallible<FlashcardSet> {
        let request = self
            .request(Method::POST, "/flashcardSet", Some(token))
            .json(payload);
        let response = self
            .send(request, Call::Plain, "Could not create the flashcard set")
            .await?;
        response.json().await.map_err(transport_error)
    }

    /// Recently opened sets. Failures are logged and yield an empty list.
    pub async fn last_seen_sets(&self, token: &str) -> Vec<LastSeenFlashcardSet> {
        let result: Fallible<Vec<LastSeenFlashcardSet>> = self
            .get_json(
                "/flashcardSet/LastSeenSets",
                token,
                Call::Plain,
                "Could not load recently seen sets",
            )
            .await;
        result.unwrap_or_else(|e| {
            log::warn!("{e}");
            Vec::new()
        })
    }
}

pub(crate) fn transport_error(e: reqwest::Error) -> ErrorReport {
    ErrorReport::network(format!("network error: {e}"))
}

fn set_fallback(id: i64, status: StatusCode) -> String {
    if status == StatusCode::NOT_FOUND {
        format!("Flashcard set {id} not found")
    } else {
        format!("Could not load flashcard set {id} ({status})")
    }
}

fn classify(status: StatusCode, call: Call) -> ErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::AuthFailure,
        StatusCode::NOT_FOUND if call == Call::Lookup => ErrorKind::NotFound,
        _ if call == Call::Login && status.is_client_error() => ErrorKind::AuthFailure,
        _ => ErrorKind::NetworkFailure,
    }
}

/// The message in an error body: either plain text or JSON `{"message": ...}`.
fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(String::from),
        Ok(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

/// The login endpoint answers with the bare token as text. Tolerate a JSON
/// string or a `{"token": ...}` object too.
fn parse_token(body: &str) -> Option<String> {
    let body = body.trim();
    let token = match serde_json::from_str::<Value>(body) {
        Ok(Value::String(s)) => s,
        Ok(Value::Object(map)) => map.get("token")?.as_str()?.to_string(),
        _ => body.to_string(),
    };
    if token.is_empty() { None } else { Some(token) }
}

fn is_duplicate_login(message: &str) -> bool {
    ["already exists", "unique constraint", "уже существует"]
        .iter()
        .any(|needle| message.contains(needle))
}

#[cfg(test)]
mod tests {
    use flashdeck_core::types::card::Card;

    use super::*;
    use crate::helper::BARE_NOT_FOUND_SET;
    use crate::helper::FAILING_SET;
    use crate::helper::MockBackend;

    #[test]
    fn test_server_message() {
        assert_eq!(server_message(""), None);
        assert_eq!(server_message("Bad login"), Some("Bad login".to_string()));
        assert_eq!(
            server_message(r#"{"message": "Bad login", "status": 401}"#),
            Some("Bad login".to_string())
        );
        assert_eq!(server_message(r#"{"error": "x"}"#), None);
        assert_eq!(server_message(r#""quoted""#), Some("quoted".to_string()));
    }

    #[test]
    fn test_parse_token() {
        assert_eq!(parse_token("abc.def\n"), Some("abc.def".to_string()));
        assert_eq!(parse_token(r#""abc""#), Some("abc".to_string()));
        assert_eq!(parse_token(r#"{"token": "abc"}"#), Some("abc".to_string()));
        assert_eq!(parse_token(""), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(StatusCode::BAD_REQUEST, Call::Login), ErrorKind::AuthFailure);
        assert_eq!(classify(StatusCode::NOT_FOUND, Call::Lookup), ErrorKind::NotFound);
        assert_eq!(classify(StatusCode::NOT_FOUND, Call::Plain), ErrorKind::NetworkFailure);
        assert_eq!(classify(StatusCode::FORBIDDEN, Call::Plain), ErrorKind::AuthFailure);
        assert_eq!(
            classify(StatusCode::INTERNAL_SERVER_ERROR, Call::Login),
            ErrorKind::NetworkFailure
        );
    }

    #[tokio::test]
    async fn test_login_and_current_user() -> Fallible<()> {
        let backend = MockBackend::start().await?;
        let client = ApiClient::new(backend.base_url());
        let token = client.login("ann", "secret").await?;
        let user = client.current_user(&token).await?;
        assert_eq!(user.name, "Ann");
        assert_eq!(user.login.as_deref(), Some("ann"));
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_credentials() -> Fallible<()> {
        let backend = MockBackend::start().await?;
        let client = ApiClient::new(backend.base_url());
        let err = client.login("ann", "wrong").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthFailure);
        assert_eq!(err.message(), "Invalid login or password");
        Ok(())
    }

    #[tokio::test]
    async fn test_requests_without_valid_token_fail() -> Fallible<()> {
        let backend = MockBackend::start().await?;
        let client = ApiClient::new(backend.base_url());
        let err = client.list_sets("bogus").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AuthFailure);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_and_duplicate() -> Fallible<()> {
        let backend = MockBackend::start().await?;
        let client = ApiClient::new(backend.base_url());
        let form = RegistrationForm {
            name: "Bob".to_string(),
            surname: "Ray".to_string(),
            login: "bob".to_string(),
            password: "pw".to_string(),
        };
        let user = client.register(&form).await?;
        assert_eq!(user.name, "Bob");
        let token = client.login("bob", "pw").await?;
        assert_eq!(client.current_user(&token).await?.id, user.id);

        let err = client.register(&form).await.unwrap_err();
        assert_eq!(err.message(), "A user with login 'bob' already exists");
        Ok(())
    }

    #[tokio::test]
    async fn test_sets() -> Fallible<()> {
        let backend = MockBackend::start().await?;
        let client = ApiClient::new(backend.base_url());
        let token = client.login("ann", "secret").await?;
        let user = client.current_user(&token).await?;

        let all = client.list_sets(&token).await?;
        assert_eq!(all.len(), 3);

        let payload = NewFlashcardSet {
            name: "Verbs".to_string(),
            description: "Irregular".to_string(),
            cards: vec![Card::new("go", "went"), Card::new("see", "saw")],
            user_id: user.id,
        };
        let created = client.create_set(&token, &payload).await?;
        assert_eq!(created.name, "Verbs");
        assert_eq!(created.user_id, Some(user.id));

        let fetched = client.get_set(&token, created.id).await?;
        assert_eq!(fetched.cards, payload.cards);

        let owned = client.list_owned_sets(&token, user.id).await?;
        assert_eq!(owned.len(), 4);
        assert_eq!(client.list_sets(&token).await?.len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_set_is_not_found() -> Fallible<()> {
        let backend = MockBackend::start().await?;
        let client = ApiClient::new(backend.base_url());
        let token = client.login("ann", "secret").await?;
        let err = client.get_set(&token, 404).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Flashcard set not found");
        Ok(())
    }

    #[test]
    fn test_set_fallback() {
        assert_eq!(set_fallback(7, StatusCode::NOT_FOUND), "Flashcard set 7 not found");
        assert_eq!(
            set_fallback(7, StatusCode::INTERNAL_SERVER_ERROR),
            "Could not load flashcard set 7 (500 Internal Server Error)"
        );
    }

    #[tokio::test]
    async fn test_get_set_without_error_body() -> Fallible<()> {
        let backend = MockBackend::start().await?;
        let client = ApiClient::new(backend.base_url());
        let token = client.login("ann", "secret").await?;

        let err = client.get_set(&token, BARE_NOT_FOUND_SET).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), format!("Flashcard set {BARE_NOT_FOUND_SET} not found"));

        let err = client.get_set(&token, FAILING_SET).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
        assert_eq!(
            err.message(),
            format!("Could not load flashcard set {FAILING_SET} (500 Internal Server Error)")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_last_seen_sets() -> Fallible<()> {
        let backend = MockBackend::start().await?;
        let client = ApiClient::new(backend.base_url());
        let token = client.login("ann", "secret").await?;
        assert!(client.last_seen_sets(&token).await.is_empty());

        client.get_set(&token, 1).await?;
        let seen = client.last_seen_sets(&token).await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].flashcard_set_id, 1);
        assert_eq!(seen[0].flashcard_set_name, "Capitals");

        // Failures are swallowed.
        assert!(client.last_seen_sets("bogus").await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_backend() -> Fallible<()> {
        let port = portpicker::pick_unused_port().unwrap();
        let client = ApiClient::new(format!("http://127.0.0.1:{port}/api"));
        let err = client.login("ann", "secret").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkFailure);
        Ok(())
    }
}
