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

use std::fmt::Write;
use std::fs::read_to_string;

use flashdeck_core::error::Fallible;
use flashdeck_core::session::KeyValueStore;
use flashdeck_core::session::SessionStore;
use flashdeck_core::types::flashcard_set::FlashcardSet;
use flashdeck_core::types::flashcard_set::SetDefinition;
use flashdeck_core::types::last_seen::LastSeenFlashcardSet;
use flashdeck_core::types::user::User;
use flashdeck_core::validate::validate_new_set;

use crate::client::ApiClient;
use crate::cmd::Context;

/// The stored user, or the one behind the stored token.
async fn current_user<S: KeyValueStore>(
    client: &ApiClient,
    store: &SessionStore<S>,
) -> Fallible<User> {
    let token = store.session().require_token()?;
    match store.session().user() {
        Some(user) => Ok(user.clone()),
        None => client.current_user(token).await,
    }
}

pub async fn list_all(ctx: &Context) -> Fallible<()> {
    let token = ctx.store.session().require_token()?;
    let sets = ctx.client.list_sets(token).await?;
    print!("{}", render_sets(&sets));
    Ok(())
}

pub async fn list_mine(ctx: &Context) -> Fallible<()> {
    let user = current_user(&ctx.client, &ctx.store).await?;
    let token = ctx.store.session().require_token()?;
    let sets = ctx.client.list_owned_sets(token, user.id).await?;
    print!("{}", render_sets(&sets));
    Ok(())
}

pub async fn list_recent(ctx: &Context) -> Fallible<()> {
    let token = ctx.store.session().require_token()?;
    let seen = ctx.client.last_seen_sets(token).await;
    print!("{}", render_last_seen(&seen));
    Ok(())
}

pub async fn show(ctx: &Context, id: i64) -> Fallible<()> {
    let token = ctx.store.session().require_token()?;
    let set = ctx.client.get_set(token, id).await?;
    print!("{}", render_set(&set));
    Ok(())
}

pub async fn create(ctx: &Context, path: String) -> Fallible<()> {
    let set = create_from_file(&ctx.client, &ctx.store, &path).await?;
    println!(
        "Created set '{}' (id {}) with {} cards.",
        set.name,
        set.id,
        set.cards.len()
    );
    Ok(())
}

/// Read a TOML set definition, check it, and upload it as a set owned by
/// the current user.
pub async fn create_from_file<S: KeyValueStore>(
    client: &ApiClient,
    store: &SessionStore<S>,
    path: &str,
) -> Fallible<FlashcardSet> {
    let content = read_to_string(path)?;
    let definition = SetDefinition::parse(&content)?;
    let user = current_user(client, store).await?;
    let payload = definition.into_new_set(user.id);
    validate_new_set(&payload)?;
    let token = store.session().require_token()?;
    client.create_set(token, &payload).await
}

fn render_sets(sets: &[FlashcardSet]) -> String {
    if sets.is_empty() {
        return "No flashcard sets.\n".to_string();
    }
    let mut out = String::new();
    for set in sets {
        let _ = writeln!(out, "{:>6}  {}", set.id, set.name);
    }
    out
}

fn render_last_seen(entries: &[LastSeenFlashcardSet]) -> String {
    if entries.is_empty() {
        return "No recently seen sets.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:>6}  {}  (opened {})",
            entry.flashcard_set_id,
            entry.flashcard_set_name,
            entry.opened_at.short()
        );
    }
    out
}

fn render_set(set: &FlashcardSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} (id {})", set.name, set.id);
    if !set.description.is_empty() {
        let _ = writeln!(out, "{}", set.description);
    }
    let _ = writeln!(out);
    if set.cards.is_empty() {
        let _ = writeln!(out, "This set has no cards.");
    }
    for (i, card) in set.cards.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}: {}", i + 1, card.term, card.definition);
    }
    out
}
