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

use flashdeck_core::error::Fallible;
use flashdeck_core::session::KeyValueStore;
use flashdeck_core::session::SessionStore;
use flashdeck_core::types::user::RegistrationForm;
use flashdeck_core::types::user::User;
use flashdeck_core::validate::validate_credentials;
use flashdeck_core::validate::validate_registration;

use crate::client::ApiClient;
use crate::cmd::Context;
use crate::utils::prompt_line;

/// Validate, exchange the credentials for a token, look up the user behind
/// it, and persist both.
pub async fn sign_in<S: KeyValueStore>(
    client: &ApiClient,
    store: &mut SessionStore<S>,
    login: &str,
    password: &str,
) -> Fallible<User> {
    validate_credentials(login, password)?;
    let token = client.login(login, password).await?;
    let user = client.current_user(&token).await?;
    store.save(token, user.clone())?;
    log::info!("Signed in as user {}", user.id);
    Ok(user)
}

/// Create the account, then sign in with it.
pub async fn sign_up<S: KeyValueStore>(
    client: &ApiClient,
    store: &mut SessionStore<S>,
    form: &RegistrationForm,
) -> Fallible<User> {
    validate_registration(form)?;
    client.register(form).await?;
    sign_in(client, store, &form.login, &form.password).await
}

fn password_or_prompt(password: Option<String>) -> Fallible<String> {
    match password {
        Some(password) => Ok(password),
        None => prompt_line("Password: "),
    }
}

pub async fn login(ctx: &mut Context, login: String, password: Option<String>) -> Fallible<()> {
    let password = password_or_prompt(password)?;
    let user = sign_in(&ctx.client, &mut ctx.store, &login, &password).await?;
    println!("Logged in as {}.", user.display_name());
    Ok(())
}

pub async fn register(
    ctx: &mut Context,
    name: String,
    surname: String,
    login: String,
    password: Option<String>,
) -> Fallible<()> {
    let form = RegistrationForm {
        name,
        surname,
        login,
        password: password_or_prompt(password)?,
    };
    let user = sign_up(&ctx.client, &mut ctx.store, &form).await?;
    println!("Registered and logged in as {}.", user.display_name());
    Ok(())
}

pub fn logout(ctx: &mut Context) -> Fallible<()> {
    let was_authenticated = ctx.store.session().is_authenticated();
    ctx.store.clear()?;
    if was_authenticated {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// Print the stored identity, refreshing it from the backend.
pub async fn whoami(ctx: &mut Context) -> Fallible<()> {
    let token = ctx.store.session().require_token()?.to_string();
    let user = ctx.client.current_user(&token).await?;
    if ctx.store.session().user() != Some(&user) {
        ctx.store.save(token, user.clone())?;
    }
    match &user.login {
        Some(login) => println!("{} ({login}), user id {}", user.display_name(), user.id),
        None => println!("{}, user id {}", user.display_name(), user.id),
    }
    Ok(())
}
