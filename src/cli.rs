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

use clap::Parser;
use clap::Subcommand;
use flashdeck_core::error::Fallible;
use flashdeck_core::types::card::Side;

use crate::cmd::Context;
use crate::cmd::auth;
use crate::cmd::drill::server::DrillMode;
use crate::cmd::drill::server::FrontSide;
use crate::cmd::drill::server::Listen;
use crate::cmd::drill::server::QuizDirection;
use crate::cmd::drill::server::drill_set;
use crate::cmd::sets;
use crate::config::Config;
use crate::utils::clock_rng;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the session database and config.toml.
    #[arg(long, global = true)]
    data_dir: Option<String>,
    /// Base URL of the flashcard backend, e.g. http://localhost:8080/api.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and remember the session.
    Login {
        #[arg(long)]
        login: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Create an account and log in with it.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        login: String,
        /// Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Browse and create flashcard sets.
    Sets {
        #[command(subcommand)]
        command: SetsCommand,
    },
    /// Flip through the cards of a set in the browser.
    Study {
        /// The set's id.
        id: i64,
        /// Which side to show first. By default, the last choice for this set.
        #[arg(long)]
        front: Option<FrontSide>,
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Take a multiple-choice quiz on a set in the browser.
    Quiz {
        /// The set's id.
        id: i64,
        /// Skip the direction prompt.
        #[arg(long)]
        direction: Option<QuizDirection>,
        #[command(flatten)]
        server: ServerArgs,
    },
}

#[derive(Subcommand)]
enum SetsCommand {
    /// List every set.
    List,
    /// List the sets you own.
    Mine,
    /// List the sets you opened recently.
    Recent,
    /// Print a set and its cards.
    Show {
        /// The set's id.
        id: i64,
    },
    /// Create a set from a TOML file.
    Create {
        /// Path to the set definition.
        file: String,
    },
}

#[derive(clap::Args)]
struct ServerArgs {
    /// The host address to bind to. Default is 127.0.0.1.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// The port to use for the web server. Default is 8000.
    #[arg(long, default_value_t = 8000)]
    port: u16,
    /// Whether to open the browser automatically. Default is true.
    #[arg(long)]
    open_browser: Option<bool>,
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    let config = Config::load(cli.data_dir, cli.api_url)?;
    let mut ctx = Context::open(&config)?;
    match cli.command {
        Command::Login { login, password } => auth::login(&mut ctx, login, password).await,
        Command::Register {
            name,
            surname,
            login,
            password,
        } => auth::register(&mut ctx, name, surname, login, password).await,
        Command::Logout => auth::logout(&mut ctx),
        Command::Whoami => auth::whoami(&mut ctx).await,
        Command::Sets { command } => match command {
            SetsCommand::List => sets::list_all(&ctx).await,
            SetsCommand::Mine => sets::list_mine(&ctx).await,
            SetsCommand::Recent => sets::list_recent(&ctx).await,
            SetsCommand::Show { id } => sets::show(&ctx, id).await,
            SetsCommand::Create { file } => sets::create(&ctx, file).await,
        },
        Command::Study { id, front, server } => {
            let front: Side = match front {
                Some(front) => front.into(),
                None => ctx.store.front_side(id),
            };
            let mode = DrillMode::Study { front };
            let report =
                drill_set(&ctx.client, &ctx.store, id, mode, server.into(), clock_rng()).await?;
            if let Some(side) = report.front_side {
                ctx.store.set_front_side(id, side)?;
            }
            Ok(())
        }
        Command::Quiz {
            id,
            direction,
            server,
        } => {
            let mode = DrillMode::Quiz {
                direction: direction.map(Into::into),
            };
            let report =
                drill_set(&ctx.client, &ctx.store, id, mode, server.into(), clock_rng()).await?;
            match report.quiz_errors {
                Some(errors) => println!("Quiz completed with {errors} errors."),
                None => println!("Quiz ended before completion."),
            }
            Ok(())
        }
    }
}

impl From<ServerArgs> for Listen {
    fn from(args: ServerArgs) -> Self {
        Listen {
            host: args.host,
            port: args.port,
            open_browser: args.open_browser.unwrap_or(true),
        }
    }
}
