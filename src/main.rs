#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when passing the parsed arguments along
#![allow(clippy::needless_pass_by_value)]

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::prelude::*;

use crate::cli::Cli;
use crate::cli::Command;
use crate::config::Config;
use crate::console::Console;
use crate::gateway::Gateway;
use crate::gateway::Http;
use crate::session::Session;
use crate::session::SessionFile;

mod board;
mod card;
mod cli;
mod config;
mod console;
mod error;
mod gateway;
mod notes;
mod notify;
mod render;
mod session;
mod store;
#[cfg(test)]
mod tests;
mod utils;
mod views;

const DEFAULT_RUST_LOG: &str = "fieldnote=info";

#[tokio::main]
async fn main() -> Result<ExitCode> {
    setup_environment();
    setup_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let session_file = SessionFile::new(config.session_file.clone());

    match cli.command {
        Command::Login {
            token,
            username,
            role,
        } => {
            let session = Session::new(token, username, role.into());
            session_file.save(&session)?;

            print!("{}", render::session(&session));
        }
        Command::Logout => {
            if !session_file.clear()? {
                println!("Not logged in");
            }
        }
        command => {
            let session = session::resolve(&config, &session_file)?;
            let gateway = Http::new(config.api_url.clone(), &session)?;
            let mut console = Console::new(session, gateway);

            let output = run(&mut console, command).await;
            print!("{output}");

            let notifications = console.notifications();
            let failed = notifications.has_errors();
            for notification in notifications.drain() {
                eprintln!("{notification}");
            }

            if failed {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Run a command against the backend, giving back what to print
async fn run<G>(console: &mut Console<G>, command: Command) -> String
where
    G: Gateway,
{
    match command {
        Command::Whoami => render::session(console.session()),
        Command::List {
            page,
            search,
            expanded,
        } => console.show(page.into_page(search), expanded).await,
        Command::Create {
            title,
            content,
            color,
            remind_at,
            pin,
            job_list,
            page,
        } => {
            let form = cli::note_form(title, content, color, remind_at, pin, job_list);

            console.create(page.into_page(None), form).await
        }
        Command::Edit {
            id,
            title,
            content,
            color,
            remind_at,
            no_reminder,
        } => {
            let changes = cli::note_changes(title, content, color, remind_at, no_reminder);

            console.edit(&cli::note_id(id), changes).await
        }
        Command::Content { id, content } => console.set_content(&cli::note_id(id), &content).await,
        Command::Pin { id } => console.toggle_pin(&cli::note_id(id)).await,
        Command::JobList { id } => console.toggle_job_list(&cli::note_id(id)).await,
        Command::Delete { id, yes } => console.delete(&cli::note_id(id), yes).await,
        Command::Remind { id, action, at } => match cli::reminder_action(action, at) {
            Ok(action) => console.reminder(&cli::note_id(id), action).await,
            Err(err) => {
                console.notifications().error(&err);
                String::new()
            }
        },
        Command::Login { .. } | Command::Logout => String::new(),
    }
}

fn setup_environment() {
    dotenvy::dotenv().ok();
}

fn setup_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::registry;

    registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_RUST_LOG.into()),
        ))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
