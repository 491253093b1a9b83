// Library root
// -----------
// The binary (`main.rs`) parses arguments and hands them to `run`.
//
// Module responsibilities:
// - `credential`: credential type and the curl-snippet parser.
// - `store`: key-value persistence and the typed credential entry.
// - `api`: HTTP calls to the Blinko instance (probe, upsert).
// - `compose`: note draft, tag list and submission.
// - `app`: the configure/settings use cases, UI-free.
// - `ui`: terminal screens built on `dialoguer`.
pub mod api;
pub mod app;
pub mod cli;
pub mod compose;
pub mod credential;
pub mod error;
pub mod store;
pub mod testing;
pub mod ui;

use anyhow::Result;
use api::ApiClient;
use cli::{Args, Command};
use std::time::Duration;
use store::{default_store_path, FileStore};
use tracing::debug;

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting blinko");

    let path = args.store.clone().unwrap_or_else(default_store_path);
    let mut store = FileStore::new(path);
    let api = ApiClient::new(Duration::from_secs(args.timeout))?;

    match args.command {
        None => ui::popup(&mut store, &api),
        Some(Command::Setup { snippet }) => {
            ui::config_screen(&mut store, &api, snippet)?;
            Ok(())
        }
        Some(Command::Settings { instance, token }) => {
            ui::settings_screen(&mut store, &api, instance, token)
        }
        Some(Command::Save { body, tags }) => ui::save_once(&mut store, &api, body, &tags),
        Some(Command::Status) => ui::status(&mut store),
    }
}
