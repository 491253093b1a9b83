// UI layer: the popup screens rendered as interactive `dialoguer` prompts.
// Each screen delegates to `app` / `compose` and only decides presentation.

use crate::api::BlinkoApi;
use crate::app;
use crate::compose::{Composer, SubmissionResult, SUCCESS_CONFIRM_DELAY};
use crate::credential::Credential;
use crate::error::BlinkoError;
use crate::store::{CredentialStore, FileStore, KeyValueStore};
use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::Duration;
use tracing::error;

/// Placeholder shown on the config screen: the snippet the Blinko API
/// documentation hands out.
const SNIPPET_HINT: &str = "curl -X 'POST' 'https://blinko.example.com/api/v1/note/upsert' \\
     -H 'Content-Type: application/json' \\
     -H 'Authorization: Bearer secret' \\
     -d '{ \"content\": \"Hello, Blinko!\", \"type\":0 }'";

/// Spinner shown while a request is in flight.
fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

/// Entry flow: configure first if nothing is stored, then compose.
pub fn popup(store: &mut dyn KeyValueStore, api: &dyn BlinkoApi) -> Result<()> {
    if !app::is_configured(store)? && config_screen(store, api, None)?.is_none() {
        return Ok(());
    }
    compose_screen(store, api)
}

/// First-run screen. With `snippet` set the screen runs once and fails on
/// bad input; otherwise the user may retry until it passes or they give up.
pub fn config_screen(
    store: &mut dyn KeyValueStore,
    api: &dyn BlinkoApi,
    snippet: Option<String>,
) -> Result<Option<Credential>> {
    let interactive = snippet.is_none();
    let mut snippet = snippet;
    loop {
        let text = match snippet.take() {
            Some(text) => text,
            None => read_snippet()?,
        };

        let pb = spinner("Validating...")?;
        let result = app::configure_from_snippet(store, api, &text);
        pb.finish_and_clear();

        match result {
            Ok(credential) => {
                println!("Connected to {}", credential.instance_url);
                return Ok(Some(credential));
            }
            Err(e @ (BlinkoError::ParseFailure | BlinkoError::ValidationFailure)) => {
                if !interactive {
                    bail!(e);
                }
                println!("{}", e);
                if !Confirm::new().with_prompt("Try again?").default(true).interact()? {
                    return Ok(None);
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Multi-line paste: lines are collected until an empty one.
fn read_snippet() -> Result<String> {
    println!("Configure the Blinko open API. Paste the curl example, e.g.:");
    println!("{}", SNIPPET_HINT);
    println!("Finish with an empty line.");
    let mut lines = Vec::new();
    loop {
        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// Settings screen. When both values are passed on the command line the
/// update runs without prompts.
pub fn settings_screen(
    store: &mut dyn KeyValueStore,
    api: &dyn BlinkoApi,
    instance: Option<String>,
    token: Option<String>,
) -> Result<()> {
    if let (Some(instance), Some(token)) = (&instance, &token) {
        let credential = Credential::new(instance.trim(), token.trim());
        let pb = spinner("Updating...")?;
        let result = app::update_settings(store, api, &credential);
        pb.finish_and_clear();
        result?;
        println!("Configuration updated");
        return Ok(());
    }

    loop {
        let stored = CredentialStore::new(store).get()?.unwrap_or_default();

        let instance: String = match &instance {
            Some(value) => value.clone(),
            None => Input::new()
                .with_prompt("blinko instance address")
                .with_initial_text(stored.instance_url.clone())
                .allow_empty(true)
                .interact_text()?,
        };
        let token: String = match &token {
            Some(value) => value.clone(),
            None => {
                let entered = Password::new()
                    .with_prompt("blinko access token (empty keeps current)")
                    .allow_empty_password(true)
                    .interact()?;
                if entered.is_empty() {
                    stored.access_token.clone()
                } else {
                    entered
                }
            }
        };

        let items = vec!["update", "cancel"];
        let selection = Select::new().items(&items).default(0).interact()?;
        if selection == 1 {
            println!("Changes discarded");
            return Ok(());
        }

        let credential = Credential::new(instance.trim(), token.trim());
        let pb = spinner("Updating...")?;
        let result = app::update_settings(store, api, &credential);
        pb.finish_and_clear();
        match result {
            Ok(()) => {
                println!("Configuration updated");
                return Ok(());
            }
            Err(BlinkoError::ValidationFailure) => println!("{}", BlinkoError::ValidationFailure),
            Err(e) => return Err(e.into()),
        }
    }
}

/// Note compose screen: body, tag chips, save/reset.
pub fn compose_screen(store: &mut dyn KeyValueStore, api: &dyn BlinkoApi) -> Result<()> {
    let mut credential = app::load_credential(store)?;
    let mut composer = Composer::new();

    loop {
        print_draft(&composer);
        let items = vec![
            "Edit content",
            "Add tag",
            "Remove tag",
            "Save",
            "Reset",
            "Settings",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                let body: String = Input::new()
                    .with_prompt("content")
                    .with_initial_text(composer.draft().body.clone())
                    .allow_empty(true)
                    .interact_text()?;
                composer.set_body(body);
            }
            1 => {
                let text: String = Input::new()
                    .with_prompt("tag")
                    .allow_empty(true)
                    .interact_text()?;
                composer.add_tag(&text);
            }
            2 => {
                let tags = composer.draft().tags.clone();
                if tags.is_empty() {
                    continue;
                }
                let labels: Vec<&str> = tags.iter().map(|t| t.text.as_str()).collect();
                let index = Select::new().with_prompt("remove").items(&labels).interact()?;
                composer.remove_tag(tags[index].id);
            }
            3 => {
                let Some(note) = composer.begin_submit() else {
                    continue;
                };
                let pb = spinner("Saving...")?;
                let outcome = api.upsert_note(&credential, &note);
                pb.finish_and_clear();
                let result = composer.finish_submit(outcome);
                match result {
                    SubmissionResult::Success => {
                        let pb = spinner("Saved successfully")?;
                        thread::sleep(SUCCESS_CONFIRM_DELAY);
                        pb.finish_and_clear();
                    }
                    // Not shown on screen; the draft stays for another try.
                    SubmissionResult::Failure(reason) => error!(%reason, "Failed to save note"),
                }
            }
            4 => composer.reset(),
            5 => {
                settings_screen(store, api, None, None)?;
                credential = app::load_credential(store)?;
            }
            6 => break,
            _ => {}
        }
    }
    Ok(())
}

fn print_draft(composer: &Composer) {
    let draft = composer.draft();
    let tags: Vec<String> = draft.tags.iter().map(|t| format!("[{}]", t.text)).collect();
    println!();
    println!("tags: {}", tags.join(" "));
    println!("content: {}", draft.body);
}

/// One-shot save used by the `save` subcommand.
pub fn save_once(
    store: &mut dyn KeyValueStore,
    api: &dyn BlinkoApi,
    body: String,
    tags: &[String],
) -> Result<()> {
    let credential = match app::load_credential(store) {
        Ok(credential) => credential,
        Err(BlinkoError::NotConfigured) => {
            bail!("blinko is not configured, run `blinko setup` first")
        }
        Err(e) => return Err(e.into()),
    };

    let mut composer = Composer::new();
    for tag in tags {
        composer.add_tag(tag);
    }
    composer.set_body(body);

    match composer.submit(api, &credential) {
        SubmissionResult::Success => {
            println!("Saved");
            Ok(())
        }
        SubmissionResult::Failure(reason) => bail!(reason),
    }
}

pub fn status(store: &mut FileStore) -> Result<()> {
    println!("store: {}", store.path().display());
    match CredentialStore::new(store).get()? {
        Some(credential) => println!("configured: {}", credential.instance_url),
        None => println!("not configured"),
    }
    Ok(())
}
