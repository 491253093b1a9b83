// src/app.rs
//
// Use cases behind the three screens, free of any terminal I/O.

use crate::api::BlinkoApi;
use crate::credential::{parse_api_input, Credential, ParseOutcome};
use crate::error::{BlinkoError, Result};
use crate::store::{CredentialStore, KeyValueStore};
use tracing::{info, warn};

/// First-run configuration: parse the pasted snippet, probe the instance,
/// and persist the credential only if the probe passes.
pub fn configure_from_snippet(
    store: &mut dyn KeyValueStore,
    api: &dyn BlinkoApi,
    text: &str,
) -> Result<Credential> {
    let credential = match parse_api_input(text) {
        ParseOutcome::Parsed(credential) => credential,
        ParseOutcome::Unparseable => {
            warn!("Pasted API snippet could not be parsed");
            return Err(BlinkoError::ParseFailure);
        }
    };
    save_validated(store, api, &credential)?;
    Ok(credential)
}

/// Settings update with manually entered values.
pub fn update_settings(
    store: &mut dyn KeyValueStore,
    api: &dyn BlinkoApi,
    credential: &Credential,
) -> Result<()> {
    if !credential.is_complete() {
        return Err(BlinkoError::ValidationFailure);
    }
    save_validated(store, api, credential)
}

/// The stored credential, or `NotConfigured`.
pub fn load_credential(store: &mut dyn KeyValueStore) -> Result<Credential> {
    CredentialStore::new(store)
        .get()?
        .ok_or(BlinkoError::NotConfigured)
}

pub fn is_configured(store: &mut dyn KeyValueStore) -> Result<bool> {
    CredentialStore::new(store).is_configured()
}

fn save_validated(
    store: &mut dyn KeyValueStore,
    api: &dyn BlinkoApi,
    credential: &Credential,
) -> Result<()> {
    if !api.probe(credential) {
        return Err(BlinkoError::ValidationFailure);
    }
    CredentialStore::new(store).set(credential)?;
    info!(instance = %credential.instance_url, "Saved blinko configuration");
    Ok(())
}
