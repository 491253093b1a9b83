// Credential model and the parser for pasted curl snippets.
//
// The Blinko web UI documents its open API with a curl example. Users paste
// that example verbatim, so the parser only has to find two things in it:
// the https origin of the instance and the bearer token.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Instance URL plus access token. Field names on disk follow the
/// `blinkoConfig` layout so existing stored values stay readable.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Credential {
    #[serde(rename = "blinkoInstance")]
    pub instance_url: String,
    #[serde(rename = "blinkoToken")]
    pub access_token: String,
}

impl Credential {
    pub fn new(instance_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            instance_url: instance_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Both fields must be non-empty before the credential may be stored.
    pub fn is_complete(&self) -> bool {
        !self.instance_url.trim().is_empty() && !self.access_token.trim().is_empty()
    }

    /// Join an API path onto the instance URL, tolerating a trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.instance_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Outcome of [`parse_api_input`]. Unparseable input is a normal result,
/// not an error, so the caller can show a message and let the user retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(Credential),
    Unparseable,
}

impl ParseOutcome {
    pub fn into_credential(self) -> Option<Credential> {
        match self {
            ParseOutcome::Parsed(credential) => Some(credential),
            ParseOutcome::Unparseable => None,
        }
    }
}

lazy_static! {
    static ref INSTANCE_REGEX: Regex = Regex::new(r#"https://[^/\s'"]+"#)
        .expect("Failed to compile instance regex");

    static ref TOKEN_REGEX: Regex = Regex::new(r#"Bearer\s+([^\s'"]+)"#)
        .expect("Failed to compile token regex");
}

/// Extract the first https origin and the first `Bearer <token>` from free
/// text. The `Bearer` keyword is case-sensitive. The token ends at
/// whitespace or a quote character.
pub fn parse_api_input(input: &str) -> ParseOutcome {
    let instance = INSTANCE_REGEX.find(input);
    let token = TOKEN_REGEX.captures(input).and_then(|caps| caps.get(1));

    match (instance, token) {
        (Some(instance), Some(token)) => ParseOutcome::Parsed(Credential::new(
            instance.as_str(),
            token.as_str(),
        )),
        _ => ParseOutcome::Unparseable,
    }
}
