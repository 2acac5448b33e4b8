//! OAuth2 installed-app flow for the Google Tasks API, fully synchronous.
//!
//! Client secrets live at `<config dir>/credentials.json` (the standard
//! `{"installed": {...}}` download from Google Cloud Console). Granted
//! tokens are cached at `<config dir>/token.json` and refreshed in place
//! when the access token expires.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::remote::RemoteError;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SCOPE: &str = "https://www.googleapis.com/auth/tasks";
const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Refresh this long before the recorded expiry, to absorb clock skew
/// and the round trip itself.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct SecretsFile {
    installed: ClientSecrets,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    pub client_id: String,
    pub client_secret: String,
}

/// The cached grant, persisted as token.json
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expiry: DateTime<Utc>,
}

impl StoredToken {
    fn is_fresh(&self) -> bool {
        self.expiry - Duration::seconds(EXPIRY_MARGIN_SECS) > Utc::now()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    expires_in: i64,
}

/// Return a valid access token, refreshing or re-authorizing as needed.
pub fn access_token(http: &Client, config_dir: &Path) -> Result<String, RemoteError> {
    let token_path = config_dir.join("token.json");

    if let Some(cached) = read_token(&token_path) {
        if cached.is_fresh() {
            return Ok(cached.access_token);
        }
        if let Some(refresh) = cached.refresh_token.clone() {
            let secrets = load_secrets(config_dir)?;
            // A dead refresh token (revoked grant) falls through to a
            // fresh authorization instead of failing outright.
            if let Ok(token) = refresh_grant(http, &secrets, &refresh) {
                write_token(&token_path, &token)?;
                return Ok(token.access_token);
            }
        }
    }

    let secrets = load_secrets(config_dir)?;
    let token = authorize_interactive(http, &secrets)?;
    write_token(&token_path, &token)?;
    Ok(token.access_token)
}

/// Load the OAuth client secrets file, with setup instructions on miss
pub fn load_secrets(config_dir: &Path) -> Result<ClientSecrets, RemoteError> {
    let path = config_dir.join("credentials.json");
    let text = fs::read_to_string(&path)
        .map_err(|_| RemoteError::MissingCredentials { path: path.clone() })?;
    let file: SecretsFile = serde_json::from_str(&text).map_err(|e| {
        RemoteError::Auth(format!("malformed credentials file {}: {}", path.display(), e))
    })?;
    Ok(file.installed)
}

fn read_token(path: &Path) -> Option<StoredToken> {
    let text = fs::read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

fn write_token(path: &Path, token: &StoredToken) -> Result<(), RemoteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RemoteError::TokenWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    let text = serde_json::to_string_pretty(token)
        .map_err(|e| RemoteError::Auth(format!("cannot serialize token: {}", e)))?;
    fs::write(path, text).map_err(|e| RemoteError::TokenWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Exchange a refresh token for a new access token
fn refresh_grant(
    http: &Client,
    secrets: &ClientSecrets,
    refresh_token: &str,
) -> Result<StoredToken, RemoteError> {
    let resp = http
        .post(TOKEN_URL)
        .form(&[
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ])
        .send()?;
    let token = parse_token_response(resp)?;
    Ok(StoredToken {
        access_token: token.access_token,
        // Refresh responses usually omit the refresh token; keep the old one
        refresh_token: token.refresh_token.or_else(|| Some(refresh_token.to_string())),
        expiry: Utc::now() + Duration::seconds(token.expires_in),
    })
}

/// First-time authorization: print the consent URL, read the pasted code
/// from stdin, and exchange it for a grant.
fn authorize_interactive(
    http: &Client,
    secrets: &ClientSecrets,
) -> Result<StoredToken, RemoteError> {
    let consent_url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
        AUTH_URL, secrets.client_id, REDIRECT_URI, SCOPE
    );

    eprintln!("Authorize rota in your browser:\n\n  {}\n", consent_url);
    eprint!("Paste the authorization code here: ");
    std::io::stderr()
        .flush()
        .map_err(|e| RemoteError::Auth(e.to_string()))?;

    let mut code = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut code)
        .map_err(|e| RemoteError::Auth(format!("cannot read authorization code: {}", e)))?;
    let code = code.trim();
    if code.is_empty() {
        return Err(RemoteError::Auth("no authorization code entered".to_string()));
    }

    let resp = http
        .post(TOKEN_URL)
        .form(&[
            ("client_id", secrets.client_id.as_str()),
            ("client_secret", secrets.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", REDIRECT_URI),
            ("grant_type", "authorization_code"),
        ])
        .send()?;
    let token = parse_token_response(resp)?;
    Ok(StoredToken {
        access_token: token.access_token,
        refresh_token: token.refresh_token,
        expiry: Utc::now() + Duration::seconds(token.expires_in),
    })
}

fn parse_token_response(
    resp: reqwest::blocking::Response,
) -> Result<TokenResponse, RemoteError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().unwrap_or_default();
        return Err(RemoteError::Auth(format!(
            "token endpoint returned HTTP {}: {}",
            status, body
        )));
    }
    resp.json()
        .map_err(|e| RemoteError::Auth(format!("malformed token response: {}", e)))
}

/// The token.json path for a given config dir (used by tests and doctors)
pub fn token_path(config_dir: &Path) -> PathBuf {
    config_dir.join("token.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_token_freshness() {
        let fresh = StoredToken {
            access_token: "t".into(),
            refresh_token: None,
            expiry: Utc::now() + Duration::hours(1),
        };
        assert!(fresh.is_fresh());

        let stale = StoredToken {
            access_token: "t".into(),
            refresh_token: None,
            expiry: Utc::now() + Duration::seconds(30),
        };
        // Inside the refresh margin counts as expired
        assert!(!stale.is_fresh());
    }

    #[test]
    fn test_secrets_file_shape() {
        let secrets: SecretsFile = serde_json::from_str(
            r#"{"installed": {"client_id": "abc.apps.googleusercontent.com",
                 "client_secret": "s3cret",
                 "redirect_uris": ["urn:ietf:wg:oauth:2.0:oob"]}}"#,
        )
        .unwrap();
        assert_eq!(secrets.installed.client_secret, "s3cret");
    }

    #[test]
    fn test_token_round_trip_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = token_path(dir.path());
        let token = StoredToken {
            access_token: "at".into(),
            refresh_token: Some("rt".into()),
            expiry: Utc::now(),
        };
        write_token(&path, &token).unwrap();
        let loaded = read_token(&path).unwrap();
        assert_eq!(loaded.access_token, "at");
        assert_eq!(loaded.refresh_token.as_deref(), Some("rt"));
    }
}
