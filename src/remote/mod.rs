pub mod auth;
pub mod client;

pub use client::TasksClient;

use std::path::PathBuf;

/// Error type for all remote-service operations. Nothing here is retried;
/// a failed call is fatal for the current invocation.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },
    #[error("authorization failed: {0}")]
    Auth(String),
    #[error(
        "missing OAuth credentials: {path}\n\n\
         To set up:\n\
         \x20 1. Go to https://console.cloud.google.com/\n\
         \x20 2. Create a project and enable the Google Tasks API\n\
         \x20 3. Create an OAuth 2.0 Client ID (Desktop app)\n\
         \x20 4. Download the JSON and save it as {path}"
    )]
    MissingCredentials { path: PathBuf },
    #[error("cannot write {path}: {source}")]
    TokenWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
