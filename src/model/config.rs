use serde::{Deserialize, Serialize};

/// Persisted user configuration (config.toml in the config directory).
///
/// The only state rota keeps between invocations: which task list
/// commands operate on. Everything else is fetched fresh from the
/// service every time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// The active task list, set by `rt use`
    #[serde(default)]
    pub list_id: Option<String>,
}
