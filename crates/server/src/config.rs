use shared_types::{AppConfig, FeatureFlags, SessionSettings};
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml` and store it in the global `OnceLock`.
/// Safe to call multiple times. Only the first call has effect.
///
/// If the file is missing or unparseable, every flag is off and session
/// lifetimes use their defaults.
pub fn load_config() {
    CONFIG.get_or_init(|| match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => {
            let config = parse_config(&contents);
            tracing::info!(features = ?config.features, session = ?config.session, "Loaded {CONFIG_PATH}");
            config
        }
        Err(e) => {
            tracing::warn!(%e, "{CONFIG_PATH} not found, defaulting all flags off");
            AppConfig::default()
        }
    });
}

/// Parse config file contents, falling back to defaults on a syntax error.
pub fn parse_config(contents: &str) -> AppConfig {
    toml::from_str(contents).unwrap_or_else(|e| {
        tracing::warn!(%e, "Failed to parse {CONFIG_PATH}, defaulting all flags off");
        AppConfig::default()
    })
}

fn config() -> &'static AppConfig {
    static FALLBACK: OnceLock<AppConfig> = OnceLock::new();
    CONFIG
        .get()
        .unwrap_or_else(|| FALLBACK.get_or_init(AppConfig::default))
}

/// Get the loaded feature flags. Returns all-false defaults if
/// `load_config()` hasn't been called yet.
pub fn feature_flags() -> &'static FeatureFlags {
    &config().features
}

pub fn session_settings() -> &'static SessionSettings {
    &config().session
}
