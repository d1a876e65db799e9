use serde::Deserialize;
use std::env;

/// The public form-relay endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.web3forms.com/submit";

/// Relay access key. This is a public-relay token, not a secret: the relay
/// service issues keys meant to be shipped client-side. Overridable through
/// the config layer.
pub const PUBLIC_ACCESS_KEY: &str = "3333d230-1703-4f1f-a301-39c2b6a8c048";

#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    pub endpoint: String,
    pub access_key: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_key: PUBLIC_ACCESS_KEY.to_string(),
        }
    }
}

impl RelayConfig {
    /// Layered load: baked-in defaults, then optional config files, then
    /// environment overrides (e.g. `MESKEL_ACCESS_KEY`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("access_key", PUBLIC_ACCESS_KEY)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("MESKEL").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.access_key, PUBLIC_ACCESS_KEY);
    }

    #[test]
    fn test_load_without_files_falls_back_to_defaults() {
        let config = RelayConfig::load().unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }
}
