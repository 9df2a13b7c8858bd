use serde::Deserialize;

/// Event whose form is shown when `DEFAULT_EVENT_ID` is unset.
pub const DEFAULT_EVENT_ID: &str = "1";

#[derive(Debug, Clone, Deserialize)]
pub struct FormConfig {
    pub app_env: String,
    pub log_level: String,
    pub default_event_id: String,
}

impl FormConfig {
    /// Load from the environment (and a `.env` file, if present).
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::default())
    }

    fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let cfg = config::Config::builder()
            .set_default("app_env", "development")?
            .set_default("log_level", "info")?
            .set_default("default_event_id", DEFAULT_EVENT_ID)?
            .add_source(source)
            .build()?;
        cfg.try_deserialize()
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            app_env: "development".to_string(),
            log_level: "info".to_string(),
            default_event_id: DEFAULT_EVENT_ID.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::default().source(Some(map))
    }

    #[test]
    fn falls_back_to_default_event() {
        let config = FormConfig::from_source(env(&[])).unwrap();
        assert_eq!(config.default_event_id, DEFAULT_EVENT_ID);
        assert_eq!(config.log_level, "info");
        assert!(!config.is_production());
    }

    #[test]
    fn event_id_from_environment() {
        let config = FormConfig::from_source(env(&[
            ("DEFAULT_EVENT_ID", "7"),
            ("APP_ENV", "Production"),
        ]))
        .unwrap();
        assert_eq!(config.default_event_id, "7");
        assert!(config.is_production());
    }
}
