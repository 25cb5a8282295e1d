/// Default Steam Web API base URL.
pub const DEFAULT_API_URL: &str = "https://api.steampowered.com";

/// Default source of the English paintkit names.
pub const DEFAULT_PAINTKITS_URL: &str = "https://raw.githubusercontent.com/SteamDatabase/GameTracking-TF2/master/tf/resource/tf_proto_obj_defs_english.txt";

/// Steam Web API configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SteamConfig {
    /// Web API key. Fetches fail with a configuration error when unset.
    pub api_key: Option<String>,
    /// Base URL without a trailing slash.
    pub api_url: String,
    /// Language the schema is fetched in.
    pub language: String,
    /// URL of the protobuf definition token file.
    pub paintkits_url: String,
}

impl SteamConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default                             |
    /// |-------------------|-------------------------------------|
    /// | `STEAM_API_KEY`   | unset                               |
    /// | `STEAM_API_URL`   | `https://api.steampowered.com`      |
    /// | `SCHEMA_LANGUAGE` | `English`                           |
    /// | `PAINTKITS_URL`   | SteamDatabase English proto defs    |
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup("STEAM_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let api_url = lookup("STEAM_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let language = lookup("SCHEMA_LANGUAGE").unwrap_or_else(|| "English".into());

        let paintkits_url =
            lookup("PAINTKITS_URL").unwrap_or_else(|| DEFAULT_PAINTKITS_URL.into());

        Self {
            api_key,
            api_url,
            language,
            paintkits_url,
        }
    }

    /// Defaults with the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.into(),
            language: "English".into(),
            paintkits_url: DEFAULT_PAINTKITS_URL.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> SteamConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SteamConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]);
        assert_eq!(config.api_key, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.language, "English");
        assert_eq!(config.paintkits_url, DEFAULT_PAINTKITS_URL);
    }

    #[test]
    fn key_is_trimmed_and_blank_key_is_unset() {
        assert_eq!(
            load(&[("STEAM_API_KEY", "  ABC123\n")]).api_key.as_deref(),
            Some("ABC123")
        );
        assert_eq!(load(&[("STEAM_API_KEY", "   ")]).api_key, None);
        assert_eq!(load(&[("STEAM_API_KEY", "")]).api_key, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("STEAM_API_URL", "http://localhost:8080//"),
            ("SCHEMA_LANGUAGE", "German"),
            ("PAINTKITS_URL", "http://localhost:8080/proto.txt"),
        ]);
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.language, "German");
        assert_eq!(config.paintkits_url, "http://localhost:8080/proto.txt");
    }

    #[test]
    fn with_api_key_keeps_defaults() {
        let config = SteamConfig::with_api_key("KEY");
        assert_eq!(config.api_key.as_deref(), Some("KEY"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
