use std::time::Duration;

/// Default refresh interval: 24 hours.
const DEFAULT_REFRESH_SECS: i64 = 86_400;

/// How often the schema is re-fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshInterval {
    /// Never refresh; the snapshot is only replaced explicitly.
    Disabled,
    /// Refresh once the snapshot is this old.
    Every(Duration),
}

impl RefreshInterval {
    /// Interpret a number of seconds, where zero or a negative value
    /// disables refreshing.
    pub fn from_secs(secs: i64) -> Self {
        match u64::try_from(secs) {
            Ok(secs) if secs > 0 => Self::Every(Duration::from_secs(secs)),
            _ => Self::Disabled,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Disabled => None,
            Self::Every(interval) => Some(*interval),
        }
    }
}

impl Default for RefreshInterval {
    fn default() -> Self {
        Self::from_secs(DEFAULT_REFRESH_SECS)
    }
}

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Schema manager configuration.
#[derive(Debug, Clone, Default)]
pub struct ManagerConfig {
    pub refresh_interval: RefreshInterval,
}

impl ManagerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default |
    /// |-------------------------------|---------|
    /// | `SCHEMA_UPDATE_INTERVAL_SECS` | `86400` (`-1` or `0` disables) |
    pub fn from_env() -> Result<Self, ConfigError> {
        let refresh_interval =
            parse_interval(std::env::var("SCHEMA_UPDATE_INTERVAL_SECS").ok().as_deref())?;
        Ok(Self { refresh_interval })
    }
}

fn parse_interval(value: Option<&str>) -> Result<RefreshInterval, ConfigError> {
    let Some(value) = value else {
        return Ok(RefreshInterval::default());
    };

    value
        .trim()
        .parse::<i64>()
        .map(RefreshInterval::from_secs)
        .map_err(|_| ConfigError::Invalid {
            var: "SCHEMA_UPDATE_INTERVAL_SECS",
            expected: "an integer number of seconds",
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn default_is_daily() {
        assert_eq!(
            RefreshInterval::default(),
            RefreshInterval::Every(Duration::from_secs(86_400))
        );
    }

    #[test]
    fn non_positive_seconds_disable() {
        assert_eq!(RefreshInterval::from_secs(-1), RefreshInterval::Disabled);
        assert_eq!(RefreshInterval::from_secs(0), RefreshInterval::Disabled);
        assert_eq!(RefreshInterval::Disabled.as_duration(), None);
    }

    #[test]
    fn parses_env_value() {
        assert_eq!(
            parse_interval(Some(" 3600 ")).unwrap(),
            RefreshInterval::Every(Duration::from_secs(3600))
        );
        assert_eq!(parse_interval(Some("-1")).unwrap(), RefreshInterval::Disabled);
        assert_eq!(parse_interval(None).unwrap(), RefreshInterval::default());
    }

    #[test]
    fn rejects_non_numeric_value() {
        assert_matches!(
            parse_interval(Some("daily")),
            Err(ConfigError::Invalid { value, .. }) if value == "daily"
        );
    }
}
