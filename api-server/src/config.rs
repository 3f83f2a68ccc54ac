use snake_core::MoveRules;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_JSON_LIMIT: usize = 1_048_576; // 1MB

/// Server configuration, read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Movement rules applied to every validation request.
    pub rules: MoveRules,
    /// Maximum accepted JSON body size in bytes.
    pub json_limit: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            rules: MoveRules::default(),
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Reads `SNAKE_BIND_ADDRESS`, `SNAKE_MOVE_RULES` and `SNAKE_JSON_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(addr) = get("SNAKE_BIND_ADDRESS") {
            if addr.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    var: "SNAKE_BIND_ADDRESS",
                    reason: "must not be empty".into(),
                });
            }
            config.bind_address = addr.trim().to_string();
        }

        if let Some(rules) = get("SNAKE_MOVE_RULES") {
            config.rules = MoveRules::from_str(rules.trim()).map_err(|reason| ConfigError::Invalid {
                var: "SNAKE_MOVE_RULES",
                reason,
            })?;
        }

        if let Some(limit) = get("SNAKE_JSON_LIMIT") {
            config.json_limit = match limit.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "SNAKE_JSON_LIMIT",
                        reason: format!("expected a positive byte count, got '{}'", limit),
                    })
                }
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.rules, MoveRules::Classic);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("SNAKE_BIND_ADDRESS", "127.0.0.1:3000"),
            ("SNAKE_MOVE_RULES", "axis-aligned"),
            ("SNAKE_JSON_LIMIT", "4096"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:3000");
        assert_eq!(config.rules, MoveRules::AxisAligned);
        assert_eq!(config.json_limit, 4096);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ServerConfig::from_lookup(lookup(&[("SNAKE_MOVE_RULES", "diagonal")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("SNAKE_JSON_LIMIT", "0")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("SNAKE_JSON_LIMIT", "lots")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("SNAKE_BIND_ADDRESS", " ")])).is_err());
    }
}
