//! Authentication and authorization configuration

use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use serde::{Deserialize, Serialize};

/// Secrets that must never make it past startup
const INSECURE_SECRETS: &[&str] = &["default-secret-key", "your-secret-key", "change-me"];

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Token signing secret
    pub jwt_secret: String,
    /// Token lifetime in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// Entity scoping configuration
    #[serde(default)]
    pub scope: ScopeConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_dev_secret(),
            jwt_expiration: default_jwt_expiration(),
            scope: ScopeConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.is_empty() {
            return Err("Token secret must be set to a secure value".to_string());
        }

        if INSECURE_SECRETS.contains(&self.jwt_secret.as_str()) {
            return Err(
                "Token secret must not use a default placeholder. Please generate a secure random secret.".to_string(),
            );
        }

        if self.jwt_secret.len() < 32 {
            return Err("Token secret must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration < 300 {
            return Err("Token expiration should be at least 5 minutes (300 seconds)".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err("Token expiration should not exceed 30 days".to_string());
        }

        Ok(())
    }
}

/// Entity scoping configuration
///
/// `allow_unbound_actors` names the policy for authenticated actors that are
/// not super admins and have no home entity: when true they fall through to
/// whatever the permission check already decided; when false every scoped
/// resource denies them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Whether entity-less actors pass ownership checks
    #[serde(default = "default_true")]
    pub allow_unbound_actors: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            allow_unbound_actors: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_jwt_expiration() -> u64 {
    // 7 days
    604_800
}

/// Generate a random secret for development defaults
fn generate_dev_secret() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "Test-Secret-That-Is-At-Least-32-Characters-Long-1".to_string(),
            jwt_expiration: 604_800,
            scope: ScopeConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_placeholder_secrets_rejected() {
        for placeholder in INSECURE_SECRETS {
            let config = AuthConfig {
                jwt_secret: placeholder.to_string(),
                ..valid_config()
            };
            assert!(config.validate().is_err(), "accepted {placeholder}");
        }
    }

    #[test]
    fn test_short_secret_rejected() {
        let config = AuthConfig {
            jwt_secret: "too-short".to_string(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_expiration_is_seven_days() {
        assert_eq!(AuthConfig::default().jwt_expiration, 7 * 24 * 60 * 60);
    }
}
