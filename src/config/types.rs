//! Configuration types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::db::default_database_path;
use crate::intercept::InterceptionPolicy;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub audit: AuditConfig,
    pub seed: SeedConfig,
}

/// Database location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the `SQLite` file.
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Default port for the HTTP server.
pub const DEFAULT_PORT: u16 = 8080;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable permissive CORS.
    pub cors_permissive: bool,
}

impl ServerConfig {
    /// The configured address as `host:port`.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            cors_permissive: false,
        }
    }
}

/// Interception rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Namespaces audited in full (layer-wide rule).
    pub layer_namespaces: Vec<String>,
    /// Extra action tags keyed `namespace::name` or bare `name`; overrides
    /// declared tags.
    pub actions: BTreeMap<String, String>,
    /// Record only the tagged entry when both rules match.
    pub dedupe_dual_match: bool,
}

impl AuditConfig {
    /// Build the interception policy described by this configuration.
    #[must_use]
    pub fn policy(&self) -> InterceptionPolicy {
        let mut policy = InterceptionPolicy::new();
        for namespace in &self.layer_namespaces {
            policy.add_layer_namespace(namespace.as_str());
        }
        for (operation, action) in &self.actions {
            policy.tag_operation(operation.as_str(), action.as_str());
        }
        policy.set_dedupe_dual_match(self.dedupe_dual_match);
        policy
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            layer_namespaces: vec![crate::users::operations::SERVICE_NAMESPACE.to_string()],
            actions: BTreeMap::new(),
            dedupe_dual_match: false,
        }
    }
}

/// Startup seed data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Load the sample users when the database has none.
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intercept::{MatchedRule, Operation};

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert!(config.database.path.ends_with("method-audit/audit.db"));
        assert_eq!(config.server.address(), "127.0.0.1:8080");
        assert!(!config.server.cors_permissive);
        assert_eq!(config.audit.layer_namespaces, vec!["service".to_string()]);
        assert!(config.audit.actions.is_empty());
        assert!(!config.audit.dedupe_dual_match);
        assert!(config.seed.enabled);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml = r#"
            [server]
            port = 9000

            [audit]
            dedupe_dual_match = true

            [audit.actions]
            performAction = "PERFORM_ACTION"
            "service::getAllUsers" = "LIST_USERS"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.audit.dedupe_dual_match);
        assert_eq!(
            config.audit.actions.get("performAction").map(String::as_str),
            Some("PERFORM_ACTION")
        );
        assert_eq!(
            config
                .audit
                .actions
                .get("service::getAllUsers")
                .map(String::as_str),
            Some("LIST_USERS")
        );
        assert_eq!(config.audit.layer_namespaces, vec!["service".to_string()]);
    }

    #[test]
    fn test_audit_config_builds_policy() {
        let mut audit = AuditConfig::default();
        audit
            .actions
            .insert("performAction".to_string(), "PERFORM_ACTION".to_string());

        let policy = audit.policy();
        let rules = policy.evaluate(&Operation::new("service", "performAction"));
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], MatchedRule::LayerWide);
        assert_eq!(rules[1].action(), Some("PERFORM_ACTION"));
    }

    #[test]
    fn test_empty_namespaces_disable_layer_rule() {
        let audit = AuditConfig {
            layer_namespaces: Vec::new(),
            ..AuditConfig::default()
        };
        assert!(audit
            .policy()
            .evaluate(&Operation::new("service", "performAction"))
            .is_empty());
    }
}
