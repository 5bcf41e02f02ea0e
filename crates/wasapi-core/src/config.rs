//! Connection, auth, and logging settings for a [`WalletClient`](crate::rpc::WalletClient).
//!
//! Callers describe what they want with a [`PartialConfig`] and normalize it
//! once into an immutable [`Config`]. The extension map is spread over the
//! named fields last, so an extension key such as `"port"` wins over both the
//! default and an explicitly set `port`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::logging::LogSink;

pub const DEFAULT_JSON_RPC: &str = "2.0";
pub const DEFAULT_ID: &str = "1";
pub const DEFAULT_HOST: &str = "http://127.0.0.1";
pub const DEFAULT_PORT: u16 = 37128;

/// Free-form keys merged over the named configuration fields.
pub type Extensions = Map<String, Value>;

#[derive(Debug, Clone, Default)]
pub struct PartialConfig {
    pub json_rpc: Option<String>,
    pub id: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub verbose: Option<bool>,
    pub sink: Option<LogSink>,
    pub extensions: Extensions,
}

impl PartialConfig {
    /// Fill defaults, then apply the extension map.
    ///
    /// Fails only when an extension value cannot stand in for the named field
    /// it overrides (for example a string under `"port"`).
    pub fn normalize(self) -> Result<Config, CoreError> {
        let named = Fields {
            json_rpc: self.json_rpc.unwrap_or_else(|| DEFAULT_JSON_RPC.to_owned()),
            id: self.id.unwrap_or_else(|| DEFAULT_ID.to_owned()),
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            verbose: self.verbose.unwrap_or(false),
            extensions: Extensions::new(),
        };

        let mut merged = match serde_json::to_value(named) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(CoreError::InvalidConfig(format!(
                    "configuration serialized to non-object: {other}"
                )))
            }
            Err(e) => return Err(CoreError::InvalidConfig(e.to_string())),
        };
        merged.extend(self.extensions);

        let fields: Fields = serde_json::from_value(Value::Object(merged))
            .map_err(|e| CoreError::InvalidConfig(e.to_string()))?;

        Ok(Config {
            fields,
            sink: self.sink.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fields {
    json_rpc: String,
    id: String,
    host: String,
    port: u16,
    username: String,
    password: String,
    verbose: bool,
    #[serde(flatten)]
    extensions: Extensions,
}

/// Normalized, read-only client configuration.
#[derive(Clone)]
pub struct Config {
    fields: Fields,
    sink: LogSink,
}

impl Config {
    pub fn json_rpc(&self) -> &str {
        &self.fields.json_rpc
    }

    pub fn id(&self) -> &str {
        &self.fields.id
    }

    pub fn host(&self) -> &str {
        &self.fields.host
    }

    pub fn port(&self) -> u16 {
        self.fields.port
    }

    pub fn username(&self) -> &str {
        &self.fields.username
    }

    pub fn password(&self) -> &str {
        &self.fields.password
    }

    pub fn verbose(&self) -> bool {
        self.fields.verbose
    }

    pub fn sink(&self) -> &LogSink {
        &self.sink
    }

    /// Extension keys that did not override a named field.
    pub fn extensions(&self) -> &Extensions {
        &self.fields.extensions
    }

    /// `{host}:{port}`; the host is expected to carry its scheme.
    pub fn url(&self) -> String {
        format!("{}:{}", self.fields.host, self.fields.port)
    }

    /// Structured view of the configuration with the password masked.
    pub fn redacted(&self) -> Value {
        let mut fields = self.fields.clone();
        if !fields.password.is_empty() {
            fields.password = "***".to_owned();
        }
        serde_json::to_value(fields).unwrap_or(Value::Null)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fields: Fields {
                json_rpc: DEFAULT_JSON_RPC.to_owned(),
                id: DEFAULT_ID.to_owned(),
                host: DEFAULT_HOST.to_owned(),
                port: DEFAULT_PORT,
                username: String::new(),
                password: String::new(),
                verbose: false,
                extensions: Extensions::new(),
            },
            sink: LogSink::silent(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("json_rpc", &self.fields.json_rpc)
            .field("id", &self.fields.id)
            .field("host", &self.fields.host)
            .field("port", &self.fields.port)
            .field("username", &self.fields.username)
            .field("password", &"<redacted>")
            .field("verbose", &self.fields.verbose)
            .field("extensions", &self.fields.extensions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn extensions(value: Value) -> Extensions {
        match value {
            Value::Object(map) => map,
            _ => panic!("extensions fixture must be an object"),
        }
    }

    #[test]
    fn empty_partial_fills_every_default() {
        let config = PartialConfig::default().normalize().expect("defaults must normalize");
        assert_eq!(config.json_rpc(), "2.0");
        assert_eq!(config.id(), "1");
        assert_eq!(config.host(), "http://127.0.0.1");
        assert_eq!(config.port(), 37128);
        assert_eq!(config.username(), "");
        assert_eq!(config.password(), "");
        assert!(!config.verbose());
        assert!(config.extensions().is_empty());
        assert_eq!(config.url(), "http://127.0.0.1:37128");
    }

    #[test]
    fn default_config_matches_normalized_empty_partial() {
        let normalized = PartialConfig::default().normalize().unwrap();
        assert_eq!(Config::default().redacted(), normalized.redacted());
    }

    #[test]
    fn named_fields_replace_defaults() {
        let config = PartialConfig {
            host: Some("https://wallet.local".into()),
            port: Some(18099),
            username: Some("bob".into()),
            password: Some("secret".into()),
            verbose: Some(true),
            ..Default::default()
        }
        .normalize()
        .unwrap();

        assert_eq!(config.url(), "https://wallet.local:18099");
        assert_eq!(config.username(), "bob");
        assert_eq!(config.password(), "secret");
        assert!(config.verbose());
        assert_eq!(config.id(), "1");
    }

    #[test]
    fn extension_keys_override_named_fields() {
        let config = PartialConfig {
            port: Some(1000),
            id: Some("named".into()),
            extensions: extensions(json!({"port": 2000, "id": "ext", "jsonRpc": "1.0"})),
            ..Default::default()
        }
        .normalize()
        .unwrap();

        assert_eq!(config.port(), 2000);
        assert_eq!(config.id(), "ext");
        assert_eq!(config.json_rpc(), "1.0");
        assert!(config.extensions().is_empty());
    }

    #[test]
    fn unknown_extension_keys_are_kept() {
        let config = PartialConfig {
            extensions: extensions(json!({"walletDir": "/tmp/wallets"})),
            ..Default::default()
        }
        .normalize()
        .unwrap();

        assert_eq!(
            config.extensions().get("walletDir"),
            Some(&json!("/tmp/wallets"))
        );
    }

    #[test]
    fn ill_typed_override_is_rejected() {
        let err = PartialConfig {
            extensions: extensions(json!({"port": "not-a-port"})),
            ..Default::default()
        }
        .normalize()
        .expect_err("string port must not normalize");
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn shapes_are_not_validated() {
        let config = PartialConfig {
            host: Some("not a url".into()),
            ..Default::default()
        }
        .normalize()
        .expect("host shape is not checked");
        assert_eq!(config.url(), "not a url:37128");
    }

    #[test]
    fn redacted_masks_password_only_when_set() {
        let config = PartialConfig {
            password: Some("secret".into()),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(config.redacted()["password"], json!("***"));
        assert_eq!(config.redacted()["port"], json!(37128));
        assert!(!format!("{config:?}").contains("secret"));

        assert_eq!(Config::default().redacted()["password"], json!(""));
    }
}
