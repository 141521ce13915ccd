use std::env;

use dotenvy::dotenv;
use serde::Deserialize;
use tracing::info;

use crate::utils::error::{AppError, AppResult};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PATH: &str = "/vote";
pub const DEFAULT_MONGO_DB: &str = "bot";
pub const DEFAULT_MONGO_COLLECTION: &str = "votes";
pub const DEFAULT_SUPABASE_TABLE: &str = "votes";

/// Options as a host supplies them. Nothing is validated until the
/// options are turned into a [`WebhookConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookOptions {
    pub port: Option<u16>,
    pub path: Option<String>,
    pub auth: Option<String>,
    pub mongo: Option<MongoOptions>,
    pub supabase: Option<SupabaseOptions>,
    pub debug: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MongoOptions {
    pub url: Option<String>,
    pub db: Option<String>,
    pub collection: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupabaseOptions {
    pub url: Option<String>,
    pub key: Option<String>,
    pub table: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub url: String,
    pub db: String,
    pub collection: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub key: String,
    pub table: String,
}

/// The single storage backend a webhook writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Mongo(MongoConfig),
    Supabase(SupabaseConfig),
}

impl StorageConfig {
    pub fn name(&self) -> &'static str {
        match self {
            StorageConfig::Mongo(_) => "MongoDB",
            StorageConfig::Supabase(_) => "Supabase",
        }
    }
}

/// Validated, immutable receiver configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub port: u16,
    pub path: String,
    pub auth: Option<String>,
    pub storage: StorageConfig,
    pub debug: bool,
}

impl TryFrom<WebhookOptions> for WebhookConfig {
    type Error = AppError;

    fn try_from(options: WebhookOptions) -> AppResult<Self> {
        let storage = match (options.mongo, options.supabase) {
            (Some(_), Some(_)) => {
                return Err(AppError::Configuration(
                    "Only one database can be used!".to_string(),
                ))
            }
            (None, None) => {
                return Err(AppError::Configuration(
                    "A mongo or supabase block must be configured".to_string(),
                ))
            }
            (Some(mongo), None) => StorageConfig::Mongo(MongoConfig {
                url: non_empty(mongo.url)
                    .ok_or_else(|| incomplete("MongoDB", "url"))?,
                db: non_empty(mongo.db).unwrap_or_else(|| DEFAULT_MONGO_DB.to_string()),
                collection: non_empty(mongo.collection)
                    .unwrap_or_else(|| DEFAULT_MONGO_COLLECTION.to_string()),
            }),
            (None, Some(supabase)) => StorageConfig::Supabase(SupabaseConfig {
                url: non_empty(supabase.url)
                    .ok_or_else(|| incomplete("Supabase", "url"))?,
                key: non_empty(supabase.key)
                    .ok_or_else(|| incomplete("Supabase", "key"))?,
                table: non_empty(supabase.table)
                    .unwrap_or_else(|| DEFAULT_SUPABASE_TABLE.to_string()),
            }),
        };

        Ok(Self {
            port: options.port.unwrap_or(DEFAULT_PORT),
            path: normalize_path(options.path.as_deref())?,
            auth: non_empty(options.auth),
            storage,
            debug: options.debug.unwrap_or(false),
        })
    }
}

impl WebhookConfig {
    /// Reads the configuration from the process environment, loading a
    /// `.env` file first when one exists.
    pub fn from_env() -> AppResult<Self> {
        dotenv().ok();
        Self::try_from(WebhookOptions::from_lookup(|key| env::var(key).ok())?)
    }
}

impl WebhookOptions {
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .map(|port| {
                port.trim().parse::<u16>().map_err(|e| {
                    AppError::Configuration(format!("Invalid PORT value {port:?}: {e}"))
                })
            })
            .transpose()?;

        let debug = lookup("WEBHOOK_DEBUG")
            .map(|debug| {
                debug.trim().parse::<bool>().map_err(|e| {
                    AppError::Configuration(format!("Invalid WEBHOOK_DEBUG value {debug:?}: {e}"))
                })
            })
            .transpose()?;

        let mongo = MongoOptions {
            url: lookup("MONGO_URL"),
            db: lookup("MONGO_DB"),
            collection: lookup("MONGO_COLLECTION"),
        };
        let mongo_present = mongo.url.is_some() || mongo.db.is_some() || mongo.collection.is_some();

        let supabase = SupabaseOptions {
            url: lookup("SUPABASE_URL"),
            key: lookup("SUPABASE_KEY"),
            table: lookup("SUPABASE_TABLE"),
        };
        let supabase_present =
            supabase.url.is_some() || supabase.key.is_some() || supabase.table.is_some();

        if port.is_none() {
            info!("PORT not set, using default: {DEFAULT_PORT}");
        }

        Ok(Self {
            port,
            path: lookup("WEBHOOK_PATH"),
            auth: lookup("WEBHOOK_AUTH"),
            mongo: mongo_present.then_some(mongo),
            supabase: supabase_present.then_some(supabase),
            debug,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn incomplete(backend: &str, field: &str) -> AppError {
    AppError::Configuration(format!("{backend} config is incomplete! Missing {field}"))
}

/// The path becomes a literal axum route, so capture and wildcard syntax is refused.
fn normalize_path(path: Option<&str>) -> AppResult<String> {
    let path = match path {
        Some(path) if !path.is_empty() => format!("/{}", path.trim_matches('/')),
        _ => return Ok(DEFAULT_PATH.to_string()),
    };

    let pattern_like = path.split('/').any(|segment| {
        segment.starts_with(':') || segment.starts_with('*') || segment.contains(['{', '}'])
    });
    if pattern_like {
        return Err(AppError::Configuration(format!(
            "Webhook path {path:?} must not contain route parameters or wildcards"
        )));
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn mongo(url: &str) -> MongoOptions {
        MongoOptions {
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn mongo_only_gets_defaults() {
        let config = WebhookConfig::try_from(WebhookOptions {
            mongo: Some(mongo("mongodb://localhost:27017")),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.path, "/vote");
        assert_eq!(config.auth, None);
        assert!(!config.debug);
        assert_eq!(
            config.storage,
            StorageConfig::Mongo(MongoConfig {
                url: "mongodb://localhost:27017".to_string(),
                db: "bot".to_string(),
                collection: "votes".to_string(),
            })
        );
    }

    #[test]
    fn both_backends_is_fatal() {
        let result = WebhookConfig::try_from(WebhookOptions {
            mongo: Some(mongo("mongodb://localhost:27017")),
            supabase: Some(SupabaseOptions {
                url: Some("https://example.supabase.co".to_string()),
                key: Some("key".to_string()),
                table: None,
            }),
            ..Default::default()
        });

        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn no_backend_is_fatal() {
        let result = WebhookConfig::try_from(WebhookOptions::default());
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn incomplete_blocks_are_fatal() {
        let result = WebhookConfig::try_from(WebhookOptions {
            mongo: Some(MongoOptions::default()),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::Configuration(_))));

        let result = WebhookConfig::try_from(WebhookOptions {
            supabase: Some(SupabaseOptions {
                url: Some("https://example.supabase.co".to_string()),
                key: Some(String::new()),
                table: Some("votes".to_string()),
            }),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn paths_are_normalized() {
        assert_eq!(normalize_path(Some("votes/")).unwrap(), "/votes");
        assert_eq!(normalize_path(Some("/hooks/topgg/")).unwrap(), "/hooks/topgg");
        assert_eq!(normalize_path(Some("//vote//")).unwrap(), "/vote");
        assert_eq!(normalize_path(Some("/")).unwrap(), "/");
        assert_eq!(normalize_path(Some("")).unwrap(), "/vote");
        assert_eq!(normalize_path(None).unwrap(), "/vote");
    }

    #[test]
    fn route_syntax_in_path_is_fatal() {
        for path in ["*", "/*rest", ":x", "hooks/:bot", "{id}", "vote/{*rest}"] {
            let result = WebhookConfig::try_from(WebhookOptions {
                path: Some(path.to_string()),
                mongo: Some(mongo("mongodb://localhost:27017")),
                ..Default::default()
            });
            assert!(
                matches!(result, Err(AppError::Configuration(_))),
                "path {path:?}"
            );
        }
    }

    #[test]
    fn options_deserialize_from_json() {
        let options: WebhookOptions = serde_json::from_str(
            r#"{
                "port": 8080,
                "path": "webhook",
                "auth": "s3cret",
                "supabase": { "url": "https://example.supabase.co", "key": "anon" },
                "debug": true
            }"#,
        )
        .unwrap();
        let config = WebhookConfig::try_from(options).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.path, "/webhook");
        assert_eq!(config.auth.as_deref(), Some("s3cret"));
        assert!(config.debug);
        assert_eq!(
            config.storage,
            StorageConfig::Supabase(SupabaseConfig {
                url: "https://example.supabase.co".to_string(),
                key: "anon".to_string(),
                table: "votes".to_string(),
            })
        );
    }

    #[test]
    fn environment_lookup_builds_options() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PORT", "4000"),
            ("WEBHOOK_DEBUG", "true"),
            ("MONGO_URL", "mongodb://db:27017"),
            ("MONGO_COLLECTION", "topgg"),
        ]);
        let options =
            WebhookOptions::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
        let config = WebhookConfig::try_from(options).unwrap();

        assert_eq!(config.port, 4000);
        assert!(config.debug);
        assert_eq!(
            config.storage,
            StorageConfig::Mongo(MongoConfig {
                url: "mongodb://db:27017".to_string(),
                db: "bot".to_string(),
                collection: "topgg".to_string(),
            })
        );
    }

    #[test]
    fn bad_environment_values_are_rejected() {
        let result = WebhookOptions::from_lookup(|key| {
            (key == "PORT").then(|| "not-a-port".to_string())
        });
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
