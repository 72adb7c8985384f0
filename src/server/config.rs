use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::services::policy::{ClipPolicy, OwnerScope, TagJoinPolicy};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default)]
    pub delete_scope: OwnerScope,

    #[serde(default)]
    pub list_scope: OwnerScope,

    #[serde(default = "default_list_tag_join")]
    pub list_tag_join: TagJoinPolicy,

    #[serde(default = "default_detail_tag_join")]
    pub detail_tag_join: TagJoinPolicy,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    listen_addr: Option<String>,
    log_dir: Option<String>,
    delete_scope: Option<OwnerScope>,
    list_scope: Option<OwnerScope>,
    list_tag_join: Option<TagJoinPolicy>,
    detail_tag_join: Option<TagJoinPolicy>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_list_tag_join() -> TagJoinPolicy {
    ClipPolicy::default().list_tag_join
}

fn default_detail_tag_join() -> TagJoinPolicy {
    ClipPolicy::default().detail_tag_join
}

impl ServerConfig {
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config = match config_path {
            Some(path_str) => read_config_file(Path::new(path_str))?,
            None => PartialServerConfig::default(),
        };

        // 2. Load from environment variables
        let env_config: PartialServerConfig = envy::from_env::<PartialServerConfig>()
            .map_err(|e| format!("Failed to load config from environment: {e}"))?;

        // 3. Merge: environment overrides file
        Self::merge(env_config, file_config)
    }

    fn merge(env: PartialServerConfig, file: PartialServerConfig) -> Result<Self, String> {
        let defaults = ClipPolicy::default();
        Ok(ServerConfig {
            database_url: env
                .database_url
                .or(file.database_url)
                .ok_or("DATABASE_URL is required")?,
            jwt_secret: env
                .jwt_secret
                .or(file.jwt_secret)
                .ok_or("JWT_SECRET is required")?,
            listen_addr: env
                .listen_addr
                .or(file.listen_addr)
                .unwrap_or_else(default_listen_addr),
            log_dir: env.log_dir.or(file.log_dir).unwrap_or_else(default_log_dir),
            delete_scope: env
                .delete_scope
                .or(file.delete_scope)
                .unwrap_or(defaults.delete_scope),
            list_scope: env
                .list_scope
                .or(file.list_scope)
                .unwrap_or(defaults.list_scope),
            list_tag_join: env
                .list_tag_join
                .or(file.list_tag_join)
                .unwrap_or(defaults.list_tag_join),
            detail_tag_join: env
                .detail_tag_join
                .or(file.detail_tag_join)
                .unwrap_or(defaults.detail_tag_join),
        })
    }

    pub fn policy(&self) -> ClipPolicy {
        ClipPolicy {
            delete_scope: self.delete_scope,
            list_scope: self.list_scope,
            list_tag_join: self.list_tag_join,
            detail_tag_join: self.detail_tag_join,
        }
    }
}

fn read_config_file(path: &Path) -> Result<PartialServerConfig, String> {
    if !path.exists() {
        return Ok(PartialServerConfig::default());
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
    toml::from_str(&contents)
        .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))
}
