//! Application configuration module / 应用配置模块
//!
//! Loaded from `config.json` in the working directory, or the file named by
//! `OSSIGN_CONFIG`. A template is written on first run.

use anyhow::{anyhow, Context, Result};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Global configuration instance / 全局配置实例
static CONFIG: OnceCell<Arc<RwLock<AppConfig>>> = OnceCell::new();

pub const CONFIG_ENV: &str = "OSSIGN_CONFIG";

/// Application configuration / 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default log filter, overridden by RUST_LOG / 默认日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Provider to sign with / 使用的存储提供者
    pub provider: ProviderSection,
}

/// Provider configuration / 提供者配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSection {
    #[serde(default = "default_provider_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    /// Passed to the provider factory unchanged / 原样交给工厂
    pub config: serde_json::Value,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_provider_id() -> String {
    "default".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            provider: ProviderSection {
                id: default_provider_id(),
                provider_type: "uss".to_string(),
                config: serde_json::json!({
                    "bucket": "",
                    "access_key": "",
                    "access_secret": "",
                    "custom_host": "",
                }),
            },
        }
    }
}

/// Get the config file path / 获取配置文件路径
pub fn get_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Parse configuration text / 解析配置
pub fn parse_config(content: &str) -> Result<AppConfig> {
    serde_json::from_str(content).context("Failed to parse config file")
}

/// Load configuration from the default path / 加载配置文件
pub fn load_config() -> Result<AppConfig> {
    load_config_from(&get_config_path())
}

/// Load configuration from `path` / 从指定路径加载配置
///
/// A missing file is replaced by a template and reported as an error, since
/// credentials have no usable default. Called before the subscriber is
/// installed, no logging here.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        save_config_to(path, &AppConfig::default())?;
        return Err(anyhow!(
            "Created configuration template at {:?}, fill in provider credentials",
            path
        ));
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    parse_config(&content)
}

/// Save configuration to the default path / 保存配置到文件
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(&get_config_path(), config)
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file {:?}", path))?;
    Ok(())
}

/// Initialize global configuration / 初始化全局配置
pub fn init_config() -> Result<Arc<RwLock<AppConfig>>> {
    let config_arc = Arc::new(RwLock::new(load_config()?));

    CONFIG
        .set(config_arc.clone())
        .map_err(|_| anyhow!("Config already initialized"))?;

    Ok(config_arc)
}

/// Get a read-only snapshot of current config / 获取当前配置的只读快照
pub fn config() -> Option<AppConfig> {
    CONFIG.get().map(|c| c.read().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = parse_config(r#"{
            "provider": {
                "type": "uss",
                "config": { "bucket": "demo" }
            }
        }"#)
        .unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.provider.id, "default");
        assert_eq!(config.provider.provider_type, "uss");
        assert_eq!(config.provider.config["bucket"], "demo");
    }

    #[test]
    fn test_parse_config_missing_provider() {
        assert!(parse_config(r#"{ "log_level": "debug" }"#).is_err());
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ossign_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_load_config_from_file() {
        let path = temp_path("load");
        std::fs::write(&path, r#"{
            "log_level": "debug",
            "provider": { "id": "cdn", "type": "uss", "config": {} }
        }"#)
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.provider.id, "cdn");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_config_writes_template() {
        let path = temp_path("template");
        let _ = std::fs::remove_file(&path);

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("Created configuration template"));
        assert!(path.exists());

        // template parses; credentials are still empty
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.provider.provider_type, "uss");
        assert_eq!(config.provider.config["bucket"], "");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_default_round_trips() {
        let text = serde_json::to_string(&AppConfig::default()).unwrap();
        let config = parse_config(&text).unwrap();
        assert_eq!(config.provider.provider_type, "uss");
    }
}
