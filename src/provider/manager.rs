use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use serde_json::Value;

use super::{ConfigItem, Provider, ProviderInfo};
use crate::error::{ProviderError, Result};

pub type ProviderBox = Arc<Box<dyn Provider>>;

/// Provider factory trait / 提供者工厂 trait
pub trait ProviderFactory: Send + Sync {
    /// Provider type name / 提供者类型名称
    fn provider_type(&self) -> &'static str;

    /// Human readable name / 显示名称
    fn display_name(&self) -> &'static str;

    /// 创建提供者实例
    fn create_provider(&self, config: Value) -> Result<Box<dyn Provider>>;

    /// Return provider specific config items / 返回提供者特有配置项
    fn config_items(&self) -> Vec<ConfigItem>;

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo {
            provider_type: self.provider_type().to_string(),
            display_name: self.display_name().to_string(),
            items: self.config_items(),
        }
    }
}

/// Provider manager (manages all provider instances) / 提供者管理器
#[derive(Clone)]
pub struct ProviderManager {
    providers: Arc<RwLock<HashMap<String, ProviderBox>>>,
    factories: Arc<RwLock<HashMap<String, Arc<Box<dyn ProviderFactory>>>>>,
}

impl ProviderManager {
    pub fn new() -> Self {
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
            factories: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register provider factory / 注册提供者工厂
    pub async fn register_factory(&self, factory: Box<dyn ProviderFactory>) {
        let provider_type = factory.provider_type().to_string();
        let mut factories = self.factories.write().await;
        factories.insert(provider_type.clone(), Arc::new(factory));

        tracing::info!("Provider factory registered: {}", provider_type);
    }

    /// Create provider instance and store it under `id` / 创建提供者实例
    ///
    /// No connectivity check is made: construction is pure and some vendors
    /// cannot list.
    pub async fn create_provider(&self, id: &str, provider_type: &str, config: Value) -> Result<ProviderBox> {
        let factory = {
            let factories = self.factories.read().await;
            factories
                .get(provider_type)
                .cloned()
                .ok_or_else(|| ProviderError::UnknownProvider(provider_type.to_string()))?
        };

        match factory.create_provider(config) {
            Ok(provider) => {
                let provider: ProviderBox = Arc::new(provider);
                let mut providers = self.providers.write().await;
                providers.insert(id.to_string(), provider.clone());
                tracing::info!("Provider created: {} ({})", id, provider_type);
                Ok(provider)
            }
            Err(e) => {
                tracing::error!("Provider creation failed: {} ({}) - {}", id, provider_type, e);
                Err(e)
            }
        }
    }

    /// Get provider instance / 获取提供者实例
    pub async fn get_provider(&self, id: &str) -> Option<ProviderBox> {
        let providers = self.providers.read().await;
        providers.get(id).cloned()
    }

    /// Remove provider instance / 移除提供者实例
    pub async fn remove_provider(&self, id: &str) -> Result<()> {
        let mut providers = self.providers.write().await;
        providers
            .remove(id)
            .ok_or_else(|| ProviderError::NotFound(id.to_string()))?;

        tracing::info!("Provider removed: {}", id);
        Ok(())
    }

    /// List all provider ids / 列出所有提供者
    pub async fn list_providers(&self) -> Vec<String> {
        let providers = self.providers.read().await;
        providers.keys().cloned().collect()
    }

    /// List all available provider types / 列出所有可用的提供者类型
    pub async fn list_provider_types(&self) -> Vec<String> {
        let factories = self.factories.read().await;
        factories.keys().cloned().collect()
    }

    /// Get all provider factory instances / 获取所有提供者工厂实例
    pub async fn get_all_factories(&self) -> Vec<Arc<Box<dyn ProviderFactory>>> {
        let factories = self.factories.read().await;
        factories.values().cloned().collect()
    }
}

impl Default for ProviderManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn manager() -> ProviderManager {
        let manager = ProviderManager::new();
        crate::register_providers(&manager).await;
        manager
    }

    #[tokio::test]
    async fn test_register_and_create() {
        let manager = manager().await;
        assert_eq!(manager.list_provider_types().await, vec!["uss".to_string()]);

        let provider = manager
            .create_provider("images", "uss", json!({
                "bucket": "demo",
                "access_key": "operator",
                "access_secret": "password",
                "custom_host": "https://cdn.example.com",
            }))
            .await
            .unwrap();
        assert_eq!(provider.name(), "uss");
        assert_eq!(provider.public_url("a.txt"), "https://cdn.example.com/a.txt");

        assert!(manager.get_provider("images").await.is_some());
        assert_eq!(manager.list_providers().await, vec!["images".to_string()]);
    }

    #[tokio::test]
    async fn test_signed_get_url_keeps_expiry_through_registry() {
        let manager = manager().await;
        let provider = manager
            .create_provider("cdn", "uss", json!({
                "bucket": "demo",
                "access_key": "operator",
                "access_secret": "password",
                "custom_host": "https://cdn.example.com",
            }))
            .await
            .unwrap();

        let before = chrono::Utc::now().timestamp();
        let req = provider.signed_get_url("photo.jpg", "").await.unwrap();
        let expire_at = req.expires_at.unwrap();
        assert!(expire_at >= before + 14 * 60 && expire_at <= before + 16 * 60);
        let (_, upt) = req.url.split_once("?_upt=").unwrap();
        assert_eq!(upt.len(), 8 + expire_at.to_string().len());
        assert!(upt.ends_with(&expire_at.to_string()));
    }

    #[tokio::test]
    async fn test_unknown_type() {
        let manager = manager().await;
        let err = manager.create_provider("x", "gcs", json!({})).await.err().unwrap();
        assert_eq!(err, ProviderError::UnknownProvider("gcs".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_config_is_not_stored() {
        let manager = manager().await;
        let err = manager
            .create_provider("broken", "uss", json!({ "bucket": "demo" }))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::InvalidConfig(_)));
        assert!(manager.get_provider("broken").await.is_none());
    }

    #[tokio::test]
    async fn test_remove_provider() {
        let manager = manager().await;
        manager
            .create_provider("p", "uss", json!({
                "bucket": "b",
                "access_key": "k",
                "access_secret": "s",
                "custom_host": "http://h",
            }))
            .await
            .unwrap();
        manager.remove_provider("p").await.unwrap();
        assert_eq!(
            manager.remove_provider("p").await,
            Err(ProviderError::NotFound("p".to_string()))
        );
    }

    #[test]
    fn test_provider_info() {
        let info = crate::providers::uss::UssProviderFactory.provider_info();
        assert_eq!(info.provider_type, "uss");
        let required: Vec<_> = info.items.iter().filter(|i| i.required).map(|i| i.name.as_str()).collect();
        assert_eq!(required, vec!["bucket", "access_key", "access_secret", "custom_host"]);
    }
}
