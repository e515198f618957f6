pub mod config;
pub mod error;
pub mod provider;

// Provider modules (point to project root providers via path attribute) / 提供者模块
#[path = "../providers/mod.rs"]
pub mod providers;

pub use error::{ProviderError, Result};
pub use provider::{Provider, ProviderManager, SignedRequest};

// Register all storage providers / 注册所有存储提供者
pub async fn register_providers(manager: &provider::ProviderManager) {
    providers::register_all(manager).await
}
