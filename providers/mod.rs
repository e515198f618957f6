// Provider package / 提供者包
pub mod uss;

use crate::provider::ProviderManager;

/// Register all providers to ProviderManager / 注册所有提供者
pub async fn register_all(manager: &ProviderManager) {
    // Register UpYun USS provider / 注册又拍云提供者
    manager.register_factory(Box::new(uss::UssProviderFactory)).await;
}
