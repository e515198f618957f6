//! USS提供者工厂

use serde_json::Value;

use crate::error::Result;
use crate::provider::{ConfigItem, Provider, ProviderFactory};
use super::config::{UssConfig, DEFAULT_ENDPOINT};
use super::provider::UssProvider;

/// USS提供者工厂
pub struct UssProviderFactory;

impl ProviderFactory for UssProviderFactory {
    fn provider_type(&self) -> &'static str {
        "uss"
    }

    fn display_name(&self) -> &'static str {
        "UpYun USS"
    }

    fn config_items(&self) -> Vec<ConfigItem> {
        vec![
            ConfigItem::new("bucket", "string")
                .title("服务名称")
                .help("又拍云存储服务名称")
                .required(),
            ConfigItem::new("access_key", "string")
                .title("操作员")
                .required(),
            ConfigItem::new("access_secret", "password")
                .title("操作员密码")
                .required(),
            ConfigItem::new("custom_host", "string")
                .title("加速域名")
                .help("下载和公开链接使用的域名，如 https://cdn.example.com")
                .required(),
            ConfigItem::new("endpoint", "string")
                .title("接口域名")
                .default(DEFAULT_ENDPOINT),
            ConfigItem::new("upload_scheme", "select")
                .title("上传签名方式")
                .help("hmac 或 legacy")
                .default("hmac"),
        ]
    }

    fn create_provider(&self, config: Value) -> Result<Box<dyn Provider>> {
        let config: UssConfig = serde_json::from_value(config)?;
        Ok(Box::new(UssProvider::new(config)?))
    }
}
