//! UpYun Storage Service / 又拍云存储

pub mod sign;
pub mod client;
pub mod config;
pub mod provider;
pub mod factory;

pub use client::{DeleteObject, RestUssClient, UssClient};
pub use config::{UploadScheme, UssConfig};
pub use factory::UssProviderFactory;
pub use provider::UssProvider;
pub use sign::{Credentials, SigningScheme};
