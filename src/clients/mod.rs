pub mod auth_client;
pub mod product_client;

pub use auth_client::{AccessToken, AuthClient};
pub use product_client::{ProductClient, CLIENT_ID_HEADER};

use crate::config::Config;
use crate::error::ConfigError;

/// 构建共享的 HTTP 客户端，所有请求使用同一个超时
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()
        .map_err(ConfigError::HttpClient)
}
