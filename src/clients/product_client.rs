/// 产品详情 API 客户端
///
/// 封装单个编号的产品详情查询
use crate::clients::auth_client::AccessToken;
use crate::error::FetchError;
use crate::models::{OutputRow, ProductDetailsResponse};
use crate::services::map_product;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

/// 必需的凭据 ID 请求头
pub const CLIENT_ID_HEADER: &str = "X-DIGIKEY-Client-Id";

/// 产品详情客户端
pub struct ProductClient {
    http: Client,
    base_url: String,
}

impl ProductClient {
    /// `http` 已配置好超时
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// 构建 `{base}/products/v4/search/{编号}/productdetails`，编号作为单个路径段编码
    pub fn product_url(&self, identifier: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::new(identifier, None, format!("无效的 API 地址: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| FetchError::new(identifier, None, "API 地址不能作为路径前缀"))?
            .pop_if_empty()
            .extend(["products", "v4", "search", identifier, "productdetails"]);

        Ok(url)
    }

    /// 查询一个编号并映射为输出行
    pub async fn fetch(
        &self,
        token: &AccessToken,
        client_id: &str,
        identifier: &str,
    ) -> Result<OutputRow, FetchError> {
        let url = self.product_url(identifier)?;
        debug!("查询产品: {}", url);

        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .header(CLIENT_ID_HEADER, client_id)
            .send()
            .await
            .map_err(|e| FetchError::new(identifier, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::new(
                identifier,
                Some(status.as_u16()),
                error_message(&body, status.as_u16()),
            ));
        }

        let details: ProductDetailsResponse = response
            .json()
            .await
            .map_err(|e| FetchError::new(identifier, None, format!("响应格式错误: {}", e)))?;

        Ok(map_product(&details))
    }
}

/// 错误响应中的 `message` 字段，没有则使用通用描述
fn error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status))
}
