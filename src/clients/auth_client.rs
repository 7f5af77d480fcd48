/// OAuth2 令牌客户端
///
/// 用一组凭据换取一个 bearer 令牌（client-credentials 授权）
use crate::error::AuthError;
use crate::models::CredentialPair;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// bearer 令牌，只在单个批次内使用
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// 令牌客户端
pub struct AuthClient {
    http: Client,
    token_url: String,
}

impl AuthClient {
    /// `http` 已配置好超时
    pub fn new(http: Client, token_url: impl Into<String>) -> Self {
        Self {
            http,
            token_url: token_url.into(),
        }
    }

    /// 换取令牌，不重试
    pub async fn fetch_token(&self, credential: &CredentialPair) -> Result<AccessToken, AuthError> {
        debug!("请求令牌: {} (client_id: {})", self.token_url, credential.id);

        let request_failed = |source| AuthError::RequestFailed {
            client_id: credential.id.clone(),
            source,
        };

        let params = [
            ("client_id", credential.id.as_str()),
            ("client_secret", credential.secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::BadStatus {
                client_id: credential.id.clone(),
                status: status.as_u16(),
            });
        }

        let body: TokenResponse = response.json().await.map_err(request_failed)?;

        match body.access_token {
            Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
            _ => Err(AuthError::MissingToken {
                client_id: credential.id.clone(),
            }),
        }
    }
}
