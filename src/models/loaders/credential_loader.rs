use crate::error::ConfigError;
use crate::models::credential::{CredentialFile, CredentialPair};
use std::path::Path;
use tokio::fs;

/// 从 `keys.json` 加载凭据列表
///
/// 文件不存在、无法解析或列表为空都视为致命的配置错误
pub async fn load_credentials(path: &Path) -> Result<Vec<CredentialPair>, ConfigError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ConfigError::CredentialFileNotFound { path: display });
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::CredentialFileInvalid {
            path: display.clone(),
            source: Box::new(e),
        })?;

    let file: CredentialFile =
        serde_json::from_str(&content).map_err(|e| ConfigError::CredentialFileInvalid {
            path: display.clone(),
            source: Box::new(e),
        })?;

    if file.keys.is_empty() {
        return Err(ConfigError::NoCredentials { path: display });
    }

    tracing::info!("🔑 已加载 {} 组凭据", file.keys.len());
    Ok(file.keys)
}
