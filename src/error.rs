use std::fmt;
use thiserror::Error;

/// 应用程序错误类型
///
/// 只包含会终止整个运行的错误；令牌、查询和源文件错误在批次内处理
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误（致命，任何批次开始前终止）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 追加写入错误（致命）
    #[error("写入错误: {0}")]
    Write(#[from] WriteError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 凭据文件不存在
    #[error("凭据文件不存在: {path}")]
    CredentialFileNotFound { path: String },
    /// 凭据文件无法读取或解析
    #[error("凭据文件无法解析 ({path}): {source}")]
    CredentialFileInvalid {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 凭据列表为空
    #[error("凭据文件中没有任何凭据: {path}")]
    NoCredentials { path: String },
    /// 配置文件无法解析
    #[error("配置文件无法解析 ({path}): {source}")]
    ConfigFileInvalid {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 无法构建 HTTP 客户端
    #[error("无法构建 HTTP 客户端: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// 令牌交换错误
#[derive(Debug, Error)]
pub enum AuthError {
    /// 网络请求失败（含超时）
    #[error("令牌请求失败 (client_id: {client_id}): {source}")]
    RequestFailed {
        client_id: String,
        #[source]
        source: reqwest::Error,
    },
    /// 令牌端点返回非 2xx
    #[error("令牌端点返回错误状态 (client_id: {client_id}): {status}")]
    BadStatus { client_id: String, status: u16 },
    /// 响应中没有 access_token
    #[error("令牌响应中缺少 access_token (client_id: {client_id})")]
    MissingToken { client_id: String },
}

/// 单个编号查询失败
///
/// 携带编号、HTTP 状态码（没有则为 `None`）和消息，会原样写入失败日志
#[derive(Debug, Clone)]
pub struct FetchError {
    pub identifier: String,
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn new(identifier: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            status,
            message: message.into(),
        }
    }

    /// 状态码文本，没有状态码时为 `ERR`
    pub fn status_label(&self) -> String {
        match self.status {
            Some(code) => code.to_string(),
            None => "ERR".to_string(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.identifier, self.status_label(), self.message)
    }
}

impl std::error::Error for FetchError {}

/// 批次源文件错误
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("无法读取批次文件 ({path}): {source}")]
    Unreadable {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("批次文件中没有工作表: {path}")]
    NoSheet { path: String },
}

/// 追加写入错误
#[derive(Debug, Error)]
#[error("写入文件失败 ({path}): {source}")]
pub struct WriteError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

impl WriteError {
    pub fn new(path: impl Into<String>, source: std::io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_label_falls_back_to_err() {
        let with_status = FetchError::new("LM317", Some(404), "Not Found");
        let without = FetchError::new("LM317", None, "timed out");

        assert_eq!(with_status.status_label(), "404");
        assert_eq!(without.status_label(), "ERR");
        assert_eq!(with_status.to_string(), "LM317 | 404 | Not Found");
    }

    #[test]
    fn nested_errors_convert_into_app_error() {
        let err: AppError = ConfigError::NoCredentials {
            path: "keys.json".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("keys.json"));
    }
}
