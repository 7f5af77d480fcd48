use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

/// 默认配置文件路径，可由 `PIPELINE_CONFIG` 覆盖
pub const DEFAULT_CONFIG_FILE: &str = "pipeline.toml";

/// 程序配置
///
/// 启动时构建一次，之后只读传入 `App`
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 批次文件目录（xlsx / csv）
    pub input_dir: PathBuf,
    /// 输出表格目录
    pub output_dir: PathBuf,
    /// 凭据文件
    pub keys_file: PathBuf,
    /// 从哪个批次编号开始处理
    pub resume_offset: u64,
    /// 两次产品请求之间的固定间隔（秒）
    pub request_delay_secs: u64,
    /// 单次 HTTP 请求超时（秒）
    pub http_timeout_secs: u64,
    /// OAuth2 令牌端点
    pub token_url: String,
    /// 产品 API 根地址
    pub product_api_base_url: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("xlsx"),
            output_dir: PathBuf::from("csv"),
            keys_file: PathBuf::from("keys.json"),
            resume_offset: 1,
            request_delay_secs: 50,
            http_timeout_secs: 30,
            token_url: "https://api.digikey.com/v1/oauth2/token".to_string(),
            product_api_base_url: "https://api.digikey.com".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 加载配置：默认值 → TOML 文件（若存在）→ 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PIPELINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let base = Self::from_toml_file(Path::new(&path))?.unwrap_or_default();
        Ok(base.with_env_overrides())
    }

    /// 读取 TOML 配置文件，文件不存在时返回 `None`
    pub fn from_toml_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let invalid = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::ConfigFileInvalid {
            path: path.display().to_string(),
            source,
        };

        let content = std::fs::read_to_string(path).map_err(|e| invalid(Box::new(e)))?;
        let config: Config = toml::from_str(&content).map_err(|e| invalid(Box::new(e)))?;
        Ok(Some(config))
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> Self {
        let env = |name: &str| std::env::var(name).ok();
        Self {
            input_dir: env("INPUT_DIR").map(PathBuf::from).unwrap_or(self.input_dir),
            output_dir: env("OUTPUT_DIR").map(PathBuf::from).unwrap_or(self.output_dir),
            keys_file: env("KEYS_FILE").map(PathBuf::from).unwrap_or(self.keys_file),
            resume_offset: env("RESUME_OFFSET").map(|v| parse_resume_offset(&v)).unwrap_or(self.resume_offset),
            request_delay_secs: env("REQUEST_DELAY_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.request_delay_secs),
            http_timeout_secs: env("HTTP_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.http_timeout_secs),
            token_url: env("TOKEN_URL").unwrap_or(self.token_url),
            product_api_base_url: env("PRODUCT_API_BASE_URL").unwrap_or(self.product_api_base_url),
            verbose_logging: env("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 命令行第一个参数作为起始批次编号
    pub fn with_resume_arg(mut self, arg: Option<&str>) -> Self {
        if let Some(arg) = arg {
            self.resume_offset = parse_resume_offset(arg);
        }
        self
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_secs(self.request_delay_secs)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// 解析起始批次编号
///
/// 只读取开头的数字（`"3abc"` → 3），无法解析或为 0 时回退到 1
pub fn parse_resume_offset(raw: &str) -> u64 {
    match leading_number(raw) {
        Some(n) if n > 0 => n,
        _ => 1,
    }
}

/// 取字符串开头的整数部分（允许前导空白）
pub fn leading_number(raw: &str) -> Option<u64> {
    static LEADING_DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = LEADING_DIGITS.get_or_init(|| Regex::new(r"^\s*([0-9]+)").expect("静态正则表达式"));
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resume_offset_uses_integer_prefix() {
        assert_eq!(parse_resume_offset("3"), 3);
        assert_eq!(parse_resume_offset("12abc"), 12);
        assert_eq!(parse_resume_offset("  7"), 7);
        assert_eq!(parse_resume_offset("abc"), 1);
        assert_eq!(parse_resume_offset("0"), 1);
        assert_eq!(parse_resume_offset("-4"), 1);
        assert_eq!(parse_resume_offset(""), 1);
    }

    #[test]
    fn leading_number_reads_ascii_digits_only() {
        assert_eq!(leading_number("1٣"), Some(1));
        assert_eq!(leading_number("٣"), None);
        assert_eq!(leading_number("99999999999"), Some(99_999_999_999));
        assert_eq!(parse_resume_offset("99999999999"), 99_999_999_999);
    }

    #[test]
    fn resume_arg_overrides_only_when_present() {
        let config = Config::default().with_resume_arg(None);
        assert_eq!(config.resume_offset, 1);

        let config = Config::default().with_resume_arg(Some("5"));
        assert_eq!(config.resume_offset, 5);
    }

    #[test]
    fn defaults_match_upstream_limits() {
        let config = Config::default();
        assert_eq!(config.request_delay(), Duration::from_secs(50));
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
        assert_eq!(config.output_dir, PathBuf::from("csv"));
    }

    #[test]
    fn toml_file_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resume_offset = 4\nrequest_delay_secs = 10").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap().unwrap();
        assert_eq!(config.resume_offset, 4);
        assert_eq!(config.request_delay_secs, 10);
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn missing_toml_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_toml_file(&dir.path().join("absent.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn malformed_toml_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "resume_offset = \"not a number\"").unwrap();

        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigFileInvalid { .. }));
    }
}
