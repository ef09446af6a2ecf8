//! 配置中心客户端的配置
//!
//! 支持 JSON/JSON5/YAML/TOML 文件，时间字段使用 "30s" 这样的字符串

use anyhow::{anyhow, Context, Result};
use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::path::Path;
use std::time::Duration;

use super::duration::{serde_as, HumanDur};
use super::retry::RetryConfig;

/// 配置中心客户端配置
///
/// # 示例
/// ```no_run
/// use cloudcfg::cfg::CloudClientConfig;
///
/// let config: CloudClientConfig = json5::from_str(r#"{
///     server: "http://localhost:8888",
///     app_name: "rss-entry-service",
///     profile: "dev",
///     refresh_interval: "30s",
/// }"#).unwrap();
/// ```
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault, Validate)]
#[serde(default)]
pub struct CloudClientConfig {
    /// 配置中心地址，如 "http://localhost:8888"
    #[default = "http://localhost:8888"]
    #[garde(pattern(r"^https?://[^/ \t\r\n]+(/[^ \t\r\n]*)?$"))]
    pub server: String,

    /// 应用名
    #[garde(length(min = 1))]
    pub app_name: String,

    /// 环境名，为空时使用 prod
    #[garde(skip)]
    pub profile: String,

    /// 后台刷新周期
    #[serde_as(as = "HumanDur")]
    #[default(Duration::from_secs(30))]
    #[garde(custom(non_zero_duration))]
    pub refresh_interval: Duration,

    /// 单次请求超时
    #[serde_as(as = "HumanDur")]
    #[default(Duration::from_secs(10))]
    #[garde(custom(non_zero_duration))]
    pub request_timeout: Duration,

    /// 请求的 Accept 头
    #[default = "application/json"]
    #[garde(length(min = 1))]
    pub accept: String,

    /// 跳过 TLS 证书校验，仅用于自签名的测试环境
    #[garde(skip)]
    pub insecure_skip_verify: bool,

    /// 同一周期内的重试策略，不配置则不重试
    #[garde(dive)]
    pub retry: Option<RetryConfig>,
}

fn non_zero_duration(value: &Duration, _ctx: &()) -> garde::Result {
    if value.is_zero() {
        return Err(garde::Error::new("时间必须大于 0"));
    }
    Ok(())
}

impl CloudClientConfig {
    /// 使用默认参数创建配置
    pub fn new(
        server: impl Into<String>,
        app_name: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            server: server.into(),
            app_name: app_name.into(),
            profile: profile.into(),
            ..Default::default()
        }
    }

    /// 从文件加载配置，根据扩展名选择解析器
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let config: Self = match ext {
            "json" => serde_json::from_str(&content)?,
            "json5" => json5::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => return Err(anyhow!("不支持的文件格式: {}", path.display())),
        };

        config.check()?;
        Ok(config)
    }

    /// 校验配置
    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| anyhow!("configuration validation failed: {}", e))
    }
}
