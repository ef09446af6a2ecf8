//! 配置中心请求
//!
//! 刷新流程只依赖 [`Transport`] trait，默认实现 [`HttpTransport`] 基于 reqwest 阻塞客户端

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use tracing::{error, warn};

use super::error::CloudError;
use crate::cfg::CloudClientConfig;

/// 一次 HTTP 请求的描述
#[derive(Debug, Clone, PartialEq)]
pub struct HttpAction {
    pub url: String,
    pub method: Method,
    pub accept: String,
    /// 仅在有请求体时需要
    pub content_type: Option<String>,
    pub body: Option<String>,
}

impl HttpAction {
    /// 拉取配置用的 GET 请求
    pub fn get(url: impl Into<String>, accept: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            accept: accept.into(),
            content_type: None,
            body: None,
        }
    }

    pub fn with_body(mut self, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self.body = Some(body.into());
        self
    }
}

/// 执行 HTTP 请求并返回 200 响应的响应体
pub trait Transport: Send + Sync {
    fn execute(&self, action: &HttpAction) -> Result<Vec<u8>, CloudError>;
}

/// 基于 reqwest 阻塞客户端的默认实现
///
/// 每个请求受固定超时限制，非 200 响应视为错误
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &CloudClientConfig) -> Result<Self, CloudError> {
        if config.insecure_skip_verify {
            warn!(server = %config.server, "TLS certificate verification is disabled");
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .build()?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, action: &HttpAction) -> Result<Vec<u8>, CloudError> {
        let mut request = self
            .client
            .request(action.method.clone(), &action.url)
            .header(ACCEPT, &action.accept);
        if let Some(content_type) = &action.content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        if let Some(body) = &action.body {
            request = request.body(body.clone());
        }

        let resp = request.send().map_err(|e| {
            error!(url = %action.url, error = %e, "HTTP request failed");
            CloudError::Transport(e)
        })?;

        let status = resp.status();
        let body = resp.bytes()?;
        if status != reqwest::StatusCode::OK {
            let body = String::from_utf8_lossy(&body).into_owned();
            error!(url = %action.url, status = status.as_u16(), body = %body, "unexpected response");
            return Err(CloudError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body.to_vec())
    }
}
