use thiserror::Error;

/// 配置中心客户端错误
///
/// 刷新周期内的错误只记录日志，不会传递给消费方
#[derive(Error, Debug)]
pub enum CloudError {
    /// 连接失败、超时、TLS 握手失败等
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 服务端返回非 200 状态码
    #[error("unexpected response status {status}: {body}")]
    Status { status: u16, body: String },

    /// 响应体不是合法的 JSON
    #[error("decode response failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}
