//! cfg 模块 - 客户端配置
//!
//! 描述如何连接配置中心以及刷新、超时、重试策略

pub mod client_config;
pub mod duration;
pub mod retry;

pub use client_config::CloudClientConfig;
pub use duration::{format_duration, parse_duration, HumanDur};
pub use retry::RetryConfig;
