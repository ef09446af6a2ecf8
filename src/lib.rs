//! cloudcfg - 配置中心客户端
//!
//! 定期从配置中心（Spring Cloud Config 协议）拉取分层配置，合并为一份扁平的
//! key/value 快照，快照变化时发出通知，宿主程序据此重建依赖配置的组件（例如 HTTP 服务），
//! 无需重启进程。
//!
//! ## 模块
//!
//! - **cfg**: 客户端配置（地址、刷新周期、超时、重试）
//! - **cloud**: 属性存储、分层合并、占位符替换、变化检测与后台刷新
//!
//! ## 快速开始
//!
//! ```no_run
//! use cloudcfg::CloudClient;
//!
//! let client = CloudClient::fetch_initial("http://localhost:8888", "rss-entry-service", "dev")?;
//! if client.take_pending_update() {
//!     println!("{:?}", client.properties());
//! }
//! # Ok::<(), cloudcfg::CloudError>(())
//! ```

pub mod cfg;
pub mod cloud;

// 重新导出主要的公共 API
pub use cfg::{CloudClientConfig, RetryConfig};
pub use cloud::{
    CloudClient, CloudError, ConfigResult, PropertySource, PropertyStore, Snapshot, Transport,
};
