//! cloud 模块 - 配置中心客户端
//!
//! 周期性地从配置中心拉取分层的属性，合并为一份有效快照，
//! 检测快照变化并通过单槽位通知告知消费方

pub mod client;
pub mod error;
pub mod merger;
pub mod refresher;
pub mod resolver;
pub mod result;
pub mod signal;
pub mod store;
pub mod task;
pub mod transport;

pub use client::CloudClient;
pub use error::CloudError;
pub use merger::{merge_sources, stringify};
pub use refresher::Refresher;
pub use resolver::{placeholder_key, resolve_placeholders};
pub use result::{ConfigResult, PropertySource};
pub use signal::UpdateSignal;
pub use store::{profile_path, PropertyStore, Snapshot, DEFAULT_PROFILE};
pub use task::{spawn_periodic, TaskHandle};
pub use transport::{HttpAction, HttpTransport, Transport};
