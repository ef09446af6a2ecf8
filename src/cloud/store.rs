use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use super::merger::merge_sources;
use super::resolver::resolve_placeholders;
use super::result::ConfigResult;
use super::signal::UpdateSignal;

/// 合并后的有效配置，key 和 value 都是字符串
pub type Snapshot = HashMap<String, String>;

/// 未指定环境时使用的默认环境
pub const DEFAULT_PROFILE: &str = "prod";

/// 把环境名转换为请求路径片段: "" -> "/prod"，"dev" -> "/dev"
pub fn profile_path(profile: &str) -> String {
    if profile.is_empty() {
        format!("/{}", DEFAULT_PROFILE)
    } else {
        format!("/{}", profile)
    }
}

/// 属性存储
///
/// 持有合并后的快照和更新通知。快照只在写锁内修改，读取也经过读锁，
/// 外部只能拿到快照的副本
#[derive(Debug)]
pub struct PropertyStore {
    server: String,
    app_name: String,
    profile: String,
    snapshot: RwLock<Snapshot>,
    signal: UpdateSignal,
}

impl PropertyStore {
    /// 创建空的属性存储
    ///
    /// # 参数
    /// - `server`: 配置中心地址，末尾的 `/` 会被去掉
    /// - `app_name`: 应用名
    /// - `profile`: 环境名，为空时使用 prod
    pub fn new(server: &str, app_name: &str, profile: &str) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            app_name: app_name.to_string(),
            profile: profile_path(profile),
            snapshot: RwLock::new(Snapshot::new()),
            signal: UpdateSignal::new(),
        }
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// 请求路径中的环境片段，形如 "/prod"
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// 拉取配置的地址: `{server}/{app_name}/{profile}`
    pub fn url(&self) -> String {
        format!("{}/{}{}", self.server, self.app_name, self.profile)
    }

    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.snapshot.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// 合并一次拉取结果并检测变化
    ///
    /// 合并、占位符替换和比较在同一个写锁内完成。只有在没有未消费通知时才比较，
    /// 因此未消费的通知不会被后续无变化的周期覆盖
    ///
    /// # 返回
    /// - 本次是否发出了新的更新通知
    pub fn apply(&self, result: &ConfigResult) -> bool {
        let mut snapshot = self.write();
        let before = snapshot.clone();

        merge_sources(&mut snapshot, &result.property_sources);
        resolve_placeholders(&mut snapshot);

        if self.signal.is_pending() {
            debug!(url = %self.url(), "update still pending, skip change detection");
            return false;
        }

        let changed = before != *snapshot;
        if changed {
            self.signal.notify();
        }
        info!(url = %self.url(), changed, keys = snapshot.len(), "properties applied");
        changed
    }

    /// 当前快照的副本
    pub fn properties(&self) -> Snapshot {
        self.read().clone()
    }

    /// 读取单个属性
    pub fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).cloned()
    }

    /// 是否有未消费的更新，不改变状态
    pub fn has_pending_update(&self) -> bool {
        self.signal.is_pending()
    }

    /// 取走更新通知，返回之前是否有未消费的更新
    pub fn take_pending_update(&self) -> bool {
        self.signal.take()
    }

    /// 丢弃未消费的更新通知
    pub fn clear_pending_update(&self) {
        self.signal.take();
    }
}
