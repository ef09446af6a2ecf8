//! 配置中心客户端
//!
//! 创建时同步拉取一次配置，之后由后台线程按 `refresh_interval` 周期刷新。
//! 消费方按自己的节奏检查更新通知，或者通过 [`CloudClient::watch`] 注册回调

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

use super::error::CloudError;
use super::refresher::Refresher;
use super::store::{PropertyStore, Snapshot};
use super::task::{spawn_periodic, TaskHandle};
use super::transport::{HttpTransport, Transport};
use crate::cfg::CloudClientConfig;

/// 配置中心客户端
///
/// 客户端 drop 时停止刷新线程和所有监听线程
///
/// # 示例
/// ```no_run
/// use cloudcfg::CloudClient;
/// use std::time::Duration;
///
/// let client = CloudClient::fetch_initial("http://localhost:8888", "rss-entry-service", "dev")?;
/// println!("port: {:?}", client.get("ui.search.port"));
///
/// client.watch(Duration::from_secs(15), |props| {
///     println!("配置已更新: {} 项", props.len());
/// })?;
/// # Ok::<(), cloudcfg::CloudError>(())
/// ```
pub struct CloudClient {
    store: Arc<PropertyStore>,
    refresher: Arc<Refresher>,
    /// 刷新线程和监听线程
    tasks: Mutex<Vec<TaskHandle>>,
}

impl CloudClient {
    /// 使用默认配置创建客户端并同步拉取一次配置
    ///
    /// # 参数
    /// - `server`: 配置中心地址
    /// - `app_name`: 应用名
    /// - `profile`: 环境名，为空时使用 prod
    pub fn fetch_initial(server: &str, app_name: &str, profile: &str) -> Result<Self, CloudError> {
        Self::new(CloudClientConfig::new(server, app_name, profile))
    }

    /// 根据配置创建客户端
    ///
    /// 首次拉取失败不会返回错误，只记录日志，快照保持为空，等待后台刷新
    pub fn new(config: CloudClientConfig) -> Result<Self, CloudError> {
        check_config(&config)?;
        let transport = Arc::new(HttpTransport::new(&config)?);
        Self::with_transport(config, transport)
    }

    /// 使用自定义 Transport 创建客户端，配置同样需要通过校验
    pub fn with_transport(
        config: CloudClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CloudError> {
        check_config(&config)?;
        let store = Arc::new(PropertyStore::new(
            &config.server,
            &config.app_name,
            &config.profile,
        ));
        let refresher = Arc::new(Refresher::new(
            Arc::clone(&store),
            transport,
            config.accept.clone(),
            config.retry.clone(),
        ));

        if let Err(e) = refresher.refresh() {
            warn!(url = %store.url(), error = %e, "initial fetch failed, starting with empty properties");
        }
        // 消费方基于首次拉取的快照启动，首次加载不算作更新
        store.clear_pending_update();

        let refresh_task = refresher.spawn(config.refresh_interval);
        info!(
            url = %store.url(),
            keys = store.properties().len(),
            refresh_interval_ms = config.refresh_interval.as_millis() as u64,
            "cloud config client started"
        );

        Ok(Self {
            store,
            refresher,
            tasks: Mutex::new(vec![refresh_task]),
        })
    }

    pub fn store(&self) -> Arc<PropertyStore> {
        Arc::clone(&self.store)
    }

    pub fn url(&self) -> String {
        self.store.url()
    }

    /// 当前快照的副本
    pub fn properties(&self) -> Snapshot {
        self.store.properties()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }

    /// 是否有未消费的更新
    pub fn has_pending_update(&self) -> bool {
        self.store.has_pending_update()
    }

    /// 取走更新通知，返回之前是否有未消费的更新
    pub fn take_pending_update(&self) -> bool {
        self.store.take_pending_update()
    }

    pub fn clear_pending_update(&self) {
        self.store.clear_pending_update()
    }

    /// 立即执行一个刷新周期，不影响后台刷新的节奏
    pub fn refresh(&self) -> Result<bool, CloudError> {
        self.refresher.refresh()
    }

    /// 每隔 `check_interval` 检查一次更新通知，有更新时取走通知并以当前快照调用 `handler`
    ///
    /// 检查周期与刷新周期相互独立，`check_interval` 不能为 0
    pub fn watch<F>(&self, check_interval: Duration, handler: F) -> Result<(), CloudError>
    where
        F: Fn(Snapshot) + Send + 'static,
    {
        if check_interval.is_zero() {
            return Err(CloudError::Config("check_interval must be greater than 0".to_string()));
        }

        let store = Arc::clone(&self.store);
        let handle = spawn_periodic("cloudcfg-watch", check_interval, move || {
            if store.take_pending_update() {
                info!(url = %store.url(), "properties updated, notifying watcher");
                handler(store.properties());
            }
        });

        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
        Ok(())
    }
}

fn check_config(config: &CloudClientConfig) -> Result<(), CloudError> {
    config
        .check()
        .map_err(|e| CloudError::Config(e.to_string()))
}
