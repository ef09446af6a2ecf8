//! 刷新流程
//!
//! 一个刷新周期依次执行：请求 -> 解析 -> 合并 -> 占位符替换 -> 变化检测。
//! 任一步失败都只记录日志并跳过本周期，快照和更新通知保持不变

use backon::BlockingRetryable;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use super::error::CloudError;
use super::result::ConfigResult;
use super::store::PropertyStore;
use super::task::{spawn_periodic, TaskHandle};
use super::transport::{HttpAction, Transport};
use crate::cfg::RetryConfig;

/// 刷新器，驱动一个属性存储的刷新周期
pub struct Refresher {
    store: Arc<PropertyStore>,
    transport: Arc<dyn Transport>,
    accept: String,
    retry: Option<RetryConfig>,
}

impl Refresher {
    pub fn new(
        store: Arc<PropertyStore>,
        transport: Arc<dyn Transport>,
        accept: impl Into<String>,
        retry: Option<RetryConfig>,
    ) -> Self {
        Self {
            store,
            transport,
            accept: accept.into(),
            retry,
        }
    }

    pub fn store(&self) -> &Arc<PropertyStore> {
        &self.store
    }

    /// 执行一个刷新周期
    ///
    /// # 返回
    /// - `Ok(true)`: 本周期发出了新的更新通知
    /// - `Ok(false)`: 快照未变化，或已有未消费的通知
    /// - `Err`: 请求或解析失败，快照未改动
    pub fn refresh(&self) -> Result<bool, CloudError> {
        let action = HttpAction::get(self.store.url(), self.accept.as_str());
        info!(url = %action.url, "fetching cloud configuration");

        let body = self.fetch(&action)?;
        let result = ConfigResult::decode(&body).map_err(|e| {
            error!(url = %action.url, error = %e, "decode cloud configuration failed");
            e
        })?;

        Ok(self.store.apply(&result))
    }

    fn fetch(&self, action: &HttpAction) -> Result<Vec<u8>, CloudError> {
        let Some(retry) = &self.retry else {
            return self.transport.execute(action);
        };

        (|| self.transport.execute(action))
            .retry(retry.build_backoff())
            .sleep(std::thread::sleep)
            .notify(|err: &CloudError, dur: Duration| {
                warn!(url = %action.url, error = %err, delay_ms = dur.as_millis() as u64, "retry fetching");
            })
            .call()
    }

    /// 在后台线程中每隔 `interval` 执行一次刷新，直到句柄被 drop
    pub fn spawn(self: &Arc<Self>, interval: Duration) -> TaskHandle {
        let refresher = Arc::clone(self);
        spawn_periodic("cloudcfg-refresh", interval, move || {
            if let Err(e) = refresher.refresh() {
                warn!(url = %refresher.store.url(), error = %e, "refresh cycle skipped");
            }
        })
    }
}
