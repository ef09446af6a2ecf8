use backon::ExponentialBuilder;
use garde::Validate;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use std::time::Duration;

use super::duration::{serde_as, HumanDur};

/// 单次拉取内的重试配置
///
/// 不配置时每个刷新周期只请求一次，失败后等待下一个周期；
/// 配置后在同一周期内按指数退避重试，次数有上限
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, SmartDefault, Validate)]
#[serde(default)]
pub struct RetryConfig {
    /// 最大重试次数（不含首次请求）
    #[default = 3]
    #[garde(range(min = 1, max = 100))]
    pub max_times: usize,

    /// 首次重试前的等待时间
    #[serde_as(as = "HumanDur")]
    #[default(Duration::from_millis(500))]
    #[garde(skip)]
    pub min_delay: Duration,

    /// 单次等待的上限
    #[serde_as(as = "HumanDur")]
    #[default(Duration::from_secs(5))]
    #[garde(skip)]
    pub max_delay: Duration,

    /// 退避因子
    #[default = 2.0]
    #[garde(range(min = 1.0))]
    pub factor: f32,

    /// 是否在延迟上叠加随机抖动
    #[garde(skip)]
    pub jitter: bool,
}

impl RetryConfig {
    /// 构建 backon 的指数退避策略
    pub fn build_backoff(&self) -> ExponentialBuilder {
        let builder = ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_factor(self.factor)
            .with_max_times(self.max_times);

        if self.jitter {
            builder.with_jitter()
        } else {
            builder
        }
    }
}
