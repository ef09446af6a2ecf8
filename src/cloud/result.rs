use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::error::CloudError;

/// 一个具名的属性层，例如 `application-dev.yml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertySource {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub source: Map<String, JsonValue>,
}

/// 字段为 null 时与缺省相同，取默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl PropertySource {
    pub fn new(name: impl Into<String>, source: Map<String, JsonValue>) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

/// 配置中心一次请求的返回结果
///
/// `property_sources` 按优先级排列，下标 0 优先级最高
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigResult {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub profiles: Vec<String>,
    pub label: Option<String>,
    pub version: Option<String>,
    pub state: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub property_sources: Vec<PropertySource>,
}

impl ConfigResult {
    /// 解析响应体
    pub fn decode(body: &[u8]) -> Result<Self, CloudError> {
        Ok(serde_json::from_slice(body)?)
    }
}
