//! 多层属性合并
//!
//! 下标小的层优先级高。合并只新增或覆盖，不删除：服务端不再返回的 key 会保留旧值，
//! 因此服务端删除的配置在客户端不可见

use serde_json::Value as JsonValue;

use super::result::PropertySource;
use super::store::Snapshot;

/// 把各层属性合并到快照中
///
/// 从最后一层向第一层依次写入，后写入的（下标小的）覆盖先写入的
pub fn merge_sources(snapshot: &mut Snapshot, sources: &[PropertySource]) {
    for source in sources.iter().rev() {
        for (key, value) in &source.source {
            snapshot.insert(key.clone(), stringify(value));
        }
    }
}

/// 把 JSON 值转成快照中的字符串
///
/// null 转为空字符串，数组和对象保留紧凑的 JSON 文本
pub fn stringify(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
