//! 占位符替换
//!
//! 值中包含 `${name}` 时，整个值替换为 key `name` 的当前值。每次合并只替换一轮：
//! 链式引用每个刷新周期向前解析一层，目标不存在时替换为空字符串

use super::store::Snapshot;

/// 取出值中第一个占位符引用的 key
///
/// 缺少 `}` 时取 `${` 之后的全部内容
pub fn placeholder_key(value: &str) -> Option<&str> {
    let start = value.find("${")? + 2;
    let rest = &value[start..];
    Some(rest.find('}').map_or(rest, |end| &rest[..end]))
}

/// 对快照做一轮占位符替换
///
/// 替换结果基于替换前的快照计算，与遍历顺序无关
pub fn resolve_placeholders(snapshot: &mut Snapshot) {
    let replacements: Vec<(String, String)> = snapshot
        .iter()
        .filter_map(|(key, value)| {
            let target = placeholder_key(value)?;
            let resolved = snapshot.get(target).cloned().unwrap_or_default();
            Some((key.clone(), resolved))
        })
        .collect();

    for (key, resolved) in replacements {
        snapshot.insert(key, resolved);
    }
}
