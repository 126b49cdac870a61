//! 指标去重
//!
//! 同一条指标在上游经常以 "通用标签" 和 "分段标签"（如 "Psicomotriz - Parte 2"）
//! 两种形式重复出现，这里按归一化描述合并为一条

use crate::models::Indicator;
use crate::services::normalizer::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

static PART_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(parte|etapa|part|stage|fase)\s*([0-9]+|i{1,3}|iv|v)\b").unwrap()
});

/// 领域标签是否带有 "分段/阶段" 标记
pub fn has_part_marker(domain_tag: Option<&str>) -> bool {
    domain_tag
        .map(normalize)
        .is_some_and(|tag| PART_MARKER.is_match(&tag))
}

/// 按归一化描述去重
///
/// 同组内优先保留带分段标记的版本，其次 display_order 最小，最后 id 最小。
/// 输出顺序为各组首次出现的顺序
pub fn dedupe(indicators: &[Indicator]) -> Vec<Indicator> {
    let mut slots: Vec<Indicator> = Vec::with_capacity(indicators.len());
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for indicator in indicators {
        let key = indicator.description_key();
        // 空描述无法比较，按 id 单独保留
        let key = if key.is_empty() {
            format!("\u{0}{}", indicator.id)
        } else {
            key
        };

        match index_by_key.get(&key) {
            Some(&slot) => {
                if is_preferred(indicator, &slots[slot]) {
                    debug!(
                        "去重: '{}' 取代 '{}' ({})",
                        indicator.id, slots[slot].id, key
                    );
                    slots[slot] = indicator.clone();
                } else {
                    debug!("去重: 丢弃 '{}' ({})", indicator.id, key);
                }
            }
            None => {
                index_by_key.insert(key, slots.len());
                slots.push(indicator.clone());
            }
        }
    }

    slots
}

/// candidate 是否应取代 current
fn is_preferred(candidate: &Indicator, current: &Indicator) -> bool {
    let rank = |i: &Indicator| {
        (
            !has_part_marker(i.domain_tag.as_deref()),
            i.display_order,
            i.id.clone(),
        )
    };
    rank(candidate) < rank(current)
}
