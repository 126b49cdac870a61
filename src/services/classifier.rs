//! 指标分类 - 业务能力层
//!
//! ## 职责
//!
//! 把去重后的指标分配到领域分组（`DomainBucket`）。
//!
//! ## 两种策略
//!
//! - **可信标签**（默认）：按 `domain_tag` 与年级的标准领域名做宽松匹配
//! - **白名单**：上游标签不可靠的年级，按手工维护的标准描述列表逐条匹配，
//!   组内顺序由列表位置决定
//!
//! 两种策略都不会丢弃指标：无法匹配的进入末尾的 "Sin categoría" 分组。
//! 策略按年级（及托班细分阶段）注册在 `ClassifierRegistry` 中。

use crate::models::{BucketItem, DomainBucket, GradeContext, GradeLevel, Indicator};
use crate::rules;
use crate::services::normalizer::{loosely_matches, normalize};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

/// 兜底分组的显示名
pub const UNCATEGORIZED_LABEL: &str = "Sin categoría";

/// 分类结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub buckets: Vec<DomainBucket>,
    /// 白名单策略下，因与已分类指标文本重叠而未进入兜底分组的指标
    pub suppressed: Vec<Indicator>,
}

impl Classification {
    pub fn indicator_count(&self) -> usize {
        self.buckets.iter().map(DomainBucket::len).sum()
    }
}

/// 分类策略
pub trait ClassifyStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn classify(&self, indicators: &[Indicator]) -> Classification;
}

/// 白名单中的一个领域：显示名 + 标准描述列表（列表顺序即显示顺序）
#[derive(Debug, Clone, Copy)]
pub struct AllowListBucket {
    pub label: &'static str,
    pub entries: &'static [&'static str],
}

// ========== 可信标签策略 ==========

/// 按上游领域标签分组
pub struct TrustedTagStrategy {
    labels: Vec<(&'static str, String)>,
}

impl TrustedTagStrategy {
    pub fn new(labels: &[&'static str]) -> Self {
        Self {
            labels: labels.iter().map(|label| (*label, normalize(label))).collect(),
        }
    }

    fn resolve(&self, tag: Option<&str>) -> Option<usize> {
        let tag_key = normalize(tag?);
        self.labels
            .iter()
            .position(|(_, label_key)| loosely_matches(&tag_key, label_key))
    }
}

impl ClassifyStrategy for TrustedTagStrategy {
    fn name(&self) -> &'static str {
        "trusted-tag"
    }

    fn classify(&self, indicators: &[Indicator]) -> Classification {
        let mut grouped: Vec<Vec<Indicator>> = vec![Vec::new(); self.labels.len()];
        let mut uncategorized = Vec::new();

        for indicator in indicators {
            match self.resolve(indicator.domain_tag.as_deref()) {
                Some(slot) => grouped[slot].push(indicator.clone()),
                None => {
                    debug!(
                        "标签无法匹配: {} ({:?})",
                        indicator.id, indicator.domain_tag
                    );
                    uncategorized.push(indicator.clone());
                }
            }
        }

        let mut buckets: Vec<DomainBucket> = self
            .labels
            .iter()
            .zip(grouped)
            .filter(|(_, members)| !members.is_empty())
            .map(|((label, key), mut members)| {
                sort_by_display_order(&mut members);
                build_bucket(key.clone(), label, members)
            })
            .collect();

        push_uncategorized(&mut buckets, uncategorized);

        Classification {
            buckets,
            suppressed: Vec::new(),
        }
    }
}

// ========== 白名单策略 ==========

/// 按标准描述列表分组
pub struct AllowListStrategy {
    buckets: Vec<(&'static str, String, Vec<String>)>,
}

impl AllowListStrategy {
    pub fn new(buckets: &[AllowListBucket]) -> Self {
        Self {
            buckets: buckets
                .iter()
                .map(|b| {
                    (
                        b.label,
                        normalize(b.label),
                        b.entries.iter().map(|e| normalize(e)).collect(),
                    )
                })
                .collect(),
        }
    }

    /// 找到第一个匹配的 (分组下标, 列表位置)
    fn resolve(&self, description_key: &str) -> Option<(usize, usize)> {
        let mut matches = self.buckets.iter().enumerate().filter_map(|(slot, (_, _, entries))| {
            entries
                .iter()
                .position(|entry| loosely_matches(description_key, entry))
                .map(|position| (slot, position))
        });

        let first = matches.next()?;
        if let Some((other, _)) = matches.next() {
            debug!(
                "白名单多重匹配，取第一个分组: '{}' → {} / {}",
                description_key, self.buckets[first.0].0, self.buckets[other].0
            );
        }
        Some(first)
    }
}

impl ClassifyStrategy for AllowListStrategy {
    fn name(&self) -> &'static str {
        "allow-list"
    }

    fn classify(&self, indicators: &[Indicator]) -> Classification {
        let mut grouped: Vec<Vec<(usize, Indicator)>> = vec![Vec::new(); self.buckets.len()];
        let mut classified_keys: Vec<String> = Vec::new();
        let mut unmatched: Vec<(String, Indicator)> = Vec::new();

        for indicator in indicators {
            let key = indicator.description_key();
            match self.resolve(&key) {
                Some((slot, position)) => {
                    grouped[slot].push((position, indicator.clone()));
                    classified_keys.push(key);
                }
                None => unmatched.push((key, indicator.clone())),
            }
        }

        // 同一条指标换了写法后不应再出现在兜底分组里
        let (suppressed, uncategorized): (Vec<_>, Vec<_>) =
            unmatched.into_iter().partition(|(key, _)| {
                classified_keys
                    .iter()
                    .any(|classified| loosely_matches(key, classified))
            });
        for (key, indicator) in &suppressed {
            debug!("白名单: 抑制重复写法 {} ('{}')", indicator.id, key);
        }

        let mut buckets: Vec<DomainBucket> = self
            .buckets
            .iter()
            .zip(grouped)
            .filter(|(_, members)| !members.is_empty())
            .map(|((label, key, _), mut members)| {
                members.sort_by(|(pa, a), (pb, b)| {
                    pa.cmp(pb)
                        .then(a.display_order.cmp(&b.display_order))
                        .then_with(|| a.id.cmp(&b.id))
                });
                build_bucket(
                    key.clone(),
                    label,
                    members.into_iter().map(|(_, indicator)| indicator).collect(),
                )
            })
            .collect();

        push_uncategorized(
            &mut buckets,
            uncategorized.into_iter().map(|(_, indicator)| indicator).collect(),
        );

        Classification {
            buckets,
            suppressed: suppressed.into_iter().map(|(_, indicator)| indicator).collect(),
        }
    }
}

// ========== 策略注册表 ==========

type RegistryKey = (GradeLevel, Option<String>);

/// 年级 → 分类策略
///
/// 查找顺序：(年级, 细分阶段) → (年级) → 默认策略
pub struct ClassifierRegistry {
    strategies: HashMap<RegistryKey, Box<dyn ClassifyStrategy>>,
    default: Box<dyn ClassifyStrategy>,
}

impl ClassifierRegistry {
    pub fn new(default: Box<dyn ClassifyStrategy>) -> Self {
        Self {
            strategies: HashMap::new(),
            default,
        }
    }

    /// 内置规则表
    pub fn builtin() -> Self {
        rules::builtin_classifiers()
    }

    pub fn register(
        &mut self,
        grade: GradeLevel,
        sub_level: Option<&str>,
        strategy: Box<dyn ClassifyStrategy>,
    ) {
        let key = (grade, sub_level.map(normalize));
        self.strategies.insert(key, strategy);
    }

    pub fn strategy_for(&self, ctx: &GradeContext) -> &dyn ClassifyStrategy {
        if let Some(sub_level) = ctx.sub_level_key() {
            if let Some(strategy) = self.strategies.get(&(ctx.grade, Some(sub_level))) {
                return strategy.as_ref();
            }
        }
        self.strategies
            .get(&(ctx.grade, None))
            .map(|strategy| strategy.as_ref())
            .unwrap_or(self.default.as_ref())
    }

    pub fn classify(&self, indicators: &[Indicator], ctx: &GradeContext) -> Classification {
        let strategy = self.strategy_for(ctx);
        let result = strategy.classify(indicators);
        debug!(
            "{} 使用 {} 策略: {} 个指标 → {} 个分组, 抑制 {} 个",
            ctx,
            strategy.name(),
            indicators.len(),
            result.buckets.len(),
            result.suppressed.len()
        );
        result
    }
}

static BUILTIN_CLASSIFIERS: Lazy<ClassifierRegistry> = Lazy::new(ClassifierRegistry::builtin);

/// 使用内置规则表分类
pub fn classify(indicators: &[Indicator], ctx: &GradeContext) -> Vec<DomainBucket> {
    BUILTIN_CLASSIFIERS.classify(indicators, ctx).buckets
}

// ========== 辅助函数 ==========

fn sort_by_display_order(members: &mut [Indicator]) {
    members.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn build_bucket(key: String, label: &str, members: Vec<Indicator>) -> DomainBucket {
    DomainBucket {
        key,
        label: label.to_string(),
        items: members.into_iter().map(BucketItem::new).collect(),
    }
}

fn push_uncategorized(buckets: &mut Vec<DomainBucket>, mut members: Vec<Indicator>) {
    if members.is_empty() {
        return;
    }
    sort_by_display_order(&mut members);
    buckets.push(build_bucket(
        normalize(UNCATEGORIZED_LABEL),
        UNCATEGORIZED_LABEL,
        members,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[&str] = &["Personal Social", "Psicomotriz", "Comunicación"];

    static TEST_ALLOW_LIST: &[AllowListBucket] = &[
        AllowListBucket {
            label: "Psicomotriz",
            entries: &["Salta con dos pies", "Corre con seguridad"],
        },
        AllowListBucket {
            label: "Comunicación",
            entries: &["Nombra objetos de su entorno", "Canta canciones"],
        },
    ];

    fn ids(bucket: &DomainBucket) -> Vec<&str> {
        bucket.indicator_ids().collect()
    }

    #[test]
    fn test_trusted_tag_groups_by_label_order() {
        let indicators = vec![
            Indicator::new("c1", "Habla").with_tag("COMUNICACION").with_order(2),
            Indicator::new("p1", "Corre").with_tag("Área Psicomotriz").with_order(1),
            Indicator::new("c0", "Escucha").with_tag("Comunicación - Parte 1").with_order(1),
        ];
        let result = TrustedTagStrategy::new(LABELS).classify(&indicators);

        assert_eq!(result.buckets.len(), 2);
        assert_eq!(result.buckets[0].label, "Psicomotriz");
        assert_eq!(result.buckets[1].label, "Comunicación");
        assert_eq!(ids(&result.buckets[1]), vec!["c0", "c1"]);
    }

    #[test]
    fn test_trusted_tag_unmatched_goes_last() {
        let indicators = vec![
            Indicator::new("x", "Algo").with_tag("Inglés"),
            Indicator::new("y", "Otro"),
            Indicator::new("p", "Saluda").with_tag("personal social"),
        ];
        let result = TrustedTagStrategy::new(LABELS).classify(&indicators);

        let last = result.buckets.last().unwrap();
        assert_eq!(last.label, UNCATEGORIZED_LABEL);
        assert_eq!(last.len(), 2);
        assert_eq!(result.indicator_count(), 3);
    }

    #[test]
    fn test_allow_list_orders_by_list_position() {
        let indicators = vec![
            Indicator::new("a", "Corre con seguridad.").with_order(1),
            Indicator::new("b", "salta con dos pies").with_order(2),
            Indicator::new("c", "Canta canciones infantiles").with_order(3),
        ];
        let result = AllowListStrategy::new(TEST_ALLOW_LIST).classify(&indicators);

        assert_eq!(result.buckets.len(), 2);
        assert_eq!(ids(&result.buckets[0]), vec!["b", "a"]);
        assert_eq!(ids(&result.buckets[1]), vec!["c"]);
    }

    #[test]
    fn test_allow_list_matches_single_bucket() {
        // "Corre con seguridad y canta canciones" contiene entradas de dos grupos
        let indicators = vec![Indicator::new("m", "Corre con seguridad y canta canciones")];
        let result = AllowListStrategy::new(TEST_ALLOW_LIST).classify(&indicators);

        assert_eq!(result.indicator_count(), 1);
        assert_eq!(result.buckets[0].label, "Psicomotriz");
    }

    #[test]
    fn test_allow_list_suppresses_surface_duplicates() {
        let indicators = vec![
            Indicator::new("a", "Nombra objetos de su entorno cercano"),
            Indicator::new("dup", "objetos de su entorno cercano"),
            Indicator::new("new", "Dibuja libremente"),
        ];
        let result = AllowListStrategy::new(TEST_ALLOW_LIST).classify(&indicators);

        let suppressed: Vec<&str> = result.suppressed.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(suppressed, vec!["dup"]);
        let last = result.buckets.last().unwrap();
        assert_eq!(last.label, UNCATEGORIZED_LABEL);
        assert_eq!(ids(last), vec!["new"]);
    }

    #[test]
    fn test_registry_prefers_sub_level_strategy() {
        let mut registry = ClassifierRegistry::new(Box::new(TrustedTagStrategy::new(LABELS)));
        registry.register(
            GradeLevel::Nursery,
            Some("Caminantes"),
            Box::new(AllowListStrategy::new(TEST_ALLOW_LIST)),
        );

        let walkers = GradeContext::new(GradeLevel::Nursery).with_sub_level("caminantes");
        let babies = GradeContext::new(GradeLevel::Nursery).with_sub_level("lactantes");
        assert_eq!(registry.strategy_for(&walkers).name(), "allow-list");
        assert_eq!(registry.strategy_for(&babies).name(), "trusted-tag");
    }

    #[test]
    fn test_classify_is_deterministic() {
        let indicators = vec![
            Indicator::new("b", "Uno").with_tag("Psicomotriz").with_order(1),
            Indicator::new("a", "Dos").with_tag("Psicomotriz").with_order(1),
            Indicator::new("c", "Tres").with_tag("???"),
        ];
        let ctx = GradeContext::new(GradeLevel::FourYears);
        let first = classify(&indicators, &ctx);
        let second = classify(&indicators, &ctx);
        assert_eq!(first, second);
        assert_eq!(ids(&first[0]), vec!["a", "b"]);
    }
}
