//! 成绩单排版引擎
//!
//! 串联 去重 → 分类 → 缩写 → 排版，纯同步计算，不持有可变共享状态，
//! 可以在多个学生之间并行调用。

use crate::models::{DomainBucket, GradeContext, Indicator, PaginatedBulletin};
use crate::services::classifier::ClassifierRegistry;
use crate::services::deduplicator::dedupe;
use crate::services::paginator::{LayoutRegistry, Paginator};
use crate::services::summarizer::apply_summaries;
use tracing::debug;

/// 单次排版的结果
#[derive(Debug, Clone)]
pub struct RenderedLayout {
    /// 缩写后的分组（评价表按此顺序生成）
    pub buckets: Vec<DomainBucket>,
    pub bulletin: PaginatedBulletin,
    /// 被白名单策略判定为重复写法的指标
    pub suppressed: Vec<Indicator>,
    /// 去重丢弃的数量
    pub duplicates_removed: usize,
}

pub struct BulletinEngine {
    classifiers: ClassifierRegistry,
    paginator: Paginator,
}

impl BulletinEngine {
    pub fn new(classifiers: ClassifierRegistry, layouts: LayoutRegistry) -> Self {
        Self {
            classifiers,
            paginator: Paginator::new(layouts),
        }
    }

    /// 使用内置规则表
    pub fn builtin() -> Self {
        Self::new(ClassifierRegistry::builtin(), LayoutRegistry::builtin())
    }

    pub fn with_layouts(layouts: LayoutRegistry) -> Self {
        Self::new(ClassifierRegistry::builtin(), layouts)
    }

    pub fn render(&self, indicators: &[Indicator], ctx: &GradeContext) -> RenderedLayout {
        let unique = dedupe(indicators);
        let duplicates_removed = indicators.len() - unique.len();

        let classification = self.classifiers.classify(&unique, ctx);
        let mut buckets = classification.buckets;
        apply_summaries(&mut buckets, ctx);

        let bulletin = self.paginator.paginate(&buckets, ctx);
        debug!(
            "{}: 左栏 {} / 右栏 {} / 续页 {} (去重 {}, 抑制 {})",
            ctx,
            bulletin.left_column.len(),
            bulletin.right_column.len(),
            bulletin.continuation_page.len(),
            duplicates_removed,
            classification.suppressed.len()
        );

        RenderedLayout {
            buckets,
            bulletin,
            suppressed: classification.suppressed,
            duplicates_removed,
        }
    }
}

impl Default for BulletinEngine {
    fn default() -> Self {
        Self::builtin()
    }
}
