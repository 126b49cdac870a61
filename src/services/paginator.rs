//! 成绩单分栏排版 - 业务能力层
//!
//! ## 职责
//!
//! 把分类好的领域分组排进 左栏 / 右栏 / 续页。
//!
//! - 没有专用策略的年级：所有指标拼接后按 ceil(n/2) 对半分栏，续页为空
//! - 有专用策略的年级：按规则顺序放置整个分组或切分后的头尾两段
//!
//! 切分数量是针对打印版面手工调好的固定值，必须原样保留，不做动态计算。
//! 每一栏里，当前行的领域与上一行不同时插入领域标题。

use crate::error::{AppError, AppResult, LayoutError};
use crate::models::{
    BulletinRow, Destination, DomainBucket, GradeContext, GradeLevel, LayoutEntry,
    PaginatedBulletin,
};
use crate::rules;
use crate::services::normalizer::normalize;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

/// 放置方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    /// 整个分组放到一个位置
    Whole { to: Destination },
    /// 前 count 条放到 head，其余放到 tail
    Head {
        count: usize,
        head: Destination,
        tail: Destination,
    },
    /// 最后 count 条放到 tail，其余放到 head
    LastN {
        count: usize,
        head: Destination,
        tail: Destination,
    },
}

/// 单条放置规则，按领域名引用分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRule {
    pub domain: String,
    pub placement: Placement,
}

impl PlacementRule {
    pub fn whole(domain: &str, to: Destination) -> Self {
        Self {
            domain: domain.to_string(),
            placement: Placement::Whole { to },
        }
    }

    pub fn head(domain: &str, count: usize, head: Destination, tail: Destination) -> Self {
        Self {
            domain: domain.to_string(),
            placement: Placement::Head { count, head, tail },
        }
    }

    pub fn last(domain: &str, count: usize, head: Destination, tail: Destination) -> Self {
        Self {
            domain: domain.to_string(),
            placement: Placement::LastN { count, head, tail },
        }
    }

    fn slice_count(&self) -> Option<usize> {
        match self.placement {
            Placement::Whole { .. } => None,
            Placement::Head { count, .. } | Placement::LastN { count, .. } => Some(count),
        }
    }
}

fn default_unplaced() -> Destination {
    Destination::Continuation
}

/// 某个年级的排版策略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutPolicy {
    pub rules: Vec<PlacementRule>,
    /// 没有被任何规则引用的分组（包括兜底分组）放到这里
    #[serde(default = "default_unplaced")]
    pub unplaced: Destination,
}

impl LayoutPolicy {
    pub fn new(rules: Vec<PlacementRule>) -> Self {
        Self {
            rules,
            unplaced: default_unplaced(),
        }
    }

    pub fn with_unplaced(mut self, destination: Destination) -> Self {
        self.unplaced = destination;
        self
    }

    fn validate(&self, grade: &str) -> Result<(), LayoutError> {
        for rule in &self.rules {
            if rule.slice_count() == Some(0) {
                return Err(LayoutError::ZeroSliceCount {
                    grade: grade.to_string(),
                    domain: rule.domain.clone(),
                });
            }
        }
        Ok(())
    }
}

/// 排版策略覆盖文件中的一项
#[derive(Debug, Deserialize)]
struct GradeLayoutOverride {
    grade: String,
    #[serde(flatten)]
    policy: LayoutPolicy,
}

#[derive(Debug, Deserialize)]
struct LayoutOverrideFile {
    #[serde(default)]
    grades: Vec<GradeLayoutOverride>,
}

/// 年级 → 排版策略
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    policies: HashMap<GradeLevel, LayoutPolicy>,
}

impl LayoutRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        rules::builtin_layouts()
    }

    pub fn insert(&mut self, grade: GradeLevel, policy: LayoutPolicy) {
        self.policies.insert(grade, policy);
    }

    pub fn policy_for(&self, grade: GradeLevel) -> Option<&LayoutPolicy> {
        self.policies.get(&grade)
    }

    /// 从 TOML 文本加载覆盖策略，返回覆盖的年级数量
    ///
    /// ```toml
    /// [[grades]]
    /// grade = "4 años"
    /// unplaced = "right"
    ///
    /// [[grades.rules]]
    /// domain = "Matemática"
    /// placement = { kind = "last_n", count = 5, head = "right", tail = "continuation" }
    /// ```
    pub fn apply_overrides_str(&mut self, raw: &str) -> AppResult<usize> {
        let file: LayoutOverrideFile = toml::from_str(raw)?;
        self.apply_override_file(file)
    }

    /// 从 TOML 文件加载覆盖策略
    pub async fn apply_overrides_file(&mut self, path: &Path) -> AppResult<usize> {
        let path_str = path.display().to_string();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(&path_str, e))?;
        let file: LayoutOverrideFile =
            toml::from_str(&raw).map_err(|e| AppError::toml_parse_failed(&path_str, e))?;
        self.apply_override_file(file)
    }

    fn apply_override_file(&mut self, file: LayoutOverrideFile) -> AppResult<usize> {
        let count = file.grades.len();

        for entry in file.grades {
            let grade = GradeLevel::find(&entry.grade).ok_or_else(|| LayoutError::UnknownGrade {
                grade: entry.grade.clone(),
            })?;
            entry.policy.validate(&entry.grade)?;
            info!("📐 覆盖 {} 的排版策略 ({} 条规则)", grade, entry.policy.rules.len());
            self.insert(grade, entry.policy);
        }

        Ok(count)
    }
}

/// 排版器
pub struct Paginator {
    layouts: LayoutRegistry,
}

impl Paginator {
    pub fn new(layouts: LayoutRegistry) -> Self {
        Self { layouts }
    }

    pub fn layouts(&self) -> &LayoutRegistry {
        &self.layouts
    }

    pub fn paginate(&self, buckets: &[DomainBucket], ctx: &GradeContext) -> PaginatedBulletin {
        paginate_with(buckets, self.layouts.policy_for(ctx.grade))
    }
}

static BUILTIN_LAYOUTS: Lazy<LayoutRegistry> = Lazy::new(LayoutRegistry::builtin);

/// 使用内置策略排版
pub fn paginate(buckets: &[DomainBucket], ctx: &GradeContext) -> PaginatedBulletin {
    paginate_with(buckets, BUILTIN_LAYOUTS.policy_for(ctx.grade))
}

/// 按给定策略排版，没有策略时对半分栏
pub fn paginate_with(buckets: &[DomainBucket], policy: Option<&LayoutPolicy>) -> PaginatedBulletin {
    match policy {
        Some(policy) => apply_policy(buckets, policy),
        None => split_in_half(buckets),
    }
}

/// 默认策略：拼接后按 ceil(n/2) 分成左右两栏
fn split_in_half(buckets: &[DomainBucket]) -> PaginatedBulletin {
    let rows: Vec<BulletinRow> = buckets.iter().flat_map(bucket_rows).collect();
    let split_at = rows.len().div_ceil(2);
    let mut left = rows;
    let right = left.split_off(split_at);

    PaginatedBulletin {
        left_column: with_headers(left),
        right_column: with_headers(right),
        continuation_page: Vec::new(),
    }
}

fn apply_policy(buckets: &[DomainBucket], policy: &LayoutPolicy) -> PaginatedBulletin {
    let mut columns: [Vec<BulletinRow>; 3] = Default::default();
    let mut placed: HashSet<usize> = HashSet::new();

    for rule in &policy.rules {
        let key = normalize(&rule.domain);
        let Some(index) = buckets.iter().position(|b| b.key == key) else {
            debug!("排版规则 '{}' 没有对应的分组，跳过", rule.domain);
            continue;
        };
        if !placed.insert(index) {
            warn!("分组 '{}' 被多条规则引用，只使用第一条", rule.domain);
            continue;
        }

        let mut rows: Vec<BulletinRow> = bucket_rows(&buckets[index]).collect();
        let (head_dest, tail_dest, tail) = match rule.placement {
            Placement::Whole { to } => (to, to, Vec::new()),
            Placement::Head { count, head, tail } => {
                let cut = count.min(rows.len());
                (head, tail, rows.split_off(cut))
            }
            Placement::LastN { count, head, tail } => {
                let cut = rows.len() - count.min(rows.len());
                (head, tail, rows.split_off(cut))
            }
        };

        columns[slot(head_dest)].extend(rows);
        columns[slot(tail_dest)].extend(tail);
    }

    for (index, bucket) in buckets.iter().enumerate() {
        if placed.contains(&index) {
            continue;
        }
        debug!("分组 '{}' 未被规则引用，放到 {:?}", bucket.label, policy.unplaced);
        columns[slot(policy.unplaced)].extend(bucket_rows(bucket));
    }

    let [left, right, continuation] = columns;
    PaginatedBulletin {
        left_column: with_headers(left),
        right_column: with_headers(right),
        continuation_page: with_headers(continuation),
    }
}

fn slot(destination: Destination) -> usize {
    match destination {
        Destination::Left => 0,
        Destination::Right => 1,
        Destination::Continuation => 2,
    }
}

fn bucket_rows(bucket: &DomainBucket) -> impl Iterator<Item = BulletinRow> + '_ {
    bucket.items.iter().map(|item| BulletinRow {
        domain_key: bucket.key.clone(),
        domain_label: bucket.label.clone(),
        indicator: item.indicator.clone(),
        display_text: item.display_text.clone(),
    })
}

/// 在领域变化处插入标题
fn with_headers(rows: Vec<BulletinRow>) -> Vec<LayoutEntry> {
    let mut entries = Vec::with_capacity(rows.len() + 4);
    let mut current: Option<String> = None;

    for row in rows {
        if current.as_deref() != Some(row.domain_key.as_str()) {
            current = Some(row.domain_key.clone());
            entries.push(LayoutEntry::CategoryHeader {
                label: row.domain_label.clone(),
            });
        }
        entries.push(LayoutEntry::IndicatorRow(row));
    }

    entries
}
