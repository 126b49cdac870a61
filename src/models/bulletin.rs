use super::evaluation::{MarkValue, Period, PeriodObservation};
use super::grade::{GradeContext, GradeLevel};
use super::indicator::Indicator;
use serde::{Deserialize, Serialize};

/// 领域分组中的一项：指标 + 显示文本（可能被缩写）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketItem {
    pub indicator: Indicator,
    pub display_text: String,
}

impl BucketItem {
    pub fn new(indicator: Indicator) -> Self {
        let display_text = indicator.description.clone();
        Self {
            indicator,
            display_text,
        }
    }
}

/// 领域分组：同一领域的有序指标 + 领域显示名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainBucket {
    /// 归一化后的领域键，排版规则按此引用
    pub key: String,
    pub label: String,
    pub items: Vec<BucketItem>,
}

impl DomainBucket {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn indicator_ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.indicator.id.as_str())
    }
}

/// 排版目标位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    /// 主页左栏
    Left,
    /// 主页右栏
    Right,
    /// 续页
    Continuation,
}

/// 成绩单中的一行指标
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletinRow {
    pub domain_key: String,
    pub domain_label: String,
    pub indicator: Indicator,
    pub display_text: String,
}

/// 栏内条目：领域标题或指标行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutEntry {
    CategoryHeader { label: String },
    IndicatorRow(BulletinRow),
}

impl LayoutEntry {
    pub fn as_row(&self) -> Option<&BulletinRow> {
        match self {
            LayoutEntry::IndicatorRow(row) => Some(row),
            LayoutEntry::CategoryHeader { .. } => None,
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self, LayoutEntry::CategoryHeader { .. })
    }
}

/// 排版结果（每次生成时重新计算，不持久化）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedBulletin {
    pub left_column: Vec<LayoutEntry>,
    pub right_column: Vec<LayoutEntry>,
    pub continuation_page: Vec<LayoutEntry>,
}

impl PaginatedBulletin {
    pub fn column(&self, destination: Destination) -> &[LayoutEntry] {
        match destination {
            Destination::Left => &self.left_column,
            Destination::Right => &self.right_column,
            Destination::Continuation => &self.continuation_page,
        }
    }

    /// 某一栏中的指标行（不含标题）
    pub fn rows_in(&self, destination: Destination) -> impl Iterator<Item = &BulletinRow> {
        self.column(destination).iter().filter_map(LayoutEntry::as_row)
    }

    /// 按 左栏 → 右栏 → 续页 顺序遍历全部指标行
    pub fn rows(&self) -> impl Iterator<Item = &BulletinRow> {
        self.rows_in(Destination::Left)
            .chain(self.rows_in(Destination::Right))
            .chain(self.rows_in(Destination::Continuation))
    }

    pub fn row_count(&self, destination: Destination) -> usize {
        self.rows_in(destination).count()
    }

    pub fn has_continuation(&self) -> bool {
        !self.continuation_page.is_empty()
    }
}

/// 评价表中的一个单元格
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub explicit: MarkValue,
    /// 由前一学期的 "已达成" 推导出的显示用标记，不持久化
    pub ghost: bool,
}

impl GridCell {
    /// 最终显示的等级
    pub fn displayed(&self) -> MarkValue {
        if self.ghost {
            MarkValue::Acquired
        } else {
            self.explicit
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub indicator_id: String,
    pub cells: [GridCell; 3],
}

impl GridRow {
    pub fn cell(&self, period: Period) -> &GridCell {
        &self.cells[period.index()]
    }
}

/// 指标 × 学期 评价表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationGrid {
    pub rows: Vec<GridRow>,
}

impl EvaluationGrid {
    pub fn row(&self, indicator_id: &str) -> Option<&GridRow> {
        self.rows.iter().find(|row| row.indicator_id == indicator_id)
    }
}

/// 学生基本信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    pub grade: GradeLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_level: Option<String>,
}

impl StudentRecord {
    pub fn grade_context(&self) -> GradeContext {
        GradeContext {
            grade: self.grade,
            sub_level: self.sub_level.clone(),
        }
    }
}

/// 交给渲染端的完整成绩单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentBulletin {
    pub student_id: String,
    pub student_name: String,
    pub grade: GradeContext,
    pub layout: PaginatedBulletin,
    pub grid: EvaluationGrid,
    pub observations: Vec<PeriodObservation>,
    pub generated_at: String,
}
