//! 评价叠加 - 业务能力层
//!
//! ## 职责
//!
//! 1. 把已保存的评价记录叠加到排好的指标上，得到 指标 × 学期 的评价表
//! 2. 推导 "幽灵标记"：某学期已达成后，之后未填写的学期显示为已达成，但不保存
//! 3. 编辑规则：只有当前学期可写，写入后重新计算之后学期的幽灵标记

use crate::models::{
    DomainBucket, EvaluationGrid, EvaluationMark, GridCell, GridRow, MarkValue, Period,
};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

/// 单个指标三个学期的幽灵标记
///
/// 从左到右扫描：遇到已达成后，后续未填写（Unset）的学期为幽灵；
/// 显式填写的值（包括 Started / InProgress）不会被覆盖
pub fn ghost_flags(marks: [MarkValue; 3]) -> [bool; 3] {
    let mut flags = [false; 3];
    let scan = marks.iter().scan(false, |acquired_seen, mark| {
        let ghost = *acquired_seen && *mark == MarkValue::Unset;
        if *mark == MarkValue::Acquired {
            *acquired_seen = true;
        }
        Some(ghost)
    });
    for (flag, ghost) in flags.iter_mut().zip(scan) {
        *flag = ghost;
    }
    flags
}

/// 按指标整理出每学期的显式值
fn marks_by_indicator(marks: &[EvaluationMark]) -> BTreeMap<&str, [MarkValue; 3]> {
    let mut table: BTreeMap<&str, [MarkValue; 3]> = BTreeMap::new();
    for mark in marks {
        table.entry(mark.indicator_id.as_str()).or_default()[mark.period.index()] = mark.value;
    }
    table
}

/// 所有幽灵标记的 (indicator_id, period)
pub fn ghost_marks(marks: &[EvaluationMark]) -> BTreeSet<(String, Period)> {
    marks_by_indicator(marks)
        .into_iter()
        .flat_map(|(indicator_id, values)| {
            ghost_flags(values)
                .into_iter()
                .zip(Period::ALL)
                .filter(|(ghost, _)| *ghost)
                .map(move |(_, period)| (indicator_id.to_string(), period))
        })
        .collect()
}

/// 生成评价表，行顺序与分组顺序一致
///
/// 不属于这些分组的评价记录会被忽略
pub fn overlay(buckets: &[DomainBucket], marks: &[EvaluationMark]) -> EvaluationGrid {
    let table = marks_by_indicator(marks);
    let known: HashSet<&str> = buckets.iter().flat_map(DomainBucket::indicator_ids).collect();

    let ignored = table.keys().filter(|id| !known.contains(*id)).count();
    if ignored > 0 {
        debug!("忽略 {} 个不在成绩单上的指标的评价记录", ignored);
    }

    let rows = buckets
        .iter()
        .flat_map(DomainBucket::indicator_ids)
        .map(|indicator_id| {
            let values = table.get(indicator_id).copied().unwrap_or_default();
            GridRow {
                indicator_id: indicator_id.to_string(),
                cells: build_cells(values),
            }
        })
        .collect();

    EvaluationGrid { rows }
}

fn build_cells(values: [MarkValue; 3]) -> [GridCell; 3] {
    let ghosts = ghost_flags(values);
    [0, 1, 2].map(|i| GridCell {
        explicit: values[i],
        ghost: ghosts[i],
    })
}

// ========== 编辑 ==========

/// 编辑结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// 已写入；附带写入后该指标在之后学期的幽灵标记
    Applied {
        mark: EvaluationMark,
        ghost_periods: Vec<Period>,
    },
    /// 非当前学期，未做任何修改
    Rejected { requested: Period, current: Period },
}

/// 单个学生的评价表（教师编辑用）
#[derive(Debug, Clone)]
pub struct EvaluationSheet {
    student_id: String,
    current_period: Period,
    values: BTreeMap<String, [MarkValue; 3]>,
}

impl EvaluationSheet {
    pub fn new(
        student_id: impl Into<String>,
        current_period: Period,
        marks: &[EvaluationMark],
    ) -> Self {
        let student_id = student_id.into();
        let values = marks
            .iter()
            .filter(|mark| mark.student_id == student_id)
            .fold(BTreeMap::new(), |mut acc: BTreeMap<String, [MarkValue; 3]>, mark| {
                acc.entry(mark.indicator_id.clone()).or_default()[mark.period.index()] = mark.value;
                acc
            });

        Self {
            student_id,
            current_period,
            values,
        }
    }

    pub fn current_period(&self) -> Period {
        self.current_period
    }

    pub fn select_period(&mut self, period: Period) {
        self.current_period = period;
    }

    /// 显式值
    pub fn value(&self, indicator_id: &str, period: Period) -> MarkValue {
        self.values
            .get(indicator_id)
            .map(|values| values[period.index()])
            .unwrap_or_default()
    }

    /// 显示值（考虑幽灵标记）
    pub fn displayed(&self, indicator_id: &str, period: Period) -> MarkValue {
        let values = self.values.get(indicator_id).copied().unwrap_or_default();
        build_cells(values)[period.index()].displayed()
    }

    /// 写入一个单元格
    ///
    /// 只接受当前学期；其他学期直接返回 `Rejected`，不修改任何数据
    pub fn write(&mut self, indicator_id: &str, period: Period, value: MarkValue) -> EditOutcome {
        if period != self.current_period {
            debug!(
                "拒绝写入非当前学期: {} {} (当前 {})",
                indicator_id, period, self.current_period
            );
            return EditOutcome::Rejected {
                requested: period,
                current: self.current_period,
            };
        }

        let values = self.values.entry(indicator_id.to_string()).or_default();
        values[period.index()] = value;
        let ghosts = ghost_flags(*values);

        EditOutcome::Applied {
            mark: EvaluationMark::new(&self.student_id, indicator_id, period, value),
            ghost_periods: period.later().filter(|p| ghosts[p.index()]).collect(),
        }
    }

    /// 当前所有已填写的显式记录
    pub fn marks(&self) -> Vec<EvaluationMark> {
        self.values
            .iter()
            .flat_map(|(indicator_id, values)| {
                Period::ALL.into_iter().filter_map(move |period| {
                    let value = values[period.index()];
                    value
                        .is_set()
                        .then(|| EvaluationMark::new(&self.student_id, indicator_id, period, value))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BucketItem, Indicator};
    use MarkValue::{Acquired, InProgress, Started, Unset};

    fn marks_for(indicator_id: &str, values: [MarkValue; 3]) -> Vec<EvaluationMark> {
        Period::ALL
            .into_iter()
            .zip(values)
            .filter(|(_, v)| v.is_set())
            .map(|(p, v)| EvaluationMark::new("s1", indicator_id, p, v))
            .collect()
    }

    #[test]
    fn test_ghost_flags_propagate_acquired() {
        assert_eq!(ghost_flags([Acquired, Unset, Unset]), [false, true, true]);
        assert_eq!(ghost_flags([Acquired, Started, Unset]), [false, false, true]);
        assert_eq!(ghost_flags([Unset, Unset, Unset]), [false, false, false]);
        assert_eq!(ghost_flags([Unset, Acquired, Unset]), [false, false, true]);
        assert_eq!(ghost_flags([InProgress, Unset, Acquired]), [false, false, false]);
    }

    #[test]
    fn test_ghost_marks_sets() {
        let ghosts = ghost_marks(&marks_for("i1", [Acquired, Unset, Unset]));
        let expected: BTreeSet<(String, Period)> = [
            ("i1".to_string(), Period::Second),
            ("i1".to_string(), Period::Third),
        ]
        .into_iter()
        .collect();
        assert_eq!(ghosts, expected);

        let ghosts = ghost_marks(&marks_for("i1", [Acquired, Started, Unset]));
        assert_eq!(ghosts.len(), 1);
        assert!(ghosts.contains(&("i1".to_string(), Period::Third)));

        assert!(ghost_marks(&marks_for("i1", [Unset, Unset, Unset])).is_empty());
    }

    #[test]
    fn test_overlay_follows_bucket_order() {
        let buckets = vec![DomainBucket {
            key: "uno".into(),
            label: "Uno".into(),
            items: vec![
                BucketItem::new(Indicator::new("b", "B")),
                BucketItem::new(Indicator::new("a", "A")),
            ],
        }];
        let mut marks = marks_for("a", [Acquired, Unset, Unset]);
        marks.extend(marks_for("orphan", [Started, Unset, Unset]));

        let grid = overlay(&buckets, &marks);
        let ids: Vec<&str> = grid.rows.iter().map(|r| r.indicator_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let row = grid.row("a").unwrap();
        assert_eq!(row.cell(Period::First).explicit, Acquired);
        assert!(row.cell(Period::Second).ghost);
        assert_eq!(row.cell(Period::Third).displayed(), Acquired);
        assert_eq!(grid.row("b").unwrap().cell(Period::First).displayed(), Unset);
        assert!(grid.row("orphan").is_none());
    }

    #[test]
    fn test_sheet_rejects_other_periods() {
        let mut sheet = EvaluationSheet::new("s1", Period::Second, &[]);
        let outcome = sheet.write("i1", Period::First, Acquired);

        assert_eq!(
            outcome,
            EditOutcome::Rejected {
                requested: Period::First,
                current: Period::Second
            }
        );
        assert_eq!(sheet.value("i1", Period::First), Unset);
        assert!(sheet.marks().is_empty());
    }

    #[test]
    fn test_sheet_toggle_acquired_updates_ghosts() {
        let mut sheet = EvaluationSheet::new("s1", Period::First, &[]);

        let outcome = sheet.write("i1", Period::First, Acquired);
        match outcome {
            EditOutcome::Applied { mark, ghost_periods } => {
                assert_eq!(mark.value, Acquired);
                assert_eq!(ghost_periods, vec![Period::Second, Period::Third]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(sheet.displayed("i1", Period::Third), Acquired);
        assert_eq!(sheet.value("i1", Period::Third), Unset);

        // 清空第一学期后，幽灵标记全部消失
        let outcome = sheet.write("i1", Period::First, Unset);
        assert!(matches!(
            outcome,
            EditOutcome::Applied { ref ghost_periods, .. } if ghost_periods.is_empty()
        ));
        assert_eq!(sheet.displayed("i1", Period::Second), Unset);
    }

    #[test]
    fn test_sheet_write_keeps_other_periods() {
        let existing = marks_for("i1", [Started, InProgress, Unset]);
        let mut sheet = EvaluationSheet::new("s1", Period::Third, &existing);

        sheet.write("i1", Period::Third, Acquired);

        assert_eq!(sheet.value("i1", Period::First), Started);
        assert_eq!(sheet.value("i1", Period::Second), InProgress);
        assert_eq!(sheet.marks().len(), 3);
    }
}
