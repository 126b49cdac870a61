//! 评价编辑流程
//!
//! 教师在评价表上点选单元格：只有当前学期可写，写入立即持久化，
//! 之后学期的幽灵标记随之重新计算（幽灵标记本身从不保存）。

use tracing::{info, warn};

use crate::error::AppResult;
use crate::infrastructure::{BulletinDataSource, MarkStore};
use crate::models::{MarkValue, Period};
use crate::services::{EditOutcome, EvaluationSheet};

pub struct MarkEditor<'a, S> {
    store: &'a S,
    sheet: EvaluationSheet,
}

impl<'a, S: BulletinDataSource + MarkStore> MarkEditor<'a, S> {
    /// 加载学生已有的评价记录
    pub async fn open(store: &'a S, student_id: &str, current_period: Period) -> AppResult<Self> {
        let marks = store.fetch_evaluation_marks(student_id).await?;
        Ok(Self {
            store,
            sheet: EvaluationSheet::new(student_id, current_period, &marks),
        })
    }

    pub fn sheet(&self) -> &EvaluationSheet {
        &self.sheet
    }

    /// 写入一个单元格
    ///
    /// 被拒绝的写入不触碰存储；保存失败时评价表保持写入前的状态
    pub async fn write(
        &mut self,
        indicator_id: &str,
        period: Period,
        value: MarkValue,
    ) -> AppResult<EditOutcome> {
        let mut next = self.sheet.clone();
        let outcome = next.write(indicator_id, period, value);
        match &outcome {
            EditOutcome::Applied { mark, ghost_periods } => {
                self.store.save_mark(mark).await?;
                self.sheet = next;
                info!(
                    "✓ 已保存 {} {} = {} (幽灵学期: {})",
                    indicator_id,
                    period,
                    value.symbol(),
                    ghost_periods.len()
                );
            }
            EditOutcome::Rejected { requested, current } => {
                warn!(
                    "⚠️ 只能编辑当前学期 {}，忽略对 {} 的写入",
                    current, requested
                );
            }
        }
        Ok(outcome)
    }
}
