//! 名单处理器 - 编排层
//!
//! 逐个学生生成成绩单。单个学生失败只记录日志并跳过，
//! 整批不会中止；结果按学生逐个累积，中途停止也保留已完成的部分。

use tracing::error;

use crate::infrastructure::BulletinDataSource;
use crate::models::StudentBulletin;
use crate::utils::logging::log_student_start;
use crate::workflow::{BulletinFlow, StudentCtx};

/// 批量生成结果
#[derive(Debug, Default)]
pub struct RosterOutcome {
    /// 按名单顺序
    pub succeeded: Vec<StudentBulletin>,
    pub failed_student_ids: Vec<String>,
}

impl RosterOutcome {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed_student_ids.len()
    }
}

/// 为名单中的每个学生生成成绩单（顺序执行，每人一次读取）
pub async fn generate_bulletins_for_roster<S: BulletinDataSource>(
    flow: &BulletinFlow<S>,
    student_ids: &[String],
) -> RosterOutcome {
    let total = student_ids.len();
    let mut outcome = RosterOutcome::default();

    for (idx, student_id) in student_ids.iter().enumerate() {
        let ctx = StudentCtx::new(student_id.as_str(), idx + 1, total);
        log_student_start(ctx.index, ctx.total, &ctx.student_id);

        match flow.generate_for_student(student_id).await {
            Ok(bulletin) => outcome.succeeded.push(bulletin),
            Err(e) => {
                error!("{} ❌ 生成失败，已跳过: {}", ctx, e);
                outcome.failed_student_ids.push(student_id.clone());
            }
        }
    }

    outcome
}
