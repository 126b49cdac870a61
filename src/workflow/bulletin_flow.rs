//! 成绩单生成流程 - 流程层
//!
//! 核心职责：定义"一个学生"的成绩单生成流程
//!
//! 流程顺序：
//! 1. 读取学生、适用指标、评价记录、观察记录
//! 2. 引擎排版（去重 → 分类 → 缩写 → 分栏）
//! 3. 叠加评价记录，推导幽灵标记
//! 4. 组装 `StudentBulletin`

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::infrastructure::BulletinDataSource;
use crate::models::{GradeContext, PeriodObservation, StudentBulletin, StudentRecord};
use crate::services::{overlay, BulletinEngine};
use crate::utils::truncate_text;

/// 成绩单生成流程
///
/// - 只做读取和组装，不写任何数据
/// - 排版逻辑全部委托给 `BulletinEngine`
pub struct BulletinFlow<S> {
    source: S,
    engine: BulletinEngine,
    verbose_logging: bool,
}

impl<S: BulletinDataSource> BulletinFlow<S> {
    pub fn new(source: S, engine: BulletinEngine) -> Self {
        Self {
            source,
            engine,
            verbose_logging: false,
        }
    }

    pub fn with_verbose_logging(mut self, verbose: bool) -> Self {
        self.verbose_logging = verbose;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 生成单个学生的成绩单
    pub async fn generate_bulletin(
        &self,
        student_id: &str,
        grade_ctx: &GradeContext,
    ) -> AppResult<StudentBulletin> {
        let student = self.source.fetch_student(student_id).await?;
        self.render_for(student, grade_ctx).await
    }

    /// 使用学生档案中的年级生成成绩单
    pub async fn generate_for_student(&self, student_id: &str) -> AppResult<StudentBulletin> {
        let student = self.source.fetch_student(student_id).await?;
        let grade_ctx = student.grade_context();
        self.render_for(student, &grade_ctx).await
    }

    async fn render_for(
        &self,
        student: StudentRecord,
        grade_ctx: &GradeContext,
    ) -> AppResult<StudentBulletin> {
        let indicators = self.source.fetch_indicators(grade_ctx).await?;
        let marks = self.source.fetch_evaluation_marks(&student.id).await?;
        let observations = self.source.fetch_observations(&student.id).await?;

        if indicators.is_empty() {
            warn!("⚠️ {} 没有适用的指标，成绩单将为空", grade_ctx);
        }

        let rendered = self.engine.render(&indicators, grade_ctx);
        let grid = overlay(&rendered.buckets, &marks);

        if self.verbose_logging {
            self.log_rendered(&student.id, rendered.suppressed.len(), rendered.duplicates_removed);
        }

        info!(
            "✓ {} ({}) 排版完成: 共 {} 个指标",
            truncate_text(&student.full_name, 30),
            grade_ctx,
            grid.rows.len()
        );

        Ok(StudentBulletin {
            student_id: student.id,
            student_name: student.full_name,
            grade: grade_ctx.clone(),
            layout: rendered.bulletin,
            grid,
            observations: PeriodObservation::per_period(&observations),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        })
    }

    // ========== 日志辅助函数 ==========

    fn log_rendered(&self, student_id: &str, suppressed: usize, duplicates_removed: usize) {
        debug!(
            "  {}: 去重丢弃 {} 个, 白名单抑制 {} 个",
            student_id, duplicates_removed, suppressed
        );
    }
}
