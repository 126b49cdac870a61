//! 数据访问端口
//!
//! 引擎本身不读写存储，这里只声明它需要的能力；
//! 具体实现见 `toml_store`（数据目录）和 `memory_store`（测试、演示）。

use crate::error::AppResult;
use crate::models::{EvaluationMark, GradeContext, Indicator, Observation, StudentRecord};

/// 生成成绩单所需的读取能力
#[allow(async_fn_in_trait)]
pub trait BulletinDataSource {
    /// 班级名单（按稳定顺序）
    async fn roster_ids(&self) -> AppResult<Vec<String>>;

    async fn fetch_student(&self, student_id: &str) -> AppResult<StudentRecord>;

    /// 适用于该年级的指标
    async fn fetch_indicators(&self, ctx: &GradeContext) -> AppResult<Vec<Indicator>>;

    /// 每个已存在的 (indicator_id, period) 一条
    async fn fetch_evaluation_marks(&self, student_id: &str) -> AppResult<Vec<EvaluationMark>>;

    /// 每学期最多一条
    async fn fetch_observations(&self, student_id: &str) -> AppResult<Vec<Observation>>;
}

/// 评价记录写入能力（按 (student_id, indicator_id, period) 覆盖写）
#[allow(async_fn_in_trait)]
pub trait MarkStore {
    async fn save_mark(&self, mark: &EvaluationMark) -> AppResult<()>;
}
