//! 基于数据目录的存储实现
//!
//! ```text
//! data/
//! ├── indicators.toml        # [[indicators]] 列表
//! └── students/
//!     ├── s01.toml           # [student] + [[marks]] + [[observations]]
//!     └── s02.toml
//! ```

use super::data_source::{BulletinDataSource, MarkStore};
use crate::error::{AppResult, DataError};
use crate::models::loaders::{
    list_student_files, load_indicator_file, load_student_file, save_student_file, StudentFile,
};
use crate::models::{EvaluationMark, GradeContext, Indicator, Observation, StudentRecord};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

pub struct TomlDataSource {
    students_dir: PathBuf,
    indicators: Vec<Indicator>,
    /// 串行化学生文件的读-改-写
    write_lock: Mutex<()>,
}

impl TomlDataSource {
    /// 打开数据目录，指标文件在此时一次性加载
    pub async fn open(data_dir: impl AsRef<Path>) -> AppResult<Self> {
        let data_dir = data_dir.as_ref();
        let indicators = load_indicator_file(&data_dir.join("indicators.toml")).await?;
        info!("✓ 从 {} 加载 {} 个指标", data_dir.display(), indicators.len());

        Ok(Self {
            students_dir: data_dir.join("students"),
            indicators,
            write_lock: Mutex::new(()),
        })
    }

    fn student_path(&self, student_id: &str) -> AppResult<PathBuf> {
        if student_id.is_empty()
            || student_id.contains(['/', '\\'])
            || student_id.contains("..")
        {
            return Err(DataError::StudentNotFound {
                student_id: student_id.to_string(),
            }
            .into());
        }
        Ok(self.students_dir.join(format!("{}.toml", student_id)))
    }

    async fn load(&self, student_id: &str) -> AppResult<StudentFile> {
        let path = self.student_path(student_id)?;
        if !path.exists() {
            return Err(DataError::StudentNotFound {
                student_id: student_id.to_string(),
            }
            .into());
        }
        load_student_file(&path).await
    }
}

impl BulletinDataSource for TomlDataSource {
    async fn roster_ids(&self) -> AppResult<Vec<String>> {
        let files = list_student_files(&self.students_dir).await?;
        Ok(files
            .iter()
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()))
            .map(str::to_string)
            .collect())
    }

    async fn fetch_student(&self, student_id: &str) -> AppResult<StudentRecord> {
        Ok(self.load(student_id).await?.student)
    }

    async fn fetch_indicators(&self, ctx: &GradeContext) -> AppResult<Vec<Indicator>> {
        let applicable: Vec<Indicator> = self
            .indicators
            .iter()
            .filter(|indicator| indicator.applies_to(ctx))
            .cloned()
            .collect();
        debug!("{}: {} / {} 个指标适用", ctx, applicable.len(), self.indicators.len());
        Ok(applicable)
    }

    async fn fetch_evaluation_marks(&self, student_id: &str) -> AppResult<Vec<EvaluationMark>> {
        Ok(self.load(student_id).await?.evaluation_marks())
    }

    async fn fetch_observations(&self, student_id: &str) -> AppResult<Vec<Observation>> {
        Ok(self.load(student_id).await?.observations())
    }
}

impl MarkStore for TomlDataSource {
    async fn save_mark(&self, mark: &EvaluationMark) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;

        let path = self.student_path(&mark.student_id)?;
        let mut file = self.load(&mark.student_id).await?;
        file.upsert_mark(&mark.indicator_id, mark.period, mark.value);
        save_student_file(&path, &file).await?;

        debug!(
            "已保存评价: {} {} {} = {:?}",
            mark.student_id, mark.indicator_id, mark.period, mark.value
        );
        Ok(())
    }
}
