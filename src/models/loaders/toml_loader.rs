use crate::error::{AppError, AppResult, FileError};
use crate::models::bulletin::StudentRecord;
use crate::models::evaluation::{EvaluationMark, MarkValue, Observation, Period};
use crate::models::indicator::Indicator;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// indicators.toml 的文件结构
#[derive(Debug, Default, Serialize, Deserialize)]
struct IndicatorFile {
    #[serde(default)]
    indicators: Vec<Indicator>,
}

/// 学生文件中的评价记录（student_id 由文件头给出）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMark {
    pub indicator_id: String,
    pub period: Period,
    pub value: MarkValue,
}

/// 学生文件中的观察记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObservation {
    pub period: Period,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub areas_to_support: String,
}

/// students/<id>.toml 的文件结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFile {
    pub student: StudentRecord,
    #[serde(default)]
    pub marks: Vec<StoredMark>,
    #[serde(default)]
    pub observations: Vec<StoredObservation>,
}

impl StudentFile {
    pub fn evaluation_marks(&self) -> Vec<EvaluationMark> {
        self.marks
            .iter()
            .map(|m| EvaluationMark::new(&self.student.id, &m.indicator_id, m.period, m.value))
            .collect()
    }

    pub fn observations(&self) -> Vec<Observation> {
        self.observations
            .iter()
            .map(|o| Observation {
                student_id: self.student.id.clone(),
                period: o.period,
                strengths: o.strengths.clone(),
                areas_to_support: o.areas_to_support.clone(),
            })
            .collect()
    }

    /// 按 (indicator_id, period) 覆盖写入
    pub fn upsert_mark(&mut self, indicator_id: &str, period: Period, value: MarkValue) {
        match self
            .marks
            .iter_mut()
            .find(|m| m.indicator_id == indicator_id && m.period == period)
        {
            Some(existing) => existing.value = value,
            None => self.marks.push(StoredMark {
                indicator_id: indicator_id.to_string(),
                period,
                value,
            }),
        }
    }
}

/// 从 TOML 文件加载指标列表
pub async fn load_indicator_file(path: &Path) -> AppResult<Vec<Indicator>> {
    let path_str = path.display().to_string();
    if !path.exists() {
        return Err(FileError::NotFound { path: path_str }.into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;
    let file: IndicatorFile =
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_str, e))?;

    tracing::debug!("从 {} 加载 {} 个指标", path_str, file.indicators.len());
    Ok(file.indicators)
}

/// 从 TOML 文件加载单个学生（含评价与观察）
pub async fn load_student_file(path: &Path) -> AppResult<StudentFile> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_str, e))
}

/// 将学生文件整体写回
pub async fn save_student_file(path: &Path, file: &StudentFile) -> AppResult<()> {
    let path_str = path.display().to_string();
    let content = toml::to_string_pretty(file)
        .map_err(|e| AppError::file_write_failed(&path_str, e))?;

    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(&path_str, e))
}

/// 列出目录中的所有学生文件（按文件名排序，保证批量顺序稳定）
pub async fn list_student_files(folder: &Path) -> AppResult<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder.display().to_string(),
        }
        .into());
    }

    let mut files = Vec::new();
    let mut entries = fs::read_dir(folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder.display().to_string(), e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
