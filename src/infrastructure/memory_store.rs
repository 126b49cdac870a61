//! 内存存储实现，用于测试和演示

use super::data_source::{BulletinDataSource, MarkStore};
use crate::error::{AppError, AppResult, DataError};
use crate::models::{EvaluationMark, GradeContext, Indicator, Observation, StudentRecord};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct InMemoryDataSource {
    students: Vec<StudentRecord>,
    indicators: Vec<Indicator>,
    marks: Mutex<Vec<EvaluationMark>>,
    observations: Vec<Observation>,
    /// 读取时模拟失败的学生
    failing: HashSet<String>,
    /// 写入时模拟存储故障
    failing_saves: bool,
    student_fetches: AtomicUsize,
}

impl InMemoryDataSource {
    pub fn new(indicators: Vec<Indicator>) -> Self {
        Self {
            indicators,
            ..Default::default()
        }
    }

    pub fn with_student(mut self, student: StudentRecord) -> Self {
        self.students.push(student);
        self
    }

    pub fn with_marks(self, marks: impl IntoIterator<Item = EvaluationMark>) -> Self {
        if let Ok(mut stored) = self.marks.lock() {
            stored.extend(marks);
        }
        self
    }

    pub fn with_observation(mut self, observation: Observation) -> Self {
        self.observations.push(observation);
        self
    }

    /// 让该学生的读取返回错误
    pub fn fail_for(mut self, student_id: impl Into<String>) -> Self {
        self.failing.insert(student_id.into());
        self
    }

    /// 让所有 `save_mark` 返回错误
    pub fn fail_saves(mut self) -> Self {
        self.failing_saves = true;
        self
    }

    /// `fetch_student` 被调用的次数
    pub fn student_fetches(&self) -> usize {
        self.student_fetches.load(Ordering::Relaxed)
    }

    /// 当前保存的全部评价记录
    pub fn stored_marks(&self) -> AppResult<Vec<EvaluationMark>> {
        self.marks
            .lock()
            .map(|marks| marks.clone())
            .map_err(|e| AppError::Other(format!("评价记录锁已损坏: {}", e)))
    }

    fn check(&self, student_id: &str) -> AppResult<()> {
        if self.failing.contains(student_id) {
            return Err(AppError::fetch_failed(student_id, "模拟读取失败"));
        }
        Ok(())
    }
}

impl BulletinDataSource for InMemoryDataSource {
    async fn roster_ids(&self) -> AppResult<Vec<String>> {
        Ok(self.students.iter().map(|s| s.id.clone()).collect())
    }

    async fn fetch_student(&self, student_id: &str) -> AppResult<StudentRecord> {
        self.student_fetches.fetch_add(1, Ordering::Relaxed);
        self.check(student_id)?;
        self.students
            .iter()
            .find(|s| s.id == student_id)
            .cloned()
            .ok_or_else(|| {
                DataError::StudentNotFound {
                    student_id: student_id.to_string(),
                }
                .into()
            })
    }

    async fn fetch_indicators(&self, ctx: &GradeContext) -> AppResult<Vec<Indicator>> {
        Ok(self
            .indicators
            .iter()
            .filter(|indicator| indicator.applies_to(ctx))
            .cloned()
            .collect())
    }

    async fn fetch_evaluation_marks(&self, student_id: &str) -> AppResult<Vec<EvaluationMark>> {
        self.check(student_id)?;
        Ok(self
            .stored_marks()?
            .into_iter()
            .filter(|m| m.student_id == student_id)
            .collect())
    }

    async fn fetch_observations(&self, student_id: &str) -> AppResult<Vec<Observation>> {
        self.check(student_id)?;
        Ok(self
            .observations
            .iter()
            .filter(|o| o.student_id == student_id)
            .cloned()
            .collect())
    }
}

impl MarkStore for InMemoryDataSource {
    async fn save_mark(&self, mark: &EvaluationMark) -> AppResult<()> {
        if self.failing_saves {
            return Err(AppError::Other(format!(
                "模拟写入失败: {} {}",
                mark.student_id, mark.indicator_id
            )));
        }
        let mut marks = self
            .marks
            .lock()
            .map_err(|e| AppError::Other(format!("评价记录锁已损坏: {}", e)))?;

        match marks.iter_mut().find(|m| {
            m.student_id == mark.student_id
                && m.indicator_id == mark.indicator_id
                && m.period == mark.period
        }) {
            Some(existing) => existing.value = mark.value,
            None => marks.push(mark.clone()),
        }
        Ok(())
    }
}
