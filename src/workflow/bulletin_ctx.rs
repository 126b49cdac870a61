//! 学生处理上下文
//!
//! 封装"我正在处理名单中的第几个学生"这一信息

use std::fmt::Display;

/// 学生处理上下文（仅用于日志）
#[derive(Debug, Clone)]
pub struct StudentCtx {
    pub student_id: String,

    /// 名单中的序号（从1开始）
    pub index: usize,

    pub total: usize,
}

impl StudentCtx {
    pub fn new(student_id: impl Into<String>, index: usize, total: usize) -> Self {
        Self {
            student_id: student_id.into(),
            index,
            total,
        }
    }
}

impl Display for StudentCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[学生 {}/{} ID#{}]", self.index, self.total, self.student_id)
    }
}
