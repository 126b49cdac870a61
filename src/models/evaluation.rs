use crate::error::DataError;
use serde::{Deserialize, Serialize};

/// 评价学期（一学年固定三个，严格有序）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Period {
    First = 1,
    Second = 2,
    Third = 3,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::First, Period::Second, Period::Third];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// 0-based 下标，用于按学期排列的数组
    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Period::First),
            2 => Some(Period::Second),
            3 => Some(Period::Third),
            _ => None,
        }
    }

    /// 严格晚于当前学期的所有学期
    pub fn later(self) -> impl Iterator<Item = Period> {
        Period::ALL.into_iter().filter(move |p| *p > self)
    }
}

impl TryFrom<u8> for Period {
    type Error = DataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Period::from_number(value).ok_or(DataError::InvalidPeriod { period: value })
    }
}

impl From<Period> for u8 {
    fn from(period: Period) -> Self {
        period.number()
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.number())
    }
}

/// 评价等级
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkValue {
    #[default]
    Unset,
    /// 起步（Inicio）
    Started,
    /// 发展中（Proceso）
    InProgress,
    /// 已达成（Logrado）
    Acquired,
}

impl MarkValue {
    pub fn is_set(self) -> bool {
        self != MarkValue::Unset
    }

    /// 打印用的简写符号
    pub fn symbol(self) -> &'static str {
        match self {
            MarkValue::Unset => "",
            MarkValue::Started => "I",
            MarkValue::InProgress => "P",
            MarkValue::Acquired => "L",
        }
    }
}

/// 单元格评价记录，按 (student_id, indicator_id, period) 唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationMark {
    pub student_id: String,
    pub indicator_id: String,
    pub period: Period,
    pub value: MarkValue,
}

impl EvaluationMark {
    pub fn new(
        student_id: impl Into<String>,
        indicator_id: impl Into<String>,
        period: Period,
        value: MarkValue,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            indicator_id: indicator_id.into(),
            period,
            value,
        }
    }
}

/// 教师观察记录，按 (student_id, period) 唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub student_id: String,
    pub period: Period,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub areas_to_support: String,
}

/// 成绩单中某一学期的观察文本（缺失时为空串）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodObservation {
    pub period: u8,
    pub strengths: String,
    pub areas_to_support: String,
}

impl PeriodObservation {
    /// 将观察记录展开为每学期一条
    pub fn per_period(observations: &[Observation]) -> Vec<PeriodObservation> {
        Period::ALL
            .iter()
            .map(|period| {
                observations
                    .iter()
                    .find(|o| o.period == *period)
                    .map(|o| PeriodObservation {
                        period: period.number(),
                        strengths: o.strengths.clone(),
                        areas_to_support: o.areas_to_support.clone(),
                    })
                    .unwrap_or(PeriodObservation {
                        period: period.number(),
                        ..Default::default()
                    })
            })
            .collect()
    }
}
