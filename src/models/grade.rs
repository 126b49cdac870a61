use crate::error::DataError;
use crate::services::normalizer::normalize;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 幼儿园托班（cuna）的细分阶段
pub const NURSERY_SUB_LEVELS: [&str; 3] = ["lactantes", "gateadores", "caminantes"];

/// 年级枚举
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum GradeLevel {
    /// 托班（0-3 岁，含细分阶段）
    Nursery,
    /// 3 岁班
    ThreeYears,
    /// 4 岁班
    FourYears,
    /// 5 岁班
    FiveYears,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 4] = [
        GradeLevel::Nursery,
        GradeLevel::ThreeYears,
        GradeLevel::FourYears,
        GradeLevel::FiveYears,
    ];

    /// 获取年级代码（与数据文件中的写法一致）
    pub fn code(self) -> &'static str {
        match self {
            GradeLevel::Nursery => "cuna",
            GradeLevel::ThreeYears => "3 años",
            GradeLevel::FourYears => "4 años",
            GradeLevel::FiveYears => "5 años",
        }
    }

    /// 获取显示名称
    pub fn name(self) -> &'static str {
        match self {
            GradeLevel::Nursery => "Cuna",
            GradeLevel::ThreeYears => "Inicial 3 años",
            GradeLevel::FourYears => "Inicial 4 años",
            GradeLevel::FiveYears => "Inicial 5 años",
        }
    }

    /// 智能查找年级（支持模糊匹配）
    ///
    /// 接受 "5 años"、"Inicial cinco"、"cuna - lactantes" 等写法
    pub fn find(s: &str) -> Option<Self> {
        if let Ok(grade) = s.parse() {
            return Some(grade);
        }

        let key = normalize(s);
        if key.contains("cuna")
            || key.contains("nursery")
            || NURSERY_SUB_LEVELS.iter().any(|sub| key.contains(sub))
        {
            return Some(GradeLevel::Nursery);
        }

        let has_token = |options: &[&str]| {
            key.split(' ')
                .any(|token| options.iter().any(|o| *o == token))
        };
        if has_token(&["3", "tres"]) {
            return Some(GradeLevel::ThreeYears);
        }
        if has_token(&["4", "cuatro"]) {
            return Some(GradeLevel::FourYears);
        }
        if has_token(&["5", "cinco"]) {
            return Some(GradeLevel::FiveYears);
        }

        None
    }
}

impl GradeLevel {
    /// 找出一段文本中提到的所有年级
    ///
    /// 支持 "3, 4 y 5 años"、"3 a 5 años"、"de tres a cinco"、"3-5 años" 等写法
    pub fn find_all(s: &str) -> Vec<GradeLevel> {
        let key = normalize(&s.replace(['-', '–'], " a "));
        let mut found = Vec::new();

        if key.contains("cuna")
            || key.contains("nursery")
            || NURSERY_SUB_LEVELS.iter().any(|sub| key.contains(sub))
        {
            found.push(GradeLevel::Nursery);
        }

        let tokens: Vec<&str> = key.split(' ').collect();
        let ages: Vec<Option<u8>> = tokens.iter().map(|token| age_token(token)).collect();

        for (i, age) in ages.iter().enumerate() {
            let Some(from) = *age else {
                continue;
            };
            let to = match (tokens.get(i + 1), ages.get(i + 2)) {
                (Some(&"a"), Some(Some(to))) => *to,
                _ => from,
            };
            for grade in (from..=to).filter_map(GradeLevel::from_age) {
                if !found.contains(&grade) {
                    found.push(grade);
                }
            }
        }

        found
    }

    fn from_age(age: u8) -> Option<Self> {
        match age {
            3 => Some(GradeLevel::ThreeYears),
            4 => Some(GradeLevel::FourYears),
            5 => Some(GradeLevel::FiveYears),
            _ => None,
        }
    }
}

fn age_token(token: &str) -> Option<u8> {
    match token {
        "3" | "tres" => Some(3),
        "4" | "cuatro" => Some(4),
        "5" | "cinco" => Some(5),
        _ => None,
    }
}

impl FromStr for GradeLevel {
    type Err = DataError;

    /// 精确匹配年级代码
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        GradeLevel::ALL
            .into_iter()
            .find(|grade| normalize(grade.code()) == key)
            .ok_or_else(|| DataError::UnknownGrade { raw: s.to_string() })
    }
}

impl TryFrom<String> for GradeLevel {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GradeLevel::find(&value).ok_or(DataError::UnknownGrade { raw: value })
    }
}

impl From<GradeLevel> for String {
    fn from(grade: GradeLevel) -> Self {
        grade.code().to_string()
    }
}

impl std::fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 学生所在年级上下文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeContext {
    pub grade: GradeLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_level: Option<String>,
}

impl GradeContext {
    pub fn new(grade: GradeLevel) -> Self {
        Self {
            grade,
            sub_level: None,
        }
    }

    pub fn with_sub_level(mut self, sub_level: impl Into<String>) -> Self {
        self.sub_level = Some(sub_level.into());
        self
    }

    /// 归一化后的细分阶段，空字符串视为未设置
    pub fn sub_level_key(&self) -> Option<String> {
        self.sub_level
            .as_deref()
            .map(normalize)
            .filter(|key| !key.is_empty())
    }
}

impl std::fmt::Display for GradeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.sub_level {
            Some(sub) => write!(f, "{} ({})", self.grade.name(), sub),
            None => write!(f, "{}", self.grade.name()),
        }
    }
}
