use super::grade::{GradeContext, GradeLevel, NURSERY_SUB_LEVELS};
use crate::services::normalizer::normalize;
use serde::{Deserialize, Serialize};

/// 评价指标（一条可观察的学习表现）
///
/// 每次生成成绩单时重新读取，生成过程中不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: String,
    pub description: String,
    /// 上游的领域标签，部分年级不可靠
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_tag: Option<String>,
    /// 适用年级描述，如 "3 años, 4 años" 或 "cuna lactantes"
    #[serde(default)]
    pub applicable_levels: String,
    #[serde(default)]
    pub display_order: i32,
}

impl Indicator {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            domain_tag: None,
            applicable_levels: String::new(),
            display_order: 0,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.domain_tag = Some(tag.into());
        self
    }

    pub fn with_levels(mut self, levels: impl Into<String>) -> Self {
        self.applicable_levels = levels.into();
        self
    }

    pub fn with_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    /// 归一化后的描述，用作去重和白名单匹配的键
    pub fn description_key(&self) -> String {
        normalize(&self.description)
    }

    /// 判断指标是否适用于给定年级
    ///
    /// 空标签或 "todos" 适用于所有年级；托班细分阶段只在标签显式写出时才参与过滤
    pub fn applies_to(&self, ctx: &GradeContext) -> bool {
        let parts: Vec<&str> = self
            .applicable_levels
            .split([',', ';', '/', '|'])
            .filter(|part| !normalize(part).is_empty())
            .collect();

        if parts.is_empty() || parts.iter().any(|part| normalize(part).starts_with("todos")) {
            return true;
        }

        let grade_parts: Vec<String> = parts
            .iter()
            .filter(|part| GradeLevel::find_all(part).contains(&ctx.grade))
            .map(|part| normalize(part))
            .collect();
        if grade_parts.is_empty() {
            return false;
        }

        let Some(sub_level) = ctx.sub_level_key() else {
            return true;
        };
        let staged: Vec<&String> = grade_parts
            .iter()
            .filter(|part| NURSERY_SUB_LEVELS.iter().any(|sub| part.contains(sub)))
            .collect();
        staged.is_empty() || staged.iter().any(|part| part.contains(&sub_level))
    }
}
