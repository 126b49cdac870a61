//! 各年级的规则表
//!
//! 每个年级一个文件，只放数据：标准领域名、白名单、缩写表、排版策略。
//! 新增年级时只需新增文件并在这里注册，不需要改动分类/排版逻辑。

pub mod five_years;
pub mod four_years;
pub mod nursery;
pub mod three_years;

use crate::models::{GradeContext, GradeLevel};
use crate::services::classifier::{
    AllowListStrategy, ClassifierRegistry, TrustedTagStrategy,
};
use crate::services::paginator::LayoutRegistry;

/// 幼儿园（3-5 岁）的标准领域，按成绩单上的顺序排列
pub const INICIAL_DOMAINS: &[&str] = &[
    "Personal Social",
    "Psicomotriz",
    "Comunicación",
    "Matemática",
    "Ciencia y Tecnología",
];

/// 托班的标准领域
pub const NURSERY_DOMAINS: &[&str] = &[
    "Personal Social",
    "Psicomotriz",
    "Comunicación",
    "Descubrimiento del Mundo",
];

/// 缩写表类型：原始描述（精确匹配）→ 显示文本
pub type SummaryTable = phf::Map<&'static str, &'static str>;

/// 内置分类策略注册表（3、4 岁班使用默认的可信标签策略）
pub fn builtin_classifiers() -> ClassifierRegistry {
    let mut registry = ClassifierRegistry::new(Box::new(TrustedTagStrategy::new(INICIAL_DOMAINS)));

    registry.register(
        GradeLevel::Nursery,
        None,
        Box::new(AllowListStrategy::new(nursery::ALLOW_LIST)),
    );
    registry.register(
        GradeLevel::Nursery,
        Some("caminantes"),
        Box::new(AllowListStrategy::new(nursery::WALKERS_ALLOW_LIST)),
    );
    registry.register(
        GradeLevel::FiveYears,
        None,
        Box::new(AllowListStrategy::new(five_years::ALLOW_LIST)),
    );

    registry
}

/// 查找年级对应的缩写表
pub fn summary_table(ctx: &GradeContext) -> Option<&'static SummaryTable> {
    match (ctx.grade, ctx.sub_level_key().as_deref()) {
        (GradeLevel::Nursery, Some("caminantes")) => Some(&nursery::WALKERS_SUMMARIES),
        (GradeLevel::Nursery, _) => Some(&nursery::SUMMARIES),
        (GradeLevel::FourYears, _) => Some(&four_years::SUMMARIES),
        (GradeLevel::FiveYears, _) => Some(&five_years::SUMMARIES),
        (GradeLevel::ThreeYears, _) => None,
    }
}

/// 内置排版策略（4 岁班没有专用策略，使用默认对半分栏）
pub fn builtin_layouts() -> LayoutRegistry {
    let mut registry = LayoutRegistry::empty();
    registry.insert(GradeLevel::Nursery, nursery::layout());
    registry.insert(GradeLevel::ThreeYears, three_years::layout());
    registry.insert(GradeLevel::FiveYears, five_years::layout());
    registry
}
