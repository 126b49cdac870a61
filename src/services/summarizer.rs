//! 显示文本缩写
//!
//! 按年级查表（以原始描述精确匹配），只改变显示文本，不影响分组和分栏

use crate::models::{DomainBucket, GradeContext};
use crate::rules;

/// 返回缩写后的显示文本，没有对应条目时原样返回
pub fn summarize(description: &str, ctx: &GradeContext) -> String {
    rules::summary_table(ctx)
        .and_then(|table| table.get(description))
        .map(|short| short.to_string())
        .unwrap_or_else(|| description.to_string())
}

/// 对分类结果的每一项应用缩写
pub fn apply_summaries(buckets: &mut [DomainBucket], ctx: &GradeContext) {
    let Some(table) = rules::summary_table(ctx) else {
        return;
    };

    for item in buckets.iter_mut().flat_map(|bucket| bucket.items.iter_mut()) {
        if let Some(short) = table.get(item.indicator.description.as_str()) {
            item.display_text = short.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BucketItem, GradeLevel, Indicator};

    const LONG: &str = "Establece relaciones entre los objetos de su entorno según sus características perceptuales al comparar y agrupar";

    #[test]
    fn test_summarize_exact_match_only() {
        let ctx = GradeContext::new(GradeLevel::FiveYears);
        assert_eq!(
            summarize(LONG, &ctx),
            "Compara y agrupa objetos según sus características"
        );
        // 大小写不同就不算命中
        assert_eq!(summarize(&LONG.to_uppercase(), &ctx), LONG.to_uppercase());
    }

    #[test]
    fn test_summarize_grade_without_table() {
        let ctx = GradeContext::new(GradeLevel::ThreeYears);
        assert_eq!(summarize(LONG, &ctx), LONG);
    }

    #[test]
    fn test_apply_summaries_keeps_membership() {
        let mut buckets = vec![DomainBucket {
            key: "matematica".into(),
            label: "Matemática".into(),
            items: vec![
                BucketItem::new(Indicator::new("m1", LONG)),
                BucketItem::new(Indicator::new("m2", "Cuenta hasta 10")),
            ],
        }];
        apply_summaries(&mut buckets, &GradeContext::new(GradeLevel::FiveYears));

        assert_eq!(buckets[0].len(), 2);
        assert_eq!(
            buckets[0].items[0].display_text,
            "Compara y agrupa objetos según sus características"
        );
        assert_eq!(buckets[0].items[0].indicator.description, LONG);
        assert_eq!(buckets[0].items[1].display_text, "Cuenta hasta 10");
    }
}
