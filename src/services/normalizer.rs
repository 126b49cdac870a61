//! 文本归一化
//!
//! 去重和白名单匹配都以归一化后的文本作为相等键

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// 归一化文本：小写、去重音、去标点、合并空白
///
/// 纯函数，对任意输入都返回结果
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 宽松匹配：两个归一化键相等或互相包含
pub fn loosely_matches(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(b) || b.contains(a)
}
